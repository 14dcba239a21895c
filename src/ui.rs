/*
 * UI Module
 *
 * This module builds the egui control panel with nannou_egui. Sliders show
 * the engine's tunables; a changed slider is written back through the engine
 * setter, never stored on the UI side.
 */

use nannou_egui::egui;

use crate::app::Model;
use crate::matrix::Preset;
use crate::params::SimulationParams;

pub fn update_ui(model: &mut Model) {
    let Model {
        engine,
        egui,
        debug_info,
        show_grid,
        paused,
        ..
    } = model;

    let mut r_max = engine.r_max();
    let mut friction = engine.friction();
    let mut force_factor = engine.force_factor();
    let mut dt = engine.dt();
    let mut preset = None;
    let mut randomize = false;
    let mut glow = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Physics", |ui| {
                ui.add(egui::Slider::new(&mut r_max, SimulationParams::get_r_max_range()).text("rMax"));
                ui.add(egui::Slider::new(&mut friction, SimulationParams::get_friction_range()).text("Friction"));
                ui.add(
                    egui::Slider::new(&mut force_factor, SimulationParams::get_force_factor_range())
                        .text("Force factor"),
                );
                ui.add(
                    egui::Slider::new(&mut dt, SimulationParams::get_dt_range())
                        .logarithmic(true)
                        .text("dt"),
                );
            });

            ui.collapsing("Interaction Matrix", |ui| {
                for candidate in Preset::ALL {
                    if ui.button(candidate.name()).clicked() {
                        preset = Some(candidate);
                    }
                }
                if ui.button("Randomize").clicked() {
                    randomize = true;
                }
            });

            ui.collapsing("Info", |ui| {
                ui.label(format!("FPS: {}", debug_info.fps));
                ui.label(format!("UPS: {}", debug_info.ups));
                ui.label(format!("Particles: {}", engine.particles().len()));
                ui.label(format!(
                    "Groups: {} x {}",
                    engine.group_count(),
                    engine.particles_per_group()
                ));
                ui.label(format!("Steps: {}", engine.step_count()));
                ui.label(format!("Seed: {:#018x}", engine.seed()));
            });

            if ui.button("Toggle Glow").clicked() {
                glow = true;
            }
            ui.checkbox(show_grid, "Show Grid");
            ui.checkbox(paused, "Pause Simulation");
        });

    if r_max != engine.r_max() {
        if let Err(err) = engine.set_r_max(r_max) {
            log::warn!("rMax edit rejected: {err}");
        }
    }
    if friction != engine.friction() {
        engine.set_friction(friction);
    }
    if force_factor != engine.force_factor() {
        engine.set_force_factor(force_factor);
    }
    if dt != engine.dt() {
        engine.set_dt(dt);
    }
    if let Some(preset) = preset {
        engine.apply_preset(preset);
    }
    if randomize {
        if let Err(err) = engine.randomize_matrix() {
            log::warn!("matrix randomization rejected: {err}");
        }
    }
    if glow {
        engine.toggle_glow_all();
    }
}
