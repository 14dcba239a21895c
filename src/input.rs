/*
 * Input Module
 *
 * This module maps key presses to edits of the running simulation. Every
 * edit goes through the engine's setters; the control layer keeps no copy of
 * the tunables.
 *
 * Keys:
 * - , / .           friction down / up
 * - Left / Right    dt shrink / grow
 * - Down / Up       force factor down / up
 * - K / L           rMax down / up
 * - W A S D         move every particle
 * - I               toggle glow
 * - Space           randomize the interaction matrix
 * - 1 2 3 4         matrix presets
 * - G               toggle the grid overlay
 * - Escape          quit
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::engine::SimulationEngine;
use crate::matrix::Preset;
use crate::params::{
    DT_GROW, DT_SHRINK, FORCE_FACTOR_STEP, FRICTION_STEP, R_MAX_STEP, TRANSLATE_STEP,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Control {
    FrictionDown,
    FrictionUp,
    DtShrink,
    DtGrow,
    ForceDown,
    ForceUp,
    RMaxDown,
    RMaxUp,
    Translate { dx: f64, dy: f64 },
    ToggleGlow,
    RandomizeMatrix,
    Preset(Preset),
    ToggleGrid,
    Quit,
}

impl Control {
    pub fn from_key(key: Key) -> Option<Self> {
        let control = match key {
            Key::Escape => Control::Quit,
            Key::Comma => Control::FrictionDown,
            Key::Period => Control::FrictionUp,
            Key::Right => Control::DtGrow,
            Key::Left => Control::DtShrink,
            Key::Up => Control::ForceUp,
            Key::Down => Control::ForceDown,
            Key::K => Control::RMaxDown,
            Key::L => Control::RMaxUp,
            // Screen y grows downwards in simulation space
            Key::W => Control::Translate { dx: 0.0, dy: -TRANSLATE_STEP },
            Key::S => Control::Translate { dx: 0.0, dy: TRANSLATE_STEP },
            Key::A => Control::Translate { dx: -TRANSLATE_STEP, dy: 0.0 },
            Key::D => Control::Translate { dx: TRANSLATE_STEP, dy: 0.0 },
            Key::I => Control::ToggleGlow,
            Key::Space => Control::RandomizeMatrix,
            Key::Key1 => Control::Preset(Preset::TotalRepulsion),
            Key::Key2 => Control::Preset(Preset::SelfAttract),
            Key::Key3 => Control::Preset(Preset::RgbWorm),
            Key::Key4 => Control::Preset(Preset::Chaotic),
            Key::G => Control::ToggleGrid,
            _ => return None,
        };
        Some(control)
    }

    /// Applies an engine edit. Quit and ToggleGrid belong to the driver and
    /// are ignored here. Rejected edits leave the engine unchanged.
    pub fn apply(self, engine: &mut SimulationEngine) {
        match self {
            Control::FrictionDown => engine.set_friction(engine.friction() - FRICTION_STEP),
            Control::FrictionUp => engine.set_friction(engine.friction() + FRICTION_STEP),
            Control::DtShrink => engine.set_dt(engine.dt() * DT_SHRINK),
            Control::DtGrow => engine.set_dt(engine.dt() * DT_GROW),
            Control::ForceDown => engine.set_force_factor(engine.force_factor() - FORCE_FACTOR_STEP),
            Control::ForceUp => engine.set_force_factor(engine.force_factor() + FORCE_FACTOR_STEP),
            Control::RMaxDown => {
                if let Err(err) = engine.set_r_max(engine.r_max() - R_MAX_STEP) {
                    log::warn!("rMax edit rejected: {err}");
                }
            }
            Control::RMaxUp => {
                if let Err(err) = engine.set_r_max(engine.r_max() + R_MAX_STEP) {
                    log::warn!("rMax edit rejected: {err}");
                }
            }
            Control::Translate { dx, dy } => engine.translate_all(dx, dy),
            Control::ToggleGlow => engine.toggle_glow_all(),
            Control::RandomizeMatrix => {
                if let Err(err) = engine.randomize_matrix() {
                    log::warn!("matrix randomization rejected: {err}");
                }
            }
            Control::Preset(preset) => engine.apply_preset(preset),
            Control::ToggleGrid | Control::Quit => {}
        }
    }
}

// Key pressed event handler
pub fn key_pressed(app: &App, model: &mut Model, key: Key) {
    // Keys typed into the egui panel are not simulation controls
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    let Some(control) = Control::from_key(key) else {
        return;
    };

    match control {
        Control::Quit => app.quit(),
        Control::ToggleGrid => model.show_grid = !model.show_grid,
        _ => control.apply(&mut model.engine),
    }
}
