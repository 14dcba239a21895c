/*
 * Application Module
 *
 * This module defines the nannou model and the fixed-timestep driver of the
 * particle simulation. The engine is stepped at a fixed rate from an
 * accumulator of elapsed time; rendering reads the engine between steps, so a
 * frame never observes a half-updated step.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::time::{Duration, Instant};

use crate::debug::DebugInfo;
use crate::engine::SimulationEngine;
use crate::input;
use crate::params::{SimulationParams, FRAMES_PER_SECOND, UPDATES_PER_SECOND};
use crate::renderer;
use crate::ui;

// At most this many steps per frame, so a stall cannot snowball
const MAX_STEPS_PER_FRAME: u32 = 8;

// Main model for the application
pub struct Model {
    pub engine: SimulationEngine,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub show_grid: bool,
    pub paused: bool,
    // Fixed timestep variables
    pub physics_accumulator: Duration,
    pub physics_step_size: Duration,
    pub last_update_time: Instant,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = SimulationParams::default();

    // Render rate; the update rate is fixed separately by the accumulator
    app.set_loop_mode(LoopMode::rate_fps(FRAMES_PER_SECOND));

    let window_id = app
        .new_window()
        .title("Particle Life")
        .size(params.domain_width as u32, params.domain_height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .unwrap();

    let window = app.window(window_id).unwrap();
    let egui = Egui::from_window(&window);

    // The simulation domain matches the window
    let (width, height) = window.inner_size_points();
    let params = SimulationParams {
        domain_width: width as f64,
        domain_height: height as f64,
        ..params
    };
    let engine = SimulationEngine::new(params).expect("default simulation parameters are valid");

    Model {
        engine,
        egui,
        debug_info: DebugInfo::default(),
        show_grid: false,
        paused: false,
        physics_accumulator: Duration::ZERO,
        physics_step_size: Duration::from_secs_f64(1.0 / UPDATES_PER_SECOND),
        last_update_time: Instant::now(),
    }
}

// Update the model
pub fn update(_app: &App, model: &mut Model, update: Update) {
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    ui::update_ui(model);

    let current_time = Instant::now();
    let frame_time = current_time.duration_since(model.last_update_time);
    model.last_update_time = current_time;

    if model.paused {
        model.physics_accumulator = Duration::ZERO;
    } else {
        model.physics_accumulator += frame_time;

        let mut steps = 0;
        while model.physics_accumulator >= model.physics_step_size {
            model.engine.step();
            model.debug_info.record_update();
            model.physics_accumulator -= model.physics_step_size;

            steps += 1;
            if steps == MAX_STEPS_PER_FRAME {
                model.physics_accumulator = Duration::ZERO;
                break;
            }
        }
    }

    model.debug_info.refresh(current_time);
}

// Keep the domain in step with the window
fn resized(_app: &App, model: &mut Model, size: Vec2) {
    if let Err(err) = model.engine.set_domain(size.x as f64, size.y as f64) {
        log::warn!("ignoring resize to {}x{}: {err}", size.x, size.y);
    }
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
