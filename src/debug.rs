/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct with the frame and update rate
 * counters of the driver, and Diagnostics, a read-only view of engine state
 * for the HUD:
 * - particle and group counts
 * - the four runtime tunables as text
 * - the interaction matrix as colored swatches
 */

use std::time::{Duration, Instant};

use crate::engine::SimulationEngine;

/// RGBA color of one matrix swatch.
pub type Swatch = [u8; 4];

// Debug information to display
pub struct DebugInfo {
    pub fps: u32,
    pub ups: u32,
    pub frame_time: Duration,
    frames: u32,
    updates: u32,
    last_check: Instant,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0,
            ups: 0,
            frame_time: Duration::ZERO,
            frames: 0,
            updates: 0,
            last_check: Instant::now(),
        }
    }
}

impl DebugInfo {
    pub fn record_frame(&mut self) {
        self.frames += 1;
    }

    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    /// Publishes the counters once per second and restarts them.
    pub fn refresh(&mut self, now: Instant) {
        if now.duration_since(self.last_check) >= Duration::from_secs(1) {
            self.last_check = now;
            self.fps = self.frames;
            self.ups = self.updates;
            self.frames = 0;
            self.updates = 0;
        }
    }
}

/// Swatch for one coefficient: green for attraction, red for repulsion,
/// opacity proportional to magnitude, faint gray for zero.
pub fn swatch_color(value: f64) -> Swatch {
    let alpha = |v: f64| (v * 255.0).clamp(0.0, 255.0) as u8;
    if value > 0.0 {
        [0, 128, 0, alpha(value)]
    } else if value < 0.0 {
        [128, 0, 0, alpha(-value)]
    } else {
        [60, 60, 60, 20]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    pub particle_count: usize,
    pub group_count: usize,
    pub particles_per_group: usize,
    pub r_max: f64,
    pub dt: f64,
    pub friction: f64,
    pub force_factor: f64,
    /// Row-major, `group_count` swatches per row.
    pub swatches: Vec<Swatch>,
}

impl Diagnostics {
    pub fn capture(engine: &SimulationEngine) -> Self {
        Self {
            particle_count: engine.particles().len(),
            group_count: engine.group_count(),
            particles_per_group: engine.particles_per_group(),
            r_max: engine.r_max(),
            dt: engine.dt(),
            friction: engine.friction(),
            force_factor: engine.force_factor(),
            swatches: engine
                .matrix()
                .rows()
                .flatten()
                .map(|&value| swatch_color(value))
                .collect(),
        }
    }

    pub fn hud_lines(&self) -> [String; 4] {
        [
            format!("rMax: {:.0}", self.r_max),
            format!("dt: {:.4}", self.dt),
            format!("fric: {:.2}", self.friction),
            format!("F: {:.4}", self.force_factor),
        ]
    }

    pub fn swatch(&self, row: usize, col: usize) -> Swatch {
        self.swatches[row * self.group_count + col]
    }
}
