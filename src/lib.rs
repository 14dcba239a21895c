/*
 * Particle Life Simulation - Module Definitions
 *
 * This file defines the module structure of the particle simulation. The
 * simulation core (particle, matrix, spatial_grid, physics, engine, params,
 * error, debug) is independent of nannou; app, input, ui and renderer are the
 * windowing front end.
 */

// Re-export key components for easier access
pub use app::Model;
pub use debug::{DebugInfo, Diagnostics};
pub use engine::SimulationEngine;
pub use error::ConfigurationError;
pub use matrix::{InteractionMatrix, Preset};
pub use params::{MatrixRandomization, SimulationParams};
pub use particle::Particle;
pub use spatial_grid::{GridLayout, SpatialGrid};

// Define modules
pub mod app;
pub mod debug;
pub mod engine;
pub mod error;
pub mod input;
pub mod matrix;
pub mod params;
pub mod particle;
pub mod physics;
pub mod renderer;
pub mod spatial_grid;
pub mod ui;
