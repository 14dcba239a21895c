/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct holding every tunable of the
 * particle simulation: population layout, domain size, the four physics
 * tunables edited at runtime, and the fixed tunings of the force law and the
 * random matrix generator. The engine owns one instance and is the only writer.
 */

use crate::error::{ConfigurationError, Result};
use crate::matrix::Preset;

// Keyboard edit step sizes
pub const FRICTION_STEP: f64 = 0.01;
pub const DT_GROW: f64 = 1.2;
pub const DT_SHRINK: f64 = 5.0 / 6.0;
pub const FORCE_FACTOR_STEP: f64 = 1.0;
pub const R_MAX_STEP: f64 = 1.0;
pub const TRANSLATE_STEP: f64 = 10.0;

// Fixed-timestep driver rates
pub const UPDATES_PER_SECOND: f64 = 60.0;
pub const FRAMES_PER_SECOND: f64 = 120.0;

/// Distance kept between freshly spawned particles and the domain edge.
pub const SPAWN_MARGIN: f64 = 5.0;

/// Discrete value set used when regenerating the interaction matrix:
/// `min + k * step` for `k` in `0..steps`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixRandomization {
    pub min: f64,
    pub step: f64,
    pub steps: u32,
}

impl Default for MatrixRandomization {
    fn default() -> Self {
        // {-1.0, -0.8, ..., 0.8}
        Self {
            min: -1.0,
            step: 0.2,
            steps: 10,
        }
    }
}

impl MatrixRandomization {
    pub fn validate(&self) -> Result<()> {
        if self.steps == 0 || !(self.step > 0.0) {
            return Err(ConfigurationError::InvalidRandomization);
        }
        Ok(())
    }

    #[inline]
    pub fn value(&self, k: u32) -> f64 {
        self.min + f64::from(k) * self.step
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationParams {
    pub num_groups: usize,
    pub particles_per_group: usize,
    pub domain_width: f64,
    pub domain_height: f64,
    pub particle_radius: u32,
    // Runtime tunables
    pub r_max: f64,
    pub friction: f64,
    pub force_factor: f64,
    pub dt: f64,
    /// Normalized distance below which every pair repels regardless of the matrix.
    pub core_repulsion: f64,
    pub matrix_randomization: MatrixRandomization,
    pub initial_preset: Preset,
    /// None draws a seed from entropy at engine construction.
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_groups: 6,
            particles_per_group: 600,
            domain_width: 1800.0,
            domain_height: 1200.0,
            particle_radius: 2,
            r_max: 172.0,
            friction: 0.90,
            force_factor: 1.0,
            dt: 0.01,
            core_repulsion: 0.2,
            matrix_randomization: MatrixRandomization::default(),
            initial_preset: Preset::SelfAttract,
            seed: None,
        }
    }
}

impl SimulationParams {
    /// Checks everything the engine relies on at construction time.
    /// Friction, force factor and dt are deliberately left unchecked.
    pub fn validate(&self) -> Result<()> {
        if self.num_groups == 0 {
            return Err(ConfigurationError::NoGroups);
        }
        if !(self.r_max > 0.0) {
            return Err(ConfigurationError::NonPositiveRMax(self.r_max));
        }
        if !(self.domain_width > 0.0) || !(self.domain_height > 0.0) {
            return Err(ConfigurationError::EmptyDomain {
                width: self.domain_width,
                height: self.domain_height,
            });
        }
        self.matrix_randomization.validate()
    }

    // Get parameter ranges for UI sliders
    pub fn get_r_max_range() -> std::ops::RangeInclusive<f64> {
        1.0..=400.0
    }

    pub fn get_friction_range() -> std::ops::RangeInclusive<f64> {
        0.0..=1.0
    }

    pub fn get_force_factor_range() -> std::ops::RangeInclusive<f64> {
        -10.0..=10.0
    }

    pub fn get_dt_range() -> std::ops::RangeInclusive<f64> {
        0.0001..=0.1
    }
}
