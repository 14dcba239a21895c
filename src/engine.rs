/*
 * Simulation Engine Module
 *
 * This module defines the SimulationEngine, the owner of all simulation state:
 * the particle store, the interaction matrix, the parameters and the spatial
 * grid rebuilt every step. The driver calls `step` once per update tick and
 * reads `particles` once per render tick; every other write goes through the
 * setters below.
 */

use glam::DVec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::{ConfigurationError, Result};
use crate::matrix::{InteractionMatrix, Preset};
use crate::params::{SimulationParams, SPAWN_MARGIN};
use crate::particle::Particle;
use crate::physics::{self, ForceParams, IntegrationParams};
use crate::spatial_grid::{GridLayout, SpatialGrid};

pub struct SimulationEngine {
    particles: Vec<Particle>,
    matrix: InteractionMatrix,
    params: SimulationParams,
    layout: GridLayout,
    grid: SpatialGrid,
    // Scratch buffer for the force pass
    forces: Vec<DVec2>,
    rng: SmallRng,
    seed: u64,
    step_count: u64,
}

impl SimulationEngine {
    /// Validates `params`, then spawns `num_groups * particles_per_group`
    /// particles at random over the domain.
    pub fn new(params: SimulationParams) -> Result<Self> {
        let mut engine = Self::empty(params)?;
        let (groups, per_group) = (engine.params.num_groups, engine.params.particles_per_group);
        let (width, height) = (engine.params.domain_width, engine.params.domain_height);
        engine.create_particles(groups, per_group, width, height)?;
        Ok(engine)
    }

    /// Builds an engine around an explicit particle layout. Positions are
    /// wrapped into the domain and every group must index the matrix.
    pub fn with_particles(params: SimulationParams, particles: Vec<Particle>) -> Result<Self> {
        let mut engine = Self::empty(params)?;
        let groups = engine.params.num_groups;
        if let Some((index, particle)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| p.group as usize >= groups)
        {
            return Err(ConfigurationError::GroupOutOfRange {
                index,
                group: particle.group,
                groups,
            });
        }

        engine.particles = particles;
        engine.wrap_positions();
        log::info!(
            "simulation engine ready: {} explicit particles in {} groups",
            engine.particles.len(),
            groups
        );
        Ok(engine)
    }

    fn empty(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        let layout = GridLayout::new(params.r_max, params.domain_width, params.domain_height)?;
        let seed = params.seed.unwrap_or_else(rand::random);
        let matrix = params.initial_preset.matrix(params.num_groups);

        log::info!("seeding simulation RNG with {seed:#018x}");

        Ok(Self {
            particles: Vec::new(),
            matrix,
            params,
            layout,
            grid: SpatialGrid::new(layout),
            forces: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            seed,
            step_count: 0,
        })
    }

    /// Replaces the population with `number_of_groups * particles_per_group`
    /// particles spread uniformly over `[5, dim - 5]`, at rest, glow off.
    /// Particles are created group by group. When the group count changes
    /// the matrix is reset to the initial preset at the new size.
    pub fn create_particles(
        &mut self,
        number_of_groups: usize,
        particles_per_group: usize,
        domain_width: f64,
        domain_height: f64,
    ) -> Result<()> {
        if number_of_groups == 0 {
            return Err(ConfigurationError::NoGroups);
        }
        if domain_width <= 2.0 * SPAWN_MARGIN || domain_height <= 2.0 * SPAWN_MARGIN {
            return Err(ConfigurationError::DomainTooSmall {
                width: domain_width,
                height: domain_height,
                margin: SPAWN_MARGIN,
            });
        }
        let layout = GridLayout::new(self.params.r_max, domain_width, domain_height)?;

        let radius = self.params.particle_radius;
        let mut particles = Vec::with_capacity(number_of_groups * particles_per_group);
        for group in 0..number_of_groups {
            for _ in 0..particles_per_group {
                let x = self.rng.gen_range(SPAWN_MARGIN..=domain_width - SPAWN_MARGIN);
                let y = self.rng.gen_range(SPAWN_MARGIN..=domain_height - SPAWN_MARGIN);
                particles.push(Particle::new(x, y, radius, group as u32));
            }
        }

        if number_of_groups != self.matrix.size() {
            self.matrix = self.params.initial_preset.matrix(number_of_groups);
        }
        self.particles = particles;
        self.layout = layout;
        self.params.num_groups = number_of_groups;
        self.params.particles_per_group = particles_per_group;
        self.params.domain_width = domain_width;
        self.params.domain_height = domain_height;

        log::info!(
            "created {} particles ({} groups x {}) on a {}x{} domain",
            self.particles.len(),
            number_of_groups,
            particles_per_group,
            domain_width,
            domain_height
        );
        Ok(())
    }

    /// Advances the simulation by one tick. Forces are computed for every
    /// particle from the positions at the start of the step, then all
    /// particles are integrated.
    pub fn step(&mut self) {
        let domain = self.domain();
        self.grid
            .rebuild(self.layout, self.particles.iter().map(|p| p.position));

        physics::accumulate_forces(
            &self.particles,
            &self.grid,
            &self.matrix,
            ForceParams {
                r_max: self.params.r_max,
                core_repulsion: self.params.core_repulsion,
                domain,
            },
            &mut self.forces,
        );

        physics::integrate(
            &mut self.particles,
            &self.forces,
            IntegrationParams {
                force_scale: self.params.r_max * self.params.force_factor,
                friction: self.params.friction,
                dt: self.params.dt,
                domain,
            },
        );

        self.step_count += 1;
    }

    // Read accessors

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn matrix(&self) -> &InteractionMatrix {
        &self.matrix
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Grid as of the last step (empty before the first one).
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn r_max(&self) -> f64 {
        self.params.r_max
    }

    pub fn friction(&self) -> f64 {
        self.params.friction
    }

    pub fn force_factor(&self) -> f64 {
        self.params.force_factor
    }

    pub fn dt(&self) -> f64 {
        self.params.dt
    }

    pub fn group_count(&self) -> usize {
        self.matrix.size()
    }

    pub fn particles_per_group(&self) -> usize {
        self.params.particles_per_group
    }

    pub fn domain(&self) -> DVec2 {
        self.layout.domain()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    // Tunable setters

    pub fn set_friction(&mut self, friction: f64) {
        self.params.friction = friction;
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.params.dt = dt;
    }

    pub fn set_force_factor(&mut self, force_factor: f64) {
        self.params.force_factor = force_factor;
    }

    /// Also the grid cell size, so it must stay positive.
    pub fn set_r_max(&mut self, r_max: f64) -> Result<()> {
        if !(r_max > 0.0) {
            return Err(ConfigurationError::NonPositiveRMax(r_max));
        }
        let domain = self.domain();
        self.layout = GridLayout::new(r_max, domain.x, domain.y)?;
        self.params.r_max = r_max;
        Ok(())
    }

    /// Resizes the toroidal domain and wraps every particle into it.
    pub fn set_domain(&mut self, width: f64, height: f64) -> Result<()> {
        self.layout = GridLayout::new(self.params.r_max, width, height)?;
        self.params.domain_width = width;
        self.params.domain_height = height;
        self.wrap_positions();
        Ok(())
    }

    // Bulk mutations

    /// Replaces the whole matrix; it must match the current group count.
    pub fn set_matrix(&mut self, matrix: InteractionMatrix) -> Result<()> {
        matrix.ensure_size(self.group_count())?;
        log::debug!("interaction matrix replaced");
        self.matrix = matrix;
        Ok(())
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        log::debug!("applying preset {:?}", preset);
        self.matrix = preset.matrix(self.group_count());
    }

    /// Redraws every coefficient from the configured discrete value set.
    pub fn randomize_matrix(&mut self) -> Result<()> {
        let matrix = InteractionMatrix::random(
            self.group_count(),
            &self.params.matrix_randomization,
            &mut self.rng,
        )?;
        log::debug!("interaction matrix randomized: {:?}", matrix.to_rows());
        self.matrix = matrix;
        Ok(())
    }

    /// Shifts every particle, wrapping back into the domain.
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        let offset = DVec2::new(dx, dy);
        for particle in &mut self.particles {
            particle.position += offset;
        }
        self.wrap_positions();
    }

    pub fn toggle_glow_all(&mut self) {
        for particle in &mut self.particles {
            particle.glow = !particle.glow;
        }
    }

    /// Reassigns every particle's group. Nothing changes unless every new
    /// group is valid.
    pub fn regroup<F>(&mut self, mut assign: F) -> Result<()>
    where
        F: FnMut(usize, &Particle) -> u32,
    {
        let groups = self.group_count();
        let mut assigned = Vec::with_capacity(self.particles.len());
        for (index, particle) in self.particles.iter().enumerate() {
            let group = assign(index, particle);
            if group as usize >= groups {
                return Err(ConfigurationError::GroupOutOfRange { index, group, groups });
            }
            assigned.push(group);
        }

        for (particle, group) in self.particles.iter_mut().zip(assigned) {
            particle.group = group;
        }
        Ok(())
    }

    fn wrap_positions(&mut self) {
        let domain = self.domain();
        for particle in &mut self.particles {
            particle.position = DVec2::new(
                physics::wrap(particle.position.x, domain.x),
                physics::wrap(particle.position.y, domain.y),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_params() -> SimulationParams {
        SimulationParams {
            num_groups: 3,
            particles_per_group: 20,
            domain_width: 400.0,
            domain_height: 300.0,
            r_max: 60.0,
            seed: Some(42),
            ..Default::default()
        }
    }

    #[test]
    fn creates_groups_in_order_within_margin() {
        let engine = SimulationEngine::new(small_params()).unwrap();
        assert_eq!(engine.particles().len(), 60);
        assert_eq!(engine.particles()[0].group(), 0);
        assert_eq!(engine.particles()[59].group(), 2);

        for particle in engine.particles() {
            assert!((5.0..=395.0).contains(&particle.position.x));
            assert!((5.0..=295.0).contains(&particle.position.y));
            assert_eq!(particle.velocity, DVec2::ZERO);
            assert!(!particle.glow);
        }
    }

    #[test]
    fn create_particles_resizes_matrix() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        engine.create_particles(5, 4, 200.0, 200.0).unwrap();

        assert_eq!(engine.group_count(), 5);
        assert_eq!(engine.particles_per_group(), 4);
        assert_eq!(engine.particles().len(), 20);
        assert_eq!(engine.domain(), DVec2::new(200.0, 200.0));
    }

    #[test]
    fn create_particles_rejects_tiny_domain() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        let result = engine.create_particles(2, 2, 10.0, 100.0);
        assert!(matches!(result, Err(ConfigurationError::DomainTooSmall { .. })));
        assert_eq!(engine.particles().len(), 60);
    }

    #[test]
    fn set_matrix_checks_dimensions() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        let result = engine.set_matrix(InteractionMatrix::identity(6));
        assert_eq!(
            result,
            Err(ConfigurationError::MatrixDimension { expected: 3, rows: 6, columns: 6 })
        );
        assert_eq!(engine.matrix(), &InteractionMatrix::identity(3));

        engine.set_matrix(Preset::Chaotic.matrix(3)).unwrap();
        assert_eq!(engine.matrix().get(0, 0), -1.0);
    }

    #[test]
    fn set_r_max_rejects_non_positive() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        assert_eq!(engine.set_r_max(0.0), Err(ConfigurationError::NonPositiveRMax(0.0)));
        assert_eq!(engine.r_max(), 60.0);

        engine.set_r_max(80.0).unwrap();
        assert_eq!(engine.r_max(), 80.0);
    }

    #[test]
    fn translate_all_keeps_positions_in_domain() {
        let particles = vec![Particle::new(395.0, 5.0, 2, 0), Particle::new(100.0, 100.0, 2, 1)];
        let mut engine = SimulationEngine::with_particles(small_params(), particles).unwrap();
        engine.translate_all(10.0, -10.0);

        assert_eq!(engine.particles()[0].position, DVec2::new(5.0, 295.0));
        assert_eq!(engine.particles()[1].position, DVec2::new(110.0, 90.0));
    }

    #[test]
    fn toggle_glow_flips_every_particle() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        engine.toggle_glow_all();
        assert!(engine.particles().iter().all(|p| p.glow));
        engine.toggle_glow_all();
        assert!(engine.particles().iter().all(|p| !p.glow));
    }

    #[test]
    fn regroup_is_all_or_nothing() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        let result = engine.regroup(|index, _| if index == 10 { 7 } else { 0 });
        assert_eq!(
            result,
            Err(ConfigurationError::GroupOutOfRange { index: 10, group: 7, groups: 3 })
        );
        assert_eq!(engine.particles()[59].group(), 2);

        engine.regroup(|index, _| (index % 3) as u32).unwrap();
        assert_eq!(engine.particles()[4].group(), 1);
        assert_eq!(engine.particles()[4].color(), [255, 140, 0]);
    }

    #[test]
    fn with_particles_rejects_unknown_groups() {
        let particles = vec![Particle::new(1.0, 1.0, 2, 3)];
        assert!(matches!(
            SimulationEngine::with_particles(small_params(), particles),
            Err(ConfigurationError::GroupOutOfRange { index: 0, group: 3, groups: 3 })
        ));
    }

    #[test]
    fn randomize_matrix_keeps_particles() {
        let mut engine = SimulationEngine::new(small_params()).unwrap();
        let before = engine.particles().to_vec();
        engine.randomize_matrix().unwrap();

        assert_eq!(engine.matrix().size(), 3);
        assert_eq!(engine.particles(), &before[..]);
    }

    #[test]
    fn set_domain_wraps_particles() {
        let particles = vec![Particle::new(350.0, 250.0, 2, 0)];
        let mut engine = SimulationEngine::with_particles(small_params(), particles).unwrap();
        engine.set_domain(300.0, 200.0).unwrap();

        assert_eq!(engine.particles()[0].position, DVec2::new(50.0, 50.0));
        assert!(engine.set_domain(0.0, 200.0).is_err());
    }
}
