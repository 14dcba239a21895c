/*
 * Physics Module
 *
 * This module holds the particle life kernel: the piecewise force law, the
 * toroidal helpers (position wrap and shortest displacement), and the two
 * passes of a simulation step.
 *
 * A step is split so that every force is computed from the same snapshot of
 * positions before any particle moves:
 * - accumulate_forces reads positions through the spatial grid
 * - integrate applies friction, force and wrap to each particle
 */

use glam::DVec2;

use crate::matrix::InteractionMatrix;
use crate::particle::Particle;
use crate::spatial_grid::SpatialGrid;

/// Attraction law at normalized distance `d` (distance / r_max) for
/// coefficient `a`, with core repulsion breakpoint `b`.
///
/// Below `b` every pair repels linearly (`-1` at contact, `0` at `b`).
/// Between `b` and `1` the force is a tent peaking at `a` halfway through.
/// Beyond the cutoff there is no force.
#[inline]
pub fn force(d: f64, a: f64, b: f64) -> f64 {
    if d < b {
        d / b - 1.0
    } else if d < 1.0 {
        a * (1.0 - (2.0 * d - 1.0 - b).abs() / (1.0 - b))
    } else {
        0.0
    }
}

/// Wraps a coordinate into `[0, size)`, correct for negative input.
#[inline]
pub fn wrap(x: f64, size: f64) -> f64 {
    let wrapped = x.rem_euclid(size);
    // rem_euclid rounds tiny negatives up to exactly `size`
    if wrapped >= size {
        0.0
    } else {
        wrapped
    }
}

/// Picks the wrap-around offset with magnitude at most half the domain.
#[inline]
pub fn shortest_displacement(delta: f64, size: f64) -> f64 {
    let half = 0.5 * size;
    if delta > half {
        delta - size
    } else if delta < -half {
        delta + size
    } else {
        delta
    }
}

/// Shortest toroidal vector from `from` to `to`.
#[inline]
pub fn toroidal_delta(from: DVec2, to: DVec2, domain: DVec2) -> DVec2 {
    DVec2::new(
        shortest_displacement(to.x - from.x, domain.x),
        shortest_displacement(to.y - from.y, domain.y),
    )
}

/// Inputs of the force pass that stay fixed for the whole step.
#[derive(Debug, Clone, Copy)]
pub struct ForceParams {
    pub r_max: f64,
    pub core_repulsion: f64,
    pub domain: DVec2,
}

/// Raw (unscaled) force on every particle, written into `forces`.
///
/// Coincident pairs contribute nothing, as do pairs at or beyond `r_max`.
pub fn accumulate_forces(
    particles: &[Particle],
    grid: &SpatialGrid,
    matrix: &InteractionMatrix,
    params: ForceParams,
    forces: &mut Vec<DVec2>,
) {
    forces.clear();
    forces.reserve(particles.len());

    let mut neighbors = Vec::new();
    for (i, particle) in particles.iter().enumerate() {
        grid.collect_neighbors(i, particle.position, &mut neighbors);

        let row = matrix.row(particle.group as usize);
        let mut total = DVec2::ZERO;
        for &j in &neighbors {
            let other = &particles[j];
            let delta = toroidal_delta(particle.position, other.position, params.domain);
            let distance = delta.length();
            if distance > 0.0 && distance < params.r_max {
                let f = force(distance / params.r_max, row[other.group as usize], params.core_repulsion);
                total += delta / distance * f;
            }
        }
        forces.push(total);
    }
}

/// Inputs of the integration pass.
#[derive(Debug, Clone, Copy)]
pub struct IntegrationParams {
    /// r_max * force_factor
    pub force_scale: f64,
    pub friction: f64,
    pub dt: f64,
    pub domain: DVec2,
}

/// Semi-implicit Euler: friction decays velocity once, then the scaled
/// force is added, then the position advances and wraps.
pub fn integrate(particles: &mut [Particle], forces: &[DVec2], params: IntegrationParams) {
    for (particle, &raw) in particles.iter_mut().zip(forces) {
        let scaled = raw * params.force_scale;
        particle.velocity = particle.velocity * params.friction + scaled * params.dt;

        let moved = particle.position + particle.velocity * params.dt;
        particle.position = DVec2::new(wrap(moved.x, params.domain.x), wrap(moved.y, params.domain.y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    const B: f64 = 0.2;

    #[test]
    fn force_vanishes_at_breakpoint_and_cutoff() {
        for a in [-1.0, -0.3, 0.0, 0.5, 1.0] {
            assert!(force(B, a, B).abs() < 1e-12);
            assert_eq!(force(1.0, a, B), 0.0);
            assert_eq!(force(1.5, a, B), 0.0);
        }
    }

    #[test]
    fn core_repulsion_ignores_coefficient() {
        assert_eq!(force(0.0, 1.0, B), -1.0);
        assert_eq!(force(0.1, 0.7, B), force(0.1, -0.7, B));
        assert!((force(0.1, 1.0, B) + 0.5).abs() < 1e-12);
    }

    #[test]
    fn tent_peaks_at_coefficient() {
        let peak = (1.0 + B) / 2.0;
        assert!((force(peak, 0.8, B) - 0.8).abs() < 1e-12);
        assert!((force(peak, -0.6, B) + 0.6).abs() < 1e-12);
        assert!((force(0.5, 1.0, B) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn force_is_continuous_at_boundaries() {
        let eps = 1e-9;
        for a in [-1.0, 0.4, 1.0] {
            assert!((force(B - eps, a, B) - force(B + eps, a, B)).abs() < 1e-6);
            assert!((force(1.0 - eps, a, B) - force(1.0, a, B)).abs() < 1e-6);
        }
    }

    #[test]
    fn wrap_is_idempotent_and_in_range() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let size = rng.gen_range(1.0..2000.0);
            let x = rng.gen_range(-10_000.0..10_000.0);
            let once = wrap(x, size);
            assert!((0.0..size).contains(&once), "wrap({x}, {size}) = {once}");
            assert_eq!(wrap(once, size), once);
        }
    }

    #[test]
    fn wrap_handles_edges() {
        assert_eq!(wrap(200.0, 200.0), 0.0);
        assert_eq!(wrap(-10.0, 200.0), 190.0);
        assert_eq!(wrap(-1e-300, 200.0), 0.0);
        assert_eq!(wrap(199.5, 200.0), 199.5);
    }

    #[test]
    fn shortest_displacement_is_at_most_half_domain() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let size = rng.gen_range(1.0..2000.0);
            let a = rng.gen_range(0.0..size);
            let b = rng.gen_range(0.0..size);
            let d = shortest_displacement(b - a, size);
            assert!(d.abs() <= size / 2.0, "{d} exceeds half of {size}");
        }
        assert_eq!(shortest_displacement(180.0, 200.0), -20.0);
        assert_eq!(shortest_displacement(-180.0, 200.0), 20.0);
    }

    #[test]
    fn integrate_applies_friction_before_force() {
        let mut particles = vec![Particle::new(10.0, 10.0, 2, 0).with_velocity(2.0, 0.0)];
        let params = IntegrationParams {
            force_scale: 10.0,
            friction: 0.5,
            dt: 0.1,
            domain: DVec2::new(100.0, 100.0),
        };
        integrate(&mut particles, &[DVec2::new(1.0, 0.0)], params);

        // 2.0 * 0.5 + 1.0 * 10.0 * 0.1
        assert!((particles[0].velocity.x - 2.0).abs() < 1e-12);
        assert!((particles[0].position.x - 10.2).abs() < 1e-12);
    }

    #[test]
    fn integrate_wraps_positions() {
        let mut particles = vec![Particle::new(99.9, 0.05, 2, 0).with_velocity(10.0, -10.0)];
        let params = IntegrationParams {
            force_scale: 1.0,
            friction: 1.0,
            dt: 0.1,
            domain: DVec2::new(100.0, 50.0),
        };
        integrate(&mut particles, &[DVec2::ZERO], params);

        let p = particles[0].position;
        assert!((p.x - 0.9).abs() < 1e-9);
        assert!((p.y - 49.05).abs() < 1e-9);
    }
}
