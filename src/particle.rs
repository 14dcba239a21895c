/*
 * Particle Module
 *
 * This module defines the Particle struct: a point mass on the toroidal
 * plane. Its group selects both a color and a row/column of the
 * interaction matrix. Color is never stored, it is derived from the group.
 */

use glam::DVec2;

/// RGB color of a particle group.
pub type GroupColor = [u8; 3];

// red, orange, yellow, green, blue, purple
pub const GROUP_COLORS: [GroupColor; 6] = [
    [255, 0, 0],
    [255, 140, 0],
    [255, 255, 0],
    [0, 255, 0],
    [0, 0, 255],
    [156, 81, 182],
];

pub const UNKNOWN_GROUP_COLOR: GroupColor = [255, 255, 255];

/// Color for a group index; groups past the palette render white.
#[inline]
pub fn group_color(group: u32) -> GroupColor {
    GROUP_COLORS
        .get(group as usize)
        .copied()
        .unwrap_or(UNKNOWN_GROUP_COLOR)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: DVec2,
    pub velocity: DVec2,
    pub(crate) group: u32,
    pub radius: u32,
    pub glow: bool,
}

impl Particle {
    pub fn new(x: f64, y: f64, radius: u32, group: u32) -> Self {
        Self {
            position: DVec2::new(x, y),
            velocity: DVec2::ZERO,
            group,
            radius,
            glow: false,
        }
    }

    pub fn with_velocity(mut self, vx: f64, vy: f64) -> Self {
        self.velocity = DVec2::new(vx, vy);
        self
    }

    #[inline]
    pub fn group(&self) -> u32 {
        self.group
    }

    #[inline]
    pub fn color(&self) -> GroupColor {
        group_color(self.group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_follows_group() {
        let mut particle = Particle::new(10.0, 10.0, 2, 1);
        assert_eq!(particle.color(), [255, 140, 0]);

        particle.group = 5;
        assert_eq!(particle.color(), [156, 81, 182]);
    }

    #[test]
    fn groups_past_palette_are_white() {
        assert_eq!(group_color(6), UNKNOWN_GROUP_COLOR);
        assert_eq!(group_color(u32::MAX), UNKNOWN_GROUP_COLOR);
    }

    #[test]
    fn new_particle_is_at_rest_without_glow() {
        let particle = Particle::new(3.0, 4.0, 2, 0);
        assert_eq!(particle.velocity, DVec2::ZERO);
        assert!(!particle.glow);
    }
}
