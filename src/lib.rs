//! Hex Pop - A hexagonal-grid bubble shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, projectile physics, match resolution)
//! - `renderer`: Scene building and the WebGPU rendering pipeline
//! - `tuning`: Data-driven game balance
//! - `audio`: Procedural sound effects driven by game events

pub mod audio;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{PaletteRule, Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Points per bubble in a popped same-color cluster
    pub const POP_POINTS: u64 = 100;
    /// Points per bubble dropped by floating-cluster cleanup
    pub const DROP_POINTS: u64 = 150;
    /// Smallest same-color cluster that pops
    pub const MIN_CLUSTER: usize = 3;

    /// Slack subtracted from the bubble diameter for projectile contact
    pub const CONTACT_EPSILON: f32 = 2.0;
}

/// Unit direction for an aim angle in screen space (y grows downward).
///
/// `angle` is measured counter-clockwise from the +x axis, so 90° points
/// straight up the screen.
#[inline]
pub fn aim_direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), -angle.sin())
}

/// Aim angle from `origin` toward `target` in screen space.
///
/// Returns a value in (-π, π]; targets below the origin give negative angles.
#[inline]
pub fn angle_toward(origin: Vec2, target: Vec2) -> f32 {
    let d = target - origin;
    (-d.y).atan2(d.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_aim_direction_straight_up() {
        let dir = aim_direction(FRAC_PI_2);
        assert!(dir.x.abs() < 1e-6);
        assert!((dir.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_toward_matches_direction() {
        let origin = Vec2::new(100.0, 400.0);
        let angle = 1.1;
        let target = origin + aim_direction(angle) * 50.0;
        assert!((angle_toward(origin, target) - angle).abs() < 1e-5);
    }
}
