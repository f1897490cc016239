//! Futbol - a two-player arcade football simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, ball dynamics, collisions, match state)
//! - `tuning`: Data-driven match configuration with eager validation

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed simulation rate the host loop is expected to call `tick` at
    pub const TICK_HZ: u32 = 60;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 900.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_SPEED: f32 = 4.0;
    /// Per-tick velocity multiplier when no direction is held
    pub const PLAYER_DAMPING: f32 = 0.85;
    /// Extra gap kept between a player and the field edge
    pub const PLAYER_MARGIN: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_FRICTION: f32 = 0.99;
    /// Fraction of vertical speed kept after a wall bounce
    pub const BALL_RESTITUTION: f32 = 0.6;
    /// How far past the end lines the ball center may travel
    pub const BALL_OVERSHOOT: f32 = 60.0;

    /// Contact impulses
    pub const KICK_POWER: f32 = 9.0;
    pub const NUDGE_POWER: f32 = 3.5;
    /// Share of the player's velocity carried into the ball on contact
    pub const CARRY_FACTOR: f32 = 0.6;
    pub const DEPENETRATION_EPSILON: f32 = 0.1;

    /// Goals
    pub const GOAL_WIDTH: f32 = 200.0;
    pub const GOAL_LINE_INSET: f32 = 10.0;
    pub const WIN_SCORE: u32 = 5;

    /// Team colors (RGB)
    pub const LEFT_COLOR: [u8; 3] = [40, 130, 230];
    pub const RIGHT_COLOR: [u8; 3] = [220, 60, 60];
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Clamp a point to the rectangle `[inset, size - inset]` on both axes
#[inline]
pub fn clamp_inset(pos: Vec2, size: Vec2, inset: f32) -> Vec2 {
    pos.clamp(Vec2::splat(inset), size - Vec2::splat(inset))
}

/// Unit vector along `v`, or `fallback` when `v` has no usable direction
#[inline]
pub fn normalize_or(v: Vec2, fallback: Vec2) -> Vec2 {
    v.try_normalize().unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert!((distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_clamp_inset() {
        let size = Vec2::new(100.0, 50.0);
        assert_eq!(clamp_inset(Vec2::new(-5.0, 60.0), size, 10.0), Vec2::new(10.0, 40.0));
        assert_eq!(clamp_inset(Vec2::new(30.0, 20.0), size, 10.0), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn test_normalize_or() {
        let n = normalize_or(Vec2::new(0.0, -2.0), Vec2::X);
        assert!((n - Vec2::new(0.0, -1.0)).length() < 1e-6);
        assert_eq!(normalize_or(Vec2::ZERO, Vec2::X), Vec2::X);
    }
}
