//! Player–ball contact
//!
//! A contact REPLACES the ball's velocity: the ball leaves along the line
//! between the two centers at the kick or nudge speed, plus part of the
//! player's own velocity. Nothing is accumulated from the previous frame.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::state::{Ball, Player};
use crate::tuning::Tuning;
use crate::{distance, normalize_or};

/// Outcome of resolving one player against the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Shapes did not overlap; nothing changed
    None,
    /// Overlap with kick held
    Kick,
    /// Incidental overlap
    Nudge,
}

impl Contact {
    pub fn hit(&self) -> bool {
        !matches!(self, Contact::None)
    }
}

/// Random unit vector for the concentric case
fn perturbation<R: Rng>(rng: &mut R) -> Vec2 {
    Vec2::from_angle(rng.random_range(0.0..TAU))
}

/// Resolve one player against the ball.
///
/// Touching counts as overlap (`distance <= radius sum`). On contact the ball
/// is pushed out along the rebound direction so the shapes end up strictly
/// apart. The player is never modified.
pub fn resolve_player_ball<R: Rng>(
    player: &Player,
    ball: &mut Ball,
    kick: bool,
    tuning: &Tuning,
    rng: &mut R,
) -> Contact {
    let reach = player.radius + ball.radius;
    let dist = distance(player.pos, ball.pos);
    if dist > reach {
        return Contact::None;
    }

    let separation = ball.pos - player.pos;
    let dir = if separation == Vec2::ZERO {
        perturbation(rng)
    } else {
        // Centers can be distinct yet too close to normalize
        normalize_or(separation, Vec2::X)
    };

    let (impulse, contact) = if kick {
        (tuning.kick_power, Contact::Kick)
    } else {
        (tuning.nudge_power, Contact::Nudge)
    };

    ball.vel = dir * impulse + player.vel * tuning.carry_factor;
    ball.pos += dir * (reach - dist + tuning.depenetration_epsilon);

    contact
}
