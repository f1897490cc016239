//! Match tuning
//!
//! Every physical constant of a match lives here. A `Tuning` is validated
//! once when a match is created; the simulation never re-checks it.

use std::fs;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Side;

/// Rejected configuration
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("invalid tuning `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Match configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Players ===
    pub player_radius: f32,
    /// Speed set directly while a direction is held (units per tick)
    pub player_speed: f32,
    /// Velocity multiplier applied each idle tick
    pub player_damping: f32,
    /// Gap kept between the player's edge and the field edge
    pub player_margin: f32,

    // === Ball ===
    pub ball_radius: f32,
    /// Velocity multiplier applied every tick
    pub friction: f32,
    /// Speed fraction kept after bouncing off a wall
    pub restitution: f32,
    /// How far beyond the end lines the ball center may go
    pub ball_overshoot: f32,

    // === Contact ===
    pub kick_power: f32,
    pub nudge_power: f32,
    pub carry_factor: f32,
    pub depenetration_epsilon: f32,

    // === Goals ===
    /// Vertical span of each goal mouth, centered on the field
    pub goal_width: f32,
    /// Distance of each goal line from its end of the field
    pub goal_line_inset: f32,
    pub win_score: u32,

    // === Identity ===
    pub left_color: [u8; 3],
    pub right_color: [u8; 3],
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            player_radius: PLAYER_RADIUS,
            player_speed: PLAYER_SPEED,
            player_damping: PLAYER_DAMPING,
            player_margin: PLAYER_MARGIN,

            ball_radius: BALL_RADIUS,
            friction: BALL_FRICTION,
            restitution: BALL_RESTITUTION,
            ball_overshoot: BALL_OVERSHOOT,

            kick_power: KICK_POWER,
            nudge_power: NUDGE_POWER,
            carry_factor: CARRY_FACTOR,
            depenetration_epsilon: DEPENETRATION_EPSILON,

            goal_width: GOAL_WIDTH,
            goal_line_inset: GOAL_LINE_INSET,
            win_score: WIN_SCORE,

            left_color: LEFT_COLOR,
            right_color: RIGHT_COLOR,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> TuningError {
    TuningError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    // NaN fails this too
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must be positive"))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, "must not be negative"))
    }
}

fn unit_fraction(field: &'static str, value: f32) -> Result<(), TuningError> {
    if (0.0..1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, "must be in [0, 1)"))
    }
}

impl Tuning {
    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_radius", self.player_radius)?;
        positive("ball_radius", self.ball_radius)?;
        positive("player_speed", self.player_speed)?;
        positive("kick_power", self.kick_power)?;
        positive("nudge_power", self.nudge_power)?;
        positive("goal_width", self.goal_width)?;
        non_negative("player_margin", self.player_margin)?;
        non_negative("ball_overshoot", self.ball_overshoot)?;
        non_negative("depenetration_epsilon", self.depenetration_epsilon)?;
        unit_fraction("player_damping", self.player_damping)?;
        unit_fraction("restitution", self.restitution)?;
        unit_fraction("carry_factor", self.carry_factor)?;

        if !(self.friction > 0.0 && self.friction < 1.0) {
            return Err(invalid("friction", "must be in (0, 1)"));
        }
        if self.kick_power <= self.nudge_power {
            return Err(invalid("kick_power", "must exceed nudge_power"));
        }
        // Backing away from the ball subtracts the carried velocity from the
        // impulse; past this bound a nudge can leave faster than a kick.
        if 2.0 * self.carry_factor * self.player_speed >= self.kick_power + self.nudge_power {
            return Err(invalid("carry_factor", "carried speed overwhelms the kick"));
        }
        if self.goal_width >= self.field_height {
            return Err(invalid("goal_width", "must be narrower than the field"));
        }
        if !(self.goal_line_inset >= 0.0 && self.goal_line_inset < self.field_width / 2.0) {
            return Err(invalid("goal_line_inset", "must be in [0, field_width / 2)"));
        }
        let player_span = 2.0 * self.player_inset();
        if player_span >= self.field_width || player_span >= self.field_height {
            return Err(invalid("player_radius", "player does not fit on the field"));
        }
        if 2.0 * self.ball_radius >= self.field_height {
            return Err(invalid("ball_radius", "ball does not fit between the side walls"));
        }
        if self.win_score == 0 {
            return Err(invalid("win_score", "must be at least 1"));
        }
        Ok(())
    }

    /// Parse and validate a JSON tuning document (missing keys use defaults)
    pub fn from_json_str(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a JSON tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let tuning = Self::from_json_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    #[inline]
    pub fn field_size(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.field_size() / 2.0
    }

    /// Distance a player center keeps from every field edge
    #[inline]
    pub fn player_inset(&self) -> f32 {
        self.player_radius + self.player_margin
    }

    /// Vertical extent of a goal mouth as `(top, bottom)`
    pub fn goal_mouth(&self) -> (f32, f32) {
        let mid = self.field_height / 2.0;
        let half = self.goal_width / 2.0;
        (mid - half, mid + half)
    }

    /// Whether a vertical coordinate lies within the goal mouth
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        (y - self.field_height / 2.0).abs() <= self.goal_width / 2.0
    }

    /// X coordinate of the goal line defended by `side`
    pub fn goal_line_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => self.goal_line_inset,
            Side::Right => self.field_width - self.goal_line_inset,
        }
    }

    /// Kick-off position of the player on `side`
    pub fn start_position(&self, side: Side) -> Vec2 {
        let x = match side {
            Side::Left => 0.2,
            Side::Right => 0.8,
        };
        Vec2::new(self.field_width * x, self.field_height / 2.0)
    }

    pub fn color(&self, side: Side) -> [u8; 3] {
        match side {
            Side::Left => self.left_color,
            Side::Right => self.right_color,
        }
    }
}
