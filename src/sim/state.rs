//! Game state and core simulation types
//!
//! Players, the ball and the match that owns them. Kinematics that only touch
//! a single body live on that body; interactions live in `collision` and `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::clamp_inset;
use crate::tuning::{Tuning, TuningError};

/// Which end of the field a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player A, defends the left goal
    Left,
    /// Player B, defends the right goal
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Active play
    Playing,
    /// Terminal: a side reached the win score
    Won { winner: Side },
}

/// Resolved per-player controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub kick: bool,
}

impl Intent {
    /// Raw direction from held keys (screen coordinates, y grows downward)
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Something that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A player struck the ball with kick held
    Kick { side: Side },
    /// A player touched the ball without kicking
    Nudge { side: Side },
    /// Ball bounced off the top or bottom wall
    WallBounce,
    /// Ball bounced off an end line outside the goal mouth
    EndLineBounce,
    /// Ball entered the goal defended by `conceded`
    Goal { scorer: Side, conceded: Side },
    /// The match became terminal
    MatchWon { winner: Side },
}

/// A controllable player disc
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: [u8; 3],
    pub score: u32,
}

impl Player {
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        Self {
            side,
            pos: tuning.start_position(side),
            vel: Vec2::ZERO,
            radius: tuning.player_radius,
            color: tuning.color(side),
            score: 0,
        }
    }

    /// Apply one tick of directional control, then integrate and clamp
    pub fn steer(&mut self, intent: &Intent, tuning: &Tuning) {
        // Opposing keys cancel out and count as idle
        match intent.direction().try_normalize() {
            Some(dir) => self.vel = dir * tuning.player_speed,
            None => self.vel *= tuning.player_damping,
        }

        self.pos += self.vel;
        self.pos = clamp_inset(self.pos, tuning.field_size(), tuning.player_inset());
    }

    /// Put the player back on its kick-off spot
    pub fn reset_position(&mut self, tuning: &Tuning) {
        self.pos = tuning.start_position(self.side);
        self.vel = Vec2::ZERO;
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.center(),
            vel: Vec2::ZERO,
            radius: tuning.ball_radius,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Integrate one tick with friction and wall handling.
    ///
    /// Returns true if the ball bounced off the top or bottom wall.
    pub fn advance(&mut self, tuning: &Tuning) -> bool {
        self.pos += self.vel;
        self.vel *= tuning.friction;

        let bounced = self.contain_vertical(tuning);

        // Horizontal travel past the end lines is the match's business
        let overshoot = tuning.ball_overshoot;
        self.pos.x = self
            .pos
            .x
            .clamp(-overshoot, tuning.field_width + overshoot);

        bounced
    }

    /// Keep the ball between the top and bottom walls.
    ///
    /// Position is always clamped; velocity is only reflected when the ball
    /// is still travelling into the wall it touches.
    pub fn contain_vertical(&mut self, tuning: &Tuning) -> bool {
        let top = self.radius;
        let bottom = tuning.field_height - self.radius;
        let mut bounced = false;

        if self.pos.y < top {
            self.pos.y = top;
            if self.vel.y < 0.0 {
                self.vel.y = -self.vel.y * tuning.restitution;
                bounced = true;
            }
        } else if self.pos.y > bottom {
            self.pos.y = bottom;
            if self.vel.y > 0.0 {
                self.vel.y = -self.vel.y * tuning.restitution;
                bounced = true;
            }
        }

        bounced
    }

    /// Center the ball and stop it
    pub fn reset_position(&mut self, tuning: &Tuning) {
        self.pos = tuning.center();
        self.vel = Vec2::ZERO;
    }
}

/// Read-only view of the whole match after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub tick: u64,
    pub players: [Player; 2],
    pub ball: Ball,
    pub phase: MatchPhase,
    pub winner: Option<Side>,
    pub events: Vec<GameEvent>,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated configuration
    pub tuning: Tuning,
    /// Source of randomness for degenerate contacts
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: MatchPhase,
    /// Players in resolution order: left (A) then right (B)
    pub players: [Player; 2],
    pub ball: Ball,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a match, rejecting invalid tuning up front
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::debug!("New match, perturbation seed {}", seed);

        let state = Self {
            players: [
                Player::new(Side::Left, &tuning),
                Player::new(Side::Right, &tuning),
            ],
            ball: Ball::new(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: MatchPhase::Playing,
            events: Vec::new(),
        };

        Ok(state)
    }

    pub fn player(&self, side: Side) -> &Player {
        match side {
            Side::Left => &self.players[0],
            Side::Right => &self.players[1],
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut Player {
        match side {
            Side::Left => &mut self.players[0],
            Side::Right => &mut self.players[1],
        }
    }

    pub fn score(&self, side: Side) -> u32 {
        self.player(side).score
    }

    pub fn winner(&self) -> Option<Side> {
        match self.phase {
            MatchPhase::Won { winner } => Some(winner),
            MatchPhase::Playing => None,
        }
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some()
    }

    /// Restore kick-off positions and stop everything
    pub fn reset_round(&mut self) {
        for player in &mut self.players {
            player.reset_position(&self.tuning);
        }
        self.ball.reset_position(&self.tuning);
    }

    /// Start over: zero scores, back to play, kick-off positions
    pub fn reset_match(&mut self) {
        for player in &mut self.players {
            player.score = 0;
        }
        self.phase = MatchPhase::Playing;
        self.events.clear();
        self.reset_round();
        log::info!("Match reset");
    }

    /// Advance one tick and return the resulting view
    pub fn step(&mut self, input: &super::TickInput) -> Snapshot {
        super::tick(self, input);
        self.snapshot()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tick: self.time_ticks,
            players: self.players.clone(),
            ball: self.ball.clone(),
            phase: self.phase,
            winner: self.winner(),
            events: self.events.clone(),
        }
    }
}
