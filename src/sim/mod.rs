//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame, no delta time)
//! - Seeded RNG only
//! - Stable iteration order (left player, then right)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Contact, resolve_player_ball};
pub use state::{Ball, GameEvent, GameState, Intent, MatchPhase, Player, Side, Snapshot};
pub use tick::{TickInput, goals_conceded, tick};
