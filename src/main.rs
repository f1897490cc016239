//! Futbol entry point
//!
//! Headless exhibition: runs a scripted match at the fixed tick and prints
//! the final snapshot. Rendering and key mapping belong to the host game.
//!
//! Usage: `futbol [TUNING] [--seed <SEED>]`

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use futbol::Tuning;
use futbol::consts::TICK_HZ;
use futbol::sim::{GameEvent, GameState, Intent, TickInput, tick};

#[derive(Parser)]
#[command(name = "futbol")]
#[command(about = "Run a headless scripted futbol match", long_about = None)]
struct Args {
    /// JSON tuning file (missing keys use defaults)
    tuning: Option<PathBuf>,

    /// Seed for the contact perturbation RNG
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

/// Give up after ten minutes of simulated play
const MAX_TICKS: u64 = 10 * 60 * TICK_HZ as u64;

/// Left player charges toward the right goal with kick held, right player
/// steps out of the way.
fn exhibition_input() -> TickInput {
    TickInput {
        left: Intent {
            right: true,
            kick: true,
            ..Default::default()
        },
        right: Intent {
            up: true,
            ..Default::default()
        },
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    env_logger::init();
    log::info!("Futbol (headless) starting...");

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };
    let seed = args.seed;

    let mut state = GameState::new(tuning, seed)?;
    log::info!("Match initialized with seed: {}", seed);

    let input = exhibition_input();
    while !state.is_over() && state.time_ticks < MAX_TICKS {
        tick(&mut state, &input);
        for event in &state.events {
            if let GameEvent::Goal { scorer, .. } = event {
                log::info!(
                    "{:>6.2}s goal by {}",
                    state.time_ticks as f32 / TICK_HZ as f32,
                    scorer.as_str()
                );
            }
        }
    }

    match state.winner() {
        Some(winner) => log::info!("{} wins after {} ticks", winner.as_str(), state.time_ticks),
        None => log::warn!("No winner after {} ticks", state.time_ticks),
    }

    println!("{}", serde_json::to_string_pretty(&state.snapshot())?);
    Ok(())
}
