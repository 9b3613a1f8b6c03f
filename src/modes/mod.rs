//! Ways of running a simulation: plain stdout frames or the ratatui view

pub mod plain;
pub mod select;
pub mod watch;

pub use plain::PlainMode;
pub use select::{prompt_game_source, SourceKind};
pub use watch::WatchMode;

use std::path::PathBuf;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::game::{load_level, random_state, Simulation, SimulationConfig};

/// Where the starting state comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameSource {
    Random,
    Level(PathBuf),
}

impl GameSource {
    pub fn from_kind(kind: SourceKind, level_path: PathBuf) -> Self {
        match kind {
            SourceKind::Random => GameSource::Random,
            SourceKind::Level => GameSource::Level(level_path),
        }
    }
}

/// Build a ready-to-run simulation. The same seed always yields the same
/// world and the same sequence of moves.
pub fn new_game(source: &GameSource, config: &SimulationConfig, seed: u64) -> Result<Simulation> {
    let mut rng = SmallRng::seed_from_u64(seed);

    let state = match source {
        GameSource::Random => {
            random_state(config, &mut rng).context("Failed to generate random world")?
        }
        GameSource::Level(path) => {
            load_level(path).with_context(|| format!("Failed to load level {:?}", path))?
        }
    };

    tracing::info!(
        seed,
        rows = state.grid.rows(),
        cols = state.grid.cols(),
        snake_len = state.snake.len(),
        "new game"
    );

    Ok(Simulation::new(state, config, rng))
}
