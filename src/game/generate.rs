//! Random world generation
//!
//! Builds a fenced grid, scatters food, drops a one-cell snake and then tries
//! to add extra walls within a bounded number of attempts.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::config::SimulationConfig;
use super::grid::{Cell, Tile, WorldGrid};
use super::heading::Heading;
use super::state::{SimulationState, Snake};

/// Heading of a freshly generated snake: (d_col, d_row) = (0, 1)
pub const INITIAL_HEADING: Heading = Heading::Down;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("interior has {area} cells, not enough for {food} food and the snake")]
    NoRoom { area: usize, food: usize },
}

/// Generate a random starting state
pub fn random_state<R: Rng + ?Sized>(
    config: &SimulationConfig,
    rng: &mut R,
) -> Result<SimulationState, GenerateError> {
    config.validate().map_err(GenerateError::InvalidConfig)?;

    let area = config.interior_area();
    if config.food_count.saturating_add(1) > area {
        return Err(GenerateError::NoRoom {
            area,
            food: config.food_count,
        });
    }

    let mut grid = WorldGrid::fenced(config.rows, config.cols);

    // Food and snake are drawn from the remaining Empty cells, so they never
    // land on an occupied tile.
    let mut free = grid.empty_interior_cells();
    free.shuffle(rng);

    for cell in free.drain(..config.food_count) {
        grid.set(cell, Tile::Food);
    }

    let head = free.pop().ok_or(GenerateError::NoRoom {
        area,
        food: config.food_count,
    })?;
    grid.set(head, Tile::SnakeBody);

    let placed = scatter_walls(
        &mut grid,
        config.wall_count,
        config.wall_count.saturating_mul(config.wall_attempts_per_wall),
        rng,
    );
    if placed < config.wall_count {
        tracing::debug!(
            requested = config.wall_count,
            placed,
            "wall placement ran out of attempts"
        );
    }

    Ok(SimulationState::new(grid, Snake::new(head), INITIAL_HEADING))
}

/// Try up to `max_attempts` random interior cells, turning Empty ones into
/// walls until `wanted` have been placed. Returns the number placed.
fn scatter_walls<R: Rng + ?Sized>(
    grid: &mut WorldGrid,
    wanted: usize,
    max_attempts: usize,
    rng: &mut R,
) -> usize {
    let (rows, cols) = (grid.rows() as i32, grid.cols() as i32);
    let mut placed = 0;

    for _ in 0..max_attempts {
        if placed == wanted {
            break;
        }
        let cell = Cell::new(rng.gen_range(1..rows - 1), rng.gen_range(1..cols - 1));
        if grid.get(cell) == Some(Tile::Empty) {
            grid.set(cell, Tile::Wall);
            placed += 1;
        }
    }

    placed
}
