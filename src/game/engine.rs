use rand::rngs::SmallRng;
use rand::Rng;

use super::{
    config::SimulationConfig,
    grid::Tile,
    policy::ReflexPolicy,
    state::SimulationState,
};

/// Result of applying one step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The snake moved; `ate_food` tells whether it grew
    Continue { ate_food: bool },
    /// The cell ahead was unsafe; nothing changed
    Collided,
    /// Food was eaten but no Empty cell remained for a replacement
    BoardFull,
}

/// Whole-run status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Running,
    Won,
    Lost,
}

impl SimulationStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, SimulationStatus::Running)
    }
}

/// Advance the snake one cell along its current heading.
///
/// On `Collided` the state is left untouched.
pub fn step<R: Rng + ?Sized>(state: &mut SimulationState, rng: &mut R) -> StepOutcome {
    let new_head = state.next_head();
    if !state.grid.is_safe(new_head) {
        return StepOutcome::Collided;
    }

    let ate_food = state.grid.get(new_head) == Some(Tile::Food);
    if !ate_food {
        let tail = state.snake.tail();
        state.grid.set(tail, Tile::Empty);
    }

    state.grid.set(new_head, Tile::SnakeBody);
    state.snake.push_head(new_head);
    if !ate_food {
        state.snake.pop_tail();
    }
    state.ticks += 1;

    debug_assert!(state.body_matches_grid(), "snake and grid out of sync");

    if !ate_food {
        return StepOutcome::Continue { ate_food: false };
    }

    state.eaten += 1;
    match state.grid.place_food(rng) {
        Some(cell) => {
            tracing::debug!(eaten = state.eaten, row = cell.row, col = cell.col, "food eaten");
            StepOutcome::Continue { ate_food: true }
        }
        None => StepOutcome::BoardFull,
    }
}

/// Owns a running game: state, controller and random source
pub struct Simulation {
    state: SimulationState,
    policy: ReflexPolicy,
    rng: SmallRng,
    win_threshold: u32,
    status: SimulationStatus,
}

impl Simulation {
    /// Create a simulation using the policy and threshold from `config`
    pub fn new(state: SimulationState, config: &SimulationConfig, rng: SmallRng) -> Self {
        Self::with_rng(
            state,
            ReflexPolicy::new(config.turn_probability),
            config.win_threshold,
            rng,
        )
    }

    pub fn with_rng(
        state: SimulationState,
        policy: ReflexPolicy,
        win_threshold: u32,
        rng: SmallRng,
    ) -> Self {
        let status = if state.eaten >= win_threshold {
            SimulationStatus::Won
        } else {
            SimulationStatus::Running
        };

        Self {
            state,
            policy,
            rng,
            win_threshold,
            status,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn win_threshold(&self) -> u32 {
        self.win_threshold
    }

    /// Run one policy decision and one step. A finished simulation is not
    /// touched.
    pub fn tick(&mut self) -> SimulationStatus {
        if self.status.is_finished() {
            return self.status;
        }

        self.state.heading = self.policy.choose_next_heading(&self.state, &mut self.rng);

        self.status = match step(&mut self.state, &mut self.rng) {
            StepOutcome::Collided => SimulationStatus::Lost,
            StepOutcome::BoardFull => SimulationStatus::Won,
            StepOutcome::Continue { .. } if self.state.eaten >= self.win_threshold => {
                SimulationStatus::Won
            }
            StepOutcome::Continue { .. } => SimulationStatus::Running,
        };

        match self.status {
            SimulationStatus::Won => tracing::info!(
                ticks = self.state.ticks,
                eaten = self.state.eaten,
                "enough food eaten, simulation won"
            ),
            SimulationStatus::Lost => tracing::info!(
                ticks = self.state.ticks,
                eaten = self.state.eaten,
                "snake crashed, simulation lost"
            ),
            SimulationStatus::Running => {}
        }

        self.status
    }

    /// Tick until the run ends or `max_ticks` have been taken
    pub fn run_until_finished(&mut self, max_ticks: u64) -> SimulationStatus {
        for _ in 0..max_ticks {
            if self.tick().is_finished() {
                break;
            }
        }
        self.status
    }
}
