//! One-step reflex controller
//!
//! The snake keeps going straight until the cell ahead is unsafe or a random
//! draw asks for a turn. It then picks whichever of the two perpendicular
//! headings is safe, flipping a coin when both are. There is no lookahead, so
//! the snake happily walks into dead ends.

use rand::Rng;

use super::heading::Heading;
use super::state::SimulationState;

/// Chance of a voluntary turn per tick
pub const DEFAULT_TURN_PROBABILITY: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReflexPolicy {
    turn_probability: f64,
}

impl ReflexPolicy {
    /// `turn_probability` is clamped into `[0, 1]`; NaN falls back to the default
    pub fn new(turn_probability: f64) -> Self {
        let turn_probability = if turn_probability.is_nan() {
            DEFAULT_TURN_PROBABILITY
        } else {
            turn_probability.clamp(0.0, 1.0)
        };
        Self { turn_probability }
    }

    pub fn turn_probability(&self) -> f64 {
        self.turn_probability
    }

    /// Decide the heading for the next step
    pub fn choose_next_heading<R: Rng + ?Sized>(
        &self,
        state: &SimulationState,
        rng: &mut R,
    ) -> Heading {
        let head = state.snake.head();
        let heading = state.heading;

        // The turn draw is only taken when straight ahead is safe.
        let straight_safe = state.grid.is_safe(head.moved_in_heading(heading));
        if straight_safe && !rng.gen_bool(self.turn_probability) {
            return heading;
        }

        let left = heading.turn_left();
        let right = heading.turn_right();
        let left_safe = state.grid.is_safe(head.moved_in_heading(left));
        let right_safe = state.grid.is_safe(head.moved_in_heading(right));

        match (left_safe, right_safe) {
            (false, false) => heading,
            (true, false) => left,
            (false, true) => right,
            (true, true) => {
                if rng.gen_bool(0.5) {
                    left
                } else {
                    right
                }
            }
        }
    }
}

impl Default for ReflexPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TURN_PROBABILITY)
    }
}
