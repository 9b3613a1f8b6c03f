use std::collections::{HashSet, VecDeque};

use super::grid::{Cell, Tile, WorldGrid};
use super::heading::Heading;

/// The snake's body, head at the front and tail at the back
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A single-segment snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from cells ordered head first. Returns `None` for an
    /// empty sequence.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        (!body.is_empty()).then_some(Self { body })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Segments from head to tail
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.body.push_front(cell);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        // The head is never removed.
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }
}

/// Everything the simulation mutates from tick to tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationState {
    pub grid: WorldGrid,
    pub snake: Snake,
    pub heading: Heading,
    /// Food items eaten so far
    pub eaten: u32,
    /// Completed ticks
    pub ticks: u64,
}

impl SimulationState {
    pub fn new(grid: WorldGrid, snake: Snake, heading: Heading) -> Self {
        Self {
            grid,
            snake,
            heading,
            eaten: 0,
            ticks: 0,
        }
    }

    /// Check that the SnakeBody tiles are exactly the snake's segments
    pub fn body_matches_grid(&self) -> bool {
        let segments: HashSet<Cell> = self.snake.cells().collect();
        if segments.len() != self.snake.len() {
            return false;
        }
        let tiles: HashSet<Cell> = self.grid.cells_with(Tile::SnakeBody).collect();
        segments == tiles
    }

    /// The cell the head would enter on the next step
    pub fn next_head(&self) -> Cell {
        self.snake.head().moved_in_heading(self.heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_snake(cells: &[Cell]) -> SimulationState {
        let mut grid = WorldGrid::fenced(6, 6);
        for cell in cells {
            grid.set(*cell, Tile::SnakeBody);
        }
        let snake = Snake::from_cells(cells.iter().copied()).unwrap();
        SimulationState::new(grid, snake, Heading::Right)
    }

    #[test]
    fn test_snake_head_and_tail() {
        let snake =
            Snake::from_cells([Cell::new(1, 3), Cell::new(1, 2), Cell::new(1, 1)]).unwrap();
        assert_eq!(snake.head(), Cell::new(1, 3));
        assert_eq!(snake.tail(), Cell::new(1, 1));
        assert_eq!(snake.len(), 3);
        assert!(snake.contains(Cell::new(1, 2)));
        assert!(!snake.contains(Cell::new(2, 2)));
    }

    #[test]
    fn test_empty_snake_rejected() {
        assert!(Snake::from_cells(std::iter::empty()).is_none());
    }

    #[test]
    fn test_pop_tail_keeps_head() {
        let mut snake = Snake::new(Cell::new(2, 2));
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);

        snake.push_head(Cell::new(2, 3));
        assert_eq!(snake.pop_tail(), Some(Cell::new(2, 2)));
        assert_eq!(snake.head(), Cell::new(2, 3));
    }

    #[test]
    fn test_body_matches_grid() {
        let mut state = state_with_snake(&[Cell::new(2, 2), Cell::new(2, 1)]);
        assert!(state.body_matches_grid());

        state.grid.set(Cell::new(3, 3), Tile::SnakeBody);
        assert!(!state.body_matches_grid());
    }

    #[test]
    fn test_body_mismatch_when_tile_missing() {
        let mut state = state_with_snake(&[Cell::new(2, 2), Cell::new(2, 1)]);
        state.grid.set(Cell::new(2, 1), Tile::Empty);
        assert!(!state.body_matches_grid());
    }

    #[test]
    fn test_next_head() {
        let state = state_with_snake(&[Cell::new(2, 2)]);
        assert_eq!(state.next_head(), Cell::new(2, 3));
    }
}
