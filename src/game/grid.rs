use rand::seq::SliceRandom;
use rand::Rng;

use super::heading::Heading;

/// A (row, col) coordinate on the world grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move cell by a (d_col, d_row) delta
    pub fn moved_by(&self, d_col: i32, d_row: i32) -> Self {
        Self {
            row: self.row + d_row,
            col: self.col + d_col,
        }
    }

    /// The neighbouring cell one step along `heading`
    pub fn moved_in_heading(&self, heading: Heading) -> Self {
        let (d_col, d_row) = heading.delta();
        self.moved_by(d_col, d_row)
    }

    /// True when the two cells share an edge
    pub fn is_adjacent(&self, other: Cell) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

/// Semantic content of one grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Empty,
    Food,
    SnakeBody,
    Wall,
}

impl Tile {
    pub const EMPTY_GLYPH: char = ' ';
    pub const FOOD_GLYPH: char = '$';
    pub const SNAKE_GLYPH: char = '*';
    pub const WALL_GLYPH: char = '#';

    pub fn glyph(&self) -> char {
        match self {
            Tile::Empty => Self::EMPTY_GLYPH,
            Tile::Food => Self::FOOD_GLYPH,
            Tile::SnakeBody => Self::SNAKE_GLYPH,
            Tile::Wall => Self::WALL_GLYPH,
        }
    }

    pub fn from_glyph(glyph: char) -> Option<Self> {
        match glyph {
            Self::EMPTY_GLYPH => Some(Tile::Empty),
            Self::FOOD_GLYPH => Some(Tile::Food),
            Self::SNAKE_GLYPH => Some(Tile::SnakeBody),
            Self::WALL_GLYPH => Some(Tile::Wall),
            _ => None,
        }
    }
}

/// Fixed-size rectangular tile map, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl WorldGrid {
    /// A grid whose outer ring is Wall and whose interior is Empty
    pub fn fenced(rows: usize, cols: usize) -> Self {
        let tiles = (0..rows)
            .flat_map(|r| {
                (0..cols).map(move |c| {
                    if r == 0 || c == 0 || r + 1 == rows || c + 1 == cols {
                        Tile::Wall
                    } else {
                        Tile::Empty
                    }
                })
            })
            .collect();

        Self { rows, cols, tiles }
    }

    /// Build a grid from row-major tiles. Returns `None` if the tile count
    /// does not match the dimensions.
    pub fn from_tiles(rows: usize, cols: usize, tiles: Vec<Tile>) -> Option<Self> {
        (tiles.len() == rows * cols).then_some(Self { rows, cols, tiles })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some(cell.row as usize * self.cols + cell.col as usize)
    }

    /// Check if a cell lies within `[0, rows) x [0, cols)`
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.row >= 0
            && cell.col >= 0
            && (cell.row as usize) < self.rows
            && (cell.col as usize) < self.cols
    }

    /// Check if a cell is strictly inside the outer ring
    pub fn is_interior(&self, cell: Cell) -> bool {
        cell.row >= 1
            && cell.col >= 1
            && (cell.row as usize) + 1 < self.rows
            && (cell.col as usize) + 1 < self.cols
    }

    pub fn get(&self, cell: Cell) -> Option<Tile> {
        self.index(cell).map(|idx| self.tiles[idx])
    }

    /// Overwrite a tile. Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: Cell, tile: Tile) {
        if let Some(idx) = self.index(cell) {
            self.tiles[idx] = tile;
        }
    }

    /// A cell is safe to enter when it is on the grid and holds Food or Empty
    pub fn is_safe(&self, cell: Cell) -> bool {
        matches!(self.get(cell), Some(Tile::Empty | Tile::Food))
    }

    /// Every cell holding `tile`, in row-major order
    pub fn cells_with(&self, tile: Tile) -> impl Iterator<Item = Cell> + '_ {
        let cols = self.cols;
        self.tiles
            .iter()
            .enumerate()
            .filter(move |(_, t)| **t == tile)
            .map(move |(idx, _)| Cell::new((idx / cols) as i32, (idx % cols) as i32))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|t| **t == tile).count()
    }

    /// Empty cells strictly inside the outer ring
    pub fn empty_interior_cells(&self) -> Vec<Cell> {
        self.cells_with(Tile::Empty)
            .filter(|cell| self.is_interior(*cell))
            .collect()
    }

    /// Mark a uniformly chosen Empty cell as Food.
    ///
    /// Returns the chosen cell, or `None` when no Empty cell is left.
    pub fn place_food<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Cell> {
        let empty: Vec<Cell> = self.cells_with(Tile::Empty).collect();
        let cell = *empty.choose(rng)?;
        self.set(cell, Tile::Food);
        Some(cell)
    }

    /// One string of glyphs per row
    pub fn render_lines(&self) -> Vec<String> {
        self.tiles
            .chunks(self.cols.max(1))
            .map(|row| row.iter().map(Tile::glyph).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn test_fenced_grid_border_is_wall() {
        let grid = WorldGrid::fenced(5, 6);
        for r in 0..5 {
            for c in 0..6 {
                let cell = Cell::new(r, c);
                let expected = if grid.is_interior(cell) {
                    Tile::Empty
                } else {
                    Tile::Wall
                };
                assert_eq!(grid.get(cell), Some(expected));
            }
        }
        assert_eq!(grid.count(Tile::Empty), 3 * 4);
    }

    #[test]
    fn test_is_safe_out_of_bounds() {
        let grid = WorldGrid::fenced(5, 5);
        for cell in [
            Cell::new(-1, 2),
            Cell::new(2, -1),
            Cell::new(5, 2),
            Cell::new(2, 5),
            Cell::new(-3, -3),
            Cell::new(100, 100),
        ] {
            assert!(!grid.is_safe(cell), "{cell:?} should be unsafe");
            assert_eq!(grid.get(cell), None);
        }
    }

    #[test]
    fn test_is_safe_by_tile() {
        let mut grid = WorldGrid::fenced(5, 5);
        grid.set(Cell::new(1, 1), Tile::Food);
        grid.set(Cell::new(1, 2), Tile::SnakeBody);

        assert!(grid.is_safe(Cell::new(1, 1)));
        assert!(grid.is_safe(Cell::new(2, 2)));
        assert!(!grid.is_safe(Cell::new(1, 2)));
        assert!(!grid.is_safe(Cell::new(0, 0)));
    }

    #[test]
    fn test_place_food_only_on_empty() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut grid = WorldGrid::fenced(5, 5);
        for _ in 0..9 {
            let cell = grid.place_food(&mut rng).expect("room left");
            assert!(grid.is_interior(cell));
        }
        assert_eq!(grid.count(Tile::Food), 9);
        assert_eq!(grid.count(Tile::Empty), 0);
        assert_eq!(grid.place_food(&mut rng), None);
    }

    #[test]
    fn test_from_tiles_checks_size() {
        assert!(WorldGrid::from_tiles(2, 2, vec![Tile::Empty; 4]).is_some());
        assert!(WorldGrid::from_tiles(2, 2, vec![Tile::Empty; 3]).is_none());
    }

    #[test]
    fn test_render_lines() {
        let mut grid = WorldGrid::fenced(3, 4);
        grid.set(Cell::new(1, 1), Tile::Food);
        grid.set(Cell::new(1, 2), Tile::SnakeBody);
        assert_eq!(grid.render_lines(), vec!["####", "#$*#", "####"]);
    }

    #[test]
    fn test_glyph_mapping() {
        for tile in [Tile::Empty, Tile::Food, Tile::SnakeBody, Tile::Wall] {
            assert_eq!(Tile::from_glyph(tile.glyph()), Some(tile));
        }
        assert_eq!(Tile::from_glyph('x'), None);
    }

    #[test]
    fn test_cell_adjacency() {
        let cell = Cell::new(2, 2);
        assert!(cell.is_adjacent(Cell::new(1, 2)));
        assert!(cell.is_adjacent(Cell::new(2, 3)));
        assert!(!cell.is_adjacent(Cell::new(3, 3)));
        assert!(!cell.is_adjacent(cell));
        assert_eq!(cell.moved_in_heading(Heading::Right), Cell::new(2, 3));
        assert_eq!(cell.moved_in_heading(Heading::Up), Cell::new(1, 2));
    }
}
