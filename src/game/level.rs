//! Text level loading
//!
//! ```text
//! <rows> <cols>
//! <d_col> <d_row>
//! <rows lines of exactly cols glyphs>
//! ```
//!
//! Glyphs are `' '` empty, `'$'` food, `'*'` snake and `'#'` wall. Snake cells
//! are read in row-major order, the first one found being the head, and each
//! must touch the one before it.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::grid::{Cell, Tile, WorldGrid};
use super::heading::Heading;
use super::state::{SimulationState, Snake};

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("could not load level file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line 1: expected `<rows> <cols>`, got {0:?}")]
    BadDimensions(String),
    #[error("line 2: expected `<d_col> <d_row>` unit vector, got {0:?}")]
    BadHeading(String),
    #[error("expected {expected} grid rows, found {found}")]
    MissingRows { expected: usize, found: usize },
    #[error("grid row {row}: expected {expected} columns, found {found}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("grid row {row}, column {col}: unknown tile {glyph:?}")]
    UnknownGlyph { row: usize, col: usize, glyph: char },
    #[error("level contains no snake cell")]
    NoSnake,
    #[error("snake cell {index} at ({row}, {col}) does not touch the previous cell")]
    NotContiguous { index: usize, row: i32, col: i32 },
}

/// Read and parse a level file
pub fn load_level(path: &Path) -> Result<SimulationState, LevelError> {
    let text = std::fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_level(&text)
}

/// Parse level text into a starting state
pub fn parse_level(text: &str) -> Result<SimulationState, LevelError> {
    let mut lines = text.lines().map(|line| line.strip_suffix('\r').unwrap_or(line));

    let header = lines.next().unwrap_or_default();
    let (rows, cols) = parse_pair::<usize>(header)
        .filter(|(rows, cols)| *rows > 0 && *cols > 0)
        .filter(|(rows, cols)| rows.checked_mul(*cols).is_some())
        .ok_or_else(|| LevelError::BadDimensions(header.to_string()))?;

    let heading_line = lines.next().unwrap_or_default();
    let heading = parse_pair::<i32>(heading_line)
        .and_then(|(d_col, d_row)| Heading::from_delta(d_col, d_row))
        .ok_or_else(|| LevelError::BadHeading(heading_line.to_string()))?;

    // Grows with the rows actually read, not the declared size.
    let mut tiles = Vec::new();
    let mut snake_cells = Vec::new();

    for row in 0..rows {
        let line = lines.next().ok_or(LevelError::MissingRows {
            expected: rows,
            found: row,
        })?;

        let found = line.chars().count();
        if found != cols {
            return Err(LevelError::RowWidth {
                row,
                expected: cols,
                found,
            });
        }

        for (col, glyph) in line.chars().enumerate() {
            let tile =
                Tile::from_glyph(glyph).ok_or(LevelError::UnknownGlyph { row, col, glyph })?;
            if tile == Tile::SnakeBody {
                snake_cells.push(Cell::new(row as i32, col as i32));
            }
            tiles.push(tile);
        }
    }

    if let Some((index, cell)) = snake_cells
        .windows(2)
        .enumerate()
        .find(|(_, pair)| !pair[0].is_adjacent(pair[1]))
        .map(|(i, pair)| (i + 1, pair[1]))
    {
        return Err(LevelError::NotContiguous {
            index,
            row: cell.row,
            col: cell.col,
        });
    }

    let snake = Snake::from_cells(snake_cells).ok_or(LevelError::NoSnake)?;
    let grid = WorldGrid::from_tiles(rows, cols, tiles).ok_or(LevelError::MissingRows {
        expected: rows,
        found: 0,
    })?;

    Ok(SimulationState::new(grid, snake, heading))
}

fn parse_pair<T: std::str::FromStr>(line: &str) -> Option<(T, T)> {
    let mut parts = line.split_whitespace();
    let first = parts.next()?.parse().ok()?;
    let second = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((first, second))
}
