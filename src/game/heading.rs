/// Direction the snake is travelling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    /// Returns the delta (d_col, d_row) for one step in this heading
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    /// Build a heading from a (d_col, d_row) pair, as written in level files.
    ///
    /// Only the four axis-aligned unit vectors are accepted.
    pub fn from_delta(d_col: i32, d_row: i32) -> Option<Self> {
        match (d_col, d_row) {
            (0, -1) => Some(Heading::Up),
            (0, 1) => Some(Heading::Down),
            (-1, 0) => Some(Heading::Left),
            (1, 0) => Some(Heading::Right),
            _ => None,
        }
    }

    /// Rotate 90 degrees: (dc, dr) -> (-dr, dc)
    pub fn turn_left(&self) -> Self {
        let (dc, dr) = self.delta();
        Self::rotated(-dr, dc)
    }

    /// Rotate 90 degrees the other way: (dc, dr) -> (dr, -dc)
    pub fn turn_right(&self) -> Self {
        let (dc, dr) = self.delta();
        Self::rotated(dr, -dc)
    }

    fn rotated(d_col: i32, d_row: i32) -> Self {
        match (d_col, d_row) {
            (0, -1) => Heading::Up,
            (0, 1) => Heading::Down,
            (-1, 0) => Heading::Left,
            _ => Heading::Right,
        }
    }
}
