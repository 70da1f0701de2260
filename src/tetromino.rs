//! Tetromino definitions and shapes
//!
//! Each of the 7 pieces is a small boolean matrix plus a color. Rotation is a
//! plain matrix transform, so any shape (not just the spawn orientation) can be
//! rotated without lookup tables.

use ratatui::style::Color;

/// Largest dimension of any tetromino matrix
const MAX_SIZE: usize = 4;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I, // Cyan - long bar
    O, // Yellow - square
    T, // Purple - T-shape
    S, // Green
    Z, // Red
    L, // Orange
    J, // Blue
}

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Yellow,
            TetrominoType::T => Color::Magenta,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
            TetrominoType::J => Color::Blue,
        }
    }

    /// All tetromino types, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::L,
            TetrominoType::J,
        ]
    }

    /// The spawn orientation of this tetromino, row 0 on top
    pub fn shape(&self) -> Shape {
        match self {
            TetrominoType::I => Shape::from_rows(&[&[1, 1, 1, 1]]),
            TetrominoType::O => Shape::from_rows(&[&[1, 1], &[1, 1]]),
            TetrominoType::T => Shape::from_rows(&[&[0, 1, 0], &[1, 1, 1]]),
            TetrominoType::S => Shape::from_rows(&[&[1, 1, 0], &[0, 1, 1]]),
            TetrominoType::Z => Shape::from_rows(&[&[0, 1, 1], &[1, 1, 0]]),
            TetrominoType::L => Shape::from_rows(&[&[1, 0, 0], &[1, 1, 1]]),
            TetrominoType::J => Shape::from_rows(&[&[0, 0, 1], &[1, 1, 1]]),
        }
    }
}

/// A rectangular boolean matrix describing which sub-cells of a piece are filled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    width: usize,
    height: usize,
    cells: [[bool; MAX_SIZE]; MAX_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values. Rows must all have the same length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let height = rows.len().min(MAX_SIZE);
        let width = rows.first().map_or(0, |row| row.len()).min(MAX_SIZE);
        let mut cells = [[false; MAX_SIZE]; MAX_SIZE];
        for (r, row) in rows.iter().take(height).enumerate() {
            for (c, &value) in row.iter().take(width).enumerate() {
                cells[r][c] = value != 0;
            }
        }
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the sub-cell at (row, col) is filled. Out-of-range is empty.
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[row][col]
    }

    /// Iterate over the (row, col) offsets of every filled sub-cell
    pub fn filled(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        (0..self.height).flat_map(move |r| {
            (0..self.width)
                .filter(move |&c| self.cells[r][c])
                .map(move |c| (r as i32, c as i32))
        })
    }

    /// Rotate 90° clockwise: `new[c][height - 1 - r] = old[r][c]`.
    /// Width and height swap.
    pub fn rotated_cw(&self) -> Shape {
        let mut cells = [[false; MAX_SIZE]; MAX_SIZE];
        for r in 0..self.height {
            for c in 0..self.width {
                cells[c][self.height - 1 - r] = self.cells[r][c];
            }
        }
        Shape {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_piece_has_four_blocks() {
        for kind in TetrominoType::all() {
            assert_eq!(kind.shape().filled().count(), 4, "{:?}", kind);
        }
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let i = TetrominoType::I.shape();
        let rotated = i.rotated_cw();
        assert_eq!((rotated.width(), rotated.height()), (1, 4));

        let t = TetrominoType::T.shape();
        let rotated = t.rotated_cw();
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
    }

    #[test]
    fn test_t_rotates_clockwise() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let rotated = TetrominoType::T.shape().rotated_cw();
        let expected = Shape::from_rows(&[&[1, 0], &[1, 1], &[1, 0]]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_four_rotations_is_identity() {
        for kind in TetrominoType::all() {
            let shape = kind.shape();
            let spun = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(spun, shape, "{:?}", kind);
        }
    }

    #[test]
    fn test_filled_offsets() {
        let offsets: Vec<_> = TetrominoType::L.shape().filled().collect();
        assert_eq!(offsets, vec![(0, 0), (1, 0), (1, 1), (1, 2)]);
    }
}
