//! Game board representation and collision detection

use crate::piece::Piece;
use crate::tetromino::Shape;
use ratatui::style::Color;

/// Standard Tetris board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// The playfield of locked cells
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    /// Map signed coordinates to grid indices, None if off the grid
    fn index(row: i32, col: i32) -> Option<(usize, usize)> {
        let row = usize::try_from(row).ok().filter(|&r| r < BOARD_HEIGHT)?;
        let col = usize::try_from(col).ok().filter(|&c| c < BOARD_WIDTH)?;
        Some((row, col))
    }

    /// Get the cell at (row, col), None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        Self::index(row, col).map(|(r, c)| self.cells[r][c])
    }

    /// Set the cell at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match Self::index(row, col) {
            Some((r, c)) => {
                self.cells[r][c] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a locked block sits at (row, col).
    ///
    /// Anything outside the grid reports unoccupied; rows above the top are
    /// always free, and walls/floor are the caller's concern (see [`Board::collides`]).
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(|cell| cell.is_filled())
    }

    /// Whether `shape` anchored at (row, col) hits a wall, the floor, or a
    /// locked block. Sub-cells above the top edge only check the side walls,
    /// which lets pieces spawn partly out of view.
    pub fn collides(&self, shape: &Shape, row: i32, col: i32) -> bool {
        shape.filled().any(|(dr, dc)| {
            let r = row + dr;
            let c = col + dc;
            c < 0
                || c >= BOARD_WIDTH as i32
                || r >= BOARD_HEIGHT as i32
                || (r >= 0 && self.is_occupied(r, c))
        })
    }

    /// Lock a piece onto the board at its current anchor
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for (row, col) in piece.block_positions() {
            self.set(row, col, Cell::Filled(color));
        }
    }

    /// Clear completed lines and return the number cleared.
    ///
    /// Scans bottom to top. A full row is removed and everything above it
    /// shifts down one, with a fresh empty row at the top; the same index is
    /// then checked again since it now holds the row that was above.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut lines_cleared = 0;
        let mut row = BOARD_HEIGHT;

        while row > 0 {
            if self.is_line_full(row - 1) {
                self.cells.copy_within(0..row - 1, 1);
                self.cells[0] = [Cell::Empty; BOARD_WIDTH];
                lines_cleared += 1;
            } else {
                row -= 1;
            }
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Iterate over rows, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }
}
