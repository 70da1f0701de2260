//! Active falling piece logic

use crate::board::{Board, BOARD_WIDTH};
use crate::tetromino::{Shape, TetrominoType};
use ratatui::style::Color;

/// Column offsets tried, in order, when rotating: in place, then one step
/// right, then one step left.
const KICK_OFFSETS: [i32; 3] = [0, 1, -1];

/// An active falling piece
#[derive(Debug, Clone)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Current orientation (may differ from the catalog shape after rotating)
    pub shape: Shape,
    /// Top-left anchor in board space. Row 0 is the top, increases downward.
    pub row: i32,
    pub col: i32,
}

impl Piece {
    /// Place a new piece horizontally centered on the top row.
    /// Returns None when the spawn position is already blocked.
    pub fn spawn(kind: TetrominoType, board: &Board) -> Option<Self> {
        let shape = kind.shape();
        let piece = Self {
            kind,
            shape,
            row: 0,
            col: (BOARD_WIDTH as i32 - shape.width() as i32) / 2,
        };
        if piece.collides(board, 0, 0) {
            return None;
        }
        Some(piece)
    }

    pub fn color(&self) -> Color {
        self.kind.color()
    }

    /// Absolute (row, col) of every filled block
    pub fn block_positions(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled()
            .map(move |(dr, dc)| (self.row + dr, self.col + dc))
    }

    /// Whether the piece would collide if shifted by (d_row, d_col)
    pub fn collides(&self, board: &Board, d_row: i32, d_col: i32) -> bool {
        board.collides(&self.shape, self.row + d_row, self.col + d_col)
    }

    /// Try to shift the piece, returns true if successful
    pub fn try_move(&mut self, board: &Board, d_row: i32, d_col: i32) -> bool {
        if self.collides(board, d_row, d_col) {
            return false;
        }
        self.row += d_row;
        self.col += d_col;
        true
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        self.try_move(board, 0, -1)
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        self.try_move(board, 0, 1)
    }

    /// Try to move down, returns true if successful
    pub fn move_down(&mut self, board: &Board) -> bool {
        self.try_move(board, 1, 0)
    }

    /// Rotate clockwise, nudging one column right or left if the rotated
    /// shape does not fit in place. On failure nothing changes.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotated = self.shape.rotated_cw();

        for kick in KICK_OFFSETS {
            if !board.collides(&rotated, self.row, self.col + kick) {
                self.shape = rotated;
                self.col += kick;
                return true;
            }
        }

        false
    }

    /// Hard drop - move down as far as possible and return distance dropped
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.move_down(board) {
            distance += 1;
        }
        distance
    }

    /// Get the ghost piece row (where the piece would land)
    pub fn ghost_row(&self, board: &Board) -> i32 {
        let mut ghost_row = self.row;
        while !board.collides(&self.shape, ghost_row + 1, self.col) {
            ghost_row += 1;
        }
        ghost_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Cell, BOARD_HEIGHT};

    fn spawn(kind: TetrominoType) -> (Board, Piece) {
        let board = Board::new();
        let piece = Piece::spawn(kind, &board).unwrap();
        (board, piece)
    }

    #[test]
    fn test_spawn_position() {
        let (_, o) = spawn(TetrominoType::O);
        assert_eq!((o.row, o.col), (0, 4));

        let (_, i) = spawn(TetrominoType::I);
        assert_eq!((i.row, i.col), (0, 3));

        let (_, t) = spawn(TetrominoType::T);
        assert_eq!((t.row, t.col), (0, 3));
    }

    #[test]
    fn test_spawn_blocked() {
        let mut board = Board::new();
        board.set(0, 4, Cell::Filled(Color::Red));
        assert!(Piece::spawn(TetrominoType::O, &board).is_none());
        // I spans columns 3-6 on row 0, also blocked
        assert!(Piece::spawn(TetrominoType::I, &board).is_none());
    }

    #[test]
    fn test_block_positions() {
        let (_, piece) = spawn(TetrominoType::O);
        let positions: Vec<_> = piece.block_positions().collect();
        assert_eq!(positions, vec![(0, 4), (0, 5), (1, 4), (1, 5)]);
    }

    #[test]
    fn test_move_stops_at_walls() {
        let (board, mut piece) = spawn(TetrominoType::O);
        let mut moves = 0;
        while piece.move_left(&board) {
            moves += 1;
        }
        assert_eq!(moves, 4);
        assert_eq!(piece.col, 0);

        while piece.move_right(&board) {}
        assert_eq!(piece.col, BOARD_WIDTH as i32 - 2);
        assert!(!piece.move_right(&board));
        assert_eq!(piece.col, BOARD_WIDTH as i32 - 2);
    }

    #[test]
    fn test_move_down() {
        let (board, mut piece) = spawn(TetrominoType::T);
        assert!(piece.move_down(&board));
        assert_eq!(piece.row, 1);
    }

    #[test]
    fn test_rotate_in_open_space() {
        let (board, mut piece) = spawn(TetrominoType::T);
        piece.move_down(&board);
        let original = piece.shape;
        let col = piece.col;
        for _ in 0..4 {
            assert!(piece.rotate(&board));
            assert_eq!(piece.col, col);
        }
        assert_eq!(piece.shape, original);
    }

    #[test]
    fn test_rotate_kicks_left_off_right_wall() {
        let board = Board::new();
        // Vertical I against the right wall
        let mut piece = Piece {
            kind: TetrominoType::I,
            shape: TetrominoType::I.shape().rotated_cw(),
            row: 5,
            col: BOARD_WIDTH as i32 - 1,
        };
        // Horizontal I is 4 wide: in place and +1 overflow, -1 still overflows
        assert!(!piece.rotate(&board));
        assert_eq!(piece.col, BOARD_WIDTH as i32 - 1);
        assert_eq!(piece.shape.width(), 1);

        // T standing against the right wall: widening by one fits after a -1 kick
        let mut t = Piece {
            kind: TetrominoType::T,
            shape: TetrominoType::T.shape().rotated_cw(),
            row: 5,
            col: BOARD_WIDTH as i32 - 2,
        };
        // rotated T (3 wide) at col 8 overflows; +1 overflows; -1 fits
        assert!(t.rotate(&board));
        assert_eq!(t.col, BOARD_WIDTH as i32 - 3);
        assert_eq!(t.shape.width(), 3);
    }

    #[test]
    fn test_rotate_kicks_right_off_left_wall() {
        let mut board = Board::new();
        // Block the in-place rotation with a locked cell
        let mut t = Piece {
            kind: TetrominoType::T,
            shape: TetrominoType::T.shape(),
            row: 5,
            col: 0,
        };
        // In place the rotated T covers (5,0),(6,0),(6,1),(7,0)
        board.set(7, 0, Cell::Filled(Color::Red));
        assert!(t.rotate(&board));
        assert_eq!(t.col, 1);
    }

    #[test]
    fn test_rotate_rejected_keeps_state() {
        let mut board = Board::new();
        let mut piece = Piece {
            kind: TetrominoType::T,
            shape: TetrominoType::T.shape(),
            row: 5,
            col: 4,
        };
        // Fill everything around except the piece's own cells
        for row in 0..BOARD_HEIGHT as i32 {
            for col in 0..BOARD_WIDTH as i32 {
                board.set(row, col, Cell::Filled(Color::Gray));
            }
        }
        for (row, col) in piece.block_positions().collect::<Vec<_>>() {
            board.set(row, col, Cell::Empty);
        }
        let before = piece.shape;
        assert!(!piece.rotate(&board));
        assert_eq!(piece.shape, before);
        assert_eq!((piece.row, piece.col), (5, 4));
    }

    #[test]
    fn test_hard_drop() {
        let (board, mut piece) = spawn(TetrominoType::I);
        let distance = piece.hard_drop(&board);
        assert_eq!(distance, BOARD_HEIGHT as u32 - 1);
        assert_eq!(piece.row, BOARD_HEIGHT as i32 - 1);
    }

    #[test]
    fn test_ghost_row_does_not_move_piece() {
        let mut board = Board::new();
        board.set(12, 4, Cell::Filled(Color::Red));
        let piece = Piece::spawn(TetrominoType::O, &board).unwrap();
        assert_eq!(piece.ghost_row(&board), 10);
        assert_eq!(piece.row, 0);

        let mut dropped = piece.clone();
        dropped.hard_drop(&board);
        assert_eq!(dropped.row, piece.ghost_row(&board));
    }
}
