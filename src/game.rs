//! Core game state and logic
//!
//! A [`Game`] owns everything one session needs: the board, the falling
//! piece, the next-piece preview, the score and the gravity timer. Input and
//! timer events are handled one at a time and each runs to completion.

use crate::board::Board;
use crate::piece::Piece;
use crate::randomizer::{PieceSource, UniformRandom};
use crate::score::Score;
use crate::tetromino::TetrominoType;
use crate::timer::{IntervalTimer, Scheduler, TimerHandle};
use tracing::{debug, info, trace};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// No session has been started yet
    Idle,
    Running,
    /// Board topped out; waits for a restart
    GameOver,
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
}

/// Raised when a new piece has no room to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOver {
    pub final_score: u64,
}

/// The main game struct
pub struct Game<S: Scheduler = IntervalTimer> {
    board: Board,
    current_piece: Option<Piece>,
    next_piece: Option<TetrominoType>,
    score: Score,
    state: GameState,
    source: Box<dyn PieceSource>,
    scheduler: S,
    /// The live gravity timer, if any
    gravity: Option<TimerHandle>,
}

impl<S: Scheduler> Game<S> {
    /// Create an idle game that draws pieces uniformly at random
    pub fn new(scheduler: S) -> Self {
        Self::with_source(scheduler, Box::new(UniformRandom::new()))
    }

    /// Create an idle game with a specific piece source
    pub fn with_source(scheduler: S, source: Box<dyn PieceSource>) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            next_piece: None,
            score: Score::new(),
            state: GameState::Idle,
            source,
            scheduler,
            gravity: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn next_piece(&self) -> Option<TetrominoType> {
        self.next_piece
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Row the current piece would land on if hard-dropped now
    pub fn ghost_row(&self) -> Option<i32> {
        self.current_piece
            .as_ref()
            .map(|piece| piece.ghost_row(&self.board))
    }

    /// Begin a fresh session. Ignored while a session is already running.
    pub fn start(&mut self) -> Option<GameOver> {
        if self.state == GameState::Running {
            return None;
        }

        self.board = Board::new();
        self.score = Score::new();
        self.current_piece = None;
        self.next_piece = None;
        self.state = GameState::Running;
        self.reschedule_gravity();

        info!(interval_ms = self.score.drop_interval.as_millis() as u64, "session started");
        self.spawn_next()
    }

    /// Deliver a fired timer. Only the live gravity timer advances the game.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<GameOver> {
        if self.gravity != Some(handle) {
            trace!(?handle, "ignoring stale timer");
            return None;
        }
        self.tick()
    }

    /// Apply one step of gravity, locking the piece if it cannot fall
    pub fn tick(&mut self) -> Option<GameOver> {
        if self.state != GameState::Running {
            return None;
        }
        let piece = self.current_piece.as_mut()?;
        if piece.move_down(&self.board) {
            return None;
        }
        self.lock_piece()
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) -> Option<GameOver> {
        if self.state != GameState::Running {
            return None;
        }
        let piece = self.current_piece.as_mut()?;

        match action {
            Action::MoveLeft => {
                piece.move_left(&self.board);
            }
            Action::MoveRight => {
                piece.move_right(&self.board);
            }
            Action::SoftDrop => {
                if piece.move_down(&self.board) {
                    self.score.add_soft_drop(1);
                }
            }
            Action::HardDrop => {
                let distance = piece.hard_drop(&self.board);
                self.score.add_hard_drop(distance);
                return self.lock_piece();
            }
            Action::Rotate => {
                if !piece.rotate(&self.board) {
                    trace!("rotation rejected");
                }
            }
        }
        None
    }

    /// Lock the current piece, clear lines, score, and spawn the next piece
    fn lock_piece(&mut self) -> Option<GameOver> {
        let piece = self.current_piece.take()?;
        self.board.lock(&piece);

        let lines = self.board.clear_full_rows() as u32;
        debug!(kind = ?piece.kind, row = piece.row, col = piece.col, lines, "piece locked");

        if self.score.apply_line_clear(lines) {
            info!(
                level = self.score.level,
                interval_ms = self.score.drop_interval.as_millis() as u64,
                "level up"
            );
            self.reschedule_gravity();
        }

        self.spawn_next()
    }

    /// Promote the queued piece (drawing one if the queue is empty) and queue
    /// a new one. Ends the session if the spawn position is blocked.
    fn spawn_next(&mut self) -> Option<GameOver> {
        let kind = match self.next_piece.take() {
            Some(kind) => kind,
            None => self.source.next_piece(),
        };
        self.next_piece = Some(self.source.next_piece());

        match Piece::spawn(kind, &self.board) {
            Some(piece) => {
                self.current_piece = Some(piece);
                None
            }
            None => Some(self.game_over()),
        }
    }

    fn game_over(&mut self) -> GameOver {
        self.state = GameState::GameOver;
        self.current_piece = None;
        if let Some(handle) = self.gravity.take() {
            self.scheduler.cancel(handle);
        }
        info!(score = self.score.points, level = self.score.level, "game over");
        GameOver {
            final_score: self.score.points,
        }
    }

    /// Replace the gravity timer with one at the current drop interval
    fn reschedule_gravity(&mut self) {
        if let Some(handle) = self.gravity.take() {
            self.scheduler.cancel(handle);
        }
        self.gravity = Some(self.scheduler.schedule_repeating(self.score.drop_interval));
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(IntervalTimer::new())
    }
}
