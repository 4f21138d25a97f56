//! Game state module - the command-driven session state machine
//!
//! Owns the authoritative mutable state: board, active piece, buffered next
//! kind, score, lines and run state. Commands either fully apply or are
//! rejected as no-ops; a blocked drop-like descent triggers the full
//! lock -> clear -> score -> spawn cascade before the command returns.
//!
//! The state is an explicit object passed to command handlers, so several
//! sessions can coexist and tests construct fixtures directly.

use crate::core::pieces::{self, PieceShape, SPAWN_POSITION};
use crate::core::scoring;
use crate::core::{Board, GameSnapshot, PieceSource};
use crate::types::{GameAction, PieceKind, Rotation, RunState, BOARD_HEIGHT, BOARD_WIDTH};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Hash)]
pub struct FallingPiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl FallingPiece {
    /// Create a new piece at the spawn position
    pub fn spawn(kind: PieceKind) -> Self {
        let (x, y) = SPAWN_POSITION;
        Self {
            kind,
            rotation: Rotation::North,
            x,
            y,
        }
    }

    /// Get the shape (mino offsets) for the current rotation
    pub fn shape(&self) -> PieceShape {
        pieces::shape(self.kind, self.rotation)
    }
}

/// Complete game session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub board: Board,
    /// None only after a failed spawn (game over)
    pub active: Option<FallingPiece>,
    /// Kind buffered to become the active piece at the next spawn
    pub next: PieceKind,
    pub pieces: PieceSource,
    pub score: u32,
    pub lines: u32,
    pub run_state: RunState,
}

impl GameState {
    /// Create a new session with the given RNG seed.
    ///
    /// The first active piece and the next-piece buffer are drawn
    /// immediately; `start` only flips the run state.
    pub fn new(seed: u32) -> Self {
        let mut pieces = PieceSource::new(seed);
        let active = FallingPiece::spawn(pieces.draw());
        let next = pieces.draw();

        Self {
            board: Board::new(),
            active: Some(active),
            next,
            pieces,
            score: 0,
            lines: 0,
            run_state: RunState::NotStarted,
        }
    }

    /// Current level, derived from lifetime lines
    pub fn level(&self) -> u32 {
        scoring::level_for_lines(self.lines)
    }

    /// Begin play. Only leaves the not-started state.
    pub fn start(&mut self) -> bool {
        if self.run_state != RunState::NotStarted {
            return false;
        }
        self.run_state = RunState::Running;
        true
    }

    /// Toggle between running and paused. Rejected once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                true
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                true
            }
            _ => false,
        }
    }

    /// Restart with a fresh board, score and pieces. Allowed from any state
    /// and always resumes play immediately.
    pub fn reset(&mut self) -> bool {
        let seed = self.pieces.seed();
        *self = Self::new(seed);
        self.run_state = RunState::Running;
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift(1)
    }

    /// Horizontal shift; illegal placements are rejected silently.
    fn shift(&mut self, dx: i8) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.board.collides(&active.shape(), active.x + dx, active.y) {
            return false;
        }

        self.active = Some(FallingPiece {
            x: active.x + dx,
            ..active
        });
        true
    }

    /// Player-requested descent. Locks the piece when the step is blocked.
    pub fn soft_drop(&mut self) -> bool {
        self.descend()
    }

    /// Timer-driven descent, same semantics as a soft drop.
    pub fn gravity_tick(&mut self) -> bool {
        self.descend()
    }

    /// Move the active piece down one row, or lock it in place when the row
    /// below is blocked. Returns whether the piece moved.
    fn descend(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if self.board.collides(&active.shape(), active.x, active.y + 1) {
            self.lock_active();
            return false;
        }

        self.active = Some(FallingPiece {
            y: active.y + 1,
            ..active
        });
        true
    }

    /// Drop the active piece straight down and lock it.
    ///
    /// The fall distance earns a flat bonus whether or not lines clear.
    pub fn hard_drop(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let shape = active.shape();
        let mut distance: u32 = 0;
        while !self
            .board
            .collides(&shape, active.x, active.y + distance as i8 + 1)
        {
            distance += 1;
        }

        self.active = Some(FallingPiece {
            y: active.y + distance as i8,
            ..active
        });
        self.score += scoring::hard_drop_bonus(distance);
        self.lock_active();
        true
    }

    /// Rotate the active piece clockwise, resolving wall kicks. A rotation
    /// that no kick can legalize is abandoned without touching the piece.
    pub fn rotate_cw(&mut self) -> bool {
        if self.run_state != RunState::Running {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let board = &self.board;
        let resolved = pieces::try_rotate(
            active.kind,
            active.rotation,
            active.x,
            active.y,
            |shape, x, y| board.collides(shape, x, y),
        );

        match resolved {
            Some((rotation, x)) => {
                self.active = Some(FallingPiece {
                    rotation,
                    x,
                    ..active
                });
                true
            }
            None => false,
        }
    }

    /// Merge the active piece into the board, clear lines, score and spawn
    /// the next piece.
    fn lock_active(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.board = self
            .board
            .merge(&active.shape(), active.x, active.y, active.kind);

        let cleared = self.board.clear_full_rows();
        if !cleared.is_empty() {
            // Multiplier uses the level before this event's lines count.
            let level = self.level();
            self.score += scoring::score_for_lines(cleared.len() as u32) * level;
            self.lines += cleared.len() as u32;
        }

        self.spawn_next();
    }

    /// Install the buffered kind as the active piece and draw a new buffer.
    ///
    /// A spawn whose default placement already collides ends the game; the
    /// piece is not installed and board and score stay as they were.
    pub fn spawn_next(&mut self) {
        let kind = self.next;
        self.next = self.pieces.draw();

        let piece = FallingPiece::spawn(kind);
        if self.board.collides(&piece.shape(), piece.x, piece.y) {
            self.run_state = RunState::GameOver;
            return;
        }

        self.active = Some(piece);
    }

    /// Apply a game action, returning whether it changed anything
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::Start => self.start(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Reset => self.reset(),
        }
    }

    /// Read-only snapshot for the presentation layer, with the active piece
    /// overlaid on the board grid.
    pub fn snapshot(&self) -> GameSnapshot {
        let mut board = [[None; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        for (y, row) in board.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                *cell = self.board.get(x as i8, y as i8).unwrap_or(None);
            }
        }

        if let Some(active) = self.active {
            for &(dx, dy) in active.shape().iter() {
                let px = active.x + dx;
                let py = active.y + dy;
                if px >= 0 && px < BOARD_WIDTH as i8 && py >= 0 && py < BOARD_HEIGHT as i8 {
                    board[py as usize][px as usize] = Some(active.kind);
                }
            }
        }

        GameSnapshot {
            board,
            next: self.next,
            score: self.score,
            lines: self.lines,
            level: self.level(),
            state: self.run_state,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.run_state, RunState::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.level(), 1);
        assert!(state.active.is_some());

        let active = state.active.unwrap();
        assert_eq!((active.x, active.y), SPAWN_POSITION);
        assert_eq!(active.rotation, Rotation::North);
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut state = GameState::new(12345);

        assert!(state.start());
        assert_eq!(state.run_state, RunState::Running);
        assert!(!state.start());

        state.run_state = RunState::GameOver;
        assert!(!state.start());
        assert_eq!(state.run_state, RunState::GameOver);
    }

    #[test]
    fn test_pause_toggles() {
        let mut state = GameState::new(12345);
        state.start();

        assert!(state.toggle_pause());
        assert_eq!(state.run_state, RunState::Paused);
        assert!(state.toggle_pause());
        assert_eq!(state.run_state, RunState::Running);

        state.run_state = RunState::GameOver;
        assert!(!state.toggle_pause());
        assert_eq!(state.run_state, RunState::GameOver);
    }

    #[test]
    fn test_commands_rejected_unless_running() {
        let mut state = GameState::new(12345);
        let before = state.active;

        assert!(!state.move_left());
        assert!(!state.rotate_cw());
        assert!(!state.soft_drop());
        assert!(!state.hard_drop());
        assert_eq!(state.active, before);

        state.start();
        state.toggle_pause();
        assert!(!state.gravity_tick());
        assert_eq!(state.active, before);
    }

    #[test]
    fn test_move_left_right() {
        let mut state = GameState::new(12345);
        state.start();

        let initial_x = state.active.unwrap().x;

        assert!(state.move_right());
        assert_eq!(state.active.unwrap().x, initial_x + 1);

        assert!(state.move_left());
        assert_eq!(state.active.unwrap().x, initial_x);
    }

    #[test]
    fn test_move_rejected_at_wall() {
        let mut state = GameState::new(12345);
        state.start();

        // Push to the left wall, then one more.
        while state.move_left() {}
        let at_wall = state.clone();

        assert!(!state.move_left());
        assert_eq!(state.active, at_wall.active);
        assert_eq!(state.board, at_wall.board);
        assert_eq!(state.score, at_wall.score);
    }

    #[test]
    fn test_descend_moves_then_locks() {
        let mut state = GameState::new(12345);
        state.start();
        state.active = Some(FallingPiece::spawn(PieceKind::O));

        let mut steps = 0;
        while state.soft_drop() {
            steps += 1;
        }

        // O spawns at y=-1 and rests with its bottom row on the floor.
        assert_eq!(steps, 18 - SPAWN_POSITION.1);
        // The blocked step locked the piece and spawned a fresh one.
        let respawned = state.active.unwrap();
        assert_eq!((respawned.x, respawned.y), SPAWN_POSITION);
        assert_eq!(state.board.get(4, 19), Some(Some(PieceKind::O)));
        assert_eq!(state.board.get(5, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_hard_drop_bonus_and_lock() {
        let mut state = GameState::new(12345);
        state.start();
        state.active = Some(FallingPiece::spawn(PieceKind::I));

        assert!(state.hard_drop());

        // I falls from y=-1 to y=18 (bottom row 19): 19 cells, 2 points each.
        assert_eq!(state.score, 38);
        assert_eq!(state.lines, 0);
        for x in 3..7 {
            assert_eq!(state.board.get(x, 19), Some(Some(PieceKind::I)));
        }
    }

    #[test]
    fn test_line_score_uses_pre_event_level() {
        let mut state = GameState::new(12345);
        state.start();
        state.lines = 9; // still level 1

        // One O drop into a two-cell notch clears the bottom row.
        for x in 0..BOARD_WIDTH as i8 {
            if x != 1 && x != 2 {
                state.board.set(x, 19, Some(PieceKind::L));
            }
        }
        state.active = Some(FallingPiece {
            x: 0,
            ..FallingPiece::spawn(PieceKind::O)
        });

        state.hard_drop();

        assert_eq!(state.lines, 10);
        assert_eq!(state.level(), 2);
        // 19 cells of drop bonus plus a single-line clear at the old level 1.
        assert_eq!(state.score, 38 + 100);
    }

    #[test]
    fn test_spawn_failure_ends_game() {
        let mut state = GameState::new(12345);
        state.start();

        // Every kind has a mino on absolute row 0 when spawned at y=-1.
        for x in 0..BOARD_WIDTH as i8 {
            state.board.set(x, 0, Some(PieceKind::J));
        }
        state.active = None;

        state.spawn_next();

        assert_eq!(state.run_state, RunState::GameOver);
        assert!(state.active.is_none());
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
    }

    #[test]
    fn test_reset_forces_fresh_running_session() {
        let mut state = GameState::new(12345);
        state.start();
        state.score = 700;
        state.lines = 12;
        state.board.set(0, 19, Some(PieceKind::Z));
        state.run_state = RunState::GameOver;

        assert!(state.reset());

        assert_eq!(state.run_state, RunState::Running);
        assert_eq!(state.score, 0);
        assert_eq!(state.lines, 0);
        assert_eq!(state.board, Board::new());
        assert!(state.active.is_some());
    }

    #[test]
    fn test_rotate_cw_advances_rotation() {
        let mut state = GameState::new(12345);
        state.start();
        state.active = Some(FallingPiece::spawn(PieceKind::T));

        assert!(state.rotate_cw());
        assert_eq!(state.active.unwrap().rotation, Rotation::East);

        assert!(state.rotate_cw());
        assert_eq!(state.active.unwrap().rotation, Rotation::South);
    }

    #[test]
    fn test_snapshot_overlays_active_piece() {
        let mut state = GameState::new(12345);
        state.start();
        state.active = Some(FallingPiece {
            kind: PieceKind::O,
            rotation: Rotation::North,
            x: 3,
            y: 5,
        });

        let snap = state.snapshot();

        assert_eq!(snap.board[5][4], Some(PieceKind::O));
        assert_eq!(snap.board[6][5], Some(PieceKind::O));
        // The overlay is display-only; the board itself is untouched.
        assert_eq!(state.board.get(4, 5), Some(None));
        assert_eq!(snap.level, 1);
        assert_eq!(snap.state, RunState::Running);
    }

    #[test]
    fn test_snapshot_clips_cells_above_top() {
        let mut state = GameState::new(12345);
        state.start();
        state.active = Some(FallingPiece::spawn(PieceKind::O));

        // O at y=-1 has its top row above the board; only row 0 shows.
        let snap = state.snapshot();
        assert_eq!(snap.board[0][4], Some(PieceKind::O));
        assert_eq!(snap.board[0][5], Some(PieceKind::O));
    }
}
