//! Read-only state snapshot consumed by the presentation layer.

use crate::types::{Cell, PieceKind, RunState, BOARD_HEIGHT, BOARD_WIDTH};

/// Everything a renderer needs for one frame.
///
/// The board grid already has the active piece overlaid; cells of a piece
/// hanging above the visible top are clipped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSnapshot {
    pub board: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub state: RunState,
}

impl GameSnapshot {
    /// Whether gameplay commands currently have any effect
    pub fn playable(&self) -> bool {
        self.state == RunState::Running
    }
}
