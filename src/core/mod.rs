//! Core module - pure game logic with no external dependencies
//!
//! This module contains all the game rules, state management, and logic.
//! It has zero dependencies on UI, terminal I/O, or the system clock.

pub mod board;
pub mod game_state;
pub mod gravity;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use board::Board;
pub use game_state::{FallingPiece, GameState};
pub use gravity::GravityDriver;
pub use rng::{PieceSource, SimpleRng};
pub use snapshot::GameSnapshot;
