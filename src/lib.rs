//! Blockfall: a falling-block puzzle engine with a terminal front end.
//!
//! `core` is the pure game-state machine (board, pieces, collision, line
//! clears, scoring, gravity pacing). `term` and `input` are the thin
//! presentation collaborator that feeds it key events and wall-clock time
//! and draws its snapshots.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
