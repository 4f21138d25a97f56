//! Terminal rendering layer.
//!
//! Renders engine snapshots into a simple framebuffer that is flushed to the
//! terminal each frame. No game rules live here; deleting this module leaves
//! the engine intact.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
