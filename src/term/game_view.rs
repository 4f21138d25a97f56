//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::pieces;
use crate::core::GameSnapshot;
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, RunState, BOARD_HEIGHT, BOARD_WIDTH};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A lightweight terminal renderer for the game board and side panel.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
        }
    }
}

/// Display color for a piece kind
fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(45, 212, 191),
        PieceKind::O => Rgb::new(245, 158, 11),
        PieceKind::T => Rgb::new(167, 139, 250),
        PieceKind::S => Rgb::new(34, 197, 94),
        PieceKind::Z => Rgb::new(239, 68, 68),
        PieceKind::J => Rgb::new(59, 130, 246),
        PieceKind::L => Rgb::new(249, 115, 22),
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self { cell_w, cell_h }
    }

    /// Render a snapshot into a framebuffer.
    pub fn render(&self, snapshot: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: Rgb::new(15, 23, 42),
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
        };

        fb.fill_rect(start_x + 1, start_y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h, border);

        // Board cells (the snapshot already overlays the active piece).
        for y in 0..BOARD_HEIGHT as usize {
            for x in 0..BOARD_WIDTH as usize {
                if let Some(kind) = snapshot.board[y][x] {
                    let style = CellStyle {
                        fg: Rgb::new(0, 0, 0),
                        bg: piece_color(kind),
                    };
                    self.fill_cell_rect(&mut fb, start_x, start_y, x as u16, y as u16, ' ', style);
                }
            }
        }

        self.draw_side_panel(&mut fb, snapshot, start_x + frame_w + 2, start_y);

        match snapshot.state {
            RunState::NotStarted => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PRESS ENTER")
            }
            RunState::Paused => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "PAUSED")
            }
            RunState::GameOver => {
                self.draw_overlay_text(&mut fb, start_x, start_y, frame_w, frame_h, "GAME OVER")
            }
            RunState::Running => {}
        }

        fb
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        x: u16,
        y: u16,
        ch: char,
        style: CellStyle,
    ) {
        fb.fill_rect(
            start_x + 1 + x * self.cell_w,
            start_y + 1 + y * self.cell_h,
            self.cell_w,
            self.cell_h,
            ch,
            style,
        );
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x + w - 1;
        let bottom = y + h - 1;

        fb.put_char(x, y, '┌', style);
        fb.put_char(right, y, '┐', style);
        fb.put_char(x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for cx in x + 1..right {
            fb.put_char(cx, y, '─', style);
            fb.put_char(cx, bottom, '─', style);
        }
        for cy in y + 1..bottom {
            fb.put_char(x, cy, '│', style);
            fb.put_char(right, cy, '│', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snapshot: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle {
            fg: Rgb::new(140, 140, 150),
            bg: Rgb::new(0, 0, 0),
        };
        let value = CellStyle::default();

        fb.put_str(x, y + 1, "SCORE", label);
        fb.put_str(x, y + 2, &snapshot.score.to_string(), value);
        fb.put_str(x, y + 4, "LINES", label);
        fb.put_str(x, y + 5, &snapshot.lines.to_string(), value);
        fb.put_str(x, y + 7, "LEVEL", label);
        fb.put_str(x, y + 8, &snapshot.level.to_string(), value);

        fb.put_str(x, y + 10, "NEXT", label);
        let preview = pieces::shape(snapshot.next, Rotation::North);
        let style = CellStyle {
            fg: Rgb::new(0, 0, 0),
            bg: piece_color(snapshot.next),
        };
        for &(dx, dy) in preview.iter() {
            fb.fill_rect(
                x + (dx as u16) * self.cell_w,
                y + 11 + dy as u16,
                self.cell_w,
                1,
                ' ',
                style,
            );
        }

        fb.put_str(x, y + 17, "arrows move/rotate", label);
        fb.put_str(x, y + 18, "space drop  p pause", label);
        fb.put_str(x, y + 19, "r reset  q quit", label);
    }

    fn draw_overlay_text(
        &self,
        fb: &mut FrameBuffer,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        text: &str,
    ) {
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(60, 60, 70),
        };
        let tx = x + w.saturating_sub(text.len() as u16) / 2;
        let ty = y + h / 2;
        fb.put_str(tx, ty, text, style);
    }
}

/// Columns reserved right of the board frame for the side panel
const SIDE_PANEL_W: u16 = 22;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    #[test]
    fn test_render_fits_viewport() {
        let state = GameState::new(1);
        let view = GameView::default();

        let fb = view.render(&state.snapshot(), Viewport::new(80, 24));
        assert_eq!(fb.width(), 80);
        assert_eq!(fb.height(), 24);
    }

    #[test]
    fn test_render_tiny_viewport_does_not_panic() {
        let state = GameState::new(1);
        let view = GameView::default();

        let fb = view.render(&state.snapshot(), Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
    }

    fn frame_text(fb: &FrameBuffer) -> String {
        let mut text = String::new();
        for y in 0..fb.height() {
            for x in 0..fb.width() {
                text.push(fb.get(x, y).map(|c| c.ch).unwrap_or(' '));
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_overlay_matches_run_state() {
        let mut state = GameState::new(1);
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);

        let fb = view.render(&state.snapshot(), viewport);
        assert!(frame_text(&fb).contains("PRESS ENTER"));

        state.start();
        let fb = view.render(&state.snapshot(), viewport);
        assert!(!frame_text(&fb).contains("PRESS ENTER"));

        state.toggle_pause();
        let fb = view.render(&state.snapshot(), viewport);
        assert!(frame_text(&fb).contains("PAUSED"));
    }
}
