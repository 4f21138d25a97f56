//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or filled with the kind
//! of the piece that settled there. Uses a flat array for cache locality.
//! Coordinates: (x, y) with x in 0..10 (left to right), y in 0..20 (top to
//! bottom). The active piece's bounding box may sit partly above the board
//! (negative y); only the board itself is stored here.

use arrayvec::ArrayVec;

use crate::core::pieces::PieceShape;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position holds a settled cell (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check whether a piece shape placed at (x, y) collides.
    ///
    /// A mino collides when its column leaves the horizontal bounds, its row
    /// passes the floor, or it lands on a settled cell. Rows above the board
    /// (absolute y < 0) are legal and only checked against the walls.
    pub fn collides(&self, shape: &PieceShape, x: i8, y: i8) -> bool {
        shape.iter().any(|&(dx, dy)| {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 {
                return true;
            }
            if py >= BOARD_HEIGHT as i8 {
                return true;
            }
            py >= 0 && self.is_occupied(px, py)
        })
    }

    /// Stamp a piece into a copy of the board and return it.
    ///
    /// Minos above the top row are silently dropped; the caller must have
    /// established (x, y) as a legal resting position beforehand, no
    /// validation happens here.
    pub fn merge(&self, shape: &PieceShape, x: i8, y: i8, kind: PieceKind) -> Board {
        let mut merged = self.clone();
        for &(dx, dy) in shape.iter() {
            let py = y + dy;
            if py >= 0 {
                merged.set(x + dx, py, Some(kind));
            }
        }
        merged
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        let start = y * BOARD_WIDTH as usize;
        let end = start + BOARD_WIDTH as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Clear all full rows and return the row indices that were cleared
    /// (sorted bottom to top). Surviving rows keep their relative order and
    /// empty rows refill the top, so the board height never changes.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared_rows = ArrayVec::new();
        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;

        // Scan from bottom to top, compacting surviving rows downward.
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if self.is_row_full(read_y) {
                cleared_rows.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src_start = read_y * width;
                    let dst_start = write_y * width;
                    self.cells
                        .copy_within(src_start..src_start + width, dst_start);
                }
            }
        }

        // Clear the rows that opened up at the top.
        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        // Reverse to get bottom-to-top order.
        cleared_rows.reverse();
        cleared_rows
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
