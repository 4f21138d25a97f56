//! Pieces module - shape catalog and rotation resolution
//!
//! Shapes are fixed data: 7 kinds x 4 rotation states, each given as the
//! four occupied cells of a 4x4 bounding box. The 3-wide kinds rotate within
//! the top-left 3x3 of the box, I within the full 4x4 and O not at all, so
//! the states are stored rather than derived at runtime.
//!
//! Rotation uses a deliberately simple wall-kick policy: advance the rotation
//! state, then try the horizontal offsets [0, -1, 1, -2, 2] in that order and
//! take the first placement that does not collide. No vertical kicks and no
//! per-kind tables.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino relative to the bounding-box origin
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets within the 4x4 bounding box
pub type PieceShape = [MinoOffset; 4];

/// Horizontal wall-kick offsets, in priority order
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// Spawn position of a fresh piece's bounding box (x, y)
///
/// y = -1 puts the top row of the box above the visible board.
pub const SPAWN_POSITION: (i8, i8) = (3, -1);

const I_SHAPES: [PieceShape; 4] = [
    [(0, 1), (1, 1), (2, 1), (3, 1)],
    [(2, 0), (2, 1), (2, 2), (2, 3)],
    [(0, 2), (1, 2), (2, 2), (3, 2)],
    [(1, 0), (1, 1), (1, 2), (1, 3)],
];

const O_SHAPES: [PieceShape; 4] = [[(1, 0), (2, 0), (1, 1), (2, 1)]; 4];

const T_SHAPES: [PieceShape; 4] = [
    [(1, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (1, 2)],
    [(1, 0), (0, 1), (1, 1), (1, 2)],
];

const S_SHAPES: [PieceShape; 4] = [
    [(1, 0), (2, 0), (0, 1), (1, 1)],
    [(1, 0), (1, 1), (2, 1), (2, 2)],
    [(1, 1), (2, 1), (0, 2), (1, 2)],
    [(0, 0), (0, 1), (1, 1), (1, 2)],
];

const Z_SHAPES: [PieceShape; 4] = [
    [(0, 0), (1, 0), (1, 1), (2, 1)],
    [(2, 0), (1, 1), (2, 1), (1, 2)],
    [(0, 1), (1, 1), (1, 2), (2, 2)],
    [(1, 0), (0, 1), (1, 1), (0, 2)],
];

const J_SHAPES: [PieceShape; 4] = [
    [(0, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (2, 0), (1, 1), (1, 2)],
    [(0, 1), (1, 1), (2, 1), (2, 2)],
    [(1, 0), (1, 1), (0, 2), (1, 2)],
];

const L_SHAPES: [PieceShape; 4] = [
    [(2, 0), (0, 1), (1, 1), (2, 1)],
    [(1, 0), (1, 1), (1, 2), (2, 2)],
    [(0, 1), (1, 1), (2, 1), (0, 2)],
    [(0, 0), (1, 0), (1, 1), (1, 2)],
];

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    let table = match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    };
    table[rotation.index()]
}

/// Try to rotate a piece clockwise, resolving collisions with wall kicks.
///
/// `collides` judges a shape placed at an absolute position. Returns the new
/// rotation and x on success; None means every kick candidate collided and
/// the rotation must be abandoned.
pub fn try_rotate(
    kind: PieceKind,
    rotation: Rotation,
    x: i8,
    y: i8,
    collides: impl Fn(&PieceShape, i8, i8) -> bool,
) -> Option<(Rotation, i8)> {
    let candidate = rotation.rotate_cw();
    let candidate_shape = shape(kind, candidate);

    for &dx in KICK_OFFSETS.iter() {
        if !collides(&candidate_shape, x + dx, y) {
            return Some((candidate, x + dx));
        }
    }

    None
}
