//! Scoring module - line clear scoring, level derivation and gravity pacing

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, HARD_DROP_CELL_BONUS, LINES_PER_LEVEL, LINE_SCORES, MIN_DROP_MS,
};

/// Points for clearing `lines` rows in a single lock event, before the level
/// multiplier. Anything outside 1..=4 scores nothing.
pub fn score_for_lines(lines: u32) -> u32 {
    if lines == 0 || lines > 4 {
        return 0;
    }
    LINE_SCORES[lines as usize]
}

/// Level is derived from lifetime lines, never stored: one level per
/// LINES_PER_LEVEL cleared, starting at 1.
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Hard drop bonus for a fall of `cells` rows
pub fn hard_drop_bonus(cells: u32) -> u32 {
    cells * HARD_DROP_CELL_BONUS
}

/// Gravity interval for a level (milliseconds), clamped at the minimum
pub fn drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub((level.saturating_sub(1)).saturating_mul(DROP_STEP_MS))
        .max(MIN_DROP_MS)
}
