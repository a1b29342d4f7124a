// ===== keyforge-core/src/pins.rs =====
use crate::layout::{Position, RowWidths};

/// Same shape as a layout's key grid: each cell is either `"@"` (free, any
/// grapheme may occupy it) or `"#"` (pinned, the occupying grapheme may not
/// move). Used only during interactive `minimize`/`worsen`/`suggest`.
#[derive(Debug, Clone)]
pub struct PinGrid(pub Vec<Vec<String>>);

pub const FREE: &str = "@";
pub const PINNED: &str = "#";

impl PinGrid {
    pub fn free(widths: RowWidths) -> Self {
        let rows = widths
            .0
            .iter()
            .map(|&w| vec![FREE.to_string(); w])
            .collect();
        Self(rows)
    }

    #[inline(always)]
    pub fn at(&self, pos: Position) -> &str {
        &self.0[pos.row][pos.col]
    }

    #[inline(always)]
    pub fn is_pinned(&self, pos: Position) -> bool {
        self.at(pos) == PINNED
    }

    pub fn set(&mut self, pos: Position, pinned: bool) {
        self.0[pos.row][pos.col] = if pinned { PINNED.to_string() } else { FREE.to_string() };
    }
}
