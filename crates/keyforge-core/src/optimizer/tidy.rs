// ===== keyforge-core/src/optimizer/tidy.rs =====
use crate::corpus::TextData;
use crate::layout::{Layout, Position};

/// For each non-home column, swaps row 0 and row 2 if the top-row letter is
/// rarer than the bottom-row one, putting the more frequent letter on the
/// home row's neighbor rather than the bottom row.
pub fn vertical_tidy(layout: &mut Layout, data: &TextData) {
    let width = layout.widths.0[0];
    for col in 0..width {
        if (3..=6).contains(&col) {
            continue;
        }
        if col >= layout.widths.0[2] {
            continue;
        }
        let top = layout.grapheme_at(Position::new(col, 0)).to_string();
        let bottom = layout.grapheme_at(Position::new(col, 2)).to_string();
        if data.letter(&top) < data.letter(&bottom) {
            layout.swap(Position::new(col, 0), Position::new(col, 2));
        }
    }
}
