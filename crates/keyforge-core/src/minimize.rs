// ===== keyforge-core/src/minimize.rs =====
//! Iterative hill-climbing over same-hand swap pairs, used by the
//! interactive `m`/`m2` commands.

use crate::layout::{Layout, Position};
use crate::metrics::Flags;
use crate::pins::{PinGrid, PINNED};
use crate::scorer::Scorer;

/// Hill-climbs `layout` toward a local optimum over all swap pairs allowed
/// by `pins` and (when `no_cross`) confined to one hand's columns
/// (`col <= 4` or `col >= 5`). When `count > 0`, each candidate swap first
/// recurses with `count - 1` to evaluate its downstream best before being
/// compared directly. Mutates `layout` in place to the best layout found
/// (the source this was grounded on reassigns a local variable that never
/// reaches the caller; the caller's intent — and the only sensible
/// contract — is for this to mutate through).
pub fn minimize_layout(layout: &mut Layout, pins: &PinGrid, count: usize, no_cross: bool, scorer: &Scorer, flags: &Flags) {
    let mut best_score = scorer.score(layout, flags);
    let mut best_layout = layout.deep_copy();
    let positions: Vec<Position> = layout.positions().collect();

    loop {
        let mut found_better = false;
        let mut best_so_far_score = best_score;
        let mut best_so_far_layout = best_layout.deep_copy();

        for i in 0..positions.len().saturating_sub(1) {
            for j in (i + 1)..positions.len() {
                let pi_pos = positions[i];
                let pj_pos = positions[j];

                if no_cross && !same_hand(pi_pos, pj_pos) {
                    continue;
                }

                let pin_i = pins.at(pi_pos);
                let pin_j = pins.at(pj_pos);
                if pin_i == PINNED || pin_j == PINNED {
                    continue;
                }

                let mut swapped = best_layout.deep_copy();
                let ki = swapped.grapheme_at(pi_pos).to_string();
                let kj = swapped.grapheme_at(pj_pos).to_string();
                if pin_i == ki || pin_i == kj || pin_j == ki || pin_j == kj {
                    continue;
                }
                swapped.swap(pi_pos, pj_pos);

                if count != 0 {
                    minimize_layout(&mut swapped, pins, count - 1, no_cross, scorer, flags);
                    let rec_best = scorer.score(&swapped, flags);
                    if rec_best < best_so_far_score {
                        best_so_far_score = rec_best;
                        best_so_far_layout = swapped.deep_copy();
                        found_better = true;
                    }
                }

                let swapped_score = scorer.score(&swapped, flags);
                if swapped_score < best_so_far_score {
                    best_so_far_score = swapped_score;
                    best_so_far_layout = swapped;
                    found_better = true;
                }
            }
        }

        if best_so_far_score < best_score {
            best_score = best_so_far_score;
            best_layout = best_so_far_layout;
        }
        if !found_better {
            break;
        }
    }

    *layout = best_layout;
}

#[inline(always)]
fn same_hand(a: Position, b: Position) -> bool {
    (a.col <= 4 && b.col <= 4) || (a.col >= 5 && b.col >= 5)
}
