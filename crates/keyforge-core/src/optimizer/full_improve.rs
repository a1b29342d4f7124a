// ===== keyforge-core/src/optimizer/full_improve.rs =====
use crate::consts::{FULL_IMPROVE_INITIAL_MAX, FULL_IMPROVE_INITIAL_TIER, FULL_IMPROVE_MAX_TIER};
use crate::layout::{Layout, Position};
use crate::metrics::Flags;
use crate::optimizer::greedy::rand_pos;
use crate::scorer::Scorer;

/// Explicit state machine on `(tier, changed, max, i)`, represented as a
/// value rather than recursion: each iteration performs `tier` swaps as one
/// batch, keeps the batch only if it strictly improves the score, and
/// otherwise undoes the whole batch before counting a rejection. After
/// `max` consecutive rejections the tier escalates (or resets to 1 if an
/// improvement was found since the last escalation); terminates once the
/// tier exceeds `FULL_IMPROVE_MAX_TIER`.
pub fn full_improve(
    layout: &mut Layout,
    scorer: &Scorer,
    swap_possibilities: &[Position],
    flags: &Flags,
    rng: &mut fastrand::Rng,
) {
    let mut i = 0usize;
    let mut tier = FULL_IMPROVE_INITIAL_TIER;
    let mut changed = false;
    let mut max = FULL_IMPROVE_INITIAL_MAX;
    let mut swaps: Vec<(Position, Position)> = vec![(Position::new(0, 0), Position::new(0, 0)); 7];

    loop {
        i += 1;
        let first = scorer.score(layout, flags);

        for j in (0..tier as usize).rev() {
            let a = rand_pos(layout, swap_possibilities, flags, rng);
            let b = rand_pos(layout, swap_possibilities, flags, rng);
            layout.swap(a, b);
            swaps[j] = (a, b);
        }

        let second = scorer.score(layout, flags);

        if second < first {
            i = 0;
            changed = true;
            continue;
        }

        // Batch rejected: undo the swaps. `swaps[0]` holds the
        // last-applied swap of the batch, so undoing forward through the
        // index restores the pre-batch layout.
        for &(a, b) in swaps.iter().take(tier as usize) {
            layout.swap(a, b);
        }

        if i > max {
            if changed {
                tier = 1;
            } else {
                tier += 1;
            }
            max = 900 * (tier as usize) * (tier as usize);
            changed = false;

            if tier > FULL_IMPROVE_MAX_TIER {
                return;
            }
            i = 0;
        }
    }
}
