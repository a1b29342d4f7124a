// ===== keyforge-core/src/optimizer/greedy.rs =====
use crate::consts::GREEDY_STUCK_LIMIT;
use crate::layout::{Layout, Position};
use crate::metrics::Flags;
use crate::scorer::Scorer;

/// Uniformly samples a position: from `swap_possibilities` under `improve`
/// mode, otherwise uniformly over the whole grid.
pub fn rand_pos(layout: &Layout, swap_possibilities: &[Position], flags: &Flags, rng: &mut fastrand::Rng) -> Position {
    if flags.improve && !swap_possibilities.is_empty() {
        swap_possibilities[rng.usize(0..swap_possibilities.len())]
    } else {
        let row = rng.usize(0..3);
        let col = rng.usize(0..layout.widths.0[row]);
        Position::new(col, row)
    }
}

/// Repeatedly swaps two random positions and keeps the change only on
/// strict improvement; terminates after `GREEDY_STUCK_LIMIT` consecutive
/// rejections. The best-seen score is non-increasing across iterations.
pub fn greedy_improve(
    layout: &mut Layout,
    scorer: &Scorer,
    swap_possibilities: &[Position],
    flags: &Flags,
    rng: &mut fastrand::Rng,
) {
    let mut stuck = 0usize;
    loop {
        let first = scorer.score(layout, flags);

        let a = rand_pos(layout, swap_possibilities, flags, rng);
        let b = rand_pos(layout, swap_possibilities, flags, rng);
        layout.swap(a, b);

        let second = scorer.score(layout, flags);

        if second < first {
            stuck = 0;
        } else {
            layout.swap(a, b);
            stuck += 1;
        }

        if stuck > GREEDY_STUCK_LIMIT {
            return;
        }
    }
}
