// ===== keyforge-core/src/suggest.rs =====
//! Depth-limited parallel swap-tree search: looks for a swap (or short
//! sequence of swaps) that improves the score beyond a threshold.

use crate::layout::{Layout, Position};
use crate::metrics::Flags;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::Mutex;

/// A candidate swap: `pair` is the top-level swap to perform, `immediate`
/// is its direct score after that single swap, `potential` is the best
/// (lowest) score reachable from it within `maxdepth` further swaps.
#[derive(Debug, Clone, Copy)]
pub struct Suggestion {
    pub pair: (Position, Position),
    pub immediate_score: f64,
    pub potential_score: f64,
}

/// Enumerates all ordered position pairs, recursing up to `maxdepth` levels
/// below every pair whose improvement exceeds `threshold`, and returns the
/// candidate with the lowest potential score. `None` if no candidate
/// improves beyond the threshold.
pub fn suggest_swaps(layout: &Layout, scorer: &Scorer, flags: &Flags, maxdepth: usize, threshold: f64) -> Option<Suggestion> {
    let s1 = scorer.score(layout, flags);
    let positions: Vec<Position> = layout.positions().collect();

    // Depth 0: find top-level candidates serially (layout must be mutated
    // and restored in place between pairs), recording each surviving
    // candidate's post-swap layout for parallel recursion below.
    struct Candidate {
        pair: (Position, Position),
        immediate_score: f64,
        layout_after: Layout,
    }
    let mut candidates: Vec<Candidate> = Vec::new();
    {
        let mut layout = layout.deep_copy();
        for &p1 in &positions {
            for &p2 in &positions {
                if p1 == p2 {
                    continue;
                }
                layout.swap(p1, p2);
                let s2 = scorer.score(&layout, flags);
                let diff = s1 - s2;
                if diff > threshold {
                    candidates.push(Candidate {
                        pair: (p1, p2),
                        immediate_score: s2,
                        layout_after: layout.deep_copy(),
                    });
                }
                layout.swap(p1, p2);
            }
        }
    }

    if candidates.is_empty() {
        return None;
    }

    let results: Vec<Suggestion> = candidates
        .into_par_iter()
        .map(|c| {
            let potential = Mutex::new(c.immediate_score);
            let mut sub_layout = c.layout_after;
            recurse(&mut sub_layout, scorer, flags, 1, maxdepth, threshold, &positions, &potential);
            Suggestion {
                pair: c.pair,
                immediate_score: c.immediate_score,
                potential_score: potential.into_inner().unwrap(),
            }
        })
        .collect();

    results
        .into_iter()
        .min_by(|a, b| a.potential_score.total_cmp(&b.potential_score))
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    layout: &mut Layout,
    scorer: &Scorer,
    flags: &Flags,
    depth: usize,
    maxdepth: usize,
    threshold: f64,
    positions: &[Position],
    potential: &Mutex<f64>,
) {
    let s1 = scorer.score(layout, flags);
    for &p1 in positions {
        for &p2 in positions {
            if p1 == p2 {
                continue;
            }
            layout.swap(p1, p2);
            let s2 = scorer.score(layout, flags);
            let diff = s1 - s2;
            if depth < maxdepth && diff > threshold {
                recurse(layout, scorer, flags, depth + 1, maxdepth, threshold, positions, potential);
                let mut p = potential.lock().unwrap();
                if s2 < *p {
                    *p = s2;
                }
            } else if depth == maxdepth {
                let mut p = potential.lock().unwrap();
                if s2 < *p {
                    *p = s2;
                }
            }
            layout.swap(p1, p2);
        }
    }
}
