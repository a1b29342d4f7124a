// ===== keyforge-core/src/metrics.rs =====
//! Geometry and ergonomic metrics: key distance, finger speed, SFB/DSFB/LSB
//! counts, and trigram hand-pattern classification.

use crate::config::WeightsConfig;
use crate::corpus::TextData;
use crate::layout::{Finger, Layout, Position};

/// Session-level flags that change how distance and scoring are computed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flags {
    pub stagger: bool,
    pub col_stagger: bool,
    pub slide: bool,
    pub dynamic: bool,
    pub improve: bool,
}

#[inline(always)]
fn staggered_x(col: usize, row: usize) -> f64 {
    if row == 0 {
        col as f64 - 0.25
    } else if row == 2 {
        col as f64 + 0.5
    } else {
        col as f64
    }
}

#[inline(always)]
fn staggered_y(col: usize, row: usize, weights: &WeightsConfig) -> f64 {
    let idx = col.min(9);
    row as f64 - weights.col_staggers[idx] as f64
}

/// Distance between two positions. Weighted: `lateral*dx^2 + dy^2`.
/// Unweighted: Euclidean.
pub fn two_key_dist(a: Position, b: Position, weighted: bool, flags: &Flags, weights: &WeightsConfig) -> f64 {
    let (ax, bx) = if flags.stagger {
        (staggered_x(a.col, a.row), staggered_x(b.col, b.row))
    } else {
        (a.col as f64, b.col as f64)
    };
    let (ay, by) = if flags.col_stagger {
        (staggered_y(a.col, a.row, weights), staggered_y(b.col, b.row, weights))
    } else {
        (a.row as f64, b.row as f64)
    };
    let x = ax - bx;
    let y = ay - by;
    if weighted {
        weights.dist.lateral as f64 * x * x + y * y
    } else {
        (x * x + y * y).sqrt()
    }
}

/// Per-finger speed, summed over all unordered position pairs sharing a
/// finger (including a position paired with itself).
pub fn finger_speed(layout: &Layout, data: &TextData, weights: &WeightsConfig, flags: &Flags, weighted: bool) -> [f64; 8] {
    let mut speeds = [0.0; 8];
    let sfb_w = weights.fspeed.sfb as f64;
    let dsfb_w = weights.fspeed.dsfb as f64;
    for finger in Finger::ALL {
        let positions = match layout.fingermap.get(&finger) {
            Some(p) => p,
            None => continue,
        };
        let f = finger as usize;
        for i in 0..positions.len() {
            for j in i..positions.len() {
                let p1 = positions[i];
                let p2 = positions[j];
                let k1 = layout.grapheme_at(p1);
                let k2 = layout.grapheme_at(p2);

                let mut sfb = data.bigram(&format!("{k1}{k2}")) as f64;
                let mut dsfb = data.skipgram(&format!("{k1}{k2}"));
                if i != j {
                    sfb += data.bigram(&format!("{k2}{k1}")) as f64;
                    dsfb += data.skipgram(&format!("{k2}{k1}"));
                }

                let dist = two_key_dist(p1, p2, true, flags, weights) + 2.0 * weights.fspeed.key_travel as f64;
                speeds[f] += (sfb_w * sfb + dsfb_w * dsfb) * dist;
            }
        }
        if weighted {
            speeds[f] /= weights.fspeed.kps[f] as f64;
        }
        speeds[f] = 800.0 * speeds[f] / layout.total;
    }
    speeds
}

/// Same traversal as `finger_speed`, but subtracts the heaviest SFB pair per
/// position and re-adds only its DSFB term, modeling a dynamic-completion
/// key that can resolve the heaviest same-finger bigram.
pub fn dynamic_finger_speed(layout: &Layout, data: &TextData, weights: &WeightsConfig, flags: &Flags, weighted: bool) -> [f64; 8] {
    let mut speeds = [0.0; 8];
    let sfb_w = weights.fspeed.sfb as f64;
    let dsfb_w = weights.fspeed.dsfb as f64;
    for finger in Finger::ALL {
        let positions = match layout.fingermap.get(&finger) {
            Some(p) => p,
            None => continue,
        };
        let f = finger as usize;
        for i in 0..positions.len() {
            let mut highest_sfb = 0.0;
            let mut highest_dsfb = 0.0;
            let mut highest_dist = 0.0;
            let mut highest_speed = 0.0;
            for j in 0..positions.len() {
                let p1 = positions[i];
                let p2 = positions[j];
                let k1 = layout.grapheme_at(p1);
                let k2 = layout.grapheme_at(p2);

                let sfb = data.bigram(&format!("{k1}{k2}")) as f64;
                let dsfb = data.skipgram(&format!("{k1}{k2}"));

                let dist = two_key_dist(p1, p2, true, flags, weights) + 2.0 * weights.fspeed.key_travel as f64;
                let speed = (sfb_w * sfb + dsfb_w * dsfb) * dist;
                if sfb > highest_sfb {
                    highest_sfb = sfb;
                    highest_dsfb = dsfb;
                    highest_dist = dist;
                    highest_speed = speed;
                }
                speeds[f] += speed;
            }
            let replacement = dsfb_w * highest_dsfb * highest_dist;
            speeds[f] -= highest_speed;
            speeds[f] += replacement;
        }
        if weighted {
            speeds[f] /= weights.fspeed.kps[f] as f64;
        }
        speeds[f] = 800.0 * speeds[f] / layout.total;
    }
    speeds
}

/// Sum over same-finger pairs (`i != j`, both directions).
pub fn sfbs(layout: &Layout, data: &TextData, skipgrams: bool) -> f64 {
    let mut count = 0.0;
    for positions in layout.fingermap.values() {
        for i in 0..positions.len() {
            for j in i..positions.len() {
                if i == j {
                    continue;
                }
                let k1 = layout.grapheme_at(positions[i]);
                let k2 = layout.grapheme_at(positions[j]);
                if !skipgrams {
                    count += (data.bigram(&format!("{k1}{k2}")) + data.bigram(&format!("{k2}{k1}"))) as f64;
                } else {
                    count += data.skipgram(&format!("{k1}{k2}")) + data.skipgram(&format!("{k2}{k1}"));
                }
            }
        }
    }
    count
}

pub fn dynamic_sfbs(layout: &Layout, data: &TextData) -> f64 {
    let mut count = 0.0;
    for positions in layout.fingermap.values() {
        for i in 0..positions.len() {
            let mut highest = 0.0;
            for j in 0..positions.len() {
                if i == j {
                    continue;
                }
                let k1 = layout.grapheme_at(positions[i]);
                let k2 = layout.grapheme_at(positions[j]);
                let sfb = data.bigram(&format!("{k1}{k2}")) as f64;
                if sfb > highest {
                    highest = sfb;
                }
                count += sfb;
            }
            count -= highest;
        }
    }
    count
}

/// Lateral Stretch Bigrams: the four adjacent-finger pairs (LI-LM, RI-RM,
/// LP-LR, RP-RR) whose horizontal key gap is at least 2.
pub fn lsbs(layout: &Layout, data: &TextData, flags: &Flags) -> u64 {
    const PAIRS: [(Finger, Finger); 4] = [
        (Finger::LeftIndex, Finger::LeftMiddle),
        (Finger::RightIndex, Finger::RightMiddle),
        (Finger::LeftPinky, Finger::LeftRing),
        (Finger::RightPinky, Finger::RightRing),
    ];
    let mut count = 0u64;
    for (fa, fb) in PAIRS {
        let empty = Vec::new();
        let pa = layout.fingermap.get(&fa).unwrap_or(&empty);
        let pb = layout.fingermap.get(&fb).unwrap_or(&empty);
        for &p1 in pa {
            for &p2 in pb {
                let dist = if flags.stagger {
                    (staggered_x(p1.col, p1.row) - staggered_x(p2.col, p2.row)).abs()
                } else {
                    (p1.col as isize - p2.col as isize).abs() as f64
                };
                if dist >= 2.0 {
                    let k1 = layout.grapheme_at(p1);
                    let k2 = layout.grapheme_at(p2);
                    count += data.bigram(&format!("{k1}{k2}"));
                    count += data.bigram(&format!("{k2}{k1}"));
                }
            }
        }
    }
    count
}

/// Trigram hand-pattern classification totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrigramValues {
    pub left_inward_rolls: u64,
    pub left_outward_rolls: u64,
    pub right_inward_rolls: u64,
    pub right_outward_rolls: u64,
    pub alternates: u64,
    pub onehands: u64,
    pub redirects: u64,
    pub total: u64,
}

impl TrigramValues {
    pub fn roll_categories(&self) -> u64 {
        self.left_inward_rolls + self.left_outward_rolls + self.right_inward_rolls + self.right_outward_rolls
    }
}

/// Classifies the prefix of `top_trigrams` of length `min(len, precision)`
/// (`precision == 0` uses the full list). Trigrams containing a grapheme not
/// present on the layout are skipped.
pub fn fast_trigrams(layout: &Layout, data: &TextData, precision: usize) -> TrigramValues {
    let mut tgs = TrigramValues::default();
    let precision = if precision == 0 { data.top_trigrams.len() } else { precision };
    for (ngram, count) in data.top_trigrams_prefix(precision) {
        let chars: Vec<char> = ngram.chars().collect();
        if chars.len() != 3 {
            continue;
        }
        let (k1, k2, k3) = (chars[0].to_string(), chars[1].to_string(), chars[2].to_string());
        let (Some(&p1), Some(&p2), Some(&p3)) = (
            layout.keymap.get(&k1),
            layout.keymap.get(&k2),
            layout.keymap.get(&k3),
        ) else {
            continue;
        };
        let (Some(f1), Some(f2), Some(f3)) = (
            layout.finger_at(p1),
            layout.finger_at(p2),
            layout.finger_at(p3),
        ) else {
            continue;
        };

        tgs.total += *count;

        if f1 == f2 || f2 == f3 {
            continue;
        }

        let h1 = f1.is_left();
        let h2 = f2.is_left();
        let h3 = f3.is_left();

        if h1 == h2 && h2 == h3 {
            let dir1 = f1 < f2;
            let dir2 = f2 < f3;
            if dir1 == dir2 {
                tgs.onehands += *count;
            } else {
                tgs.redirects += *count;
            }
        } else if h1 != h2 && h2 != h3 {
            tgs.alternates += *count;
        } else {
            let roll_hand_is_right = !h2;
            let roll_first_is_h1 = h1 == h2;
            let (first, second) = if roll_first_is_h1 { (f1, f2) } else { (f2, f3) };
            if !roll_hand_is_right {
                if first < second {
                    tgs.left_inward_rolls += *count;
                } else {
                    tgs.left_outward_rolls += *count;
                }
            } else if first > second {
                tgs.right_inward_rolls += *count;
            } else {
                tgs.right_outward_rolls += *count;
            }
        }
    }
    tgs
}

/// Every same-finger bigram (or skipgram) ngram and its raw corpus count,
/// unsorted; callers sort descending for display. Unlike `sfbs`, `i==j` is
/// skipped but reversed pairs are listed separately rather than folded
/// together, since this feeds a per-ngram report rather than a scalar sum.
pub fn list_sfbs(layout: &Layout, data: &TextData, skipgrams: bool) -> Vec<(String, f64)> {
    let mut list = Vec::new();
    for positions in layout.fingermap.values() {
        for &p1 in positions {
            for &p2 in positions {
                if p1 == p2 {
                    continue;
                }
                let k1 = layout.grapheme_at(p1);
                let k2 = layout.grapheme_at(p2);
                let ngram = format!("{k1}{k2}");
                let count = if skipgrams { data.skipgram(&ngram) } else { data.bigram(&ngram) as f64 };
                list.push((ngram, count));
            }
        }
    }
    list
}

/// Every same-finger bigram ranked by its contribution to that finger's
/// weighted speed cost (not raw frequency), for the `bigrams` report.
pub fn list_worst_bigrams(layout: &Layout, data: &TextData, weights: &WeightsConfig, flags: &Flags) -> Vec<(String, f64)> {
    let sfb_w = weights.fspeed.sfb as f64;
    let dsfb_w = weights.fspeed.dsfb as f64;
    let mut list = Vec::new();
    for (&finger, positions) in &layout.fingermap {
        let f = finger as usize;
        for i in 0..positions.len() {
            for j in i..positions.len() {
                let p1 = positions[i];
                let p2 = positions[j];
                let k1 = layout.grapheme_at(p1);
                let k2 = layout.grapheme_at(p2);

                let mut sfb = data.bigram(&format!("{k1}{k2}")) as f64;
                let mut dsfb = data.skipgram(&format!("{k1}{k2}"));
                if i != j {
                    sfb += data.bigram(&format!("{k2}{k1}")) as f64;
                    dsfb += data.skipgram(&format!("{k2}{k1}"));
                }

                let dist = two_key_dist(p1, p2, true, flags, weights) + 2.0 * weights.fspeed.key_travel as f64;
                let cost = 100.0 * ((sfb_w * sfb + dsfb_w * dsfb) * dist) / weights.fspeed.kps[f] as f64;
                list.push((format!("{k1}{k2}"), cost));
            }
        }
    }
    list
}

/// Every LSB ngram (both directions, across all four adjacent-finger pairs)
/// and its raw corpus count, for the `lsbs` report.
pub fn list_lsbs(layout: &Layout, data: &TextData, flags: &Flags) -> Vec<(String, f64)> {
    const PAIRS: [(Finger, Finger); 4] = [
        (Finger::LeftIndex, Finger::LeftMiddle),
        (Finger::RightIndex, Finger::RightMiddle),
        (Finger::LeftPinky, Finger::LeftRing),
        (Finger::RightPinky, Finger::RightRing),
    ];
    let mut list = Vec::new();
    for (fa, fb) in PAIRS {
        let empty = Vec::new();
        let pa = layout.fingermap.get(&fa).unwrap_or(&empty);
        let pb = layout.fingermap.get(&fb).unwrap_or(&empty);
        for &p1 in pa {
            for &p2 in pb {
                let dist = if flags.stagger {
                    (staggered_x(p1.col, p1.row) - staggered_x(p2.col, p2.row)).abs()
                } else {
                    (p1.col as isize - p2.col as isize).abs() as f64
                };
                if dist >= 2.0 {
                    let k1 = layout.grapheme_at(p1);
                    let k2 = layout.grapheme_at(p2);
                    list.push((format!("{k1}{k2}"), data.bigram(&format!("{k1}{k2}")) as f64));
                    list.push((format!("{k2}{k1}"), data.bigram(&format!("{k2}{k1}")) as f64));
                }
            }
        }
    }
    list
}

/// Fraction of `total` typed by the two index fingers, as percentages.
pub fn index_usage(layout: &Layout, data: &TextData) -> (f64, f64) {
    let empty = Vec::new();
    let left: u64 = layout
        .fingermap
        .get(&Finger::LeftIndex)
        .unwrap_or(&empty)
        .iter()
        .map(|&p| data.letter(layout.grapheme_at(p)))
        .sum();
    let right: u64 = layout
        .fingermap
        .get(&Finger::RightIndex)
        .unwrap_or(&empty)
        .iter()
        .map(|&p| data.letter(layout.grapheme_at(p)))
        .sum();
    (100.0 * left as f64 / layout.total, 100.0 * right as f64 / layout.total)
}
