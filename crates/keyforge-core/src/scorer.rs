// ===== keyforge-core/src/scorer.rs =====
//! Weighted linear combination of the C3 metrics into a single scalar cost.
//! Lower is better; every comparison in the optimizer relies on this
//! convention.

use crate::config::Config;
use crate::corpus::TextData;
use crate::layout::Layout;
use crate::metrics::{self, Flags};
use std::sync::atomic::{AtomicU64, Ordering};

/// Evaluates layouts against a fixed corpus and config. Cheap to clone
/// (everything behind `Arc` in callers); holds no per-layout state.
pub struct Scorer<'a> {
    pub config: &'a Config,
    pub data: &'a TextData,
    /// Monotonic count of `score` calls, used only for progress display.
    pub analyzed: AtomicU64,
}

impl<'a> Scorer<'a> {
    pub fn new(config: &'a Config, data: &'a TextData) -> Self {
        Self {
            config,
            data,
            analyzed: AtomicU64::new(0),
        }
    }

    /// Pure function of `(layout, corpus, config, flags)`. Deterministic
    /// across repeated calls with no intervening mutation.
    pub fn score(&self, layout: &Layout, flags: &Flags) -> f64 {
        self.analyzed.fetch_add(1, Ordering::Relaxed);
        let weights = &self.config.weights;
        let score_weights = &weights.score;
        let mut total = 0.0;

        if score_weights.fspeed != 0.0 {
            let speeds = if flags.dynamic {
                metrics::dynamic_finger_speed(layout, self.data, weights, flags, true)
            } else {
                metrics::finger_speed(layout, self.data, weights, flags, true)
            };
            let sum: f64 = speeds.iter().sum();
            total += sum * score_weights.fspeed as f64;
        }

        if score_weights.lsb != 0.0 {
            let count = metrics::lsbs(layout, self.data, flags) as f64;
            total += 100.0 * count / layout.total * score_weights.lsb as f64;
        }

        if score_weights.trigrams.enabled {
            let tg = metrics::fast_trigrams(layout, self.data, score_weights.trigrams.precision);
            let t = tg.total as f64;
            if t > 0.0 {
                let deficit = |weight: f32, count: u64| -> f64 {
                    weight as f64 * (100.0 - 100.0 * count as f64 / t)
                };
                total += deficit(score_weights.trigrams.onehand, tg.onehands);
                total += deficit(score_weights.trigrams.alternate, tg.alternates);
                total += deficit(score_weights.trigrams.roll_in_left, tg.left_inward_rolls);
                total += deficit(score_weights.trigrams.roll_out_left, tg.left_outward_rolls);
                total += deficit(score_weights.trigrams.roll_in_right, tg.right_inward_rolls);
                total += deficit(score_weights.trigrams.roll_out_right, tg.right_outward_rolls);
                total += score_weights.trigrams.redirect as f64 * 100.0 * tg.redirects as f64 / t;
            }
        }

        if score_weights.index_balance != 0.0 {
            let (left, right) = metrics::index_usage(layout, self.data);
            total += score_weights.index_balance as f64 * (right - left).abs();
        }

        total
    }

    pub fn analyzed(&self) -> u64 {
        self.analyzed.load(Ordering::Relaxed)
    }
}
