// ===== keyforge-core/src/optimizer/runner.rs =====
use crate::config::Config;
use crate::corpus::TextData;
use crate::layout::Layout;
use crate::metrics::Flags;
use crate::optimizer::full_improve::full_improve;
use crate::optimizer::greedy::greedy_improve;
use crate::optimizer::populate::{populate, GenerationTemplate};
use crate::optimizer::progress::{ProgressCallback, Stage};
use crate::optimizer::tidy::vertical_tidy;
use crate::scorer::Scorer;
use rayon::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

/// Result of a full populate -> greedy -> full-improve -> tidy pipeline.
pub struct OptimizationSummary {
    /// The three best candidates after the greedy stage, with their scores.
    pub top3: Vec<(Layout, f64)>,
    pub winner: Layout,
    pub winner_score: f64,
}

pub struct Optimizer<'a> {
    pub scorer: &'a Scorer<'a>,
    pub config: &'a Config,
    pub data: &'a TextData,
    pub template: &'a GenerationTemplate,
    pub flags: Flags,
}

impl<'a> Optimizer<'a> {
    pub fn new(scorer: &'a Scorer<'a>, config: &'a Config, data: &'a TextData, template: &'a GenerationTemplate, flags: Flags) -> Self {
        Self { scorer, config, data, template, flags }
    }

    /// Runs the five-stage pipeline: populate, greedy-improve, truncate to
    /// `generation.selection`, full-improve, vertical tidy.
    pub fn run<CB: ProgressCallback>(&self, n: usize, improve_layout: Option<&Layout>, callback: &CB) -> OptimizationSummary {
        let mut rng = fastrand::Rng::new();
        let mut candidates = populate(n, self.config, self.data, self.template, improve_layout, &mut rng);
        info!(n, "populated candidate layouts");

        self.run_stage(&mut candidates, Stage::Greedy, callback, |layout, rng| {
            greedy_improve(layout, self.scorer, &self.template.swap_possibilities, &self.flags, rng);
        });

        let mut scored: Vec<(Layout, f64)> = candidates
            .into_iter()
            .map(|l| {
                let s = self.scorer.score(&l, &self.flags);
                (l, s)
            })
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        let top3: Vec<(Layout, f64)> = scored.iter().take(3).cloned().collect();

        let selection = self.config.generation.selection.min(scored.len());
        scored.truncate(selection);
        info!(selection, "truncated population for full-improve stage");

        let mut candidates: Vec<Layout> = scored.into_iter().map(|(l, _)| l).collect();
        self.run_stage(&mut candidates, Stage::FullImprove, callback, |layout, rng| {
            full_improve(layout, self.scorer, &self.template.swap_possibilities, &self.flags, rng);
        });

        let mut scored: Vec<(Layout, f64)> = candidates
            .into_iter()
            .map(|l| {
                let s = self.scorer.score(&l, &self.flags);
                (l, s)
            })
            .collect();
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));

        let (mut winner, _) = scored.into_iter().next().expect("selection is non-empty");
        vertical_tidy(&mut winner, self.data);
        let winner_score = self.scorer.score(&winner, &self.flags);

        OptimizationSummary { top3, winner, winner_score }
    }

    fn run_stage<CB, F>(&self, candidates: &mut [Layout], stage: Stage, callback: &CB, work: F)
    where
        CB: ProgressCallback,
        F: Fn(&mut Layout, &mut fastrand::Rng) + Sync,
    {
        let active = AtomicU64::new(0);
        let done = AtomicU64::new(0);
        let started_analyzed = self.scorer.analyzed();

        std::thread::scope(|s| {
            s.spawn(|| {
                let mut last = started_analyzed;
                loop {
                    std::thread::sleep(Duration::from_secs(1));
                    if done.load(Ordering::Relaxed) == 1 {
                        break;
                    }
                    let now = self.scorer.analyzed();
                    callback.on_progress(stage, active.load(Ordering::Relaxed), now.saturating_sub(last));
                    last = now;
                }
            });

            candidates.par_iter_mut().for_each(|layout| {
                active.fetch_add(1, Ordering::Relaxed);
                let mut rng = fastrand::Rng::new();
                work(layout, &mut rng);
                active.fetch_sub(1, Ordering::Relaxed);
            });

            done.store(1, Ordering::Relaxed);
        });
    }
}
