// ===== keyforge-session/src/reports.rs =====
//! Table rendering for the `rank`/`analyze`/`sfbs`/`dsfbs`/`lsbs`/`speed`/
//! `bigrams`/`ngram` normal-mode commands. Every function returns a
//! finished string; callers push it through the framebuffer rather than
//! writing straight to the outbound channel (per the C8 rendering
//! boundary).

use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keyforge_core::config::Config;
use keyforge_core::corpus::TextData;
use keyforge_core::layout::{Finger, Layout};
use keyforge_core::metrics::{self, Flags};
use keyforge_core::scorer::Scorer;

fn base_table() -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL).set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align_all(table: &mut Table, from: usize) {
    let cols = table.column_count();
    for i in from..cols {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// Ascending-by-score ranking. `entries` must already be sorted. Each name is
/// right-padded with `spacer` repeated out to one past the longest name, so
/// the score column lines up regardless of name length.
pub fn rank_table(entries: &[(String, f64)], spacer: &str) -> String {
    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Score").fg(Color::Cyan),
    ]);
    right_align_all(&mut table, 1);
    let longest = entries.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);
    for (name, score) in entries {
        let pad = spacer.repeat(1 + longest - name.chars().count());
        table.add_row(vec![
            Cell::new(format!("{name}{pad}")),
            Cell::new(format!("{score:.2}")).fg(Color::Cyan),
        ]);
    }
    table.to_string()
}

/// Full per-layout analysis: score breakdown, SFB/DSFB/LSB rates, trigram
/// percentages, index balance, and any duplicate/missing graphemes.
pub fn analyze_report(layout: &Layout, scorer: &Scorer, data: &TextData, config: &Config, flags: &Flags) -> String {
    let weights = &config.weights;
    let score = scorer.score(layout, flags);

    let speeds = if flags.dynamic {
        metrics::dynamic_finger_speed(layout, data, weights, flags, true)
    } else {
        metrics::finger_speed(layout, data, weights, flags, true)
    };
    let sfb_rate = 100.0 * metrics::sfbs(layout, data, false) / layout.total;
    let dsfb_rate = 100.0 * metrics::sfbs(layout, data, true) / layout.total;
    let lsb_rate = 100.0 * metrics::lsbs(layout, data, flags) as f64 / layout.total;
    let tg = metrics::fast_trigrams(layout, data, weights.score.trigrams.precision);
    let (left_idx, right_idx) = metrics::index_usage(layout, data);
    let (dupes, missing) = layout.duplicates_and_missing();

    let mut out = String::new();
    out.push_str(&format!("{}\n", layout.name));
    out.push_str(&format!("Score: {score:.2}\n\n"));

    let mut summary = base_table();
    summary.add_row(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value"),
    ]);
    right_align_all(&mut summary, 1);
    summary.add_row(vec!["SFB%".to_string(), format!("{sfb_rate:.2}")]);
    summary.add_row(vec!["DSFB%".to_string(), format!("{dsfb_rate:.2}")]);
    summary.add_row(vec!["LSB%".to_string(), format!("{lsb_rate:.2}")]);
    summary.add_row(vec!["Index L%".to_string(), format!("{left_idx:.2}")]);
    summary.add_row(vec!["Index R%".to_string(), format!("{right_idx:.2}")]);
    if tg.total > 0 {
        let pct = |n: u64| 100.0 * n as f64 / tg.total as f64;
        summary.add_row(vec!["Onehand%".to_string(), format!("{:.2}", pct(tg.onehands))]);
        summary.add_row(vec!["Alternate%".to_string(), format!("{:.2}", pct(tg.alternates))]);
        summary.add_row(vec!["Roll%".to_string(), format!("{:.2}", pct(tg.roll_categories()))]);
        summary.add_row(vec!["Redirect%".to_string(), format!("{:.2}", pct(tg.redirects))]);
    }
    out.push_str(&summary.to_string());
    out.push('\n');

    let mut speed_tbl = base_table();
    speed_tbl.add_row(vec![
        Cell::new("Finger").add_attribute(Attribute::Bold),
        Cell::new("Speed"),
    ]);
    right_align_all(&mut speed_tbl, 1);
    for f in Finger::ALL {
        speed_tbl.add_row(vec![format!("{f:?}"), format!("{:.2}", speeds[f as usize])]);
    }
    out.push_str(&speed_tbl.to_string());

    if !dupes.is_empty() || !missing.is_empty() {
        out.push_str(&format!("\nduplicates: {dupes:?}\nmissing: {missing:?}\n"));
    }
    out
}

fn ngram_freq_table(title: &str, pairs: &mut [(String, f64)], n: usize, percent_of: f64) -> String {
    pairs.sort_by(|a, b| b.1.total_cmp(&a.1));
    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Ngram").add_attribute(Attribute::Bold),
        Cell::new(title).fg(Color::Red),
        Cell::new("%"),
    ]);
    right_align_all(&mut table, 1);
    for (ngram, count) in pairs.iter().take(n) {
        table.add_row(vec![
            Cell::new(ngram),
            Cell::new(format!("{count:.1}")),
            Cell::new(format!("{:.3}", 100.0 * count / percent_of)),
        ]);
    }
    table.to_string()
}

pub fn sfbs_table(layout: &Layout, data: &TextData, n: usize) -> String {
    let mut list = metrics::list_sfbs(layout, data, false);
    ngram_freq_table("SFB count", &mut list, n, layout.total)
}

pub fn dsfbs_table(layout: &Layout, data: &TextData, n: usize) -> String {
    let mut list = metrics::list_sfbs(layout, data, true);
    ngram_freq_table("DSFB count", &mut list, n, layout.total)
}

pub fn lsbs_table(layout: &Layout, data: &TextData, flags: &Flags, n: usize) -> String {
    let mut list = metrics::list_lsbs(layout, data, flags);
    ngram_freq_table("LSB count", &mut list, n, layout.total)
}

pub fn bigrams_table(layout: &Layout, data: &TextData, config: &Config, flags: &Flags, n: usize) -> String {
    let mut list = metrics::list_worst_bigrams(layout, data, &config.weights, flags);
    ngram_freq_table("cost", &mut list, n, 1.0)
}

/// Per-finger speed, weighted and unweighted side by side.
pub fn speed_table(layout: &Layout, data: &TextData, config: &Config, flags: &Flags) -> String {
    let weighted = metrics::finger_speed(layout, data, &config.weights, flags, true);
    let unweighted = metrics::finger_speed(layout, data, &config.weights, flags, false);
    let mut table = base_table();
    table.add_row(vec![
        Cell::new("Finger").add_attribute(Attribute::Bold),
        Cell::new("Weighted"),
        Cell::new("Unweighted"),
    ]);
    right_align_all(&mut table, 1);
    for f in Finger::ALL {
        table.add_row(vec![
            format!("{f:?}"),
            format!("{:.2}", weighted[f as usize]),
            format!("{:.2}", unweighted[f as usize]),
        ]);
    }
    table.to_string()
}

pub fn ngram_line(data: &TextData, ngram: &str) -> String {
    let (count, denom) = match ngram.chars().count() {
        1 => (data.letter(ngram) as f64, data.total),
        2 => (data.bigram(ngram) as f64, data.total_bigrams),
        3 => (data.trigram(ngram) as f64, data.total),
        n => return format!("ngram must be 1-3 characters, got {n}"),
    };
    if denom == 0.0 {
        format!("{ngram}: 0.000%")
    } else {
        format!("{ngram}: {:.3}%", 100.0 * count / denom)
    }
}
