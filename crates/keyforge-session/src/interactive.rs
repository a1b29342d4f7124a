// ===== keyforge-session/src/interactive.rs =====
//! The `INTERACTIVE` sub-state: a cached layout plus pin grid and
//! swap-history slots, rendered into a `Framebuffer` after every command.

use crate::framebuffer::Framebuffer;
use keyforge_core::config::Config;
use keyforge_core::consts::{SWAP_HISTORY_SLOTS, WORSEN_SWAP_LIMIT};
use keyforge_core::corpus::TextData;
use keyforge_core::layout::{Layout, Position, RowWidths};
use keyforge_core::metrics::{self, Flags};
use keyforge_core::minimize::minimize_layout;
use keyforge_core::pins::{PinGrid, FREE};
use keyforge_core::scorer::Scorer;
use keyforge_core::suggest::suggest_swaps;
use keyforge_protocol::{ColumnRef, InteractiveCommand};

/// Ergonomic default: pins the punctuation/number-row-adjacent positions of
/// the 33-key template, trimmed to whatever row widths the loaded layout
/// actually has.
const PIN_TEMPLATE: [[&str; 12]; 3] = [
    ["@", "#", "#", "#", "@", "@", "#", "#", "#", "@", "#", "#"],
    ["#", "#", "#", "#", "@", "@", "#", "#", "#", "#", "#", "@"],
    ["@", "@", "@", "@", "@", "@", "@", "@", "@", "@", "@", "@"],
];

fn builtin_pins(widths: RowWidths) -> PinGrid {
    let rows = (0..3)
        .map(|row| {
            (0..widths.0[row])
                .map(|col| PIN_TEMPLATE[row].get(col).copied().unwrap_or(FREE).to_string())
                .collect()
        })
        .collect();
    PinGrid(rows)
}

pub struct InteractiveState {
    pub layout: Layout,
    pub pins: PinGrid,
    pub aswaps: [Position; SWAP_HISTORY_SLOTS],
    pub bswaps: [Position; SWAP_HISTORY_SLOTS],
    pub swapnum: usize,
    pub layout_width: usize,
    pub threshold: f64,
    pub framebuffer: Framebuffer,
}

impl InteractiveState {
    pub fn new(layout: Layout) -> Self {
        let layout_width = layout.widths.0.iter().copied().max().unwrap_or(1) - 1;
        let pins = builtin_pins(layout.widths);
        Self {
            pins,
            aswaps: [Position::new(0, 0); SWAP_HISTORY_SLOTS],
            bswaps: [Position::new(0, 0); SWAP_HISTORY_SLOTS],
            swapnum: 0,
            layout_width,
            threshold: 0.0,
            framebuffer: Framebuffer::new(true),
            layout,
        }
    }
}

/// Renders the initial interactive screen right after entering the mode.
pub fn initial_render(state: &mut InteractiveState, data: &TextData, scorer: &Scorer, flags: &Flags) -> String {
    state.framebuffer.clear();
    render(state, data, scorer, flags, std::time::Instant::now());
    state.framebuffer.flush_and_trim()
}

/// Runs one interactive command against `state`, mutating the cached layout
/// and swap history, then re-renders the full screen. Returns the rendered
/// frame and whether the session should leave `INTERACTIVE` afterward.
pub fn dispatch(
    state: &mut InteractiveState,
    cmd: InteractiveCommand,
    config: &mut Config,
    data: &TextData,
    flags: &Flags,
) -> (String, bool) {
    state.framebuffer.clear();
    let start = std::time::Instant::now();
    let mut message: Vec<String> = Vec::new();
    let mut quit = false;

    // `ToggleTrigrams` is the only arm that mutates `config`; every other
    // arm only reads it through a freshly built `Scorer`. Splitting it out
    // keeps the mutable and immutable borrows of `config` from overlapping.
    if let InteractiveCommand::ToggleTrigrams = cmd {
        let enabled = &mut config.weights.score.trigrams.enabled;
        *enabled = !*enabled;
        message.push(format!("{} trigrams", if *enabled { "enabled" } else { "disabled" }));
    } else {
        let scorer = Scorer::new(config, data);
        match cmd {
            InteractiveCommand::ToggleTrigrams => unreachable!(),
            InteractiveCommand::Swap { k1, k2 } => {
                match (state.layout.keymap.get(&k1).copied(), state.layout.keymap.get(&k2).copied()) {
                    (Some(p1), Some(p2)) => {
                        state.layout.swap(p1, p2);
                        state.aswaps[0] = p1;
                        state.bswaps[0] = p2;
                        state.swapnum = 1;
                        message.push(format!("swapped {k1}({},{}) with {k2}({},{})", p1.col, p1.row, p2.col, p2.row));
                    }
                    _ => message.push(format!("unknown key {k1:?} or {k2:?}")),
                }
            }
            InteractiveCommand::ColumnSwap { x, y } => {
                let resolve = |r: &ColumnRef| -> Option<usize> {
                    match r {
                        ColumnRef::Index(n) => Some(*n),
                        ColumnRef::Grapheme(g) => state.layout.keymap.get(g).map(|p| p.col),
                    }
                };
                match (resolve(&x), resolve(&y)) {
                    (Some(c1), Some(c2)) => {
                        for r in 0..3 {
                            if c1 >= state.layout.widths.0[r] || c2 >= state.layout.widths.0[r] {
                                continue;
                            }
                            let p1 = Position::new(c1, r);
                            let p2 = Position::new(c2, r);
                            state.layout.swap(p1, p2);
                            state.aswaps[r] = p1;
                            state.bswaps[r] = p2;
                        }
                        state.swapnum = 3;
                        message.push(format!("swapped c{c1} with c{c2}"));
                    }
                    _ => message.push("unknown column reference".to_string()),
                }
            }
            InteractiveCommand::Undo => {
                for i in 0..state.swapnum {
                    state.layout.swap(state.aswaps[i], state.bswaps[i]);
                }
                message.push("reverted last swap".to_string());
            }
            InteractiveCommand::Suggest { max_depth } => {
                let max = max_depth.unwrap_or(1);
                state.threshold = 0.0;
                match suggest_swaps(&state.layout, &scorer, flags, max, state.threshold) {
                    Some(s) => {
                        let k1 = state.layout.grapheme_at(s.pair.0);
                        let k2 = state.layout.grapheme_at(s.pair.1);
                        message.push(format!(
                            "try {k1}{k2} ({:.1} immediate, {:.1} potential)",
                            s.immediate_score, s.potential_score
                        ));
                    }
                    None => message.push("no suggestion".to_string()),
                }
            }
            InteractiveCommand::Worsen => {
                let mut rng = fastrand::Rng::new();
                worsen(&mut state.layout, &state.pins, &mut rng);
            }
            InteractiveCommand::Minimize { recursion } => {
                minimize_layout(&mut state.layout, &state.pins, recursion as usize, true, &scorer, flags);
            }
            InteractiveCommand::Quit => {
                quit = true;
            }
            InteractiveCommand::Save => {
                message.push("Unsupported feature in demo mode".to_string());
            }
        }
    }

    let scorer = Scorer::new(config, data);
    print_message(&mut state.framebuffer, &message);
    render(state, data, &scorer, flags, start);
    let frame = state.framebuffer.flush_and_trim();
    (frame, quit)
}

fn print_message(fb: &mut Framebuffer, lines: &[String]) {
    let base = fb.height().saturating_sub(2);
    let n = lines.len();
    for (i, line) in lines.iter().enumerate() {
        let offset = n - 1 - i;
        fb.move_cursor(0, base.saturating_sub(offset));
        fb.print(line);
    }
}

/// Randomly performs up to `WORSEN_SWAP_LIMIT` eligible swaps, respecting
/// the pin grid and whichever row widths the layout actually has.
fn worsen(layout: &mut Layout, pins: &PinGrid, rng: &mut fastrand::Rng) {
    let klen: usize = layout.widths.0.iter().sum();
    let mut done = 0;
    while done < WORSEN_SWAP_LIMIT {
        let x = rng.usize(0..klen);
        let y = rng.usize(0..klen);
        if x == y {
            continue;
        }
        let (Some(p1), Some(p2)) = (index_to_pos(layout.widths, x), index_to_pos(layout.widths, y)) else {
            continue;
        };
        if pins.is_pinned(p1) || pins.is_pinned(p2) {
            continue;
        }
        let k1 = layout.grapheme_at(p1).to_string();
        let k2 = layout.grapheme_at(p2).to_string();
        let pin1 = pins.at(p1);
        let pin2 = pins.at(p2);
        if pin1 == k1 || pin1 == k2 || pin2 == k1 || pin2 == k2 {
            continue;
        }
        layout.swap(p1, p2);
        done += 1;
    }
}

fn index_to_pos(widths: RowWidths, idx: usize) -> Option<Position> {
    let mut remaining = idx;
    for (row, &w) in widths.0.iter().enumerate() {
        if remaining < w {
            return Some(Position::new(remaining, row));
        }
        remaining -= w;
    }
    None
}

fn freq_ansi(grapheme: &str, count: u64, total: f64) -> String {
    let freq = count as f64 / (total * 1.2);
    let pc = freq / 0.1;
    let log = (1.0 + pc).ln() * 255.0;
    let base = (0.3_f64 * 255.0).round();
    let r = (0.6 * base + log).clamp(0.0, 255.0) as u8;
    let g = (base + log).clamp(0.0, 255.0) as u8;
    format!("\x1b[38;2;{r};{g};{g}m{grapheme}\x1b[0m")
}

fn print_layout(fb: &mut Framebuffer, layout: &Layout, data: &TextData) {
    for (row, keys) in layout.keys.iter().enumerate() {
        for (col, k) in keys.iter().enumerate() {
            let styled = freq_ansi(k, data.letter(k), layout.total);
            fb.move_cursor(1 + 2 * col, 2 + row);
            fb.print_styled(k, Some(&styled));
        }
    }
}

fn print_sfbs(fb: &mut Framebuffer, layout: &Layout, data: &TextData, layout_width: usize) {
    let mut list = metrics::list_sfbs(layout, data, false);
    list.sort_by(|a, b| b.1.total_cmp(&a.1));
    let rate = metrics::sfbs(layout, data, false);
    let col = 4 + layout_width * 2;
    fb.move_cursor(col, 1);
    fb.print(&format!("SFBs {:.2}%", 100.0 * rate / layout.total));
    for i in 0..5 {
        fb.move_cursor(col, 2 + i);
        let a = list.get(2 * i).map(|(n, _)| n.as_str()).unwrap_or("--");
        let b = list.get(2 * i + 1).map(|(n, _)| n.as_str()).unwrap_or("--");
        fb.print(&format!(" {a} {b}"));
    }
}

fn print_worst(fb: &mut Framebuffer, layout: &Layout, data: &TextData, config: &Config, flags: &Flags, layout_width: usize) {
    let mut list = metrics::list_worst_bigrams(layout, data, &config.weights, flags);
    list.sort_by(|a, b| b.1.total_cmp(&a.1));
    let col = 3 + layout_width * 2 + 13;
    fb.move_cursor(col, 1);
    fb.print("Worst BGs");
    for i in 0..5 {
        fb.move_cursor(col, 2 + i);
        let a = list.get(2 * i).map(|(n, _)| n.as_str()).unwrap_or("--");
        let b = list.get(2 * i + 1).map(|(n, _)| n.as_str()).unwrap_or("--");
        fb.print(&format!(" {a} {b}"));
    }
}

fn print_trigrams(fb: &mut Framebuffer, layout: &Layout, data: &TextData) {
    let tg = metrics::fast_trigrams(layout, data, 0);
    let total = (tg.roll_categories() + tg.alternates + tg.onehands + tg.redirects) as f64;
    fb.move_cursor(1, 7);
    fb.print("Trigrams");
    fb.move_cursor(1, 8);
    if total <= 0.0 {
        return;
    }
    let categories: [(f64, (u8, u8, u8)); 4] = [
        (tg.roll_categories() as f64, (166, 188, 220)),
        (tg.alternates as f64, (162, 136, 227)),
        (tg.onehands as f64, (217, 90, 120)),
        (tg.redirects as f64, (45, 167, 130)),
    ];
    let mut x = 0usize;
    let mut y = 0usize;
    for (count, (r, g, b)) in categories {
        let mut pc = (100.0 * count / total).ceil();
        let styled = format!("\x1b[38;2;{r};{g};{b}m=\x1b[0m");
        while pc > 0.0 {
            fb.print_styled("=", Some(&styled));
            x += 1;
            pc -= 1.0;
            if x > 19 {
                fb.move_cursor_down(1);
                fb.move_cursor_backward(x);
                x = 0;
                y += 1;
                if y > 4 {
                    break;
                }
            }
        }
    }
}

/// Port of `printUpdatedLayout`: the layout grid, score, SFB/worst-bigram
/// side panels, trigram bar chart, an elapsed-time stamp, and a final
/// cursor move to the bottom-left `:` prompt position.
fn render(state: &mut InteractiveState, data: &TextData, scorer: &Scorer, flags: &Flags, start: std::time::Instant) {
    let fb = &mut state.framebuffer;
    fb.move_cursor(0, 0);
    fb.print(&state.layout.name.clone());
    print_layout(fb, &state.layout, data);
    fb.move_cursor(1, 5);
    fb.print(&format!("Score: {:.2}", scorer.score(&state.layout, flags)));
    print_sfbs(fb, &state.layout, data, state.layout_width);
    print_worst(fb, &state.layout, data, scorer.config, flags, state.layout_width);
    print_trigrams(fb, &state.layout, data);

    let stamp = format!("{}ms", start.elapsed().as_millis());
    fb.move_cursor(fb.width().saturating_sub(stamp.len()), 1);
    fb.print(&stamp);

    fb.move_cursor(0, fb.height() - 1);
    fb.print(":");
}
