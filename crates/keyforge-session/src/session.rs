// ===== keyforge-session/src/session.rs =====
//! Per-connection state machine: `NORMAL` command dispatch plus the
//! `INTERACTIVE` sub-state. Config, corpus, and the layouts map are re-read
//! from disk before every `NORMAL`-mode command (never while interactive),
//! per the session's external read contract.

use crate::error::{SessionError, SessionResult};
use crate::interactive::{self, InteractiveState};
use crate::reports;
use keyforge_core::config::Config;
use keyforge_core::corpus::TextData;
use keyforge_core::error::KeyForgeError;
use keyforge_core::layout::Layout;
use keyforge_core::metrics::Flags;
use keyforge_core::optimizer::progress::{ProgressCallback, Stage};
use keyforge_core::optimizer::{GenerationTemplate, OptimizationSummary, Optimizer};
use keyforge_core::scorer::Scorer;
use keyforge_protocol::{take_flags, NormalCommand, Sentinel};
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

const HELP_TEXT: &str = "\
commands: load rank analyze interactive generate improve heatmap \
sfbs dsfbs lsbs speed bigrams ngram version help\n\
flags (leading): --stagger --colstagger --slide --dynamic\n\
interactive: t s cs r g w m m2 q save";

/// Per-connection state: the session-wide reads (config/corpus/layouts), a
/// generated-fingering template for `improve`, session flags, and an
/// optional interactive sub-state. `NORMAL`-mode commands re-read the three
/// disk-backed inputs before running; `INTERACTIVE` never does.
pub struct Session {
    root: PathBuf,
    config: Config,
    data: TextData,
    layouts: HashMap<String, Layout>,
    template: GenerationTemplate,
    flags: Flags,
    interactive: Option<InteractiveState>,
    progress_sink: Arc<Mutex<dyn Write + Send>>,
}

/// Streams a one-line progress frame to the peer at the optimizer's 1 Hz
/// sampling rate. Runs on the reporter thread the optimizer spawns, never
/// on a worker thread.
struct SessionProgress {
    sink: Arc<Mutex<dyn Write + Send>>,
}

impl ProgressCallback for SessionProgress {
    fn on_progress(&self, stage: Stage, active_workers: u64, analyzed_per_sec: u64) {
        let label = match stage {
            Stage::Greedy => "greedy",
            Stage::FullImprove => "full-improve",
        };
        let mut sink = self.sink.lock().unwrap();
        let _ = writeln!(sink, "progress stage={label} workers={active_workers} rate={analyzed_per_sec}/s");
        let _ = sink.flush();
    }
}

impl Session {
    /// Opens a new session rooted at `root` (the fixed relative path
    /// `config.toml`/corpora/layouts are read under) and writing progress
    /// frames to `sink`.
    pub fn new(root: impl Into<PathBuf>, sink: impl Write + Send + 'static) -> SessionResult<Self> {
        let root = root.into();
        let mut session = Session {
            root,
            config: Config::default(),
            data: TextData::default(),
            layouts: HashMap::new(),
            template: placeholder_template(),
            flags: Flags::default(),
            interactive: None,
            progress_sink: Arc::new(Mutex::new(sink)),
        };
        session.reload()?;
        Ok(session)
    }

    fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Re-reads `config.toml`, the corpus named by it, and the layouts
    /// directory. Called once at session start and before every
    /// `NORMAL`-mode command.
    fn reload(&mut self) -> SessionResult<()> {
        let config_path = self.path("config.toml");
        self.config = Config::load(&config_path)?;
        info!(path = ?config_path, "reloaded config");

        let corpus_path = self
            .path(&self.config.paths.corpora)
            .join(format!("{}.json", self.config.corpus.name));
        self.data = TextData::load(&corpus_path)?;
        info!(path = ?corpus_path, "reloaded corpus");

        let layouts_dir = self.path(&self.config.paths.layouts);
        let (layouts, template) = load_layouts(&layouts_dir, &self.data)?;
        self.layouts = layouts;
        self.template = template;
        info!(dir = ?layouts_dir, count = self.layouts.len(), "reloaded layouts");
        Ok(())
    }

    fn find_layout(&self, name: &str) -> SessionResult<&Layout> {
        self.layouts
            .get(&name.to_lowercase())
            .ok_or_else(|| SessionError::UnknownLayout(name.to_string()))
    }

    /// Runs one inbound command line to completion and returns the full
    /// outbound text, sentinel lines included.
    pub fn handle_line(&mut self, line: &str) -> String {
        if let Some(state) = self.interactive.take() {
            return self.handle_interactive_line(state, line);
        }
        self.handle_normal_line(line)
    }

    fn handle_normal_line(&mut self, line: &str) -> String {
        if let Err(e) = self.reload() {
            warn!(error = %e, "reload failed");
            return format!("error: {e}\n{}", Sentinel::Done);
        }

        let (flag_set, tokens) = match take_flags(line) {
            Ok(v) => v,
            Err(e) => return format!("{e}\n{}", Sentinel::Done),
        };
        // `--stagger`/`--colstagger` only ever turn the setting on; a config
        // that already enables it is never overridden by the flag's absence.
        self.flags.stagger = flag_set.stagger || self.config.weights.stagger;
        self.flags.col_stagger = flag_set.col_stagger || self.config.weights.col_stagger;
        self.flags.slide = flag_set.slide;
        self.flags.dynamic = flag_set.dynamic;

        if tokens.is_empty() {
            return format!("empty command line\n{}", Sentinel::Done);
        }
        let cmd = match keyforge_protocol::parse_normal(&tokens) {
            Ok(c) => c,
            Err(e) => return format!("{e}\n{}", Sentinel::Done),
        };

        match self.run_normal(cmd) {
            Ok(Outcome::Text(body)) => format!("{body}\n{}", Sentinel::Done),
            Ok(Outcome::EnterInteractive(frame)) => {
                format!("{}\n{frame}\n{}", Sentinel::Clear, Sentinel::Hold)
            }
            Err(e) => {
                warn!(error = %e, "command failed");
                format!("error: {e}\n{}", Sentinel::Done)
            }
        }
    }

    fn handle_interactive_line(&mut self, mut state: InteractiveState, line: &str) -> String {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let cmd = match keyforge_protocol::parse_interactive(&tokens) {
            Ok(c) => c,
            Err(e) => {
                self.interactive = Some(state);
                return format!("{e}\n{}", Sentinel::Hold);
            }
        };

        let (frame, quit) = interactive::dispatch(&mut state, cmd, &mut self.config, &self.data, &self.flags);
        if quit {
            format!("{frame}\n{}", Sentinel::Done)
        } else {
            self.interactive = Some(state);
            format!("{frame}\n{}", Sentinel::Hold)
        }
    }

    fn run_normal(&mut self, cmd: NormalCommand) -> SessionResult<Outcome> {
        match cmd {
            NormalCommand::Load { .. } => Ok(Outcome::Text("load is disabled in hosted mode".to_string())),
            NormalCommand::Heatmap { .. } => Ok(Outcome::Text("heatmap is disabled in hosted mode".to_string())),
            NormalCommand::Version => Ok(Outcome::Text(format!("keyforge-session {}", env!("CARGO_PKG_VERSION")))),
            NormalCommand::Help => Ok(Outcome::Text(HELP_TEXT.to_string())),

            NormalCommand::Rank => {
                let scorer = Scorer::new(&self.config, &self.data);
                let mut entries: Vec<(String, f64)> = self
                    .layouts
                    .values()
                    .map(|l| (l.name.clone(), scorer.score(l, &self.flags)))
                    .collect();
                entries.sort_by(|a, b| a.1.total_cmp(&b.1));
                Ok(Outcome::Text(reports::rank_table(&entries, &self.config.output.rank.spacer)))
            }

            NormalCommand::Analyze { layout } => {
                let l = self.find_layout(&layout)?;
                let scorer = Scorer::new(&self.config, &self.data);
                Ok(Outcome::Text(reports::analyze_report(l, &scorer, &self.data, &self.config, &self.flags)))
            }

            NormalCommand::Interactive { layout } => {
                let l = self.find_layout(&layout)?.deep_copy();
                let scorer = Scorer::new(&self.config, &self.data);
                let mut state = InteractiveState::new(l);
                let frame = interactive::initial_render(&mut state, &self.data, &scorer, &self.flags);
                self.interactive = Some(state);
                Ok(Outcome::EnterInteractive(frame))
            }

            NormalCommand::Generate => {
                let n = self.config.generation.initial_population;
                let summary = self.run_optimizer(n, None)?;
                Ok(Outcome::Text(generation_report(&summary)))
            }

            NormalCommand::Improve { layout } => {
                let base = self.find_layout(&layout)?.clone();
                // `improve` always seeds from a fixed population of 1000, unlike
                // `generate`, which uses the configured initial population.
                let summary = self.run_optimizer(1000, Some(&base))?;
                Ok(Outcome::Text(generation_report(&summary)))
            }

            NormalCommand::Sfbs { layout, n } => {
                let l = self.find_layout(&layout)?;
                Ok(Outcome::Text(reports::sfbs_table(l, &self.data, n.unwrap_or(self.config.output.analysis.top_ngrams))))
            }
            NormalCommand::Dsfbs { layout, n } => {
                let l = self.find_layout(&layout)?;
                Ok(Outcome::Text(reports::dsfbs_table(l, &self.data, n.unwrap_or(self.config.output.analysis.top_ngrams))))
            }
            NormalCommand::Lsbs { layout, n } => {
                let l = self.find_layout(&layout)?;
                Ok(Outcome::Text(reports::lsbs_table(l, &self.data, &self.flags, n.unwrap_or(self.config.output.analysis.top_ngrams))))
            }
            NormalCommand::Speed { layout } => {
                let l = self.find_layout(&layout)?;
                Ok(Outcome::Text(reports::speed_table(l, &self.data, &self.config, &self.flags)))
            }
            NormalCommand::Bigrams { layout, n } => {
                let l = self.find_layout(&layout)?;
                Ok(Outcome::Text(reports::bigrams_table(l, &self.data, &self.config, &self.flags, n.unwrap_or(self.config.output.misc.top_ngrams))))
            }
            NormalCommand::Ngram { ngram } => Ok(Outcome::Text(reports::ngram_line(&self.data, &ngram))),
        }
    }

    /// Builds a scorer and runs the five-stage optimizer pipeline, catching
    /// worker-thread panics rather than letting them tear down the session.
    fn run_optimizer(&self, n: usize, improve_layout: Option<&Layout>) -> SessionResult<OptimizationSummary> {
        let scorer = Scorer::new(&self.config, &self.data);
        let optimizer = Optimizer::new(&scorer, &self.config, &self.data, &self.template, self.flags);
        let progress = SessionProgress { sink: Arc::clone(&self.progress_sink) };
        std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| optimizer.run(n, improve_layout, &progress)))
            .map_err(|e| SessionError::Worker(panic_message(e)))
    }
}

enum Outcome {
    Text(String),
    EnterInteractive(String),
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn generation_report(summary: &OptimizationSummary) -> String {
    let mut out = String::from("top 3 after greedy stage:\n");
    for (layout, score) in &summary.top3 {
        out.push_str(&format!("  {} {:.2}\n", layout.name, score));
    }
    let best = summary.top3.first().map(|(_, s)| *s).unwrap_or(summary.winner_score);
    let pct = if best != 0.0 { 100.0 * (summary.winner_score - best) / best } else { 0.0 };
    out.push_str(&format!("\nwinner score: {:.2} ({pct:+.2}% vs best greedy candidate)\n", summary.winner_score));
    out
}

/// An empty template, used only to satisfy `Session`'s field before the
/// first `reload()` call replaces it with the one extracted from disk.
fn placeholder_template() -> GenerationTemplate {
    GenerationTemplate::from_layout(&Layout {
        name: String::new(),
        widths: keyforge_core::layout::RowWidths([0, 0, 0]),
        keys: vec![Vec::new(), Vec::new(), Vec::new()],
        keymap: HashMap::new(),
        fingermatrix: HashMap::new(),
        fingermap: HashMap::new(),
        total: 0.0,
    })
}

/// Reads every file directly under `dir`: the one whose name begins with
/// `_` seeds the generation template, the rest become the named layouts map
/// (keyed by lowercased name).
fn load_layouts(dir: &Path, data: &TextData) -> SessionResult<(HashMap<String, Layout>, GenerationTemplate)> {
    let mut layouts = HashMap::new();
    let mut template = None;

    let entries = fs::read_dir(dir).map_err(KeyForgeError::from)?;
    for entry in entries {
        let entry = entry.map_err(KeyForgeError::from)?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let text = fs::read_to_string(&path).map_err(KeyForgeError::from)?;
        let mut layout = Layout::load(&text, 0.0)?;
        layout.total = layout.keys.iter().flatten().map(|g| data.letter(g) as f64).sum();

        let filename = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        if filename.starts_with('_') {
            template = Some(GenerationTemplate::from_layout(&layout));
            continue;
        }
        layouts.insert(layout.name.to_lowercase(), layout);
    }

    let template = template.ok_or_else(|| {
        KeyForgeError::Config(format!(
            "no generated-fingering template (filename starting with `_`) found under {}",
            dir.display()
        ))
    })?;
    Ok((layouts, template))
}
