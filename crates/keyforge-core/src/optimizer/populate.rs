// ===== keyforge-core/src/optimizer/populate.rs =====
use crate::config::Config;
use crate::corpus::TextData;
use crate::layout::{gen_keymap, Finger, Layout, Position, RowWidths};
use std::collections::HashMap;

/// The fingermap/fingermatrix/swap-allowed-positions extracted from the
/// `_`-prefixed placeholder layout file, used to seed every generated
/// candidate.
#[derive(Debug, Clone)]
pub struct GenerationTemplate {
    pub widths: RowWidths,
    pub fingermatrix: HashMap<Position, Finger>,
    pub fingermap: HashMap<Finger, Vec<Position>>,
    pub swap_possibilities: Vec<Position>,
}

impl GenerationTemplate {
    /// Extracts a template from a loaded placeholder layout; positions whose
    /// grapheme is `*` mark swap-eligible cells for `improve` mode.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut swap_possibilities = Vec::new();
        for pos in layout.positions() {
            if layout.grapheme_at(pos) == "*" {
                swap_possibilities.push(pos);
            }
        }
        Self {
            widths: layout.widths,
            fingermatrix: layout.fingermatrix.clone(),
            fingermap: layout.fingermap.clone(),
            swap_possibilities,
        }
    }
}

/// Creates `n` candidate layouts. With `improve_layout` set, each candidate
/// starts as a deep copy; otherwise each is a random permutation sampled
/// without replacement from `config.generation.generatedLayoutChars`.
pub fn populate(
    n: usize,
    config: &Config,
    data: &TextData,
    template: &GenerationTemplate,
    improve_layout: Option<&Layout>,
    rng: &mut fastrand::Rng,
) -> Vec<Layout> {
    (0..n)
        .map(|_| {
            if let Some(base) = improve_layout {
                base.deep_copy()
            } else {
                random_layout(config, data, template, rng)
            }
        })
        .collect()
}

fn random_layout(config: &Config, data: &TextData, template: &GenerationTemplate, rng: &mut fastrand::Rng) -> Layout {
    let mut chars: Vec<String> = config
        .generation
        .generated_layout_chars
        .chars()
        .map(|c| c.to_string())
        .collect();
    rng.shuffle(&mut chars);

    let total: f64 = chars.iter().map(|g| data.letter(g) as f64).sum();

    let widths = template.widths;
    let mut keys = vec![Vec::new(); 3];
    let mut chars_iter = chars.into_iter();
    for (row, width) in widths.0.iter().enumerate() {
        for _ in 0..*width {
            keys[row].push(chars_iter.next().unwrap_or_default());
        }
    }

    let keymap = gen_keymap(&keys);

    Layout {
        name: "generated".to_string(),
        widths,
        keys,
        keymap,
        fingermatrix: template.fingermatrix.clone(),
        fingermap: template.fingermap.clone(),
        total,
    }
}
