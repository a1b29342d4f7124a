// ===== keyforge-core/src/config.rs =====
use crate::error::{KeyForgeError, KfResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
    pub weights: WeightsConfig,
    pub generation: GenerationConfig,

    /// Consumed verbatim by the out-of-scope corpus builder; the core
    /// neither reads nor validates it.
    #[serde(rename = "corpusProcessing")]
    pub corpus_processing: toml::Value,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            corpus: CorpusConfig::default(),
            paths: PathsConfig::default(),
            output: OutputConfig::default(),
            weights: WeightsConfig::default(),
            generation: GenerationConfig::default(),
            corpus_processing: toml::Value::Table(toml::value::Table::default()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CorpusConfig {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub layouts: String,
    pub corpora: String,
    pub heatmap: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            layouts: "layouts".into(),
            corpora: "corpora".into(),
            heatmap: "heatmap".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub generation: GenerationOutputConfig,
    pub rank: RankOutputConfig,
    pub analysis: AnalysisOutputConfig,
    pub misc: MiscOutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenerationOutputConfig {
    pub heatmap: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOutputConfig {
    /// Repeated `1 + longest_name.len() - name.len()` times to right-align
    /// the score column in `rank`/`generate` output.
    pub spacer: String,
}

impl Default for RankOutputConfig {
    fn default() -> Self {
        Self { spacer: " ".to_string() }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOutputConfig {
    #[serde(rename = "topNgrams")]
    pub top_ngrams: usize,
}

impl Default for AnalysisOutputConfig {
    fn default() -> Self {
        Self { top_ngrams: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MiscOutputConfig {
    #[serde(rename = "topNgrams")]
    pub top_ngrams: usize,
}

impl Default for MiscOutputConfig {
    fn default() -> Self {
        Self { top_ngrams: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeightsConfig {
    pub stagger: bool,
    #[serde(rename = "colStagger")]
    pub col_stagger: bool,
    #[serde(rename = "colStaggers")]
    pub col_staggers: [f32; 10],
    pub fspeed: FSpeedWeights,
    pub dist: DistWeights,
    pub score: ScoreWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FSpeedWeights {
    pub sfb: f32,
    pub dsfb: f32,
    #[serde(rename = "keyTravel")]
    pub key_travel: f32,
    pub kps: [f32; 8],
}

impl Default for FSpeedWeights {
    fn default() -> Self {
        Self {
            sfb: 1.0,
            dsfb: 0.25,
            key_travel: 0.0,
            kps: [1.0; 8],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DistWeights {
    pub lateral: f32,
}

impl Default for DistWeights {
    fn default() -> Self {
        Self { lateral: 1.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScoreWeights {
    pub fspeed: f32,
    #[serde(rename = "indexBalance")]
    pub index_balance: f32,
    pub lsb: f32,
    pub trigrams: TrigramWeights,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TrigramWeights {
    pub enabled: bool,
    pub precision: usize,
    pub onehand: f32,
    pub alternate: f32,
    pub redirect: f32,
    pub roll_in_left: f32,
    pub roll_out_left: f32,
    pub roll_in_right: f32,
    pub roll_out_right: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    #[serde(rename = "generatedLayoutChars")]
    pub generated_layout_chars: String,
    #[serde(rename = "initialPopulation")]
    pub initial_population: usize,
    pub selection: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            generated_layout_chars: "abcdefghijklmnopqrstuvwxyz.,/;'".into(),
            initial_population: 1000,
            selection: 10,
        }
    }
}

impl Config {
    /// Loads and validates a TOML config file. `generation.selection` must not
    /// exceed `generation.initialPopulation`; the violation is a `Config`
    /// error caught at the command boundary, not a process-fatal panic.
    pub fn load(path: impl AsRef<Path>) -> KfResult<Self> {
        let text = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&text)
            .map_err(|e| KeyForgeError::Config(format!("invalid TOML: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> KfResult<()> {
        if self.generation.selection > self.generation.initial_population {
            return Err(KeyForgeError::Config(format!(
                "generation.selection ({}) exceeds generation.initialPopulation ({})",
                self.generation.selection, self.generation.initial_population
            )));
        }
        Ok(())
    }
}
