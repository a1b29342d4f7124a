// ===== keyforge-core/src/corpus.rs =====
use crate::error::KfResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Frozen n-gram frequency tables used by scoring. Read-only after
/// construction; lookups on missing keys return zero rather than signal
/// absence, since the hot scoring paths rely on a zero-default.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TextData {
    pub letters: HashMap<String, u64>,
    pub bigrams: HashMap<String, u64>,
    pub skipgrams: HashMap<String, f64>,
    pub trigrams: HashMap<String, u64>,
    #[serde(rename = "topTrigrams")]
    pub top_trigrams: Vec<(String, u64)>,
    pub total: f64,
    #[serde(rename = "totalBigrams")]
    pub total_bigrams: f64,
}

impl TextData {
    pub fn load(path: impl AsRef<Path>) -> KfResult<Self> {
        let text = fs::read_to_string(path)?;
        let data: TextData = serde_json::from_str(&text)?;
        Ok(data)
    }

    #[inline(always)]
    pub fn letter(&self, g: &str) -> u64 {
        self.letters.get(g).copied().unwrap_or(0)
    }

    #[inline(always)]
    pub fn bigram(&self, g: &str) -> u64 {
        self.bigrams.get(g).copied().unwrap_or(0)
    }

    #[inline(always)]
    pub fn skipgram(&self, g: &str) -> f64 {
        self.skipgrams.get(g).copied().unwrap_or(0.0)
    }

    #[inline(always)]
    pub fn trigram(&self, g: &str) -> u64 {
        self.trigrams.get(g).copied().unwrap_or(0)
    }

    /// Prefix of `top_trigrams` of length `min(len, precision)`.
    pub fn top_trigrams_prefix(&self, precision: usize) -> &[(String, u64)] {
        let n = self.top_trigrams.len().min(precision);
        &self.top_trigrams[..n]
    }
}
