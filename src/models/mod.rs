// Humanizer Data Models
// Request/response schemas shared by the pipeline, the HTTP API and the CLI.
// Field names follow the public wire contract (snake_case), unlike the config file.

use serde::{Deserialize, Serialize};

use crate::services::config_store::HumanizeSettings;
use crate::services::humanize::HumanizeError;

// ============ Rewrite Configuration ============

/// Per-request knobs for the rewrite pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Probability of replacing each eligible word with a synonym.
    pub p_syn: f64,
    /// Probability of prefixing each sentence/line with a transition phrase.
    pub p_trans: f64,
    /// Selects the line-preserving composer instead of the minimal one.
    pub preserve_linebreaks: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            p_syn: default_p_syn(),
            p_trans: default_p_trans(),
            preserve_linebreaks: true,
        }
    }
}

impl RewriteConfig {
    pub fn new(p_syn: f64, p_trans: f64, preserve_linebreaks: bool) -> Self {
        Self {
            p_syn,
            p_trans,
            preserve_linebreaks,
        }
    }

    /// Both probabilities must lie in `[0, 1]`; NaN is rejected.
    pub fn validate(&self) -> Result<(), HumanizeError> {
        for (name, value) in [("p_syn", self.p_syn), ("p_trans", self.p_trans)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(HumanizeError::InvalidParameter {
                    name: name.to_string(),
                    value,
                });
            }
        }
        Ok(())
    }
}

// ============ Humanize Request / Response ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanizeRequest {
    pub text: String,
    #[serde(default)]
    pub p_syn: Option<f64>,
    #[serde(default)]
    pub p_trans: Option<f64>,
    #[serde(default)]
    pub preserve_linebreaks: Option<bool>,
    /// Fixes the random source so the same input yields the same output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl HumanizeRequest {
    /// Resolve omitted (or null) knobs against the configured defaults.
    pub fn rewrite_config(&self, defaults: &HumanizeSettings) -> RewriteConfig {
        RewriteConfig {
            p_syn: self.p_syn.unwrap_or(defaults.p_syn),
            p_trans: self.p_trans.unwrap_or(defaults.p_trans),
            preserve_linebreaks: self
                .preserve_linebreaks
                .unwrap_or(defaults.preserve_linebreaks),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TextMetricsResult {
    pub word_count: usize,
    pub sentence_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanizeResult {
    pub humanized_text: String,
    pub orig_word_count: usize,
    pub orig_sentence_count: usize,
    pub new_word_count: usize,
    pub new_sentence_count: usize,
    pub words_added: i64,
    pub sentences_added: i64,
}

impl HumanizeResult {
    pub fn new(humanized_text: String, orig: TextMetricsResult, new: TextMetricsResult) -> Self {
        Self {
            humanized_text,
            orig_word_count: orig.word_count,
            orig_sentence_count: orig.sentence_count,
            new_word_count: new.word_count,
            new_sentence_count: new.sentence_count,
            words_added: new.word_count as i64 - orig.word_count as i64,
            sentences_added: new.sentence_count as i64 - orig.sentence_count as i64,
        }
    }
}

// ============ Classification ============

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ClassificationLabel {
    Human,
    #[serde(rename = "AI")]
    Ai,
    Mixed,
    #[default]
    Unknown,
}

impl ClassificationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Human => "Human",
            Self::Ai => "AI",
            Self::Mixed => "Mixed",
            Self::Unknown => "Unknown",
        }
    }
}

/// Probabilities are reported as the model returned them and need not sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ClassificationResult {
    pub human_prob: f64,
    pub ai_prob: f64,
    pub mixed_prob: f64,
    pub label: ClassificationLabel,
}

impl ClassificationResult {
    pub fn confidence(&self) -> f64 {
        self.human_prob.max(self.ai_prob).max(self.mixed_prob)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifyRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceClassification {
    /// 1-based position of the sentence in the input.
    pub index: usize,
    pub text: String,
    pub label: ClassificationLabel,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextAnalysisResponse {
    pub overall: ClassificationResult,
    pub word_count: usize,
    pub sentence_count: usize,
    pub sentences: Vec<SentenceClassification>,
}

// ============ Service ============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

// ============ Default Value Functions ============

pub(crate) fn default_p_syn() -> f64 { 0.2 }
pub(crate) fn default_p_trans() -> f64 { 0.2 }
