// Humanize Pipeline
// mask citations -> rewrite -> restore -> normalize -> metrics

use rand::Rng;
use thiserror::Error;
use tracing::{debug, warn};

use super::citation_guard::extract_citations;
use super::composer::RewriteStrategy;
use crate::models::{HumanizeResult, RewriteConfig};
use crate::services::text_processor::{compute_metrics, normalize_output};

pub const EMPTY_TEXT_MESSAGE: &str = "text must be a non-empty string";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HumanizeError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{name} must be between 0.0 and 1.0 (got {value})")]
    InvalidParameter { name: String, value: f64 },
    #[error("citation placeholders not restored: {unresolved:?} unresolved, {missing:?} miscounted")]
    InternalInconsistency {
        unresolved: Vec<String>,
        missing: Vec<String>,
    },
}

/// Runs the pipeline. Holds no per-request state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Humanizer {
    strict_citations: bool,
}

impl Humanizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with `InternalInconsistency` instead of returning text that still
    /// carries placeholders.
    pub fn with_strict_citations(mut self, strict: bool) -> Self {
        self.strict_citations = strict;
        self
    }

    /// Humanize with the thread-local, system-seeded generator.
    pub fn humanize(&self, text: &str, config: &RewriteConfig) -> Result<HumanizeResult, HumanizeError> {
        self.humanize_with_rng(text, config, &mut rand::rng())
    }

    /// Humanize drawing every random decision from `rng`.
    ///
    /// Input is validated before any work; on error nothing is produced.
    pub fn humanize_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        config: &RewriteConfig,
        rng: &mut R,
    ) -> Result<HumanizeResult, HumanizeError> {
        if text.trim().is_empty() {
            return Err(HumanizeError::InvalidInput(EMPTY_TEXT_MESSAGE.to_string()));
        }
        config.validate()?;

        let orig_metrics = compute_metrics(text);
        let (masked, placeholders) = extract_citations(text);
        let strategy = RewriteStrategy::for_config(config);
        debug!(
            "[HUMANIZE] strategy={} citations={} p_syn={} p_trans={}",
            strategy.name(),
            placeholders.len(),
            config.p_syn,
            config.p_trans
        );
        for citation in placeholders.citations() {
            debug!("[HUMANIZE] masked {:?} at {:?}", citation.text, citation.span);
        }

        let rewritten = strategy.rewrite(&masked, config.p_syn, config.p_trans, rng);
        let restoration = placeholders.restore(&rewritten);

        if !restoration.is_consistent() {
            warn!(
                unresolved = ?restoration.unresolved,
                miscounted = ?restoration.miscounted,
                residual = placeholders.residual_count(&restoration.text),
                "[HUMANIZE] citation placeholders were not restored cleanly"
            );
            if self.strict_citations {
                return Err(HumanizeError::InternalInconsistency {
                    unresolved: restoration.unresolved,
                    missing: restoration.miscounted,
                });
            }
        }

        let final_text = normalize_output(&restoration.text);
        let new_metrics = compute_metrics(&final_text);
        debug!(
            "[HUMANIZE] words {} -> {}, sentences {} -> {}",
            orig_metrics.word_count,
            new_metrics.word_count,
            orig_metrics.sentence_count,
            new_metrics.sentence_count
        );

        Ok(HumanizeResult::new(final_text, orig_metrics, new_metrics))
    }
}

/// Humanize with default settings and system randomness.
pub fn humanize(text: &str, config: &RewriteConfig) -> Result<HumanizeResult, HumanizeError> {
    Humanizer::new().humanize(text, config)
}
