// Composer
// The two rewrite strategies built on the lexical rewriter and the transition
// injector. Both take citation-masked text.

use rand::Rng;

use super::lexical_rewriter::rewrite_lexically;
use super::transition_injector::{TransitionInjector, TransitionStyle};
use crate::models::RewriteConfig;
use crate::services::text_processor::{
    has_sentence_end_punctuation, split_lines_keep_endings, split_sentences,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteStrategy {
    /// Whole block rewritten as running prose; line breaks are discarded.
    Minimal,
    /// Line by line; every line break, blank line and indent is kept.
    PreserveLinebreaks,
}

impl RewriteStrategy {
    pub fn for_config(config: &RewriteConfig) -> Self {
        if config.preserve_linebreaks {
            Self::PreserveLinebreaks
        } else {
            Self::Minimal
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::PreserveLinebreaks => "preserve_linebreaks",
        }
    }

    pub fn rewrite<R: Rng + ?Sized>(
        &self,
        masked: &str,
        p_syn: f64,
        p_trans: f64,
        rng: &mut R,
    ) -> String {
        match self {
            Self::Minimal => minimal_rewrite(masked, p_syn, p_trans, rng),
            Self::PreserveLinebreaks => preserve_linebreaks_rewrite(masked, p_syn, p_trans, rng),
        }
    }
}

/// Rewrite the input as one block and rejoin its sentences with single spaces.
pub fn minimal_rewrite<R: Rng + ?Sized>(text: &str, p_syn: f64, p_trans: f64, rng: &mut R) -> String {
    let rewritten = rewrite_lexically(text, p_syn, rng);
    let sentences = split_sentences(&rewritten);
    let injector = TransitionInjector::new(TransitionStyle::SENTENCE);
    injector
        .insert_transitions(&sentences, p_trans, rng)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rewrite each non-blank line on its own and reattach its original ending.
///
/// Lines with sentence-ending punctuation may receive a transition at their
/// start; headings and list fragments without it never do.
pub fn preserve_linebreaks_rewrite<R: Rng + ?Sized>(
    text: &str,
    p_syn: f64,
    p_trans: f64,
    rng: &mut R,
) -> String {
    let injector = TransitionInjector::new(TransitionStyle::LINE);
    let mut out = String::with_capacity(text.len() + text.len() / 8);

    for (content, ending) in split_lines_keep_endings(text) {
        if content.trim().is_empty() {
            out.push_str(content);
        } else {
            let line = rewrite_lexically(content, p_syn, rng);
            if has_sentence_end_punctuation(&line) {
                out.push_str(&injector.maybe_prefix(&line, p_trans, rng));
            } else {
                out.push_str(&line);
            }
        }
        out.push_str(ending);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::humanize::citation_guard::extract_citations;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const TWO_PARAGRAPHS: &str = "First paragraph can't be short.\nIt has two lines.\n\n  Second paragraph shows results.\n";

    #[test]
    fn test_strategy_selection() {
        assert_eq!(
            RewriteStrategy::for_config(&RewriteConfig::new(0.2, 0.2, true)),
            RewriteStrategy::PreserveLinebreaks
        );
        assert_eq!(
            RewriteStrategy::for_config(&RewriteConfig::new(0.2, 0.2, false)),
            RewriteStrategy::Minimal
        );
        assert_eq!(RewriteStrategy::Minimal.name(), "minimal");
    }

    #[test]
    fn test_preserve_zero_probabilities_only_expands() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let out = preserve_linebreaks_rewrite(TWO_PARAGRAPHS, 0.0, 0.0, &mut rng);
        assert_eq!(out, TWO_PARAGRAPHS.replace("can't", "cannot"));
    }

    #[test]
    fn test_preserve_keeps_line_structure() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let out = preserve_linebreaks_rewrite(TWO_PARAGRAPHS, 1.0, 1.0, &mut rng);
        assert_eq!(out.matches('\n').count(), TWO_PARAGRAPHS.matches('\n').count());
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[2], "");
        assert!(lines[3].starts_with("  "));
        assert!(!lines[3].starts_with("   "));
    }

    #[test]
    fn test_preserve_skips_lines_without_terminal_punctuation() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let out = preserve_linebreaks_rewrite("Introduction\nBody text here.", 0.0, 1.0, &mut rng);
        assert!(out.starts_with("Introduction\n"));
        assert!(out.ends_with(", Body text here."));
    }

    #[test]
    fn test_preserve_treats_lone_carriage_return_as_line_break() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let out = preserve_linebreaks_rewrite("Line one.\rLine two.\rLine three.", 0.0, 1.0, &mut rng);
        assert_eq!(out.matches('\r').count(), 2);
        let lines: Vec<&str> = out.split('\r').collect();
        assert!(lines[0].ends_with(", Line one."));
        assert!(lines[1].ends_with(", Line two."));
        assert!(lines[2].ends_with(", Line three."));
    }

    #[test]
    fn test_minimal_flattens_lines() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let out = minimal_rewrite(TWO_PARAGRAPHS, 0.0, 0.0, &mut rng);
        assert_eq!(
            out,
            "First paragraph cannot be short. It has two lines. Second paragraph shows results."
        );
    }

    #[test]
    fn test_minimal_never_prefixes_first_sentence() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let out = minimal_rewrite("Alpha one. Beta two.", 0.0, 1.0, &mut rng);
        assert!(out.starts_with("Alpha one. "));
        assert!(out.ends_with(", beta two."));
    }

    #[test]
    fn test_placeholders_survive_both_strategies() {
        let text = "[4] shows this. Prior work (Smith et al., 2020) shows that.\nSee Lee et al. (2019).";
        let (masked, map) = extract_citations(text);
        for strategy in [RewriteStrategy::Minimal, RewriteStrategy::PreserveLinebreaks] {
            let mut rng = ChaCha8Rng::seed_from_u64(6);
            let out = strategy.rewrite(&masked, 1.0, 1.0, &mut rng);
            for c in map.citations() {
                assert_eq!(out.matches(c.token.as_str()).count(), 1, "{}", strategy.name());
            }
            assert!(map.restore(&out).is_consistent());
        }
    }
}
