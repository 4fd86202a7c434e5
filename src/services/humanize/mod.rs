// Humanize Module
// Citation-safe rewriting of AI-sounding academic prose
//
// Structure:
// - lexicon.rs: Contraction, synonym, stopword and transition tables
// - citation_guard.rs: Citation masking and restoration
// - lexical_rewriter.rs: Contraction expansion and synonym substitution
// - transition_injector.rs: Transition phrase prefixing
// - composer.rs: Minimal and line-preserving rewrite strategies
// - pipeline.rs: Entry point, validation and metrics

pub mod citation_guard;
pub mod composer;
pub mod lexical_rewriter;
pub mod lexicon;
pub mod pipeline;
pub mod transition_injector;

pub use citation_guard::{extract_citations, restore_citations, Citation, PlaceholderMap, Restoration};
pub use composer::{minimal_rewrite, preserve_linebreaks_rewrite, RewriteStrategy};
pub use lexical_rewriter::{expand_contractions, match_case, rewrite_lexically, substitute_synonyms};
pub use pipeline::{humanize, HumanizeError, Humanizer, EMPTY_TEXT_MESSAGE};
pub use transition_injector::{TransitionInjector, TransitionStyle};
