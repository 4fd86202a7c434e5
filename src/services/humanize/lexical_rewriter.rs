// Lexical Rewriter
// Contraction expansion (deterministic) and probability-gated synonym swaps.

use rand::seq::IndexedRandom;
use rand::Rng;
use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::lexicon::{expansion_for, is_stopword, synonyms_for};

fn contraction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\b[A-Za-z]+['\u{2019}][A-Za-z]+\b").expect("contraction regex")
    })
}

// Whole tokens, hyphen/apostrophe compounds included, so "state-of-the-art"
// is one (ineligible) token rather than four candidates.
fn word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[A-Za-z]+(?:['\u{2019}\-][A-Za-z]+)*").expect("word regex")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CasePattern {
    Lower,
    Capitalized,
    Upper,
    Mixed,
}

fn case_pattern(word: &str) -> CasePattern {
    let letters: Vec<char> = word.chars().filter(|c| c.is_alphabetic()).collect();
    let Some((first, rest)) = letters.split_first() else {
        return CasePattern::Lower;
    };
    if letters.iter().all(|c| c.is_lowercase()) {
        CasePattern::Lower
    } else if letters.len() > 1 && letters.iter().all(|c| c.is_uppercase()) {
        CasePattern::Upper
    } else if first.is_uppercase() && rest.iter().all(|c| c.is_lowercase()) {
        CasePattern::Capitalized
    } else {
        CasePattern::Mixed
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Shape `replacement` after the capitalization of `template`.
///
/// All-caps templates give all-caps output, a leading capital is carried
/// over, anything else keeps the replacement as written.
pub fn match_case(template: &str, replacement: &str) -> String {
    match case_pattern(template) {
        CasePattern::Upper => replacement.to_uppercase(),
        CasePattern::Capitalized => capitalize_first(replacement),
        CasePattern::Mixed if template.starts_with(char::is_uppercase) => {
            capitalize_first(replacement)
        }
        _ => replacement.to_string(),
    }
}

/// Expand common English contractions ("can't" -> "cannot").
///
/// Single pass over whole tokens, so the result does not depend on the order
/// of the dictionary. Unknown forms such as possessives are kept.
pub fn expand_contractions(text: &str) -> String {
    contraction_re()
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            let key = token.replace('\u{2019}', "'").to_lowercase();
            match expansion_for(&key) {
                Some(expansion) => match_case(token, expansion),
                None => token.to_string(),
            }
        })
        .into_owned()
}

fn is_eligible(word: &str) -> bool {
    if !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    if !matches!(
        case_pattern(word),
        CasePattern::Lower | CasePattern::Capitalized
    ) {
        return false;
    }
    !is_stopword(&word.to_lowercase())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// The match is not glued to a digit, underscore or non-ASCII letter.
fn stands_alone(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

/// Replace eligible words with a dictionary synonym with probability `p_syn`.
///
/// One draw per eligible word (alphabetic, lower or capitalized, not a
/// stopword, not glued to other word characters); words without dictionary
/// entries stay as they are even when the draw succeeds. Placeholder tokens
/// contain no letters and are never matched.
pub fn substitute_synonyms<R: Rng + ?Sized>(text: &str, p_syn: f64, rng: &mut R) -> String {
    if p_syn <= 0.0 {
        return text.to_string();
    }

    word_re()
        .replace_all(text, |caps: &Captures| {
            let word = &caps[0];
            let Some(whole) = caps.get(0) else {
                return word.to_string();
            };
            if !stands_alone(text, whole.start(), whole.end()) || !is_eligible(word) {
                return word.to_string();
            }
            let roll: f64 = rng.random();
            if roll >= p_syn {
                return word.to_string();
            }
            let Some(candidates) = synonyms_for(&word.to_lowercase()) else {
                return word.to_string();
            };
            match candidates.choose(&mut *rng) {
                Some(candidate) => match_case(word, candidate),
                None => word.to_string(),
            }
        })
        .into_owned()
}

/// Contraction expansion followed by synonym substitution.
pub fn rewrite_lexically<R: Rng + ?Sized>(text: &str, p_syn: f64, rng: &mut R) -> String {
    substitute_synonyms(&expand_contractions(text), p_syn, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_expand_contractions() {
        assert_eq!(expand_contractions("It can't be ignored."), "It cannot be ignored.");
        assert_eq!(expand_contractions("Can't stop, WON'T stop"), "Cannot stop, WILL NOT stop");
        assert_eq!(expand_contractions("i'm sure it\u{2019}s fine"), "I am sure it is fine");
        assert_eq!(expand_contractions("Smith's model isn't new"), "Smith's model is not new");
    }

    #[test]
    fn test_match_case() {
        assert_eq!(match_case("Show", "demonstrate"), "Demonstrate");
        assert_eq!(match_case("show", "demonstrate"), "demonstrate");
        assert_eq!(match_case("SHOW", "demonstrate"), "DEMONSTRATE");
        assert_eq!(match_case("I'm", "I am"), "I am");
    }

    #[test]
    fn test_zero_probability_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let text = "Recent studies show promising results.";
        assert_eq!(substitute_synonyms(text, 0.0, &mut rng), text);
    }

    #[test]
    fn test_full_probability_replaces_every_known_word() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let out = substitute_synonyms("Recent studies show promising results.", 1.0, &mut rng);
        let words: Vec<&str> = out.trim_end_matches('.').split(' ').collect();
        assert_eq!(words.len(), 5);
        assert!(synonyms_for("recent").unwrap().contains(&words[0].to_lowercase().as_str()));
        assert!(words[0].starts_with(char::is_uppercase));
        assert!(synonyms_for("studies").unwrap().contains(&words[1]));
        assert!(synonyms_for("show").unwrap().contains(&words[2]));
        assert!(synonyms_for("promising").unwrap().contains(&words[3]));
        assert!(synonyms_for("results").unwrap().contains(&words[4]));
        assert!(out.ends_with('.'));
    }

    #[test]
    fn test_ineligible_tokens_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let text = "The NASA state-of-the-art show's data, e.g. \u{E000}0\u{E001}.";
        let out = substitute_synonyms(text, 1.0, &mut rng);
        assert!(out.starts_with("The NASA state-of-the-art show's "));
        assert!(out.contains("\u{E000}0\u{E001}."));
        assert!(!out.contains("data,"));
    }

    #[test]
    fn test_words_glued_to_word_characters_untouched() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let out = substitute_synonyms("we use2 show_case and us\u{e9} use", 1.0, &mut rng);
        assert!(out.starts_with("we use2 show_case and us\u{e9} "));
        assert!(!out.ends_with(" use"));
        assert!(synonyms_for("use").unwrap().contains(&out.rsplit(' ').next().unwrap()));
    }

    #[test]
    fn test_skipped_tokens_do_not_consume_draws() {
        let plain = substitute_synonyms("use data", 0.5, &mut ChaCha8Rng::seed_from_u64(8));
        let glued = substitute_synonyms("use2 use_x use data", 0.5, &mut ChaCha8Rng::seed_from_u64(8));
        assert_eq!(glued, format!("use2 use_x {}", plain));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let text = "Researchers often use new methods to examine important problems.";
        let a = substitute_synonyms(text, 0.5, &mut ChaCha8Rng::seed_from_u64(42));
        let b = substitute_synonyms(text, 0.5, &mut ChaCha8Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_rewrite_lexically_expands_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(rewrite_lexically("We don't know.", 0.0, &mut rng), "We do not know.");
    }
}
