// Citation Guard
// Masks academic in-text citations behind placeholder tokens before rewriting
// and puts them back verbatim afterwards.
//
// Placeholders look like `<open>N<close>` where `open`/`close` are a pair of
// private-use characters absent from the input. They carry no letters and no
// punctuation, so no rewriting rule can touch them.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

const NAME: &str = r"(?:(?:van|von|de|der|del|la|le|da|di)\s+)*[A-Z][A-Za-z'\u{2019}\-]+";
const YEAR: &str = r"(?:\d{4}[a-z]?|n\.d\.|in\s+press)";
const LOCATOR: &str = r"(?:,\s*(?:p|pp|ch|chap|sec|para)\.\s*\d+(?:\s*[-\u{2013}]\s*\d+)?)";

fn citation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let authors = format!(
            r"{name}(?:\s+et\s+al\.?|,?\s+(?:and|&)\s+{name}|,\s+{name})*",
            name = NAME
        );
        let group = format!(
            r"{authors},?\s+{year}(?:,\s*{year})*{locator}?",
            authors = authors,
            year = YEAR,
            locator = LOCATOR
        );
        // (Smith et al., 2020) / (see Lee & Park, 2019; Kim, 2021, p. 4)
        let parenthetical = format!(
            r"\((?:(?:see|e\.g\.,?|cf\.)\s+)?{group}(?:;\s*{group})*\)",
            group = group
        );
        // Smith et al. (2020) / Smith et al., 2020 / Smith and Jones (2019)
        let narrative = format!(
            r"{name}\s+et\s+al\.(?:,?\s+{year}|\s*\({year}{locator}?\))|{name}(?:\s+(?:and|&)\s+{name})?\s+\(\d{{4}}[a-z]?{locator}?\)",
            name = NAME,
            year = YEAR,
            locator = LOCATOR
        );
        // [12] / [3, 4] / [5-7]
        let numeric = r"\[\d+(?:\s*[-\u{2013},]\s*\d+)*\]";

        Regex::new(&format!("{}|{}|{}", parenthetical, narrative, numeric))
            .expect("citation regex")
    })
}

/// One masked citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    pub token: String,
    pub text: String,
    /// Byte span in the unmasked input.
    pub span: Range<usize>,
}

/// Placeholder token -> original citation text, scoped to one request.
#[derive(Debug, Clone)]
pub struct PlaceholderMap {
    open: char,
    close: char,
    citations: Vec<Citation>,
}

/// Outcome of [`PlaceholderMap::restore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restoration {
    pub text: String,
    /// Tokens found in the text with no entry in the map (left in place).
    pub unresolved: Vec<String>,
    /// Tokens that were not restored exactly once.
    pub miscounted: Vec<String>,
}

impl Restoration {
    pub fn is_consistent(&self) -> bool {
        self.unresolved.is_empty() && self.miscounted.is_empty()
    }
}

/// First pair of private-use characters that does not occur in `text`.
fn pick_markers(text: &str) -> (char, char) {
    (0xE000u32..0xF8FE)
        .step_by(2)
        .chain((0xF0000u32..0xFFFFC).step_by(2))
        .filter_map(|cp| Some((char::from_u32(cp)?, char::from_u32(cp + 1)?)))
        .find(|(open, close)| !text.contains(*open) && !text.contains(*close))
        .unwrap_or(('\u{E000}', '\u{E001}'))
}

impl PlaceholderMap {
    fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            citations: Vec::new(),
        }
    }

    fn push(&mut self, text: &str, span: Range<usize>) -> String {
        let token = format!("{}{}{}", self.open, self.citations.len(), self.close);
        self.citations.push(Citation {
            token: token.clone(),
            text: text.to_string(),
            span,
        });
        token
    }

    pub fn len(&self) -> usize {
        self.citations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.citations.is_empty()
    }

    pub fn citations(&self) -> &[Citation] {
        &self.citations
    }

    fn token_re(&self) -> Regex {
        let pattern = format!(
            "{}([0-9]+){}",
            regex::escape(&self.open.to_string()),
            regex::escape(&self.close.to_string())
        );
        Regex::new(&pattern).expect("placeholder regex")
    }

    /// Number of placeholder-shaped tokens still present in `text`.
    pub fn residual_count(&self, text: &str) -> usize {
        if !text.contains(self.open) {
            return 0;
        }
        self.token_re().find_iter(text).count()
    }

    /// Swap every placeholder in `masked` back to its citation.
    ///
    /// Tokens without a map entry are left as-is and reported; the caller
    /// decides whether that is fatal.
    pub fn restore(&self, masked: &str) -> Restoration {
        if self.citations.is_empty() && !masked.contains(self.open) {
            return Restoration {
                text: masked.to_string(),
                unresolved: Vec::new(),
                miscounted: Vec::new(),
            };
        }

        let mut seen = vec![0usize; self.citations.len()];
        let mut unresolved = Vec::new();
        let text = self
            .token_re()
            .replace_all(masked, |caps: &regex::Captures| {
                let entry = caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|idx| self.citations.get(idx).map(|c| (idx, c)));
                match entry {
                    Some((idx, citation)) => {
                        seen[idx] += 1;
                        citation.text.clone()
                    }
                    None => {
                        unresolved.push(caps[0].to_string());
                        caps[0].to_string()
                    }
                }
            })
            .into_owned();

        let miscounted = self
            .citations
            .iter()
            .zip(&seen)
            .filter(|(_, count)| **count != 1)
            .map(|(c, _)| c.token.clone())
            .collect();

        Restoration {
            text,
            unresolved,
            miscounted,
        }
    }
}

/// Replace each citation in `text` with a placeholder, scanning left to right.
///
/// Matches never overlap; text without citations comes back unchanged with an
/// empty map.
pub fn extract_citations(text: &str) -> (String, PlaceholderMap) {
    let (open, close) = pick_markers(text);
    let mut map = PlaceholderMap::new(open, close);
    let mut masked = String::with_capacity(text.len());
    let mut last = 0;

    for m in citation_re().find_iter(text) {
        masked.push_str(&text[last..m.start()]);
        let token = map.push(m.as_str(), m.range());
        masked.push_str(&token);
        last = m.end();
    }
    masked.push_str(&text[last..]);

    (masked, map)
}

/// Convenience wrapper over [`PlaceholderMap::restore`] returning just the text.
pub fn restore_citations(masked: &str, map: &PlaceholderMap) -> String {
    map.restore(masked).text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cited(text: &str) -> Vec<String> {
        let (_, map) = extract_citations(text);
        map.citations().iter().map(|c| c.text.clone()).collect()
    }

    #[test]
    fn test_parenthetical_author_year() {
        assert_eq!(
            cited("Recent studies (Smith et al., 2020) show promising results."),
            vec!["(Smith et al., 2020)"]
        );
        assert_eq!(cited("as argued (Smith, 2019, p. 15)."), vec!["(Smith, 2019, p. 15)"]);
        assert_eq!(
            cited("prior work (Lee & Park, 2019; Kim, 2021) agrees"),
            vec!["(Lee & Park, 2019; Kim, 2021)"]
        );
        assert_eq!(cited("(see Brown and Green 2018a)"), vec!["(see Brown and Green 2018a)"]);
    }

    #[test]
    fn test_narrative_and_numeric() {
        assert_eq!(
            cited("Smith et al. (2020) found this [12] and that [3, 4]."),
            vec!["Smith et al. (2020)", "[12]", "[3, 4]"]
        );
        assert_eq!(cited("Jones (2018) disagreed."), vec!["Jones (2018)"]);
        assert_eq!(cited("Garcia et al., 2021 reported"), vec!["Garcia et al., 2021"]);
    }

    #[test]
    fn test_non_citations_are_left_alone() {
        assert!(cited("We measured (roughly) 20 samples in 2020.").is_empty());
        assert!(cited("Use array[i] here.").is_empty());
    }

    #[test]
    fn test_no_citations_returns_input_unchanged() {
        let text = "Plain text without references.";
        let (masked, map) = extract_citations(text);
        assert_eq!(masked, text);
        assert!(map.is_empty());
    }

    #[test]
    fn test_round_trip_identity() {
        let text = "A (Smith et al., 2020) B [1] C Lee et al. (2019, p. 3) D.\n\nE (Kim, 2021).";
        let (masked, map) = extract_citations(text);
        assert_eq!(map.len(), 4);
        assert!(!masked.contains("Smith"));
        let restored = map.restore(&masked);
        assert!(restored.is_consistent());
        assert_eq!(restored.text, text);
        assert_eq!(map.residual_count(&restored.text), 0);
    }

    #[test]
    fn test_spans_point_into_original() {
        let text = "See [7] and (Doe, 2001).";
        let (_, map) = extract_citations(text);
        for c in map.citations() {
            assert_eq!(&text[c.span.clone()], c.text);
        }
    }

    #[test]
    fn test_markers_avoid_input_characters() {
        let text = "odd \u{E000}\u{E001} chars [1]";
        let (masked, map) = extract_citations(text);
        let token = &map.citations()[0].token;
        assert!(!token.contains('\u{E000}'));
        assert_eq!(map.citations()[0].text, "[1]");
        assert_eq!(map.restore(&masked).text, text);
    }

    #[test]
    fn test_restore_reports_problems() {
        let (masked, map) = extract_citations("x [1] y [2]");
        let open = map.citations()[0].token.chars().next().unwrap();
        let close = map.citations()[0].token.chars().last().unwrap();

        let dropped = masked.replace(&map.citations()[1].token, "");
        let r = map.restore(&dropped);
        assert!(!r.is_consistent());
        assert_eq!(r.miscounted, vec![map.citations()[1].token.clone()]);

        let bogus = format!("{} {}9{}", masked, open, close);
        let r = map.restore(&bogus);
        assert_eq!(r.unresolved.len(), 1);
        assert_eq!(map.residual_count(&r.text), 1);
        assert_eq!(restore_citations(&masked, &map), "x [1] y [2]");
    }
}
