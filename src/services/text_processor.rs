// Text Processing Service
// Word/sentence metrics, sentence and line splitting, and output cleanup.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::TextMetricsResult;

/// Period-terminated forms that do not end a sentence (lowercase, final period dropped).
const ABBREVIATIONS: &[&str] = &[
    "al", "e.g", "i.e", "etc", "vs", "cf", "dr", "mr", "mrs", "ms", "prof", "fig", "figs", "eq",
    "eqs", "vol", "vols", "pp", "p", "approx", "jr", "sr", "inc", "ltd", "ed", "eds", "ch",
    "sec", "dept", "univ", "u.s", "u.k", "ca", "resp", "viz",
];

fn is_terminal(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

fn is_closer(ch: char) -> bool {
    matches!(ch, '"' | '\'' | '\u{201d}' | '\u{2019}' | ')' | ']')
}

fn is_abbreviation(word: &str) -> bool {
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_uppercase() {
            return true; // initial, e.g. "J."
        }
    }
    let lower = word.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}

/// The word directly before byte offset `pos`, letters and inner periods only.
fn word_before(text: &str, pos: usize) -> &str {
    let head = &text[..pos];
    let start = head
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_alphabetic() || *c == '.')
        .last()
        .map(|(i, _)| i)
        .unwrap_or(pos);
    &head[start..]
}

/// Byte offsets just past each sentence terminator (including trailing quotes/brackets).
fn sentence_ends(text: &str) -> Vec<usize> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut ends = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        if !is_terminal(ch) {
            i += 1;
            continue;
        }

        let mut j = i;
        while j < chars.len() && is_terminal(chars[j].1) {
            j += 1;
        }
        let mut k = j;
        while k < chars.len() && is_closer(chars[k].1) {
            k += 1;
        }

        let at_end = k == chars.len();
        let followed_by_space = chars.get(k).is_some_and(|(_, c)| c.is_whitespace());
        let single_period = j - i == 1 && ch == '.';
        let abbreviated = single_period && is_abbreviation(word_before(text, pos));

        if at_end || (followed_by_space && !abbreviated) {
            ends.push(chars.get(k).map(|(p, _)| *p).unwrap_or(text.len()));
        }
        i = k;
    }

    ends
}

/// Count sentence terminators (`.`, `!`, `?`); runs like `?!` or `...` count once.
///
/// Best effort: abbreviations and decimals are skipped, nothing more clever.
pub fn count_sentences(text: &str) -> usize {
    sentence_ends(text).len()
}

fn strip_clitic(core: &str) -> &str {
    match core.rfind(['\'', '\u{2019}']) {
        Some(idx) => {
            let suffix = core[idx..].trim_start_matches(['\'', '\u{2019}']).to_lowercase();
            if matches!(suffix.as_str(), "t" | "s" | "re" | "ve" | "ll" | "d" | "m") {
                &core[..idx]
            } else {
                core
            }
        }
        None => core,
    }
}

fn is_word_token(token: &str, is_last: bool) -> bool {
    let start = token.trim_start_matches(|c: char| !c.is_alphanumeric());
    let core = start.trim_end_matches(|c: char| !c.is_alphanumeric());
    if core.is_empty() {
        return false;
    }
    let trailing = &start[core.len()..];
    let core = strip_clitic(core);

    if !core.chars().any(char::is_alphabetic) {
        return false;
    }
    if !core
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '-' | '\'' | '\u{2019}' | '.'))
    {
        return false;
    }
    !(trailing.starts_with('.') && !is_last && is_abbreviation(core))
}

/// Count whitespace-delimited tokens that carry a word.
///
/// Punctuation-only tokens and bare numbers are skipped, as are abbreviations
/// such as `al.` or `e.g.` in running text.
pub fn count_words(text: &str) -> usize {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let last = tokens.len().saturating_sub(1);
    tokens
        .iter()
        .enumerate()
        .filter(|(i, tok)| is_word_token(tok, *i == last))
        .count()
}

pub fn compute_metrics(text: &str) -> TextMetricsResult {
    TextMetricsResult {
        word_count: count_words(text),
        sentence_count: count_sentences(text),
    }
}

/// Split running text into sentences, collapsing all whitespace to single spaces.
pub fn split_sentences(text: &str) -> Vec<String> {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return vec![];
    }

    let mut sentences = Vec::new();
    let mut cursor = 0;
    for end in sentence_ends(&collapsed) {
        let sentence = collapsed[cursor..end].trim();
        if !sentence.is_empty() {
            sentences.push(sentence.to_string());
        }
        cursor = end;
    }
    let rest = collapsed[cursor..].trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }
    sentences
}

pub fn has_sentence_end_punctuation(s: &str) -> bool {
    s.contains(is_terminal)
}

/// Split into `(content, line_ending)` pairs; joining them back yields the input.
/// A line ends at `\n`, `\r\n` or a lone `\r`.
pub fn split_lines_keep_endings(text: &str) -> Vec<(&str, &str)> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let (mut start, mut i) = (0, 0);
    while i < bytes.len() {
        let end = match bytes[i] {
            b'\n' => i + 1,
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => i + 2,
            b'\r' => i + 1,
            _ => {
                i += 1;
                continue;
            }
        };
        out.push((&text[start..i], &text[i..end]));
        i = end;
        start = end;
    }
    if start < text.len() {
        out.push((&text[start..], ""));
    }
    out
}

fn space_before_punct_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+([.,;:!?])").expect("space-before-punct regex"))
}

fn space_after_open_paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\([ \t]+").expect("open-paren regex"))
}

fn space_before_close_paren_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]+\)").expect("close-paren regex"))
}

fn horizontal_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t]{2,}").expect("horizontal whitespace regex"))
}

fn latex_quote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"``\s*(.+?)\s*''").expect("latex quote regex"))
}

/// Final cleanup after citations are restored.
///
/// Runs over citation text like any other text.
pub fn normalize_output(text: &str) -> String {
    let s = space_before_punct_re().replace_all(text, "$1");
    let s = space_after_open_paren_re().replace_all(&s, "(");
    let s = space_before_close_paren_re().replace_all(&s, ")");
    let s = horizontal_ws_re().replace_all(&s, " ");
    let s = latex_quote_re().replace_all(&s, "\"$1\"");
    s.into_owned()
}

fn odd_space_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\u{3000}\u{00A0}]").expect("odd space regex"))
}

fn collapse_ws_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[ \t\x0C\x0B]+").expect("collapse whitespace regex"))
}

/// Normalize punctuation and spacing of extracted document text.
pub fn normalize_punctuation(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let s = text
        .replace(['\u{201c}', '\u{201d}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace('\u{2014}', "-");
    let s = odd_space_re().replace_all(&s, " ");
    let s = s.replace("\r\n", "\n").replace('\r', "\n");
    let s = collapse_ws_re().replace_all(&s, " ");

    s.lines()
        .map(|ln| ln.trim())
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// First `max_chars` characters, with "..." appended when truncated.
pub fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
