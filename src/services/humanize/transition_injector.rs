// Transition Injector
// Prefixes sentences or lines with an academic connective ("Moreover, ...").

use rand::seq::IndexedRandom;
use rand::Rng;

use super::lexicon::TRANSITIONS;

/// How a transition is attached to a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionStyle {
    /// Never prefix the first unit of a sequence.
    pub skip_first: bool,
    /// Lower-case the first letter of the original unit after the phrase.
    pub decapitalize: bool,
}

impl TransitionStyle {
    /// Running sentences: the opening sentence is left alone and the next
    /// word is lower-cased unconditionally (proper nouns included).
    pub const SENTENCE: Self = Self {
        skip_first: true,
        decapitalize: true,
    };

    /// Independent lines: any line may be prefixed, casing is kept.
    pub const LINE: Self = Self {
        skip_first: false,
        decapitalize: false,
    };
}

#[derive(Debug, Clone, Copy)]
pub struct TransitionInjector {
    style: TransitionStyle,
    phrases: &'static [&'static str],
}

fn opens_with_transition(body: &str, phrases: &[&str]) -> bool {
    let lower = body.to_lowercase();
    phrases.iter().any(|p| {
        let p = p.to_lowercase();
        lower.starts_with(&p)
            && lower[p.len()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric())
    })
}

fn lowercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl TransitionInjector {
    pub fn new(style: TransitionStyle) -> Self {
        Self {
            style,
            phrases: TRANSITIONS,
        }
    }

    /// Whether a unit can take a prefix at all.
    ///
    /// The unit must start (after indentation) with a letter, which rules out
    /// placeholders, numbers, bullets and quotes, and must not already open
    /// with one of the phrases.
    pub fn accepts(&self, unit: &str) -> bool {
        let body = unit.trim_start();
        body.starts_with(char::is_alphabetic) && !opens_with_transition(body, self.phrases)
    }

    /// Prefix one unit with probability `p_trans`, keeping leading whitespace.
    ///
    /// Draws only for units that [`accepts`](Self::accepts) lets through.
    pub fn maybe_prefix<R: Rng + ?Sized>(&self, unit: &str, p_trans: f64, rng: &mut R) -> String {
        if p_trans <= 0.0 || !self.accepts(unit) {
            return unit.to_string();
        }
        let roll: f64 = rng.random();
        if roll >= p_trans {
            return unit.to_string();
        }
        let Some(phrase) = self.phrases.choose(&mut *rng) else {
            return unit.to_string();
        };

        let body = unit.trim_start();
        let indent = &unit[..unit.len() - body.len()];
        let body = if self.style.decapitalize {
            lowercase_first(body)
        } else {
            body.to_string()
        };
        format!("{}{}, {}", indent, phrase, body)
    }

    /// Apply [`maybe_prefix`](Self::maybe_prefix) over a sequence of units.
    ///
    /// Lazy and count-preserving: one output per input unit.
    pub fn insert_transitions<'a, I, R>(
        &'a self,
        units: I,
        p_trans: f64,
        rng: &'a mut R,
    ) -> impl Iterator<Item = String> + 'a
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        I::IntoIter: 'a,
        R: Rng + ?Sized,
    {
        units.into_iter().enumerate().map(move |(idx, unit)| {
            let unit = unit.as_ref();
            if idx == 0 && self.style.skip_first {
                unit.to_string()
            } else {
                self.maybe_prefix(unit, p_trans, &mut *rng)
            }
        })
    }
}
