//! Comparison keys and the key-sequence search shared by every mode.
//!
//! Text is folded into one key per comparison unit, each tagged with the byte
//! offset of the character it came from. Ordinal modes produce exactly one
//! key per character; culture modes drop ignorable format characters and may
//! expand one character into several keys when folding case.

use crate::culture::{is_ignorable, Culture};

use super::StringComparison;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Key {
    ch: char,
    offset: usize,
    /// First key produced by its source character.
    first: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Folding {
    Ordinal,
    OrdinalIgnoreCase,
    Culture { culture: Culture, ignore_case: bool },
}

impl Folding {
    pub(super) fn new(comparison: StringComparison) -> Self {
        let culture = |culture, ignore_case| Self::Culture {
            culture,
            ignore_case,
        };
        match comparison {
            StringComparison::CurrentCulture => culture(Culture::current(), false),
            StringComparison::CurrentCultureIgnoreCase => culture(Culture::current(), true),
            StringComparison::InvariantCulture => culture(Culture::invariant(), false),
            StringComparison::InvariantCultureIgnoreCase => culture(Culture::invariant(), true),
            StringComparison::Ordinal => Self::Ordinal,
            StringComparison::OrdinalIgnoreCase => Self::OrdinalIgnoreCase,
        }
    }

    /// Keys of `text`, with offsets shifted by `base`.
    pub(super) fn keys(&self, text: &str, base: usize) -> Vec<Key> {
        let mut keys = Vec::with_capacity(text.len());
        let mut folded = Vec::new();
        for (index, ch) in text.char_indices() {
            let offset = base + index;
            let single = |ch| Key {
                ch,
                offset,
                first: true,
            };
            match self {
                Self::Ordinal => keys.push(single(ch)),
                Self::OrdinalIgnoreCase => keys.push(single(simple_upper(ch))),
                Self::Culture { .. } if is_ignorable(ch) => {}
                Self::Culture {
                    ignore_case: false, ..
                } => keys.push(single(ch)),
                Self::Culture {
                    culture,
                    ignore_case: true,
                } => {
                    folded.clear();
                    culture.fold_into(ch, &mut folded);
                    keys.extend(folded.iter().enumerate().map(|(i, &key)| Key {
                        ch: key,
                        offset,
                        first: i == 0,
                    }));
                }
            }
        }
        keys
    }

    pub(super) fn needle(&self, text: &str) -> Vec<char> {
        self.keys(text, 0).into_iter().map(|key| key.ch).collect()
    }
}

/// Simple (one-to-one) uppercase mapping; characters whose uppercase form
/// expands are kept as they are.
fn simple_upper(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(mapped), None) => mapped,
        _ => ch,
    }
}

/// Whether a non-empty `needle` matches at key `at`, covering whole source
/// characters.
fn matches_at(haystack: &[Key], needle: &[char], at: usize) -> bool {
    let end = at + needle.len();
    end <= haystack.len()
        && haystack[at].first
        && haystack.get(end).is_none_or(|key| key.first)
        && haystack[at..end]
            .iter()
            .zip(needle)
            .all(|(key, ch)| key.ch == *ch)
}

pub(super) fn find(haystack: &[Key], needle: &[char]) -> Option<usize> {
    (0..haystack.len())
        .find(|&at| matches_at(haystack, needle, at))
        .map(|at| haystack[at].offset)
}

pub(super) fn rfind(haystack: &[Key], needle: &[char]) -> Option<usize> {
    (0..haystack.len())
        .rev()
        .find(|&at| matches_at(haystack, needle, at))
        .map(|at| haystack[at].offset)
}

pub(super) fn starts_with(haystack: &[Key], needle: &[char]) -> bool {
    needle.is_empty() || matches_at(haystack, needle, 0)
}

pub(super) fn ends_with(haystack: &[Key], needle: &[char]) -> bool {
    needle.is_empty()
        || haystack
            .len()
            .checked_sub(needle.len())
            .is_some_and(|at| matches_at(haystack, needle, at))
}

pub(super) fn same(left: &[Key], right: &[Key]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a.ch == b.ch)
}
