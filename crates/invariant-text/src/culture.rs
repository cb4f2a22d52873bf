//! Comparison cultures.
//!
//! A [`Culture`] only carries what the comparison facade needs: a name and
//! the case mapping used by the ignore-case modes. The invariant culture is
//! fixed; the current culture is a per-thread setting that defaults to the
//! invariant one so results never depend on the host locale.

use std::cell::RefCell;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Case mapping rules applied by case-insensitive culture comparisons.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseMapping {
    /// Unicode default case mapping.
    #[default]
    Invariant,
    /// Turkish/Azeri dotted and dotless `i`.
    Turkic,
}

/// A comparison culture.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Culture {
    name: SmolStr,
    #[serde(default)]
    case_mapping: CaseMapping,
}

thread_local! {
    static CURRENT: RefCell<Culture> = RefCell::new(Culture::invariant());
}

impl Culture {
    /// The invariant culture (empty name, default case mapping).
    #[must_use]
    pub fn invariant() -> Self {
        Self {
            name: SmolStr::default(),
            case_mapping: CaseMapping::Invariant,
        }
    }

    /// Creates a culture from a language tag such as `en-US` or `tr-TR`.
    ///
    /// Turkic case mapping is selected for the `tr` and `az` languages.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let language = name
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        let case_mapping = match language.as_str() {
            "tr" | "az" => CaseMapping::Turkic,
            _ => CaseMapping::Invariant,
        };
        Self {
            name: SmolStr::new(name),
            case_mapping,
        }
    }

    /// Creates a culture with an explicit case mapping.
    #[must_use]
    pub fn with_case_mapping(name: &str, case_mapping: CaseMapping) -> Self {
        Self {
            name: SmolStr::new(name),
            case_mapping,
        }
    }

    /// Culture name; empty for the invariant culture.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Case folding rules.
    #[must_use]
    pub fn case_mapping(&self) -> CaseMapping {
        self.case_mapping
    }

    /// Whether this is the invariant culture.
    #[must_use]
    pub fn is_invariant(&self) -> bool {
        self.name.is_empty() && self.case_mapping == CaseMapping::Invariant
    }

    /// The culture used by the `CurrentCulture*` comparison modes on this thread.
    #[must_use]
    pub fn current() -> Self {
        CURRENT.with(|current| current.borrow().clone())
    }

    /// Replaces the current culture of this thread, returning the previous one.
    pub fn set_current(culture: Culture) -> Culture {
        tracing::debug!(culture = %culture.name, "current culture changed");
        CURRENT.with(|current| current.replace(culture))
    }

    /// Pushes `self` as the current culture until the returned guard drops.
    #[must_use = "the culture is restored as soon as the guard is dropped"]
    pub fn enter(self) -> CultureGuard {
        let previous = Self::set_current(self);
        CultureGuard {
            previous: Some(previous),
        }
    }

    /// Appends the lowercase comparison keys of `ch` to `out`.
    pub(crate) fn fold_into(&self, ch: char, out: &mut Vec<char>) {
        match (self.case_mapping, ch) {
            (CaseMapping::Turkic, 'I') => out.push('ı'),
            (CaseMapping::Turkic, 'İ') => out.push('i'),
            _ => out.extend(ch.to_lowercase()),
        }
    }
}

impl Default for Culture {
    fn default() -> Self {
        Self::invariant()
    }
}

/// Restores the previous current culture when dropped.
#[derive(Debug)]
pub struct CultureGuard {
    previous: Option<Culture>,
}

impl Drop for CultureGuard {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            Culture::set_current(previous);
        }
    }
}

/// Format characters that culture-aware comparisons skip.
pub(crate) fn is_ignorable(ch: char) -> bool {
    matches!(
        ch,
        '\u{00AD}' | '\u{200B}' | '\u{200C}' | '\u{200D}' | '\u{2060}' | '\u{FEFF}'
    )
}
