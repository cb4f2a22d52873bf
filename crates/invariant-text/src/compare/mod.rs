//! String comparison and search with an explicit comparison mode.
//!
//! The free functions take the receiver as `Option<&str>` and report a missing
//! one as [`InvariantError::ArgumentNull`]; equality treats two missing
//! operands as equal instead. Offsets are byte offsets into the receiver and
//! must fall on character boundaries. [`StrExt`] offers the same operations
//! as named methods on `str`, one per mode.

mod search;

use serde::{Deserialize, Serialize};

use crate::error::{InvariantError, Result};

use search::Folding;

/// How two strings are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StringComparison {
    /// Culture rules of [`Culture::current`](crate::Culture::current).
    CurrentCulture,
    /// Culture rules of the current culture, ignoring case.
    CurrentCultureIgnoreCase,
    /// Culture rules of the invariant culture.
    InvariantCulture,
    /// Culture rules of the invariant culture, ignoring case.
    InvariantCultureIgnoreCase,
    /// Exact comparison of the UTF-8 bytes.
    Ordinal,
    /// Character-by-character comparison after simple uppercase mapping.
    OrdinalIgnoreCase,
}

impl StringComparison {
    /// All modes, in declaration order.
    pub const ALL: [StringComparison; 6] = [
        Self::CurrentCulture,
        Self::CurrentCultureIgnoreCase,
        Self::InvariantCulture,
        Self::InvariantCultureIgnoreCase,
        Self::Ordinal,
        Self::OrdinalIgnoreCase,
    ];

    /// Whether letters differing only in case compare equal.
    #[must_use]
    pub fn ignores_case(self) -> bool {
        matches!(
            self,
            Self::CurrentCultureIgnoreCase
                | Self::InvariantCultureIgnoreCase
                | Self::OrdinalIgnoreCase
        )
    }

    /// Whether the mode compares code units rather than culture keys.
    #[must_use]
    pub fn is_ordinal(self) -> bool {
        matches!(self, Self::Ordinal | Self::OrdinalIgnoreCase)
    }
}

fn receiver(s: Option<&str>) -> Result<&str> {
    s.ok_or(InvariantError::ArgumentNull { param: "s" })
}

fn out_of_range(param: &'static str, value: usize) -> InvariantError {
    InvariantError::ArgumentOutOfRange { param, value }
}

/// Validates `s[start..start + count]`.
fn window(s: &str, start: usize, count: usize) -> Result<&str> {
    if !s.is_char_boundary(start) {
        return Err(out_of_range("start_index", start));
    }
    start
        .checked_add(count)
        .filter(|&end| s.is_char_boundary(end))
        .map(|end| &s[start..end])
        .ok_or_else(|| out_of_range("count", count))
}

/// Validates `s[end - count..end]`.
fn window_before(s: &str, end: usize, count: usize) -> Result<&str> {
    if !s.is_char_boundary(end) {
        return Err(out_of_range("end_index", end));
    }
    end.checked_sub(count)
        .filter(|&start| s.is_char_boundary(start))
        .map(|start| &s[start..end])
        .ok_or_else(|| out_of_range("count", count))
}

fn starts_with_in(s: &str, value: &str, comparison: StringComparison) -> bool {
    if comparison == StringComparison::Ordinal {
        return s.starts_with(value);
    }
    let folding = Folding::new(comparison);
    search::starts_with(&folding.keys(s, 0), &folding.needle(value))
}

fn ends_with_in(s: &str, value: &str, comparison: StringComparison) -> bool {
    if comparison == StringComparison::Ordinal {
        return s.ends_with(value);
    }
    let folding = Folding::new(comparison);
    search::ends_with(&folding.keys(s, 0), &folding.needle(value))
}

/// First match inside `haystack`, which starts at byte `base` of the receiver.
fn find_in(haystack: &str, base: usize, value: &str, comparison: StringComparison) -> Option<usize> {
    if comparison == StringComparison::Ordinal {
        return haystack.find(value).map(|at| base + at);
    }
    let folding = Folding::new(comparison);
    let needle = folding.needle(value);
    if needle.is_empty() {
        return Some(base);
    }
    search::find(&folding.keys(haystack, base), &needle)
}

/// Last match inside `haystack`, which starts at byte `base` of the receiver.
fn rfind_in(
    haystack: &str,
    base: usize,
    value: &str,
    comparison: StringComparison,
) -> Option<usize> {
    if comparison == StringComparison::Ordinal {
        return haystack.rfind(value).map(|at| base + at);
    }
    let folding = Folding::new(comparison);
    let needle = folding.needle(value);
    if needle.is_empty() {
        return Some(base + haystack.len());
    }
    search::rfind(&folding.keys(haystack, base), &needle)
}

fn equals_in(a: &str, b: &str, comparison: StringComparison) -> bool {
    if comparison == StringComparison::Ordinal {
        return a == b;
    }
    let folding = Folding::new(comparison);
    search::same(&folding.keys(a, 0), &folding.keys(b, 0))
}

/// Whether `s` begins with `value`.
pub fn starts_with(s: Option<&str>, value: &str, comparison: StringComparison) -> Result<bool> {
    Ok(starts_with_in(receiver(s)?, value, comparison))
}

/// Whether `s` ends with `value`.
pub fn ends_with(s: Option<&str>, value: &str, comparison: StringComparison) -> Result<bool> {
    Ok(ends_with_in(receiver(s)?, value, comparison))
}

/// Byte offset of the first match of `value` in `s`; an empty `value`
/// matches at `0`.
pub fn index_of(
    s: Option<&str>,
    value: &str,
    comparison: StringComparison,
) -> Result<Option<usize>> {
    let s = receiver(s)?;
    Ok(find_in(s, 0, value, comparison))
}

/// Like [`index_of`], searching from byte offset `start` to the end.
pub fn index_of_from(
    s: Option<&str>,
    value: &str,
    start: usize,
    comparison: StringComparison,
) -> Result<Option<usize>> {
    let s = receiver(s)?;
    let count = s.len().saturating_sub(start);
    index_of_range(Some(s), value, start, count, comparison)
}

/// Like [`index_of`], searching the `count` bytes starting at `start`.
///
/// A match must lie entirely inside the window.
pub fn index_of_range(
    s: Option<&str>,
    value: &str,
    start: usize,
    count: usize,
    comparison: StringComparison,
) -> Result<Option<usize>> {
    let haystack = window(receiver(s)?, start, count)?;
    Ok(find_in(haystack, start, value, comparison))
}

/// Byte offset of the last match of `value` in `s`; an empty `value`
/// matches at `s.len()`.
pub fn last_index_of(
    s: Option<&str>,
    value: &str,
    comparison: StringComparison,
) -> Result<Option<usize>> {
    let s = receiver(s)?;
    Ok(rfind_in(s, 0, value, comparison))
}

/// Like [`last_index_of`], searching `s[..end]`.
pub fn last_index_of_from(
    s: Option<&str>,
    value: &str,
    end: usize,
    comparison: StringComparison,
) -> Result<Option<usize>> {
    last_index_of_range(s, value, end, end, comparison)
}

/// Like [`last_index_of`], searching the `count` bytes that end at `end`.
pub fn last_index_of_range(
    s: Option<&str>,
    value: &str,
    end: usize,
    count: usize,
    comparison: StringComparison,
) -> Result<Option<usize>> {
    let haystack = window_before(receiver(s)?, end, count)?;
    Ok(rfind_in(haystack, end - haystack.len(), value, comparison))
}

/// Equality with absent operands: two `None`s are equal, `None` never equals
/// a present string.
#[must_use]
pub fn equals(a: Option<&str>, b: Option<&str>, comparison: StringComparison) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => equals_in(a, b, comparison),
        _ => false,
    }
}

macro_rules! named_comparisons {
    ($(
        $mode:ident {
            $starts:ident, $ends:ident,
            $index:ident, $index_from:ident, $index_range:ident,
            $last:ident, $last_from:ident, $last_range:ident,
            $equals:ident $(,)?
        }
    )*) => {
        /// Named shorthands for the search operations, one family per mode.
        ///
        /// Offsets follow the free functions of this module; a present
        /// receiver means only range arguments can fail.
        pub trait StrExt: AsRef<str> {
            $(
                #[doc = concat!("[`starts_with`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $starts(&self, value: &str) -> bool {
                    starts_with_in(self.as_ref(), value, StringComparison::$mode)
                }

                #[doc = concat!("[`ends_with`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $ends(&self, value: &str) -> bool {
                    ends_with_in(self.as_ref(), value, StringComparison::$mode)
                }

                #[doc = concat!("[`index_of`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $index(&self, value: &str) -> Option<usize> {
                    find_in(self.as_ref(), 0, value, StringComparison::$mode)
                }

                #[doc = concat!("[`index_of_from`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $index_from(&self, value: &str, start: usize) -> Result<Option<usize>> {
                    index_of_from(Some(self.as_ref()), value, start, StringComparison::$mode)
                }

                #[doc = concat!("[`index_of_range`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $index_range(&self, value: &str, start: usize, count: usize) -> Result<Option<usize>> {
                    index_of_range(Some(self.as_ref()), value, start, count, StringComparison::$mode)
                }

                #[doc = concat!("[`last_index_of`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $last(&self, value: &str) -> Option<usize> {
                    rfind_in(self.as_ref(), 0, value, StringComparison::$mode)
                }

                #[doc = concat!("[`last_index_of_from`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $last_from(&self, value: &str, end: usize) -> Result<Option<usize>> {
                    last_index_of_from(Some(self.as_ref()), value, end, StringComparison::$mode)
                }

                #[doc = concat!("[`last_index_of_range`] with [`StringComparison::", stringify!($mode), "`].")]
                fn $last_range(&self, value: &str, end: usize, count: usize) -> Result<Option<usize>> {
                    last_index_of_range(Some(self.as_ref()), value, end, count, StringComparison::$mode)
                }
            )*
        }

        impl StrExt for str {}

        $(
            #[doc = concat!("[`equals`] with [`StringComparison::", stringify!($mode), "`].")]
            #[must_use]
            pub fn $equals(a: Option<&str>, b: Option<&str>) -> bool {
                equals(a, b, StringComparison::$mode)
            }
        )*
    };
}

named_comparisons! {
    CurrentCultureIgnoreCase {
        starts_with_ignore_case, ends_with_ignore_case,
        index_of_ignore_case, index_of_ignore_case_from, index_of_ignore_case_range,
        last_index_of_ignore_case, last_index_of_ignore_case_from, last_index_of_ignore_case_range,
        equals_ignore_case,
    }
    InvariantCulture {
        starts_with_invariant, ends_with_invariant,
        index_of_invariant, index_of_invariant_from, index_of_invariant_range,
        last_index_of_invariant, last_index_of_invariant_from, last_index_of_invariant_range,
        equals_invariant,
    }
    InvariantCultureIgnoreCase {
        starts_with_invariant_ignore_case, ends_with_invariant_ignore_case,
        index_of_invariant_ignore_case, index_of_invariant_ignore_case_from,
        index_of_invariant_ignore_case_range,
        last_index_of_invariant_ignore_case, last_index_of_invariant_ignore_case_from,
        last_index_of_invariant_ignore_case_range,
        equals_invariant_ignore_case,
    }
    Ordinal {
        starts_with_ordinal, ends_with_ordinal,
        index_of_ordinal, index_of_ordinal_from, index_of_ordinal_range,
        last_index_of_ordinal, last_index_of_ordinal_from, last_index_of_ordinal_range,
        equals_ordinal,
    }
    OrdinalIgnoreCase {
        starts_with_ordinal_ignore_case, ends_with_ordinal_ignore_case,
        index_of_ordinal_ignore_case, index_of_ordinal_ignore_case_from,
        index_of_ordinal_ignore_case_range,
        last_index_of_ordinal_ignore_case, last_index_of_ordinal_ignore_case_from,
        last_index_of_ordinal_ignore_case_range,
        equals_ordinal_ignore_case,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Culture;
    use StringComparison::*;

    #[test]
    fn absent_receiver_is_argument_null() {
        let null = InvariantError::ArgumentNull { param: "s" };
        assert_eq!(starts_with(None, "x", Ordinal), Err(null.clone()));
        assert_eq!(ends_with(None, "x", InvariantCulture), Err(null.clone()));
        assert_eq!(index_of(None, "x", Ordinal), Err(null));
        assert!(matches!(
            last_index_of_range(None, "x", 0, 0, OrdinalIgnoreCase),
            Err(InvariantError::ArgumentNull { .. })
        ));
    }

    #[test]
    fn equality_handles_absent_operands() {
        for mode in StringComparison::ALL {
            assert!(equals(None, None, mode));
            assert!(!equals(None, Some("x"), mode));
            assert!(!equals(Some("x"), None, mode));
        }
        assert!(!equals(Some("ABC"), Some("abc"), Ordinal));
        assert!(equals(Some("ABC"), Some("abc"), OrdinalIgnoreCase));
        assert!(equals(Some("ABC"), Some("abc"), InvariantCultureIgnoreCase));
        assert!(!equals(Some("ABC"), Some("abc"), InvariantCulture));
    }

    #[test]
    fn culture_modes_skip_ignorable_characters() {
        assert!(equals(Some("co\u{00AD}op"), Some("coop"), InvariantCulture));
        assert!(!equals(Some("co\u{00AD}op"), Some("coop"), Ordinal));
        assert!("\u{200B}abc".starts_with_invariant("ab"));
        assert!("abc\u{FEFF}".ends_with_invariant("bc"));
        assert_eq!("a\u{00AD}bc".index_of_invariant("bc"), Some(3));
    }

    #[test]
    fn current_culture_follows_thread_setting() {
        assert!(!"TITLE".starts_with_ignore_case("tı"));
        let _guard = Culture::new("tr-TR").enter();
        assert!("TITLE".starts_with_ignore_case("tı"));
        assert!(!"TITLE".starts_with_invariant_ignore_case("tı"));
    }

    #[test]
    fn index_of_respects_windows() {
        let s = Some("abcabc");
        assert_eq!(index_of(s, "z", Ordinal), Ok(None));
        assert_eq!(index_of(s, "bc", Ordinal), Ok(Some(1)));
        assert_eq!(index_of_from(s, "bc", 2, Ordinal), Ok(Some(4)));
        assert_eq!(index_of_range(s, "bc", 2, 2, Ordinal), Ok(None));
        assert_eq!(index_of_range(s, "BC", 3, 3, OrdinalIgnoreCase), Ok(Some(4)));
        assert_eq!(index_of_from(s, "", 6, Ordinal), Ok(Some(6)));
        assert_eq!(
            index_of_from(s, "a", 7, Ordinal),
            Err(InvariantError::ArgumentOutOfRange {
                param: "start_index",
                value: 7
            })
        );
        assert_eq!(
            index_of_range(s, "a", 1, 9, Ordinal),
            Err(InvariantError::ArgumentOutOfRange {
                param: "count",
                value: 9
            })
        );
    }

    #[test]
    fn last_index_of_respects_windows() {
        let s = Some("abcabc");
        assert_eq!(last_index_of(s, "bc", Ordinal), Ok(Some(4)));
        assert_eq!(last_index_of_from(s, "bc", 5, Ordinal), Ok(Some(1)));
        assert_eq!(last_index_of_range(s, "ab", 6, 3, Ordinal), Ok(Some(3)));
        assert_eq!(last_index_of_range(s, "ab", 4, 3, Ordinal), Ok(None));
        assert_eq!(last_index_of(s, "", InvariantCulture), Ok(Some(6)));
        assert_eq!("ABCabc".last_index_of_invariant_ignore_case("b"), Some(4));
    }

    #[test]
    fn offsets_must_be_character_boundaries() {
        let s = Some("día");
        assert!(matches!(
            index_of_from(s, "a", 2, Ordinal),
            Err(InvariantError::ArgumentOutOfRange {
                param: "start_index",
                ..
            })
        ));
        assert_eq!(index_of(s, "a", Ordinal), Ok(Some(3)));
        assert_eq!("DÍA".index_of_ordinal_ignore_case("ía"), Some(1));
    }
}
