//! Standard layouts and pattern compilation.
//!
//! Patterns are `time` format descriptions. A one-character pattern names a
//! standard invariant layout instead, resolved per target type.

use time::format_description::{self, BorrowedFormatItem};

use crate::error::{InvariantError, Result};

/// Which temporal type a layout is resolved for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Date,
    DateTime,
    Offset,
}

const DATE_SHORT: &str = "[month]/[day]/[year]";
const DATE_LONG: &str = "[weekday], [day] [month repr:long] [year]";
const MONTH_DAY: &str = "[month repr:long] [day]";
const YEAR_MONTH: &str = "[year] [month repr:long]";
const TIME_SHORT: &str = "[hour]:[minute]";
const TIME_LONG: &str = "[hour]:[minute]:[second]";
const GENERAL_SHORT: &str = "[month]/[day]/[year] [hour]:[minute]";
const GENERAL_LONG: &str = "[month]/[day]/[year] [hour]:[minute]:[second]";
const FULL_SHORT: &str = "[weekday], [day] [month repr:long] [year] [hour]:[minute]";
const FULL_LONG: &str = "[weekday], [day] [month repr:long] [year] [hour]:[minute]:[second]";
const SORTABLE: &str = "[year]-[month]-[day]T[hour]:[minute]:[second]";
const UNIVERSAL_SORTABLE: &str = "[year]-[month]-[day] [hour]:[minute]:[second]Z";
const RFC1123: &str =
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT";
const RFC1123_DATE: &str = "[weekday repr:short], [day] [month repr:short] [year]";
const ROUND_TRIP_DATE: &str = "[year]-[month]-[day]";
const ROUND_TRIP: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:7]";
const ROUND_TRIP_OFFSET: &str = "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:7][offset_hour sign:mandatory]:[offset_minute]";
const GENERAL_LONG_OFFSET: &str =
    "[month]/[day]/[year] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]";

/// Layout used when no pattern is supplied.
pub(crate) fn default_layout(target: Target) -> &'static str {
    match target {
        Target::Date => DATE_SHORT,
        Target::DateTime => GENERAL_LONG,
        Target::Offset => GENERAL_LONG_OFFSET,
    }
}

/// A resolved pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Layout<'a> {
    pub(crate) description: &'a str,
    /// Offset values are converted to UTC before rendering.
    pub(crate) universal: bool,
}

/// Resolves a standard one-character pattern; anything longer is returned as is.
pub(crate) fn resolve<'a>(pattern: &'a str, target: Target) -> Layout<'a> {
    let mut chars = pattern.chars();
    let (Some(letter), None) = (chars.next(), chars.next()) else {
        return Layout {
            description: pattern,
            universal: false,
        };
    };
    let local = |description: &'a str| Layout {
        description,
        universal: false,
    };
    let universal = |description: &'a str| Layout {
        description,
        universal: true,
    };
    match (letter, target) {
        ('d', _) => local(DATE_SHORT),
        ('D', _) => local(DATE_LONG),
        ('M' | 'm', _) => local(MONTH_DAY),
        ('Y' | 'y', _) => local(YEAR_MONTH),
        ('O' | 'o', Target::Date) => local(ROUND_TRIP_DATE),
        ('O' | 'o', Target::DateTime) => local(ROUND_TRIP),
        ('O' | 'o', Target::Offset) => local(ROUND_TRIP_OFFSET),
        ('R' | 'r', Target::Date) => local(RFC1123_DATE),
        ('R' | 'r', _) => universal(RFC1123),
        ('f', _) => local(FULL_SHORT),
        ('F', _) => local(FULL_LONG),
        ('g', _) => local(GENERAL_SHORT),
        ('G', Target::Offset) => local(GENERAL_LONG_OFFSET),
        ('G', _) => local(GENERAL_LONG),
        ('s', _) => local(SORTABLE),
        ('t', _) => local(TIME_SHORT),
        ('T', _) => local(TIME_LONG),
        ('u', _) => universal(UNIVERSAL_SORTABLE),
        ('U', _) => universal(FULL_LONG),
        // Not a standard letter: a one-character description (usually a
        // literal), which `compile` accepts or rejects.
        _ => local(pattern),
    }
}

/// Compiles a format description, reporting failures against `kind`.
pub(crate) fn compile<'a>(
    description: &'a str,
    kind: &'static str,
) -> Result<Vec<BorrowedFormatItem<'a>>> {
    format_description::parse(description).map_err(|_| InvariantError::format(kind, description))
}

/// Patterns tried, in order, by the default date-time parser after the
/// RFC 3339 and RFC 2822 forms.
pub(crate) const PARSE_CANDIDATES: &[&str] = &[
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]",
    "[year]-[month]-[day]T[hour]:[minute]:[second]",
    "[year]-[month]-[day]T[hour]:[minute]",
    "[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]",
    "[year]-[month]-[day] [hour]:[minute]:[second]",
    "[year]-[month]-[day] [hour]:[minute]",
    "[year]-[month]-[day]",
    "[year]/[month padding:none]/[day padding:none]",
    "[month padding:none]/[day padding:none]/[year] [hour padding:none]:[minute]:[second].[subsecond]",
    "[month padding:none]/[day padding:none]/[year] [hour padding:none]:[minute]:[second]",
    "[month padding:none]/[day padding:none]/[year] [hour padding:none]:[minute]",
    "[month padding:none]/[day padding:none]/[year]",
    GENERAL_LONG_OFFSET,
    RFC1123,
    UNIVERSAL_SORTABLE,
];
