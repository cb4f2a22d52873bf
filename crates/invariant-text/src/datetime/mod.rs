//! Invariant date and time conversions.
//!
//! Dates, date-times and offset date-times go through the `time` crate's
//! format descriptions; time spans have their own grammar in [`span`].

mod pattern;
mod span;

pub use span::TimeSpanStyles;

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use time::error::{Parse as ParseError, TryFromParsed};
use time::format_description::well_known::{Rfc2822, Rfc3339};
use time::format_description::BorrowedFormatItem;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

use crate::convert::{InvariantFormat, InvariantParse, InvariantParseExact};
use crate::error::{InvariantError, Result};
use crate::number::is_white;

use pattern::{compile, default_layout, resolve, Target, PARSE_CANDIDATES};

/// Options for exact date/time parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DateTimeStyles {
    /// Ignore whitespace before the text.
    pub allow_leading_white: bool,
    /// Ignore whitespace after the text.
    pub allow_trailing_white: bool,
    /// Treat any run of inner whitespace as a single space.
    pub allow_inner_white: bool,
    /// Convert offset date-times to UTC after parsing.
    pub adjust_to_universal: bool,
    /// Offset, in minutes east of UTC, assumed by offset date-time patterns
    /// that carry no offset.
    pub assume_offset_minutes: i16,
}

impl DateTimeStyles {
    /// Every whitespace allowance enabled.
    #[must_use]
    pub fn allow_white_spaces() -> Self {
        Self {
            allow_leading_white: true,
            allow_trailing_white: true,
            allow_inner_white: true,
            ..Self::default()
        }
    }

    fn assumed_offset(self, kind: &'static str, text: &str) -> Result<UtcOffset> {
        UtcOffset::from_whole_seconds(i32::from(self.assume_offset_minutes) * 60)
            .map_err(|_| InvariantError::overflow(kind, text))
    }

    fn apply<'a>(self, text: &'a str) -> Cow<'a, str> {
        let mut text = text;
        if self.allow_leading_white {
            text = text.trim_start_matches(is_white);
        }
        if self.allow_trailing_white {
            text = text.trim_end_matches(is_white);
        }
        if !self.allow_inner_white || !text.contains(is_white) {
            return Cow::Borrowed(text);
        }
        let mut collapsed = String::with_capacity(text.len());
        let mut in_white = false;
        for ch in text.chars() {
            if is_white(ch) {
                if !in_white {
                    collapsed.push(' ');
                }
                in_white = true;
            } else {
                collapsed.push(ch);
                in_white = false;
            }
        }
        Cow::Owned(collapsed)
    }
}

fn insufficient(error: &ParseError) -> bool {
    matches!(
        error,
        ParseError::TryFromParsed(TryFromParsed::InsufficientInformation)
    )
}

/// Parses `text` with compiled `items`, filling in what the pattern leaves out:
/// a missing time of day is midnight, a missing offset is `assumed`.
fn parse_offset_items(
    text: &str,
    items: &[BorrowedFormatItem<'_>],
    assumed: UtcOffset,
) -> std::result::Result<OffsetDateTime, ParseError> {
    match OffsetDateTime::parse(text, items) {
        Err(error) if insufficient(&error) => {
            parse_primitive_items(text, items).map(|value| value.assume_offset(assumed))
        }
        other => other,
    }
}

fn parse_primitive_items(
    text: &str,
    items: &[BorrowedFormatItem<'_>],
) -> std::result::Result<PrimitiveDateTime, ParseError> {
    match PrimitiveDateTime::parse(text, items) {
        Err(error) if insufficient(&error) => Date::parse(text, items).map(Date::midnight),
        other => other,
    }
}

/// `value` in UTC; `None` when the shifted value leaves the supported years.
fn to_utc(value: OffsetDateTime) -> Option<OffsetDateTime> {
    value.checked_to_offset(UtcOffset::UTC)
}

fn utc_wall_clock(
    value: OffsetDateTime,
    kind: &'static str,
    text: &str,
) -> Result<PrimitiveDateTime> {
    let utc = to_utc(value).ok_or_else(|| InvariantError::overflow(kind, text))?;
    Ok(PrimitiveDateTime::new(utc.date(), utc.time()))
}

/// Default offset date-time grammar: RFC 3339, RFC 2822, then the
/// invariant candidates.
fn parse_offset_default(text: &str, kind: &'static str) -> Result<OffsetDateTime> {
    let trimmed = text.trim_matches(is_white);
    if let Ok(value) = OffsetDateTime::parse(trimmed, &Rfc3339) {
        return Ok(value);
    }
    if let Ok(value) = OffsetDateTime::parse(trimmed, &Rfc2822) {
        return Ok(value);
    }
    for candidate in PARSE_CANDIDATES {
        let items = compile(candidate, kind)?;
        if let Ok(value) = parse_offset_items(trimmed, &items, UtcOffset::UTC) {
            return Ok(value);
        }
    }
    Err(InvariantError::format(kind, text))
}

fn format_with(
    out: &mut dyn fmt::Write,
    kind: &'static str,
    description: &str,
    render: impl FnOnce(&[BorrowedFormatItem<'_>]) -> std::result::Result<String, time::error::Format>,
) -> Result<()> {
    let items = compile(description, kind)?;
    let rendered = render(&items).map_err(|_| InvariantError::format(kind, description))?;
    out.write_str(&rendered)?;
    Ok(())
}

impl InvariantParse for Date {
    const KIND: &'static str = "date";

    fn parse_invariant(text: &str) -> Result<Self> {
        parse_offset_default(text, Self::KIND).map(OffsetDateTime::date)
    }
}

impl InvariantParseExact for Date {
    type Styles = DateTimeStyles;

    fn parse_exact_invariant(text: &str, format: &str, styles: DateTimeStyles) -> Result<Self> {
        let layout = resolve(format, Target::Date);
        let items = compile(layout.description, Self::KIND)?;
        let input = styles.apply(text);
        Date::parse(&input, &items).map_err(|_| InvariantError::format(Self::KIND, text))
    }
}

impl InvariantFormat for Date {
    fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
        let description = format.map_or(default_layout(Target::Date), |format| {
            resolve(format, Target::Date).description
        });
        format_with(out, Self::KIND, description, |items| self.format(items))
    }
}

impl InvariantParse for PrimitiveDateTime {
    const KIND: &'static str = "datetime";

    /// Text carrying an offset is converted to UTC wall-clock time.
    fn parse_invariant(text: &str) -> Result<Self> {
        let value = parse_offset_default(text, Self::KIND)?;
        utc_wall_clock(value, Self::KIND, text)
    }
}

impl InvariantParseExact for PrimitiveDateTime {
    type Styles = DateTimeStyles;

    fn parse_exact_invariant(text: &str, format: &str, styles: DateTimeStyles) -> Result<Self> {
        let layout = resolve(format, Target::DateTime);
        let items = compile(layout.description, Self::KIND)?;
        let input = styles.apply(text);
        match OffsetDateTime::parse(&input, &items) {
            Ok(value) => utc_wall_clock(value, Self::KIND, text),
            Err(error) if insufficient(&error) => parse_primitive_items(&input, &items)
                .map_err(|_| InvariantError::format(Self::KIND, text)),
            Err(_) => Err(InvariantError::format(Self::KIND, text)),
        }
    }
}

impl InvariantFormat for PrimitiveDateTime {
    fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
        let description = format.map_or(default_layout(Target::DateTime), |format| {
            resolve(format, Target::DateTime).description
        });
        format_with(out, Self::KIND, description, |items| self.format(items))
    }
}

impl InvariantParse for OffsetDateTime {
    const KIND: &'static str = "datetime offset";

    /// Text without an offset is taken as UTC.
    fn parse_invariant(text: &str) -> Result<Self> {
        parse_offset_default(text, Self::KIND)
    }
}

impl InvariantParseExact for OffsetDateTime {
    type Styles = DateTimeStyles;

    fn parse_exact_invariant(text: &str, format: &str, styles: DateTimeStyles) -> Result<Self> {
        let layout = resolve(format, Target::Offset);
        let items = compile(layout.description, Self::KIND)?;
        let input = styles.apply(text);
        let assumed = if layout.universal {
            UtcOffset::UTC
        } else {
            styles.assumed_offset(Self::KIND, text)?
        };
        let value = parse_offset_items(&input, &items, assumed)
            .map_err(|_| InvariantError::format(Self::KIND, text))?;
        if styles.adjust_to_universal {
            to_utc(value).ok_or_else(|| InvariantError::overflow(Self::KIND, text))
        } else {
            Ok(value)
        }
    }
}

impl InvariantFormat for OffsetDateTime {
    fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
        let layout = format.map_or_else(
            || resolve("G", Target::Offset),
            |format| resolve(format, Target::Offset),
        );
        let value = if layout.universal {
            to_utc(*self).ok_or_else(|| {
                InvariantError::overflow(Self::KIND, format.unwrap_or(layout.description))
            })?
        } else {
            *self
        };
        format_with(out, Self::KIND, layout.description, |items| value.format(items))
    }
}
