//! Time span parsing and formatting.
//!
//! Spans are counted in 100 ns ticks, the resolution of every invariant text
//! form. Finer `Duration` precision is truncated when rendering.

use std::fmt;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::convert::{InvariantFormat, InvariantParse, InvariantParseExact};
use crate::error::{InvariantError, Result};
use crate::number::is_white;

const KIND: &str = "timespan";

const TICKS_PER_SECOND: u64 = 10_000_000;
const FRACTION_DIGITS: usize = 7;
const MAX_DAYS: u64 = 10_675_199;
const MAX_TICKS: u64 = i64::MAX as u64;

/// Options for exact time span parsing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeSpanStyles {
    /// Negate values parsed with a custom pattern, which carries no sign.
    pub assume_negative: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Parts {
    negative: bool,
    days: u64,
    hours: u64,
    minutes: u64,
    seconds: u64,
    /// Sub-second remainder in ticks.
    fraction: u64,
}

impl Parts {
    fn from_duration(value: &Duration) -> Self {
        let ticks = value.whole_nanoseconds() / 100;
        let magnitude = ticks.unsigned_abs();
        let per_second = u128::from(TICKS_PER_SECOND);
        let total_seconds = u64::try_from(magnitude / per_second).unwrap_or(u64::MAX);
        Self {
            negative: ticks < 0,
            days: total_seconds / 86_400,
            hours: total_seconds / 3_600 % 24,
            minutes: total_seconds / 60 % 60,
            seconds: total_seconds % 60,
            fraction: u64::try_from(magnitude % per_second).unwrap_or_default(),
        }
    }

    fn into_duration(self, text: &str) -> Result<Duration> {
        let overflow = || InvariantError::overflow(KIND, text);
        if self.hours > 23 || self.minutes > 59 || self.seconds > 59 || self.days > MAX_DAYS {
            return Err(overflow());
        }
        let seconds = ((self.days * 24 + self.hours) * 60 + self.minutes) * 60 + self.seconds;
        let ticks = seconds * TICKS_PER_SECOND + self.fraction;
        if ticks > MAX_TICKS {
            return Err(overflow());
        }
        let whole = i64::try_from(seconds).map_err(|_| overflow())?;
        let nanos = i64::try_from(self.fraction * 100).map_err(|_| overflow())?;
        let value = Duration::seconds(whole) + Duration::nanoseconds(nanos);
        Ok(if self.negative { -value } else { value })
    }

    fn slot(&mut self, field: Field) -> &mut u64 {
        match field {
            Field::Days => &mut self.days,
            Field::Hours => &mut self.hours,
            Field::Minutes => &mut self.minutes,
            Field::Seconds => &mut self.seconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Days,
    Hours,
    Minutes,
    Seconds,
}

/// Scales up to seven fractional digits to ticks.
fn fraction_ticks(digits: &str, text: &str) -> Result<u64> {
    if digits.len() > FRACTION_DIGITS {
        return Err(InvariantError::overflow(KIND, text));
    }
    if digits.is_empty() {
        return Ok(0);
    }
    let value: u64 = digits
        .parse()
        .map_err(|_| InvariantError::format(KIND, text))?;
    Ok(value * 10_u64.pow((FRACTION_DIGITS - digits.len()) as u32))
}

fn component(digits: &str, text: &str) -> Result<u64> {
    // Only digit runs reach here, so a failure means the run is too long.
    digits
        .parse()
        .map_err(|_| InvariantError::overflow(KIND, text))
}

/// The general grammar: `[-]{ d | [d.]hh:mm[:ss[.f]] | d:hh:mm:ss[.f] }`.
///
/// Three colon-separated components are hours, minutes and seconds.
fn parse_general(text: &str, trim: bool) -> Result<Duration> {
    let invalid = || InvariantError::format(KIND, text);
    let body = if trim {
        text.trim_matches(is_white)
    } else {
        text
    };
    let (negative, mut rest) = match body.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, body),
    };

    let mut runs = Vec::new();
    let mut separators = String::new();
    loop {
        let end = rest
            .find(|ch: char| !ch.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(invalid());
        }
        runs.push(&rest[..end]);
        rest = &rest[end..];
        let mut chars = rest.chars();
        match chars.next() {
            None => break,
            Some(separator @ (':' | '.')) => {
                separators.push(separator);
                rest = chars.as_str();
            }
            Some(_) => return Err(invalid()),
        }
    }

    use Field::{Days, Hours, Minutes, Seconds};
    let has_fraction = separators.len() > 2 && separators.ends_with('.');
    if has_fraction {
        separators.pop();
    }
    let fields: &[Field] = match separators.as_str() {
        "" => &[Days],
        ":" => &[Hours, Minutes],
        "::" => &[Hours, Minutes, Seconds],
        ".:" => &[Days, Hours, Minutes],
        ".::" | ":::" => &[Days, Hours, Minutes, Seconds],
        _ => return Err(invalid()),
    };
    if has_fraction && fields.last() != Some(&Seconds) {
        return Err(invalid());
    }

    let mut parts = Parts {
        negative,
        ..Parts::default()
    };
    for (field, run) in fields.iter().zip(&runs) {
        *parts.slot(*field) = component(run, text)?;
    }
    if has_fraction {
        let run = runs.last().ok_or_else(invalid)?;
        parts.fraction = fraction_ticks(run, text)?;
    }
    parts.into_duration(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Field { field: Field, width: usize },
    Fraction { digits: usize, trim: bool },
    Literal(&'a str),
}

/// Splits a custom pattern into tokens.
///
/// Characters other than specifiers must be quoted or escaped.
fn tokenize(pattern: &str) -> Result<Vec<Token<'_>>> {
    let invalid = || InvariantError::format(KIND, pattern);
    let mut tokens = Vec::new();
    let mut rest = pattern;
    while let Some(ch) = rest.chars().next() {
        match ch {
            '\'' | '"' => {
                let body = &rest[1..];
                let end = body.find(ch).ok_or_else(invalid)?;
                tokens.push(Token::Literal(&body[..end]));
                rest = &body[end + 1..];
            }
            '\\' => {
                let escaped = rest[1..].chars().next().ok_or_else(invalid)?;
                let end = 1 + escaped.len_utf8();
                tokens.push(Token::Literal(&rest[1..end]));
                rest = &rest[end..];
            }
            '%' => {
                if !matches!(rest[1..].chars().next(), Some('d' | 'h' | 'm' | 's' | 'f' | 'F')) {
                    return Err(invalid());
                }
                rest = &rest[1..];
            }
            'd' | 'h' | 'm' | 's' | 'f' | 'F' => {
                let count = rest.bytes().take_while(|&b| char::from(b) == ch).count();
                let (token, max) = match ch {
                    'd' => (Token::Field { field: Field::Days, width: count }, 8),
                    'h' => (Token::Field { field: Field::Hours, width: count }, 2),
                    'm' => (Token::Field { field: Field::Minutes, width: count }, 2),
                    's' => (Token::Field { field: Field::Seconds, width: count }, 2),
                    'f' => (Token::Fraction { digits: count, trim: false }, FRACTION_DIGITS),
                    _ => (Token::Fraction { digits: count, trim: true }, FRACTION_DIGITS),
                };
                if count > max {
                    return Err(invalid());
                }
                tokens.push(token);
                rest = &rest[count..];
            }
            _ => return Err(invalid()),
        }
    }
    if tokens.is_empty() {
        return Err(invalid());
    }
    Ok(tokens)
}

/// Splits off between `min` and `max` leading ASCII digits.
fn take_digits(text: &str, min: usize, max: usize) -> Option<(&str, &str)> {
    let count = text
        .bytes()
        .take(max)
        .take_while(u8::is_ascii_digit)
        .count();
    (count >= min).then(|| text.split_at(count))
}

fn parse_custom(text: &str, tokens: &[Token<'_>], styles: TimeSpanStyles) -> Result<Duration> {
    let invalid = || InvariantError::format(KIND, text);
    let mut parts = Parts {
        negative: styles.assume_negative,
        ..Parts::default()
    };
    let mut rest = text;
    for token in tokens {
        rest = match *token {
            Token::Literal(literal) => rest.strip_prefix(literal).ok_or_else(invalid)?,
            Token::Field { field, width } => {
                let max = if field == Field::Days { 8 } else { 2 };
                let (digits, tail) = take_digits(rest, width, max).ok_or_else(invalid)?;
                *parts.slot(field) = component(digits, text)?;
                tail
            }
            Token::Fraction { digits, trim } => {
                let min = if trim { 0 } else { digits };
                let (run, tail) = take_digits(rest, min, digits).ok_or_else(invalid)?;
                parts.fraction = fraction_ticks(run, text)?;
                tail
            }
        };
    }
    if !rest.is_empty() {
        return Err(invalid());
    }
    parts.into_duration(text)
}

fn fraction_text(fraction: u64, digits: usize, trim: bool) -> String {
    let scaled = fraction / 10_u64.pow((FRACTION_DIGITS - digits) as u32);
    let mut text = format!("{scaled:0digits$}");
    if trim {
        let kept = text.trim_end_matches('0').len();
        text.truncate(kept);
    }
    text
}

fn write_sign(out: &mut dyn fmt::Write, parts: &Parts) -> fmt::Result {
    if parts.negative {
        out.write_char('-')?;
    }
    Ok(())
}

/// `c`: `[-][d.]hh:mm:ss[.fffffff]`.
fn write_constant(out: &mut dyn fmt::Write, parts: &Parts) -> fmt::Result {
    write_sign(out, parts)?;
    if parts.days > 0 {
        write!(out, "{}.", parts.days)?;
    }
    write!(out, "{:02}:{:02}:{:02}", parts.hours, parts.minutes, parts.seconds)?;
    if parts.fraction > 0 {
        write!(out, ".{:07}", parts.fraction)?;
    }
    Ok(())
}

/// `g`: `[-][d:]h:mm:ss[.FFFFFFF]`.
fn write_short(out: &mut dyn fmt::Write, parts: &Parts) -> fmt::Result {
    write_sign(out, parts)?;
    if parts.days > 0 {
        write!(out, "{}:", parts.days)?;
    }
    write!(out, "{}:{:02}:{:02}", parts.hours, parts.minutes, parts.seconds)?;
    if parts.fraction > 0 {
        write!(out, ".{}", fraction_text(parts.fraction, FRACTION_DIGITS, true))?;
    }
    Ok(())
}

/// `G`: `[-]d:hh:mm:ss.fffffff`.
fn write_long(out: &mut dyn fmt::Write, parts: &Parts) -> fmt::Result {
    write_sign(out, parts)?;
    write!(
        out,
        "{}:{:02}:{:02}:{:02}.{:07}",
        parts.days, parts.hours, parts.minutes, parts.seconds, parts.fraction
    )
}

fn write_custom(out: &mut dyn fmt::Write, parts: &Parts, tokens: &[Token<'_>]) -> fmt::Result {
    let mut parts = *parts;
    for token in tokens {
        match *token {
            Token::Literal(literal) => out.write_str(literal)?,
            Token::Field { field, width } => write!(out, "{:0width$}", *parts.slot(field))?,
            Token::Fraction { digits, trim } => {
                out.write_str(&fraction_text(parts.fraction, digits, trim))?;
            }
        }
    }
    Ok(())
}

fn is_standard(format: &str) -> bool {
    matches!(format, "c" | "t" | "T" | "g" | "G")
}

impl InvariantParse for Duration {
    const KIND: &'static str = KIND;

    fn parse_invariant(text: &str) -> Result<Self> {
        parse_general(text, true)
    }
}

impl InvariantParseExact for Duration {
    type Styles = TimeSpanStyles;

    /// Standard formats use the general grammar without surrounding
    /// whitespace; anything else is a custom pattern.
    fn parse_exact_invariant(text: &str, format: &str, styles: TimeSpanStyles) -> Result<Self> {
        if is_standard(format) {
            return parse_general(text, false);
        }
        let tokens = tokenize(format)?;
        parse_custom(text, &tokens, styles)
    }
}

impl InvariantFormat for Duration {
    fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
        let parts = Parts::from_duration(self);
        match format.unwrap_or("c") {
            "c" | "t" | "T" => write_constant(out, &parts)?,
            "g" => write_short(out, &parts)?,
            "G" => write_long(out, &parts)?,
            pattern => write_custom(out, &parts, &tokenize(pattern)?)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Duration {
        Duration::new(93_784, 500_000_000)
    }

    #[test]
    fn general_grammar_accepts_every_shape() {
        assert_eq!(Duration::parse_invariant("3"), Ok(Duration::days(3)));
        assert_eq!(Duration::parse_invariant("  -00:30 "), Ok(-Duration::minutes(30)));
        assert_eq!(
            Duration::parse_invariant("1:2:3"),
            Ok(Duration::hours(1) + Duration::minutes(2) + Duration::seconds(3))
        );
        assert_eq!(Duration::parse_invariant("1.02:03:04.5"), Ok(sample()));
        assert_eq!(Duration::parse_invariant("1:02:03:04.5"), Ok(sample()));
        assert_eq!(
            Duration::parse_invariant("0:0:0.0000001"),
            Ok(Duration::nanoseconds(100))
        );
    }

    #[test]
    fn out_of_range_components_overflow() {
        for text in ["24:00", "00:60", "00:00:60", "0:0:0.12345678", "10675200"] {
            assert!(
                matches!(
                    Duration::parse_invariant(text),
                    Err(InvariantError::Overflow { kind: "timespan", .. })
                ),
                "{text}"
            );
        }
        assert!(Duration::parse_invariant("10675199.02:48:05.4775807").is_ok());
        assert!(Duration::parse_invariant("10675199.02:48:05.4775808").is_err());
    }

    #[test]
    fn malformed_text_is_format_error() {
        for text in ["", "-", "abc", "1:", "1::2", "1.2.3", "1:2:3:4:5", "+1"] {
            assert!(
                matches!(
                    Duration::parse_invariant(text),
                    Err(InvariantError::Format { .. })
                ),
                "{text}"
            );
        }
    }

    #[test]
    fn standard_formats() {
        let value = sample();
        assert_eq!(value.to_string_invariant(), "1.02:03:04.5000000");
        assert_eq!(value.to_string_invariant_with("g").unwrap(), "1:2:03:04.5");
        assert_eq!(value.to_string_invariant_with("G").unwrap(), "1:02:03:04.5000000");
        assert_eq!((-Duration::minutes(90)).to_string_invariant(), "-01:30:00");
        assert_eq!(Duration::ZERO.to_string_invariant_with("g").unwrap(), "0:00:00");
    }

    #[test]
    fn custom_patterns() {
        let value = sample();
        assert_eq!(
            value.to_string_invariant_with(r"dd\.hh\:mm\:ss\.fff").unwrap(),
            "01.02:03:04.500"
        );
        assert_eq!(value.to_string_invariant_with("h'h 'm'm'FF").unwrap(), "2h 3m5");
        assert_eq!(value.to_string_invariant_with("%d").unwrap(), "1");
        assert!(value.to_string_invariant_with("hh:mm").is_err());
        assert!(value.to_string_invariant_with("hhh").is_err());
        assert!(value.to_string_invariant_with("'open").is_err());
    }

    #[test]
    fn custom_parse_honours_assume_negative() {
        let styles = TimeSpanStyles {
            assume_negative: true,
        };
        assert_eq!(
            Duration::parse_exact_invariant("02:03", r"hh\:mm", styles),
            Ok(-(Duration::hours(2) + Duration::minutes(3)))
        );
        assert_eq!(
            Duration::parse_exact_invariant("0203", "hhmm", TimeSpanStyles::default()),
            Ok(Duration::hours(2) + Duration::minutes(3))
        );
        assert!(Duration::parse_exact_invariant("2:03", r"hh\:mm", styles).is_err());
        assert!(Duration::parse_exact_invariant("02:03x", r"hh\:mm", styles).is_err());
    }

    #[test]
    fn standard_exact_parse_rejects_surrounding_white() {
        let styles = TimeSpanStyles::default();
        assert_eq!(Duration::parse_exact_invariant("1:02:03:04.5", "g", styles), Ok(sample()));
        assert!(Duration::parse_exact_invariant(" 00:01", "c", styles).is_err());
    }

    #[test]
    fn sub_tick_precision_is_truncated() {
        let value = Duration::new(-5, -1_250);
        assert_eq!(value.to_string_invariant(), "-00:00:05.0000012");
        assert_eq!(
            Duration::parse_invariant("-00:00:05.0000012"),
            Ok(Duration::new(-5, -1_200))
        );
    }
}
