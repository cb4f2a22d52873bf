//! Invariant numeric format strings.
//!
//! A format string is one specifier letter followed by an optional precision
//! of up to two digits (`N2`, `X8`, `E`). Every specifier works on a decimal
//! digit buffer, so integers and floats share the same layout code.

use std::fmt::Write;

use crate::error::{InvariantError, Result};

const GROUP_SEPARATOR: char = ',';
const DECIMAL_SEPARATOR: char = '.';
const CURRENCY_SYMBOL: char = '¤';
const PERCENT_SUFFIX: &str = " %";
const POSITIVE_INFINITY: &str = "Infinity";
const NEGATIVE_INFINITY: &str = "-Infinity";
const NAN: &str = "NaN";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Specifier {
    Currency,
    Decimal,
    Exponent { upper: bool },
    Fixed,
    General { upper: bool },
    Number,
    Percent,
    RoundTrip,
    Hex { upper: bool },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberFormat {
    specifier: Specifier,
    precision: Option<usize>,
}

fn parse_format(format: &str) -> Option<NumberFormat> {
    if format.is_empty() {
        return Some(NumberFormat {
            specifier: Specifier::General { upper: true },
            precision: None,
        });
    }
    let mut chars = format.chars();
    let letter = chars.next()?;
    let rest = chars.as_str();
    if rest.len() > 2 || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let precision = if rest.is_empty() {
        None
    } else {
        Some(rest.parse().ok()?)
    };
    let specifier = match letter {
        'C' | 'c' => Specifier::Currency,
        'D' | 'd' => Specifier::Decimal,
        'E' => Specifier::Exponent { upper: true },
        'e' => Specifier::Exponent { upper: false },
        'F' | 'f' => Specifier::Fixed,
        'G' => Specifier::General { upper: true },
        'g' => Specifier::General { upper: false },
        'N' | 'n' => Specifier::Number,
        'P' | 'p' => Specifier::Percent,
        'R' | 'r' => Specifier::RoundTrip,
        'X' => Specifier::Hex { upper: true },
        'x' => Specifier::Hex { upper: false },
        _ => return None,
    };
    Some(NumberFormat {
        specifier,
        precision,
    })
}

/// Floating-point classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FloatClass {
    Finite,
    Infinite,
    NaN,
}

/// A number prepared for formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Operand {
    Integer {
        negative: bool,
        magnitude: u128,
        /// Two's complement bit pattern at the width of the source type.
        bits: u128,
    },
    Float {
        negative: bool,
        class: FloatClass,
        /// Shortest round-trip rendering of the magnitude in `{:e}` form.
        shortest: String,
        /// Significant digits after which the general layout switches to
        /// scientific notation.
        general_precision: usize,
    },
}

/// Decimal digits of a value: `0.DIGITS × 10^scale`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Digits {
    negative: bool,
    digits: Vec<u8>,
    scale: i32,
}

impl Digits {
    fn from_integer(negative: bool, magnitude: u128) -> Self {
        let text = magnitude.to_string();
        let mut digits = Self {
            negative,
            scale: text.len() as i32,
            digits: text.into_bytes(),
        };
        digits.normalize();
        digits
    }

    /// Parses the `{:e}` rendering produced by `std` (`1.2345e-7`).
    fn from_scientific(negative: bool, text: &str) -> Self {
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text, "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let digits: Vec<u8> = mantissa.bytes().filter(u8::is_ascii_digit).collect();
        let mut digits = Self {
            negative,
            digits,
            scale: exponent + 1,
        };
        digits.normalize();
        digits
    }

    fn is_zero(&self) -> bool {
        self.digits.is_empty()
    }

    fn normalize(&mut self) {
        let leading = self.digits.iter().take_while(|&&d| d == b'0').count();
        if leading > 0 {
            self.digits.drain(..leading);
            self.scale -= leading as i32;
        }
        while self.digits.last() == Some(&b'0') {
            self.digits.pop();
        }
        if self.digits.is_empty() {
            self.scale = 0;
        }
    }

    /// Keeps `keep` significant digits, rounding half away from zero.
    fn round(&mut self, keep: i32) {
        if keep < 0 {
            self.digits.clear();
            self.normalize();
            return;
        }
        let keep = keep as usize;
        if keep >= self.digits.len() {
            return;
        }
        let round_up = self.digits[keep] >= b'5';
        self.digits.truncate(keep);
        if round_up {
            let mut idx = keep;
            loop {
                if idx == 0 {
                    self.digits.insert(0, b'1');
                    self.scale += 1;
                    break;
                }
                idx -= 1;
                if self.digits[idx] == b'9' {
                    self.digits[idx] = b'0';
                } else {
                    self.digits[idx] += 1;
                    break;
                }
            }
        }
        self.normalize();
    }

    fn digit_at(&self, index: i32) -> char {
        if index < 0 {
            return '0';
        }
        self.digits
            .get(index as usize)
            .map_or('0', |&d| d as char)
    }

    fn exponent(&self) -> i32 {
        if self.is_zero() {
            0
        } else {
            self.scale - 1
        }
    }

    /// `ddd[,ddd].fff` without sign.
    fn write_fixed(&self, out: &mut String, precision: usize, grouped: bool) {
        let int_len = self.scale.max(1) as usize;
        for position in 0..int_len {
            if grouped && position > 0 && (int_len - position) % 3 == 0 {
                out.push(GROUP_SEPARATOR);
            }
            let index = position as i32 - (int_len as i32 - self.scale);
            out.push(self.digit_at(index));
        }
        if precision > 0 {
            out.push(DECIMAL_SEPARATOR);
            for offset in 0..precision {
                out.push(self.digit_at(self.scale + offset as i32));
            }
        }
    }

    /// `d.dddE+xxx` without sign.
    fn write_scientific(&self, out: &mut String, precision: usize, upper: bool, min_exp: usize) {
        out.push(self.digit_at(0));
        if precision > 0 {
            out.push(DECIMAL_SEPARATOR);
            for index in 1..=precision {
                out.push(self.digit_at(index as i32));
            }
        }
        write_exponent(out, self.exponent(), upper, min_exp);
    }

    /// General layout: significant digits only, no trailing zeros.
    fn write_general(&self, out: &mut String, threshold: usize, upper: bool) {
        let exponent = self.exponent();
        let threshold = i32::try_from(threshold).unwrap_or(i32::MAX);
        if exponent >= threshold || exponent < -4 {
            let fraction = self.digits.len().saturating_sub(1);
            self.write_scientific(out, fraction, upper, 2);
        } else {
            let fraction = (self.digits.len() as i32 - self.scale).max(0) as usize;
            self.write_fixed(out, fraction, false);
        }
    }
}

fn write_exponent(out: &mut String, exponent: i32, upper: bool, min_digits: usize) {
    out.push(if upper { 'E' } else { 'e' });
    out.push(if exponent < 0 { '-' } else { '+' });
    let _ = write!(out, "{:0width$}", exponent.unsigned_abs(), width = min_digits);
}

/// Renders `operand` with `format` (`None` is the general layout).
pub(crate) fn format_number(
    operand: &Operand,
    format: Option<&str>,
    kind: &'static str,
) -> Result<String> {
    let spec = parse_format(format.unwrap_or_default())
        .ok_or_else(|| InvariantError::format(kind, format.unwrap_or_default()))?;
    let reject = || InvariantError::format(kind, format.unwrap_or_default());

    let digits = match operand {
        Operand::Integer {
            negative,
            magnitude,
            bits,
        } => {
            match spec.specifier {
                Specifier::RoundTrip => return Err(reject()),
                Specifier::Hex { upper } => {
                    return Ok(format_hex(*bits, upper, spec.precision.unwrap_or(0)));
                }
                Specifier::Decimal => {
                    let mut out = String::new();
                    if *negative {
                        out.push('-');
                    }
                    let width = spec.precision.unwrap_or(0);
                    let _ = write!(out, "{magnitude:0width$}");
                    return Ok(out);
                }
                _ => {}
            }
            Digits::from_integer(*negative, *magnitude)
        }
        Operand::Float {
            negative,
            class,
            shortest,
            ..
        } => {
            if matches!(
                spec.specifier,
                Specifier::Decimal | Specifier::Hex { .. }
            ) {
                return Err(reject());
            }
            match class {
                FloatClass::NaN => return Ok(NAN.to_string()),
                FloatClass::Infinite if *negative => return Ok(NEGATIVE_INFINITY.to_string()),
                FloatClass::Infinite => return Ok(POSITIVE_INFINITY.to_string()),
                FloatClass::Finite => Digits::from_scientific(*negative, shortest),
            }
        }
    };

    let general_default = match operand {
        Operand::Integer { .. } => None,
        Operand::Float {
            general_precision, ..
        } => Some(*general_precision),
    };
    Ok(layout(digits, spec, general_default))
}

fn layout(mut digits: Digits, spec: NumberFormat, general_default: Option<usize>) -> String {
    let mut out = String::new();
    match spec.specifier {
        Specifier::Fixed | Specifier::Number => {
            let precision = spec.precision.unwrap_or(2);
            digits.round(digits.scale + precision as i32);
            push_sign(&mut out, &digits);
            digits.write_fixed(&mut out, precision, spec.specifier == Specifier::Number);
        }
        Specifier::Percent => {
            let precision = spec.precision.unwrap_or(2);
            if !digits.is_zero() {
                digits.scale += 2;
            }
            digits.round(digits.scale + precision as i32);
            push_sign(&mut out, &digits);
            digits.write_fixed(&mut out, precision, true);
            out.push_str(PERCENT_SUFFIX);
        }
        Specifier::Currency => {
            let precision = spec.precision.unwrap_or(2);
            digits.round(digits.scale + precision as i32);
            push_sign(&mut out, &digits);
            out.push(CURRENCY_SYMBOL);
            digits.write_fixed(&mut out, precision, true);
        }
        Specifier::Exponent { upper } => {
            let precision = spec.precision.unwrap_or(6);
            digits.round(precision as i32 + 1);
            push_sign(&mut out, &digits);
            digits.write_scientific(&mut out, precision, upper, 3);
        }
        Specifier::General { upper } => {
            let threshold = match spec.precision.filter(|&p| p > 0) {
                Some(precision) => {
                    digits.round(precision as i32);
                    precision
                }
                None => shortest_threshold(&digits, general_default),
            };
            push_sign(&mut out, &digits);
            digits.write_general(&mut out, threshold, upper);
        }
        Specifier::RoundTrip => {
            push_sign(&mut out, &digits);
            let threshold = shortest_threshold(&digits, general_default);
            digits.write_general(&mut out, threshold, true);
        }
        Specifier::Decimal | Specifier::Hex { .. } => unreachable!("handled per operand"),
    }
    out
}

/// Exponent at which the shortest rendering turns scientific: the type's
/// general precision, widened to keep every round-trip digit in fixed form.
fn shortest_threshold(digits: &Digits, general_default: Option<usize>) -> usize {
    general_default.map_or(usize::MAX, |precision| precision.max(digits.digits.len()))
}

fn push_sign(out: &mut String, digits: &Digits) {
    if digits.negative {
        out.push('-');
    }
}

fn format_hex(bits: u128, upper: bool, width: usize) -> String {
    if upper {
        format!("{bits:0width$X}")
    } else {
        format!("{bits:0width$x}")
    }
}
