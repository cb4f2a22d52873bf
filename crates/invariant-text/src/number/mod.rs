//! Invariant numeric conversions.
//!
//! Integers accept `[ws][+|-]digits[ws]`; floats additionally accept group
//! separators, a decimal point, an exponent and the `Infinity`/`NaN`
//! symbols. Conversion itself is delegated to `str::parse` once the text has
//! been validated, so the grammar never depends on the host locale.

mod format;
mod grammar;

pub(crate) use grammar::is_white;

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use crate::convert::{InvariantFormat, InvariantParse};
use crate::error::{InvariantError, Result};

use format::{format_number, FloatClass, Operand};
use grammar::FloatLiteral;

fn parse_integer<T>(text: &str, kind: &'static str, signed: bool) -> Result<T>
where
    T: FromStr<Err = ParseIntError> + Default,
{
    let literal = grammar::integer(text).ok_or_else(|| InvariantError::format(kind, text))?;
    if literal.negative && !signed {
        // `-0` is zero, anything else is below the range.
        return if literal.digits.bytes().all(|b| b == b'0') {
            Ok(T::default())
        } else {
            Err(InvariantError::overflow(kind, text))
        };
    }
    literal.text.parse::<T>().map_err(|err| match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            InvariantError::overflow(kind, text)
        }
        _ => InvariantError::format(kind, text),
    })
}

fn write_operand(
    out: &mut dyn fmt::Write,
    operand: &Operand,
    format: Option<&str>,
    kind: &'static str,
) -> Result<()> {
    let rendered = format_number(operand, format, kind)?;
    out.write_str(&rendered)?;
    Ok(())
}

macro_rules! signed_conversions {
    ($($ty:ty => $unsigned:ty, $kind:literal;)*) => {$(
        impl InvariantParse for $ty {
            const KIND: &'static str = $kind;

            fn parse_invariant(text: &str) -> Result<Self> {
                parse_integer(text, $kind, true)
            }
        }

        impl InvariantFormat for $ty {
            fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
                let Some(format) = format else {
                    write!(out, "{self}")?;
                    return Ok(());
                };
                let operand = Operand::Integer {
                    negative: *self < 0,
                    magnitude: u128::from(self.unsigned_abs()),
                    bits: u128::from(*self as $unsigned),
                };
                write_operand(out, &operand, Some(format), $kind)
            }
        }
    )*};
}

macro_rules! unsigned_conversions {
    ($($ty:ty => $kind:literal;)*) => {$(
        impl InvariantParse for $ty {
            const KIND: &'static str = $kind;

            fn parse_invariant(text: &str) -> Result<Self> {
                parse_integer(text, $kind, false)
            }
        }

        impl InvariantFormat for $ty {
            fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
                let Some(format) = format else {
                    write!(out, "{self}")?;
                    return Ok(());
                };
                let operand = Operand::Integer {
                    negative: false,
                    magnitude: u128::from(*self),
                    bits: u128::from(*self),
                };
                write_operand(out, &operand, Some(format), $kind)
            }
        }
    )*};
}

macro_rules! float_conversions {
    ($($ty:ident => $kind:literal, $general_precision:literal;)*) => {$(
        impl InvariantParse for $ty {
            const KIND: &'static str = $kind;

            fn parse_invariant(text: &str) -> Result<Self> {
                match grammar::float(text) {
                    None => Err(InvariantError::format($kind, text)),
                    Some(FloatLiteral::NaN) => Ok($ty::NAN),
                    Some(FloatLiteral::Infinity { negative: true }) => Ok($ty::NEG_INFINITY),
                    Some(FloatLiteral::Infinity { negative: false }) => Ok($ty::INFINITY),
                    Some(FloatLiteral::Finite(normalized)) => {
                        let value: $ty = normalized
                            .parse()
                            .map_err(|_| InvariantError::format($kind, text))?;
                        if value.is_infinite() {
                            return Err(InvariantError::overflow($kind, text));
                        }
                        Ok(value)
                    }
                }
            }
        }

        impl InvariantFormat for $ty {
            fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()> {
                let class = if self.is_nan() {
                    FloatClass::NaN
                } else if self.is_infinite() {
                    FloatClass::Infinite
                } else {
                    FloatClass::Finite
                };
                let operand = Operand::Float {
                    negative: self.is_sign_negative() && class != FloatClass::NaN,
                    class,
                    shortest: format!("{:e}", self.abs()),
                    general_precision: $general_precision,
                };
                write_operand(out, &operand, format, $kind)
            }
        }
    )*};
}

signed_conversions! {
    i8 => u8, "i8";
    i16 => u16, "i16";
    i32 => u32, "i32";
    i64 => u64, "i64";
}

unsigned_conversions! {
    u8 => "u8";
    u16 => "u16";
    u32 => "u32";
    u64 => "u64";
}

float_conversions! {
    f32 => "f32", 7;
    f64 => "f64", 15;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_parse_distinguishes_format_and_overflow() {
        assert_eq!(i32::parse_invariant(" 42 "), Ok(42));
        assert_eq!(i16::parse_invariant("-32768"), Ok(i16::MIN));
        assert!(matches!(
            i16::parse_invariant("32768"),
            Err(InvariantError::Overflow { kind: "i16", .. })
        ));
        assert!(matches!(
            u32::parse_invariant("-1"),
            Err(InvariantError::Overflow { kind: "u32", .. })
        ));
        assert_eq!(u64::parse_invariant("-000"), Ok(0));
        assert!(matches!(
            i64::parse_invariant("1,000"),
            Err(InvariantError::Format { kind: "i64", .. })
        ));
        assert!(matches!(
            u8::parse_invariant("99999999999999999999999999999999"),
            Err(InvariantError::Overflow { .. })
        ));
    }

    #[test]
    fn float_parse_symbols_and_overflow() {
        assert_eq!(f64::parse_invariant("3.14"), Ok(3.14));
        assert_eq!(f64::parse_invariant("1,234.5"), Ok(1234.5));
        assert_eq!(f32::parse_invariant("-Infinity"), Ok(f32::NEG_INFINITY));
        assert!(f64::parse_invariant("nan").unwrap().is_nan());
        assert!(matches!(
            f32::parse_invariant("1e39"),
            Err(InvariantError::Overflow { kind: "f32", .. })
        ));
        assert_eq!(f64::parse_invariant("1e-400"), Ok(0.0));
    }

    #[test]
    fn default_rendering() {
        assert_eq!(i32::MIN.to_string_invariant(), "-2147483648");
        assert_eq!(1e15_f64.to_string_invariant(), "1E+15");
        assert_eq!(1e7_f32.to_string_invariant(), "1E+07");
        assert_eq!(16_777_216_f32.to_string_invariant(), "16777216");
        assert_eq!(
            1_234_567_890_123_456.7_f64.to_string_invariant(),
            "1234567890123456.8"
        );
        assert_eq!(0.1_f32.to_string_invariant(), "0.1");
        assert_eq!(f64::NAN.to_string_invariant(), "NaN");
        assert_eq!(f64::NEG_INFINITY.to_string_invariant(), "-Infinity");
        assert_eq!((-0.0_f64).to_string_invariant(), "-0");
    }

    #[test]
    fn hex_uses_type_width() {
        assert_eq!((-1_i8).to_string_invariant_with("X").unwrap(), "FF");
        assert_eq!((-2_i16).to_string_invariant_with("x").unwrap(), "fffe");
        assert_eq!(255_u8.to_string_invariant_with("x4").unwrap(), "00ff");
    }
}
