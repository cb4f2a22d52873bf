//! Invariant numeric grammar.
//!
//! The recognisers only validate and normalise; the actual conversion is left
//! to `str::parse` once the text is known to be in a shape it accepts.

/// Whitespace allowed around numbers.
pub(crate) fn is_white(ch: char) -> bool {
    matches!(ch, '\t' | '\n' | '\u{000B}' | '\u{000C}' | '\r' | ' ')
}

/// A validated integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntegerLiteral<'a> {
    /// Sign and digits, whitespace trimmed (`-042`, `+7`, `13`).
    pub(crate) text: &'a str,
    pub(crate) negative: bool,
    /// Digits only.
    pub(crate) digits: &'a str,
}

/// `[ws][+|-]digits[ws]`
pub(crate) fn integer(input: &str) -> Option<IntegerLiteral<'_>> {
    let text = input.trim_matches(is_white);
    let (negative, digits) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(IntegerLiteral {
        text,
        negative,
        digits,
    })
}

/// A validated floating-point literal.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum FloatLiteral {
    /// Normalised text accepted by `str::parse` (`-1234.5e-3`).
    Finite(String),
    Infinity { negative: bool },
    NaN,
}

/// `[ws][+|-]{ digits[,digits]*[.[digits]] | .digits }[(e|E)[+|-]digits][ws]`
/// plus the `Infinity`/`∞`/`NaN` symbols, case-insensitive.
pub(crate) fn float(input: &str) -> Option<FloatLiteral> {
    let text = input.trim_matches(is_white);
    let (negative, body) = match text.chars().next()? {
        '-' => (true, &text[1..]),
        '+' => (false, &text[1..]),
        _ => (false, text),
    };

    if body.eq_ignore_ascii_case("infinity") || body == "∞" {
        return Some(FloatLiteral::Infinity { negative });
    }
    if body.eq_ignore_ascii_case("nan") {
        return Some(FloatLiteral::NaN);
    }

    let bytes = body.as_bytes();
    let mut idx = 0usize;
    let mut normalized = String::with_capacity(body.len() + 2);
    if negative {
        normalized.push('-');
    }

    let mut integer_digits = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b'0'..=b'9' => {
                normalized.push(bytes[idx] as char);
                integer_digits += 1;
            }
            b',' if integer_digits > 0 => {}
            _ => break,
        }
        idx += 1;
    }
    if integer_digits == 0 {
        normalized.push('0');
    }

    let mut fraction_digits = 0usize;
    if bytes.get(idx) == Some(&b'.') {
        idx += 1;
        let start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        fraction_digits = idx - start;
        if fraction_digits > 0 {
            normalized.push('.');
            normalized.push_str(&body[start..idx]);
        }
    }
    if integer_digits == 0 && fraction_digits == 0 {
        return None;
    }

    if matches!(bytes.get(idx), Some(b'e' | b'E')) {
        idx += 1;
        normalized.push('e');
        if let Some(&sign @ (b'+' | b'-')) = bytes.get(idx) {
            normalized.push(sign as char);
            idx += 1;
        }
        let start = idx;
        while idx < bytes.len() && bytes[idx].is_ascii_digit() {
            idx += 1;
        }
        if start == idx {
            return None;
        }
        normalized.push_str(&body[start..idx]);
    }

    if idx != bytes.len() {
        return None;
    }
    Some(FloatLiteral::Finite(normalized))
}
