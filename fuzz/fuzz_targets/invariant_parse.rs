#![no_main]

use invariant_text::{
    DateTimeStyles, InvariantFormat, InvariantParse, InvariantParseExact, TimeSpanStyles,
};
use libfuzzer_sys::fuzz_target;
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

const MAX_INPUT_BYTES: usize = 512;

/// Splits the input into text and a format pattern at the first NUL byte.
fn decode(bytes: &[u8]) -> (String, String) {
    let capped = &bytes[..bytes.len().min(MAX_INPUT_BYTES)];
    let text = String::from_utf8_lossy(capped);
    match text.split_once('\0') {
        Some((text, format)) => (text.to_string(), format.to_string()),
        None => (text.into_owned(), String::new()),
    }
}

/// Parses and renders `text` with every layout, without checking the output.
fn render<T>(text: &str, format: &str) -> Option<T>
where
    T: InvariantParse + InvariantFormat,
{
    let value = T::try_parse_invariant(text)?;
    let _ = value.to_string_invariant_with(format);
    let _ = value.to_string_invariant_with("u");
    let mut small = [0_u8; 8];
    let _ = value.try_format_invariant(&mut small, Some(format));
    Some(value)
}

/// The default rendering parses back to the same value.
fn round_trip<T>(text: &str, format: &str)
where
    T: InvariantParse + InvariantFormat + PartialEq + std::fmt::Debug,
{
    if let Some(value) = render::<T>(text, format) {
        let rendered = value.to_string_invariant();
        assert_eq!(T::parse_invariant(&rendered).as_ref(), Ok(&value), "{rendered}");
    }
}

fuzz_target!(|bytes: &[u8]| {
    let (text, format) = decode(bytes);

    round_trip::<i8>(&text, &format);
    round_trip::<i16>(&text, &format);
    round_trip::<i32>(&text, &format);
    round_trip::<i64>(&text, &format);
    round_trip::<u8>(&text, &format);
    round_trip::<u16>(&text, &format);
    round_trip::<u32>(&text, &format);
    round_trip::<u64>(&text, &format);
    round_trip::<Duration>(&text, &format);
    let _ = render::<f32>(&text, &format);
    let _ = render::<f64>(&text, &format);
    let _ = render::<Date>(&text, &format);
    let _ = render::<PrimitiveDateTime>(&text, &format);
    let _ = render::<OffsetDateTime>(&text, &format);

    let styles = DateTimeStyles::allow_white_spaces();
    let universal = DateTimeStyles {
        adjust_to_universal: true,
        assume_offset_minutes: -300,
        ..styles
    };
    let _ = Date::try_parse_exact_invariant(&text, &format, styles);
    let _ = PrimitiveDateTime::try_parse_exact_invariant(&text, &format, styles);
    let _ = OffsetDateTime::try_parse_exact_invariant(&text, &format, styles);
    let _ = OffsetDateTime::try_parse_exact_invariant(&text, &format, universal);
    let _ = Duration::try_parse_exact_invariant(
        &text,
        &format,
        TimeSpanStyles {
            assume_negative: true,
        },
    );
});
