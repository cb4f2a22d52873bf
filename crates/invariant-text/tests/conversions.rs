mod common;

use common::{init_tracing, table};
use expect_test::expect;
use invariant_text::{
    DateTimeStyles, InvariantError, InvariantFormat, InvariantParse, InvariantParseExact,
    TimeSpanStyles,
};
use time::macros::{date, datetime};
use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

macro_rules! assert_integer_round_trip {
    ($($ty:ty),*) => {$(
        for value in [<$ty>::MIN, <$ty>::MAX, 0 as $ty, 1 as $ty, <$ty>::MAX / 3] {
            let text = value.to_string_invariant();
            assert_eq!(<$ty>::parse_invariant(&text), Ok(value), "{text}");
        }
    )*};
}

#[test]
fn integers_round_trip_at_their_bounds() {
    assert_integer_round_trip!(i8, i16, i32, i64, u8, u16, u32, u64);
}

#[test]
fn floats_round_trip_bit_for_bit() {
    let doubles = [
        0.1,
        -2.5e-300,
        f64::MAX,
        f64::MIN_POSITIVE,
        5e-324,
        1e15,
        123_456_789.123,
        -1.0 / 3.0,
    ];
    for value in doubles {
        let text = value.to_string_invariant();
        let parsed = f64::parse_invariant(&text).unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
    }
    let singles = [0.1_f32, f32::MAX, 1e-45, 16_777_216.0, -7.25];
    for value in singles {
        let text = value.to_string_invariant();
        let parsed = f32::parse_invariant(&text).unwrap();
        assert_eq!(parsed.to_bits(), value.to_bits(), "{text}");
    }
}

#[test]
fn try_variants_fold_failures_into_none() {
    init_tracing();
    assert_eq!(i32::try_parse_invariant("not-a-number"), None);
    assert_eq!(i32::try_parse_invariant("not-a-number").unwrap_or_default(), 0);
    assert_eq!(u16::try_parse_invariant("65536"), None);
    assert_eq!(i32::try_parse_invariant("42"), Some(42));
    assert_eq!(f64::parse_invariant("3.14"), Ok(3.14));
    assert_eq!(Date::try_parse_invariant("2026-02-30"), None);
    assert_eq!(Duration::try_parse_invariant("25:00"), None);
}

#[test]
fn strict_variants_name_the_failure() {
    assert!(matches!(
        i32::parse_invariant("4 2"),
        Err(InvariantError::Format { kind: "i32", .. })
    ));
    assert!(matches!(
        i8::parse_invariant("128"),
        Err(InvariantError::Overflow { kind: "i8", .. })
    ));
    assert!(matches!(
        f64::parse_invariant("1e309"),
        Err(InvariantError::Overflow { kind: "f64", .. })
    ));
    assert!(matches!(
        42_i32.to_string_invariant_with("Z9"),
        Err(InvariantError::Format { .. })
    ));
    assert!(matches!(
        date!(2026 - 10 - 19).to_string_invariant_with("[year"),
        Err(InvariantError::Format { kind: "date", .. })
    ));
}

#[test]
fn numeric_format_table() {
    let rows = [
        ("F2", "1234.5678", 1234.5678_f64.to_string_invariant_with("F2")),
        ("N2", "1234.5678", 1234.5678_f64.to_string_invariant_with("N2")),
        ("E3", "1234.5678", 1234.5678_f64.to_string_invariant_with("E3")),
        ("e", "1234.5678", 1234.5678_f64.to_string_invariant_with("e")),
        ("G5", "1234.5678", 1234.5678_f64.to_string_invariant_with("G5")),
        ("G", "1234.5678", 1234.5678_f64.to_string_invariant_with("G")),
        ("C", "1234.5678", 1234.5678_f64.to_string_invariant_with("C")),
        ("P1", "0.1234", 0.1234_f64.to_string_invariant_with("P1")),
        ("G", "-0.0001234", (-0.000_123_4_f64).to_string_invariant_with("G")),
        ("X", "255i32", 255_i32.to_string_invariant_with("X")),
        ("x8", "-1i32", (-1_i32).to_string_invariant_with("x8")),
        ("N0", "1234567i64", 1_234_567_i64.to_string_invariant_with("N0")),
        ("D6", "42u8", 42_u8.to_string_invariant_with("D6")),
        ("N0", "-32768i16", i16::MIN.to_string_invariant_with("N0")),
        ("G", "16777216f32", 16_777_216_f32.to_string_invariant_with("G")),
        ("R", "1234567890123456.7", 1_234_567_890_123_456.7_f64.to_string_invariant_with("R")),
    ];
    let actual = table(
        rows.iter()
            .map(|(format, label, rendered)| format!("{format} {label} => {}", rendered.as_ref().unwrap())),
    );
    expect![[r#"
        F2 1234.5678 => 1234.57
        N2 1234.5678 => 1,234.57
        E3 1234.5678 => 1.235E+003
        e 1234.5678 => 1.234568e+003
        G5 1234.5678 => 1234.6
        G 1234.5678 => 1234.5678
        C 1234.5678 => ¤1,234.57
        P1 0.1234 => 12.3 %
        G -0.0001234 => -0.0001234
        X 255i32 => FF
        x8 -1i32 => ffffffff
        N0 1234567i64 => 1,234,567
        D6 42u8 => 000042
        N0 -32768i16 => -32,768
        G 16777216f32 => 16777216
        R 1234567890123456.7 => 1234567890123456.8
    "#]]
    .assert_eq(&actual);
}

#[test]
fn temporal_format_table() {
    let local = datetime!(2026-10-19 14:03:07.1234567);
    let offset = datetime!(2026-10-19 14:03:07 +02:00);
    let mut rows = Vec::new();
    rows.push(format!("default  {}", local.to_string_invariant()));
    for format in ["d", "D", "f", "g", "M", "o", "R", "s", "t", "u", "Y", "[year]/[ordinal]"] {
        rows.push(format!("{format:<8} {}", local.to_string_invariant_with(format).unwrap()));
    }
    rows.push(format!("offset   {}", offset.to_string_invariant()));
    for format in ["o", "u", "R", "U"] {
        rows.push(format!("{format:<8} {}", offset.to_string_invariant_with(format).unwrap()));
    }
    insta::assert_snapshot!(rows.join("\n"), @r"
    default  10/19/2026 14:03:07
    d        10/19/2026
    D        Monday, 19 October 2026
    f        Monday, 19 October 2026 14:03
    g        10/19/2026 14:03
    M        October 19
    o        2026-10-19T14:03:07.1234567
    R        Mon, 19 Oct 2026 14:03:07 GMT
    s        2026-10-19T14:03:07
    t        14:03
    u        2026-10-19 14:03:07Z
    Y        2026 October
    [year]/[ordinal] 2026/292
    offset   10/19/2026 14:03:07 +02:00
    o        2026-10-19T14:03:07.0000000+02:00
    u        2026-10-19 12:03:07Z
    R        Mon, 19 Oct 2026 12:03:07 GMT
    U        Monday, 19 October 2026 12:03:07
    ");
}

#[test]
fn temporal_values_round_trip() {
    let local = datetime!(2026-10-19 14:03:07);
    assert_eq!(
        PrimitiveDateTime::parse_invariant(&local.to_string_invariant()),
        Ok(local)
    );
    let offset = datetime!(2026-10-19 14:03:07 +02:00);
    assert_eq!(
        OffsetDateTime::parse_invariant(&offset.to_string_invariant()),
        Ok(offset)
    );
    let day = date!(2026 - 10 - 19);
    assert_eq!(Date::parse_invariant(&day.to_string_invariant()), Ok(day));

    let precise = datetime!(2026-10-19 14:03:07.1234567);
    let text = precise.to_string_invariant_with("o").unwrap();
    assert_eq!(
        PrimitiveDateTime::parse_exact_invariant(&text, "o", DateTimeStyles::default()),
        Ok(precise)
    );
}

#[test]
fn default_date_grammar_accepts_common_shapes() {
    let expected = datetime!(2026-10-19 14:03:07 UTC);
    for text in [
        "2026-10-19T14:03:07Z",
        "2026-10-19T16:03:07+02:00",
        "Mon, 19 Oct 2026 14:03:07 +0000",
        "2026-10-19T14:03:07",
        "2026-10-19 14:03:07",
        " 10/19/2026 14:03:07 ",
        "Mon, 19 Oct 2026 14:03:07 GMT",
        "2026-10-19 14:03:07Z",
    ] {
        assert_eq!(OffsetDateTime::parse_invariant(text), Ok(expected), "{text}");
    }
    assert_eq!(
        PrimitiveDateTime::parse_invariant("2026/10/19"),
        Ok(datetime!(2026-10-19 0:00))
    );
    assert!(PrimitiveDateTime::parse_invariant("19.10.2026").is_err());
}

#[test]
fn exact_parsing_honours_styles() {
    let styles = DateTimeStyles::allow_white_spaces();
    assert_eq!(
        PrimitiveDateTime::parse_exact_invariant("  10/19/2026   14:03:07 ", "G", styles),
        Ok(datetime!(2026-10-19 14:03:07))
    );
    assert!(PrimitiveDateTime::parse_exact_invariant(
        " 10/19/2026 14:03:07",
        "G",
        DateTimeStyles::default()
    )
    .is_err());

    let eastern = DateTimeStyles {
        assume_offset_minutes: -300,
        ..DateTimeStyles::default()
    };
    assert_eq!(
        OffsetDateTime::parse_exact_invariant("2026-10-19T14:03:07", "s", eastern),
        Ok(datetime!(2026-10-19 14:03:07 -05:00))
    );
    let universal = DateTimeStyles {
        adjust_to_universal: true,
        ..eastern
    };
    assert_eq!(
        OffsetDateTime::parse_exact_invariant("2026-10-19T14:03:07", "s", universal),
        Ok(datetime!(2026-10-19 19:03:07 UTC))
    );
    assert_eq!(
        OffsetDateTime::parse_exact_invariant("2026-10-19 14:03:07Z", "u", eastern),
        Ok(datetime!(2026-10-19 14:03:07 UTC))
    );
}

#[test]
fn exact_parsing_tries_patterns_in_order() {
    let formats = ["[year]-[month]-[day]", "[year]/[month]/[day]", "d"];
    let styles = DateTimeStyles::default();
    for text in ["2026-10-19", "2026/10/19", "10/19/2026"] {
        assert_eq!(
            Date::parse_exact_any_invariant(text, &formats, styles),
            Ok(date!(2026 - 10 - 19)),
            "{text}"
        );
    }
    assert_eq!(Date::try_parse_exact_any_invariant("19 Oct", &formats, styles), None);
    assert!(Date::parse_exact_any_invariant("x", &[], styles).is_err());
}

#[test]
fn spans_round_trip_through_every_standard_format() {
    let values = [
        Duration::ZERO,
        Duration::new(93_784, 500_000_000),
        -Duration::new(1, 100),
        Duration::days(10_675_199),
        Duration::milliseconds(-1),
    ];
    for value in values {
        for format in ["c", "g", "G"] {
            let text = value.to_string_invariant_with(format).unwrap();
            assert_eq!(Duration::parse_invariant(&text), Ok(value), "{format} {text}");
            assert_eq!(
                Duration::parse_exact_invariant(&text, format, TimeSpanStyles::default()),
                Ok(value),
                "{format} {text}"
            );
        }
    }
}

#[test]
fn formatting_into_fixed_buffers() {
    let mut small = [0_u8; 4];
    assert_eq!(12_345_i32.try_format_invariant(&mut small, None), None);

    let mut buf = [0_u8; 32];
    let written = 12_345_i32.try_format_invariant(&mut buf, Some("N0")).unwrap();
    assert_eq!(&buf[..written], b"12,345");

    let written = Duration::minutes(-90).try_format_invariant(&mut buf, None).unwrap();
    assert_eq!(&buf[..written], b"-01:30:00");

    assert_eq!(1.5_f64.try_format_invariant(&mut buf, Some("D")), None);
}
