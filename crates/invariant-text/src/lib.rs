//! `invariant-text` - Culture-invariant parsing, formatting and comparison helpers.
//!
//! The crate gives primitive types a text form that never depends on the
//! host locale:
//!
//! - **Conversions**: [`InvariantParse`], [`InvariantParseExact`] and
//!   [`InvariantFormat`] for the integer and float primitives and for the
//!   `time` crate's `Date`, `PrimitiveDateTime`, `OffsetDateTime` and
//!   `Duration`
//! - **Comparison**: substring search and equality with an explicit
//!   [`StringComparison`] mode
//! - **Appending**: [`Appendable`] values and join helpers for `String`
//!
//! Strict operations return [`Result`]; every `try_` variant folds the error
//! into `None`.
//!
//! # Example
//!
//! ```
//! use invariant_text::{InvariantFormat, InvariantParse, StrExt, StringBuilderExt};
//!
//! let value = f64::parse_invariant("1,234.5").unwrap();
//! assert_eq!(value.to_string_invariant_with("N1").unwrap(), "1,234.5");
//! assert_eq!(i32::try_parse_invariant("not-a-number").unwrap_or_default(), 0);
//!
//! assert_eq!("Hello".index_of_ordinal_ignore_case("LL"), Some(2));
//!
//! let mut buf = String::new();
//! buf.append_join_values(", ", [Some(1), None, Some(3)]);
//! assert_eq!(buf, "1, , 3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

/// String comparison and search.
pub mod compare;
/// Conversion traits.
pub mod convert;
/// Comparison cultures.
pub mod culture;
/// Date, date-time and time span conversions.
pub mod datetime;
/// Conversion and argument errors.
pub mod error;
mod number;
/// Appendable values and join helpers.
pub mod text;

pub use compare::{StrExt, StringComparison};
pub use convert::{Invariant, InvariantFormat, InvariantParse, InvariantParseExact};
pub use culture::{CaseMapping, Culture, CultureGuard};
pub use datetime::{DateTimeStyles, TimeSpanStyles};
pub use error::{InvariantError, Result};
pub use text::{append_join_values, Appendable, StringBuilderExt};
