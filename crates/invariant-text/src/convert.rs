//! Conversion traits shared by the numeric and temporal facades.

use std::fmt;

use crate::error::{fold, InvariantError, Result};

/// Parsing with the invariant grammar of a type.
pub trait InvariantParse: Sized {
    /// Type name reported in errors.
    const KIND: &'static str;

    /// Parses `text`, failing with [`InvariantError::Format`] or
    /// [`InvariantError::Overflow`].
    fn parse_invariant(text: &str) -> Result<Self>;

    /// Parses `text`, returning `None` on any failure.
    ///
    /// `try_parse_invariant(text).unwrap_or_default()` yields the zero value
    /// on failure.
    fn try_parse_invariant(text: &str) -> Option<Self> {
        fold(Self::parse_invariant(text))
    }
}

/// Parsing against caller-supplied patterns.
pub trait InvariantParseExact: InvariantParse {
    /// Options accepted alongside the pattern.
    type Styles: Copy + Default;

    /// Parses `text`, which must match `format` exactly.
    fn parse_exact_invariant(text: &str, format: &str, styles: Self::Styles) -> Result<Self>;

    /// Parses `text` against each of `formats` in turn; the first match wins.
    fn parse_exact_any_invariant(
        text: &str,
        formats: &[&str],
        styles: Self::Styles,
    ) -> Result<Self> {
        let mut last = InvariantError::format(Self::KIND, text);
        for format in formats {
            match Self::parse_exact_invariant(text, format, styles) {
                Ok(value) => return Ok(value),
                Err(error) => last = error,
            }
        }
        Err(last)
    }

    /// [`Self::parse_exact_invariant`] with the error folded into `None`.
    fn try_parse_exact_invariant(text: &str, format: &str, styles: Self::Styles) -> Option<Self> {
        fold(Self::parse_exact_invariant(text, format, styles))
    }

    /// [`Self::parse_exact_any_invariant`] with the error folded into `None`.
    fn try_parse_exact_any_invariant(
        text: &str,
        formats: &[&str],
        styles: Self::Styles,
    ) -> Option<Self> {
        fold(Self::parse_exact_any_invariant(text, formats, styles))
    }
}

/// Rendering with the invariant grammar of a type.
pub trait InvariantFormat {
    /// Writes the value to `out`; `None` selects the default layout.
    ///
    /// The default layout never fails on its own; errors then only come
    /// from `out`.
    fn write_invariant(&self, out: &mut dyn fmt::Write, format: Option<&str>) -> Result<()>;

    /// Adapter implementing [`fmt::Display`] with the default layout.
    fn invariant(&self) -> Invariant<'_, Self> {
        Invariant(self)
    }

    /// Renders the default layout.
    fn to_string_invariant(&self) -> String {
        self.invariant().to_string()
    }

    /// Renders with `format`.
    fn to_string_invariant_with(&self, format: &str) -> Result<String> {
        let mut out = String::new();
        self.write_invariant(&mut out, Some(format))?;
        Ok(out)
    }

    /// Writes UTF-8 into `destination`, returning the number of bytes written.
    ///
    /// Returns `None` when `destination` is too small or `format` is invalid;
    /// `destination` contents are unspecified in that case.
    fn try_format_invariant(&self, destination: &mut [u8], format: Option<&str>) -> Option<usize> {
        let mut writer = SliceWriter {
            buf: destination,
            len: 0,
        };
        fold(self.write_invariant(&mut writer, format)).map(|()| writer.len)
    }
}

/// Display adapter returned by [`InvariantFormat::invariant`].
pub struct Invariant<'a, T: ?Sized>(&'a T);

impl<T: InvariantFormat + ?Sized> fmt::Display for Invariant<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_invariant(f, None).map_err(|_| fmt::Error)
    }
}

impl<T: ?Sized> fmt::Debug for Invariant<'_, T>
where
    T: InvariantFormat,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Invariant")
            .field(&format_args!("{self}"))
            .finish()
    }
}

struct SliceWriter<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl fmt::Write for SliceWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len.checked_add(s.len()).ok_or(fmt::Error)?;
        let slot = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        slot.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
