//! Values that render themselves into a string buffer.
//!
//! [`Appendable`] is the capability; [`StringBuilderExt`] adds the chaining
//! helpers to `String`. Appending a value produces exactly the characters of
//! its standalone invariant rendering.

use time::{Date, Duration, OffsetDateTime, PrimitiveDateTime};

use crate::convert::InvariantFormat;

/// A value that can write its textual form to the end of a buffer.
pub trait Appendable {
    /// Appends the value to `buf`. The only side effect is buffer growth.
    fn append_self(&self, buf: &mut String);
}

impl Appendable for str {
    fn append_self(&self, buf: &mut String) {
        buf.push_str(self);
    }
}

impl Appendable for String {
    fn append_self(&self, buf: &mut String) {
        buf.push_str(self);
    }
}

impl Appendable for char {
    fn append_self(&self, buf: &mut String) {
        buf.push(*self);
    }
}

impl<T: Appendable + ?Sized> Appendable for &T {
    fn append_self(&self, buf: &mut String) {
        (**self).append_self(buf);
    }
}

impl<T: Appendable + ?Sized> Appendable for Box<T> {
    fn append_self(&self, buf: &mut String) {
        (**self).append_self(buf);
    }
}

/// An absent value renders as nothing.
impl<T: Appendable> Appendable for Option<T> {
    fn append_self(&self, buf: &mut String) {
        if let Some(value) = self {
            value.append_self(buf);
        }
    }
}

macro_rules! append_invariant {
    ($($ty:ty),* $(,)?) => {$(
        impl Appendable for $ty {
            fn append_self(&self, buf: &mut String) {
                if let Err(error) = self.write_invariant(buf, None) {
                    tracing::debug!(%error, "default invariant rendering failed");
                }
            }
        }
    )*};
}

append_invariant!(
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    f32,
    f64,
    Date,
    PrimitiveDateTime,
    OffsetDateTime,
    Duration,
);

/// Chaining append helpers for `String`.
pub trait StringBuilderExt {
    /// Appends `value` if present; `None` is a no-op.
    fn append_value<T: Appendable + ?Sized>(&mut self, value: Option<&T>) -> &mut Self;

    /// Appends `values` with `separator` between consecutive elements.
    ///
    /// See [`append_join_values`].
    fn append_join_values<S, I>(&mut self, separator: &S, values: I) -> &mut Self
    where
        S: Appendable + ?Sized,
        I: IntoIterator,
        I::Item: Appendable;
}

impl StringBuilderExt for String {
    fn append_value<T: Appendable + ?Sized>(&mut self, value: Option<&T>) -> &mut Self {
        if let Some(value) = value {
            value.append_self(self);
        }
        self
    }

    fn append_join_values<S, I>(&mut self, separator: &S, values: I) -> &mut Self
    where
        S: Appendable + ?Sized,
        I: IntoIterator,
        I::Item: Appendable,
    {
        append_join_values(self, separator, values);
        self
    }
}

/// Appends each of `values` to `buf` in one forward pass, writing
/// `separator` between consecutive elements only.
///
/// An empty sequence leaves `buf` untouched. Absent (`None`) elements render
/// as nothing, so the separators around them are still written.
pub fn append_join_values<S, I>(buf: &mut String, separator: &S, values: I)
where
    S: Appendable + ?Sized,
    I: IntoIterator,
    I::Item: Appendable,
{
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return;
    };
    first.append_self(buf);
    for value in values {
        separator.append_self(buf);
        value.append_self(buf);
    }
}
