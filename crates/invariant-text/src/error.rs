//! Conversion and argument errors.

#![allow(missing_docs)]

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised by the strict (non-`try`) operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantError {
    /// Input text (or a format pattern) does not follow the invariant grammar.
    #[error("input '{input}' is not a valid {kind}")]
    Format {
        kind: &'static str,
        input: SmolStr,
    },

    /// Input text is well formed but the value does not fit the target type.
    #[error("value '{input}' is out of range for {kind}")]
    Overflow {
        kind: &'static str,
        input: SmolStr,
    },

    /// A required receiver was absent.
    #[error("argument '{param}' must not be null")]
    ArgumentNull { param: &'static str },

    /// An offset or count lies outside the receiver or splits a character.
    #[error("argument '{param}' is out of range ({value})")]
    ArgumentOutOfRange { param: &'static str, value: usize },

    /// The output sink rejected the rendered text.
    #[error("output sink rejected the rendered text")]
    Write(#[from] std::fmt::Error),
}

impl InvariantError {
    pub(crate) fn format(kind: &'static str, input: &str) -> Self {
        Self::Format {
            kind,
            input: SmolStr::new(input),
        }
    }

    pub(crate) fn overflow(kind: &'static str, input: &str) -> Self {
        Self::Overflow {
            kind,
            input: SmolStr::new(input),
        }
    }

    /// Name of the target type for conversion errors.
    #[must_use]
    pub fn kind(&self) -> Option<&'static str> {
        match self {
            Self::Format { kind, .. } | Self::Overflow { kind, .. } => Some(kind),
            Self::ArgumentNull { .. } | Self::ArgumentOutOfRange { .. } | Self::Write(_) => None,
        }
    }
}

/// Result alias used across the crate.
pub type Result<T, E = InvariantError> = std::result::Result<T, E>;

/// Folds a strict result into the `try` surface, tracing the discarded error.
pub(crate) fn fold<T>(result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::trace!(kind = error.kind().unwrap_or("argument"), %error, "try-variant failed");
            None
        }
    }
}
