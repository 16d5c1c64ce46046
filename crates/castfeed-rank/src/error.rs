#![forbid(unsafe_code)]

//! Errors raised by feed ranking.

use castfeed_core::entry::EntryError;

/// Errors raised by [`crate::FeedRanker`] construction or ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum RankError {
    /// The input snapshot is malformed.
    Entry(EntryError),
    /// A configuration field is out of range or non-finite.
    InvalidConfig {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
}

impl std::fmt::Display for RankError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entry(err) => write!(f, "invalid feed snapshot: {err}"),
            Self::InvalidConfig { field, value } => {
                write!(f, "rank config field `{field}` is invalid: {value}")
            }
        }
    }
}

impl std::error::Error for RankError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Entry(err) => Some(err),
            Self::InvalidConfig { .. } => None,
        }
    }
}

impl From<EntryError> for RankError {
    fn from(err: EntryError) -> Self {
        Self::Entry(err)
    }
}
