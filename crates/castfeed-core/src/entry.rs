#![forbid(unsafe_code)]

//! Feed entry model and snapshot validation.
//!
//! A [`FeedEntry`] is one item in a scrollable submission feed. Entries are
//! opaque to the windowing layer; the ranking layer reads the fields below to
//! compute a presentation order. Within one list snapshot, ids must be unique
//! and any reordering must be a permutation of the snapshot.

use ahash::AHashSet;
use web_time::SystemTime;

/// Review state of a feed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum EntryStatus {
    /// Awaiting reviewer action (ungraded / unresolved).
    AwaitingReview,
    /// Reviewed and closed out.
    Resolved,
}

impl EntryStatus {
    /// Whether this entry still needs reviewer action.
    #[inline]
    #[must_use]
    pub fn is_actionable(self) -> bool {
        matches!(self, Self::AwaitingReview)
    }
}

/// Loading-cost classification of an entry's media reference.
///
/// Used only to bias scoring toward entries whose media paints quickly;
/// it carries no information about where the media actually lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum MediaClass {
    /// Embedded-platform link (player iframe, no upfront media bytes).
    Embedded,
    /// Hosted-file link (media bytes fetched before first paint).
    Hosted,
    /// Unclassified media, or no media at all.
    Other,
}

/// One item in a scrollable feed.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct FeedEntry {
    /// Unique within one list snapshot; stable across reorderings.
    pub id: String,
    /// Author of the submission; drives spotlight de-duplication.
    pub author_id: String,
    /// Submission time; drives recency scoring.
    pub submitted_at: SystemTime,
    /// Review state.
    pub status: EntryStatus,
    /// Loading-cost hint.
    pub media: MediaClass,
}

impl FeedEntry {
    /// Create an entry awaiting review with unclassified media.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        author_id: impl Into<String>,
        submitted_at: SystemTime,
    ) -> Self {
        Self {
            id: id.into(),
            author_id: author_id.into(),
            submitted_at,
            status: EntryStatus::AwaitingReview,
            media: MediaClass::Other,
        }
    }

    /// Set the review state.
    #[must_use]
    pub fn with_status(mut self, status: EntryStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the media classification.
    #[must_use]
    pub fn with_media(mut self, media: MediaClass) -> Self {
        self.media = media;
        self
    }
}

/// Errors raised by snapshot validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    /// An entry has an empty id.
    EmptyId {
        /// Position of the offending entry in the snapshot.
        index: usize,
    },
    /// The same id appears more than once in the snapshot.
    DuplicateId {
        /// The repeated id.
        id: String,
    },
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId { index } => {
                write!(f, "feed entry at index {index} has an empty id")
            }
            Self::DuplicateId { id } => {
                write!(f, "duplicate feed entry id `{id}` in snapshot")
            }
        }
    }
}

impl std::error::Error for EntryError {}

/// Validate one list snapshot: every id non-empty and unique.
///
/// Malformed snapshots are rejected here, at the call site that introduced
/// them, rather than coerced into something renderable.
pub fn validate_snapshot(entries: &[FeedEntry]) -> Result<(), EntryError> {
    let mut seen: AHashSet<&str> = AHashSet::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if entry.id.is_empty() {
            return Err(EntryError::EmptyId { index });
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(EntryError::DuplicateId {
                id: entry.id.clone(),
            });
        }
    }
    Ok(())
}
