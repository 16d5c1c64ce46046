#![forbid(unsafe_code)]

//! Presentation-order scoring for submission feeds.
//!
//! Given a snapshot of feed entries, [`FeedRanker`] produces the order in
//! which they should be rendered, balancing four concerns:
//!
//! - **Actionable first**: entries still awaiting review get a large fixed
//!   bonus, so graders see open work at the top.
//! - **Fast first paint**: entries whose media is cheap to load get a tiered
//!   bonus, so the top of the feed appears quickly.
//! - **Recency**: newer submissions get a bonus that decays linearly with
//!   elapsed days and floors at zero.
//! - **Variety**: a bounded random term keeps the top of the feed from being
//!   visually static across reloads, scaled by a configurable factor.
//!
//! # Scoring Model
//!
//! Each entry `i` is scored additively:
//!
//! `S_i = unresolved_bonus + cost_bonus + recency_bonus + noise`
//!
//! Entries are stable-sorted by decreasing `S_i` (ties keep their original
//! relative order), then a **spotlight pass** de-duplicates authors in the
//! top `K` positions: a duplicate is swapped with the first later entry
//! whose author has not yet appeared, when one exists.
//!
//! The whole pipeline is a pure permutation: no entries are created,
//! dropped, or mutated, and every ranking decision is recorded in a
//! [`ScoreEvidence`] ledger for explainability.
//!
//! # Failure Modes
//!
//! | Condition | Behavior | Rationale |
//! |-----------|----------|-----------|
//! | Empty snapshot | Empty ranking | Vacuously correct |
//! | Single entry | Returned unchanged | Nothing to reorder |
//! | All entries share an author | Spotlight pass is a no-op | No alternative exists |
//! | Empty or duplicate id | `RankError::Entry` | Malformed input fails fast |
//! | `variety_factor` outside `[0, 1]` | `RankError::InvalidConfig` | Caller bug, never coerced |

pub mod config;
pub mod error;
pub mod ranker;
pub mod score;

pub use config::RankConfig;
pub use error::RankError;
pub use ranker::{FeedRanker, Ranking, ScoreEvidence};
pub use score::{ScoreParts, score_entry};
