#![forbid(unsafe_code)]

//! Pure per-entry scoring.
//!
//! Scoring is a total function of the entry, the config, the reference time,
//! and a pre-sampled noise term. Keeping the clock and the randomness outside
//! makes every score directly unit-testable.

use castfeed_core::entry::{FeedEntry, MediaClass};
use web_time::{Duration, SystemTime};

use crate::config::RankConfig;

/// Fixed bonus for entries awaiting review, when enabled.
///
/// Large relative to every other term so that actionable entries sort above
/// resolved ones regardless of recency, cost tier, or noise.
pub const UNRESOLVED_BONUS: f64 = 100.0;

/// Cost-tier bonus for embedded-platform media (cheapest to paint).
pub const COST_BONUS_EMBEDDED: f64 = 12.0;

/// Cost-tier bonus for hosted-file media (mid tier).
pub const COST_BONUS_HOSTED: f64 = 6.0;

/// Amplitude of the random term at `variety_factor == 1`.
pub const VARIETY_SPAN: f64 = 8.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// The additive terms making up one entry's score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreParts {
    /// Fixed bonus when the entry awaits review and the config enables it.
    pub unresolved_bonus: f64,
    /// Tiered bonus by media classification, when enabled.
    pub cost_bonus: f64,
    /// Linearly decaying recency bonus, floored at zero.
    pub recency_bonus: f64,
    /// Pre-sampled random term, already scaled by the variety factor.
    pub noise: f64,
}

impl ScoreParts {
    /// Total score for sorting.
    #[inline]
    #[must_use]
    pub fn total(&self) -> f64 {
        self.unresolved_bonus + self.cost_bonus + self.recency_bonus + self.noise
    }
}

/// Score one entry against `config` at reference time `now`.
///
/// `noise` is sampled by the caller (zero when variety is disabled) so this
/// function stays pure. Timestamps in the future count as zero elapsed days
/// rather than failing; clock skew between clients is not a caller bug.
#[must_use]
pub fn score_entry(
    entry: &FeedEntry,
    config: &RankConfig,
    now: SystemTime,
    noise: f64,
) -> ScoreParts {
    let unresolved_bonus = if config.prioritize_unresolved && entry.status.is_actionable() {
        UNRESOLVED_BONUS
    } else {
        0.0
    };

    let cost_bonus = if config.cost_awareness {
        match entry.media {
            MediaClass::Embedded => COST_BONUS_EMBEDDED,
            MediaClass::Hosted => COST_BONUS_HOSTED,
            MediaClass::Other => 0.0,
        }
    } else {
        0.0
    };

    let elapsed = now
        .duration_since(entry.submitted_at)
        .unwrap_or(Duration::ZERO);
    let days = elapsed.as_secs_f64() / SECONDS_PER_DAY;
    let recency_bonus = config.recency_weight * (1.0 - days / config.recency_window_days).max(0.0);

    ScoreParts {
        unresolved_bonus,
        cost_bonus,
        recency_bonus,
        noise,
    }
}
