#![forbid(unsafe_code)]

//! Ranking configuration.

use crate::error::RankError;

/// Configuration for [`crate::FeedRanker`].
#[derive(Debug, Clone, PartialEq)]
pub struct RankConfig {
    /// Add a large fixed bonus to entries still awaiting review.
    /// Default: `true`.
    pub prioritize_unresolved: bool,
    /// Scale of the additive random term, in `[0, 1]`. `0` yields fully
    /// deterministic ordering. Default: `0.0`.
    pub variety_factor: f64,
    /// Add a tiered bonus for media that is cheap to load
    /// (embedded > hosted > other). Default: `true`.
    pub cost_awareness: bool,
    /// Size of the spotlight window subject to author de-duplication.
    /// `0` disables the pass. Default: `5`.
    pub spotlight_size: usize,
    /// Days over which the recency bonus decays to zero. Default: `14.0`.
    pub recency_window_days: f64,
    /// Recency bonus for an entry submitted just now. Default: `10.0`.
    pub recency_weight: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            prioritize_unresolved: true,
            variety_factor: 0.0,
            cost_awareness: true,
            spotlight_size: 5,
            recency_window_days: 14.0,
            recency_weight: 10.0,
        }
    }
}

impl RankConfig {
    /// Set whether entries awaiting review are boosted to the top.
    #[must_use]
    pub fn with_prioritize_unresolved(mut self, enabled: bool) -> Self {
        self.prioritize_unresolved = enabled;
        self
    }

    /// Set the variety factor in `[0, 1]`.
    #[must_use]
    pub fn with_variety_factor(mut self, factor: f64) -> Self {
        self.variety_factor = factor;
        self
    }

    /// Set whether load-cost tiers contribute to the score.
    #[must_use]
    pub fn with_cost_awareness(mut self, enabled: bool) -> Self {
        self.cost_awareness = enabled;
        self
    }

    /// Set the spotlight window size.
    #[must_use]
    pub fn with_spotlight_size(mut self, size: usize) -> Self {
        self.spotlight_size = size;
        self
    }

    /// Set the recency decay window in days.
    #[must_use]
    pub fn with_recency_window_days(mut self, days: f64) -> Self {
        self.recency_window_days = days;
        self
    }

    /// Set the recency bonus for a just-submitted entry.
    #[must_use]
    pub fn with_recency_weight(mut self, weight: f64) -> Self {
        self.recency_weight = weight;
        self
    }

    /// Reject out-of-range or non-finite fields.
    ///
    /// Called by [`crate::FeedRanker`] at construction so a bad value fails
    /// at the call site that introduced it.
    pub fn validate(&self) -> Result<(), RankError> {
        if !self.variety_factor.is_finite() || !(0.0..=1.0).contains(&self.variety_factor) {
            return Err(RankError::InvalidConfig {
                field: "variety_factor",
                value: self.variety_factor,
            });
        }
        if !self.recency_window_days.is_finite() || self.recency_window_days <= 0.0 {
            return Err(RankError::InvalidConfig {
                field: "recency_window_days",
                value: self.recency_window_days,
            });
        }
        if !self.recency_weight.is_finite() || self.recency_weight < 0.0 {
            return Err(RankError::InvalidConfig {
                field: "recency_weight",
                value: self.recency_weight,
            });
        }
        Ok(())
    }
}
