#![forbid(unsafe_code)]

//! The ranking pipeline: validate, score, sort, spotlight, explain.

use ahash::AHashSet;
use castfeed_core::entry::{FeedEntry, validate_snapshot};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::SystemTime;

use crate::config::RankConfig;
use crate::error::RankError;
use crate::score::{ScoreParts, VARIETY_SPAN, score_entry};

/// Produces a presentation order for feed snapshots.
///
/// The ranker owns its random source so repeated calls with
/// `variety_factor > 0` shuffle differently, while `variety_factor == 0`
/// never touches the source and stays bit-identical call to call.
#[derive(Debug, Clone)]
pub struct FeedRanker {
    config: RankConfig,
    rng: SmallRng,
}

/// Result of one ranking pass: the permuted entries plus, for each output
/// position, the evidence that put the entry there.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Entries in presentation order. A permutation of the input.
    pub entries: Vec<FeedEntry>,
    /// One evidence record per output position, aligned with `entries`.
    pub evidence: Vec<ScoreEvidence>,
}

/// Evidence ledger entry: why one entry landed at its rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreEvidence {
    /// Entry id.
    pub id: String,
    /// Entry author.
    pub author_id: String,
    /// Total score used for sorting.
    pub score: f64,
    /// Fixed actionable bonus, when it applied.
    pub unresolved_bonus: f64,
    /// Load-cost tier bonus, when it applied.
    pub cost_bonus: f64,
    /// Recency bonus after decay.
    pub recency_bonus: f64,
    /// Sampled random term.
    pub noise: f64,
    /// Final position in the output.
    pub rank: usize,
}

impl ScoreEvidence {
    /// Format this evidence entry as a JSONL line for structured logging.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        format!(
            r#"{{"schema":"feed-ranking-v1","id":"{}","author_id":"{}","score":{:.6},"unresolved":{:.1},"cost":{:.1},"recency":{:.6},"noise":{:.6},"rank":{}}}"#,
            self.id,
            self.author_id,
            self.score,
            self.unresolved_bonus,
            self.cost_bonus,
            self.recency_bonus,
            self.noise,
            self.rank,
        )
    }
}

impl FeedRanker {
    /// Create a ranker with an OS-seeded random source.
    ///
    /// Fails fast if `config` holds an out-of-range or non-finite value.
    pub fn new(config: RankConfig) -> Result<Self, RankError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: SmallRng::from_os_rng(),
        })
    }

    /// Create a ranker with a fixed seed, for reproducible variety.
    pub fn with_seed(config: RankConfig, seed: u64) -> Result<Self, RankError> {
        config.validate()?;
        Ok(Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        })
    }

    /// The validated configuration.
    #[must_use]
    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Produce the presentation order for one snapshot at reference time `now`.
    ///
    /// The output is always a permutation of `entries`. Malformed snapshots
    /// (empty or duplicate ids) are rejected before any scoring happens.
    pub fn order(
        &mut self,
        entries: &[FeedEntry],
        now: SystemTime,
    ) -> Result<Ranking, RankError> {
        validate_snapshot(entries)?;

        let mut scored: Vec<(FeedEntry, ScoreParts)> = entries
            .iter()
            .map(|entry| {
                let noise = if self.config.variety_factor == 0.0 {
                    0.0
                } else {
                    self.config.variety_factor * VARIETY_SPAN * self.rng.random::<f64>()
                };
                (entry.clone(), score_entry(entry, &self.config, now, noise))
            })
            .collect();

        // Stable: ties keep their original relative order.
        scored.sort_by(|a, b| b.1.total().total_cmp(&a.1.total()));

        self.spotlight_pass(&mut scored);

        let evidence: Vec<ScoreEvidence> = scored
            .iter()
            .enumerate()
            .map(|(rank, (entry, parts))| ScoreEvidence {
                id: entry.id.clone(),
                author_id: entry.author_id.clone(),
                score: parts.total(),
                unresolved_bonus: parts.unresolved_bonus,
                cost_bonus: parts.cost_bonus,
                recency_bonus: parts.recency_bonus,
                noise: parts.noise,
                rank,
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            total = entries.len(),
            spotlight = self.config.spotlight_size.min(entries.len()),
            variety = self.config.variety_factor,
            "feed ranked"
        );

        Ok(Ranking {
            entries: scored.into_iter().map(|(entry, _)| entry).collect(),
            evidence,
        })
    }

    /// De-duplicate authors across the top of the feed.
    ///
    /// Scans the first `spotlight_size` positions left to right. When the
    /// author at position `i` already appeared earlier in the spotlight, the
    /// entry is swapped with the first later entry (beyond the spotlight if
    /// necessary) whose author has not yet appeared. When no such entry
    /// exists the duplicate stays put.
    fn spotlight_pass(&self, scored: &mut [(FeedEntry, ScoreParts)]) {
        let k = self.config.spotlight_size.min(scored.len());
        let mut seen: AHashSet<String> = AHashSet::with_capacity(k);
        for i in 0..k {
            if seen.contains(&scored[i].0.author_id) {
                let replacement = (i + 1..scored.len())
                    .find(|&j| !seen.contains(&scored[j].0.author_id));
                if let Some(j) = replacement {
                    scored.swap(i, j);
                }
            }
            seen.insert(scored[i].0.author_id.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use castfeed_core::entry::{EntryError, EntryStatus, MediaClass};
    use web_time::Duration;

    fn reference() -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
    }

    fn entry(id: &str, author: &str, days_old: f64) -> FeedEntry {
        let submitted = reference() - Duration::from_secs_f64(days_old * 86_400.0);
        FeedEntry::new(id, author, submitted).with_status(EntryStatus::Resolved)
    }

    fn deterministic_ranker() -> FeedRanker {
        let config = RankConfig::default()
            .with_prioritize_unresolved(false)
            .with_cost_awareness(false);
        FeedRanker::with_seed(config, 7).unwrap()
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking.entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn empty_snapshot_ranks_to_empty() {
        let mut ranker = deterministic_ranker();
        let ranking = ranker.order(&[], reference()).unwrap();
        assert!(ranking.entries.is_empty());
        assert!(ranking.evidence.is_empty());
    }

    #[test]
    fn single_entry_is_returned_unchanged() {
        let mut ranker = deterministic_ranker();
        let snapshot = vec![entry("only", "a", 1.0)];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ranking.entries, snapshot);
        assert_eq!(ranking.evidence[0].rank, 0);
    }

    #[test]
    fn output_is_a_permutation_of_the_input() {
        let mut ranker = FeedRanker::with_seed(
            RankConfig::default().with_variety_factor(1.0),
            42,
        )
        .unwrap();
        let snapshot: Vec<FeedEntry> = (0..50)
            .map(|i| entry(&format!("e{i}"), &format!("a{}", i % 7), f64::from(i)))
            .collect();
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ranking.entries.len(), snapshot.len());
        let mut got: Vec<&str> = ids(&ranking);
        got.sort_unstable();
        let mut want: Vec<&str> = snapshot.iter().map(|e| e.id.as_str()).collect();
        want.sort_unstable();
        assert_eq!(got, want);
    }

    #[test]
    fn zero_variety_is_deterministic_across_calls() {
        let mut ranker = deterministic_ranker();
        let snapshot: Vec<FeedEntry> = (0..20)
            .map(|i| entry(&format!("e{i}"), &format!("a{i}"), f64::from(i)))
            .collect();
        let first = ranker.order(&snapshot, reference()).unwrap();
        let second = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn equal_scores_keep_input_order() {
        // One author, identical timestamps, every toggle off: all scores tie,
        // so the stable sort must preserve the input order and the spotlight
        // pass has no alternative author to swap in.
        let mut ranker = deterministic_ranker();
        let snapshot = vec![
            entry("first", "a", 3.0),
            entry("second", "a", 3.0),
            entry("third", "a", 3.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking), vec!["first", "second", "third"]);
    }

    #[test]
    fn unresolved_entries_rank_first_when_prioritized() {
        let config = RankConfig::default().with_cost_awareness(false);
        let mut ranker = FeedRanker::with_seed(config, 1).unwrap();
        let snapshot = vec![
            entry("old-open", "a", 10.0).with_status(EntryStatus::AwaitingReview),
            entry("fresh-closed", "b", 0.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking)[0], "old-open");
        assert!(ranking.evidence[0].unresolved_bonus > 0.0);
    }

    #[test]
    fn cheap_media_outranks_expensive_media_at_equal_recency() {
        let mut ranker = FeedRanker::with_seed(
            RankConfig::default().with_prioritize_unresolved(false),
            1,
        )
        .unwrap();
        let snapshot = vec![
            entry("hosted", "a", 2.0).with_media(MediaClass::Hosted),
            entry("embedded", "b", 2.0).with_media(MediaClass::Embedded),
            entry("plain", "c", 2.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking), vec!["embedded", "hosted", "plain"]);
    }

    #[test]
    fn spotlight_swaps_duplicate_author_with_first_fresh_author() {
        // Scores order a1 > a2 > b; the spotlight should pull `b` up over
        // the duplicate at position 1.
        let mut ranker = deterministic_ranker();
        let snapshot = vec![
            entry("a1", "ava", 0.0),
            entry("a2", "ava", 1.0),
            entry("b", "ben", 2.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking), vec!["a1", "b", "a2"]);
    }

    #[test]
    fn spotlight_reaches_beyond_the_window_for_a_fresh_author() {
        // Spotlight of 2, but the only alternative author sits at position 3.
        let config = RankConfig::default()
            .with_prioritize_unresolved(false)
            .with_cost_awareness(false)
            .with_spotlight_size(2);
        let mut ranker = FeedRanker::with_seed(config, 1).unwrap();
        let snapshot = vec![
            entry("a1", "ava", 0.0),
            entry("a2", "ava", 1.0),
            entry("a3", "ava", 2.0),
            entry("b", "ben", 3.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking), vec!["a1", "b", "a3", "a2"]);
    }

    #[test]
    fn spotlight_is_noop_when_every_entry_shares_an_author() {
        let mut ranker = deterministic_ranker();
        let snapshot = vec![
            entry("n1", "solo", 0.0),
            entry("n2", "solo", 1.0),
            entry("n3", "solo", 2.0),
            entry("n4", "solo", 3.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking), vec!["n1", "n2", "n3", "n4"]);
    }

    #[test]
    fn zero_spotlight_disables_the_pass() {
        let config = RankConfig::default()
            .with_prioritize_unresolved(false)
            .with_cost_awareness(false)
            .with_spotlight_size(0);
        let mut ranker = FeedRanker::with_seed(config, 1).unwrap();
        let snapshot = vec![
            entry("a1", "ava", 0.0),
            entry("a2", "ava", 1.0),
            entry("b", "ben", 2.0),
        ];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        assert_eq!(ids(&ranking), vec!["a1", "a2", "b"]);
    }

    #[test]
    fn malformed_snapshot_fails_fast() {
        let mut ranker = deterministic_ranker();
        let dup = vec![entry("x", "a", 0.0), entry("x", "b", 1.0)];
        assert_eq!(
            ranker.order(&dup, reference()),
            Err(RankError::Entry(EntryError::DuplicateId { id: "x".into() }))
        );
        let blank = vec![entry("", "a", 0.0)];
        assert_eq!(
            ranker.order(&blank, reference()),
            Err(RankError::Entry(EntryError::EmptyId { index: 0 }))
        );
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = RankConfig::default().with_variety_factor(2.0);
        assert!(FeedRanker::with_seed(config, 1).is_err());
    }

    #[test]
    fn noise_stays_within_the_variety_envelope() {
        let mut ranker = FeedRanker::with_seed(
            RankConfig::default().with_variety_factor(0.5),
            99,
        )
        .unwrap();
        let snapshot: Vec<FeedEntry> = (0..100)
            .map(|i| entry(&format!("e{i}"), &format!("a{i}"), 1.0))
            .collect();
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        for ev in &ranking.evidence {
            assert!(ev.noise >= 0.0);
            assert!(ev.noise < 0.5 * VARIETY_SPAN);
        }
    }

    #[test]
    fn evidence_ranks_align_with_output_positions() {
        let mut ranker = deterministic_ranker();
        let snapshot: Vec<FeedEntry> = (0..10)
            .map(|i| entry(&format!("e{i}"), &format!("a{}", i % 3), f64::from(i)))
            .collect();
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        for (position, ev) in ranking.evidence.iter().enumerate() {
            assert_eq!(ev.rank, position);
            assert_eq!(ev.id, ranking.entries[position].id);
        }
    }

    #[test]
    fn evidence_jsonl_is_one_object_per_line() {
        let mut ranker = deterministic_ranker();
        let snapshot = vec![entry("e0", "ava", 1.0)];
        let ranking = ranker.order(&snapshot, reference()).unwrap();
        let line = ranking.evidence[0].to_jsonl();
        assert!(line.starts_with('{') && line.ends_with('}'));
        assert!(line.contains(r#""schema":"feed-ranking-v1""#));
        assert!(line.contains(r#""id":"e0""#));
        assert!(!line.contains('\n'));
    }
}
