//! Synthetic feed generation for the demo.

use castfeed_core::entry::{EntryStatus, FeedEntry, MediaClass};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use web_time::{Duration, SystemTime};

const AUTHORS: &[&str] = &[
    "ava", "ben", "carmen", "diego", "elena", "farid", "grace", "hana", "ivan", "june",
];

/// Generate `len` plausible submissions spread over `span_days` before `now`.
///
/// Roughly a quarter of entries await review, and media classes mix the way
/// a submission feed does: mostly embedded players, some hosted uploads,
/// a few text-only posts.
pub fn synthetic_feed(len: usize, seed: u64, now: SystemTime, span_days: u64) -> Vec<FeedEntry> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..len)
        .map(|i| {
            let age_secs = rng.random_range(0..span_days.max(1) * 86_400);
            let submitted = now - Duration::from_secs(age_secs);
            let status = if rng.random_range(0..4) == 0 {
                EntryStatus::AwaitingReview
            } else {
                EntryStatus::Resolved
            };
            let media = match rng.random_range(0..10) {
                0..=5 => MediaClass::Embedded,
                6..=8 => MediaClass::Hosted,
                _ => MediaClass::Other,
            };
            let author = AUTHORS[rng.random_range(0..AUTHORS.len())];
            FeedEntry::new(format!("submission-{i:04}"), author, submitted)
                .with_status(status)
                .with_media(media)
        })
        .collect()
}
