#![forbid(unsafe_code)]

//! CastFeed Demo
//!
//! Generates a synthetic submission feed, ranks it, then replays a simulated
//! scroll session (fling, refresh, resize, list teardown) through the event
//! coalescer and the windowing engine, logging every emitted window.
//!
//! # Running
//!
//! ```sh
//! cargo run -p castfeed-demo
//! RUST_LOG=trace cargo run -p castfeed-demo   # include per-frame windows
//! ```

mod data;

use castfeed_core::{ViewportCoalescer, ViewportEvent};
use castfeed_rank::{FeedRanker, RankConfig};
use castfeed_window::{WindowEngine, WindowState};
use tracing::{info, warn};
use web_time::SystemTime;

const FEED_LEN: usize = 500;
const ITEM_HEIGHT: u32 = 600;
const CONTAINER_HEIGHT: u32 = 800;
const OVERSCAN: usize = 3;
const SEED: u64 = 0xCA57_FEED;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let now = SystemTime::now();
    let feed = data::synthetic_feed(FEED_LEN, SEED, now, 21);
    info!(len = feed.len(), "generated synthetic feed");

    let config = RankConfig::default().with_variety_factor(0.3);
    let mut ranker = FeedRanker::with_seed(config, SEED)?;
    let ranking = ranker.order(&feed, now)?;
    info!("spotlight after ranking:");
    for evidence in ranking.evidence.iter().take(ranker.config().spotlight_size) {
        info!("  {}", evidence.to_jsonl());
    }

    let mut engine = WindowEngine::new(
        ranking.entries.len(),
        ITEM_HEIGHT,
        CONTAINER_HEIGHT,
        OVERSCAN,
    )?;
    let mut coalescer = ViewportCoalescer::new();

    log_window("initial", engine.window(), &ranking.entries);

    // A fling: 90 raw scroll events arriving faster than the frame rate,
    // coalesced down to one engine update per simulated frame (15 events).
    let mut top = 0u64;
    for frame in 0..6 {
        for _ in 0..15 {
            top += 437;
            coalescer.push(ViewportEvent::Scroll { top });
        }
        for event in coalescer.flush() {
            let state = engine.apply(event)?;
            log_window(&format!("fling frame {frame}"), state, &ranking.entries);
        }
    }

    // A pane resize arriving mid-session.
    coalescer.push(ViewportEvent::Resize { height: 1_400 });
    coalescer.push(ViewportEvent::Resize { height: 1_000 });
    for event in coalescer.flush() {
        let state = engine.apply(event)?;
        log_window("after resize", state, &ranking.entries);
    }

    // Jump a specific submission to the top of the viewport.
    let target = ranking.entries.len() / 2;
    let state = engine.on_scroll(engine.scroll_top_for(target));
    log_window(&format!("jump to index {target}"), state, &ranking.entries);

    // A refresh that halves the feed, then a teardown to empty.
    let state = engine.on_items_changed(ranking.entries.len() / 2);
    log_window("after refresh", state, &ranking.entries);
    match engine.on_items_changed(0) {
        WindowState::Empty => info!("feed emptied, nothing mounted"),
        WindowState::Windowed(w) => warn!(?w, "expected an empty window"),
    }

    Ok(())
}

fn log_window(label: &str, state: WindowState, entries: &[castfeed_core::FeedEntry]) {
    match state.window() {
        Some(w) => {
            let mounted = w.slice(entries);
            info!(
                label,
                start = w.start_index,
                end = w.end_index,
                offset_top = w.offset_top,
                total_height = w.total_height,
                first_id = mounted.first().map(|e| e.id.as_str()).unwrap_or("-"),
                "window"
            );
        }
        None => info!(label, "window empty"),
    }
}
