//! Parallel seed scanning
//!
//! Seeds are evaluated in ascending batches. Each seed gets its own finder, so
//! workers share nothing but the stop flag, which is only read between batches.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::core::types::Seed;
use crate::search::config::ScanConfig;
use crate::search::finder::{SeedReport, StrongholdFinder};

/// Where a scan ended
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanSummary {
    /// Last seed that was fully evaluated, if any
    pub last_seed: Option<Seed>,
    pub scanned: u64,
    pub hits: u64,
}

pub struct Scanner {
    config: ScanConfig,
    stop: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            config,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Flag that ends the scan at the next batch boundary once set
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop)
    }

    /// Report for one seed, keeping strongholds at or above the threshold
    pub fn evaluate(&self, seed: Seed) -> SeedReport {
        StrongholdFinder::from_config(&self.config)
            .evaluate(seed)
            .filtered(self.config.threshold)
    }

    /// Qualifying seeds among `count` seeds from `start`, in seed order
    pub fn scan_batch(&self, start: Seed, count: u64) -> Vec<SeedReport> {
        (0..count)
            .into_par_iter()
            .filter_map(|i| start.checked_add(i as i64))
            .map(|seed| self.evaluate(seed))
            .filter(|report| !report.is_empty())
            .collect()
    }

    /// Scan upward from `start` until stopped, the limit is hit, or seeds run out.
    ///
    /// `on_hit` sees each qualifying seed in ascending order.
    pub fn run(&self, start: Seed, mut on_hit: impl FnMut(&SeedReport)) -> ScanSummary {
        let batch = self.config.batch_size.max(1) as u64;
        let started = Instant::now();
        let mut summary = ScanSummary { last_seed: None, scanned: 0, hits: 0 };
        let mut next = Some(start);

        while let Some(first) = next {
            if self.stop.load(Ordering::Relaxed) {
                break;
            }
            let remaining = self.config.limit.map_or(batch, |limit| limit - summary.scanned);
            let room = i64::MAX.abs_diff(first).saturating_add(1);
            let count = batch.min(remaining).min(room);
            if count == 0 {
                break;
            }

            for report in self.scan_batch(first, count) {
                summary.hits += 1;
                on_hit(&report);
            }

            summary.scanned += count;
            let last = first + (count - 1) as i64;
            summary.last_seed = Some(last);
            next = last.checked_add(1);

            let elapsed = started.elapsed().as_secs_f64();
            log::info!(
                "Scanned up to seed {last} ({} seeds, {} hits, {:.0} seeds/sec)",
                summary.scanned,
                summary.hits,
                summary.scanned as f64 / elapsed.max(1e-9)
            );
        }

        summary
    }
}
