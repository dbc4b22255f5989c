use std::num::NonZeroUsize;

use futures_util::future::join_all;
use scout_core::{Candidate, RunId, ScanOutcome, ValidatedCandidate};
use scout_logging::{scout_debug, scout_info};
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, Prober, RunProgress};

pub const DEFAULT_BATCH_SIZE: NonZeroUsize = match NonZeroUsize::new(12) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSettings {
    /// Probes launched together; the next batch waits for all of them.
    pub batch_size: NonZeroUsize,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Identity and cancellation flag of one validation run.
///
/// Created when the run starts, polled at every batch boundary, dropped with the run.
#[derive(Debug, Clone)]
pub struct RunContext {
    run_id: RunId,
    cancel: CancellationToken,
}

impl RunContext {
    pub fn new(run_id: RunId) -> Self {
        Self::with_token(run_id, CancellationToken::new())
    }

    pub fn with_token(run_id: RunId, cancel: CancellationToken) -> Self {
        Self { run_id, cancel }
    }

    pub fn run_id(&self) -> RunId {
        self.run_id
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Percentage of `processed` over `total`, rounded to nearest.
///
/// Reaches 100 only once everything is processed.
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 || processed >= total {
        return 100;
    }
    let rounded = (processed * 100 + total / 2) / total;
    rounded.min(99) as u8
}

/// Probes `candidates` batch by batch and returns the working ones, priority tier first.
///
/// Cancellation is checked before each batch; a cancelled run yields
/// [`ScanOutcome::Cancelled`] and no partial results.
pub async fn validate(
    prober: &dyn Prober,
    candidates: Vec<Candidate>,
    settings: &BatchSettings,
    ctx: &RunContext,
    sink: &dyn ProgressSink,
) -> ScanOutcome {
    let run_id = ctx.run_id();
    let total = candidates.len();
    scout_info!(
        "run {} probing {} candidates in batches of {}",
        run_id,
        total,
        settings.batch_size
    );

    if total == 0 {
        if ctx.is_cancelled() {
            return ScanOutcome::Cancelled;
        }
        sink.emit(EngineEvent::Progress(RunProgress {
            run_id,
            processed: 0,
            total,
            percent: 100,
        }));
        return ScanOutcome::Completed(Vec::new());
    }

    let mut working = Vec::new();
    let mut processed = 0;
    for batch in candidates.chunks(settings.batch_size.get()) {
        if ctx.is_cancelled() {
            scout_info!("run {} cancelled after {}/{} probes", run_id, processed, total);
            return ScanOutcome::Cancelled;
        }

        let outcomes = join_all(batch.iter().map(|candidate| prober.probe(&candidate.url))).await;
        for (candidate, outcome) in batch.iter().zip(outcomes) {
            if outcome.is_working() {
                working.push(ValidatedCandidate::working(candidate.clone()));
            } else {
                scout_debug!("run {} {}: {}", run_id, candidate.url, outcome);
            }
        }

        processed += batch.len();
        sink.emit(EngineEvent::Progress(RunProgress {
            run_id,
            processed,
            total,
            percent: progress_percent(processed, total),
        }));
    }

    // Stable: input order survives within each tier.
    working.sort_by_key(|item| !item.is_priority());
    scout_info!("run {} finished: {}/{} working", run_id, working.len(), total);
    ScanOutcome::Completed(working)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_nearest() {
        assert_eq!(progress_percent(1, 3), 33);
        assert_eq!(progress_percent(2, 3), 67);
        assert_eq!(progress_percent(1, 8), 13);
    }

    #[test]
    fn percent_hits_100_only_when_done() {
        assert_eq!(progress_percent(199, 200), 99);
        assert_eq!(progress_percent(200, 200), 100);
        assert_eq!(progress_percent(0, 0), 100);
        assert_eq!(progress_percent(0, 5), 0);
    }
}
