//! The scan loop: cursor-driven enumeration feeding per-key inspection into
//! the top-K aggregator.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::ScanConfig;
use crate::store::{KeyspaceStore, StoreError};
use crate::topk::{KeyObservation, TOP_K, TopKAggregator, TypeBreakdown};

/// Fatal scan failures. Per-key inspection failures are counted in the
/// outcome instead of surfacing here.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A cursor enumeration call failed; the pass cannot be completed and
    /// is not retried.
    #[error("keyspace enumeration failed")]
    Enumeration(#[source] StoreError),
    /// Cancellation was requested before the cursor returned to zero.
    #[error("scan cancelled before completing a full pass")]
    Cancelled,
}

/// Non-fatal failure inspecting a single key.
#[derive(Debug, Error)]
pub enum InspectError {
    /// The key disappeared between enumeration and inspection.
    #[error("key vanished during inspection")]
    KeyGone,
    /// The store failed the memory or type query.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Cooperative cancellation flag checked between enumeration batches.
///
/// A batch already fetched is drained before the flag is honoured, so the
/// aggregates never reflect a half-applied batch.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation; the scan stops before its next batch.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Inspects a single key with two independent store queries.
///
/// `Ok(None)` marks a key excluded from aggregation because the store
/// attributes no memory to it. A zero or absent footprint almost always
/// means the key vanished mid-query, so it is skipped rather than ranked
/// as a ghost entry.
pub fn inspect<S: KeyspaceStore>(
    store: &mut S,
    key: &str,
) -> Result<Option<KeyObservation>, InspectError> {
    let memory_bytes = match store.memory_usage(key)? {
        Some(bytes) if bytes > 0 => bytes,
        _ => return Ok(None),
    };
    let value_type = store.value_type(key)?.ok_or(InspectError::KeyGone)?;
    Ok(Some(KeyObservation {
        name: key.to_string(),
        value_type,
        memory_bytes,
    }))
}

/// Mutable state of one scan pass over the keyspace. Created when the pass
/// starts, mutated batch by batch, finalized when the cursor returns to
/// zero.
#[derive(Debug)]
struct ScanSession {
    cursor: u64,
    scanned: u64,
    errors: u64,
    aggregator: TopKAggregator,
}

impl ScanSession {
    fn new(k: usize) -> Self {
        Self {
            cursor: 0,
            scanned: 0,
            errors: 0,
            aggregator: TopKAggregator::new(k),
        }
    }

    fn observe(&mut self, observation: KeyObservation, progress_every: u64) {
        self.aggregator.observe(observation);
        self.scanned += 1;
        if progress_every > 0 && self.scanned % progress_every == 0 {
            info!(scanned = self.scanned, "scan progress");
        }
    }

    fn count_error(&mut self, key: &str, err: &InspectError) {
        self.errors += 1;
        debug!(key, error = %err, "key inspection failed, skipping");
    }

    fn finalize(self) -> ScanOutcome {
        ScanOutcome {
            scanned: self.scanned,
            errors: self.errors,
            types: self.aggregator.finalize(),
        }
    }
}

/// Immutable result of a completed scan pass.
#[derive(Clone, Debug, PartialEq)]
pub struct ScanOutcome {
    /// Keys successfully inspected and aggregated.
    pub scanned: u64,
    /// Keys whose inspection failed and was skipped.
    pub errors: u64,
    /// Per-type breakdowns in display order.
    pub types: Vec<TypeBreakdown>,
}

impl ScanOutcome {
    /// Grand-total memory across every observed type.
    pub fn total_bytes(&self) -> u64 {
        self.types.iter().map(|t| t.total_bytes).sum()
    }
}

/// Runs a full enumeration pass against the store and returns the
/// finalized breakdown.
///
/// The pass is complete when a returned cursor equals zero again. Fails
/// only on enumeration errors or cancellation; individual key inspection
/// failures are absorbed into the outcome's error count.
pub fn run_scan<S: KeyspaceStore>(
    store: &mut S,
    config: &ScanConfig,
    cancel: &CancelToken,
) -> Result<ScanOutcome, ScanError> {
    let mut session = ScanSession::new(TOP_K);
    loop {
        if cancel.is_cancelled() {
            return Err(ScanError::Cancelled);
        }
        let page = store
            .scan_page(session.cursor, config.count_hint)
            .map_err(ScanError::Enumeration)?;
        for key in &page.keys {
            match inspect(store, key) {
                Ok(Some(observation)) => session.observe(observation, config.progress_every),
                Ok(None) => debug!(%key, "key excluded: no attributable memory"),
                Err(err) => session.count_error(key, &err),
            }
        }
        session.cursor = page.cursor;
        if session.cursor == 0 {
            break;
        }
    }
    info!(
        scanned = session.scanned,
        errors = session.errors,
        "scan pass complete"
    );
    Ok(session.finalize())
}
