//! Keyspace scanning and per-type memory ranking for Redis diagnostics.

pub mod config;
pub mod report;
pub mod scan;
pub mod store;
pub mod topk;

pub use config::ScanConfig;
pub use scan::{CancelToken, InspectError, ScanError, ScanOutcome, run_scan};
pub use store::{KeyspaceStore, RedisStore, ScanPage, StoreError, ValueType};
pub use topk::{KeyObservation, TOP_K, TopKAggregator, TypeBreakdown};
