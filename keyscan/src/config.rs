use serde::Deserialize;

/// Tuning knobs for a keyspace scan pass.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ScanConfig {
    /// Upper bound on the number of keys requested per cursor call. The
    /// store may return more or fewer.
    #[serde(default = "ScanConfig::default_count_hint")]
    pub count_hint: usize,
    /// Emit a progress event after this many successfully inspected keys.
    /// Zero disables progress events.
    #[serde(default = "ScanConfig::default_progress_every")]
    pub progress_every: u64,
}

impl ScanConfig {
    fn default_count_hint() -> usize {
        1000
    }

    fn default_progress_every() -> u64 {
        10_000
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            count_hint: Self::default_count_hint(),
            progress_every: Self::default_progress_every(),
        }
    }
}
