use serde::{Deserialize, Serialize};

/// Peers or pins processed at the same time when not configured.
pub const DEFAULT_CONCURRENCY: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Upper bound on in-flight per-peer and per-pin tasks.
    pub concurrency: usize,
    /// Compute and report the pin plan without issuing any pin.
    pub dry_run: bool,
}

impl SyncConfig {
    #[must_use]
    pub const fn new(concurrency: usize, dry_run: bool) -> Self {
        Self {
            concurrency,
            dry_run,
        }
    }

    /// Effective fan-out, never below one.
    #[must_use]
    pub fn concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONCURRENCY, false)
    }
}
