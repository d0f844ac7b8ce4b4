//! Running per-severity counts.

use std::collections::HashMap;

use crate::event::Severity;

/// Per-severity counters plus a grand total.
///
/// Buckets are keyed by [`Severity::key`] with get-or-create semantics, so
/// a previously-unseen severity string gains its own bucket on first use.
#[derive(Debug, Clone, Default)]
pub struct Tally {
    total: u64,
    buckets: HashMap<String, u64>,
}

impl Tally {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one finding of the given severity.
    pub fn record(&mut self, severity: &Severity) {
        self.total = self.total.saturating_add(1);
        *self.buckets.entry(severity.key().to_string()).or_insert(0) += 1;
    }

    /// Count for one severity bucket; zero when never seen.
    #[must_use]
    pub fn count(&self, severity: &Severity) -> u64 {
        self.buckets.get(severity.key()).copied().unwrap_or(0)
    }

    /// Total findings recorded, across all buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Drop all counts.
    pub fn clear(&mut self) {
        self.total = 0;
        self.buckets.clear();
    }
}
