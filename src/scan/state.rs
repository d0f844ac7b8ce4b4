//! Scan session state machine and finding log.

use std::fmt;

use crate::event::{self, Finding};
use crate::scan::Tally;

/// Lifecycle state of a scan session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScanStatus {
    #[default]
    Idle,
    Running,
    Completed,
    Interrupted,
    DemoMode,
}

impl fmt::Display for ScanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Idle => "Idle",
            Self::Running => "Scanning",
            Self::Completed => "Completed",
            Self::Interrupted => "Interrupted",
            Self::DemoMode => "Demo Mode",
        };
        f.write_str(label)
    }
}

/// Single owner of all mutable scan state.
///
/// Findings are append-only in arrival order; the tally is updated in the
/// same step, so `tally.total()` always equals `findings().len()`. Display
/// layers cap how many entries they render without touching the log.
#[derive(Debug, Default)]
pub struct ScanState {
    status: ScanStatus,
    target: String,
    findings: Vec<Finding>,
    tally: Tally,
}

impl ScanState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw output line through the parser.
    ///
    /// Returns whether a finding was recorded; lines that are not events
    /// leave all state untouched.
    pub fn ingest(&mut self, line: &str) -> bool {
        let Some(finding) = event::parse_line(line) else {
            return false;
        };
        tracing::debug!(
            severity = finding.severity.key(),
            template = %finding.template_id,
            "Finding recorded"
        );
        self.tally.record(&finding.severity);
        self.findings.push(finding);
        true
    }

    pub fn set_status(&mut self, status: ScanStatus) {
        tracing::debug!(from = %self.status, to = %status, "Status transition");
        self.status = status;
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.target = target.into();
    }

    /// Clear findings and tally and return to `Idle`.
    pub fn reset(&mut self) {
        self.findings.clear();
        self.tally.clear();
        self.status = ScanStatus::Idle;
    }

    #[must_use]
    pub fn status(&self) -> ScanStatus {
        self.status
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// The most recent `n` findings in arrival order.
    #[must_use]
    pub fn recent(&self, n: usize) -> &[Finding] {
        let start = self.findings.len().saturating_sub(n);
        &self.findings[start..]
    }
}
