//! Pure projections of scan state into display-ready panel descriptions.
//!
//! Nothing here touches the terminal; each builder maps a `ScanState`
//! snapshot to plain values the rendering surface draws. Builders hold no
//! state of their own and can be called repeatedly against the same
//! snapshot.

use crate::event::Severity;
use crate::scan::{ScanState, ScanStatus, Tally};

/// How many findings the results table shows at most.
pub const RECENT_ROWS: usize = 15;

/// Maximum displayed width of a template identifier before truncation.
pub const TEMPLATE_DISPLAY_WIDTH: usize = 23;

/// Marker appended to truncated template identifiers.
pub const TRUNCATION_MARKER: &str = "...";

/// Width of a full severity bar in the visualizer, in cells.
pub const BAR_WIDTH: usize = 30;

/// Static title-bar branding.
#[must_use]
pub fn title() -> &'static str {
    "\u{266a}\u{266b} NUCAMP - it really whips the CLI's ass! \u{266b}\u{266a}"
}

/// One row of the results table. `severity` is `None` only for the
/// placeholder row shown before any finding arrives.
#[derive(Debug, Clone)]
pub struct ResultsRow {
    pub time: String,
    pub severity: Option<Severity>,
    pub template: String,
    pub location: String,
}

/// Results panel heading, naming the current target.
#[must_use]
pub fn results_title(state: &ScanState) -> String {
    let target = if state.target().is_empty() {
        "No target"
    } else {
        state.target()
    };
    format!("SCAN RESULTS - {target}")
}

/// The most recent findings as table rows, oldest of the shown window
/// first. Emits a single placeholder row while the log is empty.
#[must_use]
pub fn results_rows(state: &ScanState) -> Vec<ResultsRow> {
    if state.findings().is_empty() {
        return vec![ResultsRow {
            time: "--:--:--".to_string(),
            severity: None,
            template: "No vulnerabilities found yet".to_string(),
            location: "---".to_string(),
        }];
    }

    state
        .recent(RECENT_ROWS)
        .iter()
        .map(|finding| ResultsRow {
            time: finding.display_time(),
            severity: Some(finding.severity.clone()),
            template: truncate_template(&finding.template_id),
            location: finding.location.clone(),
        })
        .collect()
}

/// Truncate a template identifier for display: the first
/// [`TEMPLATE_DISPLAY_WIDTH`] characters plus a marker when longer,
/// verbatim otherwise.
#[must_use]
pub fn truncate_template(id: &str) -> String {
    if id.chars().count() <= TEMPLATE_DISPLAY_WIDTH {
        id.to_string()
    } else {
        let prefix: String = id.chars().take(TEMPLATE_DISPLAY_WIDTH).collect();
        format!("{prefix}{TRUNCATION_MARKER}")
    }
}

/// One bar of the severity visualizer.
#[derive(Debug, Clone)]
pub struct SeverityBar {
    pub severity: Severity,
    pub count: u64,
    /// Filled cells, out of [`BAR_WIDTH`].
    pub width: usize,
}

/// Bars for the five fixed severities, proportional to their share of the
/// grand total. Ad-hoc severity buckets inflate the total but get no bar.
#[must_use]
pub fn severity_bars(tally: &Tally) -> Vec<SeverityBar> {
    Severity::FIXED
        .iter()
        .map(|severity| {
            let count = tally.count(severity);
            SeverityBar {
                severity: severity.clone(),
                count,
                width: bar_width(count, tally.total()),
            }
        })
        .collect()
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_width(count: u64, total: u64) -> usize {
    if count == 0 {
        return 0;
    }
    let share = count as f64 / total.max(1) as f64;
    (share * BAR_WIDTH as f64).round() as usize
}

/// Controls panel state: a binary activity light plus the status label.
#[derive(Debug, Clone)]
pub struct StatusIndicator {
    pub active: bool,
    pub label: String,
}

/// Project the session status into the controls indicator.
#[must_use]
pub fn status_indicator(status: ScanStatus) -> StatusIndicator {
    StatusIndicator {
        active: status == ScanStatus::Running,
        label: status.to_string(),
    }
}
