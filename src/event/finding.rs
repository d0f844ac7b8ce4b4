//! A single detected-issue record.

use chrono::{DateTime, Local};

use crate::event::Severity;

/// One detected issue instance, immutable once constructed.
///
/// The full template identifier is retained; truncation for display is
/// the panel layer's concern.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Wall-clock time of detection.
    pub observed_at: DateTime<Local>,
    /// Risk classification reported by the template.
    pub severity: Severity,
    /// Identifier of the detection template, untruncated.
    pub template_id: String,
    /// The matched resource (usually a URL), displayed unmodified.
    pub location: String,
}

impl Finding {
    /// Detection time formatted for the results panel.
    #[must_use]
    pub fn display_time(&self) -> String {
        self.observed_at.format("%H:%M:%S").to_string()
    }
}
