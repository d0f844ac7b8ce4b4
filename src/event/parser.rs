//! Line parser for Nuclei `-json` output.
//!
//! Nuclei emits one self-describing JSON object per stdout line. Anything
//! that is not such an object (blank lines, banner output, partial writes)
//! is expected noise, not an error.

use chrono::Local;
use serde::Deserialize;

use crate::event::{Finding, Severity};

/// One Nuclei JSONL record. A record is only a finding when it carries a
/// template id, a match location, and an info block.
#[derive(Debug, Deserialize)]
struct ScanRecord {
    #[serde(rename = "template-id")]
    template_id: String,
    #[serde(rename = "matched-at")]
    matched_at: String,
    info: RecordInfo,
}

#[derive(Debug, Deserialize)]
struct RecordInfo {
    severity: Option<String>,
}

/// Decode one raw output line into a [`Finding`].
///
/// Returns `None` for anything that does not decode into a complete record;
/// this is the expected outcome for log noise and must never surface an
/// error. Severity defaults to `info` when the info block omits it.
#[must_use]
pub fn parse_line(line: &str) -> Option<Finding> {
    let record: ScanRecord = serde_json::from_str(line).ok()?;

    let severity = record
        .info
        .severity
        .as_deref()
        .map_or(Severity::Info, Severity::parse);

    Some(Finding {
        observed_at: Local::now(),
        severity,
        template_id: record.template_id,
        location: record.matched_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_complete_record() {
        let line = r#"{"template-id":"cve-2024-1234","matched-at":"https://example.com/admin","info":{"severity":"critical"}}"#;
        let finding = parse_line(line).expect("complete record should parse");

        assert_eq!(finding.severity, Severity::Critical);
        assert_eq!(finding.template_id, "cve-2024-1234");
        assert_eq!(finding.location, "https://example.com/admin");
    }

    #[test]
    fn parse_defaults_severity_to_info() {
        let line = r#"{"template-id":"tech-detect","matched-at":"https://example.com","info":{}}"#;
        let finding = parse_line(line).expect("record without severity should parse");
        assert_eq!(finding.severity, Severity::Info);
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(parse_line("This is not JSON").is_none());
    }

    #[test]
    fn parse_rejects_blank_line() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   ").is_none());
    }

    #[test]
    fn parse_rejects_missing_match_location() {
        let line = r#"{"template-id":"cve-2024-1234","info":{"severity":"high"}}"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn parse_rejects_missing_info_block() {
        let line = r#"{"template-id":"cve-2024-1234","matched-at":"https://example.com"}"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn parse_rejects_missing_template_id() {
        let line = r#"{"matched-at":"https://example.com","info":{"severity":"low"}}"#;
        assert!(parse_line(line).is_none());
    }

    #[test]
    fn parse_ignores_extra_fields() {
        let line = r#"{"template-id":"exposed-panel","matched-at":"https://example.com/panel","info":{"severity":"high","name":"Exposed Panel"},"host":"example.com"}"#;
        assert!(parse_line(line).is_some());
    }

    #[test]
    fn parse_keeps_unknown_severity_verbatim() {
        let line = r#"{"template-id":"x","matched-at":"https://example.com","info":{"severity":"urgent"}}"#;
        let finding = parse_line(line).expect("record should parse");
        assert_eq!(finding.severity, Severity::Other("urgent".to_string()));
    }
}
