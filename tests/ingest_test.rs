//! End-to-end ingestion and aggregation scenarios.

use nucamp::event::Severity;
use nucamp::panels;
use nucamp::scan::ScanState;

fn record(template: &str, severity: &str) -> String {
    format!(
        r#"{{"template-id":"{template}","matched-at":"https://example.com","info":{{"severity":"{severity}"}}}}"#
    )
}

#[test]
fn three_findings_in_arrival_order() {
    let mut state = ScanState::new();
    assert!(state.ingest(&record("cve-a", "critical")));
    assert!(state.ingest(&record("exposed-panel", "high")));
    assert!(state.ingest(&record("ssl-tls-weak", "medium")));

    assert_eq!(state.tally().total(), 3);
    assert_eq!(state.tally().count(&Severity::Critical), 1);
    assert_eq!(state.tally().count(&Severity::High), 1);
    assert_eq!(state.tally().count(&Severity::Medium), 1);
    assert_eq!(state.findings().len(), 3);

    let rows = panels::results_rows(&state);
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].template, "cve-a");
    assert_eq!(rows[1].template, "exposed-panel");
    assert_eq!(rows[2].template, "ssl-tls-weak");
}

#[test]
fn non_json_line_is_a_negative_signal() {
    let mut state = ScanState::new();
    assert!(!state.ingest("This is not JSON"));
    assert_eq!(state.tally().total(), 0);
    assert!(state.findings().is_empty());
}

#[test]
fn each_accepted_record_increments_by_exactly_one() {
    let mut state = ScanState::new();
    for (i, severity) in ["critical", "high", "medium", "low", "info"]
        .iter()
        .enumerate()
    {
        let before = state.tally().count(&Severity::parse(severity));
        assert!(state.ingest(&record(&format!("t-{i}"), severity)));

        assert_eq!(state.tally().total(), (i + 1) as u64);
        assert_eq!(state.findings().len(), i + 1);
        assert_eq!(state.tally().count(&Severity::parse(severity)), before + 1);
    }
}

#[test]
fn malformed_lines_leave_counts_untouched() {
    let mut state = ScanState::new();
    state.ingest(&record("cve-a", "high"));

    for noise in ["", "   ", "{}", "{\"info\":{}}", "[1,2,3]", "garbage"] {
        assert!(!state.ingest(noise), "accepted noise line: {noise:?}");
    }
    assert_eq!(state.tally().total(), 1);
    assert_eq!(state.findings().len(), 1);
}

#[test]
fn unrecognized_severity_is_tallied_but_not_charted() {
    let mut state = ScanState::new();
    assert!(state.ingest(&record("odd-template", "catastrophic")));

    let odd = Severity::Other("catastrophic".to_string());
    assert_eq!(state.tally().total(), 1);
    assert_eq!(state.tally().count(&odd), 1);

    let bars = panels::severity_bars(state.tally());
    assert!(bars.iter().all(|bar| bar.count == 0));
}

#[test]
fn results_view_caps_at_fifteen_most_recent() {
    let mut state = ScanState::new();
    for i in 0..40 {
        state.ingest(&record(&format!("t-{i}"), "info"));
    }

    let rows = panels::results_rows(&state);
    assert_eq!(rows.len(), panels::RECENT_ROWS);
    assert_eq!(rows[0].template, "t-25");
    assert_eq!(rows[panels::RECENT_ROWS - 1].template, "t-39");
    // The canonical log keeps everything.
    assert_eq!(state.findings().len(), 40);
}
