//! Severity classification for findings.

/// Risk classification of a finding, ordered from highest to lowest.
///
/// Nuclei templates use a fixed five-value set. Anything else a template
/// reports is preserved verbatim in `Other` so it can still be tallied.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
    /// A severity string outside the fixed set, preserved verbatim.
    Other(String),
}

impl Severity {
    /// The fixed severity set, in display order.
    pub const FIXED: [Self; 5] = [
        Self::Critical,
        Self::High,
        Self::Medium,
        Self::Low,
        Self::Info,
    ];

    /// Parse a raw severity string. Matching against the fixed set is
    /// case-insensitive; unrecognized values are preserved verbatim.
    ///
    /// Case-folding is deliberate: an off-case `CRITICAL` tallies into the
    /// `critical` bucket and its bar, rather than into a verbatim ad-hoc
    /// bucket that the visualizer would never chart.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "info" => Self::Info,
            _ => Self::Other(raw.to_string()),
        }
    }

    /// Stable tally bucket key: canonical lowercase for the fixed set,
    /// the verbatim string for `Other`.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
            Self::Other(raw) => raw,
        }
    }

    /// Upper-cased display form.
    #[must_use]
    pub fn label(&self) -> String {
        self.key().to_uppercase()
    }

    /// Whether this severity is one of the fixed five.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_fixed_set() {
        assert_eq!(Severity::parse("critical"), Severity::Critical);
        assert_eq!(Severity::parse("high"), Severity::High);
        assert_eq!(Severity::parse("medium"), Severity::Medium);
        assert_eq!(Severity::parse("low"), Severity::Low);
        assert_eq!(Severity::parse("info"), Severity::Info);
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(Severity::parse("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::parse("High"), Severity::High);
    }

    #[test]
    fn parse_preserves_unknown_verbatim() {
        let sev = Severity::parse("WeIrD");
        assert_eq!(sev, Severity::Other("WeIrD".to_string()));
        assert_eq!(sev.key(), "WeIrD");
        assert!(!sev.is_fixed());
    }

    #[test]
    fn key_is_stable_across_calls() {
        let sev = Severity::parse("critical");
        assert_eq!(sev.key(), Severity::parse("CRITICAL").key());
    }

    #[test]
    fn label_is_uppercase() {
        assert_eq!(Severity::Critical.label(), "CRITICAL");
        assert_eq!(Severity::Other("unknown".to_string()).label(), "UNKNOWN");
    }

    #[test]
    fn fixed_set_order() {
        assert_eq!(Severity::FIXED[0], Severity::Critical);
        assert_eq!(Severity::FIXED[4], Severity::Info);
    }
}
