//! Core types for findings and severities.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::str::FromStr;

/// Severity level for findings.
///
/// Variants are ordered `Info < Warn < Error` so callers can classify a
/// finding list against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail a check.
    Info,
    /// Warning that should be addressed.
    Warn,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Error returned when parsing an unknown severity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{0}`, expected: error, warn, info")]
pub struct ParseSeverityError(String);

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(ParseSeverityError(s.to_string())),
        }
    }
}

/// A single rule violation or informational message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    /// Identifier of the rule that produced this finding (e.g. `ARCH-ACL`).
    pub rule_id: String,
    /// Severity of this finding.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Location of the offending element in the source document
    /// (e.g. `boundaries[0].relations[2]`).
    pub path: String,
    /// Structured details such as cycle membership or counts.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub meta: Map<String, Value>,
}

impl Finding {
    /// Creates a new finding without metadata.
    #[must_use]
    pub fn new(
        rule_id: impl Into<String>,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            rule_id: rule_id.into(),
            severity,
            message: message.into(),
            path: path.into(),
            meta: Map::new(),
        }
    }

    /// Attaches a metadata entry to this finding.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }

    /// Total order used for deterministic output: rule id, then path, then message.
    #[must_use]
    pub fn report_order(&self, other: &Self) -> Ordering {
        self.rule_id
            .cmp(&other.rule_id)
            .then_with(|| self.path.cmp(&other.path))
            .then_with(|| self.message.cmp(&other.message))
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.path, self.severity, self.rule_id, self.message
        )
    }
}

/// Sorts findings into report order. The sort is stable.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(Finding::report_order);
}

/// Checks if any finding meets or exceeds the given severity threshold.
#[must_use]
pub fn has_findings_at(findings: &[Finding], severity: Severity) -> bool {
    findings.iter().any(|f| f.severity >= severity)
}

/// Counts findings by severity as `(errors, warnings, infos)`.
#[must_use]
pub fn count_by_severity(findings: &[Finding]) -> (usize, usize, usize) {
    findings
        .iter()
        .fold((0, 0, 0), |(errors, warnings, infos), f| match f.severity {
            Severity::Error => (errors + 1, warnings, infos),
            Severity::Warn => (errors, warnings + 1, infos),
            Severity::Info => (errors, warnings, infos + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_finding(rule_id: &str, path: &str, message: &str) -> Finding {
        Finding::new(rule_id, Severity::Error, path, message)
    }

    #[test]
    fn severity_is_ordered() {
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Warn > Severity::Info);
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("ERROR".parse::<Severity>(), Ok(Severity::Error));
        assert_eq!("warn".parse::<Severity>(), Ok(Severity::Warn));
        assert_eq!("Info".parse::<Severity>(), Ok(Severity::Info));
        assert!("fatal".parse::<Severity>().is_err());
    }

    #[test]
    fn finding_serializes_camel_case_without_empty_meta() {
        let f = make_finding("ARCH-ACL", "boundaries[0].relations[0]", "boom");
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["ruleId"], "ARCH-ACL");
        assert_eq!(json["severity"], "error");
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn finding_with_meta_serializes_meta() {
        let f = make_finding("ARCH-BOUNDARIES", "boundaries[0]", "weak").with_meta("cross", 3);
        let json = serde_json::to_value(&f).unwrap();
        assert_eq!(json["meta"]["cross"], 3);
    }

    #[test]
    fn sort_orders_by_rule_then_path_then_message() {
        let mut findings = vec![
            make_finding("B", "a", "x"),
            make_finding("A", "b", "y"),
            make_finding("A", "b", "a"),
            make_finding("A", "a", "z"),
        ];
        sort_findings(&mut findings);
        let keys: Vec<_> = findings
            .iter()
            .map(|f| format!("{}|{}|{}", f.rule_id, f.path, f.message))
            .collect();
        assert_eq!(keys, vec!["A|a|z", "A|b|a", "A|b|y", "B|a|x"]);
    }

    #[test]
    fn threshold_classification() {
        let findings = vec![Finding::new("X", Severity::Warn, "p", "m")];
        assert!(!has_findings_at(&findings, Severity::Error));
        assert!(has_findings_at(&findings, Severity::Warn));
        assert!(has_findings_at(&findings, Severity::Info));
        assert!(!has_findings_at(&[], Severity::Info));
    }

    #[test]
    fn counts_by_severity() {
        let findings = vec![
            Finding::new("X", Severity::Error, "p", "m"),
            Finding::new("X", Severity::Warn, "p", "m"),
            Finding::new("X", Severity::Warn, "p", "m"),
        ];
        assert_eq!(count_by_severity(&findings), (1, 2, 0));
    }
}
