//! Analysis domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Latest analysis run for a project, as computed by the backend
///
/// Scores are surfaced, never computed, by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub id: i64,
    pub project_id: i64,
    #[serde(default)]
    pub overall_quality_score: Option<f64>,
    #[serde(default)]
    pub maintainability_index: Option<f64>,
    #[serde(default)]
    pub technical_debt_hours: Option<f64>,
    #[serde(default)]
    pub total_lines: Option<u64>,
    #[serde(default)]
    pub avg_complexity: Option<f64>,
    #[serde(default)]
    pub critical_issues: u32,
    #[serde(default)]
    pub high_issues: u32,
    #[serde(default)]
    pub medium_issues: u32,
    #[serde(default)]
    pub low_issues: u32,
    #[serde(default)]
    pub security_vulnerabilities: u32,
    #[serde(default)]
    pub bug_probability: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Analysis {
    /// Issue counts by severity, most severe first
    pub fn issues_by_severity(&self) -> [(IssueSeverity, u32); 4] {
        [
            (IssueSeverity::Critical, self.critical_issues),
            (IssueSeverity::High, self.high_issues),
            (IssueSeverity::Medium, self.medium_issues),
            (IssueSeverity::Low, self.low_issues),
        ]
    }

    pub fn total_issues(&self) -> u32 {
        self.issues_by_severity().iter().map(|(_, n)| n).sum()
    }
}

/// Severity attached to an issue found by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IssueSeverity::Critical => "critical",
            IssueSeverity::High => "high",
            IssueSeverity::Medium => "medium",
            IssueSeverity::Low => "low",
            IssueSeverity::Info => "info",
        };
        f.write_str(s)
    }
}

/// Local view of an analysis run
///
/// `not_started -> processing -> completed`. A failed status request leaves
/// the state at `Processing`; there is no modeled failure state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    #[default]
    NotStarted,
    Processing,
    Completed,
}

impl AnalysisStatus {
    /// Whether polling should stop on this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisStatus::Completed)
    }
}

impl fmt::Display for AnalysisStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AnalysisStatus::NotStarted => "not_started",
            AnalysisStatus::Processing => "processing",
            AnalysisStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> Analysis {
        serde_json::from_str(
            r#"{
                "id": 10,
                "project_id": 3,
                "overall_quality_score": 72.5,
                "maintainability_index": 64.0,
                "technical_debt_hours": 12.25,
                "total_lines": 3400,
                "avg_complexity": 4.1,
                "critical_issues": 1,
                "high_issues": 2,
                "medium_issues": 5,
                "low_issues": 9,
                "security_vulnerabilities": 1,
                "bug_probability": 0.18,
                "completed": true,
                "created_at": "2024-05-01T10:05:00Z"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_total_issues() {
        assert_eq!(analysis().total_issues(), 17);
    }

    #[test]
    fn test_issues_ordered_by_severity() {
        let counts = analysis().issues_by_severity();
        assert_eq!(counts[0], (IssueSeverity::Critical, 1));
        assert_eq!(counts[3], (IssueSeverity::Low, 9));
    }

    #[test]
    fn test_status_wire_format() {
        let status: AnalysisStatus = serde_json::from_str(r#""not_started""#).unwrap();
        assert_eq!(status, AnalysisStatus::NotStarted);
        assert_eq!(AnalysisStatus::Processing.to_string(), "processing");
    }

    #[test]
    fn test_only_completed_is_terminal() {
        assert!(!AnalysisStatus::NotStarted.is_terminal());
        assert!(!AnalysisStatus::Processing.is_terminal());
        assert!(AnalysisStatus::Completed.is_terminal());
    }
}
