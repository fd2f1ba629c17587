//! Analysis DTOs

use serde::{Deserialize, Serialize};

use crate::domain::analysis::AnalysisStatus;

/// Response of `POST /analysis/run/{project_id}` (HTTP 202)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunAnalysisResponse {
    #[serde(default)]
    pub message: String,
    pub project_id: i64,
    pub status: AnalysisStatus,
}

/// Response of `GET /analysis/status/{project_id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisStatusReport {
    pub status: AnalysisStatus,
    #[serde(default)]
    pub analysis_id: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_started_has_no_analysis_id() {
        let report: AnalysisStatusReport =
            serde_json::from_str(r#"{"status": "not_started"}"#).unwrap();
        assert_eq!(report.status, AnalysisStatus::NotStarted);
        assert!(report.analysis_id.is_none());
    }

    #[test]
    fn test_run_response() {
        let resp: RunAnalysisResponse = serde_json::from_str(
            r#"{"message": "Analysis started", "project_id": 4, "status": "processing"}"#,
        )
        .unwrap();
        assert_eq!(resp.project_id, 4);
        assert_eq!(resp.status, AnalysisStatus::Processing);
    }
}
