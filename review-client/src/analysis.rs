//! Analysis-related API endpoints

use review_core::domain::analysis::Analysis;
use review_core::dto::analysis::{AnalysisStatusReport, RunAnalysisResponse};

use crate::ReviewClient;
use crate::error::Result;

impl ReviewClient {
    // =============================================================================
    // Analysis
    // =============================================================================

    /// Start a background analysis of a project
    ///
    /// Returns as soon as the backend has accepted the job; use
    /// [`ReviewClient::analysis_status`] or [`crate::AnalysisPoller`] to follow it.
    pub async fn run_analysis(&self, project_id: i64) -> Result<RunAnalysisResponse> {
        let response = self
            .post(&format!("/analysis/run/{}", project_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the status of the project's latest analysis
    pub async fn analysis_status(&self, project_id: i64) -> Result<AnalysisStatusReport> {
        let response = self
            .get(&format!("/analysis/status/{}", project_id))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Get the results of the project's latest analysis
    pub async fn analysis_results(&self, project_id: i64) -> Result<Analysis> {
        let response = self
            .get(&format!("/analysis/results/{}", project_id))
            .send()
            .await?;

        self.handle_response(response).await
    }
}
