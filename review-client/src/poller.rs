//! Analysis poller
//!
//! Starts an analysis and polls its status on a fixed interval until the
//! backend reports `completed`, then fetches the results once.
//!
//! The loop has no backoff and no retry budget: the first failed request ends
//! it and is returned to the caller, leaving the local state at `processing`.
//! Each status request is awaited before the next tick, so at most one is in
//! flight. Cancelling the token (or dropping the [`PollHandle`]) stops the
//! timer.

use review_core::domain::analysis::{Analysis, AnalysisStatus};
use review_core::dto::analysis::RunAnalysisResponse;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

use crate::ReviewClient;
use crate::error::{ClientError, Result};

/// Time between two status requests
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Poll-until-completed driver for one project's analysis
pub struct AnalysisPoller {
    client: Arc<ReviewClient>,
    interval: Duration,
    state: watch::Sender<AnalysisStatus>,
}

impl AnalysisPoller {
    /// Creates a poller in the `not_started` state
    pub fn new(client: Arc<ReviewClient>) -> Self {
        let (state, _) = watch::channel(AnalysisStatus::NotStarted);
        Self {
            client,
            interval: DEFAULT_POLL_INTERVAL,
            state,
        }
    }

    /// Overrides the polling interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Current local state
    pub fn status(&self) -> AnalysisStatus {
        *self.state.borrow()
    }

    /// Watch local state transitions
    pub fn subscribe(&self) -> watch::Receiver<AnalysisStatus> {
        self.state.subscribe()
    }

    /// Triggers the remote analysis and moves to `processing`
    pub async fn start(&self, project_id: i64) -> Result<RunAnalysisResponse> {
        let response = self.client.run_analysis(project_id).await?;
        info!("Analysis started for project {}", project_id);
        self.state.send_replace(AnalysisStatus::Processing);
        Ok(response)
    }

    /// Polls until the analysis completes, then fetches its results
    ///
    /// Returns `Ok(None)` if `cancel` fires first. The first tick happens one
    /// interval after the call.
    pub async fn poll(&self, project_id: i64, cancel: &CancellationToken) -> Result<Option<Analysis>> {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Polling cancelled for project {}", project_id);
                    return Ok(None);
                }
                _ = ticker.tick() => {}
            }

            let report = tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("Polling cancelled for project {}", project_id);
                    return Ok(None);
                }
                report = self.client.analysis_status(project_id) => report,
            };

            match report {
                Ok(report) if report.status.is_terminal() => break,
                Ok(report) => {
                    debug!("Analysis for project {} is {}", project_id, report.status);
                }
                Err(e) => {
                    warn!("Stopped polling project {}: {}", project_id, e);
                    return Err(e);
                }
            }
        }

        self.state.send_replace(AnalysisStatus::Completed);
        info!("Analysis completed for project {}", project_id);

        let analysis = self.client.analysis_results(project_id).await?;
        Ok(Some(analysis))
    }

    /// Starts the analysis and polls it to completion
    pub async fn run(&self, project_id: i64, cancel: &CancellationToken) -> Result<Option<Analysis>> {
        self.start(project_id).await?;
        self.poll(project_id, cancel).await
    }

    /// Runs [`AnalysisPoller::run`] on a background task
    ///
    /// Polling stops when the returned handle is dropped.
    pub fn spawn(self: Arc<Self>, project_id: i64) -> PollHandle {
        let cancel = CancellationToken::new();
        let task_cancel = cancel.clone();

        let task = tokio::spawn(async move { self.run(project_id, &task_cancel).await });

        PollHandle {
            task,
            cancel: cancel.clone(),
            _guard: cancel.drop_guard(),
        }
    }
}

/// Owner of a background polling task
///
/// Dropping the handle cancels the task.
pub struct PollHandle {
    task: JoinHandle<Result<Option<Analysis>>>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl PollHandle {
    /// Stops polling without waiting for the task
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the task's outcome
    ///
    /// `Ok(None)` means polling was cancelled.
    pub async fn join(self) -> Result<Option<Analysis>> {
        let PollHandle { task, _guard, .. } = self;
        let outcome = task.await;
        _guard.disarm();

        outcome.map_err(|e| ClientError::InternalError(format!("Polling task failed: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;

    fn poller() -> AnalysisPoller {
        let client = ReviewClient::new("http://localhost:8000/api/v1", Arc::new(Session::in_memory()));
        AnalysisPoller::new(Arc::new(client))
    }

    #[test]
    fn test_defaults() {
        let poller = poller();
        assert_eq!(poller.interval(), Duration::from_secs(3));
        assert_eq!(poller.status(), AnalysisStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_cancelled_before_first_tick_sends_nothing() {
        let poller = poller().with_interval(Duration::from_secs(60));
        let cancel = CancellationToken::new();
        cancel.cancel();

        let outcome = poller.poll(1, &cancel).await.unwrap();
        assert!(outcome.is_none());
        assert_eq!(poller.status(), AnalysisStatus::NotStarted);
    }
}
