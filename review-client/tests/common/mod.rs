#![allow(dead_code)]

use review_client::{MemoryTokenStore, ReviewClient, Session, SessionListener};
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::MockServer;

/// Counts "back to login" notifications
#[derive(Default)]
pub struct CountingListener(AtomicUsize);

impl CountingListener {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl SessionListener for CountingListener {
    fn on_session_expired(&self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub server: MockServer,
    pub client: Arc<ReviewClient>,
    pub store: Arc<MemoryTokenStore>,
    pub listener: Arc<CountingListener>,
}

/// Mock backend plus a client signed in with `token`
pub async fn signed_in(token: &str) -> Harness {
    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_token(token));
    let listener = Arc::new(CountingListener::default());
    let session = Session::restore(store.clone())
        .expect("memory store never fails")
        .with_listener(listener.clone());
    let client = Arc::new(ReviewClient::new(server.uri(), Arc::new(session)));

    Harness {
        server,
        client,
        store,
        listener,
    }
}

pub fn project_json(id: i64, name: &str) -> Value {
    json!({
        "id": id,
        "user_id": 1,
        "name": name,
        "description": null,
        "source": "upload",
        "primary_language": "rust",
        "repo_url": null,
        "branch": "main",
        "total_files": 4,
        "total_lines": 820,
        "is_analyzed": false,
        "last_analyzed": null,
        "created_at": "2024-05-01T10:00:00Z"
    })
}

pub fn analysis_json(project_id: i64) -> Value {
    json!({
        "id": 99,
        "project_id": project_id,
        "overall_quality_score": 81.0,
        "maintainability_index": 70.5,
        "technical_debt_hours": 3.5,
        "total_lines": 820,
        "avg_complexity": 2.9,
        "critical_issues": 0,
        "high_issues": 1,
        "medium_issues": 3,
        "low_issues": 7,
        "security_vulnerabilities": 0,
        "bug_probability": 0.07,
        "completed": true,
        "created_at": "2024-05-01T10:05:00Z"
    })
}
