//! Project-related API endpoints

use reqwest::multipart::{Form, Part};
use review_core::domain::project::Project;
use review_core::dto::project::{CreateProject, UploadSummary};
use std::path::Path;
use validator::Validate;

use crate::ReviewClient;
use crate::error::{ClientError, Result};

/// Multipart form field the backend reads uploaded files from
const UPLOAD_FIELD: &str = "files";

/// A file to upload into a project
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }

    /// Read a file from disk, naming it after the path's last component
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("Not a file path: {}", path.display()))
            })?
            .to_string();
        let content = tokio::fs::read(path).await?;

        Ok(Self { file_name, content })
    }
}

impl ReviewClient {
    // =============================================================================
    // Project Management
    // =============================================================================

    /// Create a new project
    ///
    /// The request is validated locally before it is sent.
    pub async fn create_project(&self, req: CreateProject) -> Result<Project> {
        req.validate()?;
        let response = self.post("/projects").json(&req).send().await?;

        self.handle_response(response).await
    }

    /// List the signed-in user's projects
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let response = self.get("/projects").send().await?;

        self.handle_response(response).await
    }

    /// Get a project by ID
    pub async fn get_project(&self, project_id: i64) -> Result<Project> {
        let response = self.get(&format!("/projects/{}", project_id)).send().await?;

        self.handle_response(response).await
    }

    /// Delete a project
    pub async fn delete_project(&self, project_id: i64) -> Result<()> {
        let response = self
            .delete(&format!("/projects/{}", project_id))
            .send()
            .await?;

        self.handle_empty_response(response).await
    }

    /// Upload code files into a project
    ///
    /// Files are sent as one multipart request, each under the `files` field.
    /// An empty list is sent as-is; the backend decides what that means.
    pub async fn upload_files(&self, project_id: i64, files: Vec<UploadFile>) -> Result<UploadSummary> {
        let form = files.into_iter().fold(Form::new(), |form, file| {
            form.part(
                UPLOAD_FIELD,
                Part::bytes(file.content).file_name(file.file_name),
            )
        });

        let response = self
            .post(&format!("/projects/{}/upload", project_id))
            .multipart(form)
            .send()
            .await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upload_file_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.py");
        std::fs::write(&path, "print('hi')\n").unwrap();

        let file = UploadFile::from_path(&path).await.unwrap();
        assert_eq!(file.file_name, "main.py");
        assert_eq!(file.content, b"print('hi')\n");
    }

    #[tokio::test]
    async fn test_upload_file_missing() {
        let err = UploadFile::from_path("/definitely/not/here.py")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
