//! Project DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::project::{ProjectLanguage, ProjectSource, default_branch};

/// Body of `POST /projects`
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(
        min = 1,
        max = 100,
        message = "Project name must be between 1 and 100 characters"
    ))]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub source: ProjectSource,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_language: Option<ProjectLanguage>,

    #[validate(url(message = "Repository URL must be a valid URL"))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl CreateProject {
    /// An uploaded project on the default branch
    pub fn upload(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            source: ProjectSource::Upload,
            primary_language: None,
            repo_url: None,
            branch: default_branch(),
        }
    }
}

/// Response of `POST /projects/{id}/upload`
///
/// The backend decides the exact shape; known fields are typed and the rest
/// is kept as-is.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadSummary {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub files_uploaded: Option<u64>,
    #[serde(default)]
    pub total_lines: Option<u64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_project_defaults() {
        let req = CreateProject::upload("billing");
        assert_eq!(req.branch, "main");
        assert_eq!(req.source, ProjectSource::Upload);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_name_length_bounds() {
        assert!(CreateProject::upload("").validate().is_err());
        assert!(CreateProject::upload("x".repeat(100)).validate().is_ok());
        assert!(CreateProject::upload("x".repeat(101)).validate().is_err());
    }

    #[test]
    fn test_repo_url_must_be_url() {
        let mut req = CreateProject::upload("billing");
        req.source = ProjectSource::Github;
        req.repo_url = Some("acme/billing".to_string());
        assert!(req.validate().is_err());

        req.repo_url = Some("https://github.com/acme/billing".to_string());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_upload_summary_keeps_unknown_fields() {
        let summary: UploadSummary =
            serde_json::from_str(r#"{"message": "ok", "files_uploaded": 2, "skipped": []}"#)
                .unwrap();
        assert_eq!(summary.files_uploaded, Some(2));
        assert!(summary.extra.contains_key("skipped"));
    }
}
