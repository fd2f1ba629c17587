//! Project domain types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Code project owned by the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub source: ProjectSource,
    #[serde(default)]
    pub primary_language: Option<ProjectLanguage>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default = "default_branch")]
    pub branch: String,
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_lines: u64,
    #[serde(default)]
    pub is_analyzed: bool,
    #[serde(default)]
    pub last_analyzed: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub(crate) fn default_branch() -> String {
    "main".to_string()
}

/// Where the project's code comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectSource {
    Upload,
    Github,
    Gitlab,
}

impl fmt::Display for ProjectSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectSource::Upload => "upload",
            ProjectSource::Github => "github",
            ProjectSource::Gitlab => "gitlab",
        };
        f.write_str(s)
    }
}

impl FromStr for ProjectSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upload" => Ok(ProjectSource::Upload),
            "github" => Ok(ProjectSource::Github),
            "gitlab" => Ok(ProjectSource::Gitlab),
            other => Err(format!(
                "unknown project source '{}' (expected upload, github or gitlab)",
                other
            )),
        }
    }
}

/// Primary language of a project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectLanguage {
    Python,
    Javascript,
    Typescript,
    Java,
    Cpp,
    Csharp,
    Go,
    Rust,
    Ruby,
    Php,
}

impl fmt::Display for ProjectLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProjectLanguage::Python => "python",
            ProjectLanguage::Javascript => "javascript",
            ProjectLanguage::Typescript => "typescript",
            ProjectLanguage::Java => "java",
            ProjectLanguage::Cpp => "cpp",
            ProjectLanguage::Csharp => "csharp",
            ProjectLanguage::Go => "go",
            ProjectLanguage::Rust => "rust",
            ProjectLanguage::Ruby => "ruby",
            ProjectLanguage::Php => "php",
        };
        f.write_str(s)
    }
}

impl ProjectLanguage {
    pub const ALL: [ProjectLanguage; 10] = [
        ProjectLanguage::Python,
        ProjectLanguage::Javascript,
        ProjectLanguage::Typescript,
        ProjectLanguage::Java,
        ProjectLanguage::Cpp,
        ProjectLanguage::Csharp,
        ProjectLanguage::Go,
        ProjectLanguage::Rust,
        ProjectLanguage::Ruby,
        ProjectLanguage::Php,
    ];
}

impl FromStr for ProjectLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        ProjectLanguage::ALL
            .into_iter()
            .find(|lang| lang.to_string() == wanted)
            .ok_or_else(|| format!("unknown language '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_backend_payload() {
        let json = r#"{
            "id": 3,
            "user_id": 1,
            "name": "billing",
            "description": null,
            "source": "github",
            "primary_language": "python",
            "repo_url": "https://github.com/acme/billing",
            "branch": "develop",
            "total_files": 12,
            "total_lines": 3400,
            "is_analyzed": false,
            "last_analyzed": null,
            "created_at": "2024-05-01T10:00:00Z"
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.source, ProjectSource::Github);
        assert_eq!(project.primary_language, Some(ProjectLanguage::Python));
        assert_eq!(project.branch, "develop");
        assert!(project.last_analyzed.is_none());
    }

    #[test]
    fn test_branch_defaults_to_main() {
        let json = r#"{"id": 1, "user_id": 1, "name": "x", "source": "upload",
                       "created_at": "2024-05-01T10:00:00Z"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.branch, "main");
        assert_eq!(project.total_files, 0);
    }

    #[test]
    fn test_parse_source_and_language() {
        assert_eq!("GitHub".parse::<ProjectSource>(), Ok(ProjectSource::Github));
        assert_eq!("rust".parse::<ProjectLanguage>(), Ok(ProjectLanguage::Rust));
        assert!("cobol".parse::<ProjectLanguage>().is_err());
        assert!("svn".parse::<ProjectSource>().is_err());
    }

    #[test]
    fn test_enum_display_matches_wire_format() {
        assert_eq!(ProjectSource::Gitlab.to_string(), "gitlab");
        assert_eq!(
            serde_json::to_string(&ProjectLanguage::Csharp).unwrap(),
            format!("\"{}\"", ProjectLanguage::Csharp)
        );
    }
}
