//! Project resolver module
//!
//! Resolves project names and name prefixes to ids by listing the user's
//! projects, so commands accept `billing` as well as `12`.

use anyhow::{Context, Result, anyhow};
use review_client::ReviewClient;
use review_core::domain::project::Project;
use tracing::debug;

use crate::types::ProjectRef;

/// Resolve a project reference to its id
///
/// Ids are returned as-is without contacting the backend. Names are matched
/// case-insensitively: an exact name wins, otherwise the name must be an
/// unambiguous prefix.
///
/// # Errors
/// Returns an error if:
/// - No project matches
/// - Several projects match (ambiguous)
/// - The API call fails
pub async fn resolve_project_id(client: &ReviewClient, project: &ProjectRef) -> Result<i64> {
    let name = match project {
        ProjectRef::Id(id) => return Ok(*id),
        ProjectRef::Name(name) => name,
    };

    let projects = client
        .list_projects()
        .await
        .context("Failed to fetch projects for name resolution")?;

    let id = match_project(&projects, name)?;
    debug!("Resolved project '{}' to #{}", name, id);
    Ok(id)
}

/// Pick the single project `name` refers to
pub fn match_project(projects: &[Project], name: &str) -> Result<i64> {
    let wanted = name.to_lowercase();

    let exact: Vec<&Project> = projects
        .iter()
        .filter(|p| p.name.to_lowercase() == wanted)
        .collect();
    if exact.len() == 1 {
        return Ok(exact[0].id);
    }

    let matches: Vec<&Project> = if exact.is_empty() {
        projects
            .iter()
            .filter(|p| p.name.to_lowercase().starts_with(&wanted))
            .collect()
    } else {
        exact
    };

    match matches.len() {
        0 => Err(anyhow!("No project found with name starting with '{}'", name)),
        1 => Ok(matches[0].id),
        _ => {
            let names: Vec<String> = matches
                .iter()
                .map(|p| format!("{} (#{})", p.name, p.id))
                .collect();
            Err(anyhow!(
                "Ambiguous name '{}' matches multiple projects: {}",
                name,
                names.join(", ")
            ))
        }
    }
}
