//! Project command handlers
//!
//! Handles project creation, listing, viewing, deletion and file uploads.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use review_client::{ReviewClient, UploadFile};
use review_core::domain::project::{Project, ProjectLanguage, ProjectSource};
use review_core::dto::project::CreateProject;
use std::path::PathBuf;

use crate::config::Config;
use crate::context::connect;
use crate::project_resolver::resolve_project_id;
use crate::types::ProjectRef;

/// Project subcommands
#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// Project name
        #[arg(short, long)]
        name: String,

        /// Short description
        #[arg(short, long)]
        description: Option<String>,

        /// Where the code comes from (upload, github, gitlab)
        #[arg(short, long, default_value = "upload")]
        source: ProjectSource,

        /// Primary language (python, rust, go, ...)
        #[arg(short, long)]
        language: Option<ProjectLanguage>,

        /// Repository URL for github/gitlab projects
        #[arg(long)]
        repo_url: Option<String>,

        /// Branch to analyze
        #[arg(long, default_value = "main")]
        branch: String,
    },
    /// List your projects
    List,
    /// Get project details
    Get {
        /// Project id or name
        project: String,
    },
    /// Delete a project
    Delete {
        /// Project id or name
        project: String,
    },
    /// Upload code files into a project
    Upload {
        /// Project id or name
        project: String,

        /// Files to upload
        files: Vec<PathBuf>,
    },
}

/// Handle project commands
///
/// Routes project subcommands to their respective handlers.
///
/// # Arguments
/// * `command` - The project command to execute
/// * `config` - The CLI configuration
pub async fn handle_project_command(command: ProjectCommands, config: &Config) -> Result<()> {
    let client = connect(config)?;

    match command {
        ProjectCommands::Create {
            name,
            description,
            source,
            language,
            repo_url,
            branch,
        } => {
            let req = CreateProject {
                name,
                description,
                source,
                primary_language: language,
                repo_url,
                branch,
            };
            create_project(&client, req).await
        }
        ProjectCommands::List => list_projects(&client).await,
        ProjectCommands::Get { project } => get_project(&client, &project).await,
        ProjectCommands::Delete { project } => delete_project(&client, &project).await,
        ProjectCommands::Upload { project, files } => {
            upload_files(&client, &project, files).await
        }
    }
}

/// Create a new project
async fn create_project(client: &ReviewClient, req: CreateProject) -> Result<()> {
    let project = client.create_project(req).await?;

    println!("{}", "✓ Project created successfully!".green().bold());
    println!("  ID:     {}", project.id.to_string().cyan());
    println!("  Name:   {}", project.name.bold());
    println!("  Source: {}", project.source.to_string().dimmed());

    if project.source == ProjectSource::Upload {
        println!();
        println!(
            "Upload code with {}",
            format!("review project upload {} <files...>", project.id).cyan()
        );
    }

    Ok(())
}

/// List all projects
async fn list_projects(client: &ReviewClient) -> Result<()> {
    let projects = client.list_projects().await?;

    if projects.is_empty() {
        println!("{}", "No projects found.".yellow());
    } else {
        println!("{}", format!("Found {} project(s):", projects.len()).bold());
        println!();
        for project in projects {
            print_project_summary(&project);
        }
    }

    Ok(())
}

/// Get and display a single project
async fn get_project(client: &ReviewClient, project: &str) -> Result<()> {
    let id = resolve_project_id(client, &ProjectRef::parse(project)).await?;

    let project = client.get_project(id).await?;

    print_project_details(&project);

    Ok(())
}

/// Delete a project
async fn delete_project(client: &ReviewClient, project: &str) -> Result<()> {
    let id = resolve_project_id(client, &ProjectRef::parse(project)).await?;

    client.delete_project(id).await?;

    println!(
        "{}",
        format!("✓ Project {} deleted successfully!", id)
            .green()
            .bold()
    );

    Ok(())
}

/// Upload files into a project
///
/// Whatever was selected is forwarded, including nothing at all.
async fn upload_files(client: &ReviewClient, project: &str, paths: Vec<PathBuf>) -> Result<()> {
    let id = resolve_project_id(client, &ProjectRef::parse(project)).await?;

    let mut files = Vec::with_capacity(paths.len());
    for path in &paths {
        let file = UploadFile::from_path(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        files.push(file);
    }

    let count = files.len();
    let summary = client.upload_files(id, files).await?;

    println!(
        "{}",
        format!("✓ Uploaded {} file(s) to project {}", count, id)
            .green()
            .bold()
    );
    if let Some(message) = &summary.message {
        println!("  {}", message.dimmed());
    }
    if let Some(uploaded) = summary.files_uploaded {
        println!("  Files accepted: {}", uploaded);
    }
    if let Some(lines) = summary.total_lines {
        println!("  Lines of code:  {}", lines);
    }

    Ok(())
}

/// Print a project summary
fn print_project_summary(project: &Project) {
    let analyzed = if project.is_analyzed {
        "analyzed".green()
    } else {
        "not analyzed".yellow()
    };

    println!(
        "  {} {} {}",
        "▸".cyan(),
        project.name.bold(),
        format!("#{}", project.id).dimmed()
    );
    println!(
        "    Source:  {}{}",
        project.source.to_string().dimmed(),
        project
            .primary_language
            .map(|lang| format!(" / {}", lang))
            .unwrap_or_default()
            .dimmed()
    );
    println!(
        "    Files:   {} ({} lines)",
        project.total_files, project.total_lines
    );
    println!("    Status:  {}", analyzed);
    if let Some(desc) = &project.description {
        println!("    Description: {}", desc.dimmed());
    }
    println!();
}

/// Print detailed project information
fn print_project_details(project: &Project) {
    println!("{}", "Project Details:".bold());
    println!("  ID:          {}", project.id.to_string().cyan());
    println!("  Name:        {}", project.name.bold());
    if let Some(desc) = &project.description {
        println!("  Description: {}", desc);
    }
    println!("  Source:      {}", project.source);
    if let Some(lang) = project.primary_language {
        println!("  Language:    {}", lang);
    }
    if let Some(url) = &project.repo_url {
        println!("  Repository:  {} ({})", url, project.branch);
    }
    println!("  Files:       {}", project.total_files);
    println!("  Lines:       {}", project.total_lines);
    println!(
        "  Created:     {}",
        project.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    match project.last_analyzed {
        Some(at) => println!("  Analyzed:    {}", at.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Analyzed:    {}", "never".yellow()),
    }
}
