//! Analysis command handlers
//!
//! Starts analyses, follows them to completion and shows the results
//! dashboard.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use review_client::{AnalysisPoller, ReviewClient};
use review_core::domain::analysis::{Analysis, AnalysisStatus, IssueSeverity};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::Config;
use crate::context::connect;
use crate::project_resolver::resolve_project_id;
use crate::types::ProjectRef;

/// Analysis subcommands
#[derive(Subcommand)]
pub enum AnalysisCommands {
    /// Start an analysis and wait for the results
    Run {
        /// Project id or name
        project: String,

        /// Return right after the analysis is accepted
        #[arg(long)]
        no_wait: bool,
    },
    /// Show the status of the latest analysis
    Status {
        /// Project id or name
        project: String,
    },
    /// Show the results of the latest analysis
    Results {
        /// Project id or name
        project: String,
    },
}

/// Handle analysis commands
///
/// # Arguments
/// * `command` - The analysis command to execute
/// * `config` - The CLI configuration
pub async fn handle_analysis_command(command: AnalysisCommands, config: &Config) -> Result<()> {
    let client = Arc::new(connect(config)?);

    match command {
        AnalysisCommands::Run { project, no_wait } => {
            run_analysis(client, config, &project, no_wait).await
        }
        AnalysisCommands::Status { project } => show_status(&client, &project).await,
        AnalysisCommands::Results { project } => show_results(&client, &project).await,
    }
}

/// Start an analysis, optionally polling until it completes
///
/// Ctrl-C stops polling; the analysis itself keeps running on the backend.
async fn run_analysis(
    client: Arc<ReviewClient>,
    config: &Config,
    project: &str,
    no_wait: bool,
) -> Result<()> {
    let id = resolve_project_id(&client, &ProjectRef::parse(project)).await?;
    let poller =
        Arc::new(AnalysisPoller::new(Arc::clone(&client)).with_interval(config.poll_interval));

    if no_wait {
        let response = poller.start(id).await?;
        println!("{}", "✓ Analysis started".green().bold());
        println!("  Project: {}", response.project_id.to_string().cyan());
        println!("  Status:  {}", colorize_status(&response.status));
        println!();
        println!(
            "Check progress with {}",
            format!("review analysis status {}", id).cyan()
        );
        return Ok(());
    }

    println!(
        "{}",
        format!("Analyzing project {} (checking every {}s)...", id, config.poll_interval.as_secs())
            .bold()
    );

    debug!("Polling project {} every {:?}", id, config.poll_interval);
    let handle = poller.spawn(id);
    let outcome = tokio::select! {
        outcome = handle.join() => outcome?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, stopped polling project {}", id);
            println!();
            println!("{}", "Stopped waiting; the analysis continues on the server.".yellow());
            println!(
                "  Check progress with {}",
                format!("review analysis status {}", id).cyan()
            );
            return Ok(());
        }
    };

    if let Some(analysis) = outcome {
        println!("{}", "✓ Analysis complete!".green().bold());
        println!();
        print_dashboard(&analysis);
    }

    Ok(())
}

/// Show the latest analysis status
async fn show_status(client: &ReviewClient, project: &str) -> Result<()> {
    let id = resolve_project_id(client, &ProjectRef::parse(project)).await?;

    let report = client.analysis_status(id).await?;

    println!("  Project:  {}", id.to_string().cyan());
    println!("  Status:   {}", colorize_status(&report.status));
    if let Some(analysis_id) = report.analysis_id {
        println!("  Analysis: {}", analysis_id.to_string().dimmed());
    }
    if report.status == AnalysisStatus::NotStarted {
        println!();
        println!(
            "Start one with {}",
            format!("review analysis run {}", id).cyan()
        );
    }

    Ok(())
}

/// Show the latest analysis results
async fn show_results(client: &ReviewClient, project: &str) -> Result<()> {
    let id = resolve_project_id(client, &ProjectRef::parse(project)).await?;

    let analysis = client.analysis_results(id).await?;

    print_dashboard(&analysis);

    Ok(())
}

/// Print the analysis dashboard
fn print_dashboard(analysis: &Analysis) {
    println!(
        "{}",
        format!("Analysis #{} for project {}", analysis.id, analysis.project_id).bold()
    );
    println!(
        "  Run at:           {}",
        analysis.created_at.format("%Y-%m-%d %H:%M:%S")
    );
    if !analysis.completed {
        println!("  {}", "Analysis has not finished yet".yellow());
    }

    println!("\n{}", "Scores:".bold());
    println!(
        "  Quality score:    {}",
        analysis
            .overall_quality_score
            .map(colorize_score)
            .unwrap_or_else(|| "n/a".dimmed())
    );
    println!(
        "  Maintainability:  {}",
        format_metric(analysis.maintainability_index, "")
    );
    println!(
        "  Technical debt:   {}",
        format_metric(analysis.technical_debt_hours, " h")
    );
    println!(
        "  Avg complexity:   {}",
        format_metric(analysis.avg_complexity, "")
    );
    println!(
        "  Bug probability:  {}",
        analysis
            .bug_probability
            .map(|p| format!("{:.0}%", p * 100.0))
            .unwrap_or_else(|| "n/a".to_string())
    );
    if let Some(lines) = analysis.total_lines {
        println!("  Lines analyzed:   {}", lines);
    }

    println!(
        "\n{}",
        format!("Issues ({}):", analysis.total_issues()).bold()
    );
    for (severity, count) in analysis.issues_by_severity() {
        println!(
            "  {:<10} {}",
            colorize_severity(severity),
            if count == 0 {
                count.to_string().dimmed()
            } else {
                count.to_string().normal()
            }
        );
    }

    let vulnerabilities = analysis.security_vulnerabilities.to_string();
    println!(
        "\n  Security vulnerabilities: {}",
        if analysis.security_vulnerabilities > 0 {
            vulnerabilities.red().bold()
        } else {
            vulnerabilities.green()
        }
    );
}

fn format_metric(value: Option<f64>, unit: &str) -> String {
    value
        .map(|v| format!("{:.1}{}", v, unit))
        .unwrap_or_else(|| "n/a".to_string())
}

/// Colorize a 0-100 quality score
fn colorize_score(score: f64) -> ColoredString {
    let text = format!("{:.1}/100", score);
    if score >= 80.0 {
        text.green().bold()
    } else if score >= 60.0 {
        text.yellow().bold()
    } else {
        text.red().bold()
    }
}

fn colorize_severity(severity: IssueSeverity) -> ColoredString {
    let text = severity.to_string();
    match severity {
        IssueSeverity::Critical => text.red().bold(),
        IssueSeverity::High => text.red(),
        IssueSeverity::Medium => text.yellow(),
        IssueSeverity::Low => text.cyan(),
        IssueSeverity::Info => text.dimmed(),
    }
}

/// Colorize analysis status for display
fn colorize_status(status: &AnalysisStatus) -> ColoredString {
    let status_str = status.to_string();
    match status {
        AnalysisStatus::NotStarted => status_str.dimmed(),
        AnalysisStatus::Processing => status_str.cyan(),
        AnalysisStatus::Completed => status_str.green(),
    }
}
