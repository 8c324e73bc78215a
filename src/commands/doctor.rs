use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};

use starter::config;
use starter::layout::{check_layout, PathCheck};

#[derive(Serialize)]
struct LayoutReport {
    root: String,
    status: String, // "ready", "incomplete"
    git_available: bool,
    git_repository: bool,
    paths: Vec<PathCheck>,
}

/// Check the template layout without changing anything
///
/// Returns exit code 1 when any expected path is missing.
pub fn execute(root: Option<PathBuf>, config_path: Option<PathBuf>, json_output: bool) -> Result<i32> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };
    let config = match config_path {
        Some(path) => config::load_from(&path)?,
        None => config::load(&root)?,
    };

    let paths = check_layout(&root, &config);
    let git_available = which::which("git").is_ok();
    let git_repository = git_available && starter::git::is_git_repo(&root).unwrap_or(false);
    let missing = paths.iter().filter(|c| !c.present).count();

    let report = LayoutReport {
        root: root.display().to_string(),
        status: if missing == 0 { "ready" } else { "incomplete" }.to_string(),
        git_available,
        git_repository,
        paths,
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        display_report(&root, &report, missing);
    }

    Ok(if missing == 0 { 0 } else { 1 })
}

fn display_report(root: &Path, report: &LayoutReport, missing: usize) {
    println!("🏥 Checking template layout in {}", root.display());

    for check in &report.paths {
        if check.present {
            println!("  {} {} ({})", "✓".green(), check.path, check.role.dimmed());
        } else {
            println!("  {} {} ({})", "✗".red(), check.path, check.role.dimmed());
        }
    }

    if !report.git_available {
        println!("  {} git not found on PATH; URL lookup and commit will be skipped", "⚠️ ".yellow());
    } else if !report.git_repository {
        println!("  {} not a git repository; commit will fail", "⚠️ ".yellow());
    }

    if missing == 0 {
        println!("\n{}", "✅ Template layout is complete".green().bold());
    } else {
        println!(
            "\n{}",
            format!("⚠️  {missing} expected path(s) missing; init will skip them with warnings")
                .yellow()
                .bold()
        );
    }
}
