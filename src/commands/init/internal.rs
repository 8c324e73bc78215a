//! Internal implementation for init command

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use starter::config::{self, InitConfig};
use starter::git::GitCli;
use starter::initializer::{self, InitArgs};
use starter::prompt::{NoInput, Prompter, Resolution, StdinPrompter};

use super::InitCommand;

/// Main execution logic for init command
pub fn execute_init(command: InitCommand) -> Result<()> {
    let root = resolve_root(command.root.as_deref())?;
    let config = load_config(&root, command.config.as_deref())?;

    if command.dry_run {
        println!("{}", "🔍 Dry run: no files will be changed".cyan().bold());
    } else {
        println!("{}", "🚀 Initializing project from template".bold().blue());
    }
    println!("{}", format!("   Root: {}", root.display()).dimmed());

    let mut prompter = select_prompter(command.no_input);
    let args = InitArgs {
        name: command.name,
        description: command.description,
        author: command.author,
        variant: command.variant,
        remove: command.remove,
        dry_run: command.dry_run,
    };

    let options = match initializer::resolve_options(args, prompter.as_mut())? {
        Resolution::Value(options) => options,
        Resolution::Quit => {
            println!("Initialization cancelled. No changes were made.");
            return Ok(());
        }
    };

    let vcs = GitCli::new(&root);
    let summary = initializer::run(&root, &config, &options, &vcs, command.verbose)?;

    if options.dry_run {
        println!("Run again without --dry-run to apply these changes.");
    } else if !summary.warnings.is_empty() {
        println!("Review the warnings above; missing template files were skipped.");
    }

    Ok(())
}

fn resolve_root(root: Option<&Path>) -> Result<PathBuf> {
    match root {
        Some(path) => {
            if !path.is_dir() {
                anyhow::bail!("Root '{}' is not a directory", path.display());
            }
            Ok(path.to_path_buf())
        }
        None => std::env::current_dir().context("Failed to read current directory"),
    }
}

fn load_config(root: &Path, explicit: Option<&Path>) -> Result<InitConfig> {
    match explicit {
        Some(path) => config::load_from(path),
        None => config::load(root),
    }
}

/// Prompt on stdin only when it's a terminal and input isn't disabled
fn select_prompter(no_input: bool) -> Box<dyn Prompter> {
    let disabled = no_input
        || std::env::var("STARTER_NO_INPUT").is_ok_and(|v| v == "1")
        || !atty::is(atty::Stream::Stdin);
    if disabled {
        Box::new(NoInput)
    } else {
        Box::new(StdinPrompter)
    }
}
