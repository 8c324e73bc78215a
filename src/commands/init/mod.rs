//! Initialize a project from the ML starter template
//!
//! # Example
//!
//! ```no_run
//! // starter-init init --name my_model --variant vanilla --remove false --dry-run
//! ```

mod internal;

use anyhow::Result;
use std::path::PathBuf;

/// Command-line input for the init command
#[derive(Debug, Clone, Default)]
pub struct InitCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub variant: Option<String>,
    pub remove: Option<bool>,
    pub dry_run: bool,
    pub root: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub no_input: bool,
    pub verbose: bool,
}

/// Execute the init command
///
/// # Errors
///
/// Returns an error if:
/// - A supplied name or project type is invalid
/// - A value is missing and interactive input is unavailable
/// - The config file can't be read
/// - A filesystem operation fails for a reason other than a missing path
///
/// Quitting at a prompt is not an error.
pub fn execute(command: InitCommand) -> Result<()> {
    internal::execute_init(command)
}
