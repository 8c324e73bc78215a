//! Turn the generic ML template checkout into a named project
//!
//! This module follows the dependable-rust pattern:
//! - Public interface (this file): clean API
//! - Internal implementation: all logic in internal/ submodules
//!
//! # Example
//!
//! ```no_run
//! use starter::config::InitConfig;
//! use starter::git::GitCli;
//! use starter::initializer::{self, InitArgs};
//! use starter::prompt::{Resolution, StdinPrompter};
//! use std::path::{Path, PathBuf};
//!
//! let root = Path::new(".");
//! let args = InitArgs {
//!     name: Some("my_model".to_string()),
//!     variant: Some("vanilla".to_string()),
//!     dry_run: true,
//!     ..Default::default()
//! };
//! if let Resolution::Value(options) = initializer::resolve_options(args, &mut StdinPrompter)? {
//!     initializer::run(root, &InitConfig::default(), &options, &GitCli::new(root), false)?;
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::{InitConfig, LayoutSection, PlaceholderSection};
use crate::git::VersionControl;
use crate::prompt::{Prompter, Resolution};
use crate::variant::Variant;

pub use internal::effects::{Effect, Plan, Step};
pub use internal::steps::Identity;

/// Values as supplied on the command line; `None` means "ask"
#[derive(Debug, Clone, Default)]
pub struct InitArgs {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub variant: Option<String>,
    pub remove: Option<bool>,
    pub dry_run: bool,
}

/// Fully resolved options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitOptions {
    pub name: String,
    pub description: String,
    pub author: String,
    pub variant: Variant,
    pub remove_self: bool,
    pub dry_run: bool,
}

/// What a run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Effects applied (or previewed)
    pub actions: usize,
    pub warnings: Vec<String>,
    /// Files whose placeholders were (or would be) substituted, relative to the root
    pub updated_files: Vec<PathBuf>,
    /// Dry-run symlinks removed at the end
    pub preview_links_removed: usize,
    /// Empty when no remote was configured
    pub repository_url: String,
}

/// Validate a supplied project type or prompt until one is chosen
pub fn select_variant(
    supplied: Option<String>,
    prompter: &mut dyn Prompter,
) -> Result<Resolution<Variant>> {
    internal::select_variant(supplied, prompter)
}

/// Check a project name, returning it trimmed
pub fn validate_name(input: &str) -> Result<String> {
    internal::validate_name(input)
}

/// Resolve all options before the first filesystem change
///
/// A value supplied in `args` that fails validation is an error. A missing
/// value is prompted for; the quit token yields `Resolution::Quit`.
pub fn resolve_options(
    args: InitArgs,
    prompter: &mut dyn Prompter,
) -> Result<Resolution<InitOptions>> {
    internal::resolve_options(args, prompter)
}

/// Effects moving staged variant files into the root
pub fn relocate_variant_files(layout: &LayoutSection, variant: Variant) -> Vec<Effect> {
    internal::steps::relocate_variant_files(layout, variant)
}

/// Effects replacing the generic CI workflow with the project one
pub fn swap_ci_workflow(layout: &LayoutSection) -> Vec<Effect> {
    internal::steps::swap_ci_workflow(layout)
}

/// Effects deleting the native-extension extras for variants without them
pub fn prune_variant_extras(layout: &LayoutSection, variant: Variant) -> Vec<Effect> {
    internal::steps::prune_variant_extras(layout, variant)
}

/// Effects renaming the package and substituting placeholders
pub fn apply_name_substitution(
    layout: &LayoutSection,
    placeholders: &PlaceholderSection,
    identity: &Identity<'_>,
) -> Vec<Effect> {
    internal::steps::apply_name_substitution(layout, placeholders, identity)
}

/// Effects deleting the initializer entry point, if requested
pub fn remove_self(layout: &LayoutSection, remove: bool) -> Vec<Effect> {
    internal::steps::remove_self(layout, remove)
}

/// Effect committing the result
pub fn commit(message: &str) -> Vec<Effect> {
    internal::steps::commit(message)
}

/// Build the full ordered plan for a run
pub fn build_plan(config: &InitConfig, options: &InitOptions, repository_url: &str) -> Plan {
    internal::build_plan(config, options, repository_url)
}

/// Execute a run against `root`
///
/// # Process
///
/// 1. **Relocate**: staged variant files replace root copies
/// 2. **Swap CI**: project workflow takes the generic workflow's place
/// 3. **Prune**: native-extension extras go unless the variant is `cpp`
/// 4. **Rename**: package directory, imports, manifests, placeholders
/// 5. **Remove self**: optional
/// 6. **Commit**: apply mode only
/// 7. **Cleanup**: dry-run preview links are removed last
///
/// Missing files are reported as warnings and never stop the run.
pub fn run(
    root: &Path,
    config: &InitConfig,
    options: &InitOptions,
    vcs: &dyn VersionControl,
    verbose: bool,
) -> Result<RunSummary> {
    internal::run(root, config, options, vcs, verbose)
}
