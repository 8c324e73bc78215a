//! Config module - Template layout and placeholder configuration
//!
//! Describes where the template keeps its staged files, workflows and
//! source roots, and which placeholder strings get substituted during
//! initialization. Every field has a default matching the stock template,
//! so a missing `starter.toml` is not an error.
//!
//! # Example
//!
//! ```no_run
//! use starter::config;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = config::load(root)?;
//! println!("Staging dir: {}", config.layout.staging_dir);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod internal;

use anyhow::Result;
use std::path::{Path, PathBuf};

pub use internal::{InitConfig, LayoutSection, PlaceholderSection, VcsSection};

/// Name of the optional config file at the template root
pub const CONFIG_FILE: &str = "starter.toml";

/// Load config from `<root>/starter.toml`
///
/// Returns the default config if the file doesn't exist.
pub fn load(root: &Path) -> Result<InitConfig> {
    internal::load(&config_path(root))
}

/// Load config from an explicit path; the file must exist
pub fn load_from(path: &Path) -> Result<InitConfig> {
    internal::load_required(path)
}

/// Path of the config file for a template root
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
