//! Filesystem effects planned by each initializer step
//!
//! Effects only describe intent. Paths are relative to the template root
//! and nothing is checked for existence until execution.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Delete a file, symlink or whole directory
    Remove { path: PathBuf },
    /// Rename `from` to `to`; `replace` allows clobbering an existing `to`
    Move {
        from: PathBuf,
        to: PathBuf,
        replace: bool,
    },
    /// Plain-text replacements in one file, applied in order
    Substitute {
        path: PathBuf,
        replacements: Vec<(String, String)>,
    },
    /// Plain-text replacements in every `*.extension` file below `root`
    RewriteTree {
        root: PathBuf,
        extension: String,
        replacements: Vec<(String, String)>,
    },
    /// Stage everything and commit
    Commit { message: String },
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Effect::Remove { path } => write!(f, "remove {}", path.display()),
            Effect::Move { from, to, replace } => {
                write!(f, "move {} → {}", from.display(), to.display())?;
                if *replace {
                    write!(f, " (replacing)")?;
                }
                Ok(())
            }
            Effect::Substitute { path, replacements } => write!(
                f,
                "substitute {} placeholder(s) in {}",
                replacements.len(),
                path.display()
            ),
            Effect::RewriteTree {
                root,
                extension,
                replacements,
            } => write!(
                f,
                "rewrite {} pattern(s) in {}/**/*.{}",
                replacements.len(),
                root.display(),
                extension
            ),
            Effect::Commit { message } => write!(f, "commit \"{message}\""),
        }
    }
}

/// One named step of the initializer and the effects it wants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub title: String,
    pub effects: Vec<Effect>,
}

impl Step {
    pub fn new(title: impl Into<String>, effects: Vec<Effect>) -> Self {
        Self {
            title: title.into(),
            effects,
        }
    }
}

/// Every step of a run, in execution order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Plan {
    pub steps: Vec<Step>,
}

impl Plan {
    /// Human-readable listing, one line per effect
    pub fn describe(&self) -> Vec<String> {
        self.steps
            .iter()
            .flat_map(|step| {
                step.effects
                    .iter()
                    .map(move |effect| format!("{}: {}", step.title, effect))
            })
            .collect()
    }
}
