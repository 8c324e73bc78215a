//! Internal implementation for config module

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

// =============================================================================
// Config Types
// =============================================================================

/// Initializer configuration stored in starter.toml
/// All sections are optional and fall back to the stock template layout
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InitConfig {
    #[serde(default)]
    pub layout: LayoutSection,
    #[serde(default)]
    pub placeholders: PlaceholderSection,
    #[serde(default)]
    pub vcs: VcsSection,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LayoutSection {
    /// Directory holding one subdirectory per variant
    #[serde(default = "default_staging_dir")]
    pub staging_dir: String,
    /// Files moved from `<staging_dir>/<variant>/` into the root
    #[serde(default = "default_placeholder_files")]
    pub placeholder_files: Vec<String>,
    /// Workflow deleted during the swap
    #[serde(default = "default_generic_workflow")]
    pub generic_workflow: String,
    /// Workflow renamed onto the generic workflow's path
    #[serde(default = "default_project_workflow")]
    pub project_workflow: String,
    /// Generically-named package directory
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default = "default_tests_root")]
    pub tests_root: String,
    /// Paths only the cpp variant keeps
    #[serde(default = "default_cpp_extras")]
    pub cpp_extras: Vec<String>,
    /// Manifests moved into the renamed package directory
    #[serde(default = "default_manifests")]
    pub manifests: Vec<String>,
    /// Files receiving description/author/url/name substitution
    #[serde(default = "default_substitution_files")]
    pub substitution_files: Vec<String>,
    /// Extension of files whose imports get rewritten
    #[serde(default = "default_source_extension")]
    pub source_extension: String,
    /// Initializer entry point, relative to the root
    #[serde(default = "default_initializer")]
    pub initializer: String,
}

fn default_staging_dir() -> String {
    "project_files".to_string()
}
fn default_placeholder_files() -> Vec<String> {
    ["setup.py", "requirements.txt", "requirements-dev.txt", "README.md"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
fn default_generic_workflow() -> String {
    ".github/workflows/ci.yml".to_string()
}
fn default_project_workflow() -> String {
    ".github/workflows/ci_project.yml".to_string()
}
fn default_source_root() -> String {
    "project".to_string()
}
fn default_tests_root() -> String {
    "tests".to_string()
}
fn default_cpp_extras() -> Vec<String> {
    vec![
        "project/cpp".to_string(),
        "tests/test_cpp_extension.py".to_string(),
    ]
}
fn default_manifests() -> Vec<String> {
    vec![
        "requirements.txt".to_string(),
        "requirements-dev.txt".to_string(),
    ]
}
fn default_substitution_files() -> Vec<String> {
    vec![
        "setup.py".to_string(),
        "README.md".to_string(),
        "pyproject.toml".to_string(),
    ]
}
fn default_source_extension() -> String {
    "py".to_string()
}
fn default_initializer() -> String {
    "initialize.sh".to_string()
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            staging_dir: default_staging_dir(),
            placeholder_files: default_placeholder_files(),
            generic_workflow: default_generic_workflow(),
            project_workflow: default_project_workflow(),
            source_root: default_source_root(),
            tests_root: default_tests_root(),
            cpp_extras: default_cpp_extras(),
            manifests: default_manifests(),
            substitution_files: default_substitution_files(),
            source_extension: default_source_extension(),
            initializer: default_initializer(),
        }
    }
}

/// Literal strings the template ships with
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlaceholderSection {
    /// Distribution name in setup.py and the README
    #[serde(default = "default_name")]
    pub name: String,
    /// Every description the template ships (root and staged copies differ)
    #[serde(default = "default_descriptions")]
    pub descriptions: Vec<String>,
    #[serde(default = "default_author")]
    pub author: String,
    /// Every repository URL the template ships
    #[serde(default = "default_urls")]
    pub urls: Vec<String>,
    /// Import name of the source root
    #[serde(default = "default_package")]
    pub package: String,
}

fn default_name() -> String {
    "ml-project".to_string()
}
fn default_descriptions() -> Vec<String> {
    vec![
        "Empty template repository for ML projects".to_string(),
        "Template repository for ML projects".to_string(),
    ]
}
fn default_author() -> String {
    "Benjamin Bolte".to_string()
}
fn default_urls() -> Vec<String> {
    vec![
        "https://github.com/codekansas/ml-starter".to_string(),
        "https://github.com/codekansas/ml-project-template".to_string(),
    ]
}
fn default_package() -> String {
    "project".to_string()
}

impl Default for PlaceholderSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            descriptions: default_descriptions(),
            author: default_author(),
            urls: default_urls(),
            package: default_package(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VcsSection {
    /// Remote whose URL replaces the template URL
    #[serde(default = "default_remote")]
    pub remote: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

fn default_remote() -> String {
    "origin".to_string()
}
fn default_commit_message() -> String {
    "Initialize project".to_string()
}

impl Default for VcsSection {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            commit_message: default_commit_message(),
        }
    }
}

// =============================================================================
// Load
// =============================================================================

pub fn load(path: &Path) -> Result<InitConfig> {
    if !path.exists() {
        return Ok(InitConfig::default());
    }
    load_required(path)
}

pub fn load_required(path: &Path) -> Result<InitConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = InitConfig::default();
        assert_eq!(config.layout.staging_dir, "project_files");
        assert_eq!(config.layout.source_root, "project");
        assert_eq!(config.layout.placeholder_files.len(), 4);
        assert_eq!(config.placeholders.package, "project");
        assert_eq!(config.vcs.commit_message, "Initialize project");
    }

    #[test]
    fn test_missing_file_yields_default() {
        let tmp = TempDir::new().unwrap();
        let config = load(&tmp.path().join("starter.toml")).unwrap();
        assert_eq!(config, InitConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("starter.toml");
        fs::write(
            &path,
            r#"
[layout]
staging_dir = "variants"

[placeholders]
author = "Template Author"
descriptions = ["My template"]
"#,
        )
        .unwrap();

        let config = load(&path).unwrap();
        assert_eq!(config.layout.staging_dir, "variants");
        assert_eq!(config.layout.source_root, "project");
        assert_eq!(config.placeholders.author, "Template Author");
        assert_eq!(config.placeholders.descriptions, ["My template"]);
        assert_eq!(config.placeholders.name, "ml-project");
        assert_eq!(config.placeholders.urls.len(), 2);
        assert_eq!(config.vcs.remote, "origin");
    }

    #[test]
    fn test_load_required_missing_file_errors() {
        let tmp = TempDir::new().unwrap();
        assert!(load_required(&tmp.path().join("nope.toml")).is_err());
    }

    #[test]
    fn test_invalid_toml_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("starter.toml");
        fs::write(&path, "[layout\nstaging_dir = 1").unwrap();
        assert!(load(&path).is_err());
    }
}
