//! Read-only inspection of a template checkout

use serde::Serialize;
use std::path::Path;

use crate::config::InitConfig;
use crate::variant::Variant;

/// Presence of one path the initializer expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathCheck {
    pub path: String,
    /// What the initializer uses the path for
    pub role: &'static str,
    pub present: bool,
}

/// Check every path the initializer will look for under `root`
pub fn check_layout(root: &Path, config: &InitConfig) -> Vec<PathCheck> {
    let layout = &config.layout;
    let mut expected: Vec<(String, &'static str)> = Vec::new();

    for variant in Variant::ALL {
        for file in &layout.placeholder_files {
            expected.push((
                format!("{}/{}/{}", layout.staging_dir, variant, file),
                "staged file",
            ));
        }
    }
    expected.push((layout.generic_workflow.clone(), "generic workflow"));
    expected.push((layout.project_workflow.clone(), "project workflow"));
    expected.push((layout.source_root.clone(), "source root"));
    expected.push((layout.tests_root.clone(), "tests root"));
    for extra in &layout.cpp_extras {
        expected.push((extra.clone(), "cpp extra"));
    }
    for file in &layout.substitution_files {
        if !layout.placeholder_files.contains(file) {
            expected.push((file.clone(), "substitution target"));
        }
    }
    expected.push((layout.initializer.clone(), "initializer"));

    expected
        .into_iter()
        .map(|(path, role)| {
            let present = root.join(&path).exists();
            PathCheck {
                path,
                role,
                present,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_reports_present_and_missing() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("project")).unwrap();
        fs::write(tmp.path().join("initialize.sh"), "").unwrap();

        let checks = check_layout(tmp.path(), &InitConfig::default());
        let find = |p: &str| checks.iter().find(|c| c.path == p).unwrap().present;

        assert!(find("project"));
        assert!(find("initialize.sh"));
        assert!(!find("tests"));
        assert!(!find("project_files/cpp/setup.py"));
    }

    #[test]
    fn test_staged_files_listed_per_variant() {
        let tmp = TempDir::new().unwrap();
        let checks = check_layout(tmp.path(), &InitConfig::default());
        let staged = checks.iter().filter(|c| c.role == "staged file").count();
        assert_eq!(staged, 8);
    }
}
