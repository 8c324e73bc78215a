//! Applies planned effects for real or previews them
//!
//! Dry-run never touches existing files. Where a later step needs to see a
//! moved path, a temporary symlink is created at the destination and
//! recorded; `cleanup` removes them all in reverse order. A destination that
//! already exists can't be linked, so reads of it are redirected to the
//! source through an overlay instead. Paths removed during a preview are
//! tracked so later steps treat them as gone.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::git::VersionControl;
use crate::naming::substitute;
use crate::report::Reporter;

use super::effects::{Effect, Step};

pub struct Executor<'a> {
    root: PathBuf,
    vcs: &'a dyn VersionControl,
    reporter: Reporter,
    symlinks: Vec<PathBuf>,
    /// Dry-run only: destination → the file a real run would put there
    overlay: HashMap<PathBuf, PathBuf>,
    /// Dry-run only: exact paths a real run would have removed or moved away
    vacated: HashSet<PathBuf>,
    /// Dry-run only: canonical roots of removed subtrees
    removed: Vec<PathBuf>,
    /// Files whose content changed (or would change)
    updated: Vec<PathBuf>,
}

impl<'a> Executor<'a> {
    pub fn new(root: &Path, vcs: &'a dyn VersionControl, reporter: Reporter) -> Self {
        Self {
            root: root.to_path_buf(),
            vcs,
            reporter,
            symlinks: Vec::new(),
            overlay: HashMap::new(),
            vacated: HashSet::new(),
            removed: Vec::new(),
            updated: Vec::new(),
        }
    }

    fn dry_run(&self) -> bool {
        self.reporter.is_dry_run()
    }

    /// Hand back the reporter and the updated files, in update order
    pub fn finish(self) -> (Reporter, Vec<PathBuf>) {
        (self.reporter, self.updated)
    }

    pub fn run_step(&mut self, step: &Step) -> Result<()> {
        self.reporter.step(&step.title);
        if step.effects.is_empty() {
            self.reporter.debug("nothing to do");
        }
        for effect in &step.effects {
            self.apply(effect)?;
        }
        Ok(())
    }

    pub fn apply(&mut self, effect: &Effect) -> Result<()> {
        self.reporter.debug(&effect.to_string());
        match effect {
            Effect::Remove { path } => self.remove(path),
            Effect::Move { from, to, replace } => self.relocate(from, to, *replace),
            Effect::Substitute { path, replacements } => {
                let full = self.root.join(path);
                let source = self.resolve(&full)?.filter(|p| p.exists());
                let Some(source) = source else {
                    self.reporter
                        .warn(format!("{} not found, skipping substitution", path.display()));
                    return Ok(());
                };
                self.substitute_file(&source, &full, path, replacements)
            }
            Effect::RewriteTree {
                root,
                extension,
                replacements,
            } => self.rewrite_tree(root, extension, replacements),
            Effect::Commit { message } => self.commit(message),
        }
    }

    /// Where a read of `full` should go, or `None` if the path is absent
    ///
    /// Outside dry-run this is just an existence check.
    fn resolve(&self, full: &Path) -> Result<Option<PathBuf>> {
        if self.vacated.contains(full) {
            return Ok(None);
        }
        if let Some(source) = self.overlay.get(full) {
            return Ok(Some(source.clone()));
        }
        if metadata(full)?.is_none() || self.is_removed(full) {
            return Ok(None);
        }
        Ok(Some(full.to_path_buf()))
    }

    fn is_removed(&self, full: &Path) -> bool {
        if self.removed.is_empty() {
            return false;
        }
        fs::canonicalize(full)
            .map(|canonical| self.removed.iter().any(|r| canonical.starts_with(r)))
            .unwrap_or(false)
    }

    fn remove(&mut self, path: &Path) -> Result<()> {
        let full = self.root.join(path);
        if self.resolve(&full)?.is_none() {
            self.reporter
                .warn(format!("{} not found, nothing to remove", path.display()));
            return Ok(());
        }

        if self.dry_run() {
            if !self.symlinks.contains(&full) {
                if let Ok(canonical) = fs::canonicalize(&full) {
                    self.removed.push(canonical);
                }
            }
            self.overlay.remove(&full);
            self.vacated.insert(full);
            self.reporter
                .action(&format!("would remove {}", path.display()));
            return Ok(());
        }

        let is_dir = metadata(&full)?.is_some_and(|meta| meta.is_dir());
        if is_dir {
            fs::remove_dir_all(&full)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        } else {
            fs::remove_file(&full)
                .with_context(|| format!("Failed to remove {}", path.display()))?;
        }
        self.reporter.action(&format!("removed {}", path.display()));
        Ok(())
    }

    fn relocate(&mut self, from: &Path, to: &Path, replace: bool) -> Result<()> {
        let source = self.root.join(from);
        let dest = self.root.join(to);

        let Some(effective) = self.resolve(&source)? else {
            self.reporter
                .warn(format!("{} not found, skipping", from.display()));
            return Ok(());
        };

        let dest_exists = self.resolve(&dest)?.is_some();
        if dest_exists && !replace {
            self.reporter.warn(format!(
                "{} already exists, not moving {} onto it",
                to.display(),
                from.display()
            ));
            return Ok(());
        }

        if self.dry_run() {
            self.preview_move(&effective, &dest, from, to, dest_exists)?;
            self.overlay.remove(&source);
            self.vacated.insert(source);
            return Ok(());
        }

        if let Some(meta) = metadata(&dest)? {
            let removed = if meta.is_dir() {
                fs::remove_dir_all(&dest)
            } else {
                fs::remove_file(&dest)
            };
            removed.with_context(|| format!("Failed to remove existing {}", to.display()))?;
        }
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::rename(&source, &dest)
            .with_context(|| format!("Failed to move {} → {}", from.display(), to.display()))?;
        self.reporter
            .action(&format!("moved {} → {}", from.display(), to.display()));
        Ok(())
    }

    fn preview_move(
        &mut self,
        effective: &Path,
        dest: &Path,
        from: &Path,
        to: &Path,
        dest_exists: bool,
    ) -> Result<()> {
        self.vacated.remove(dest);
        self.overlay
            .insert(dest.to_path_buf(), effective.to_path_buf());

        let occupied = metadata(dest)?.is_some();
        let parent_exists = dest.parent().map(|p| p.exists()).unwrap_or(false);
        if occupied || !parent_exists {
            let message = if dest_exists {
                format!("would replace {} with {}", to.display(), from.display())
            } else {
                format!("would move {} → {}", from.display(), to.display())
            };
            self.reporter.action(&message);
            return Ok(());
        }

        let target = fs::canonicalize(effective)
            .with_context(|| format!("Failed to resolve {}", from.display()))?;
        symlink(&target, dest)
            .with_context(|| format!("Failed to create preview link {}", to.display()))?;
        self.symlinks.push(dest.to_path_buf());
        self.reporter.action(&format!(
            "would move {} → {} (linked for preview)",
            from.display(),
            to.display()
        ));
        Ok(())
    }

    /// Substitute in the text read from `source`, writing the result to `dest`
    fn substitute_file(
        &mut self,
        source: &Path,
        dest: &Path,
        display: &Path,
        replacements: &[(String, String)],
    ) -> Result<()> {
        let content = match fs::read_to_string(source) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                self.reporter
                    .warn(format!("{} is not UTF-8 text, skipping", display.display()));
                return Ok(());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", display.display()))
            }
        };

        let (updated, total) = substitute(&content, replacements);
        if total == 0 {
            self.reporter
                .debug(&format!("no placeholders in {}", display.display()));
            return Ok(());
        }
        self.updated.push(display.to_path_buf());

        if self.dry_run() {
            self.reporter.action(&format!(
                "would update {} ({} replacement(s))",
                display.display(),
                total
            ));
            return Ok(());
        }

        fs::write(dest, updated)
            .with_context(|| format!("Failed to write {}", display.display()))?;
        self.reporter.action(&format!(
            "updated {} ({} replacement(s))",
            display.display(),
            total
        ));
        Ok(())
    }

    fn rewrite_tree(
        &mut self,
        tree: &Path,
        extension: &str,
        replacements: &[(String, String)],
    ) -> Result<()> {
        let full_root = self.root.join(tree);
        let walk_root = self.resolve(&full_root)?.filter(|p| p.is_dir());
        let Some(walk_root) = walk_root else {
            self.reporter
                .warn(format!("{} not found, skipping import rewrite", tree.display()));
            return Ok(());
        };

        let mut files: Vec<PathBuf> = WalkDir::new(&walk_root)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|ext| ext.to_str()) == Some(extension))
            .filter(|p| !self.is_removed(p))
            .collect();
        files.sort();

        for file in files {
            let relative = file
                .strip_prefix(&walk_root)
                .unwrap_or(file.as_path())
                .to_path_buf();
            let dest = full_root.join(&relative);
            let display = tree.join(&relative);
            self.substitute_file(&file, &dest, &display, replacements)?;
        }
        Ok(())
    }

    fn commit(&mut self, message: &str) -> Result<()> {
        if self.dry_run() {
            self.reporter
                .action(&format!("would commit all changes: \"{message}\""));
            return Ok(());
        }
        match self.vcs.commit_all(message) {
            Ok(()) => self.reporter.action(&format!("committed \"{message}\"")),
            Err(e) => self.reporter.warn(format!("Commit failed: {e}")),
        }
        Ok(())
    }

    /// Remove dry-run preview links, newest first
    pub fn cleanup(&mut self) -> Result<usize> {
        let mut removed = 0;
        while let Some(link) = self.symlinks.pop() {
            match fs::remove_file(&link) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e)
                        .with_context(|| format!("Failed to remove preview link {}", link.display()))
                }
            }
        }
        if removed > 0 {
            self.reporter
                .debug(&format!("removed {removed} preview link(s)"));
        }
        Ok(removed)
    }
}

/// Metadata without following symlinks; `None` when the path is absent
fn metadata(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::symlink_metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", path.display())),
    }
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    if target.is_dir() {
        std::os::windows::fs::symlink_dir(target, link)
    } else {
        std::os::windows::fs::symlink_file(target, link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct NullVcs;

    impl VersionControl for NullVcs {
        fn remote_url(&self, _remote: &str) -> Result<String> {
            anyhow::bail!("no remote")
        }

        fn commit_all(&self, _message: &str) -> Result<()> {
            anyhow::bail!("not a repository")
        }
    }

    fn executor<'a>(root: &Path, vcs: &'a NullVcs, dry_run: bool) -> Executor<'a> {
        Executor::new(root, vcs, Reporter::new(dry_run, false))
    }

    #[test]
    fn test_missing_source_is_warning() {
        let tmp = TempDir::new().unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, false);

        exec.apply(&Effect::Move {
            from: "missing.txt".into(),
            to: "dest.txt".into(),
            replace: true,
        })
        .unwrap();

        assert_eq!(exec.finish().0.warnings().len(), 1);
        assert!(!tmp.path().join("dest.txt").exists());
    }

    #[test]
    fn test_move_replaces_existing_file() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("staging")).unwrap();
        fs::write(tmp.path().join("staging/README.md"), "staged").unwrap();
        fs::write(tmp.path().join("README.md"), "root").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, false);

        exec.apply(&Effect::Move {
            from: "staging/README.md".into(),
            to: "README.md".into(),
            replace: true,
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("README.md")).unwrap(),
            "staged"
        );
        assert!(!tmp.path().join("staging/README.md").exists());
    }

    #[test]
    fn test_move_without_replace_keeps_destination() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("project")).unwrap();
        fs::create_dir_all(tmp.path().join("foo")).unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, false);

        exec.apply(&Effect::Move {
            from: "project".into(),
            to: "foo".into(),
            replace: false,
        })
        .unwrap();

        assert!(tmp.path().join("project").exists());
        assert_eq!(exec.finish().0.warnings().len(), 1);
    }

    #[test]
    fn test_dry_run_move_links_and_cleans_up() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("project")).unwrap();
        fs::write(tmp.path().join("project/model.py"), "import project\n").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, true);

        exec.apply(&Effect::Move {
            from: "project".into(),
            to: "foo".into(),
            replace: false,
        })
        .unwrap();
        assert!(tmp.path().join("foo/model.py").exists());
        assert!(tmp.path().join("project/model.py").exists());
        assert!(fs::symlink_metadata(tmp.path().join("foo"))
            .unwrap()
            .file_type()
            .is_symlink());

        assert_eq!(exec.cleanup().unwrap(), 1);
        assert!(fs::symlink_metadata(tmp.path().join("foo")).is_err());
        assert!(tmp.path().join("project/model.py").exists());
    }

    #[test]
    fn test_dry_run_remove_keeps_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("initialize.sh"), "#!/bin/sh\n").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, true);

        exec.apply(&Effect::Remove {
            path: "initialize.sh".into(),
        })
        .unwrap();

        assert!(tmp.path().join("initialize.sh").exists());
        assert_eq!(exec.finish().0.actions(), 1);
    }

    #[test]
    fn test_remove_directory() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("project/cpp/src")).unwrap();
        fs::write(tmp.path().join("project/cpp/src/ops.cpp"), "").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, false);

        exec.apply(&Effect::Remove {
            path: "project/cpp".into(),
        })
        .unwrap();

        assert!(!tmp.path().join("project/cpp").exists());
        assert!(tmp.path().join("project").exists());
    }

    #[test]
    fn test_substitute_dry_run_leaves_content() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("setup.py"), "name=\"ml-project\"\n").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, true);

        exec.apply(&Effect::Substitute {
            path: "setup.py".into(),
            replacements: vec![("ml-project".into(), "foo".into())],
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("setup.py")).unwrap(),
            "name=\"ml-project\"\n"
        );
    }

    #[test]
    fn test_rewrite_tree_only_touches_extension() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("tests/nested")).unwrap();
        fs::write(tmp.path().join("tests/nested/test_a.py"), "from project import a\n").unwrap();
        fs::write(tmp.path().join("tests/notes.txt"), "from project import a\n").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, false);

        exec.apply(&Effect::RewriteTree {
            root: "tests".into(),
            extension: "py".into(),
            replacements: vec![("from project".into(), "from foo".into())],
        })
        .unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("tests/nested/test_a.py")).unwrap(),
            "from foo import a\n"
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("tests/notes.txt")).unwrap(),
            "from project import a\n"
        );
    }

    #[test]
    fn test_commit_failure_is_warning() {
        let tmp = TempDir::new().unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, false);

        exec.apply(&Effect::Commit {
            message: "Initialize project".into(),
        })
        .unwrap();

        assert_eq!(exec.finish().0.warnings().len(), 1);
    }

    #[test]
    fn test_dry_run_replaced_file_reads_staged_copy() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("staging")).unwrap();
        fs::write(tmp.path().join("staging/README.md"), "# ml-project\n").unwrap();
        fs::write(tmp.path().join("README.md"), "# Template README\n").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, true);

        exec.apply(&Effect::Move {
            from: "staging/README.md".into(),
            to: "README.md".into(),
            replace: true,
        })
        .unwrap();
        exec.apply(&Effect::Substitute {
            path: "README.md".into(),
            replacements: vec![("ml-project".into(), "foo".into())],
        })
        .unwrap();

        let (_, updated) = exec.finish();
        assert_eq!(updated, [PathBuf::from("README.md")]);
        assert_eq!(
            fs::read_to_string(tmp.path().join("README.md")).unwrap(),
            "# Template README\n"
        );
    }

    #[test]
    fn test_dry_run_removed_files_are_skipped_later() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("tests")).unwrap();
        fs::write(tmp.path().join("tests/test_a.py"), "import project\n").unwrap();
        fs::write(tmp.path().join("tests/test_cpp.py"), "import project\n").unwrap();
        let vcs = NullVcs;
        let mut exec = executor(tmp.path(), &vcs, true);

        exec.apply(&Effect::Remove {
            path: "tests/test_cpp.py".into(),
        })
        .unwrap();
        exec.apply(&Effect::RewriteTree {
            root: "tests".into(),
            extension: "py".into(),
            replacements: vec![("import project".into(), "import foo".into())],
        })
        .unwrap();

        let (_, updated) = exec.finish();
        assert_eq!(updated, [PathBuf::from("tests/test_a.py")]);
        assert!(tmp.path().join("tests/test_cpp.py").exists());
    }
}
