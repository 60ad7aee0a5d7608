//! Git working tree safety checks
//!
//! Conversion deletes files, so it only runs inside a repository whose working
//! tree has nothing uncommitted. The status query sits behind
//! [`WorkingTreeStatus`] so the guard can run without a real `git` binary.

use crate::error::{ConvertError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Source of porcelain status output for a repository root
pub trait WorkingTreeStatus {
    /// Return the raw `--porcelain=v1` output for the repository at `root`
    fn porcelain_status(&self, root: &Path) -> Result<String>;
}

/// Status provider that shells out to the `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkingTreeStatus for GitCli {
    fn porcelain_status(&self, root: &Path) -> Result<String> {
        log::debug!("Running {} status --porcelain=v1 in {}", self.program, root.display());

        let output = Command::new(&self.program)
            .args(["status", "--porcelain=v1"])
            .current_dir(root)
            .output()
            .map_err(|e| ConvertError::status_command(root, format!("failed to execute: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ConvertError::status_command(
                root,
                format!("{} ({})", stderr.trim(), output.status),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Find the nearest ancestor of `dir` (itself included) holding a `.git` directory
///
/// The walk gives up on reaching the filesystem root; `/` itself is never checked.
pub fn find_repository_root(dir: &Path) -> Result<PathBuf> {
    dir.ancestors()
        .take_while(|candidate| candidate.parent().is_some())
        .find(|candidate| candidate.join(".git").is_dir())
        .map(Path::to_path_buf)
        .ok_or(ConvertError::NotInRepository)
}

/// Whether the repository at `root` has no pending changes
pub fn is_working_tree_clean(root: &Path, status: &dyn WorkingTreeStatus) -> Result<bool> {
    Ok(status.porcelain_status(root)?.is_empty())
}

/// Fail unless `dir` lives in a repository with a clean working tree
///
/// Returns the repository root on success.
pub fn ensure_clean_repository(dir: &Path, status: &dyn WorkingTreeStatus) -> Result<PathBuf> {
    let root = find_repository_root(dir)?;
    log::info!("Found Git repository at {}", root.display());

    if !is_working_tree_clean(&root, status)? {
        return Err(ConvertError::DirtyWorkingTree);
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    struct FakeStatus {
        output: String,
        queried: RefCell<Vec<PathBuf>>,
    }

    impl FakeStatus {
        fn new(output: &str) -> Self {
            Self {
                output: output.to_string(),
                queried: RefCell::new(Vec::new()),
            }
        }
    }

    impl WorkingTreeStatus for FakeStatus {
        fn porcelain_status(&self, root: &Path) -> Result<String> {
            self.queried.borrow_mut().push(root.to_path_buf());
            Ok(self.output.clone())
        }
    }

    struct FailingStatus;

    impl WorkingTreeStatus for FailingStatus {
        fn porcelain_status(&self, root: &Path) -> Result<String> {
            Err(ConvertError::status_command(root, "fatal: not a git repository"))
        }
    }

    fn repo_with_nested_dir() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".git")).unwrap();
        let nested = temp.path().join("db").join("migrations");
        fs::create_dir_all(&nested).unwrap();
        (temp, nested)
    }

    #[test]
    fn test_finds_root_from_nested_directory() {
        let (temp, nested) = repo_with_nested_dir();
        assert_eq!(find_repository_root(&nested).unwrap(), temp.path());
    }

    #[test]
    fn test_directory_itself_can_be_root() {
        let (temp, _) = repo_with_nested_dir();
        assert_eq!(find_repository_root(temp.path()).unwrap(), temp.path());
    }

    #[test]
    fn test_git_file_is_not_a_root_marker() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".git"), "gitdir: elsewhere").unwrap();
        // The temp dir itself may sit inside a checkout, so only the marker file is checked
        let found = find_repository_root(temp.path()).ok();
        assert_ne!(found.as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_filesystem_root_is_never_a_repository() {
        let err = find_repository_root(Path::new("/")).unwrap_err();
        assert!(matches!(err, ConvertError::NotInRepository));
    }

    #[test]
    fn test_walk_without_marker_is_not_in_repository() {
        // Relative ancestors stop before the working directory
        let err = find_repository_root(Path::new("no-such-dir/db/migrations")).unwrap_err();
        assert!(matches!(err, ConvertError::NotInRepository));
        assert!(err.to_string().contains("not inside a Git repository"));
    }

    #[test]
    fn test_empty_status_is_clean() {
        let (temp, nested) = repo_with_nested_dir();
        let status = FakeStatus::new("");

        let root = ensure_clean_repository(&nested, &status).unwrap();
        assert_eq!(root, temp.path());
        assert_eq!(status.queried.borrow().as_slice(), &[temp.path().to_path_buf()]);
    }

    #[test]
    fn test_any_status_output_is_dirty() {
        let (_temp, nested) = repo_with_nested_dir();
        let status = FakeStatus::new("?? db/migrations/new.up.sql\n");

        let err = ensure_clean_repository(&nested, &status).unwrap_err();
        assert!(matches!(err, ConvertError::DirtyWorkingTree));
    }

    #[test]
    fn test_status_failure_propagates() {
        let (_temp, nested) = repo_with_nested_dir();

        let err = ensure_clean_repository(&nested, &FailingStatus).unwrap_err();
        assert!(matches!(err, ConvertError::StatusCommand { .. }));
    }

    #[test]
    fn test_missing_git_binary_is_an_error() {
        let temp = TempDir::new().unwrap();
        let git = GitCli {
            program: "definitely-not-a-git-binary".to_string(),
        };

        let err = git.porcelain_status(temp.path()).unwrap_err();
        assert!(err.to_string().contains("failed to execute"));
    }
}
