//! CLI commands for commit-gate.

pub mod checks;
pub mod hooks;
pub mod run;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::error::Error;

/// commit-gate - run PHP and JavaScript checks before every commit
#[derive(Parser)]
#[command(name = "commit-gate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Repository root (defaults to the nearest directory containing .git)
    #[arg(long, global = true)]
    pub repo: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run all checks and allow or block the commit (called by the hook)
    Run,

    /// Install the pre-commit hook
    Install {
        /// Rewrite the hook even if it is already installed
        #[arg(long, short)]
        force: bool,
    },

    /// Remove the pre-commit hook
    Uninstall,

    /// List the checks and the commands they run
    Checks,
}

/// Resolve the repository root from `--repo` or the current directory.
pub fn resolve_repo(repo: Option<&Path>) -> Result<PathBuf, Error> {
    let start = match repo {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    find_repo_root(&start).ok_or(Error::NotARepository(start))
}

/// Nearest ancestor of `start` (inclusive) that contains `.git`.
fn find_repo_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| crate::hooks::has_git(dir))
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_repo_root_from_subdir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        let sub = dir.path().join("Backend").join("app");
        std::fs::create_dir_all(&sub).unwrap();

        assert_eq!(find_repo_root(&sub), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn test_resolve_repo_outside_git() {
        let dir = TempDir::new().unwrap();
        let err = resolve_repo(Some(dir.path())).unwrap_err();
        assert!(matches!(err, Error::NotARepository(_)));
    }
}
