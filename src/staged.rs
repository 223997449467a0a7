//! Staged file collection and re-staging.

use std::path::Path;

use tracing::{debug, info};

use crate::config::GitConfig;
use crate::error::Error;
use crate::process::{Invocation, ToolRunner};

const PHP_EXTENSIONS: &[&str] = &["php"];
const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "vue"];

/// Files staged for the commit, split by language. Other files are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagedFileSet {
    pub php: Vec<String>,
    pub javascript: Vec<String>,
}

impl StagedFileSet {
    /// Build from `git diff --name-only -z` output (NUL-separated, unquoted).
    pub fn from_name_list(output: &str) -> Self {
        let mut set = Self::default();
        for line in output.split('\0').filter(|l| !l.is_empty()) {
            let ext = Path::new(line)
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_ascii_lowercase());
            match ext.as_deref() {
                Some(e) if PHP_EXTENSIONS.contains(&e) => set.php.push(line.to_string()),
                Some(e) if JS_EXTENSIONS.contains(&e) => set.javascript.push(line.to_string()),
                _ => {}
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.php.is_empty() && self.javascript.is_empty()
    }

    /// Paths to add back to the index after a successful run.
    pub fn restage_paths(&self) -> Vec<&str> {
        self.php
            .iter()
            .chain(self.javascript.iter())
            .map(String::as_str)
            .collect()
    }
}

/// Read the staged file list (added, copied, modified, renamed).
pub async fn collect<R: ToolRunner>(
    runner: &R,
    git: &GitConfig,
    repo_root: &Path,
) -> Result<StagedFileSet, Error> {
    let inv = Invocation::new(&git.program, repo_root).args([
        "diff",
        "--cached",
        "--name-only",
        "--diff-filter=ACMR",
        "-z",
    ]);
    let output = runner.run(&inv).await?;
    if !output.success() {
        return Err(Error::git("diff --cached", output.stderr.trim()));
    }

    let staged = StagedFileSet::from_name_list(&output.stdout);
    debug!(
        php = staged.php.len(),
        javascript = staged.javascript.len(),
        "Collected staged files"
    );
    Ok(staged)
}

/// Add the staged files back to the index, picking up fixes made by the tools.
pub async fn restage<R: ToolRunner>(
    runner: &R,
    git: &GitConfig,
    repo_root: &Path,
    staged: &StagedFileSet,
) -> Result<(), Error> {
    if staged.is_empty() {
        return Ok(());
    }

    let inv = Invocation::new(&git.program, repo_root)
        .args(["add", "--"])
        .args(staged.restage_paths());
    let output = runner.run(&inv).await?;
    if !output.success() {
        return Err(Error::git("add", output.stderr.trim()));
    }

    info!(files = staged.restage_paths().len(), "Re-staged files");
    Ok(())
}
