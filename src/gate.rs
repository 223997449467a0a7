//! The commit gate: preconditions, the six checks, the decision.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::check::{CheckKind, CheckResult};
use crate::config::Config;
use crate::error::Error;
use crate::hooks;
use crate::process::ToolRunner;
use crate::report;
use crate::staged::{self, StagedFileSet};

/// Allow or block the commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Block,
}

impl Decision {
    pub fn exit_code(&self) -> i32 {
        match self {
            Decision::Allow => 0,
            Decision::Block => 1,
        }
    }
}

/// Everything a finished run produced.
#[derive(Debug)]
pub struct GateOutcome {
    /// One result per check, in run order.
    pub results: Vec<CheckResult>,
    pub staged: StagedFileSet,
    pub decision: Decision,
}

impl GateOutcome {
    pub fn failed_checks(&self) -> Vec<CheckKind> {
        self.results
            .iter()
            .filter(|r| !r.passed)
            .map(|r| r.kind)
            .collect()
    }
}

/// Runs the fixed check sequence against a repository.
pub struct Gate<R> {
    runner: R,
    config: Config,
    repo_root: PathBuf,
    required_files: Vec<PathBuf>,
}

impl<R: ToolRunner> Gate<R> {
    /// Create a gate. The installed hook is always a required file.
    pub fn new(runner: R, config: Config, repo_root: impl Into<PathBuf>) -> Self {
        let repo_root = repo_root.into();
        let required_files = vec![config.hook_path(&repo_root)];
        Self {
            runner,
            config,
            repo_root,
            required_files,
        }
    }

    /// Add a file that must exist (and is made executable) before any check runs.
    pub fn require(mut self, path: impl Into<PathBuf>) -> Self {
        self.required_files.insert(0, path.into());
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Run every check and decide.
    ///
    /// Check failures never stop the run. An `Err` means a precondition,
    /// git, or process-start failure, and the commit must be blocked.
    pub async fn run(&self) -> Result<GateOutcome, Error> {
        for path in &self.required_files {
            hooks::ensure_executable(path)?;
        }

        let staged = staged::collect(&self.runner, &self.config.git, &self.repo_root).await?;

        let mut all_passed = true;
        let mut results = Vec::with_capacity(CheckKind::ALL.len());

        for (index, kind) in CheckKind::ALL.iter().enumerate() {
            let invocation = kind.invocation(&self.config, &self.repo_root);
            report::print_step(index, *kind, &invocation);

            let output = self.runner.run(&invocation).await?;
            let result = kind.evaluate(&output);
            report::print_check_output(&result);

            if result.passed {
                info!(check = %kind, "Check passed");
            } else {
                warn!(check = %kind, exit_code = ?result.exit_code, "Check failed");
                all_passed = false;
            }
            results.push(result);
        }

        report::print_summary(&results);

        let decision = if all_passed {
            staged::restage(&self.runner, &self.config.git, &self.repo_root, &staged).await?;
            Decision::Allow
        } else {
            Decision::Block
        };
        report::print_verdict(all_passed);

        Ok(GateOutcome {
            results,
            staged,
            decision,
        })
    }
}
