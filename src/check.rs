//! The six checks, their invocations and how their output is classified.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::process::{strip_ansi, Invocation, ToolOutput};

/// Sub-project a check runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Project {
    Backend,
    Frontend,
}

impl Project {
    pub fn dir(&self, config: &Config, repo_root: &Path) -> PathBuf {
        match self {
            Project::Backend => repo_root.join(&config.backend.dir),
            Project::Frontend => repo_root.join(&config.frontend.dir),
        }
    }
}

/// How a check decides pass/fail from its output.
///
/// Every rule also requires a zero exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classifier {
    /// Fails when the marker appears anywhere in the output.
    FailsOn(&'static str),
    /// Passes only when the marker appears in the output.
    PassesOn(&'static str),
    /// Exit status alone.
    ExitStatus,
}

impl Classifier {
    pub fn passes(&self, output: &ToolOutput) -> bool {
        if !output.success() {
            return false;
        }
        let text = strip_ansi(&output.combined());
        match self {
            Classifier::FailsOn(marker) => !text.contains(marker),
            Classifier::PassesOn(marker) => text.contains(marker),
            Classifier::ExitStatus => true,
        }
    }
}

/// One of the fixed checks, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckKind {
    PhpCsFixer,
    Pint,
    PhpStan,
    EsLint,
    Prettier,
    Build,
}

impl CheckKind {
    /// Run order. Never filtered.
    pub const ALL: [CheckKind; 6] = [
        CheckKind::PhpCsFixer,
        CheckKind::Pint,
        CheckKind::PhpStan,
        CheckKind::EsLint,
        CheckKind::Prettier,
        CheckKind::Build,
    ];

    /// Name shown in banners and the summary table.
    pub fn name(&self) -> &'static str {
        match self {
            CheckKind::PhpCsFixer => "PHP-CS-FIXER",
            CheckKind::Pint => "Pint",
            CheckKind::PhpStan => "PHPStan",
            CheckKind::EsLint => "ESLint",
            CheckKind::Prettier => "Prettier",
            CheckKind::Build => "Build",
        }
    }

    pub fn project(&self) -> Project {
        match self {
            CheckKind::PhpCsFixer | CheckKind::Pint | CheckKind::PhpStan => Project::Backend,
            CheckKind::EsLint | CheckKind::Prettier | CheckKind::Build => Project::Frontend,
        }
    }

    pub fn classifier(&self) -> Classifier {
        match self {
            CheckKind::PhpCsFixer => Classifier::FailsOn("Found"),
            CheckKind::Pint => Classifier::FailsOn("FAIL"),
            CheckKind::PhpStan => Classifier::PassesOn("[OK] No errors"),
            CheckKind::EsLint => Classifier::FailsOn("✖"),
            CheckKind::Prettier => Classifier::ExitStatus,
            CheckKind::Build => Classifier::FailsOn("ERROR"),
        }
    }

    /// Remediation hint for a failing row.
    pub fn suggestion(&self) -> &'static str {
        match self {
            CheckKind::PhpCsFixer => "Review the php-cs-fixer diff and stage the fixed files",
            CheckKind::Pint => "Run `./vendor/bin/pint` in Backend and stage the result",
            CheckKind::PhpStan => "Fix the PHPStan errors reported above",
            CheckKind::EsLint => "Run `npm run lint` in Frontend and fix the reported problems",
            CheckKind::Prettier => "Run `npm run format` in Frontend and check for syntax errors",
            CheckKind::Build => "Fix the build errors reported by `npm run build`",
        }
    }

    /// Resolve the command line for this check.
    pub fn invocation(&self, config: &Config, repo_root: &Path) -> Invocation {
        let cwd = self.project().dir(config, repo_root);
        let backend = &config.backend;
        let frontend = &config.frontend;
        let npm_script = |script: &str| {
            Invocation::new(&frontend.package_manager, cwd.clone()).args(["run", script])
        };

        match self {
            CheckKind::PhpCsFixer => Invocation::new(&backend.php_cs_fixer.program, cwd.clone())
                .args(backend.php_cs_fixer.args.iter().cloned()),
            CheckKind::Pint => Invocation::new(&backend.pint.program, cwd.clone())
                .args(backend.pint.args.iter().cloned()),
            CheckKind::PhpStan => Invocation::new(&backend.phpstan.program, cwd.clone())
                .args(backend.phpstan.args.iter().cloned())
                .arg(format!("--memory-limit={}", backend.phpstan_memory_limit)),
            CheckKind::EsLint => npm_script(&frontend.lint_script),
            CheckKind::Prettier => npm_script(&frontend.format_script),
            CheckKind::Build => npm_script(&frontend.build_script),
        }
    }

    /// Classify a finished invocation.
    pub fn evaluate(&self, output: &ToolOutput) -> CheckResult {
        CheckResult {
            kind: *self,
            raw_output: output.combined(),
            exit_code: output.exit_code,
            passed: self.classifier().passes(output),
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub raw_output: String,
    pub exit_code: Option<i32>,
    pub passed: bool,
}
