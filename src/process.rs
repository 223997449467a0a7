//! External process invocation.

use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::LazyLock;

use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use crate::error::Error;

/// CSI and OSC escape sequences emitted by colorizing tools.
static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(\x07|\x1b\\)").unwrap()
});

/// A fully resolved command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl Invocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Captured result of a finished process.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    /// `None` when the process was killed by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout followed by stderr.
    pub fn combined(&self) -> String {
        match (self.stdout.is_empty(), self.stderr.is_empty()) {
            (_, true) => self.stdout.clone(),
            (true, false) => self.stderr.clone(),
            (false, false) => {
                let sep = if self.stdout.ends_with('\n') { "" } else { "\n" };
                format!("{}{}{}", self.stdout, sep, self.stderr)
            }
        }
    }
}

/// Remove terminal escape sequences so markers can be matched literally.
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

/// Runs external processes to completion.
///
/// A non-zero exit status is reported through `ToolOutput`. An `Err` means the
/// process could not be run at all.
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput, Error>;
}

/// Runner backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput, Error> {
        debug!(command = %invocation, cwd = %invocation.cwd.display(), "Spawning");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|source| Error::Spawn {
                program: invocation.program.clone(),
                source,
            })?;

        debug!(command = %invocation, status = ?output.status.code(), "Finished");

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_display() {
        let inv = Invocation::new("npm", "/tmp").arg("run").arg("lint");
        assert_eq!(inv.to_string(), "npm run lint");
    }

    #[test]
    fn test_combined_output() {
        let out = ToolOutput {
            exit_code: Some(0),
            stdout: "line one".to_string(),
            stderr: "warning".to_string(),
        };
        assert_eq!(out.combined(), "line one\nwarning");

        let out = ToolOutput {
            exit_code: Some(0),
            stdout: String::new(),
            stderr: "only stderr".to_string(),
        };
        assert_eq!(out.combined(), "only stderr");
    }

    #[test]
    fn test_signal_is_not_success() {
        let out = ToolOutput {
            exit_code: None,
            ..Default::default()
        };
        assert!(!out.success());
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[31m✖\x1b[0m 3 problems"), "✖ 3 problems");
        assert_eq!(strip_ansi("\x1b[1;32m[OK]\x1b[39;22m No errors"), "[OK] No errors");
        assert_eq!(strip_ansi("plain"), "plain");
    }

    #[tokio::test]
    async fn test_system_runner_captures_status() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new("sh", dir.path()).args(["-c", "echo out; echo err >&2; exit 3"]);

        let out = SystemRunner.run(&inv).await.unwrap();
        assert_eq!(out.exit_code, Some(3));
        assert_eq!(out.stdout, "out\n");
        assert_eq!(out.stderr, "err\n");
    }

    #[tokio::test]
    async fn test_system_runner_missing_program() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new("./definitely-not-here", dir.path());

        let err = SystemRunner.run(&inv).await.unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }
}
