//! Test doubles.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::Error;
use crate::process::{Invocation, ToolOutput, ToolRunner};

/// Runner that answers from a table and records every invocation.
///
/// Unknown commands succeed with clean output; PHPStan gets its OK marker so
/// the default run passes.
#[derive(Default)]
pub struct FakeRunner {
    responses: HashMap<String, ToolOutput>,
    missing: Vec<String>,
    calls: Mutex<Vec<Invocation>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` (as displayed, e.g. `npm run build`) with this output.
    pub fn respond(mut self, command: &str, exit_code: i32, stdout: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            ToolOutput {
                exit_code: Some(exit_code),
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Answer `command` as a process killed by a signal (no exit code).
    pub fn killed(mut self, command: &str, stdout: &str) -> Self {
        self.responses.insert(
            command.to_string(),
            ToolOutput {
                exit_code: None,
                stdout: stdout.to_string(),
                stderr: String::new(),
            },
        );
        self
    }

    /// Make `program` fail to spawn.
    pub fn missing(mut self, program: &str) -> Self {
        self.missing.push(program.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Invocation> {
        self.calls.lock().unwrap().clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.calls().iter().map(|c| c.to_string()).collect()
    }
}

impl ToolRunner for FakeRunner {
    async fn run(&self, invocation: &Invocation) -> Result<ToolOutput, Error> {
        self.calls.lock().unwrap().push(invocation.clone());

        if self.missing.contains(&invocation.program) {
            return Err(Error::Spawn {
                program: invocation.program.clone(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }

        let command = invocation.to_string();
        if let Some(output) = self.responses.get(&command) {
            return Ok(output.clone());
        }

        let stdout = if invocation.program.ends_with("phpstan") {
            "[OK] No errors"
        } else if invocation.program == "git" {
            ""
        } else {
            "no issues"
        };
        Ok(ToolOutput {
            exit_code: Some(0),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }
}
