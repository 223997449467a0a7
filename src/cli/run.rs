//! The pre-commit run.

use std::path::Path;

use tracing::debug;

use crate::config::Config;
use crate::error::Error;
use crate::gate::Gate;
use crate::process::SystemRunner;

/// Run the gate and return the process exit code.
pub async fn run(repo: Option<&Path>) -> Result<i32, Error> {
    let repo_root = super::resolve_repo(repo)?;
    let config = Config::load(&repo_root)?;
    debug!(repo = %repo_root.display(), "Running commit gate");

    // The hook execs us, so our own binary is the hook script.
    let gate_exe = std::env::current_exe()?;
    let gate = Gate::new(SystemRunner, config, &repo_root).require(gate_exe);

    let outcome = gate.run().await?;
    Ok(outcome.decision.exit_code())
}
