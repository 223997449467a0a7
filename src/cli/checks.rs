//! List the checks.

use std::path::Path;

use crate::check::CheckKind;
use crate::config::Config;
use crate::error::Error;

/// Print each check with its working directory and command line.
pub fn list(repo: Option<&Path>) -> Result<(), Error> {
    let repo_root = super::resolve_repo(repo)?;
    let config = Config::load(&repo_root)?;

    for (index, kind) in CheckKind::ALL.iter().enumerate() {
        let invocation = kind.invocation(&config, &repo_root);
        let dir = invocation
            .cwd
            .strip_prefix(&repo_root)
            .unwrap_or(&invocation.cwd);
        println!(
            "{}. {:<13} {:<10} {}",
            index + 1,
            kind.name(),
            dir.display(),
            invocation
        );
    }
    Ok(())
}
