//! Install and uninstall commands.

use std::path::Path;

use crate::config::Config;
use crate::error::Error;
use crate::hooks::{self, InstallOutcome};

/// Install the pre-commit hook.
pub fn install(repo: Option<&Path>, force: bool) -> Result<(), Error> {
    let repo_root = super::resolve_repo(repo)?;
    let config = Config::load(&repo_root)?;
    let path = config.hook_path(&repo_root);

    match hooks::install_hook(&path, force)? {
        InstallOutcome::Created => println!("Installed pre-commit hook at {}", path.display()),
        InstallOutcome::Appended => {
            println!("Added commit-gate to existing hook at {}", path.display())
        }
        InstallOutcome::Replaced => println!("Reinstalled pre-commit hook at {}", path.display()),
        InstallOutcome::AlreadyInstalled => {
            println!("Pre-commit hook already installed.");
            println!("Run 'commit-gate install --force' to rewrite it.");
        }
    }
    Ok(())
}

/// Remove the pre-commit hook.
pub fn uninstall(repo: Option<&Path>) -> Result<(), Error> {
    let repo_root = super::resolve_repo(repo)?;
    let config = Config::load(&repo_root)?;
    let path = config.hook_path(&repo_root);

    if hooks::uninstall_hook(&path)? {
        println!("Removed commit-gate from {}", path.display());
    } else {
        println!("No commit-gate hook found.");
    }
    Ok(())
}
