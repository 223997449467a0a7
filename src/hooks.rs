//! Git hook installation and the executable-file preconditions.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tracing::info;

use crate::error::Error;

/// Line that runs the gate; its presence means our hook is installed.
const GATE_COMMAND: &str = "commit-gate run || exit 1";

/// Our section of the hook, without the shebang.
const GATE_SECTION: &str = r#"# commit-gate pre-commit checks (auto-installed)
# Blocks the commit unless every check passes

commit-gate run || exit 1
"#;

const SHEBANG: &str = "#!/bin/sh";

/// What `install_hook` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Created,
    Appended,
    Replaced,
    AlreadyInstalled,
}

/// Check if git is initialized in the project.
pub fn has_git(repo_root: &Path) -> bool {
    repo_root.join(".git").exists()
}

/// Check if our hook is present at `path`.
pub fn hook_installed(path: &Path) -> bool {
    fs::read_to_string(path)
        .map(|content| has_gate_section(&content))
        .unwrap_or(false)
}

/// Install the pre-commit hook, preserving a foreign hook already there.
pub fn install_hook(path: &Path, force: bool) -> Result<InstallOutcome, Error> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let (content, outcome) = if path.exists() {
        let existing = fs::read_to_string(path)?;
        if has_gate_section(&existing) {
            if !force {
                return Ok(InstallOutcome::AlreadyInstalled);
            }
            let others = remove_gate_section(&existing);
            if is_blank_hook(&others) {
                (fresh_hook(), InstallOutcome::Replaced)
            } else {
                (append_section(&others), InstallOutcome::Replaced)
            }
        } else {
            (append_section(&existing), InstallOutcome::Appended)
        }
    } else {
        (fresh_hook(), InstallOutcome::Created)
    };

    fs::write(path, &content)?;
    set_executable(path)?;
    info!(path = %path.display(), outcome = ?outcome, "Installed pre-commit hook");

    Ok(outcome)
}

/// Remove our section from the hook. Returns whether anything was removed.
pub fn uninstall_hook(path: &Path) -> Result<bool, Error> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    if !has_gate_section(&content) {
        return Ok(false);
    }

    let cleaned = remove_gate_section(&content);
    if is_blank_hook(&cleaned) {
        fs::remove_file(path)?;
    } else {
        fs::write(path, format!("{}\n", cleaned.trim_end()))?;
    }
    info!(path = %path.display(), "Removed pre-commit hook");

    Ok(true)
}

/// Require `path` to exist and make it executable if it is not.
pub fn ensure_executable(path: &Path) -> Result<(), Error> {
    if !path.exists() {
        return Err(Error::PreconditionMissing(path.to_path_buf()));
    }

    let mode = fs::metadata(path)?.permissions().mode();
    if mode & 0o111 == 0 {
        set_executable(path)?;
        info!(path = %path.display(), "Made file executable");
    }
    Ok(())
}

fn set_executable(path: &Path) -> Result<(), Error> {
    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

fn fresh_hook() -> String {
    format!("{}\n{}", SHEBANG, GATE_SECTION)
}

fn has_gate_section(content: &str) -> bool {
    content.lines().any(|line| line.trim() == GATE_COMMAND)
}

fn append_section(existing: &str) -> String {
    format!("{}\n\n{}", existing.trim_end(), GATE_SECTION)
}

fn is_blank_hook(content: &str) -> bool {
    let trimmed = content.trim();
    trimmed.is_empty() || trimmed == SHEBANG
}

/// Remove our section from hook content, along with the blank line
/// `append_section` put before it.
fn remove_gate_section(content: &str) -> String {
    let section = GATE_SECTION.trim_end();
    if let Some(start) = content.find(section) {
        let before = content[..start].trim_end();
        let after = content[start + section.len()..].trim_start_matches('\n');
        return if after.is_empty() {
            format!("{}\n", before)
        } else {
            format!("{}\n\n{}", before, after)
        };
    }

    // Section was edited by hand: drop only our own lines.
    let ours: Vec<&str> = section.lines().filter(|l| !l.is_empty()).collect();
    content
        .lines()
        .filter(|line| !ours.contains(&line.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}
