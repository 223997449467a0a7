//! Configuration management for commit-gate.
//!
//! Configuration only changes how each check is invoked. The set and order of
//! checks is fixed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;

/// Per-repository config file name, looked up at the repository root.
pub const PROJECT_CONFIG_FILE: &str = ".commit-gate.toml";

/// Gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub frontend: FrontendConfig,

    #[serde(default)]
    pub hooks: HooksConfig,

    #[serde(default)]
    pub git: GitConfig,
}

/// A program and its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandConfig {
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,
}

impl CommandConfig {
    fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// PHP sub-project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Directory relative to the repository root.
    pub dir: PathBuf,
    pub php_cs_fixer: CommandConfig,
    pub pint: CommandConfig,
    pub phpstan: CommandConfig,
    /// Passed to PHPStan as `--memory-limit=<value>`.
    pub phpstan_memory_limit: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Backend"),
            php_cs_fixer: CommandConfig::new("./vendor/bin/php-cs-fixer", &["fix", "app", "--diff"]),
            pint: CommandConfig::new("./vendor/bin/pint", &["--dirty"]),
            phpstan: CommandConfig::new("./vendor/bin/phpstan", &["analyse"]),
            phpstan_memory_limit: "2G".to_string(),
        }
    }
}

/// JavaScript sub-project. Checks run as `<package_manager> run <script>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontendConfig {
    pub dir: PathBuf,
    pub package_manager: String,
    pub lint_script: String,
    pub format_script: String,
    pub build_script: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("Frontend"),
            package_manager: "npm".to_string(),
            lint_script: "lint".to_string(),
            format_script: "format".to_string(),
            build_script: "build".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HooksConfig {
    /// Installed hook, relative to the repository root.
    pub path: PathBuf,
}

impl Default for HooksConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".git/hooks/pre-commit"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    pub program: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
        }
    }
}

impl Config {
    /// Load config for a repository.
    ///
    /// Looks at `<repo>/.commit-gate.toml`, then the global config file, and
    /// falls back to defaults when neither exists.
    pub fn load(repo_root: &Path) -> Result<Self, Error> {
        let project = Self::project_path(repo_root);
        if project.exists() {
            return Self::load_from(&project);
        }
        if let Some(global) = Self::global_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load config from an explicit file.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Path to the per-repository config file.
    pub fn project_path(repo_root: &Path) -> PathBuf {
        repo_root.join(PROJECT_CONFIG_FILE)
    }

    /// Path to the global config file (`<config_dir>/commit-gate/config.toml`).
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("commit-gate").join("config.toml"))
    }

    /// Absolute path of the installed hook.
    pub fn hook_path(&self, repo_root: &Path) -> PathBuf {
        repo_root.join(&self.hooks.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.dir, PathBuf::from("Backend"));
        assert_eq!(config.backend.pint.args, vec!["--dirty"]);
        assert_eq!(config.backend.phpstan_memory_limit, "2G");
        assert_eq!(config.frontend.package_manager, "npm");
        assert_eq!(config.hooks.path, PathBuf::from(".git/hooks/pre-commit"));
        assert_eq!(config.git.program, "git");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            r#"
[backend]
phpstan_memory_limit = "512M"

[frontend]
package_manager = "pnpm"
"#,
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.backend.phpstan_memory_limit, "512M");
        assert_eq!(config.backend.dir, PathBuf::from("Backend"));
        assert_eq!(config.frontend.package_manager, "pnpm");
        assert_eq!(config.frontend.build_script, "build");
    }

    #[test]
    fn test_command_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gate.toml");
        std::fs::write(
            &path,
            r#"
[backend]
pint = { program = "vendor/bin/pint", args = ["--dirty", "-v"] }
"#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.backend.pint.program, "vendor/bin/pint");
        assert_eq!(config.backend.pint.args, vec!["--dirty", "-v"]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(PROJECT_CONFIG_FILE), "[backend\ndir = 1").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_hook_path_is_relative_to_repo() {
        let config = Config::default();
        let hook = config.hook_path(Path::new("/repo"));
        assert_eq!(hook, PathBuf::from("/repo/.git/hooks/pre-commit"));
    }
}
