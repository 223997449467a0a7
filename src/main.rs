//! commit-gate - pre-commit checks for PHP and JavaScript projects.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commit_gate::cli::{self, Cli, Commands};
use commit_gate::report;

/// `RUST_LOG` when set, otherwise `commit_gate=info`.
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("commit_gate=info"))
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries tool output and the summary.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(log_filter())
        .init();

    let cli = Cli::parse();
    let repo = cli.repo.as_deref();

    let result = match cli.command {
        None => {
            // Show help when no command provided
            let _ = Cli::command().print_help();
            println!();
            Ok(0)
        }
        Some(Commands::Run) => cli::run::run(repo).await,
        Some(Commands::Install { force }) => cli::hooks::install(repo, force).map(|_| 0),
        Some(Commands::Uninstall) => cli::hooks::uninstall(repo).map(|_| 0),
        Some(Commands::Checks) => cli::checks::list(repo).map(|_| 0),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report::print_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
