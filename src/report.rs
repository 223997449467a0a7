//! Console output: step banners, tool output pass-through, summary table.

use colored::*;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::check::{CheckKind, CheckResult};
use crate::process::Invocation;

/// One row of the summary table.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Check")]
    pub check: &'static str,
    #[tabled(rename = "Status")]
    pub status: &'static str,
    #[tabled(rename = "Commit")]
    pub commit: &'static str,
    #[tabled(rename = "Suggestion")]
    pub suggestion: &'static str,
}

impl From<&CheckResult> for SummaryRow {
    fn from(result: &CheckResult) -> Self {
        if result.passed {
            Self {
                check: result.kind.name(),
                status: "PASS",
                commit: "allowed",
                suggestion: "-",
            }
        } else {
            Self {
                check: result.kind.name(),
                status: "FAIL",
                commit: "rejected",
                suggestion: result.kind.suggestion(),
            }
        }
    }
}

/// Render results as a Markdown table.
pub fn render_summary(results: &[CheckResult]) -> String {
    let rows: Vec<SummaryRow> = results.iter().map(SummaryRow::from).collect();
    Table::new(rows).with(Style::markdown()).to_string()
}

/// Banner printed before a check runs.
pub fn print_step(index: usize, kind: CheckKind, invocation: &Invocation) {
    println!();
    println!(
        "{} {}",
        format!("[{}/{}]", index + 1, CheckKind::ALL.len()).cyan().bold(),
        format!("Running {}", kind.name()).bold()
    );
    println!("{}", format!("$ {}", invocation).dimmed());
}

/// Raw tool output followed by a one-line status.
pub fn print_check_output(result: &CheckResult) {
    let output = result.raw_output.trim_end();
    if !output.is_empty() {
        println!("{}", output);
    }
    if result.passed {
        println!("{} {} passed", "✅".green(), result.kind.name());
    } else {
        match result.exit_code {
            Some(0) => println!("{} {} reported issues", "❌".red(), result.kind.name()),
            Some(code) => println!(
                "{} {} exited with status {}",
                "❌".red(),
                result.kind.name(),
                code
            ),
            None => println!("{} {} was terminated by a signal", "❌".red(), result.kind.name()),
        }
    }
}

pub fn print_summary(results: &[CheckResult]) {
    println!();
    println!("{}", "Summary".bold().underline());
    println!();
    println!("{}", render_summary(results));
    println!();
}

/// Final banner.
pub fn print_verdict(allowed: bool) {
    if allowed {
        println!("{}", "✅ All checks passed. Commit allowed.".green().bold());
    } else {
        println!(
            "{}",
            "❌ Some checks failed. Fix all errors before committing."
                .red()
                .bold()
        );
    }
}

/// Error that aborts the run.
pub fn print_error(message: &str) {
    eprintln!("{} {}", "❌".red(), message.red());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(kind: CheckKind, passed: bool) -> CheckResult {
        CheckResult {
            kind,
            raw_output: String::new(),
            exit_code: Some(0),
            passed,
        }
    }

    #[test]
    fn test_row_for_pass_and_fail() {
        let row = SummaryRow::from(&result(CheckKind::PhpStan, true));
        assert_eq!(row.status, "PASS");
        assert_eq!(row.commit, "allowed");
        assert_eq!(row.suggestion, "-");

        let row = SummaryRow::from(&result(CheckKind::Build, false));
        assert_eq!(row.status, "FAIL");
        assert_eq!(row.commit, "rejected");
        assert_eq!(row.suggestion, CheckKind::Build.suggestion());
    }

    #[test]
    fn test_render_summary_is_markdown() {
        let results: Vec<_> = CheckKind::ALL
            .iter()
            .map(|k| result(*k, *k != CheckKind::EsLint))
            .collect();
        let table = render_summary(&results);
        let lines: Vec<&str> = table.lines().collect();

        // Header, separator, six rows.
        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with('|'));
        assert!(lines[0].contains("Check"));
        assert!(lines[0].contains("Suggestion"));
        assert!(lines[1].contains("---"));
        assert!(lines[2].contains("PHP-CS-FIXER"));
        assert!(lines[5].contains("ESLint") && lines[5].contains("FAIL"));
        assert!(lines[7].contains("Build") && lines[7].contains("PASS"));
    }
}
