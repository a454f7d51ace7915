//! Pure formatting functions for UI output.
//!
//! This module contains all display/formatting logic separated from decision making.
//! Functions here have no side effects beyond printing.

use console::style;

use crate::analyzer::EnforcementDecision;
use crate::boundary::BoundaryWarning;
use crate::cli::ComputedVersion;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow(), warning);
}

/// Print the bare version, for scripts.
pub fn display_version(computed: &ComputedVersion) {
    println!("{}", computed.version);
}

/// Display the multi-line diagnostic report for a computed version.
///
/// The text is informational only; scripts should use [display_version].
pub fn display_report(computed: &ComputedVersion) {
    println!("{}", style("Version report:").bold());
    for line in computed.to_string().lines() {
        println!("  {}", line);
    }
}

/// Display which class of change is currently permitted and why.
pub fn display_enforcement(decision: &EnforcementDecision) {
    println!(
        "{} {}",
        style("Permitted changes:").bold(),
        style(decision.permitted()).cyan()
    );
    println!("  {}", decision.explanation());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_error() {
        // Visual verification test - output is printed to stderr
        display_error("test error");
    }

    #[test]
    fn test_display_enforcement() {
        // Visual verification test - output is printed to stdout
        display_enforcement(&EnforcementDecision::Strict);
    }
}
