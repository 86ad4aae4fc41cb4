// Output formatting for CLI errors

use colored::*;

/// Print an error message to stderr
pub fn print_error(error: &str) {
    eprintln!("{} {}", "✗ Error:".red().bold(), error);
}
