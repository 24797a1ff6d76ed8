//! Shared terminal output helpers.
//!
//! Uses `colored` for terminal output.

use colored::Colorize;

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", "\u{2714}".bright_green(), msg);
}

/// Print an error message.
pub fn error(msg: &str) {
    println!("  {} {}", "\u{2718}".bright_red(), msg.bright_red());
}

/// Brand banner: ">> factbot"
pub fn banner() {
    println!("  {} {}", ">>".bright_cyan().bold(), "factbot".bold());
    println!(
        "     {}",
        "Answers from stored facts, learns what it does not know".dimmed()
    );
}

/// Section header: ">> Title" in cyan.
pub fn section(title: &str) {
    println!("  {} {}", ">>".bright_cyan().bold(), title.bold());
}

/// Key-value display: "  Label:       value".
pub fn kv(label: &str, value: &str) {
    println!("  {:<13}{}", format!("{label}:"), value);
}

/// Key-value with green value.
pub fn kv_ok(label: &str, value: &str) {
    println!("  {:<13}{}", format!("{label}:"), value.bright_green());
}

/// Key-value with yellow value.
pub fn kv_warn(label: &str, value: &str) {
    println!("  {:<13}{}", format!("{label}:"), value.bright_yellow());
}

/// Hint line: "  hint: message" in dimmed text.
pub fn hint(msg: &str) {
    println!("  {} {}", "hint:".dimmed(), msg.dimmed());
}

/// Numbered "Next steps:" list.
pub fn next_steps(steps: &[&str]) {
    println!("  {}:", "Next steps".bold());
    for (i, step) in steps.iter().enumerate() {
        println!("    {}. {step}", i + 1);
    }
}

/// The bot's reply in a chat: "bot> answer".
pub fn reply(msg: &str) {
    println!("{} {}", "bot>".bright_cyan().bold(), msg);
}

/// Red error + yellow "fix:" suggestion.
pub fn error_with_fix(msg: &str, fix: &str) {
    println!("  {} {}", "\u{2718}".bright_red(), msg.bright_red());
    println!("    {} {}", "fix:".bright_yellow(), fix);
}

/// Yellow warning + "try:" suggestion.
pub fn warn_with_fix(msg: &str, fix: &str) {
    println!("  {} {}", "-".bright_yellow(), msg.yellow());
    println!("    {} {}", "try:".bright_yellow(), fix);
}

/// Empty line.
pub fn blank() {
    println!();
}
