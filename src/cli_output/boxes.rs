//! Simple line-based CLI output utilities.

/// Line width for separators and name/value rows.
pub const LINE_WIDTH: usize = 60;

/// Rule drawn under card titles.
pub const SECTION_RULE: &str = "─";

/// Print the main header.
///
/// ```text
/// SITE INSIGHTS · 1001
/// ════════════════════════════════════════════════════════════
/// ```
pub fn print_header(title: &str) {
    println!();
    println!("{}", title);
    println!("{}", "═".repeat(LINE_WIDTH));
    println!();
}

/// Print a status line.
///
/// ```text
///   ✓ Signed out sam
/// ```
pub fn print_status_line(icon: &str, message: &str) {
    println!("  {} {}", icon, message);
}

/// Print an error with a recovery hint underneath.
pub fn print_error(message: &str, hint: &str) {
    eprintln!("  {} {}", icons::FAILURE, message);
    if !hint.is_empty() {
        eprintln!();
        eprintln!("    {}", hint);
    }
}

/// Print the closing rule.
pub fn print_footer(note: &str) {
    println!("{}", "═".repeat(LINE_WIDTH));
    if !note.is_empty() {
        println!("{}", note);
    }
}

/// Status icons
pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const FAILURE: &str = "✗";
    pub const WARNING: &str = "⚠";
}
