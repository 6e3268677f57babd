// src/presenter.rs
//! Formatting primitives every block of the report goes through.

use std::io::{self, Write};

/// Width of every divider rule.
pub const RULE_WIDTH: usize = 40;

/// Title printed between the two header rules.
pub const TITLE: &str = "SYSTEM DIAGNOSTICS";

const HELP_TEXT: &str = "\
-h/-help  - open this help window
-a/-all   - display all information (omitting arguments will also display everything)
-vm       - virtual memory
-cp       - cpu information
-pp       - physical partitions
-ni       - display information about network interfaces
-c        - display information for docker containers
";

/// Function to write a single divider rule.
pub fn divider(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))
}

/// Function to write the report header: rule, title, rule.
pub fn header(out: &mut dyn Write) -> io::Result<()> {
    divider(out)?;
    writeln!(out, "{TITLE}")?;
    divider(out)
}

/// Static description of every selector and utility flag.
pub fn help_text() -> &'static str {
    HELP_TEXT
}

/// Truncates a percentage down to two decimals, so 42.567 becomes 42.56.
pub fn floor_hundredths(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

/// Percentage of `used` against `total`, already floored to hundredths.
pub fn used_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    floor_hundredths(used as f64 / total as f64 * 100.0)
}
