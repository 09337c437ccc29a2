//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::crypto::PasswordCheck;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print vault rows as a table with a leading 1-based row number column.
pub fn print_vault_table<'a>(
    header: &[String],
    rows: impl IntoIterator<Item = (usize, &'a [String])>,
) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(std::iter::once("#".to_string()).chain(header.iter().cloned()));

    let mut count = 0;
    for (index, cells) in rows {
        table.add_row(std::iter::once((index + 1).to_string()).chain(cells.iter().cloned()));
        count += 1;
    }

    if count == 0 {
        info("No matching rows.");
        return;
    }

    println!("{table}");
}

/// Print one line per password rule.
pub fn print_password_check(check: &PasswordCheck) {
    let rules = [
        ("At least 8 characters", check.length_error),
        ("At least 1 number", check.digit_error),
        ("At least 1 UPPER case letter", check.uppercase_error),
        ("At least 1 lower case letter", check.lowercase_error),
        ("At least 1 special symbol", check.symbol_error),
    ];

    for (rule, failed) in rules {
        if failed {
            println!("  {} {}", style("\u{2717}").red(), rule);
        } else {
            println!("  {} {}", style("\u{2713}").green(), rule);
        }
    }
}
