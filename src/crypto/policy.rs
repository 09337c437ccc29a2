//! Password strength evaluation.
//!
//! A password is considered strong if it has:
//! - 8 characters or more
//! - 1 digit or more
//! - 1 uppercase letter or more
//! - 1 lowercase letter or more
//! - 1 symbol (anything outside the word-character class) or more
//!
//! This is advisory only.  Key derivation accepts any password; the CLI
//! decides whether a weak one is allowed.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum password length, counted in characters.
const MIN_LENGTH: usize = 8;

/// Result of checking one password against every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCheck {
    pub password_ok: bool,
    pub length_error: bool,
    pub digit_error: bool,
    pub uppercase_error: bool,
    pub lowercase_error: bool,
    pub symbol_error: bool,
    /// One line per failed rule, joined with `\n`.  Empty when all pass.
    pub error_msg: String,
}

struct Patterns {
    digit: Regex,
    uppercase: Regex,
    lowercase: Regex,
    symbol: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        digit: Regex::new(r"\d").expect("static regex"),
        uppercase: Regex::new(r"[A-Z]").expect("static regex"),
        lowercase: Regex::new(r"[a-z]").expect("static regex"),
        symbol: Regex::new(r"\W").expect("static regex"),
    })
}

/// Verify the strength of `password`.
pub fn password_check(password: &str) -> PasswordCheck {
    let p = patterns();

    let length_error = password.chars().count() < MIN_LENGTH;
    let digit_error = !p.digit.is_match(password);
    let uppercase_error = !p.uppercase.is_match(password);
    let lowercase_error = !p.lowercase.is_match(password);
    let symbol_error = !p.symbol.is_match(password);

    let error_msg = [
        (length_error, "Length is less than 8."),
        (digit_error, "Does not have at least 1 number."),
        (uppercase_error, "Does not have at least 1 UPPER case letter."),
        (lowercase_error, "Does not have at least 1 lower case letter."),
        (symbol_error, "Does not have at least 1 special symbol."),
    ]
    .iter()
    .filter(|(failed, _)| *failed)
    .map(|(_, msg)| *msg)
    .collect::<Vec<_>>()
    .join("\n");

    PasswordCheck {
        password_ok: !(length_error
            || digit_error
            || uppercase_error
            || lowercase_error
            || symbol_error),
        length_error,
        digit_error,
        uppercase_error,
        lowercase_error,
        symbol_error,
        error_msg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_password_reports_length() {
        let check = password_check("abc");
        assert!(check.length_error);
        assert!(!check.password_ok);
        assert!(check.error_msg.starts_with("Length is less than 8."));
    }

    #[test]
    fn missing_uppercase_only() {
        let check = password_check("alllower1!");
        assert!(check.uppercase_error);
        assert!(!check.length_error);
        assert!(!check.digit_error);
        assert!(!check.lowercase_error);
        assert!(!check.symbol_error);
        assert!(!check.password_ok);
        assert_eq!(
            check.error_msg,
            "Does not have at least 1 UPPER case letter."
        );
    }

    #[test]
    fn strong_password_passes() {
        let check = password_check("Str0ng!Pass");
        assert!(check.password_ok);
        assert!(!check.length_error);
        assert!(!check.digit_error);
        assert!(!check.uppercase_error);
        assert!(!check.lowercase_error);
        assert!(!check.symbol_error);
        assert_eq!(check.error_msg, "");
    }

    #[test]
    fn underscore_is_not_a_symbol() {
        let check = password_check("Under_score1");
        assert!(check.symbol_error);
    }

    #[test]
    fn whitespace_counts_as_symbol() {
        let check = password_check("Has Space1");
        assert!(!check.symbol_error);
        assert!(check.password_ok);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 7 characters, more than 8 bytes.
        let check = password_check("Äb1!Äb1");
        assert!(check.length_error);
    }

    #[test]
    fn empty_password_fails_every_rule() {
        let check = password_check("");
        assert_eq!(check.error_msg.lines().count(), 5);
    }
}
