//! `ragasiya check-password` — evaluate a password against the policy.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::crypto::password_check;
use crate::errors::{Result, VaultError};

/// Execute the `check-password` command.
pub fn execute(password: Option<&str>) -> Result<()> {
    let password = match password {
        Some(pw) => Zeroizing::new(pw.to_string()),
        None => Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Password to check")
                .allow_empty_password(true)
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
        ),
    };

    let check = password_check(&password);
    output::print_password_check(&check);

    if check.password_ok {
        output::success("Password is strong.");
        Ok(())
    } else {
        Err(VaultError::WeakPassword(check.error_msg))
    }
}
