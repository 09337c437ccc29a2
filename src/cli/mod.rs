//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::Path;

use clap::Parser;
use dialoguer::Confirm;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::password_check;
use crate::errors::{Result, VaultError};
use crate::vault::{VaultStore, VaultTable};

/// Environment variable consulted before any interactive password prompt.
pub const PASSWORD_ENV: &str = "RAGASIYA_PASSWORD";

/// Ragasiya CLI: encrypted credential table.
#[derive(Parser)]
#[command(
    name = "ragasiya",
    about = "Encrypted credential table with per-cell authenticated encryption",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create a new vault with the default columns
    New {
        /// Vault file to create
        file: String,
    },

    /// Encrypt a plaintext CSV file into a new vault
    Import {
        /// Plaintext CSV to read (first row is the header)
        source: String,
        /// Vault file to create
        file: String,
    },

    /// Decrypt a vault and print its rows
    Show {
        /// Vault file
        file: String,
        /// Only show rows where some cell contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Append a row (prompts for each column if no values are given)
    Add {
        /// Vault file
        file: String,
        /// Cell values in column order
        values: Vec<String>,
    },

    /// Change one cell
    Edit {
        /// Vault file
        file: String,
        /// Row number as printed by `show`
        row: usize,
        /// Column name
        column: String,
        /// New cell value
        value: String,
    },

    /// Delete a row
    Delete {
        /// Vault file
        file: String,
        /// Row number as printed by `show`
        row: usize,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Check a password against the strength policy
    CheckPassword {
        /// Password to check (omit for interactive prompt)
        password: Option<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Password from `RAGASIYA_PASSWORD`, if set and non-empty.
fn env_password() -> Option<Zeroizing<String>> {
    std::env::var(PASSWORD_ENV)
        .ok()
        .filter(|pw| !pw.is_empty())
        .map(Zeroizing::new)
}

/// Get the vault password from `RAGASIYA_PASSWORD` or an interactive prompt.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Some(pw) = env_password() {
        return Ok(pw);
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter vault password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation and a strength check.
///
/// A weak password is rejected when `enforce_password_policy` is set,
/// otherwise the user is asked whether to keep it.  `RAGASIYA_PASSWORD`
/// skips the prompts; a weak one then only warns unless enforcement is on.
pub fn prompt_new_password(settings: &Settings) -> Result<Zeroizing<String>> {
    if let Some(pw) = env_password() {
        let check = password_check(&pw);
        if !check.password_ok {
            if settings.enforce_password_policy {
                return Err(VaultError::WeakPassword(check.error_msg));
            }
            output::warning(&format!("The password is weak:\n{}", check.error_msg));
        }
        return Ok(pw);
    }

    loop {
        let password = Zeroizing::new(
            dialoguer::Password::new()
                .with_prompt("Choose vault password")
                .with_confirmation(
                    "Confirm vault password",
                    "Passwords do not match, try again",
                )
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?,
        );

        let check = password_check(&password);
        if check.password_ok {
            return Ok(password);
        }

        output::warning(&format!("The password is weak because:\n{}", check.error_msg));
        if settings.enforce_password_policy {
            continue;
        }

        let keep = Confirm::new()
            .with_prompt("Use it anyway?")
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;
        if keep {
            return Ok(password);
        }
    }
}

/// Open a vault, re-prompting on a wrong password.
///
/// Gives up after `max_password_attempts` failures.  A password taken
/// from `RAGASIYA_PASSWORD` gets exactly one attempt.  Errors other than
/// a failed authentication (missing or corrupt file) are returned at once.
pub fn open_vault(path: &Path, settings: &Settings) -> Result<(VaultStore, Zeroizing<String>)> {
    if !path.exists() {
        return Err(VaultError::VaultNotFound(path.to_path_buf()));
    }

    if let Some(pw) = env_password() {
        let store = VaultStore::open(path, pw.as_bytes())?;
        return Ok((store, pw));
    }

    for attempt in 1..=settings.max_password_attempts {
        let password = prompt_password()?;
        match VaultStore::open(path, password.as_bytes()) {
            Ok(store) => return Ok((store, password)),
            Err(VaultError::AuthenticationFailure) => {
                tracing::debug!(attempt, "wrong password");
                output::error("Wrong password. Please try again.");
            }
            Err(e) => return Err(e),
        }
    }

    Err(VaultError::TooManyAttempts(settings.max_password_attempts))
}

/// Convert a 1-based row number as shown by `show` into a table index.
pub fn row_index(table: &VaultTable, row: usize) -> Result<usize> {
    if row == 0 || row > table.len() {
        return Err(VaultError::RowNotFound(row));
    }
    Ok(row - 1)
}

/// Load settings from the current directory.
pub fn load_settings() -> Result<Settings> {
    let cwd = std::env::current_dir()?;
    Settings::load(&cwd)
}
