use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in Ragasiya.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong password or corrupted data")]
    AuthenticationFailure,

    #[error("Password must not be empty")]
    EmptyPassword,

    // --- Format errors ---
    #[error("Malformed field: {0}")]
    MalformedField(String),

    #[error("Malformed header: {0}")]
    MalformedHeader(String),

    #[error("Row {row} has {found} cells but the header has {expected}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("A vault needs at least one column")]
    NoColumns,

    #[error("CSV error: {0}")]
    Csv(String),

    // --- Vault errors ---
    #[error("Vault not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Vault already exists at {0}")]
    VaultAlreadyExists(PathBuf),

    #[error("Saved file did not decrypt back to the table — {0} was left untouched")]
    SaveVerificationFailed(PathBuf),

    #[error("Row {0} does not exist")]
    RowNotFound(usize),

    #[error("Column '{0}' does not exist")]
    ColumnNotFound(String),

    #[error("Got {found} values but the vault has {expected} columns")]
    TooManyValues { expected: usize, found: usize },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Weak password:\n{0}")]
    WeakPassword(String),

    #[error("Too many failed password attempts ({0})")]
    TooManyAttempts(u32),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl From<csv::Error> for VaultError {
    fn from(e: csv::Error) -> Self {
        VaultError::Csv(e.to_string())
    }
}

/// Convenience type alias for Ragasiya results.
pub type Result<T> = std::result::Result<T, VaultError>;
