//! Cryptographic primitives for Ragasiya.
//!
//! This module provides:
//! - AES-256-GCM per-field encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - The zeroizing key handle (`keys`)
//! - Password strength evaluation (`policy`)

pub mod encryption;
pub mod kdf;
pub mod keys;
pub mod policy;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt_field, derive_key, ...};
pub use encryption::{decrypt_field, encrypt_field, SealedField};
pub use kdf::{derive_key, generate_salt};
pub use keys::DerivedKey;
pub use policy::{password_check, PasswordCheck};
