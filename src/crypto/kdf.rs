//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The vault file only records the salt, so the iteration count and
//! output length are fixed constants of the format.  Changing either one
//! makes every existing vault unreadable.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

use super::keys::{DerivedKey, KEY_LEN};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 100_000;

/// Derive a 32-byte key from a password and salt.
///
/// The same password + salt always produce the same key.  Empty
/// passwords are accepted here; rejecting them is the caller's policy.
pub fn derive_key(password: &[u8], salt: &[u8; SALT_LEN]) -> DerivedKey {
    let mut bytes = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password, salt, ITERATIONS, &mut bytes);
    DerivedKey::new(bytes)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> [u8; SALT_LEN] {
    let mut salt = [0u8; SALT_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    salt
}
