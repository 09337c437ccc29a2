//! AES-256-GCM authenticated encryption of a single table cell.
//!
//! Each call to `encrypt_field` draws a fresh random 12-byte nonce from
//! the OS and returns the nonce, ciphertext and 16-byte tag as separate
//! parts, because the cell encoding stores them as separate components.
//! GCM is a stream mode, so the ciphertext is exactly as long as the
//! plaintext.

use aes_gcm::aead::{AeadInPlace, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes256Gcm, Key, Nonce, Tag};
use zeroize::Zeroize;

use super::keys::DerivedKey;
use crate::errors::{Result, VaultError};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// The output of one field encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedField {
    pub nonce: [u8; NONCE_LEN],
    pub ciphertext: Vec<u8>,
    pub tag: [u8; TAG_LEN],
}

fn cipher(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Encrypt `plaintext`, authenticating `associated_data` alongside it.
pub fn encrypt_field(
    key: &DerivedKey,
    plaintext: &[u8],
    associated_data: &[u8],
) -> Result<SealedField> {
    let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

    let mut buffer = plaintext.to_vec();
    let tag = cipher(key)
        .encrypt_in_place_detached(&nonce, associated_data, &mut buffer)
        .map_err(|e| VaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(SealedField {
        nonce: nonce.into(),
        ciphertext: buffer,
        tag: tag.into(),
    })
}

/// Verify the tag and decrypt.
///
/// Any mismatch (wrong key, flipped bit in any component) yields
/// `AuthenticationFailure` and no plaintext.
pub fn decrypt_field(
    key: &DerivedKey,
    associated_data: &[u8],
    nonce: &[u8; NONCE_LEN],
    ciphertext: &[u8],
    tag: &[u8; TAG_LEN],
) -> Result<Vec<u8>> {
    let mut buffer = ciphertext.to_vec();
    let outcome = cipher(key).decrypt_in_place_detached(
        Nonce::from_slice(nonce),
        associated_data,
        &mut buffer,
        Tag::from_slice(tag),
    );

    match outcome {
        Ok(()) => Ok(buffer),
        Err(_) => {
            buffer.zeroize();
            Err(VaultError::AuthenticationFailure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(byte: u8) -> DerivedKey {
        DerivedKey::new([byte; 32])
    }

    #[test]
    fn ciphertext_length_equals_plaintext_length() {
        let sealed = encrypt_field(&key(1), b"hunter2", b"ad").unwrap();
        assert_eq!(sealed.ciphertext.len(), 7);
    }

    #[test]
    fn empty_plaintext_still_authenticates() {
        let k = key(1);
        let sealed = encrypt_field(&k, b"", b"ad").unwrap();
        assert!(sealed.ciphertext.is_empty());

        let plain = decrypt_field(&k, b"ad", &sealed.nonce, &sealed.ciphertext, &sealed.tag);
        assert_eq!(plain.unwrap(), b"");
        let wrong = decrypt_field(&k, b"da", &sealed.nonce, &sealed.ciphertext, &sealed.tag);
        assert!(matches!(wrong, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn tampered_nonce_fails() {
        let k = key(2);
        let sealed = encrypt_field(&k, b"value", b"ad").unwrap();
        let mut nonce = sealed.nonce;
        nonce[0] ^= 0x01;

        let result = decrypt_field(&k, b"ad", &nonce, &sealed.ciphertext, &sealed.tag);
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }
}
