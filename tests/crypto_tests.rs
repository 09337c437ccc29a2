//! Integration tests for the Ragasiya crypto module.

use std::collections::HashSet;

use ragasiya::crypto::keys::DerivedKey;
use ragasiya::crypto::{decrypt_field, derive_key, encrypt_field, generate_salt};
use ragasiya::errors::VaultError;

// ---------------------------------------------------------------------------
// Field encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = DerivedKey::new([0xABu8; 32]);
    let plaintext = b"correct horse battery staple";

    let sealed = encrypt_field(&key, plaintext, b"2024-05-01 10:00:00.000").expect("encrypt");
    assert_eq!(sealed.ciphertext.len(), plaintext.len());

    let recovered = decrypt_field(
        &key,
        b"2024-05-01 10:00:00.000",
        &sealed.nonce,
        &sealed.ciphertext,
        &sealed.tag,
    )
    .expect("decrypt should succeed");
    assert_eq!(recovered, plaintext);
}

#[test]
fn nonces_never_repeat() {
    let key = DerivedKey::new([0xCDu8; 32]);
    let mut seen = HashSet::new();

    for _ in 0..1000 {
        let sealed = encrypt_field(&key, b"same plaintext", b"ad").expect("encrypt");
        assert!(seen.insert(sealed.nonce), "nonce reused");
    }
}

#[test]
fn every_single_bit_flip_in_ciphertext_or_tag_fails() {
    let key = DerivedKey::new([0x11u8; 32]);
    let sealed = encrypt_field(&key, b"s3cr3t", b"ad").expect("encrypt");

    for byte in 0..sealed.ciphertext.len() {
        for bit in 0..8 {
            let mut ct = sealed.ciphertext.clone();
            ct[byte] ^= 1 << bit;
            let result = decrypt_field(&key, b"ad", &sealed.nonce, &ct, &sealed.tag);
            assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
        }
    }

    for byte in 0..sealed.tag.len() {
        for bit in 0..8 {
            let mut tag = sealed.tag;
            tag[byte] ^= 1 << bit;
            let result = decrypt_field(&key, b"ad", &sealed.nonce, &sealed.ciphertext, &tag);
            assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
        }
    }
}

// ---------------------------------------------------------------------------
// Key derivation (PBKDF2-HMAC-SHA256)
// ---------------------------------------------------------------------------

#[test]
fn derive_key_same_inputs_same_output() {
    let salt = [0x42u8; 32];
    let k1 = derive_key(b"my-password", &salt);
    let k2 = derive_key(b"my-password", &salt);
    assert_eq!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn derive_key_different_salt_different_output() {
    let k1 = derive_key(b"my-password", &generate_salt());
    let k2 = derive_key(b"my-password", &generate_salt());
    assert_ne!(k1.as_bytes(), k2.as_bytes());
}

#[test]
fn key_from_other_password_fails_authentication() {
    let salt = generate_salt();
    let key_b = derive_key(b"password-b", &salt);
    let key_a = derive_key(b"password-a", &salt);

    let sealed = encrypt_field(&key_b, b"value", b"ad").expect("encrypt");
    let result = decrypt_field(&key_a, b"ad", &sealed.nonce, &sealed.ciphertext, &sealed.tag);
    assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
}
