//! Row codec: one table row of plaintext cells <-> one row of encoded cells.
//!
//! Every non-empty cell is encrypted on its own and serialized as four
//! base64url components joined by `|`:
//!
//! ```text
//! b64(associated_data)|b64(ciphertext)|b64(nonce)|b64(tag)
//! ```
//!
//! The associated data is the wall-clock timestamp of the row encryption.
//! It travels inside each cell, so every cell can be decrypted without
//! looking at its neighbours.  Empty cells are written as empty strings
//! and never touch the cipher.

use base64::engine::general_purpose::URL_SAFE as BASE64;
use base64::Engine;
use chrono::Local;

use crate::crypto::encryption::{decrypt_field, encrypt_field, NONCE_LEN, TAG_LEN};
use crate::crypto::keys::DerivedKey;
use crate::errors::{Result, VaultError};

/// Separator between the four components of an encoded cell.
pub const DELIMITER: &str = "|";

/// Number of components in a non-empty encoded cell.
const PARTS: usize = 4;

/// Timestamp layout used for associated data (millisecond precision).
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Build associated data from the current local time.
pub fn associated_data_now() -> Vec<u8> {
    Local::now().format(TIMESTAMP_FORMAT).to_string().into_bytes()
}

/// Encrypt a row.  One associated-data value is generated per call and
/// shared by all non-empty cells of the row.
pub fn encode_row<S: AsRef<str>>(key: &DerivedKey, cells: &[S]) -> Result<Vec<String>> {
    encode_row_with(key, cells, &associated_data_now())
}

/// Encrypt a row with caller-supplied associated data.
pub fn encode_row_with<S: AsRef<str>>(
    key: &DerivedKey,
    cells: &[S],
    associated_data: &[u8],
) -> Result<Vec<String>> {
    cells
        .iter()
        .map(|cell| encode_cell(key, cell.as_ref(), associated_data))
        .collect()
}

/// Decrypt a row.  Fails on the first cell that is malformed or does not
/// authenticate; no partially decrypted row is ever returned.
pub fn decode_row<S: AsRef<str>>(key: &DerivedKey, encoded_cells: &[S]) -> Result<Vec<String>> {
    encoded_cells
        .iter()
        .map(|cell| decode_cell(key, cell.as_ref()))
        .collect()
}

fn encode_cell(key: &DerivedKey, cell: &str, associated_data: &[u8]) -> Result<String> {
    if cell.is_empty() {
        return Ok(String::new());
    }

    let sealed = encrypt_field(key, cell.as_bytes(), associated_data)?;

    Ok([
        BASE64.encode(associated_data),
        BASE64.encode(&sealed.ciphertext),
        BASE64.encode(sealed.nonce),
        BASE64.encode(sealed.tag),
    ]
    .join(DELIMITER))
}

fn decode_cell(key: &DerivedKey, encoded: &str) -> Result<String> {
    if encoded.is_empty() {
        return Ok(String::new());
    }

    let parts: Vec<&str> = encoded.split(DELIMITER).collect();
    if parts.len() != PARTS {
        return Err(VaultError::MalformedField(format!(
            "expected {PARTS} '{DELIMITER}'-separated parts, found {}",
            parts.len()
        )));
    }

    let associated_data = decode_part(parts[0], "associated data")?;
    let ciphertext = decode_part(parts[1], "ciphertext")?;
    let nonce: [u8; NONCE_LEN] = decode_part(parts[2], "nonce")?
        .try_into()
        .map_err(|v: Vec<u8>| {
            VaultError::MalformedField(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                v.len()
            ))
        })?;
    let tag: [u8; TAG_LEN] = decode_part(parts[3], "tag")?
        .try_into()
        .map_err(|v: Vec<u8>| {
            VaultError::MalformedField(format!("tag must be {TAG_LEN} bytes, got {}", v.len()))
        })?;

    let plaintext = decrypt_field(key, &associated_data, &nonce, &ciphertext, &tag)?;

    String::from_utf8(plaintext)
        .map_err(|_| VaultError::MalformedField("decrypted cell is not valid UTF-8".into()))
}

fn decode_part(part: &str, what: &str) -> Result<Vec<u8>> {
    BASE64
        .decode(part)
        .map_err(|e| VaultError::MalformedField(format!("{what} is not valid base64url: {e}")))
}
