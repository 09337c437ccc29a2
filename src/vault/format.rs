//! Vault file format.
//!
//! A vault is a UTF-8 text file.  The first line is a comment carrying the
//! key-derivation salt, every following line is a CSV record whose fields
//! are encoded cells (see [`super::codec`]):
//!
//! ```text
//! # <base64url(salt)>
//! <header row of encoded cells>
//! <data row of encoded cells>
//! ...
//! ```
//!
//! Only cell values are secret.  The number of rows and columns, and which
//! cells are empty, are visible to anyone holding the file.

use base64::engine::general_purpose::URL_SAFE as BASE64;
use base64::Engine;

use super::codec::{decode_row, encode_row};
use crate::crypto::kdf::{derive_key, generate_salt, SALT_LEN};
use crate::errors::{Result, VaultError};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Marker that starts the salt header line.
const HEADER_PREFIX: char = '#';

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Encrypt a whole table with `password` under a freshly generated salt.
///
/// `rows[0]` is the header row.  It needs at least one column, and every
/// row must have as many cells as the header.
pub fn encode_table<R, S>(password: &[u8], rows: &[R]) -> Result<Vec<u8>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    encode_table_with_salt(password, &generate_salt(), rows)
}

/// Encrypt a whole table under an explicit salt.
pub fn encode_table_with_salt<R, S>(
    password: &[u8],
    salt: &[u8; SALT_LEN],
    rows: &[R],
) -> Result<Vec<u8>>
where
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    if password.is_empty() {
        return Err(VaultError::EmptyPassword);
    }
    // A CSV record cannot hold zero fields; it would come back as one empty cell.
    if rows.first().is_some_and(|header| header.as_ref().is_empty()) {
        return Err(VaultError::NoColumns);
    }
    check_arity(rows.iter().map(|r| r.as_ref().len()))?;

    let key = derive_key(password, salt);

    let header_line = format!("{HEADER_PREFIX} {}\n", BASE64.encode(salt));
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(header_line.into_bytes());

    for row in rows {
        writer.write_record(encode_row(&key, row.as_ref())?)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| VaultError::Csv(format!("flush failed: {e}")))?;

    tracing::debug!(rows = rows.len(), bytes = bytes.len(), "encoded vault table");
    Ok(bytes)
}

/// Decrypt a vault file produced by [`encode_table`].
///
/// All-or-nothing: the first malformed or unauthentic cell aborts the
/// whole decode.
pub fn decode_table(password: &[u8], data: &[u8]) -> Result<Vec<Vec<String>>> {
    if password.is_empty() {
        return Err(VaultError::EmptyPassword);
    }

    let (header_line, body) = match data.iter().position(|&b| b == b'\n') {
        Some(pos) => (&data[..pos], &data[pos + 1..]),
        None => (data, &data[data.len()..]),
    };

    let salt = parse_salt_line(header_line)?;
    let key = derive_key(password, &salt);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let cells: Vec<&str> = record.iter().collect();
        rows.push(decode_row(&key, &cells)?);
    }

    check_arity(rows.iter().map(Vec::len))?;

    tracing::debug!(rows = rows.len(), "decoded vault table");
    Ok(rows)
}

/// Extract the salt from the `# <base64url>` header line.
pub fn parse_salt_line(line: &[u8]) -> Result<[u8; SALT_LEN]> {
    let line = std::str::from_utf8(line)
        .map_err(|_| VaultError::MalformedHeader("salt line is not valid UTF-8".into()))?;

    let encoded = line
        .trim()
        .strip_prefix(HEADER_PREFIX)
        .ok_or_else(|| {
            VaultError::MalformedHeader(format!("first line must start with '{HEADER_PREFIX}'"))
        })?
        .trim();

    if encoded.is_empty() {
        return Err(VaultError::MalformedHeader("salt is missing".into()));
    }

    let salt = BASE64
        .decode(encoded)
        .map_err(|e| VaultError::MalformedHeader(format!("salt is not valid base64url: {e}")))?;

    salt.try_into().map_err(|v: Vec<u8>| {
        VaultError::MalformedHeader(format!("salt must be {SALT_LEN} bytes, got {}", v.len()))
    })
}

/// Every row must have the header's cell count.
fn check_arity(mut lengths: impl Iterator<Item = usize>) -> Result<()> {
    let Some(expected) = lengths.next() else {
        return Ok(());
    };
    for (i, found) in lengths.enumerate() {
        if found != expected {
            return Err(VaultError::ArityMismatch {
                row: i + 1,
                expected,
                found,
            });
        }
    }
    Ok(())
}
