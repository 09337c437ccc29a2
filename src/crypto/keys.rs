//! In-memory key handle.

use zeroize::Zeroize;

/// Length of the derived AES-256 key (256 bits).
pub const KEY_LEN: usize = 32;

/// A wrapper around a 32-byte derived key that automatically zeroes
/// its memory when dropped.
///
/// One is created per save or per load attempt and dropped right after,
/// so the key never outlives the operation that needed it.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct DerivedKey {
    bytes: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Create a new `DerivedKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Access the raw key bytes (e.g. to build the AES-GCM cipher).
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("DerivedKey(..)")
    }
}
