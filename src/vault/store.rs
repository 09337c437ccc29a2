//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` ties a file path to an in-memory [`VaultTable`] and owns
//! the load/save cycle.  Saving never overwrites the target directly: the
//! new content goes to a temp file next to it, is read back and decrypted,
//! and only replaces the target once it round-trips exactly.

use std::fs;
use std::path::{Path, PathBuf};

use super::format::{decode_table, encode_table};
use super::table::VaultTable;
use crate::errors::{Result, VaultError};

/// The main vault handle.  Create one with `VaultStore::create`,
/// `VaultStore::open` or `VaultStore::import_csv`, edit its table, then
/// call `save`.
#[derive(Debug)]
pub struct VaultStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// Decrypted table with per-row edit state.
    table: VaultTable,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Start a brand-new vault for `path` with the given columns and one
    /// blank row.  Nothing is written until `save`.
    pub fn create<S: Into<String>>(
        path: &Path,
        columns: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        if path.exists() {
            return Err(VaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        let mut table = VaultTable::new(columns)?;
        table.add_row(std::iter::empty::<String>())?;

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    /// Open and decrypt an existing vault file.
    ///
    /// Fails as a whole if any cell is malformed or does not authenticate.
    pub fn open(path: &Path, password: &[u8]) -> Result<Self> {
        if !path.exists() {
            return Err(VaultError::VaultNotFound(path.to_path_buf()));
        }

        let data = fs::read(path)?;
        let rows = decode_table(password, &data)?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "opened vault");

        Ok(Self {
            path: path.to_path_buf(),
            table: VaultTable::from_rows(rows),
        })
    }

    /// Build an unsaved vault for `path` from a plaintext CSV file.
    ///
    /// The CSV's first record becomes the header; every other record is a
    /// `New` row.  Short records are padded with empty cells.
    pub fn import_csv(path: &Path, source: &Path) -> Result<Self> {
        if path.exists() {
            return Err(VaultError::VaultAlreadyExists(path.to_path_buf()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(source)?;

        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(VaultError::CommandFailed(format!(
                    "{} contains no rows",
                    source.display()
                )));
            }
        };

        let mut table = VaultTable::new(header.iter())?;
        for record in records {
            table.add_row(record?.iter())?;
        }
        tracing::debug!(source = %source.display(), rows = table.len(), "imported plaintext CSV");

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Encrypt the table under a fresh salt and replace the file atomically.
    ///
    /// 1. Encode header + every non-deleted row.
    /// 2. Write to a temp file in the same directory.
    /// 3. Re-read and decrypt the temp file; it must equal step 1's rows.
    /// 4. Rename the temp file over the target.
    ///
    /// Row states are reset only after the rename succeeds.  On any failure
    /// the previous file is left as it was.
    pub fn save(&mut self, password: &[u8]) -> Result<()> {
        self.save_checked(password, |data| decode_table(password, data))
    }

    /// `save` with the read-back decoder supplied by the caller.
    fn save_checked<F>(&mut self, password: &[u8], read_back: F) -> Result<()>
    where
        F: FnOnce(&[u8]) -> Result<Vec<Vec<String>>>,
    {
        let rows = self.table.retained_rows();
        let bytes = encode_table(password, &rows)?;

        let tmp_path = self.tmp_path();
        write_private(&tmp_path, &bytes)?;

        let verified = fs::read(&tmp_path)
            .map_err(VaultError::from)
            .and_then(|data| read_back(&data));

        match verified {
            Ok(decoded) if decoded == rows => {}
            Ok(decoded) => {
                tracing::warn!(
                    path = %self.path.display(),
                    expected = rows.len(),
                    found = decoded.len(),
                    "saved vault decrypted to different rows"
                );
                let _ = fs::remove_file(&tmp_path);
                return Err(VaultError::SaveVerificationFailed(self.path.clone()));
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "saved vault failed to decrypt");
                let _ = fs::remove_file(&tmp_path);
                return Err(VaultError::SaveVerificationFailed(self.path.clone()));
            }
        }

        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        self.table.mark_saved();
        tracing::debug!(path = %self.path.display(), rows = rows.len(), "saved vault");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &VaultTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut VaultTable {
        &mut self.table
    }

    /// Temp file next to the target so the rename stays on one filesystem.
    fn tmp_path(&self) -> PathBuf {
        let parent = self.path.parent().unwrap_or(Path::new("."));
        parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ))
    }
}

/// Write `data` to `path`, owner read/write only on Unix.
fn write_private(path: &Path, data: &[u8]) -> Result<()> {
    fs::write(path, data)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }

    Ok(())
}
