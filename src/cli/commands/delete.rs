//! `ragasiya delete` — remove a row from the vault.

use std::path::Path;

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{load_settings, open_vault, row_index};
use crate::errors::{Result, VaultError};

/// Execute the `delete` command.
pub fn execute(file: &str, row: usize, force: bool) -> Result<()> {
    let settings = load_settings()?;
    let (mut store, password) = open_vault(Path::new(file), &settings)?;

    let index = row_index(store.table(), row)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let label = store.table().row(index)?.first().cloned().unwrap_or_default();
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete row {row} ('{label}')?"))
            .default(false)
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.table_mut().delete_row(index)?;
    store.save(password.as_bytes())?;

    output::success(&format!("Deleted row {row}"));
    Ok(())
}
