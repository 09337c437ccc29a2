//! `ragasiya edit` — change one cell.

use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, open_vault, row_index};
use crate::errors::Result;

/// Execute the `edit` command.
pub fn execute(file: &str, row: usize, column: &str, value: &str) -> Result<()> {
    let settings = load_settings()?;
    let (mut store, password) = open_vault(Path::new(file), &settings)?;

    let index = row_index(store.table(), row)?;
    let col = store.table().column_index(column)?;

    if !store.table_mut().set_cell(index, col, value)? {
        output::info("Value unchanged — nothing to save.");
        return Ok(());
    }

    store.save(password.as_bytes())?;
    output::success(&format!("Updated '{column}' in row {row}"));
    Ok(())
}
