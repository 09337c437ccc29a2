//! `ragasiya add` — append a row to a vault.

use std::path::Path;

use dialoguer::Input;

use crate::cli::output;
use crate::cli::{load_settings, open_vault};
use crate::errors::{Result, VaultError};

/// Execute the `add` command.
pub fn execute(file: &str, values: &[String]) -> Result<()> {
    let settings = load_settings()?;
    let (mut store, password) = open_vault(Path::new(file), &settings)?;

    let cells = if values.is_empty() {
        prompt_cells(store.table().header())?
    } else {
        values.to_vec()
    };

    let index = store.table_mut().add_row(cells)?;
    store.save(password.as_bytes())?;

    output::success(&format!("Added row {} to {file}", index + 1));
    Ok(())
}

/// Ask for one value per column; empty answers are allowed.
fn prompt_cells(header: &[String]) -> Result<Vec<String>> {
    header
        .iter()
        .map(|column| {
            Input::<String>::new()
                .with_prompt(column)
                .allow_empty(true)
                .interact_text()
                .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))
        })
        .collect()
}
