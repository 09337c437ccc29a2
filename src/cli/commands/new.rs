//! `ragasiya new` — create a vault with the default columns.

use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, prompt_new_password};
use crate::errors::Result;
use crate::vault::VaultStore;

/// Execute the `new` command.
pub fn execute(file: &str) -> Result<()> {
    let path = Path::new(file);
    let settings = load_settings()?;

    let mut store = VaultStore::create(path, settings.default_columns.iter().cloned())?;
    let password = prompt_new_password(&settings)?;
    store.save(password.as_bytes())?;

    output::success(&format!("Vault created at {}", path.display()));
    output::tip(&format!("Run `ragasiya add {file}` to add a row."));
    output::tip(&format!("Run `ragasiya show {file}` to see all rows."));

    Ok(())
}
