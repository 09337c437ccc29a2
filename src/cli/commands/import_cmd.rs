//! `ragasiya import` — encrypt a plaintext CSV file into a new vault.

use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, prompt_new_password};
use crate::errors::{Result, VaultError};
use crate::vault::VaultStore;

/// Execute the `import` command.
pub fn execute(source: &str, file: &str) -> Result<()> {
    let source = Path::new(source);
    let path = Path::new(file);

    if !source.exists() {
        return Err(VaultError::CommandFailed(format!(
            "import file not found: {}",
            source.display()
        )));
    }

    let settings = load_settings()?;
    let mut store = VaultStore::import_csv(path, source)?;
    let count = store.table().len();

    let password = prompt_new_password(&settings)?;
    store.save(password.as_bytes())?;

    output::success(&format!(
        "Imported {} rows from {} into {}",
        count,
        source.display(),
        path.display()
    ));
    output::warning(&format!(
        "{} is still unencrypted on disk — delete it if you no longer need it.",
        source.display()
    ));

    Ok(())
}
