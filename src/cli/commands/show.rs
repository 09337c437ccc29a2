//! `ragasiya show` — decrypt a vault and print its rows.

use std::path::Path;

use crate::cli::output;
use crate::cli::{load_settings, open_vault};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(file: &str, filter: Option<&str>) -> Result<()> {
    let settings = load_settings()?;
    let (store, _password) = open_vault(Path::new(file), &settings)?;
    let table = store.table();

    output::info(&format!("{file} — {} row(s)", table.len()));

    let needle = filter.unwrap_or("");
    output::print_vault_table(
        table.header(),
        table.filter(needle).map(|(index, _, cells)| (index, cells)),
    );

    Ok(())
}
