//! Vault module — encrypted credential table storage.
//!
//! This module provides:
//! - Per-cell row encoding (`codec`)
//! - The salt-header + CSV vault file format (`format`)
//! - The editable table with per-row state (`table`)
//! - High-level `VaultStore` for creating, opening, and saving vaults (`store`)

pub mod codec;
pub mod format;
pub mod store;
pub mod table;

// Re-export the most commonly used items.
pub use codec::{decode_row, encode_row};
pub use format::{decode_table, encode_table};
pub use store::VaultStore;
pub use table::{RowState, VaultTable};
