//! Project configuration loaded from `.ragasiya.toml`.

pub mod settings;

pub use settings::Settings;
