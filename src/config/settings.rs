use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, VaultError};

/// User-level configuration, loaded from `.ragasiya.toml`.
///
/// Every field has a sensible default so Ragasiya works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Column names for a vault created with `ragasiya new`.
    #[serde(default = "default_columns")]
    pub default_columns: Vec<String>,

    /// How many wrong passwords `open` tolerates before giving up.
    #[serde(default = "default_max_password_attempts")]
    pub max_password_attempts: u32,

    /// Refuse weak passwords instead of asking for confirmation.
    #[serde(default)]
    pub enforce_password_policy: bool,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_columns() -> Vec<String> {
    ["AccountName", "Username", "Password", "Comments"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_password_attempts() -> u32 {
    5
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_columns: default_columns(),
            max_password_attempts: default_max_password_attempts(),
            enforce_password_policy: false,
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the working directory.
    const FILE_NAME: &'static str = ".ragasiya.toml";

    /// Load settings from `<dir>/.ragasiya.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed or is invalid, an error is
    /// returned.
    pub fn load(dir: &Path) -> Result<Self> {
        let config_path = dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.max_password_attempts < 1 {
            return Err(VaultError::ConfigError(
                "max_password_attempts must be at least 1".into(),
            ));
        }
        if self.default_columns.is_empty() {
            return Err(VaultError::ConfigError(
                "default_columns must name at least one column".into(),
            ));
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_are_sensible() {
        let s = Settings::default();
        assert_eq!(
            s.default_columns,
            ["AccountName", "Username", "Password", "Comments"]
        );
        assert_eq!(s.max_password_attempts, 5);
        assert!(!s.enforce_password_policy);
    }

    #[test]
    fn load_returns_defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.max_password_attempts, 5);
    }

    #[test]
    fn load_parses_toml_file() {
        let tmp = TempDir::new().unwrap();
        let config = r#"
default_columns = ["Site", "Login", "Secret"]
max_password_attempts = 3
enforce_password_policy = true
"#;
        fs::write(tmp.path().join(".ragasiya.toml"), config).unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.default_columns, ["Site", "Login", "Secret"]);
        assert_eq!(settings.max_password_attempts, 3);
        assert!(settings.enforce_password_policy);
    }

    #[test]
    fn load_uses_defaults_for_missing_fields() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ragasiya.toml"), "max_password_attempts = 2\n").unwrap();

        let settings = Settings::load(tmp.path()).unwrap();
        assert_eq!(settings.max_password_attempts, 2);
        assert_eq!(settings.default_columns.len(), 4);
    }

    #[test]
    fn load_errors_on_invalid_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ragasiya.toml"), "not valid {{toml").unwrap();
        assert!(Settings::load(tmp.path()).is_err());
    }

    #[test]
    fn load_rejects_zero_attempts() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".ragasiya.toml"), "max_password_attempts = 0\n").unwrap();
        assert!(matches!(
            Settings::load(tmp.path()),
            Err(VaultError::ConfigError(_))
        ));
    }
}
