//! Config module - Manages Backup Ledger configuration (backup-ledger.toml).
//!
//! Configuration file contains:
//! - AWS region and optional endpoint override
//! - Default vault name
//! - Output directory for exports

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main Backup Ledger configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Config version (for future migrations)
    #[serde(default = "default_version")]
    pub version: u32,

    /// AWS region of the backup vault
    #[serde(default = "default_region")]
    pub region: String,

    /// Vault exported when none is given on the command line
    #[serde(default)]
    pub vault_name: Option<String>,

    /// Directory receiving recovery_points.json
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Custom AWS Backup endpoint (LocalStack, VPC endpoint)
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

fn default_version() -> u32 {
    1
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            region: default_region(),
            vault_name: None,
            output_dir: default_output_dir(),
            endpoint_url: None,
        }
    }
}

/// Get default config directory (~/.config/backup-ledger/).
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("backup-ledger"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get default config file path.
pub fn default_config_path() -> PathBuf {
    default_config_dir().join("backup-ledger.toml")
}

impl Config {
    /// Create new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Cannot parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from default path, falling back to defaults when it does not exist.
    pub fn load_default() -> Result<Self> {
        let path = default_config_path();
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).with_context(|| "Cannot serialize config to TOML")?;

        std::fs::write(path, content)
            .with_context(|| format!("Cannot write config file: {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        Ok(())
    }

    /// Save config to default path.
    pub fn save_default(&self) -> Result<PathBuf> {
        let path = default_config_path();
        self.save(&path)?;
        Ok(path)
    }

    /// Path of the export file for this config.
    pub fn output_file(&self) -> PathBuf {
        self.output_dir.join(crate::exporter::OUTPUT_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.output_dir, PathBuf::from("./data"));
        assert!(config.vault_name.is_none());
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("test.toml");

        let mut config = Config::new();
        config.vault_name = Some("test-vault".to_string());
        config.region = "eu-west-1".to_string();
        config.save(&config_path)?;

        let loaded = Config::load(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(&config_path, "vault_name = \"prod-vault\"\n")?;

        let loaded = Config::load(&config_path)?;
        assert_eq!(loaded.vault_name.as_deref(), Some("prod-vault"));
        assert_eq!(loaded.region, "us-east-1");
        assert_eq!(loaded.output_file(), PathBuf::from("./data/recovery_points.json"));

        Ok(())
    }

    #[test]
    #[cfg(unix)]
    fn test_save_permissions() -> Result<()> {
        use std::os::unix::fs::PermissionsExt;
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("test_perms.toml");

        Config::new().save(&config_path)?;

        let mode = std::fs::metadata(&config_path)?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        Ok(())
    }
}
