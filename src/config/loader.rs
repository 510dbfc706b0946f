// file: src/config/loader.rs
// version: 1.0.0
// guid: 9e47b3a0-5c82-4d16-af79-31e6d804c25b

//! Configuration file loading

use crate::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Partial configuration as read from an optional YAML file
///
/// Every field is optional; missing values fall through to interactive
/// prompts or defaults during resolution. The port is kept as a raw string
/// so out-of-range values fail through the same validation path as
/// environment input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub admin_user: Option<String>,
    pub ssh_public_key: Option<String>,
    pub ssh_port: Option<String>,
    pub allow_web_traffic: Option<String>,
}

/// Loader for the optional YAML configuration file
pub struct ConfigLoader;

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self
    }

    /// Load a partial hardening configuration from a YAML file
    pub fn load_file_config<P: AsRef<Path>>(&self, path: P) -> Result<FileConfig> {
        let content = fs::read_to_string(&path).map_err(|e| {
            crate::error::HardenError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: FileConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_full_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
admin_user: ops
ssh_public_key: "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAITest ops@host"
ssh_port: "2222"
allow_web_traffic: "no"
"#
        )
        .unwrap();

        let loader = ConfigLoader::new();
        let config = loader.load_file_config(file.path()).unwrap();

        assert_eq!(config.admin_user.as_deref(), Some("ops"));
        assert_eq!(config.ssh_port.as_deref(), Some("2222"));
        assert_eq!(config.allow_web_traffic.as_deref(), Some("no"));
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "admin_user: ops").unwrap();

        let loader = ConfigLoader::new();
        let config = loader.load_file_config(file.path()).unwrap();

        assert_eq!(config.admin_user.as_deref(), Some("ops"));
        assert!(config.ssh_port.is_none());
        assert!(config.ssh_public_key.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let loader = ConfigLoader::new();
        let result = loader.load_file_config("/nonexistent/harden.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "admin_user: [unterminated").unwrap();

        let loader = ConfigLoader::new();
        assert!(loader.load_file_config(file.path()).is_err());
    }
}
