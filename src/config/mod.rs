// file: src/config/mod.rs
// version: 1.0.0
// guid: 5d20c8f4-1e7b-4a9d-8c36-b95e02d7f118

//! Configuration module for the hardening agent
//!
//! Holds the single configuration record consumed by every pipeline step,
//! plus the parsing and validation rules for operator-supplied values.

pub mod loader;
pub mod resolver;

pub use loader::ConfigLoader;
pub use resolver::{resolve_config, DefaultSource, InputSource, Overrides, PromptSource};

use serde::{Deserialize, Serialize};

/// Default admin account name when nothing is supplied
pub const DEFAULT_ADMIN_USER: &str = "deploy";
/// Default SSH port when nothing is supplied
pub const DEFAULT_SSH_PORT: u16 = 22;
/// Supplementary group gating SSH logins alongside `sudo`
pub const SSH_LOGIN_GROUP: &str = "sshusers";
/// Administrative group for the provisioned account
pub const ADMIN_GROUP: &str = "sudo";

/// Configuration record for a hardening run
///
/// Constructed once during resolution and never mutated after the pipeline
/// begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardenConfig {
    /// Admin account to provision (normalized to lowercase)
    pub admin_user: String,
    /// SSH public key installed for the admin account; `None` skips key
    /// installation with a warning
    pub ssh_public_key: Option<String>,
    /// Port the hardened SSH daemon listens on
    pub ssh_port: u16,
    /// Whether ports 80/443 are opened in the firewall
    pub allow_web_traffic: bool,
}

impl HardenConfig {
    /// Validate the resolved configuration
    ///
    /// Any failure here is fatal and happens before a single host mutation.
    pub fn validate(&self) -> crate::Result<()> {
        if self.admin_user.is_empty() {
            return Err(crate::error::HardenError::Validation(
                "Admin username cannot be empty".to_string(),
            ));
        }

        if !is_valid_username(&self.admin_user) {
            return Err(crate::error::HardenError::Validation(format!(
                "Invalid admin username: {}",
                self.admin_user
            )));
        }

        if self.ssh_port == 0 {
            return Err(crate::error::HardenError::Validation(
                "SSH port must be between 1 and 65535".to_string(),
            ));
        }

        Ok(())
    }
}

/// Check a username against the conservative useradd charset
fn is_valid_username(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

/// Parse an SSH port from operator input
///
/// Accepts exactly the integers 1..=65535; anything else is a fatal
/// configuration error.
pub fn parse_port(input: &str) -> crate::Result<u16> {
    let trimmed = input.trim();
    let value: u32 = trimmed.parse().map_err(|_| {
        crate::error::HardenError::Validation(format!("SSH port is not a number: {}", trimmed))
    })?;

    if !(1..=65535).contains(&value) {
        return Err(crate::error::HardenError::Validation(format!(
            "SSH port out of range (1-65535): {}",
            value
        )));
    }

    Ok(value as u16)
}

/// Parse a yes/no token, case-insensitive
pub fn parse_yes_no(input: &str) -> crate::Result<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Ok(true),
        "no" | "n" | "false" | "0" => Ok(false),
        other => Err(crate::error::HardenError::Validation(format!(
            "Expected yes or no, got: {}",
            other
        ))),
    }
}

/// Normalize an operator-supplied username
pub fn normalize_username(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

/// Normalize an operator-supplied SSH public key; blank input means no key
pub fn normalize_ssh_key(input: Option<&str>) -> Option<String> {
    match input {
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> HardenConfig {
        HardenConfig {
            admin_user: "ops".to_string(),
            ssh_public_key: Some("ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAITest ops@host".to_string()),
            ssh_port: 2222,
            allow_web_traffic: false,
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_validate_empty_user() {
        let mut c = valid_config();
        c.admin_user = String::new();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_bad_username_charset() {
        let mut c = valid_config();
        c.admin_user = "Ops Admin".to_string();
        assert!(c.validate().is_err());

        c.admin_user = "1leading".to_string();
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_validate_zero_port() {
        let mut c = valid_config();
        c.ssh_port = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn test_parse_port_accepts_full_range() {
        assert_eq!(parse_port("1").unwrap(), 1);
        assert_eq!(parse_port("22").unwrap(), 22);
        assert_eq!(parse_port(" 2222 ").unwrap(), 2222);
        assert_eq!(parse_port("65535").unwrap(), 65535);
    }

    #[test]
    fn test_parse_port_rejects_out_of_range() {
        assert!(parse_port("0").is_err());
        assert!(parse_port("65536").is_err());
        assert!(parse_port("70000").is_err());
    }

    #[test]
    fn test_parse_port_rejects_non_numeric() {
        assert!(parse_port("").is_err());
        assert!(parse_port("ssh").is_err());
        assert!(parse_port("-22").is_err());
        assert!(parse_port("22.5").is_err());
    }

    #[test]
    fn test_parse_yes_no() {
        assert!(parse_yes_no("yes").unwrap());
        assert!(parse_yes_no("Y").unwrap());
        assert!(parse_yes_no("TRUE").unwrap());
        assert!(!parse_yes_no("no").unwrap());
        assert!(!parse_yes_no("N").unwrap());
        assert!(!parse_yes_no("0").unwrap());
        assert!(parse_yes_no("maybe").is_err());
    }

    #[test]
    fn test_normalize_username() {
        assert_eq!(normalize_username(" Deploy "), "deploy");
        assert_eq!(normalize_username("OPS"), "ops");
    }

    #[test]
    fn test_normalize_ssh_key_blank_is_none() {
        assert_eq!(normalize_ssh_key(None), None);
        assert_eq!(normalize_ssh_key(Some("   ")), None);
        assert_eq!(
            normalize_ssh_key(Some(" ssh-rsa AAAA ")),
            Some("ssh-rsa AAAA".to_string())
        );
    }
}
