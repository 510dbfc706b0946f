// file: src/config/resolver.rs
// version: 1.0.0
// guid: 1c83f6d9-7a24-4b0e-92c5-64f8a1e0d37c

//! Configuration resolution
//!
//! Merges operator overrides (CLI flags / environment), the optional config
//! file, and an input source into the final [`HardenConfig`]. The input
//! source is an interactive prompt adapter when attached to a terminal and a
//! static defaults adapter when unattended.

use super::loader::FileConfig;
use super::{
    normalize_ssh_key, normalize_username, parse_port, parse_yes_no, HardenConfig,
    DEFAULT_ADMIN_USER, DEFAULT_SSH_PORT,
};
use crate::Result;
use crossterm::tty::IsTty;
use std::io::Write;
use tracing::debug;

/// Operator-supplied overrides from CLI flags or environment variables
///
/// Port and web-traffic values stay raw strings so every input path funnels
/// through the same parsers.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub admin_user: Option<String>,
    pub ssh_public_key: Option<String>,
    pub ssh_port: Option<String>,
    pub allow_web: Option<String>,
}

/// Source for configuration values not covered by overrides or a file
pub trait InputSource {
    /// Ask for a value; `None` means "use the default"
    fn read_value(&mut self, prompt: &str, default: &str) -> Result<Option<String>>;
}

/// Interactive prompt adapter for first-run provisioning on a terminal
pub struct PromptSource;

impl InputSource for PromptSource {
    fn read_value(&mut self, prompt: &str, default: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        if default.is_empty() {
            write!(stdout, "{}: ", prompt)?;
        } else {
            write!(stdout, "{} [{}]: ", prompt, default)?;
        }
        stdout.flush()?;

        let mut line = String::new();
        std::io::stdin().read_line(&mut line)?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }
}

/// Static adapter for unattended runs; every value falls back to its default
pub struct DefaultSource;

impl InputSource for DefaultSource {
    fn read_value(&mut self, _prompt: &str, _default: &str) -> Result<Option<String>> {
        Ok(None)
    }
}

/// Whether an operator is attached to answer prompts
pub fn stdin_is_interactive() -> bool {
    std::io::stdin().is_tty()
}

/// Resolve the full configuration record
///
/// Precedence per field: override, then config file, then the input source,
/// then the fixed default. Validation failures abort before any host
/// mutation.
pub fn resolve_config(
    overrides: &Overrides,
    file: Option<&FileConfig>,
    source: &mut dyn InputSource,
) -> Result<HardenConfig> {
    let admin_raw = resolve_field(
        overrides.admin_user.as_deref(),
        file.and_then(|f| f.admin_user.as_deref()),
        source,
        "Admin username",
        DEFAULT_ADMIN_USER,
    )?;

    let key_raw = resolve_optional_field(
        overrides.ssh_public_key.as_deref(),
        file.and_then(|f| f.ssh_public_key.as_deref()),
        source,
        "SSH public key for the admin account (blank to skip)",
    )?;

    let port_raw = resolve_field(
        overrides.ssh_port.as_deref(),
        file.and_then(|f| f.ssh_port.as_deref()),
        source,
        "SSH port",
        &DEFAULT_SSH_PORT.to_string(),
    )?;

    let web_raw = resolve_field(
        overrides.allow_web.as_deref(),
        file.and_then(|f| f.allow_web_traffic.as_deref()),
        source,
        "Allow web traffic (80/443)",
        "yes",
    )?;

    let config = HardenConfig {
        admin_user: normalize_username(&admin_raw),
        ssh_public_key: normalize_ssh_key(key_raw.as_deref()),
        ssh_port: parse_port(&port_raw)?,
        allow_web_traffic: parse_yes_no(&web_raw)?,
    };

    config.validate()?;
    debug!(
        "Resolved configuration: user={} port={} web={}",
        config.admin_user, config.ssh_port, config.allow_web_traffic
    );

    Ok(config)
}

fn resolve_field(
    override_value: Option<&str>,
    file_value: Option<&str>,
    source: &mut dyn InputSource,
    prompt: &str,
    default: &str,
) -> Result<String> {
    if let Some(value) = override_value {
        return Ok(value.to_string());
    }
    if let Some(value) = file_value {
        return Ok(value.to_string());
    }
    Ok(source
        .read_value(prompt, default)?
        .unwrap_or_else(|| default.to_string()))
}

fn resolve_optional_field(
    override_value: Option<&str>,
    file_value: Option<&str>,
    source: &mut dyn InputSource,
    prompt: &str,
) -> Result<Option<String>> {
    if override_value.is_some() {
        return Ok(override_value.map(str::to_string));
    }
    if file_value.is_some() {
        return Ok(file_value.map(str::to_string));
    }
    source.read_value(prompt, "")
}
