// file: src/utils/system.rs
// version: 1.0.0
// guid: 4d7e92c1-3a58-4f0b-86e7-b2c490d1a563

//! System utility functions

use tracing::debug;

/// Host tools the pipeline drives; missing ones abort before any mutation
pub const REQUIRED_COMMANDS: &[&str] = &["apt-get", "systemctl", "passwd", "usermod"];

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Check if a command exists in PATH
    pub fn command_exists(command: &str) -> bool {
        which::which(command).is_ok()
    }

    /// Check if running as root
    pub fn is_root() -> bool {
        #[cfg(unix)]
        {
            unsafe { libc::geteuid() == 0 }
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    /// Check host prerequisites for a hardening run
    ///
    /// Returns the list of missing commands. Firewall and jail tools are not
    /// checked here since the package step installs them.
    pub fn check_prerequisites() -> Vec<String> {
        let mut missing = Vec::new();

        for cmd in REQUIRED_COMMANDS {
            if !Self::command_exists(cmd) {
                missing.push(cmd.to_string());
            } else {
                debug!("Found required command: {}", cmd);
            }
        }

        missing
    }
}
