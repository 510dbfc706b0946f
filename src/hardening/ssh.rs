// file: src/hardening/ssh.rs
// version: 1.1.0
// guid: 73a0f2c8-5d64-4e19-8b37-c1f9e6a04d52

//! SSH daemon hardening
//!
//! Highest-risk step of the run: a broken daemon config can cut off all
//! remote access. The fragment is syntax-checked with `sshd -t` before the
//! service is restarted (restarted, not reloaded, so the settings apply
//! deterministically at the cost of a brief interruption).

use crate::config::{HardenConfig, ADMIN_GROUP, SSH_LOGIN_GROUP};
use crate::shell::LocalShell;
use crate::utils::files;
use crate::Result;
use std::path::Path;
use tracing::{error, info};

/// Fragment fully owned by this tool; overwritten on every run
pub const SSHD_FRAGMENT_PATH: &str = "/etc/ssh/sshd_config.d/99-hardening.conf";

pub struct SshHardener<'a> {
    shell: &'a mut LocalShell,
    config: &'a HardenConfig,
}

impl<'a> SshHardener<'a> {
    pub fn new(shell: &'a mut LocalShell, config: &'a HardenConfig) -> Self {
        Self { shell, config }
    }

    /// Render the hardened sshd configuration fragment
    pub fn render_fragment(port: u16) -> String {
        files::with_marker(
            "#",
            &format!(
                "Port {port}\n\
                 PermitRootLogin no\n\
                 PasswordAuthentication no\n\
                 KbdInteractiveAuthentication no\n\
                 ChallengeResponseAuthentication no\n\
                 PubkeyAuthentication yes\n\
                 AuthenticationMethods publickey\n\
                 AllowGroups {admin} {login}\n\
                 MaxAuthTries 3\n\
                 LoginGraceTime 20\n\
                 ClientAliveInterval 300\n\
                 ClientAliveCountMax 2\n\
                 X11Forwarding no\n",
                port = port,
                admin = ADMIN_GROUP,
                login = SSH_LOGIN_GROUP,
            ),
        )
    }

    /// Write the fragment, validate the daemon config, restart the service
    pub async fn run(&mut self) -> Result<()> {
        let port = self.config.ssh_port;
        info!("Hardening SSH daemon (port {})", port);

        let fragment = Self::render_fragment(port);
        if self.shell.is_dry_run() {
            info!("DRY RUN: would write {}", SSHD_FRAGMENT_PATH);
        } else {
            files::write_fragment(Path::new(SSHD_FRAGMENT_PATH), &fragment, 0o644)?;
        }

        // A fragment that fails the syntax check must never reach a restart.
        self.shell
            .log_and_run("Validating sshd configuration", "sshd -t")
            .await
            .map_err(|e| {
                error!("sshd rejected the hardened configuration; daemon left untouched");
                e
            })?;

        self.shell
            .log_and_run("Restarting SSH daemon", "systemctl restart ssh")
            .await
            .map_err(|e| {
                error!(
                    "SSH daemon restart FAILED - remote access may be at risk. \
                     Keep this session open and verify login on port {} before disconnecting.",
                    port
                );
                e
            })?;

        info!("SSH daemon hardened; verify login on port {} before disconnecting", port);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_contains_port() {
        let fragment = SshHardener::render_fragment(2222);
        assert!(fragment.contains("Port 2222"));
    }

    #[test]
    fn test_fragment_never_permits_root_or_password_login() {
        for port in [1, 22, 2222, 65535] {
            let fragment = SshHardener::render_fragment(port);
            assert!(fragment.contains("PermitRootLogin no"));
            assert!(fragment.contains("PasswordAuthentication no"));
            assert!(fragment.contains("KbdInteractiveAuthentication no"));
            assert!(fragment.contains("ChallengeResponseAuthentication no"));
            assert!(fragment.contains("PubkeyAuthentication yes"));
        }
    }

    #[test]
    fn test_fragment_restricts_login_groups() {
        let fragment = SshHardener::render_fragment(22);
        assert!(fragment.contains("AllowGroups sudo sshusers"));
    }

    #[test]
    fn test_fragment_bounds_auth_attempts_and_grace() {
        let fragment = SshHardener::render_fragment(22);
        assert!(fragment.contains("MaxAuthTries 3"));
        assert!(fragment.contains("LoginGraceTime 20"));
        assert!(fragment.contains("ClientAliveInterval 300"));
        assert!(fragment.contains("ClientAliveCountMax 2"));
    }

    #[test]
    fn test_fragment_is_marked_as_owned() {
        let fragment = SshHardener::render_fragment(22);
        assert!(fragment.starts_with("# Managed by ubuntu-harden-agent"));
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let config = HardenConfig {
            admin_user: "ops".to_string(),
            ssh_public_key: None,
            ssh_port: 2222,
            allow_web_traffic: true,
        };
        let mut shell = LocalShell::dry_run();
        let mut hardener = SshHardener::new(&mut shell, &config);
        assert!(hardener.run().await.is_ok());
    }
}
