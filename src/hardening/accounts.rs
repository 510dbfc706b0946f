// file: src/hardening/accounts.rs
// version: 1.1.0
// guid: 26e8a4d0-7f95-4c31-b8a2-90d3e5f17c84

//! Admin account provisioning and root lockout

use crate::config::{HardenConfig, ADMIN_GROUP, SSH_LOGIN_GROUP};
use crate::shell::LocalShell;
use crate::utils::files;
use crate::Result;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub struct AccountProvisioner<'a> {
    shell: &'a mut LocalShell,
    config: &'a HardenConfig,
}

impl<'a> AccountProvisioner<'a> {
    pub fn new(shell: &'a mut LocalShell, config: &'a HardenConfig) -> Self {
        Self { shell, config }
    }

    /// Resolve a home directory from `getent passwd` output, falling back to
    /// the conventional location when the probe returned nothing
    fn home_dir_from_passwd(probe_output: &str, user: &str) -> PathBuf {
        let home = probe_output.trim();
        if home.is_empty() {
            PathBuf::from(format!("/home/{}", user))
        } else {
            PathBuf::from(home)
        }
    }

    /// Ensure the admin account exists with admin and SSH-login membership
    ///
    /// An existing account is left untouched aside from group membership.
    pub async fn ensure_admin_user(&mut self) -> Result<()> {
        let user = &self.config.admin_user;
        info!("Provisioning admin account '{}'", user);

        let exists = self
            .shell
            .check_silent(&format!("id -u {} >/dev/null 2>&1", user))
            .await?;

        if exists {
            info!("Account '{}' already exists", user);
        } else {
            self.shell
                .log_and_run(
                    &format!("Creating account '{}'", user),
                    &format!("adduser --disabled-password --gecos '' {}", user),
                )
                .await?;
        }

        self.shell
            .log_and_run(
                &format!("Ensuring '{}' group exists", SSH_LOGIN_GROUP),
                &format!("groupadd -f {}", SSH_LOGIN_GROUP),
            )
            .await?;
        self.shell
            .log_and_run(
                &format!("Adding '{}' to {} and {}", user, ADMIN_GROUP, SSH_LOGIN_GROUP),
                &format!("usermod -aG {},{} {}", ADMIN_GROUP, SSH_LOGIN_GROUP, user),
            )
            .await?;

        Ok(())
    }

    /// Install the supplied SSH public key into the admin key store
    ///
    /// Idempotent: the exact key line is appended only when missing. With no
    /// key supplied the step is skipped with a warning and the run continues.
    pub async fn install_ssh_key(&mut self) -> Result<()> {
        let user = self.config.admin_user.clone();
        let key = match &self.config.ssh_public_key {
            Some(key) => key.clone(),
            None => {
                warn!(
                    "No SSH public key supplied; skipping key installation for '{}'. \
                     Password login is about to be disabled - install a key before disconnecting.",
                    user
                );
                return Ok(());
            }
        };

        let probe = self
            .shell
            .run_with_output(&format!("getent passwd {} | cut -d: -f6", user))
            .await?;
        let home = Self::home_dir_from_passwd(&probe, &user);
        let ssh_dir = home.join(".ssh");
        let key_file = ssh_dir.join("authorized_keys");

        if self.shell.is_dry_run() {
            info!("DRY RUN: would install key into {}", key_file.display());
            return Ok(());
        }

        self.ensure_ssh_dir(&ssh_dir)?;
        if files::append_line_once(&key_file, &key, 0o600)? {
            info!("Installed SSH key for '{}'", user);
        } else {
            info!("SSH key for '{}' already present", user);
        }

        self.shell
            .run(&format!("chown -R {0}:{0} {1}", user, ssh_dir.display()))
            .await?;

        Ok(())
    }

    #[cfg(unix)]
    fn ensure_ssh_dir(&self, ssh_dir: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(ssh_dir)?;
        std::fs::set_permissions(ssh_dir, std::fs::Permissions::from_mode(0o700))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn ensure_ssh_dir(&self, ssh_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(ssh_dir)?;
        Ok(())
    }

    /// Disable password authentication for root
    ///
    /// An already-locked root account is success, not an error.
    pub async fn lock_root(&mut self) -> Result<()> {
        let already_locked = self
            .shell
            .check_silent("passwd -S root | awk '{print $2}' | grep -q '^L'")
            .await?;

        if already_locked {
            info!("Root account already locked");
            return Ok(());
        }

        self.shell
            .log_and_run("Locking root account password", "passwd -l root")
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir_from_passwd_uses_probe_output() {
        let home = AccountProvisioner::home_dir_from_passwd("/srv/ops\n", "ops");
        assert_eq!(home, PathBuf::from("/srv/ops"));
    }

    #[test]
    fn test_home_dir_from_passwd_falls_back_when_empty() {
        let home = AccountProvisioner::home_dir_from_passwd("  \n", "ops");
        assert_eq!(home, PathBuf::from("/home/ops"));
    }

    #[tokio::test]
    async fn test_missing_key_is_warning_not_error() {
        let config = HardenConfig {
            admin_user: "ops".to_string(),
            ssh_public_key: None,
            ssh_port: 22,
            allow_web_traffic: true,
        };
        let mut shell = LocalShell::dry_run();
        let mut provisioner = AccountProvisioner::new(&mut shell, &config);
        assert!(provisioner.install_ssh_key().await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_provisioning_touches_nothing() {
        let config = HardenConfig {
            admin_user: "ops".to_string(),
            ssh_public_key: Some("ssh-ed25519 AAAAC3Key ops@host".to_string()),
            ssh_port: 2222,
            allow_web_traffic: false,
        };
        let mut shell = LocalShell::dry_run();
        let mut provisioner = AccountProvisioner::new(&mut shell, &config);
        assert!(provisioner.ensure_admin_user().await.is_ok());
        assert!(provisioner.install_ssh_key().await.is_ok());
        assert!(provisioner.lock_root().await.is_ok());
    }
}
