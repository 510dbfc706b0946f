// file: src/hardening/jail.rs
// version: 1.0.0
// guid: 09f4c7b2-6e81-4d5a-a3c8-17b0d9e2f648

//! Brute-force jail configuration (fail2ban)

use crate::config::HardenConfig;
use crate::shell::LocalShell;
use crate::utils::files;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Jail fragment fully owned by this tool; overwritten on every run
pub const JAIL_FRAGMENT_PATH: &str = "/etc/fail2ban/jail.d/sshd-hardening.local";

/// Failed attempts before a ban
pub const JAIL_MAX_RETRY: u32 = 5;
/// Window in which the attempts are counted, seconds
pub const JAIL_FIND_TIME_SECS: u32 = 600;
/// Ban duration, seconds
pub const JAIL_BAN_TIME_SECS: u32 = 3600;

pub struct JailConfigurator<'a> {
    shell: &'a mut LocalShell,
    config: &'a HardenConfig,
}

impl<'a> JailConfigurator<'a> {
    pub fn new(shell: &'a mut LocalShell, config: &'a HardenConfig) -> Self {
        Self { shell, config }
    }

    /// Render the sshd jail definition scoped to the configured port
    pub fn render_fragment(port: u16) -> String {
        files::with_marker(
            "#",
            &format!(
                "[sshd]\n\
                 enabled = true\n\
                 port = {port}\n\
                 maxretry = {retry}\n\
                 findtime = {find}\n\
                 bantime = {ban}\n\
                 ignoreip = 127.0.0.1/8 ::1\n",
                port = port,
                retry = JAIL_MAX_RETRY,
                find = JAIL_FIND_TIME_SECS,
                ban = JAIL_BAN_TIME_SECS,
            ),
        )
    }

    /// Write the jail fragment and activate the jail service
    ///
    /// Enabled for boot persistence and restarted so the policy applies now.
    pub async fn run(&mut self) -> Result<()> {
        info!("Configuring brute-force jail (port {})", self.config.ssh_port);

        let fragment = Self::render_fragment(self.config.ssh_port);
        if self.shell.is_dry_run() {
            info!("DRY RUN: would write {}", JAIL_FRAGMENT_PATH);
        } else {
            files::write_fragment(Path::new(JAIL_FRAGMENT_PATH), &fragment, 0o644)?;
        }

        self.shell
            .log_and_run("Enabling fail2ban at boot", "systemctl enable fail2ban")
            .await?;
        self.shell
            .log_and_run("Restarting fail2ban", "systemctl restart fail2ban")
            .await?;

        Ok(())
    }
}
