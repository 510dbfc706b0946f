// file: src/hardening/upgrades.rs
// version: 1.0.0
// guid: 5b2d0f81-94c6-4e73-a0d9-368e1c57b2af

//! Unattended security upgrade enablement

use crate::shell::LocalShell;
use crate::utils::files;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Periodic schedule fragment (list refresh + daily unattended upgrade)
pub const PERIODIC_FRAGMENT_PATH: &str = "/etc/apt/apt.conf.d/20auto-upgrades";
/// Reboot and cleanup policy fragment
pub const POLICY_FRAGMENT_PATH: &str = "/etc/apt/apt.conf.d/52unattended-upgrades-hardening";

/// Off-peak reboot slot, applied only when an update requires a reboot
pub const REBOOT_TIME: &str = "03:45";

pub struct UpgradePolicy<'a> {
    shell: &'a mut LocalShell,
}

impl<'a> UpgradePolicy<'a> {
    pub fn new(shell: &'a mut LocalShell) -> Self {
        Self { shell }
    }

    /// Render the daily schedule fragment
    pub fn render_periodic_fragment() -> String {
        files::with_marker(
            "//",
            "APT::Periodic::Update-Package-Lists \"1\";\n\
             APT::Periodic::Unattended-Upgrade \"1\";\n",
        )
    }

    /// Render the cleanup and reboot policy fragment
    pub fn render_policy_fragment() -> String {
        files::with_marker(
            "//",
            &format!(
                "APT::Periodic::AutocleanInterval \"7\";\n\
                 Unattended-Upgrade::Remove-Unused-Dependencies \"true\";\n\
                 Unattended-Upgrade::Automatic-Reboot \"true\";\n\
                 Unattended-Upgrade::Automatic-Reboot-Time \"{}\";\n",
                REBOOT_TIME
            ),
        )
    }

    /// Write both fragments and start the service immediately
    pub async fn run(&mut self) -> Result<()> {
        info!("Enabling unattended security upgrades");

        if self.shell.is_dry_run() {
            info!("DRY RUN: would write {}", PERIODIC_FRAGMENT_PATH);
            info!("DRY RUN: would write {}", POLICY_FRAGMENT_PATH);
        } else {
            files::write_fragment(
                Path::new(PERIODIC_FRAGMENT_PATH),
                &Self::render_periodic_fragment(),
                0o644,
            )?;
            files::write_fragment(
                Path::new(POLICY_FRAGMENT_PATH),
                &Self::render_policy_fragment(),
                0o644,
            )?;
        }

        self.shell
            .log_and_run(
                "Enabling unattended-upgrades at boot",
                "systemctl enable unattended-upgrades",
            )
            .await?;
        self.shell
            .log_and_run(
                "Starting unattended-upgrades now",
                "systemctl restart unattended-upgrades",
            )
            .await?;

        Ok(())
    }
}
