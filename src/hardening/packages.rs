// file: src/hardening/packages.rs
// version: 1.0.0
// guid: d19c5e72-8b40-4f3a-96d1-e04a7c28b355

//! System package refresh and prerequisite installation

use crate::shell::LocalShell;
use crate::Result;
use tracing::info;

/// Tools the later steps drive; installed up front so a missing package can
/// never fail the run halfway through
pub const PREREQUISITE_PACKAGES: &[&str] = &[
    "ufw",
    "fail2ban",
    "unattended-upgrades",
    "openssh-server",
    "ca-certificates",
];

pub struct PackageUpdater<'a> {
    shell: &'a mut LocalShell,
}

impl<'a> PackageUpdater<'a> {
    pub fn new(shell: &'a mut LocalShell) -> Self {
        Self { shell }
    }

    /// Build the noninteractive install command for the prerequisite set
    fn build_install_command(packages: &[&str]) -> String {
        format!(
            "DEBIAN_FRONTEND=noninteractive apt-get install -y {}",
            packages.join(" ")
        )
    }

    /// Refresh the package index, upgrade, install prerequisites, autoremove
    ///
    /// Fatal on any failure: a broken base system makes the remaining
    /// hardening meaningless.
    pub async fn run(&mut self) -> Result<()> {
        info!("Updating system packages");

        self.shell
            .log_and_run("Refreshing package index", "apt-get update")
            .await?;
        self.shell
            .log_and_run(
                "Upgrading installed packages",
                "DEBIAN_FRONTEND=noninteractive apt-get dist-upgrade -y",
            )
            .await?;
        self.shell
            .log_and_run(
                "Installing hardening prerequisites",
                &Self::build_install_command(PREREQUISITE_PACKAGES),
            )
            .await?;
        self.shell
            .log_and_run("Removing unused packages", "apt-get autoremove -y")
            .await?;

        info!("System update completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_command_is_noninteractive() {
        let cmd = PackageUpdater::build_install_command(PREREQUISITE_PACKAGES);
        assert!(cmd.starts_with("DEBIAN_FRONTEND=noninteractive"));
        assert!(cmd.contains("install -y"));
    }

    #[test]
    fn test_install_command_lists_all_prerequisites() {
        let cmd = PackageUpdater::build_install_command(PREREQUISITE_PACKAGES);
        for pkg in PREREQUISITE_PACKAGES {
            assert!(cmd.contains(pkg), "missing package {pkg}");
        }
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        let mut shell = LocalShell::dry_run();
        let mut updater = PackageUpdater::new(&mut shell);
        assert!(updater.run().await.is_ok());
    }
}
