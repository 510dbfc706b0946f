// file: src/hardening/sysctl.rs
// version: 1.0.0
// guid: c47e91a5-2d08-4b63-9f1e-80b5d3c6a297

//! Kernel network parameter hardening

use crate::shell::LocalShell;
use crate::utils::files;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Kernel parameter fragment; applied to the persisted file and live state
pub const SYSCTL_FRAGMENT_PATH: &str = "/etc/sysctl.d/99-hardening.conf";

/// Parameters applied by the kernel hardening step
pub const KERNEL_PARAMETERS: &[(&str, &str)] = &[
    ("net.ipv4.ip_forward", "0"),
    ("net.ipv4.conf.all.accept_redirects", "0"),
    ("net.ipv4.conf.default.accept_redirects", "0"),
    ("net.ipv6.conf.all.accept_redirects", "0"),
    ("net.ipv6.conf.default.accept_redirects", "0"),
    ("net.ipv4.conf.all.accept_source_route", "0"),
    ("net.ipv4.conf.default.accept_source_route", "0"),
    ("net.ipv6.conf.all.accept_source_route", "0"),
    ("net.ipv6.conf.default.accept_source_route", "0"),
    ("net.ipv4.conf.all.log_martians", "1"),
    ("net.ipv4.conf.default.log_martians", "1"),
    ("kernel.kptr_restrict", "2"),
    ("kernel.dmesg_restrict", "1"),
];

pub struct KernelHardener<'a> {
    shell: &'a mut LocalShell,
}

impl<'a> KernelHardener<'a> {
    pub fn new(shell: &'a mut LocalShell) -> Self {
        Self { shell }
    }

    /// Render the sysctl fragment
    pub fn render_fragment() -> String {
        let body: String = KERNEL_PARAMETERS
            .iter()
            .map(|(key, value)| format!("{} = {}\n", key, value))
            .collect();
        files::with_marker("#", &body)
    }

    /// Persist the parameters and apply them to the live kernel
    pub async fn run(&mut self) -> Result<()> {
        info!("Hardening kernel network parameters");

        if self.shell.is_dry_run() {
            info!("DRY RUN: would write {}", SYSCTL_FRAGMENT_PATH);
        } else {
            files::write_fragment(
                Path::new(SYSCTL_FRAGMENT_PATH),
                &Self::render_fragment(),
                0o644,
            )?;
        }

        self.shell
            .log_and_run(
                "Applying kernel parameters",
                &format!("sysctl -p {}", SYSCTL_FRAGMENT_PATH),
            )
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_disables_forwarding_and_redirects() {
        let fragment = KernelHardener::render_fragment();
        assert!(fragment.contains("net.ipv4.ip_forward = 0"));
        assert!(fragment.contains("net.ipv4.conf.all.accept_redirects = 0"));
        assert!(fragment.contains("net.ipv6.conf.all.accept_redirects = 0"));
        assert!(fragment.contains("net.ipv4.conf.all.accept_source_route = 0"));
        assert!(fragment.contains("net.ipv6.conf.default.accept_source_route = 0"));
    }

    #[test]
    fn test_fragment_logs_martians() {
        let fragment = KernelHardener::render_fragment();
        assert!(fragment.contains("net.ipv4.conf.all.log_martians = 1"));
        assert!(fragment.contains("net.ipv4.conf.default.log_martians = 1"));
    }

    #[test]
    fn test_fragment_restricts_kernel_exposure() {
        let fragment = KernelHardener::render_fragment();
        assert!(fragment.contains("kernel.kptr_restrict = 2"));
        assert!(fragment.contains("kernel.dmesg_restrict = 1"));
    }

    #[test]
    fn test_fragment_lists_every_parameter() {
        let fragment = KernelHardener::render_fragment();
        for (key, value) in KERNEL_PARAMETERS {
            assert!(fragment.contains(&format!("{} = {}", key, value)));
        }
    }

    #[tokio::test]
    async fn test_dry_run_writes_nothing() {
        let mut shell = LocalShell::dry_run();
        let mut kernel = KernelHardener::new(&mut shell);
        assert!(kernel.run().await.is_ok());
    }
}
