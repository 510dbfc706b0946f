// file: src/hardening/mod.rs
// version: 1.1.0
// guid: 84c6f1e9-3b07-4d28-91a5-f6d20b83c7e4

//! Hardening pipeline
//!
//! Strictly sequential, fail-fast orchestration of the hardening steps. No
//! step is re-entered and nothing is rolled back on failure: every step is
//! idempotent, so a partial run is repaired by running the pipeline again.

pub mod accounts;
pub mod firewall;
pub mod jail;
pub mod packages;
pub mod ssh;
pub mod summary;
pub mod sysctl;
pub mod upgrades;

use crate::config::HardenConfig;
use crate::shell::LocalShell;
use crate::utils::SystemUtils;
use crate::Result;
use tracing::{info, warn};
use uuid::Uuid;

/// Number of host-mutating steps, used for progress logging
const MUTATION_STEPS: usize = 8;

/// Sequential hardening pipeline over a single host
pub struct HardeningPipeline {
    shell: LocalShell,
    config: HardenConfig,
    session_id: Uuid,
}

impl HardeningPipeline {
    /// Create a pipeline for the resolved configuration
    pub fn new(config: HardenConfig, dry_run: bool) -> Self {
        Self {
            shell: if dry_run {
                LocalShell::dry_run()
            } else {
                LocalShell::new()
            },
            config,
            session_id: Uuid::new_v4(),
        }
    }

    /// Verify run preconditions before any mutation
    ///
    /// Root privilege and the package manager are required; everything else
    /// is installed by the pipeline itself.
    fn preflight(&self) -> Result<()> {
        if self.shell.is_dry_run() {
            warn!("Dry run: commands are logged, the host is not modified");
            for tool in SystemUtils::check_prerequisites() {
                warn!("Missing host tool: {}", tool);
            }
            return Ok(());
        }

        if !SystemUtils::is_root() {
            return Err(crate::error::HardenError::Privilege(
                "This tool must run as root on the target host".to_string(),
            ));
        }

        let missing = SystemUtils::check_prerequisites();
        if !missing.is_empty() {
            return Err(crate::error::HardenError::Validation(format!(
                "Missing required host tools: {}",
                missing.join(", ")
            )));
        }

        Ok(())
    }

    /// Execute the full pipeline in strict order
    pub async fn run(&mut self) -> Result<()> {
        info!(
            "Starting hardening run {} for '{}' (SSH port {})",
            self.session_id, self.config.admin_user, self.config.ssh_port
        );
        self.preflight()?;

        self.step(1, "System update").await?;
        self.step(2, "Admin account").await?;
        self.step(3, "Root lockout").await?;
        self.step(4, "SSH daemon").await?;
        self.step(5, "Firewall").await?;
        self.step(6, "Brute-force jail").await?;
        self.step(7, "Unattended upgrades").await?;
        self.step(8, "Kernel parameters").await?;

        summary::print_summary(&self.config);
        info!("Hardening run {} completed", self.session_id);
        Ok(())
    }

    async fn step(&mut self, number: usize, name: &str) -> Result<()> {
        info!("[{}/{}] {}", number, MUTATION_STEPS, name);

        let result = match number {
            1 => packages::PackageUpdater::new(&mut self.shell).run().await,
            2 => {
                let mut provisioner =
                    accounts::AccountProvisioner::new(&mut self.shell, &self.config);
                match provisioner.ensure_admin_user().await {
                    Ok(()) => provisioner.install_ssh_key().await,
                    Err(e) => Err(e),
                }
            }
            3 => {
                accounts::AccountProvisioner::new(&mut self.shell, &self.config)
                    .lock_root()
                    .await
            }
            4 => ssh::SshHardener::new(&mut self.shell, &self.config).run().await,
            5 => {
                firewall::FirewallConfigurator::new(&mut self.shell, &self.config)
                    .run()
                    .await
            }
            6 => jail::JailConfigurator::new(&mut self.shell, &self.config).run().await,
            7 => upgrades::UpgradePolicy::new(&mut self.shell).run().await,
            8 => sysctl::KernelHardener::new(&mut self.shell).run().await,
            _ => unreachable!("step {number} not defined"),
        };

        result.map_err(|e| {
            tracing::error!(
                "Step [{}/{}] {} failed; aborting remaining steps. \
                 The host is safe to re-run after fixing the cause.",
                number,
                MUTATION_STEPS,
                name
            );
            e
        })
    }
}
