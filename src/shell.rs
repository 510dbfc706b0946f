// file: src/shell.rs
// version: 1.0.0
// guid: 8a5d2c70-4f16-4e8b-a9d3-c027b6541e99

//! Local privileged command execution

use crate::Result;
use tokio::process::Command;
use tracing::{debug, error, info};

/// Local shell executor for host mutation commands
///
/// All pipeline steps funnel through this type so dry-run mode can log every
/// command instead of executing it.
pub struct LocalShell {
    dry_run: bool,
}

impl LocalShell {
    /// Create a new shell executor
    pub fn new() -> Self {
        Self { dry_run: false }
    }

    /// Create a shell executor that logs commands without running them
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }

    /// Whether this shell is in dry-run mode
    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Execute a command, failing on non-zero exit
    pub async fn run(&mut self, command: &str) -> Result<()> {
        if self.dry_run {
            info!("DRY RUN: {}", command);
            return Ok(());
        }
        debug!("Executing: {}", command);

        let output = Command::new("bash")
            .arg("-c")
            .arg(command)
            .output()
            .await
            .map_err(|e| crate::error::HardenError::Process {
                command: command.to_string(),
                exit_code: None,
                stderr: format!("Failed to execute command: {}", e),
            })?;

        if !output.status.success() {
            let exit_code = output.status.code();
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);

            error!("Command failed with exit code {:?}: {}", exit_code, command);
            if !stdout.trim().is_empty() {
                error!("STDOUT: {}", stdout);
            }
            if !stderr.trim().is_empty() {
                error!("STDERR: {}", stderr);
            }

            return Err(crate::error::HardenError::Process {
                command: command.to_string(),
                exit_code,
                stderr: if stderr.trim().is_empty() {
                    stdout.to_string()
                } else {
                    stderr.to_string()
                },
            });
        }

        Ok(())
    }

    /// Execute a command and return captured stdout
    pub async fn run_with_output(&mut self, command: &str) -> Result<String> {
        if self.dry_run {
            info!("DRY RUN: {}", command);
            return Ok(String::new());
        }
        debug!("Executing with output: {}", command);

        let output = Command::new("bash")
            .arg("-c")
            .arg(command)
            .output()
            .await
            .map_err(|e| crate::error::HardenError::Process {
                command: command.to_string(),
                exit_code: None,
                stderr: format!("Failed to execute command: {}", e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        if !output.status.success() {
            let exit_code = output.status.code();
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("Command failed with exit code {:?}: {}", exit_code, command);

            return Err(crate::error::HardenError::Process {
                command: command.to_string(),
                exit_code,
                stderr: if stderr.trim().is_empty() {
                    stdout
                } else {
                    stderr.to_string()
                },
            });
        }

        Ok(stdout)
    }

    /// Run a command intended as a boolean probe without emitting error logs
    ///
    /// Used for benign already-in-desired-state checks (account exists, root
    /// already locked) that must not surface as failures.
    pub async fn check_silent(&mut self, command: &str) -> Result<bool> {
        if self.dry_run {
            info!("DRY RUN (probe): {}", command);
            return Ok(false);
        }

        let output = Command::new("bash")
            .arg("-c")
            .arg(command)
            .output()
            .await
            .map_err(|e| crate::error::HardenError::Process {
                command: command.to_string(),
                exit_code: None,
                stderr: format!("Failed to execute command: {}", e),
            })?;

        Ok(output.status.success())
    }

    /// Log a step description and execute the command
    pub async fn log_and_run(&mut self, description: &str, command: &str) -> Result<()> {
        info!("{}", description);
        self.run(command).await
    }
}

impl Default for LocalShell {
    fn default() -> Self {
        Self::new()
    }
}
