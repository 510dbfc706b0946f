// file: src/hardening/firewall.rs
// version: 1.0.0
// guid: e58b1d36-0c79-4a42-bf15-d8a2c7e09361

//! Firewall reset and configuration (ufw)

use crate::config::HardenConfig;
use crate::shell::LocalShell;
use crate::Result;
use tracing::info;

pub struct FirewallConfigurator<'a> {
    shell: &'a mut LocalShell,
    config: &'a HardenConfig,
}

impl<'a> FirewallConfigurator<'a> {
    pub fn new(shell: &'a mut LocalShell, config: &'a HardenConfig) -> Self {
        Self { shell, config }
    }

    /// Build the ordered rule commands issued after the reset
    ///
    /// The SSH rate limit must precede `enable`, otherwise enforcement could
    /// briefly start with the port unfiltered.
    pub fn build_rule_commands(port: u16, allow_web: bool) -> Vec<String> {
        let mut commands = vec![
            "ufw default deny incoming".to_string(),
            "ufw default allow outgoing".to_string(),
            format!("ufw limit {}/tcp", port),
        ];
        if allow_web {
            commands.push("ufw allow 80/tcp".to_string());
            commands.push("ufw allow 443/tcp".to_string());
        }
        commands.push("ufw logging on".to_string());
        commands.push("ufw --force enable".to_string());
        commands
    }

    /// Reset prior firewall state, then configure and enable enforcement
    pub async fn run(&mut self) -> Result<()> {
        info!("Configuring firewall");

        // Disable and reset tolerate "nothing to reset" on a fresh host.
        let _ = self.shell.check_silent("ufw --force disable").await?;
        let _ = self.shell.check_silent("ufw --force reset").await?;

        for command in Self::build_rule_commands(self.config.ssh_port, self.config.allow_web_traffic)
        {
            self.shell.log_and_run(&command, &command).await?;
        }

        info!(
            "Firewall enabled: deny inbound, allow outbound, SSH {} rate-limited{}",
            self.config.ssh_port,
            if self.config.allow_web_traffic {
                ", web ports open"
            } else {
                ""
            }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_precedes_enable() {
        let commands = FirewallConfigurator::build_rule_commands(2222, false);
        let limit_pos = commands
            .iter()
            .position(|c| c == "ufw limit 2222/tcp")
            .expect("rate limit rule missing");
        let enable_pos = commands
            .iter()
            .position(|c| c == "ufw --force enable")
            .expect("enable missing");
        assert!(limit_pos < enable_pos);
    }

    #[test]
    fn test_default_posture() {
        let commands = FirewallConfigurator::build_rule_commands(22, false);
        assert_eq!(commands[0], "ufw default deny incoming");
        assert_eq!(commands[1], "ufw default allow outgoing");
    }

    #[test]
    fn test_web_ports_present_when_allowed() {
        let commands = FirewallConfigurator::build_rule_commands(22, true);
        assert!(commands.iter().any(|c| c == "ufw allow 80/tcp"));
        assert!(commands.iter().any(|c| c == "ufw allow 443/tcp"));
    }

    #[test]
    fn test_web_ports_absent_when_denied() {
        let commands = FirewallConfigurator::build_rule_commands(22, false);
        assert!(!commands.iter().any(|c| c.contains("80/tcp")));
        assert!(!commands.iter().any(|c| c.contains("443/tcp")));
    }

    #[test]
    fn test_logging_enabled() {
        let commands = FirewallConfigurator::build_rule_commands(22, true);
        assert!(commands.iter().any(|c| c == "ufw logging on"));
    }

    #[tokio::test]
    async fn test_dry_run_executes_nothing() {
        let config = HardenConfig {
            admin_user: "ops".to_string(),
            ssh_public_key: None,
            ssh_port: 2222,
            allow_web_traffic: true,
        };
        let mut shell = LocalShell::dry_run();
        let mut firewall = FirewallConfigurator::new(&mut shell, &config);
        assert!(firewall.run().await.is_ok());
    }
}
