// file: src/hardening/summary.rs
// version: 1.0.0
// guid: 6e30d8f2-b1a7-4c94-85d0-4f29c6b81e03

//! End-of-run summary reporting
//!
//! Formats already-known configuration values; this step has no failure
//! mode of its own.

use crate::config::{HardenConfig, ADMIN_GROUP, SSH_LOGIN_GROUP};
use crate::hardening::jail::{JAIL_BAN_TIME_SECS, JAIL_FIND_TIME_SECS, JAIL_MAX_RETRY};
use crate::hardening::upgrades::REBOOT_TIME;
use colored::Colorize;

/// Render the summary lines for the completed run
pub fn render_lines(config: &HardenConfig) -> Vec<String> {
    let mut lines = vec![
        format!(
            "SSH: port {} - key-only auth, root login disabled. Verify login NOW: ssh -p {} {}@<host>",
            config.ssh_port, config.ssh_port, config.admin_user
        ),
        format!(
            "Admin account: {} (groups: {}, {})",
            config.admin_user, ADMIN_GROUP, SSH_LOGIN_GROUP
        ),
    ];

    match &config.ssh_public_key {
        Some(_) => lines.push(format!("SSH key: installed for {}", config.admin_user)),
        None => lines.push(
            "SSH key: NOT installed - password login is disabled, install a key before disconnecting"
                .to_string(),
        ),
    }

    lines.push(format!(
        "Firewall: deny inbound / allow outbound, SSH {}/tcp rate-limited, web traffic {}",
        config.ssh_port,
        if config.allow_web_traffic {
            "allowed (80/443 open)"
        } else {
            "blocked"
        }
    ));
    lines.push(format!(
        "Brute-force jail: active on port {} ({} failures in {}s bans for {}s)",
        config.ssh_port, JAIL_MAX_RETRY, JAIL_FIND_TIME_SECS, JAIL_BAN_TIME_SECS
    ));
    lines.push(format!(
        "Unattended upgrades: enabled, reboot at {} only when required",
        REBOOT_TIME
    ));
    lines.push("Kernel: forwarding/redirects/source-routing off, martian logging on".to_string());

    lines
}

/// Print the colored summary to stdout
pub fn print_summary(config: &HardenConfig) {
    let finished = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    println!();
    println!("{}", "Hardening completed".green().bold());
    println!("{}", format!("Finished at {}", finished).dimmed());
    println!("{}", "-".repeat(72));
    for line in render_lines(config) {
        if line.contains("NOT installed") {
            println!("  {}", line.yellow());
        } else {
            println!("  {}", line);
        }
    }
    println!("{}", "-".repeat(72));
}
