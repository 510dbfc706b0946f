// file: src/cli/args.rs
// version: 1.0.0
// guid: 91f3b7c4-6e20-4a58-bd91-35c8f0d2a671

//! Command line argument definitions

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ubuntu-harden-agent")]
#[command(about = "Harden a fresh Ubuntu VPS in one privileged run")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the full hardening pipeline on this host
    Harden {
        #[command(flatten)]
        overrides: OverrideArgs,

        #[arg(long, help = "Show every command and file write without touching the host")]
        dry_run: bool,
    },

    /// Check host prerequisites without mutating anything
    CheckPrereqs,

    /// Resolve and print the configuration a harden run would use
    ShowConfig {
        #[command(flatten)]
        overrides: OverrideArgs,

        #[arg(short, long)]
        json: bool,
    },
}

/// Configuration overrides shared by `harden` and `show-config`
///
/// Port and web-traffic values are taken as raw strings so environment,
/// flag, and prompt input all pass through the same validation.
#[derive(Args, Clone, Default)]
pub struct OverrideArgs {
    #[arg(long, env = "HARDEN_ADMIN_USER", help = "Admin account to provision")]
    pub admin_user: Option<String>,

    #[arg(long, env = "HARDEN_SSH_PUBKEY", help = "SSH public key for the admin account")]
    pub ssh_public_key: Option<String>,

    #[arg(long, env = "HARDEN_SSH_PORT", help = "Port for the hardened SSH daemon (1-65535)")]
    pub ssh_port: Option<String>,

    #[arg(long, env = "HARDEN_ALLOW_WEB", help = "Allow web traffic on 80/443 (yes/no)")]
    pub allow_web: Option<String>,

    #[arg(short, long, help = "Optional YAML file with configuration values")]
    pub config: Option<String>,

    #[arg(long, help = "Never prompt; use overrides, file values, and defaults only")]
    pub non_interactive: bool,
}
