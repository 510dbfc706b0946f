// file: src/cli/commands.rs
// version: 1.1.0
// guid: 48d2e9a1-7c56-4b03-9e84-f1a60d3c72b5

//! Command implementations for the CLI

use crate::{
    cli::args::OverrideArgs,
    config::{
        loader::FileConfig, resolver::stdin_is_interactive, ConfigLoader, DefaultSource,
        HardenConfig, InputSource, Overrides, PromptSource,
    },
    hardening::HardeningPipeline,
    utils::SystemUtils,
    Result,
};
use tracing::info;

/// Resolve configuration the way a harden run would
fn resolve_from_args(args: &OverrideArgs) -> Result<HardenConfig> {
    let overrides = Overrides {
        admin_user: args.admin_user.clone(),
        ssh_public_key: args.ssh_public_key.clone(),
        ssh_port: args.ssh_port.clone(),
        allow_web: args.allow_web.clone(),
    };

    let file: Option<FileConfig> = match &args.config {
        Some(path) => Some(ConfigLoader::new().load_file_config(path)?),
        None => None,
    };

    let mut prompt = PromptSource;
    let mut defaults = DefaultSource;
    let source: &mut dyn InputSource = if !args.non_interactive && stdin_is_interactive() {
        &mut prompt
    } else {
        &mut defaults
    };

    crate::config::resolve_config(&overrides, file.as_ref(), source)
}

/// Run the full hardening pipeline
pub async fn harden_command(args: &OverrideArgs, dry_run: bool) -> Result<()> {
    let config = resolve_from_args(args)?;
    let mut pipeline = HardeningPipeline::new(config, dry_run);
    pipeline.run().await
}

/// Check host prerequisites
pub async fn check_prerequisites_command() -> Result<()> {
    let missing = SystemUtils::check_prerequisites();

    if missing.is_empty() {
        info!("All required host tools are available");
        if !SystemUtils::is_root() {
            info!("Note: a real run must be executed as root");
        }
        return Ok(());
    }

    Err(crate::error::HardenError::Validation(format!(
        "Missing required host tools: {}",
        missing.join(", ")
    )))
}

/// Resolve and print the configuration without mutating the host
pub async fn show_config_command(args: &OverrideArgs, json_output: bool) -> Result<()> {
    let config = resolve_from_args(args)?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("admin_user:        {}", config.admin_user);
        println!(
            "ssh_public_key:    {}",
            config
                .ssh_public_key
                .as_deref()
                .unwrap_or("(none - key installation will be skipped)")
        );
        println!("ssh_port:          {}", config.ssh_port);
        println!(
            "allow_web_traffic: {}",
            if config.allow_web_traffic { "yes" } else { "no" }
        );
    }

    Ok(())
}
