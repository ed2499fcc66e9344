mod cli;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::{de::DeserializeOwned, Serialize};
use transcoding_api::config::{self, Config};
use transcoding_api::provider::{Provider, ProviderRegistry};
use transcoding_common::{Job, Preset, TranscodeProfile};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "transcoding_api=trace".to_string()
        } else {
            "transcoding_api=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = ProviderRegistry::with_defaults();

    match cli.command {
        Commands::Providers => {
            for name in registry.names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(&registry, path.as_deref())
        }
        command => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run(&registry, &config, command))
        }
    }
}

async fn run(registry: &ProviderRegistry, config: &Config, command: Commands) -> Result<()> {
    let build = |name: &str| -> Result<Arc<dyn Provider>> {
        registry
            .build(name, config)
            .with_context(|| format!("Failed to set up provider {name:?}"))
    };

    match command {
        Commands::Capabilities { provider } => print_json(&build(&provider)?.capabilities()),
        Commands::Healthcheck { provider } => {
            build(&provider)?.healthcheck().await?;
            println!("{provider}: ok");
            Ok(())
        }
        Commands::Transcode {
            provider,
            profile,
            job_id,
        } => {
            let profile: TranscodeProfile = read_json(&profile)?;
            let job = job_id.map(Job::new).unwrap_or_else(Job::generate);
            tracing::info!(job_id = %job.id, provider = %provider, "Submitting transcoding job");
            let status = build(&provider)?.transcode(&job, &profile).await?;
            print_json(&status)
        }
        Commands::Status { provider, job_id } => {
            print_json(&build(&provider)?.job_status(&job_id).await?)
        }
        Commands::CreatePreset { provider, preset } => {
            let preset: Preset = read_json(&preset)?;
            let id = build(&provider)?.create_preset(&preset).await?;
            println!("{id}");
            Ok(())
        }
        Commands::GetPreset { provider, id } => print_json(&build(&provider)?.get_preset(&id).await?),
        Commands::DeletePreset { provider, id } => {
            build(&provider)?.delete_preset(&id).await?;
            println!("deleted {id}");
            Ok(())
        }
        Commands::Providers | Commands::Validate { .. } => Ok(()),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn validate_config(registry: &ProviderRegistry, path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults and environment");
            config::load_config_or_default(None)?
        }
    };

    for name in registry.names() {
        match registry.build(name, &config) {
            Ok(_) => println!("✓ {name}"),
            Err(e) => println!("✗ {name}: {e}"),
        }
    }

    Ok(())
}
