use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "transcoding-api")]
#[command(author, version, about = "Submit and track jobs on cloud transcoding services")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List registered providers
    Providers,

    /// Show what a provider accepts and produces
    Capabilities {
        /// Provider name
        provider: String,
    },

    /// Check a provider is reachable with the current configuration
    Healthcheck {
        /// Provider name
        provider: String,
    },

    /// Submit a transcoding job
    Transcode {
        /// Provider name
        provider: String,

        /// JSON transcode profile (source media, preset maps, streaming params)
        #[arg(long, required = true)]
        profile: PathBuf,

        /// Job ID (generated when omitted)
        #[arg(long)]
        job_id: Option<String>,
    },

    /// Query the status of a provider job
    Status {
        /// Provider name
        provider: String,

        /// Job ID returned by the provider
        job_id: String,
    },

    /// Create a provider preset from a canonical JSON preset
    CreatePreset {
        /// Provider name
        provider: String,

        /// JSON preset file
        #[arg(long, required = true)]
        preset: PathBuf,
    },

    /// Fetch a provider preset as the vendor stores it
    GetPreset {
        /// Provider name
        provider: String,

        /// Native preset ID
        id: String,
    },

    /// Delete a provider preset
    DeletePreset {
        /// Provider name
        provider: String,

        /// Native preset ID
        id: String,
    },

    /// Validate configuration file and report which providers it enables
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },
}
