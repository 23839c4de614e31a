//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

pub mod args;
pub mod assets;
pub mod completion;
pub mod context;
pub mod export;
pub mod init;
pub mod org;
pub mod status;

pub use args::{ExportArgs, OutputFormat};
pub use context::CommandContext;

/// exchange-export - Download REST API specifications from Anypoint Exchange
#[derive(Parser, Debug)]
#[command(name = "exchange-export")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(
        long,
        global = true,
        env = "EXCHANGE_EXPORT_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Organization (business group) ID to export
    #[arg(long, global = true, env = "EXCHANGE_EXPORT_ORG_ID", hide_env = true)]
    pub org: Option<String>,

    /// Override config file location
    #[arg(long, global = true, env = "EXCHANGE_EXPORT_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Connected-app client id
    #[arg(
        long,
        global = true,
        env = "EXCHANGE_EXPORT_CLIENT_ID",
        hide_env = true
    )]
    pub client_id: Option<String>,

    /// Connected-app client secret
    #[arg(
        long,
        global = true,
        env = "EXCHANGE_EXPORT_CLIENT_SECRET",
        hide_env = true,
        hide_env_values = true
    )]
    pub client_secret: Option<String>,

    /// Override the Anypoint control plane URL
    #[arg(long, global = true, env = "EXCHANGE_EXPORT_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "EXCHANGE_EXPORT_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download every REST API specification file of the organization
    #[command(after_help = "EXAMPLES:\n  \
        exchange-export export                      # Stop at the first failure\n  \
        exchange-export export --best-effort        # Log failures and keep going\n  \
        exchange-export export -o specs --inspect   # Custom directory, log file metadata")]
    Export(ExportArgs),

    /// Browse the organization's REST API assets
    #[command(subcommand)]
    Assets(AssetsCommands),

    /// Show the organization of the configured credentials
    Org,

    /// Initialize exchange-export configuration
    Init,

    /// Show configuration status
    Status,

    /// Generate shell completions
    #[command(after_help = "\
  bash:   exchange-export completion bash > /etc/bash_completion.d/exchange-export
  zsh:    exchange-export completion zsh > \"${fpath[1]}/_exchange-export\"
  fish:   exchange-export completion fish > ~/.config/fish/completions/exchange-export.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Asset subcommands
#[derive(Subcommand, Debug)]
pub enum AssetsCommands {
    /// List REST API assets with their file classifiers
    List,

    /// Show the raw file metadata of one asset version
    Files {
        /// Group (business group) ID
        group_id: String,

        /// Asset ID
        asset_id: String,

        /// Asset version
        version: String,
    },
}
