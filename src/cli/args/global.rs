//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; [`GlobalOptions::apply_to`] layers it over
/// the loaded config file.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format (table, json)
    pub format: OutputFormat,

    /// Organization ID override
    pub org: Option<String>,

    /// Custom config file path (defaults to ~/.exchange-export/config.yaml)
    pub config: Option<String>,

    /// Connected-app client id override
    pub client_id: Option<String>,

    /// Connected-app client secret override
    pub client_secret: Option<String>,

    /// Custom control plane URL
    pub api_host: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            org: cli.org.clone(),
            config: cli.config.clone(),
            client_id: cli.client_id.clone(),
            client_secret: cli.client_secret.clone(),
            api_host: cli.api_host.clone(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Override config values with the ones given on the command line.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(ref org) = self.org {
            config.org_id = Some(org.clone());
        }
        if let Some(ref id) = self.client_id {
            config.client_id = Some(id.clone());
        }
        if let Some(ref secret) = self.client_secret {
            config.client_secret = Some(secret.clone());
        }
        if let Some(ref host) = self.api_host {
            config.api_host = Some(host.clone());
        }
    }
}
