//! Command execution context
//!
//! Provides a unified context for command execution, eliminating boilerplate
//! for config loading, override handling and client initialization.

use std::num::NonZeroU32;
use std::time::Duration;

use log::{debug, info};

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::models::{AccessToken, Credentials};
use crate::client::{AnypointClient, AuthApi, ClientOptions};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
///
/// The client is not authenticated yet; commands call
/// [`CommandContext::authenticate`] (or hand the credentials to the exporter)
/// once they are about to talk to the platform.
pub struct CommandContext {
    /// Loaded configuration with CLI and environment overrides applied
    pub config: Config,
    /// API client built from the configured host, timeout and throttle
    pub client: AnypointClient,
    /// Output format preference
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, apply overrides, validate it and build the client.
    ///
    /// # Errors
    /// Returns error if an explicitly given config file cannot be loaded or
    /// the merged settings are invalid.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_or_default_at(opts.config_ref())?;
        opts.apply_to(&mut config);
        config.validate()?;

        let client = AnypointClient::with_options(client_options(&config))?;
        debug!("Using control plane {}", client.base_url());

        Ok(Self {
            config,
            client,
            format: opts.format,
        })
    }

    /// Client credentials, or an error naming how to configure them.
    pub fn credentials(&self) -> Result<Credentials> {
        self.config.credentials()
    }

    /// Obtain a token for the configured credentials.
    pub async fn authenticate(&self) -> Result<AccessToken> {
        let credentials = self.credentials()?;
        self.client.authenticate(&credentials).await
    }

    /// Configured organization, resolved from the token identity otherwise.
    ///
    /// Call after [`CommandContext::authenticate`].
    pub async fn org_id(&self) -> Result<String> {
        match self.config.org_id {
            Some(ref id) => Ok(id.clone()),
            None => {
                let id = self.client.get_organization_id().await?;
                info!("Resolved organization {} from token identity", id);
                Ok(id)
            }
        }
    }
}

/// Client settings derived from the config
pub fn client_options(config: &Config) -> ClientOptions {
    ClientOptions {
        api_host: config.api_host.clone(),
        timeout: Duration::from_secs(config.export.request_timeout_secs),
        requests_per_second: config.export.requests_per_second.and_then(NonZeroU32::new),
    }
}
