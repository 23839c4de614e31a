//! Configuration management for exchange-export

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::client::anypoint::DEFAULT_TIMEOUT_SECS;
use crate::client::models::Credentials;
use crate::client::pagination::{DEFAULT_MAX_PAGES, DEFAULT_PAGE_SIZE};
use crate::error::{ConfigError, Result};
use crate::export::DEFAULT_OUTPUT_DIR;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Connected-app client id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Connected-app client secret
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,

    /// Organization to export; resolved from the token identity when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,

    /// Control plane base URL override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_host: Option<String>,

    /// Export run settings
    #[serde(default)]
    pub export: ExportSettings,
}

/// Settings for export runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory downloads are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Assets requested per catalog page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Catalog pages fetched before giving up
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Log and continue on file-metadata and download failures
    #[serde(default)]
    pub best_effort: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Client-side request throttle (unlimited when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests_per_second: Option<u32>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_max_pages() -> usize {
    DEFAULT_MAX_PAGES
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            page_size: default_page_size(),
            max_pages: default_max_pages(),
            best_effort: false,
            request_timeout_secs: default_request_timeout_secs(),
            requests_per_second: None,
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".exchange-export").join("config.yaml"))
    }

    /// Resolve an explicit path, falling back to the default location
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Load configuration from an explicit path, or the default location
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        Self::load_from(Self::resolve_path(path)?)
    }

    /// Like [`Config::load_at`], but a missing default file yields defaults.
    ///
    /// An explicitly requested file must exist.
    pub fn load_or_default_at(path: Option<&str>) -> Result<Self> {
        let resolved = Self::resolve_path(path)?;
        if path.is_none() && !resolved.exists() {
            return Ok(Self::default());
        }
        Self::load_from(resolved)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        // The file holds a client secret
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&path, perms)?;
        }

        Ok(())
    }

    /// Save configuration to an explicit path, or the default location
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Whether both halves of the client credentials are set
    pub fn has_credentials(&self) -> bool {
        matches!(
            (self.client_id.as_deref(), self.client_secret.as_deref()),
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty()
        )
    }

    /// Client credentials, or an error naming how to configure them
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.client_id, &self.client_secret) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => {
                Ok(Credentials::new(id.clone(), secret.clone()))
            }
            _ => Err(ConfigError::MissingCredentials.into()),
        }
    }

    /// Check settings that would otherwise fail deep inside a run
    pub fn validate(&self) -> Result<()> {
        if self.export.page_size == 0 {
            return Err(ConfigError::Invalid("export.page_size must be at least 1".to_string()).into());
        }
        if self.export.max_pages == 0 {
            return Err(ConfigError::Invalid("export.max_pages must be at least 1".to_string()).into());
        }
        if self.export.requests_per_second == Some(0) {
            return Err(ConfigError::Invalid(
                "export.requests_per_second must be at least 1 when set".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
