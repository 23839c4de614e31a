//! Anypoint Platform API client implementation

use std::num::NonZeroU32;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, warn};
use reqwest::{Client as HttpClient, Response};
use serde::Deserialize;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::RwLock;

use super::api::{AuthApi, DownloadApi, DownloadReport, ExchangeApi};
use super::models::{AccessToken, Asset, AssetCoordinates, Credentials};
use super::pagination::OffsetParams;
use super::ErrorPolicy;
use crate::error::{ApiError, ConfigError, Result};

/// Anypoint Platform base URL
pub const API_BASE_URL: &str = "https://anypoint.mulesoft.com";

/// Default request timeout; downloads share it, so it is generous
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Write buffer size used when streaming downloads to disk
pub const DOWNLOAD_CHUNK_SIZE: usize = 8192;

/// Asset type filter for the catalog search
const REST_API_TYPE: &str = "rest-api";

type Throttle = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Connection settings for [`AnypointClient`]
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Base URL override (tests, private control planes)
    pub api_host: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Optional client-side request throttle
    pub requests_per_second: Option<NonZeroU32>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            api_host: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            requests_per_second: None,
        }
    }
}

/// Anypoint Platform API client
pub struct AnypointClient {
    http: HttpClient,
    base_url: String,
    throttle: Option<Arc<Throttle>>,
    token: Arc<RwLock<Option<AccessToken>>>,
}

impl AnypointClient {
    /// Create a client from explicit settings
    pub fn with_options(options: ClientOptions) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let base_url = options
            .api_host
            .as_deref()
            .unwrap_or(API_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let throttle = options
            .requests_per_second
            .map(|rps| Arc::new(RateLimiter::direct(Quota::per_second(rps))));

        Ok(Self {
            http,
            base_url,
            throttle,
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// The base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Use an already issued token for subsequent requests
    pub async fn set_token(&self, token: AccessToken) {
        *self.token.write().await = Some(token);
    }

    async fn wait_for_slot(&self) {
        if let Some(ref throttle) = self.throttle {
            throttle.until_ready().await;
        }
    }

    async fn bearer(&self) -> Result<String> {
        let state = self.token.read().await;
        state
            .as_ref()
            .map(|t| format!("Bearer {}", t.token))
            .ok_or_else(|| ApiError::Unauthorized.into())
    }

    /// Make an authenticated GET against the platform and decode the JSON body
    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let response = self.get(&format!("{}{}", self.base_url, path), query).await?;
        let response = check_status(response).await?;

        let data = response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
        })?;
        Ok(data)
    }

    /// Send an authenticated GET, returning the response whatever its status
    async fn get(&self, url: &str, query: &[(&'static str, String)]) -> Result<Response> {
        self.wait_for_slot().await;
        let bearer = self.bearer().await?;

        debug!("GET {}", url);
        // Download links are pre-signed; leave their query string untouched
        let mut request = self.http.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }

        let response = request
            .header("Authorization", bearer)
            .send()
            .await
            .map_err(ApiError::from)?;

        debug!("GET {} -> {}", url, response.status());
        Ok(response)
    }
}

/// Expiry `secs` from now; `None` when the server sends an out-of-range value
fn expiry_after(secs: i64) -> Option<DateTime<Utc>> {
    chrono::Duration::try_seconds(secs).and_then(|ttl| Utc::now().checked_add_signed(ttl))
}

/// Turn a non-success response into an [`ApiError`]
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();

    Err(ApiError::from_status(status, body, retry_after).into())
}

#[async_trait]
impl AuthApi for AnypointClient {
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken> {
        if credentials.client_id.is_empty() || credentials.client_secret.is_empty() {
            return Err(ConfigError::MissingCredentials.into());
        }

        self.wait_for_slot().await;

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            #[serde(default)]
            expires_in: Option<i64>,
        }

        let url = format!("{}/accounts/api/v2/oauth2/token", self.base_url);
        let body = serde_json::json!({
            "client_id": credentials.client_id,
            "client_secret": credentials.client_secret,
            "grant_type": "client_credentials",
        });

        debug!("POST {}", url);
        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let response = check_status(response).await?;
        let token: TokenResponse = response.json().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse token response: {}", e))
        })?;

        let access_token = AccessToken {
            token: token.access_token,
            expires_at: token.expires_in.and_then(expiry_after),
        };

        if let Some(expires_at) = access_token.expires_at {
            debug!("Access token expires at {}", expires_at.to_rfc3339());
        }

        self.set_token(access_token.clone()).await;
        Ok(access_token)
    }

    async fn get_organization_id(&self) -> Result<String> {
        #[derive(Deserialize)]
        struct Organization {
            id: String,
        }

        #[derive(Deserialize)]
        struct User {
            organization: Organization,
        }

        #[derive(Deserialize)]
        struct MeResponse {
            user: User,
        }

        let response: MeResponse = self.get_json("/accounts/api/me", &[]).await?;
        Ok(response.user.organization.id)
    }
}

#[async_trait]
impl ExchangeApi for AnypointClient {
    async fn list_assets_page(&self, org_id: &str, params: &OffsetParams) -> Result<Vec<Asset>> {
        let mut query = params.to_query_params();
        query.push(("types", REST_API_TYPE.to_string()));
        query.push(("organizationId", org_id.to_string()));

        let page: Option<Vec<serde_json::Value>> =
            self.get_json("/exchange/api/v2/assets", &query).await?;

        let assets = page
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Asset>(entry) {
                Ok(asset) => Some(asset),
                Err(e) => {
                    warn!("Skipping catalog entry at offset {}: {}", params.offset, e);
                    None
                }
            })
            .collect();
        Ok(assets)
    }

    async fn list_asset_files(
        &self,
        asset: &AssetCoordinates,
        policy: ErrorPolicy,
    ) -> Result<serde_json::Value> {
        let url = format!(
            "{}/exchange/api/v2/assets/{}/{}/{}/files",
            self.base_url, asset.group_id, asset.asset_id, asset.version
        );
        let response = self.get(&url, &[]).await?;

        match policy {
            ErrorPolicy::Strict => {
                let response = check_status(response).await?;
                let files = response.json().await.map_err(|e| {
                    ApiError::InvalidResponse(format!("Failed to parse file metadata: {}", e))
                })?;
                Ok(files)
            }
            ErrorPolicy::BestEffort => {
                let status = response.status();
                let text = response.text().await.map_err(ApiError::from)?;
                debug!("File metadata for {}: status {}, body {}", asset, status, text);
                Ok(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
            }
        }
    }
}

#[async_trait]
impl DownloadApi for AnypointClient {
    async fn download(
        &self,
        url: &str,
        output_path: &Path,
        policy: ErrorPolicy,
    ) -> Result<DownloadReport> {
        let response = self.get(url, &[]).await?;
        let status = response.status();

        let response = match policy {
            ErrorPolicy::Strict => check_status(response).await?,
            ErrorPolicy::BestEffort => {
                if !status.is_success() {
                    warn!(
                        "Download of {} returned {}; writing response body anyway",
                        output_path.display(),
                        status
                    );
                }
                response
            }
        };

        let file = tokio::fs::File::create(output_path).await?;
        let mut writer = BufWriter::with_capacity(DOWNLOAD_CHUNK_SIZE, file);
        let mut stream = response.bytes_stream();
        let mut bytes = 0u64;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(ApiError::from)?;
            writer.write_all(&chunk).await?;
            bytes += chunk.len() as u64;
        }
        writer.flush().await?;

        Ok(DownloadReport {
            status: status.as_u16(),
            bytes,
        })
    }
}
