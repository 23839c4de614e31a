//! Mock Anypoint API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::StatusCode;
use tokio::sync::Mutex;

use super::ErrorPolicy;
use super::api::{AuthApi, DownloadApi, DownloadReport, ExchangeApi};
use super::models::{AccessToken, Asset, AssetCoordinates, Credentials};
use super::pagination::OffsetParams;
use crate::error::{ApiError, Result};

/// API operations that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockCall {
    Authenticate,
    GetOrganizationId,
    ListAssetsPage,
    ListAssetFiles,
    Download,
}

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockAnypointClient::new()
///     .with_asset_pages(vec![vec![asset("orders", &["raml"])]])
///     .await;
///
/// let assets = mock.list_rest_apis("org", PageLimits::default()).await?;
/// assert_eq!(assets.len(), 1);
/// ```
pub struct MockAnypointClient {
    /// Pages served by list_assets_page, indexed by offset / limit
    asset_pages: Arc<Mutex<Vec<Vec<Asset>>>>,
    /// Page served for every offset, ignoring asset_pages
    endless_page: Arc<Mutex<Option<Vec<Asset>>>>,
    /// Organization returned by get_organization_id
    org_id: Arc<Mutex<String>>,
    /// Body returned by list_asset_files
    file_metadata: Arc<Mutex<serde_json::Value>>,
    /// Download links answering with a non-success status
    failing_links: Arc<Mutex<HashMap<String, StatusCode>>>,
    /// Errors to return, consumed on first use of the matching call
    errors: Arc<Mutex<HashMap<MockCall, ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Offsets requested from list_assets_page
    page_requests: Arc<Mutex<Vec<OffsetParams>>>,
    /// Downloads performed, in order
    downloads: Arc<Mutex<Vec<CapturedDownload>>>,
}

impl Default for MockAnypointClient {
    fn default() -> Self {
        Self {
            asset_pages: Arc::new(Mutex::new(Vec::new())),
            endless_page: Arc::new(Mutex::new(None)),
            org_id: Arc::new(Mutex::new("mock-org".to_string())),
            file_metadata: Arc::new(Mutex::new(serde_json::json!([]))),
            failing_links: Arc::new(Mutex::new(HashMap::new())),
            errors: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
            page_requests: Arc::new(Mutex::new(Vec::new())),
            downloads: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub authenticate: usize,
    pub get_organization_id: usize,
    pub list_assets_page: usize,
    pub list_asset_files: usize,
    pub download: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.authenticate
            + self.get_organization_id
            + self.list_assets_page
            + self.list_asset_files
            + self.download
    }
}

/// A download performed through the mock
#[derive(Debug, Clone)]
pub struct CapturedDownload {
    pub url: String,
    pub path: PathBuf,
    pub policy: ErrorPolicy,
}

impl MockAnypointClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure catalog pages; requests past the last page get an empty page.
    pub async fn with_asset_pages(self, pages: Vec<Vec<Asset>>) -> Self {
        *self.asset_pages.lock().await = pages;
        self
    }

    /// Serve the same non-empty page at every offset.
    pub async fn with_endless_page(self, page: Vec<Asset>) -> Self {
        *self.endless_page.lock().await = Some(page);
        self
    }

    /// Configure the organization resolved from the token identity.
    pub async fn with_org_id(self, org_id: &str) -> Self {
        *self.org_id.lock().await = org_id.to_string();
        self
    }

    /// Configure the body returned by list_asset_files.
    pub async fn with_file_metadata(self, value: serde_json::Value) -> Self {
        *self.file_metadata.lock().await = value;
        self
    }

    /// Make a download link answer with the given status.
    pub async fn with_failing_link(self, url: &str, status: StatusCode) -> Self {
        self.failing_links
            .lock()
            .await
            .insert(url.to_string(), status);
        self
    }

    /// Configure an error for the next call of the given kind.
    pub async fn with_error(self, call: MockCall, error: ApiError) -> Self {
        self.errors.lock().await.insert(call, error);
        self
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Offsets requested from the catalog, in order.
    pub async fn page_requests(&self) -> Vec<OffsetParams> {
        self.page_requests.lock().await.clone()
    }

    /// Downloads performed, in order.
    pub async fn downloads(&self) -> Vec<CapturedDownload> {
        self.downloads.lock().await.clone()
    }

    /// Count the call and return its configured error, if any.
    async fn record(&self, call: MockCall) -> Result<()> {
        {
            let mut counts = self.call_count.lock().await;
            match call {
                MockCall::Authenticate => counts.authenticate += 1,
                MockCall::GetOrganizationId => counts.get_organization_id += 1,
                MockCall::ListAssetsPage => counts.list_assets_page += 1,
                MockCall::ListAssetFiles => counts.list_asset_files += 1,
                MockCall::Download => counts.download += 1,
            }
        }

        match self.errors.lock().await.remove(&call) {
            Some(error) => Err(error.into()),
            None => Ok(()),
        }
    }
}

/// Body the mock writes for a successful download of `url`
pub fn mock_file_body(url: &str) -> String {
    format!("contents of {}", url)
}

#[async_trait]
impl AuthApi for MockAnypointClient {
    async fn authenticate(&self, _credentials: &Credentials) -> Result<AccessToken> {
        self.record(MockCall::Authenticate).await?;

        Ok(AccessToken {
            token: "mock-access-token".to_string(),
            expires_at: Some(chrono::Utc::now() + chrono::Duration::hours(1)),
        })
    }

    async fn get_organization_id(&self) -> Result<String> {
        self.record(MockCall::GetOrganizationId).await?;
        Ok(self.org_id.lock().await.clone())
    }
}

#[async_trait]
impl ExchangeApi for MockAnypointClient {
    async fn list_assets_page(&self, _org_id: &str, params: &OffsetParams) -> Result<Vec<Asset>> {
        self.page_requests.lock().await.push(*params);
        self.record(MockCall::ListAssetsPage).await?;

        if let Some(ref page) = *self.endless_page.lock().await {
            return Ok(page.clone());
        }

        let page_idx = params.offset / params.limit.max(1);
        Ok(self
            .asset_pages
            .lock()
            .await
            .get(page_idx)
            .cloned()
            .unwrap_or_default())
    }

    async fn list_asset_files(
        &self,
        _asset: &AssetCoordinates,
        _policy: ErrorPolicy,
    ) -> Result<serde_json::Value> {
        self.record(MockCall::ListAssetFiles).await?;
        Ok(self.file_metadata.lock().await.clone())
    }
}

#[async_trait]
impl DownloadApi for MockAnypointClient {
    async fn download(
        &self,
        url: &str,
        output_path: &Path,
        policy: ErrorPolicy,
    ) -> Result<DownloadReport> {
        self.record(MockCall::Download).await?;

        let failure = self.failing_links.lock().await.get(url).copied();
        let (status, body) = match failure {
            Some(status) if policy == ErrorPolicy::Strict => {
                return Err(ApiError::from_status(status, String::new(), None).into());
            }
            Some(status) => (status, format!("error {}", status.as_u16())),
            None => (StatusCode::OK, mock_file_body(url)),
        };

        tokio::fs::write(output_path, body.as_bytes()).await?;
        self.downloads.lock().await.push(CapturedDownload {
            url: url.to_string(),
            path: output_path.to_path_buf(),
            policy,
        });

        Ok(DownloadReport {
            status: status.as_u16(),
            bytes: body.len() as u64,
        })
    }
}
