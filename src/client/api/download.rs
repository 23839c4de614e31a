//! Download API trait

use std::path::Path;

use async_trait::async_trait;

use crate::client::ErrorPolicy;
use crate::error::Result;

/// Outcome of a completed transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadReport {
    /// HTTP status of the download response
    pub status: u16,
    /// Bytes written to disk
    pub bytes: u64,
}

impl DownloadReport {
    /// Whether the body written is the requested file rather than an error payload
    pub fn is_complete(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// File download operations
#[async_trait]
pub trait DownloadApi: Send + Sync {
    /// Stream `url` into `output_path`, replacing any existing file.
    ///
    /// Under [`ErrorPolicy::Strict`] a non-success status fails before the
    /// file is created. Under [`ErrorPolicy::BestEffort`] the response body is
    /// written whatever the status and the status is reported back.
    async fn download(
        &self,
        url: &str,
        output_path: &Path,
        policy: ErrorPolicy,
    ) -> Result<DownloadReport>;
}
