//! Anypoint Platform API client

pub mod anypoint;
pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;

pub use anypoint::{AnypointClient, ClientOptions};
pub use api::{AuthApi, DownloadApi, DownloadReport, ExchangeApi};
#[cfg(test)]
pub use mock::MockAnypointClient;
pub use pagination::{OffsetParams, PageLimits};

/// How file-metadata and download calls treat a non-success HTTP status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the call
    #[default]
    Strict,
    /// Log the status and carry on with whatever body the server sent
    BestEffort,
}

impl ErrorPolicy {
    pub fn from_best_effort(best_effort: bool) -> Self {
        if best_effort {
            ErrorPolicy::BestEffort
        } else {
            ErrorPolicy::Strict
        }
    }
}

/// Combined Anypoint API surface used by the exporter
pub trait AnypointApi: AuthApi + ExchangeApi + DownloadApi {}

impl<T: AuthApi + ExchangeApi + DownloadApi> AnypointApi for T {}
