//! Exchange catalog API trait

use async_trait::async_trait;

use crate::client::ErrorPolicy;
use crate::client::models::{Asset, AssetCoordinates};
use crate::client::pagination::{OffsetParams, PageLimits, collect_offset_pages};
use crate::error::Result;

/// Catalog operations for the Exchange API
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    /// Fetch one page of REST API assets for an organization.
    ///
    /// An empty (or `null`) page body yields an empty vector.
    async fn list_assets_page(&self, org_id: &str, params: &OffsetParams) -> Result<Vec<Asset>>;

    /// Fetch the file metadata of one asset version.
    ///
    /// The body is returned unvalidated. Under [`ErrorPolicy::BestEffort`]
    /// a non-success status does not fail the call and the error payload
    /// is returned instead.
    async fn list_asset_files(
        &self,
        asset: &AssetCoordinates,
        policy: ErrorPolicy,
    ) -> Result<serde_json::Value>;

    /// List every REST API asset of an organization, page by page.
    async fn list_rest_apis(&self, org_id: &str, limits: PageLimits) -> Result<Vec<Asset>> {
        collect_offset_pages(limits, move |params| async move {
            self.list_assets_page(org_id, &params).await
        })
        .await
    }
}
