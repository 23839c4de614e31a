//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{AccessToken, Credentials};
use crate::error::Result;

/// Authentication operations for the Anypoint accounts API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange client credentials for a bearer token.
    ///
    /// On success the token is also retained by the client and sent with
    /// every subsequent request.
    async fn authenticate(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Resolve the organization the authenticated identity belongs to
    async fn get_organization_id(&self) -> Result<String>;
}
