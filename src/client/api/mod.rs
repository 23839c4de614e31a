//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Token exchange and caller identity
//! - [`ExchangeApi`] - Catalog listing and file metadata
//! - [`DownloadApi`] - Streaming file downloads
//!
//! The [`AnypointApi`](super::AnypointApi) super-trait combines all three.

mod auth;
mod download;
mod exchange;

pub use auth::AuthApi;
pub use download::{DownloadApi, DownloadReport};
pub use exchange::ExchangeApi;
