//! Anypoint Platform data models
//!
//! Domain types exchanged with the accounts and Exchange APIs.

mod asset;
mod auth;

pub use asset::{Asset, AssetCoordinates, Classifier, FileVariant};
pub use auth::{AccessToken, Credentials};
