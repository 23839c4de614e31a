//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod asset;
mod export;

pub use asset::AssetDisplay;
pub use export::FileRecordDisplay;
