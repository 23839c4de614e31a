//! JSON output formatting
//!
//! Every JSON document the CLI prints is wrapped as `{"data": ..., "meta": ...}`
//! so scripts can tell which build produced it and when.

use chrono::Utc;
use serde::Serialize;

/// Envelope around a JSON payload
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Provenance of a JSON document
#[derive(Debug, Serialize)]
pub struct Metadata {
    /// RFC 3339 time the document was produced
    pub timestamp: String,
    /// exchange-export version
    pub version: String,
}

impl Metadata {
    fn now() -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl<T> JsonOutput<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: Metadata::now(),
        }
    }
}

/// Wrap `data` in the envelope and pretty-print it
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonOutput::new(data))
}
