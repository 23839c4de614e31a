//! Export result display model

use serde::Serialize;
use tabled::Tabled;

use crate::export::{FileOutcome, FileRecord};

/// One exported file variant, for table output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct FileRecordDisplay {
    #[tabled(rename = "ASSET")]
    pub asset: String,

    #[tabled(rename = "VERSION")]
    pub version: String,

    #[tabled(rename = "CLASSIFIER")]
    pub classifier: String,

    #[tabled(rename = "RESULT")]
    pub result: String,

    #[tabled(rename = "PATH")]
    pub path: String,
}

impl From<&FileRecord> for FileRecordDisplay {
    fn from(record: &FileRecord) -> Self {
        let (result, path) = match &record.outcome {
            FileOutcome::Downloaded { path, bytes } => {
                (format!("downloaded ({} bytes)", bytes), path.display().to_string())
            }
            FileOutcome::Incomplete { path, status } => {
                (format!("HTTP {}", status), path.display().to_string())
            }
            FileOutcome::Unsupported => ("unsupported".to_string(), "-".to_string()),
            FileOutcome::MissingLink => ("no link".to_string(), "-".to_string()),
        };

        Self {
            asset: record.asset.asset_id.clone(),
            version: record.asset.version.clone(),
            classifier: record.classifier.clone(),
            result,
            path,
        }
    }
}
