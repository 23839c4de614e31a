//! Batch export of REST API specification files
//!
//! Authenticates, lists every REST API asset of the organization and
//! downloads the supported file variants of each one. The run is strictly
//! sequential and any error escaping the asset loop stops the batch.

pub mod paths;


use std::path::PathBuf;

use indicatif::ProgressBar;
use log::{debug, info, warn};
use serde::Serialize;

use crate::client::models::{Asset, AssetCoordinates, Credentials, FileVariant};
use crate::client::{AnypointApi, AuthApi, DownloadApi, ErrorPolicy, ExchangeApi, PageLimits};
use crate::error::{ApiError, Error, Result};

pub use paths::{output_path, sanitize};

/// Default directory downloads are written to, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Settings for one export run
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub limits: PageLimits,
    pub policy: ErrorPolicy,
    /// Fetch and log each asset's file metadata before downloading
    pub inspect: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            limits: PageLimits::default(),
            policy: ErrorPolicy::Strict,
            inspect: false,
        }
    }
}

/// What happened to one file variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum FileOutcome {
    /// Written to `path` from a successful response
    Downloaded { path: PathBuf, bytes: u64 },
    /// Written to `path`, but the server answered with an error status
    Incomplete { path: PathBuf, status: u16 },
    /// Classifier not exported
    Unsupported,
    /// Supported classifier without a download link (best-effort only)
    MissingLink,
}

/// Per-variant record in the run summary
#[derive(Debug, Clone, Serialize)]
pub struct FileRecord {
    pub asset: AssetCoordinates,
    pub classifier: String,
    #[serde(flatten)]
    pub outcome: FileOutcome,
}

/// Tally of an export run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    pub org_id: String,
    pub assets: usize,
    /// Assets skipped because they list no files
    pub assets_without_files: Vec<AssetCoordinates>,
    pub files: Vec<FileRecord>,
}

impl ExportSummary {
    pub fn downloaded(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Downloaded { .. }))
    }

    pub fn incomplete(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Incomplete { .. }))
    }

    pub fn unsupported(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unsupported))
    }

    pub fn missing_links(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::MissingLink))
    }

    fn count(&self, predicate: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|r| predicate(&r.outcome)).count()
    }
}

/// Runs the authenticate → list → download pipeline against an API client
pub struct Exporter<'a, C> {
    client: &'a C,
    options: ExportOptions,
    progress: ProgressBar,
}

impl<'a, C: AnypointApi> Exporter<'a, C> {
    pub fn new(client: &'a C, options: ExportOptions) -> Self {
        Self {
            client,
            options,
            progress: ProgressBar::hidden(),
        }
    }

    /// Show `progress` as a spinner while the catalog is listed
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Run the export.
    ///
    /// `org_id` falls back to the organization of the authenticated identity.
    /// Authentication failures are returned as-is; anything failing after
    /// that is wrapped in [`Error::Export`] with the asset being processed.
    pub async fn run(&self, credentials: &Credentials, org_id: Option<&str>) -> Result<ExportSummary> {
        self.client.authenticate(credentials).await?;

        let mut current = None;
        let result = self.export_all(org_id, &mut current).await;
        result.map_err(|source| Error::Export {
            asset: current,
            source: Box::new(source),
        })
    }

    async fn export_all(
        &self,
        org_id: Option<&str>,
        current: &mut Option<AssetCoordinates>,
    ) -> Result<ExportSummary> {
        let org_id = match org_id {
            Some(id) => id.to_string(),
            None => {
                let id = self.client.get_organization_id().await?;
                info!("Resolved organization {} from token identity", id);
                id
            }
        };

        self.progress.set_message("Listing REST API assets...");
        self.progress
            .enable_steady_tick(std::time::Duration::from_millis(100));
        let listed = self.client.list_rest_apis(&org_id, self.options.limits).await;
        self.progress.finish_and_clear();
        let assets = listed?;

        let mut summary = ExportSummary {
            org_id,
            assets: assets.len(),
            ..ExportSummary::default()
        };

        if assets.is_empty() {
            info!("No REST APIs found for the specified organization.");
            return Ok(summary);
        }

        info!("{} REST APIs found in the organization", assets.len());
        for asset in &assets {
            *current = Some(asset.coordinates());
            self.export_asset(asset, &mut summary).await?;
        }

        Ok(summary)
    }

    async fn export_asset(&self, asset: &Asset, summary: &mut ExportSummary) -> Result<()> {
        let coordinates = asset.coordinates();

        if asset.files.is_empty() {
            info!(
                "No files found for {} (version: {}).",
                asset.asset_id, asset.version
            );
            summary.assets_without_files.push(coordinates);
            return Ok(());
        }

        if self.options.inspect {
            let metadata = self
                .client
                .list_asset_files(&coordinates, self.options.policy)
                .await?;
            info!(
                "Files reported for {}: {}",
                coordinates,
                describe_file_metadata(&metadata)
            );
        }

        for variant in &asset.files {
            let outcome = self.export_variant(asset, variant).await?;
            summary.files.push(FileRecord {
                asset: coordinates.clone(),
                classifier: variant.classifier_label().to_string(),
                outcome,
            });
        }

        Ok(())
    }

    async fn export_variant(&self, asset: &Asset, variant: &FileVariant) -> Result<FileOutcome> {
        let classifier = variant.classifier_label();

        if !variant.is_supported() {
            info!("Unsupported file type: {} for {}.", classifier, asset.asset_id);
            return Ok(FileOutcome::Unsupported);
        }

        let Some(url) = variant.external_link.as_deref() else {
            if self.options.policy == ErrorPolicy::BestEffort {
                warn!("No download link for {} file of {}; skipping.", classifier, asset.asset_id);
                return Ok(FileOutcome::MissingLink);
            }
            return Err(ApiError::InvalidResponse(format!(
                "No download link for {} file of {}",
                classifier, asset.asset_id
            ))
            .into());
        };

        let path = output_path(
            &self.options.output_dir,
            &asset.asset_id,
            &asset.version,
            classifier,
        )
        .await?;

        info!(
            "Downloading {} file for {} to {}...",
            classifier,
            asset.asset_id,
            path.display()
        );
        let report = self.client.download(url, &path, self.options.policy).await?;

        if report.is_complete() {
            info!("Downloaded {} file for {}.", classifier, asset.asset_id);
            Ok(FileOutcome::Downloaded {
                path,
                bytes: report.bytes,
            })
        } else {
            warn!(
                "{} file for {} saved from a {} response; {} is not a valid archive.",
                classifier,
                asset.asset_id,
                report.status,
                path.display()
            );
            Ok(FileOutcome::Incomplete {
                path,
                status: report.status,
            })
        }
    }
}

/// One-line description of a file-metadata payload for the log.
///
/// The payload is not validated, so anything other than a list of objects
/// is reported by shape.
pub fn describe_file_metadata(metadata: &serde_json::Value) -> String {
    match metadata {
        serde_json::Value::Array(entries) => {
            let classifiers: Vec<&str> = entries
                .iter()
                .filter_map(|entry| entry.get("classifier").and_then(|c| c.as_str()))
                .collect();
            debug!("File metadata: {}", metadata);
            if classifiers.is_empty() {
                format!("{} entries without classifiers", entries.len())
            } else {
                classifiers.join(", ")
            }
        }
        other => format!("unexpected response {}", other),
    }
}
