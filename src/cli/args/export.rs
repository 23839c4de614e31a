//! Export command arguments

use std::path::PathBuf;

use clap::Args;

use crate::config::ExportSettings;

/// Per-run overrides for the `[export]` config section
#[derive(Args, Debug, Default, Clone)]
pub struct ExportArgs {
    /// Directory to write downloaded files to
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// Log and continue when a file lookup or download fails
    #[arg(long)]
    pub best_effort: bool,

    /// Log each asset's file metadata before downloading it
    #[arg(long)]
    pub inspect: bool,

    /// Assets requested per catalog page
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Catalog pages fetched before giving up
    #[arg(long)]
    pub max_pages: Option<usize>,
}

impl ExportArgs {
    /// Layer these flags over the configured settings
    pub fn apply(&self, settings: &mut ExportSettings) {
        if let Some(ref dir) = self.output_dir {
            settings.output_dir = dir.clone();
        }
        if self.best_effort {
            settings.best_effort = true;
        }
        if let Some(size) = self.page_size {
            settings.page_size = size;
        }
        if let Some(pages) = self.max_pages {
            settings.max_pages = pages;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_without_flags_keeps_settings() {
        let mut settings = ExportSettings {
            best_effort: true,
            page_size: 50,
            ..ExportSettings::default()
        };

        ExportArgs::default().apply(&mut settings);

        assert!(settings.best_effort);
        assert_eq!(settings.page_size, 50);
        assert_eq!(settings.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_apply_overrides_settings() {
        let mut settings = ExportSettings::default();
        let args = ExportArgs {
            output_dir: Some(PathBuf::from("/tmp/specs")),
            best_effort: true,
            inspect: true,
            page_size: Some(10),
            max_pages: Some(3),
        };

        args.apply(&mut settings);

        assert_eq!(settings.output_dir, PathBuf::from("/tmp/specs"));
        assert!(settings.best_effort);
        assert_eq!(settings.page_size, 10);
        assert_eq!(settings.max_pages, 3);
    }
}
