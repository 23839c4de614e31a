//! Export command implementation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::args::{ExportArgs, GlobalOptions};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{ErrorPolicy, PageLimits};
use crate::config::ExportSettings;
use crate::error::Result;
use crate::export::{ExportOptions, ExportSummary, Exporter};
use crate::models::FileRecordDisplay;
use crate::output::Formattable;
use crate::output::json::format_json;

/// Run the export command
pub async fn run(opts: &GlobalOptions, args: &ExportArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts)?;
    args.apply(&mut ctx.config.export);
    ctx.config.validate()?;

    let credentials = ctx.credentials()?;
    let options = export_options(&ctx.config.export, args.inspect);

    let summary = Exporter::new(&ctx.client, options)
        .with_progress(spinner())
        .run(&credentials, ctx.config.org_id.as_deref())
        .await?;

    print_summary(&summary, ctx.format)
}

/// Build run options from the merged settings
pub fn export_options(settings: &ExportSettings, inspect: bool) -> ExportOptions {
    ExportOptions {
        output_dir: settings.output_dir.clone(),
        limits: PageLimits::default()
            .page_size(settings.page_size)
            .max_pages(settings.max_pages),
        policy: ErrorPolicy::from_best_effort(settings.best_effort),
        inspect,
    }
}

/// Spinner drawn on stderr; hidden when stderr is not a terminal
pub fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    spinner.set_style(style);
    spinner
}

fn print_summary(summary: &ExportSummary, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", format_json(summary)?);
        return Ok(());
    }

    if summary.assets == 0 {
        println!("No REST APIs found in organization {}.", summary.org_id.bold());
        return Ok(());
    }

    let records: Vec<FileRecordDisplay> =
        summary.files.iter().map(FileRecordDisplay::from).collect();
    if !records.is_empty() {
        records.print(OutputFormat::Table)?;
        println!();
    }

    println!(
        "{} {} of {} REST APIs in organization {}",
        "✓".green(),
        "Exported".bold(),
        summary.assets,
        summary.org_id.bold()
    );
    println!("  Downloaded:  {}", summary.downloaded().to_string().green());
    if summary.incomplete() > 0 {
        println!(
            "  {} Error responses saved: {}",
            "⚠".yellow(),
            summary.incomplete().to_string().yellow()
        );
    }
    if summary.missing_links() > 0 {
        println!(
            "  {} Missing links: {}",
            "⚠".yellow(),
            summary.missing_links().to_string().yellow()
        );
    }
    println!("  Unsupported: {}", summary.unsupported().to_string().dimmed());
    if !summary.assets_without_files.is_empty() {
        println!(
            "  Without files: {}",
            summary.assets_without_files.len().to_string().dimmed()
        );
    }

    Ok(())
}
