//! Asset command implementations

use crate::cli::args::GlobalOptions;
use crate::cli::export::spinner;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::AssetCoordinates;
use crate::client::{ErrorPolicy, ExchangeApi, PageLimits};
use crate::error::Result;
use crate::export::describe_file_metadata;
use crate::models::AssetDisplay;
use crate::output::Formattable;
use crate::output::json::format_json;

/// List the organization's REST API assets
pub async fn list(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.authenticate().await?;
    let org_id = ctx.org_id().await?;

    let limits = PageLimits::default()
        .page_size(ctx.config.export.page_size)
        .max_pages(ctx.config.export.max_pages);

    let progress = spinner();
    progress.set_message("Listing REST API assets...");
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    let listed = ctx.client.list_rest_apis(&org_id, limits).await;
    progress.finish_and_clear();
    let assets = listed?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&assets)?),
        OutputFormat::Table => {
            let display: Vec<AssetDisplay> = assets.iter().map(AssetDisplay::from).collect();
            display.print(OutputFormat::Table)?;
        }
    }

    Ok(())
}

/// Print the file metadata Exchange reports for one asset version
pub async fn files(
    opts: &GlobalOptions,
    group_id: &str,
    asset_id: &str,
    version: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.authenticate().await?;

    let coordinates = AssetCoordinates {
        group_id: group_id.to_string(),
        asset_id: asset_id.to_string(),
        version: version.to_string(),
    };
    let policy = ErrorPolicy::from_best_effort(ctx.config.export.best_effort);
    let metadata = ctx.client.list_asset_files(&coordinates, policy).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&metadata)?),
        OutputFormat::Table => {
            println!("{}: {}", coordinates, describe_file_metadata(&metadata));
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
    }

    Ok(())
}
