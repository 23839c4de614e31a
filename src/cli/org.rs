//! Organization command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AuthApi;
use crate::error::Result;
use crate::output::json::format_json;

#[derive(Debug, Serialize)]
struct OrgInfo<'a> {
    org_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    configured_org_id: Option<&'a str>,
}

/// Show the organization the configured credentials belong to
pub async fn get(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.authenticate().await?;
    let org_id = ctx.client.get_organization_id().await?;
    let configured = ctx.config.org_id.as_deref();

    match ctx.format {
        OutputFormat::Json => {
            let info = OrgInfo {
                org_id: &org_id,
                configured_org_id: configured,
            };
            println!("{}", format_json(&info)?);
        }
        OutputFormat::Table => {
            println!("Organization: {}", org_id.bold());
            match configured {
                Some(id) if id != org_id => {
                    println!("{} Exports target configured organization {}", "⚠".yellow(), id);
                }
                Some(_) => {}
                None => println!("{} Exports use this organization", "○".dimmed()),
            }
        }
    }

    Ok(())
}
