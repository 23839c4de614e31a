//! Init command implementation

use colored::Colorize;
use dialoguer::{Confirm, Input, Password, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::context::client_options;
use crate::client::models::Credentials;
use crate::client::{AnypointClient, AuthApi};
use crate::config::Config;
use crate::error::{ConfigError, Error, Result};

/// Run the init command
///
/// Prompts for connected-app credentials, verifies them against the control
/// plane and stores them with the resolved organization. Export settings of
/// an existing config file are kept.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to exchange-export!".bold().green());
    println!("Let's set up your Anypoint connected app.\n");

    let mut config = existing_config(opts.config_ref())?;
    if let Some(ref host) = opts.api_host {
        config.api_host = Some(host.clone());
    }

    let theme = ColorfulTheme::default();
    let mut client_id = Input::<String>::with_theme(&theme).with_prompt("Client ID");
    if let Some(ref existing) = config.client_id {
        client_id = client_id.default(existing.clone());
    }
    let client_id = client_id.interact_text()?;

    let client_secret: String = Password::with_theme(&theme)
        .with_prompt("Client secret")
        .interact()?;

    println!("\n{}", "Authenticating...".cyan());
    let client = AnypointClient::with_options(client_options(&config))?;
    client
        .authenticate(&Credentials::new(client_id.clone(), client_secret.clone()))
        .await?;
    println!("{}", "✓ Authentication successful!".green());

    println!("\n{}", "Resolving your organization...".cyan());
    let org_id = client.get_organization_id().await?;
    println!("Found organization: {}", org_id.bold());

    let use_org = Confirm::with_theme(&theme)
        .with_prompt("Export this organization by default?")
        .default(true)
        .interact()?;

    config.client_id = Some(client_id);
    config.client_secret = Some(client_secret);
    config.org_id = if use_org { Some(org_id) } else { None };
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );
    if let Some(ref org_id) = config.org_id {
        println!("  Default organization: {}", org_id.bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "exchange-export status".cyan());
    println!("  {} - List REST API assets", "exchange-export assets list".cyan());
    println!("  {} - Download all specifications", "exchange-export export".cyan());

    Ok(())
}

/// Config to update: the file at `path`, or defaults when there is none yet.
///
/// An unreadable file is an error rather than something to overwrite.
fn existing_config(path: Option<&str>) -> Result<Config> {
    match Config::load_at(path) {
        Err(Error::Config(ConfigError::NotFound(_))) => Ok(Config::default()),
        other => other,
    }
}
