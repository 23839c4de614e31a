//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "exchange-export Configuration Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    let mut config = match Config::load_from(config_path.clone()) {
        Ok(config) => {
            println!("Config file: {}", config_path.display().to_string().cyan());
            config
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            Config::default()
        }
    };
    opts.apply_to(&mut config);
    println!();

    if config.has_credentials() {
        println!("{} Client credentials configured", "✓".green());
    } else {
        println!("{} Client credentials not configured", "✗".red());
        println!("  → Run '{}' to configure", "exchange-export init".cyan());
    }

    if let Some(ref org_id) = config.org_id {
        println!("{} Organization: {}", "✓".green(), org_id);
    } else {
        println!(
            "{} No organization set (resolved from credentials at run time)",
            "○".dimmed()
        );
    }

    if let Some(ref host) = config.api_host {
        println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
    }

    let export = &config.export;
    println!();
    println!("Output directory: {}", export.output_dir.display());
    println!(
        "Paging: {} per page, at most {} pages",
        export.page_size, export.max_pages
    );
    println!(
        "Failures: {}",
        if export.best_effort {
            "log and continue".yellow()
        } else {
            "stop the run".normal()
        }
    );
    if let Some(rps) = export.requests_per_second {
        println!("Throttle: {} requests/second", rps);
    }
    println!();

    Ok(())
}
