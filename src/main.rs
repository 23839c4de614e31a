//! exchange-export - Batch exporter for Anypoint Exchange REST API specifications

use clap::Parser;

mod cli;
mod client;
mod config;
mod error;
mod export;
mod models;
mod output;

use cli::args::GlobalOptions;
use cli::{AssetsCommands, Cli, Commands};
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Export(ref args) => cli::export::run(&opts, args).await,
        Commands::Assets(ref cmd) => match cmd {
            AssetsCommands::List => cli::assets::list(&opts).await,
            AssetsCommands::Files {
                group_id,
                asset_id,
                version,
            } => cli::assets::files(&opts, group_id, asset_id, version).await,
        },
        Commands::Org => cli::org::get(&opts).await,
        Commands::Init => cli::init::run(&opts).await,
        Commands::Status => cli::status::run(&opts),
        Commands::Completion { shell } => {
            cli::completion::run(shell);
            Ok(())
        }
    }
}

/// Progress goes to stderr at info level; `--debug` adds HTTP details.
/// `RUST_LOG` takes precedence over both.
fn init_logging(debug: bool) {
    let default_filter = if debug {
        "exchange_export=debug"
    } else {
        "exchange_export=info"
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}
