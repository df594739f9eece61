mod commands;
mod prompt;

use anyhow::Result;
use booli_lib::BooliConfig;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "booli")]
#[command(about = "Fetch sold-property listings from the Booli API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every page of sold listings into a raw JSON file
    Sold(commands::sold::SoldArgs),
    /// Fetch a single page of sold listings and print it
    Page(commands::page::PageArgs),
}

/// Added on top of `RUST_LOG`.
const DEFAULT_LOG_DIRECTIVES: [&str; 2] = ["booli_lib=info", "booli_api=info"];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in DEFAULT_LOG_DIRECTIVES {
        filter = filter.add_directive(directive.parse()?);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = BooliConfig::from_env()?;

    match &cli.command {
        Commands::Sold(args) => commands::sold::run(args, &config).await?,
        Commands::Page(args) => commands::page::run(args, &config).await?,
    }

    Ok(())
}
