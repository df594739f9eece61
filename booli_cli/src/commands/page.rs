//! The `page` subcommand: fetch one page of sold listings and print it as JSON.

use anyhow::Result;
use booli_lib::{harvest::fetch_page, BooliConfig, RetryPolicy};
use clap::Args;

use super::search::{Defaults, SearchArgs};

#[derive(Args)]
pub struct PageArgs {
    #[command(flatten)]
    pub search: SearchArgs,
}

pub async fn run(args: &PageArgs, config: &BooliConfig) -> Result<()> {
    let query = args.search.to_query(&Defaults::for_page(config))?;
    let client = config.client()?;
    let page = fetch_page(&client, &query, &RetryPolicy::from_env()).await?;
    println!("{}", serde_json::to_string_pretty(page.body())?);
    Ok(())
}
