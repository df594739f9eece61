//! The `sold` subcommand: fetch every page of a search into a raw JSON file.

use std::io::{self, BufWriter};
use std::path::PathBuf;

use anyhow::Result;
use booli_lib::output::{open_raw_output, DEFAULT_RAW_DIR};
use booli_lib::{harvest, raw_file_name, BooliConfig, OutputFormat, RawPageWriter, RetryPolicy};
use chrono::Local;
use clap::Args;

use super::search::{Defaults, SearchArgs};
use crate::prompt::Prompt;

#[derive(Args)]
pub struct SoldArgs {
    #[command(flatten)]
    pub search: SearchArgs,

    /// Directory the raw JSON file is appended to
    #[arg(long, default_value = DEFAULT_RAW_DIR)]
    pub out_dir: PathBuf,

    /// Output layout: concat (pages back-to-back) or jsonl (one page per line)
    #[arg(long, default_value = "concat")]
    pub format: String,

    /// Prompt for every search value not given as a flag
    #[arg(long, short)]
    pub interactive: bool,
}

pub async fn run(args: &SoldArgs, config: &BooliConfig) -> Result<()> {
    let today = Local::now().date_naive();
    let defaults = Defaults::for_harvest(config, today);
    let format: OutputFormat = args.format.parse()?;

    let mut search = args.search.clone();
    if args.interactive {
        let stdin = io::stdin();
        let mut prompt = Prompt::new(stdin.lock(), io::stdout());
        search.prompt_missing(&mut prompt, &defaults)?;
    }
    let query = search.to_query(&defaults)?;

    eprintln!(
        "Requesting raw data from Booli (query: {}, min_sold_date: {}, max_sold_date: {}, limit: {}, offset: {})",
        query.q,
        query.min_sold_date.as_deref().unwrap_or("-"),
        query.max_sold_date.as_deref().unwrap_or("-"),
        query
            .limit
            .map(|l| l.to_string())
            .unwrap_or_else(|| "all".to_string()),
        query.offset.unwrap_or(0),
    );

    let file_name = raw_file_name(
        query.min_sold_date.as_deref().unwrap_or_default(),
        today,
        &query.q,
    );
    let (file, path) = open_raw_output(&args.out_dir, &file_name)?;
    let mut writer = RawPageWriter::new(BufWriter::new(file), format);

    let client = config.client()?;
    let summary = harvest(&client, &query, &RetryPolicy::from_env(), &mut writer).await?;

    eprintln!(
        "Harvest complete: {} pages, {} of {} records appended to {}",
        summary.pages,
        summary.records,
        summary.total_count,
        path.display()
    );
    if summary.retries > 0 {
        eprintln!("{} failed requests were retried", summary.retries);
    }
    Ok(())
}
