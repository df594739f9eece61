//! Search flags shared by `sold` and `page`, and their resolution into a [`SoldQuery`].

use std::io::{BufRead, Write};

use anyhow::Result;
use booli_lib::validation::{
    format_sold_date, validate_date_range, validate_limit, validate_offset, validate_query,
    validate_sold_date,
};
use booli_lib::{BooliConfig, SoldQuery};
use chrono::{Months, NaiveDate};
use clap::Args;

use crate::prompt::Prompt;

#[derive(Args, Clone, Default)]
pub struct SearchArgs {
    /// Search text: area, municipality or address (default: BOOLI_QUERY, then "sverige")
    #[arg(long, short)]
    pub query: Option<String>,

    /// Page size sent to the API
    #[arg(long)]
    pub limit: Option<u64>,

    /// Record offset to start from (default: 0)
    #[arg(long)]
    pub offset: Option<u64>,

    /// Earliest sale date, YYYYMMDD
    #[arg(long)]
    pub min_sold_date: Option<String>,

    /// Latest sale date, YYYYMMDD
    #[arg(long)]
    pub max_sold_date: Option<String>,
}

/// Values used for anything the user leaves unset.
pub struct Defaults {
    pub query: String,
    pub limit: Option<u64>,
    pub min_sold_date: Option<String>,
    pub max_sold_date: Option<String>,
}

impl Defaults {
    /// Full harvest: all results, sold within the last year up to today.
    pub fn for_harvest(config: &BooliConfig, today: NaiveDate) -> Self {
        let year_ago = today.checked_sub_months(Months::new(12)).unwrap_or(today);
        Self {
            query: config.query_or_default().to_string(),
            limit: None,
            min_sold_date: Some(format_sold_date(year_ago)),
            max_sold_date: Some(format_sold_date(today)),
        }
    }

    /// Single page: 100 results, no date filter.
    pub fn for_page(config: &BooliConfig) -> Self {
        Self {
            query: config.query_or_default().to_string(),
            limit: Some(100),
            min_sold_date: None,
            max_sold_date: None,
        }
    }
}

impl SearchArgs {
    /// Asks for every value not given on the command line. Blank answers keep
    /// the default.
    pub fn prompt_missing<R: BufRead, W: Write>(
        &mut self,
        prompt: &mut Prompt<R, W>,
        defaults: &Defaults,
    ) -> Result<()> {
        if self.limit.is_none() {
            let shown = defaults
                .limit
                .map(|l| l.to_string())
                .unwrap_or_else(|| "All".to_string());
            if let Some(answer) = prompt.ask("Please select results limit", &shown)? {
                let limit = answer.parse::<u64>().map_err(|_| {
                    anyhow::anyhow!("invalid limit '{}'. Expected a positive integer", answer)
                })?;
                self.limit = Some(validate_limit(limit)?);
            }
        }
        if self.query.is_none() {
            self.query = prompt.ask("Please input a search query", &defaults.query)?;
        }
        if self.min_sold_date.is_none() {
            self.min_sold_date = prompt.ask(
                "Please input a minimum sales date",
                defaults.min_sold_date.as_deref().unwrap_or("None"),
            )?;
        }
        if self.max_sold_date.is_none() {
            self.max_sold_date = prompt.ask(
                "Please input a maximum sales date",
                defaults.max_sold_date.as_deref().unwrap_or("None"),
            )?;
        }
        if self.offset.is_none() {
            if let Some(answer) = prompt.ask("Please select request offset", "0")? {
                self.offset = Some(validate_offset(&answer)?);
            }
        }
        Ok(())
    }

    /// Validates the flags, fills in defaults and builds the query.
    pub fn to_query(&self, defaults: &Defaults) -> Result<SoldQuery> {
        let q = validate_query(self.query.as_deref().unwrap_or(&defaults.query))?;
        let mut query = SoldQuery::new(&q).with_offset(self.offset.unwrap_or(0));

        if let Some(limit) = self.limit.or(defaults.limit) {
            query = query.with_limit(validate_limit(limit)?);
        }

        let min = self.min_sold_date.as_ref().or(defaults.min_sold_date.as_ref());
        let max = self.max_sold_date.as_ref().or(defaults.max_sold_date.as_ref());
        if let Some(min) = min {
            query = query.with_min_sold_date(&validate_sold_date(min)?);
        }
        if let Some(max) = max {
            query = query.with_max_sold_date(&validate_sold_date(max)?);
        }
        if let (Some(min), Some(max)) = (&query.min_sold_date, &query.max_sold_date) {
            validate_date_range(min, max)?;
        }

        Ok(query)
    }
}
