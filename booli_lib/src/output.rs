//! Raw JSON output for harvested pages.
//!
//! Pages are appended to `<minSoldDate>-<today>_<query>.json` as the server
//! sent them: nulls, empty arrays and key order included. The default
//! [`OutputFormat::Concatenated`] writes each page back-to-back with no
//! separator, so a multi-page file is a stream of JSON documents rather than
//! one document. [`OutputFormat::JsonLines`] puts one page per line.

use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use booli_api::types::SoldResponse;
use chrono::NaiveDate;

use crate::error::BooliError;
use crate::harvest::PageSink;
use crate::validation::format_sold_date;

/// Directory raw harvests land in, relative to the working directory.
pub const DEFAULT_RAW_DIR: &str = "data/raw";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Concatenated,
    JsonLines,
}

impl FromStr for OutputFormat {
    type Err = BooliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concat" | "concatenated" => Ok(Self::Concatenated),
            "jsonl" | "ndjson" => Ok(Self::JsonLines),
            other => Err(BooliError::InvalidInput(format!(
                "unknown output format '{}'. Valid values: concat, jsonl",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concatenated => write!(f, "concat"),
            Self::JsonLines => write!(f, "jsonl"),
        }
    }
}

/// `<minSoldDate>-<today>_<query>.json`. Path separators in the query become `_`.
pub fn raw_file_name(min_sold_date: &str, today: NaiveDate, query: &str) -> String {
    let query: String = query
        .chars()
        .map(|c| if c == '/' || c == '\\' { '_' } else { c })
        .collect();
    format!("{}-{}_{}.json", min_sold_date, format_sold_date(today), query)
}

/// Creates `dir` if needed and opens `dir/file_name` for appending.
pub fn open_raw_output(dir: &Path, file_name: &str) -> Result<(File, PathBuf), BooliError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(file_name);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((file, path))
}

/// Writes each page body to the wrapped writer as it arrives.
pub struct RawPageWriter<W: Write> {
    inner: W,
    format: OutputFormat,
    pages_written: usize,
}

impl<W: Write> RawPageWriter<W> {
    pub fn new(inner: W, format: OutputFormat) -> Self {
        Self {
            inner,
            format,
            pages_written: 0,
        }
    }

    pub fn pages_written(&self) -> usize {
        self.pages_written
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> PageSink for RawPageWriter<W> {
    fn accept(&mut self, page: &SoldResponse) -> Result<(), BooliError> {
        serde_json::to_writer(&mut self.inner, page.body())?;
        if self.format == OutputFormat::JsonLines {
            self.inner.write_all(b"\n")?;
        }
        self.inner.flush()?;
        self.pages_written += 1;
        Ok(())
    }
}
