//! Offset pagination over the `/sold` endpoint.
//!
//! The driver fetches a page, hands it to a [`PageSink`], advances the offset
//! by the page's `count` and repeats until the offset reaches the server's
//! `totalCount`. A failed fetch is retried at the same offset under the
//! supplied [`RetryPolicy`]; the offset only ever moves forward.

use booli_api::types::SoldResponse;
use booli_api::{Client, SoldQuery};

use crate::error::BooliError;
use crate::retry::{is_retryable, RetryPolicy};

/// Receives each page as soon as it is fetched.
pub trait PageSink {
    fn accept(&mut self, page: &SoldResponse) -> Result<(), BooliError>;
}

/// Accumulates pages in memory.
impl PageSink for Vec<SoldResponse> {
    fn accept(&mut self, page: &SoldResponse) -> Result<(), BooliError> {
        self.push(page.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarvestSummary {
    pub pages: usize,
    /// Sum of `count` over all pages.
    pub records: u64,
    /// `totalCount` reported by the last page.
    pub total_count: u64,
    pub final_offset: u64,
    /// Failed attempts that were retried.
    pub retries: usize,
}

/// Walks the result set starting at `query.offset` (or 0).
///
/// When `query.limit` is unset the first request goes out without a limit and
/// every later request asks for the server's `totalCount`.
pub async fn harvest<S>(
    client: &Client,
    query: &SoldQuery,
    retry: &RetryPolicy,
    sink: &mut S,
) -> Result<HarvestSummary, BooliError>
where
    S: PageSink + ?Sized,
{
    let mut offset = query.offset.unwrap_or(0);
    let mut limit = query.limit;
    let mut summary = HarvestSummary {
        final_offset: offset,
        ..Default::default()
    };

    loop {
        let request = SoldQuery {
            offset: Some(offset),
            limit,
            ..query.clone()
        };
        let page = fetch_with_retry(client, &request, retry, &mut summary.retries).await?;
        tracing::info!(
            "Query yielded {} results, retrieved {} rows from Booli (offset {})",
            page.total_count(),
            page.count(),
            offset
        );
        sink.accept(&page)?;

        summary.pages += 1;
        summary.records += page.count();
        summary.total_count = page.total_count();
        offset += page.count();
        summary.final_offset = offset;

        if limit.is_none() {
            limit = Some(page.total_count());
        }

        if offset >= page.total_count() {
            break;
        }
        if page.count() == 0 {
            tracing::warn!(
                "Booli returned an empty page at offset {} of {}; stopping",
                offset,
                page.total_count()
            );
            break;
        }
    }

    tracing::info!(
        "Harvest finished: {} pages, {} rows, final offset {}",
        summary.pages,
        summary.records,
        summary.final_offset
    );
    Ok(summary)
}

/// Fetches a single page, retrying under `retry`.
pub async fn fetch_page(
    client: &Client,
    query: &SoldQuery,
    retry: &RetryPolicy,
) -> Result<SoldResponse, BooliError> {
    let mut retries = 0;
    fetch_with_retry(client, query, retry, &mut retries).await
}

async fn fetch_with_retry(
    client: &Client,
    query: &SoldQuery,
    retry: &RetryPolicy,
    retries: &mut usize,
) -> Result<SoldResponse, BooliError> {
    let mut attempt = 0usize;
    loop {
        match client.get_sold(query).await {
            Ok(page) => return Ok(page),
            Err(err) => {
                attempt += 1;
                if attempt > retry.max_retries || !is_retryable(&err) {
                    tracing::error!(
                        "Error when requesting data from Booli at offset {:?}: {}",
                        query.offset,
                        err
                    );
                    return Err(err.into());
                }
                let delay = retry.delay_for_attempt(attempt);
                tracing::warn!(
                    "Error when requesting data from Booli (attempt {}/{}), retrying offset {:?} in {:.1}s: {}",
                    attempt,
                    retry.max_retries,
                    query.offset,
                    delay.as_secs_f64(),
                    err
                );
                *retries += 1;
                tokio::time::sleep(delay).await;
            }
        }
    }
}
