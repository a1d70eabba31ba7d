use std::time::Duration;

use chrono::Local;

use crate::parse::Extractor;
use crate::request::{PageFetcher, ProxyFetcher};
use crate::{info_time, warn_time, Error, Result, ResultTable, ScrapeConfig, ScrapeRequest};

/// Outcome of a single page attempt.
#[derive(Debug)]
pub enum PageResult {
    Fetched { page_index: usize, html: String },
    Failed { page_index: usize, error: Error },
}

impl PageResult {
    async fn fetch<F: PageFetcher + ?Sized>(fetcher: &F, base_url: &str, page_index: usize) -> Self {
        match fetcher.fetch(base_url, page_index).await {
            Ok(html) => PageResult::Fetched { page_index, html },
            Err(error) => PageResult::Failed { page_index, error },
        }
    }
}

/// Builds the proxy fetcher from `config` and scrapes every page of `request`.
/// Only setup can fail; page failures are reported and skipped.
pub async fn process_site(config: &ScrapeConfig, request: &ScrapeRequest) -> Result<ResultTable> {
    let start_time = Local::now();
    let fetcher = ProxyFetcher::new(config)?;
    let extractor = Extractor::new()?;

    info_time!(
        "Started scraping {} page(s) of {}",
        request.page_count(),
        request.base_url()
    );
    let table = scrape(&fetcher, &extractor, request, config.page_delay).await;
    info_time!(start_time, "Finished PROCESSING ALL pages. {} products.", table.len());

    Ok(table)
}

/// Walks pages `1..=page_count` strictly in order, one fetch attempt each.
/// A failed page contributes nothing and the loop moves on. `delay` is waited after every attempt.
pub async fn scrape<F: PageFetcher + ?Sized>(
    fetcher: &F,
    extractor: &Extractor,
    request: &ScrapeRequest,
    delay: Duration,
) -> ResultTable {
    let mut table = ResultTable::new();

    for page_index in request.pages() {
        let start_page_time = Local::now();

        match PageResult::fetch(fetcher, request.base_url(), page_index).await {
            PageResult::Fetched { page_index, html } => {
                let records = extractor.extract(&html);
                if records.is_empty() {
                    info_time!("found EMPTY page {page_index}");
                }
                info_time!(start_page_time, "Processed page {page_index}: {} products", records.len());
                table.append(records);
            }
            PageResult::Failed { page_index, error } => {
                warn_time!("Error scraping page {page_index}: {error}");
            }
        }

        tokio::time::sleep(delay).await;
    }

    table
}
