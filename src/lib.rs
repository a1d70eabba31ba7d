//! LISTING SCRAPER
//! Scrapes product listings (name, price, discount, rating) from a search-results page
//! through a scraping proxy, one page at a time, and summarizes what it found.

mod config;
mod error;
#[doc(hidden)]
pub mod macros;
pub mod parse;
pub mod process;
pub mod record;
pub mod report;
pub mod request;
pub mod table;

pub use config::ScrapeConfig;
pub use error::{Error, Result};
pub use record::{Label, ProductRecord, ScrapeRequest};
pub use table::ResultTable;

const PROXY_ENDPOINT: &str = "http://api.scraperapi.com";
const API_KEY_VAR: &str = "SCRAPER_API_KEY";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0.0.0 Safari/537.36";
/// Pause after every page attempt, in milliseconds.
const PAGE_DELAY_MS: u64 = 1000;
/// A search results page rarely holds more than this many products.
const EXPECTED_PRODUCTS_PER_PAGE: usize = 40;
