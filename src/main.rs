use std::path::PathBuf;
use std::time::Duration;

use chrono::Local;
use clap::Parser;
use listscrap::report::{self, DEFAULT_PRICE_BINS};
use listscrap::{info_time, process::process_site, warn_time, Result, ResultTable, ScrapeConfig, ScrapeRequest};

const DEFAULT_URL: &str = "https://www.flipkart.com/search?q=t+shirts";

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Search results URL to scrape
    #[arg(value_name = "URL", conflicts_with = "url")]
    target: Option<String>,

    /// Same as the positional URL
    #[arg(long)]
    url: Option<String>,

    /// Number of result pages, starting from page 1
    #[arg(long, default_value_t = 1)]
    pages: usize,

    /// Pause after every page (ms)
    #[arg(long, default_value_t = 1000)]
    delay_ms: u64,

    /// Where to write the scraped table as JSON
    #[arg(long, default_value = "products.json")]
    out: PathBuf,

    /// Leaderboard and word list length
    #[arg(long, default_value_t = report::DEFAULT_TOP)]
    top: usize,

    /// Scraping proxy endpoint
    #[arg(long)]
    proxy: Option<String>,
}

impl Args {
    fn search_url(&self) -> String {
        self.target
            .clone()
            .or_else(|| self.url.clone())
            .unwrap_or_else(|| DEFAULT_URL.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let start_time = Local::now();
    let args = Args::parse();

    let mut config = ScrapeConfig::from_env().with_page_delay(Duration::from_millis(args.delay_ms));
    if let Some(proxy) = args.proxy.as_deref() {
        config = config.with_proxy_endpoint(proxy);
    }
    if config.api_key.is_none() {
        warn_time!("SCRAPER_API_KEY is not set, every page request will fail.");
    }

    let request = ScrapeRequest::new(args.search_url(), args.pages)?;
    let table = process_site(&config, &request).await?;

    if table.is_empty() {
        warn_time!("No data was scraped. Please check the URL and try again.");
    } else {
        print_report(&table, args.top);
        let local_now = Local::now();
        table.write_json(&args.out).await?;
        info_time!(local_now, "Wrote the results to file: {}", args.out.display());
    }
    info_time!(start_time, "Full program time:");

    Ok(())
}

fn print_report(table: &ResultTable, top: usize) {
    let summary = report::summary(table);
    println!("\n== Key Performance Indicators");
    println!("Total Products : {}", summary.total_products);
    match summary.average_price {
        Some(avg) => println!("Average Price  : ₹{avg:.2}"),
        None => println!("Average Price  : N/A"),
    }
    match summary.average_rating {
        Some(avg) => println!("Average Rating : {avg:.2}/5"),
        None => println!("Average Rating : N/A"),
    }

    println!("\n== Price Distribution");
    for bin in report::price_histogram(table, DEFAULT_PRICE_BINS) {
        println!("₹{:>10.2} - ₹{:>10.2} : {}", bin.start, bin.end, "#".repeat(bin.count));
    }
    if let Some(q) = report::price_quartiles(table) {
        println!(
            "min ₹{:.2} | q1 ₹{:.2} | median ₹{:.2} | q3 ₹{:.2} | max ₹{:.2}",
            q.min, q.q1, q.median, q.q3, q.max
        );
    }

    println!("\n== Rating Analysis");
    for (rating, count) in report::rating_counts(table) {
        println!("{rating:.1} : {count}");
    }

    println!("\n== Top {top} expensive products");
    for record in report::top_by_price(table, top) {
        println!("₹{:>10.2}  {}", record.price.unwrap_or_default(), record.name);
    }
    println!("\n== Top {top} rated products");
    for record in report::top_by_rating(table, top) {
        println!("{:>4.1}  {}", record.rating.unwrap_or_default(), record.name);
    }

    println!("\n== Product Name Analytics");
    let words = report::word_frequencies(table, top);
    if words.is_empty() {
        warn_time!("No product names available for text analysis");
    }
    for (word, count) in words {
        println!("{word:<20} {count}");
    }
}
