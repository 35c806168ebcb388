use std::path::PathBuf;

use clap::Parser;
use crawler::{Crawler, SearchPageFeed, DEFAULT_SEARCH_URL};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Download labeled face images for training")]
struct Args {
    /// Search queries; each gets its own directory
    #[arg(default_value = "Taylor Swift")]
    queries: Vec<String>,
    /// Directory the per-query folders are created in
    #[arg(long, default_value = "images")]
    root: PathBuf,
    /// Images to save per query
    #[arg(long, default_value_t = 100)]
    max: usize,
    /// Result page URL with {query} and {offset} placeholders
    #[arg(long, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let args = Args::parse();

    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko)")
        .build()?;
    let feed = SearchPageFeed::new(client.clone(), args.search_url);
    let crawler = Crawler::new(feed, client, args.max);
    for query in &args.queries {
        crawler.crawl(query, &args.root).await?;
    }
    Ok(())
}
