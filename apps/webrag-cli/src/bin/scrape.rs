use anyhow::bail;

use webrag_core::config::{Config, DataPaths, ScrapeConfig};
use webrag_web::Fetcher;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let scrape: ScrapeConfig = config.section("scrape");
    let paths: DataPaths = config.section("data");

    if scrape.urls.is_empty() {
        bail!("no scrape.urls configured; add target URLs to config.toml");
    }

    let out_path = paths.raw_pages_path();
    println!("webrag-scrape\n=============");
    println!("Targets: {} URLs", scrape.urls.len());

    let fetcher = Fetcher::new(&scrape)?;
    let summary = fetcher.scrape_to_file(&scrape.urls, &out_path)?;

    println!(
        "Saved {} pages to {} ({} skipped)",
        summary.fetched,
        out_path.display(),
        summary.skipped
    );
    Ok(())
}
