use std::fs;

use anyhow::Context;

use webrag_core::chunker::{chunk_sections, ChunkPolicy};
use webrag_core::config::{Config, DataPaths};
use webrag_core::corpus::{split_sections, write_chunks_jsonl};
use webrag_core::error::require_artifact;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let paths: DataPaths = config.section("data");
    let policy: ChunkPolicy = config.section("chunk");

    let raw_path = paths.raw_pages_path();
    require_artifact(&raw_path, "webrag-scrape")?;
    let raw = fs::read_to_string(&raw_path)
        .with_context(|| format!("failed to read {}", raw_path.display()))?;

    let sections = split_sections(&raw);
    let chunks = chunk_sections(&sections, &policy);

    let chunks_path = paths.chunks_path();
    write_chunks_jsonl(&chunks_path, &chunks)?;
    println!(
        "Wrote {} chunks from {} pages to {}",
        chunks.len(),
        sections.len(),
        chunks_path.display()
    );
    Ok(())
}
