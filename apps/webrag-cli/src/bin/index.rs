use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};

use webrag_core::config::{Config, DataPaths, EmbedConfig};
use webrag_core::corpus::read_chunks_jsonl;
use webrag_embed::embedder_from_config;
use webrag_store::VectorStore;

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
    let paths: DataPaths = config.section("data");
    let embed_cfg: EmbedConfig = config.section("embed");

    let chunks = read_chunks_jsonl(&paths.chunks_path())?;
    println!("Loaded {} chunks", chunks.len());

    let embedder = embedder_from_config(&embed_cfg)?;

    let pb = ProgressBar::new(chunks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} chunks ({percent}%)")
            .context("progress template")?
            .progress_chars("#>-"),
    );
    let mut embeddings = Vec::with_capacity(chunks.len());
    for chunk in &chunks {
        let vector = embedder
            .embed_batch(std::slice::from_ref(&chunk.text))?
            .into_iter()
            .next()
            .context("embedder returned no vector")?;
        embeddings.push(vector);
        pb.inc(1);
    }
    pb.finish_with_message("embedding complete");

    let store = VectorStore::build(chunks, embeddings)?;
    let embeddings_path = paths.embeddings_path();
    let metadata_path = paths.metadata_path();
    store.save(&embeddings_path, &metadata_path)?;

    println!("Saved normalized embeddings to {}", embeddings_path.display());
    println!("Saved metadata to {}", metadata_path.display());
    Ok(())
}
