use std::env;

use anyhow::Context;

use webrag_core::config::{Config, DataPaths, EmbedConfig, QueryConfig};
use webrag_embed::embedder_from_config;
use webrag_llm::{build_prompt, request_answer, AnswerOutcome, API_KEY_VAR};
use webrag_store::VectorStore;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: webrag-query \"<question>\"");
        std::process::exit(1);
    }
    let question = args.join(" ");

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let paths: DataPaths = config.section("data");
    let embed_cfg: EmbedConfig = config.section("embed");
    let query_cfg: QueryConfig = config.section("query");

    let store = VectorStore::load(&paths.embeddings_path(), &paths.metadata_path())?;
    let embedder = embedder_from_config(&embed_cfg)?;

    let query_vec = embedder
        .embed_batch(std::slice::from_ref(&question))?
        .into_iter()
        .next()
        .context("embedder returned no vector")?;
    let hits = store.search(&query_vec, query_cfg.top_k)?;

    println!("=== Retrieved Contexts ===");
    for hit in &hits {
        let snippet: String = hit
            .chunk
            .text
            .replace('\n', " ")
            .chars()
            .take(200)
            .collect();
        println!(
            "- [score={:.4}] {}: {}",
            hit.score, hit.chunk.source, snippet
        );
    }

    let prompt = build_prompt(&question, &query_cfg.subject, &hits);

    match request_answer(&query_cfg, &prompt) {
        AnswerOutcome::Answer(answer) => {
            println!("\n=== Final Answer ===");
            println!("{}", answer);
        }
        AnswerOutcome::MissingCredential => {
            tracing::error!("{} is not set; printing the prompt instead", API_KEY_VAR);
            println!("\n(no credential for the chat-completion call; prompt follows)\n");
            println!("{}", prompt);
        }
        AnswerOutcome::RemoteFailure(message) => {
            tracing::error!(error = %message, "chat completion failed; printing the prompt instead");
            println!("\n(chat completion failed; prompt follows)\n");
            println!("{}", prompt);
        }
    }
    Ok(())
}
