//! Lightweight configuration loader and typed stage sections.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. Each pipeline stage extracts its own typed section so entry points
//! receive an explicit configuration value instead of reading module-level
//! constants.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extracts a typed section, falling back to its defaults when the
    /// section is absent from every source.
    pub fn section<T>(&self, key: &str) -> T
    where
        T: serde::de::DeserializeOwned + Default,
    {
        self.figment.extract_inner(key).unwrap_or_default()
    }
}

/// Stage-to-stage artifact locations (`[data]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    pub raw_pages: String,
    pub chunks: String,
    pub embeddings: String,
    pub metadata: String,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            raw_pages: "data/raw_pages.txt".to_string(),
            chunks: "data/chunks.jsonl".to_string(),
            embeddings: "data/embeddings.json".to_string(),
            metadata: "data/metadata.json".to_string(),
        }
    }
}

impl DataPaths {
    pub fn raw_pages_path(&self) -> PathBuf {
        expand_path(&self.raw_pages)
    }

    pub fn chunks_path(&self) -> PathBuf {
        expand_path(&self.chunks)
    }

    pub fn embeddings_path(&self) -> PathBuf {
        expand_path(&self.embeddings)
    }

    pub fn metadata_path(&self) -> PathBuf {
        expand_path(&self.metadata)
    }
}

/// Fetcher settings (`[scrape]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub urls: Vec<String>,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub delay_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/100 Safari/537.36"
                .to_string(),
            timeout_secs: 15,
            delay_ms: 1000,
        }
    }
}

/// Embedding model settings (`[embed]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbedConfig {
    /// Directory holding `tokenizer.json`, `config.json` and the weights.
    pub model_dir: Option<String>,
    /// Expected output dimensionality (also used by the hashing embedder).
    pub dim: usize,
    /// Token budget per encoded text; longer inputs are truncated.
    pub max_len: usize,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            model_dir: None,
            dim: 384,
            max_len: 256,
        }
    }
}

/// Query-stage settings (`[query]`).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub top_k: usize,
    pub model: String,
    pub api_url: String,
    /// Subject line woven into the prompt preamble.
    pub subject: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            top_k: 3,
            model: "llama-3.1-8b-instant".to_string(),
            api_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            subject: "the indexed source pages".to_string(),
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
