//! Sequential page fetching with a politeness delay.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use url::Url;

use webrag_core::config::ScrapeConfig;
use webrag_core::corpus::{section_rule, URL_MARKER};

use crate::extract::extract_text;

/// Counts reported after a scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub fetched: usize,
    pub skipped: usize,
}

pub struct Fetcher {
    client: Client,
    delay: Duration,
}

impl Fetcher {
    pub fn new(cfg: &ScrapeConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            client,
            delay: Duration::from_millis(cfg.delay_ms),
        })
    }

    /// Fetches one page and returns its extracted text.
    pub fn fetch_page(&self, url: &Url) -> Result<String> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .with_context(|| format!("request to {} failed", url))?
            .error_for_status()
            .with_context(|| format!("{} returned an error status", url))?;
        let html = response
            .text()
            .with_context(|| format!("failed to read body from {}", url))?;
        Ok(extract_text(&html))
    }

    /// Fetches every URL in order, writing one delimited block per page that
    /// yields text. Failures are logged and skipped; the batch continues.
    /// The output file is rewritten wholesale on every run.
    pub fn scrape_to_file(&self, urls: &[String], out_path: &Path) -> Result<ScrapeSummary> {
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let mut out = fs::File::create(out_path)
            .with_context(|| format!("failed to create {}", out_path.display()))?;

        let mut summary = ScrapeSummary {
            fetched: 0,
            skipped: 0,
        };
        for raw_url in urls {
            let text = Url::parse(raw_url)
                .context("invalid URL")
                .and_then(|url| {
                    tracing::info!(url = %raw_url, "fetching");
                    self.fetch_page(&url)
                });
            match text {
                Ok(text) if !text.trim().is_empty() => {
                    write!(
                        out,
                        "{}{}\n{}\n\n{}\n\n",
                        URL_MARKER,
                        raw_url,
                        text,
                        section_rule()
                    )?;
                    summary.fetched += 1;
                }
                Ok(_) => {
                    tracing::warn!(url = %raw_url, "page yielded no text; skipping");
                    summary.skipped += 1;
                }
                Err(err) => {
                    tracing::warn!(url = %raw_url, error = %format!("{err:#}"), "fetch failed; skipping");
                    summary.skipped += 1;
                }
            }
            // Politeness pause, not rate-limit negotiation
            thread::sleep(self.delay);
        }
        Ok(summary)
    }
}
