//! Raw scrape-file format and the chunk-file (JSONL) contract.
//!
//! The fetcher writes repeating blocks of `URL: <url>\n<text>` separated by a
//! rule of dashes; this module recovers per-URL bodies from that format and
//! reads/writes the line-delimited JSON chunk file consumed by the indexer.

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::error::require_artifact;
use crate::types::Chunk;

/// Marker line prefix written before each page's extracted text.
pub const URL_MARKER: &str = "URL: ";

/// Separator rule written between page blocks.
pub fn section_rule() -> String {
    "-".repeat(80)
}

/// One recovered page body, already whitespace-normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSection {
    pub url: String,
    pub body: String,
}

/// Collapses every whitespace run to a single space and trims the ends.
/// Idempotent under re-application.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Splits the raw scrape file back into per-URL bodies.
///
/// Content preceding the first marker is discarded, separator rule lines are
/// dropped, and sections whose body is empty after normalization are skipped.
pub fn split_sections(raw: &str) -> Vec<PageSection> {
    let mut sections = Vec::new();
    for piece in raw.split(URL_MARKER).skip(1) {
        let (url, body) = match piece.split_once('\n') {
            Some((url, body)) => (url.trim(), body),
            None => (piece.trim(), ""),
        };
        if url.is_empty() {
            continue;
        }
        let body = body
            .lines()
            .filter(|line| !is_rule_line(line))
            .collect::<Vec<_>>()
            .join("\n");
        let body = normalize_whitespace(&body);
        if body.is_empty() {
            continue;
        }
        sections.push(PageSection {
            url: url.to_string(),
            body,
        });
    }
    sections
}

fn is_rule_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '-')
}

/// Writes one JSON object per line, creating parent directories as needed.
pub fn write_chunks_jsonl(path: &Path, chunks: &[Chunk]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let mut file =
        fs::File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    for chunk in chunks {
        let line = serde_json::to_string(chunk)?;
        writeln!(file, "{}", line)?;
    }
    Ok(())
}

/// Reads the chunk file produced by `webrag-chunk`, preserving record order.
pub fn read_chunks_jsonl(path: &Path) -> anyhow::Result<Vec<Chunk>> {
    require_artifact(path, "webrag-chunk")?;
    let raw =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let mut chunks = Vec::new();
    for (number, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let chunk: Chunk = serde_json::from_str(line)
            .with_context(|| format!("{}:{}: malformed chunk record", path.display(), number + 1))?;
        chunks.push(chunk);
    }
    Ok(chunks)
}
