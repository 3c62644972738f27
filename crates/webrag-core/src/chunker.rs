//! Sentence-bounded chunking with trailing-character overlap.

use serde::Deserialize;
use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::PageSection;
use crate::types::Chunk;

/// Chunking policy (`[chunk]` config section).
///
/// Budgets are counted in characters, not bytes. A single sentence longer
/// than the budget is never split; sentence integrity outranks the size
/// target.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkPolicy {
    pub target_chars: usize,
    pub overlap_chars: usize,
}

impl Default for ChunkPolicy {
    fn default() -> Self {
        Self {
            target_chars: 350,
            overlap_chars: 50,
        }
    }
}

/// Splits `text` into trimmed, non-empty sentences (UAX #29 boundaries).
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split_sentence_bounds()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Greedily accumulates sentences into chunks under `policy.target_chars`.
///
/// When the budget would be exceeded the current chunk is closed and the next
/// buffer is seeded with the closed chunk's trailing `overlap_chars`
/// characters plus the new sentence. The overlap slice is raw characters and
/// may start mid-word.
pub fn chunk_text(text: &str, policy: &ChunkPolicy) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut cur = String::new();
    for sentence in split_sentences(text) {
        if cur.is_empty() {
            cur = sentence.to_string();
        } else if cur.chars().count() + sentence.chars().count() + 1 <= policy.target_chars {
            cur.push(' ');
            cur.push_str(sentence);
        } else {
            let tail = overlap_tail(&cur, policy.overlap_chars).to_string();
            chunks.push(cur);
            cur = if tail.is_empty() {
                sentence.to_string()
            } else {
                format!("{} {}", tail, sentence)
            };
        }
    }
    if !cur.is_empty() {
        chunks.push(cur);
    }
    chunks
}

/// Last `n` characters of `s` (the whole string when it is shorter).
pub fn overlap_tail(s: &str, n: usize) -> &str {
    if n == 0 {
        return "";
    }
    let start = s.char_indices().rev().nth(n - 1).map_or(0, |(i, _)| i);
    &s[start..]
}

/// Chunks every section, assigning sequential string ids across the run
/// (not per URL).
pub fn chunk_sections(sections: &[PageSection], policy: &ChunkPolicy) -> Vec<Chunk> {
    let mut out = Vec::new();
    for section in sections {
        for text in chunk_text(&section.body, policy) {
            out.push(Chunk {
                id: (out.len() + 1).to_string(),
                text,
                source: section.url.clone(),
            });
        }
    }
    out
}
