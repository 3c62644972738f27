//! Domain types shared by the pipeline stages.

use serde::{Deserialize, Serialize};

pub type ChunkId = String;

/// A normalized, sentence-bounded span of page text; the unit of retrieval.
///
/// - `id`: stringified 1-based counter, sequential across one chunking run.
///   Not content-addressed and not stable across rebuilds.
/// - `text`: whitespace-normalized chunk content.
/// - `source`: URL of the page the text was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub text: String,
    pub source: String,
}

/// One retrieval result: cosine similarity plus the matching chunk record.
///
/// `score` is in [-1, 1]; with unit-normalized embeddings on both sides it
/// stays in roughly [0, 1] in practice.
#[derive(Debug, Clone)]
pub struct RetrievalHit {
    pub score: f32,
    pub chunk: Chunk,
}
