//! On-disk vector store: normalized embedding matrix plus parallel chunk
//! metadata, with brute-force cosine (dot product) top-K retrieval.
//!
//! Each matrix row carries its chunk id explicitly, so a store rebuilt with
//! stale metadata fails loudly at load time instead of silently returning
//! mis-attributed chunks.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use webrag_core::error::{require_artifact, Error};
use webrag_core::types::{Chunk, ChunkId, RetrievalHit};

/// One matrix row: the chunk it belongs to and its L2-normalized vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRow {
    pub id: ChunkId,
    pub vector: Vec<f32>,
}

/// Embedding artifact layout (`embeddings.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingMatrix {
    pub dim: usize,
    pub rows: Vec<EmbeddingRow>,
}

/// Embedding matrix paired with its chunk metadata, row order = record order.
#[derive(Debug)]
pub struct VectorStore {
    matrix: EmbeddingMatrix,
    chunks: Vec<Chunk>,
}

impl VectorStore {
    /// Pairs chunks with their vectors, validating counts and dimensions.
    pub fn build(chunks: Vec<Chunk>, embeddings: Vec<Vec<f32>>) -> anyhow::Result<Self> {
        if chunks.len() != embeddings.len() {
            return Err(Error::ArtifactMismatch(format!(
                "{} chunks vs {} embeddings",
                chunks.len(),
                embeddings.len()
            ))
            .into());
        }
        let dim = embeddings.first().map_or(0, Vec::len);
        let mut rows = Vec::with_capacity(embeddings.len());
        for (chunk, vector) in chunks.iter().zip(embeddings) {
            if vector.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    got: vector.len(),
                }
                .into());
            }
            rows.push(EmbeddingRow {
                id: chunk.id.clone(),
                vector,
            });
        }
        Ok(Self {
            matrix: EmbeddingMatrix { dim, rows },
            chunks,
        })
    }

    /// Persists both artifacts, creating parent directories as needed.
    pub fn save(&self, embeddings_path: &Path, metadata_path: &Path) -> anyhow::Result<()> {
        for path in [embeddings_path, metadata_path] {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
        }
        let matrix = serde_json::to_string(&self.matrix)?;
        fs::write(embeddings_path, matrix)
            .with_context(|| format!("failed to write {}", embeddings_path.display()))?;
        let metadata = serde_json::to_string_pretty(&self.chunks)?;
        fs::write(metadata_path, metadata)
            .with_context(|| format!("failed to write {}", metadata_path.display()))?;
        Ok(())
    }

    /// Loads and cross-validates both artifacts produced by `webrag-index`.
    pub fn load(embeddings_path: &Path, metadata_path: &Path) -> anyhow::Result<Self> {
        require_artifact(embeddings_path, "webrag-index")?;
        require_artifact(metadata_path, "webrag-index")?;

        let matrix: EmbeddingMatrix = serde_json::from_str(
            &fs::read_to_string(embeddings_path)
                .with_context(|| format!("failed to read {}", embeddings_path.display()))?,
        )
        .with_context(|| format!("malformed {}", embeddings_path.display()))?;
        let chunks: Vec<Chunk> = serde_json::from_str(
            &fs::read_to_string(metadata_path)
                .with_context(|| format!("failed to read {}", metadata_path.display()))?,
        )
        .with_context(|| format!("malformed {}", metadata_path.display()))?;

        if matrix.rows.len() != chunks.len() {
            return Err(Error::ArtifactMismatch(format!(
                "{} embedding rows vs {} metadata records; re-run webrag-index",
                matrix.rows.len(),
                chunks.len()
            ))
            .into());
        }
        for (row, chunk) in matrix.rows.iter().zip(&chunks) {
            if row.id != chunk.id {
                return Err(Error::ArtifactMismatch(format!(
                    "embedding row id {} does not match metadata id {}; re-run webrag-index",
                    row.id, chunk.id
                ))
                .into());
            }
            if row.vector.len() != matrix.dim {
                return Err(Error::DimensionMismatch {
                    expected: matrix.dim,
                    got: row.vector.len(),
                }
                .into());
            }
        }
        tracing::debug!(rows = matrix.rows.len(), dim = matrix.dim, "store loaded");
        Ok(Self { matrix, chunks })
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn dim(&self) -> usize {
        self.matrix.dim
    }

    /// Scores every row against `query` and returns the top `k` hits.
    ///
    /// Both sides are unit-normalized, so the dot product is the cosine
    /// similarity. Equal scores resolve to the earlier row index; callers can
    /// rely on that ordering.
    pub fn search(&self, query: &[f32], k: usize) -> anyhow::Result<Vec<RetrievalHit>> {
        if !self.is_empty() && query.len() != self.matrix.dim {
            return Err(Error::DimensionMismatch {
                expected: self.matrix.dim,
                got: query.len(),
            }
            .into());
        }
        let mut scored: Vec<(usize, f32)> = self
            .matrix
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i, dot(&row.vector, query)))
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });
        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, score)| RetrievalHit {
                score,
                chunk: self.chunks[i].clone(),
            })
            .collect())
    }
}

/// Plain dot product; cosine similarity for unit-normalized inputs.
pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
