use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{} not found. Run `{producer}` first.", path.display())]
    MissingArtifact { path: PathBuf, producer: &'static str },

    #[error("Artifact mismatch: {0}")]
    ArtifactMismatch(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails with [`Error::MissingArtifact`] when an upstream stage's output file
/// is absent, naming the binary that produces it.
pub fn require_artifact(path: &Path, producer: &'static str) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::MissingArtifact {
            path: path.to_path_buf(),
            producer,
        })
    }
}
