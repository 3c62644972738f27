/// Text-to-vector encoder used at both index and query time.
///
/// Index and query must go through the same implementation: vectors are only
/// comparable when both sides share the model and the normalization path.
pub trait Embedder: Send + Sync {
    /// Output dimensionality of every returned vector.
    fn dim(&self) -> usize;

    /// Encodes each input text into one L2-normalized vector, in order.
    fn embed_batch(&self, texts: &[String]) -> anyhow::Result<Vec<Vec<f32>>>;
}
