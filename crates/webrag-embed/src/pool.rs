//! Pooling and normalization for sentence embeddings.

use anyhow::Result;
use candle_core::Tensor;

/// Additive epsilon guarding the L2 divide against all-zero vectors.
pub const NORM_EPS: f32 = 1e-10;

/// Mean-pools `hidden` of shape `[B, T, H]` over the unmasked positions of
/// `attention_mask` (`[B, T]`), yielding `[B, H]`.
pub fn masked_mean(hidden: &Tensor, attention_mask: &Tensor) -> Result<Tensor> {
    let dims = hidden.dims();
    anyhow::ensure!(dims.len() == 3, "hidden shape must be [B,T,H]");
    let mask = attention_mask
        .to_device(hidden.device())?
        .to_dtype(hidden.dtype())?;
    let mask_3d = mask.unsqueeze(2)?.broadcast_as(hidden.shape())?;
    let masked = (hidden * &mask_3d)?;
    let summed = masked.sum(1)?;
    let lengths = mask.sum(1)?.unsqueeze(1)?.to_dtype(summed.dtype())?;
    Ok(summed.broadcast_div(&lengths)?)
}

/// Divides each row of `emb` (`[B, H]`) by its epsilon-guarded L2 norm.
pub fn l2_normalize(emb: &Tensor) -> Result<Tensor> {
    let norm = emb.sqr()?.sum_keepdim(1)?.sqrt()?;
    let eps = Tensor::new(&[NORM_EPS], emb.device())?
        .to_dtype(emb.dtype())?
        .unsqueeze(0)?;
    let norm = norm.broadcast_add(&eps)?;
    Ok(emb.broadcast_div(&norm)?)
}

/// In-place epsilon-guarded L2 normalization for a plain vector.
pub fn l2_normalize_slice(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt() + NORM_EPS;
    for x in v.iter_mut() {
        *x /= norm;
    }
}
