//! Sentence embedding on top of candle.
//!
//! [`SentenceEncoder`] runs a BERT-class sentence-embedding model (e.g.
//! all-MiniLM-L6-v2) from local files: masked mean pooling over the final
//! hidden states, then an epsilon-guarded L2 normalization so that dot
//! product equals cosine similarity downstream. [`HashingEmbedder`] is a
//! deterministic stand-in for tests and offline runs.

use std::collections::HashMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use tokenizers::Tokenizer;
use twox_hash::XxHash64;

use webrag_core::config::{expand_path, EmbedConfig};
use webrag_core::traits::Embedder;

mod device;
mod pool;
mod tokenize;

pub use device::select_device;
pub use pool::{l2_normalize, l2_normalize_slice, masked_mean, NORM_EPS};
pub use tokenize::encode_padded;

/// Candle-backed sentence encoder loaded from a local model directory.
pub struct SentenceEncoder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dim: usize,
    max_len: usize,
}

impl SentenceEncoder {
    /// Loads `tokenizer.json`, `config.json` and the weights
    /// (`model.safetensors` preferred, `pytorch_model.bin` fallback) from
    /// `model_dir`.
    pub fn load(model_dir: &Path, max_len: usize) -> Result<Self> {
        let device = select_device();

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            anyhow!(
                "failed to load tokenizer from {}: {}",
                tokenizer_path.display(),
                e
            )
        })?;

        let config_path = model_dir.join("config.json");
        let config: BertConfig = serde_json::from_str(
            &fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?,
        )?;
        let dim = config.hidden_size;

        let vb = load_weights(model_dir, &device)?;
        let model = BertModel::load(vb, &config)?;
        tracing::info!(model_dir = %model_dir.display(), dim, "sentence encoder loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            dim,
            max_len,
        })
    }

    fn encode_one(&self, text: &str) -> Result<Vec<f32>> {
        let (input_ids, attention_mask) =
            encode_padded(&self.tokenizer, text, self.max_len, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = masked_mean(&hidden, &attention_mask)?;
        let normed = l2_normalize(&pooled)?;
        let row = normed
            .squeeze(0)?
            .to_device(&Device::Cpu)?
            .to_vec1::<f32>()?;
        Ok(row)
    }
}

impl Embedder for SentenceEncoder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            out.push(self.encode_one(text)?);
        }
        Ok(out)
    }
}

fn load_weights(model_dir: &Path, device: &Device) -> Result<VarBuilder<'static>> {
    let safetensors = model_dir.join("model.safetensors");
    if safetensors.exists() {
        let vb =
            unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors], DType::F32, device)? };
        return Ok(vb);
    }
    let pickle = model_dir.join("pytorch_model.bin");
    if pickle.exists() {
        let weights = candle_core::pickle::read_all(&pickle)?;
        let weights_map: HashMap<String, Tensor> = weights.into_iter().collect();
        return Ok(VarBuilder::from_tensors(weights_map, DType::F32, device));
    }
    Err(anyhow!(
        "no model.safetensors or pytorch_model.bin in {}",
        model_dir.display()
    ))
}

/// Deterministic hashed bag-of-words embedder. No model files required;
/// used by tests and `APP_USE_FAKE_EMBEDDINGS=1` runs.
pub struct HashingEmbedder {
    dim: usize,
}

impl HashingEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for HashingEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let mut v = vec![0f32; self.dim];
            for (i, token) in text.split_whitespace().enumerate() {
                let mut hasher = XxHash64::with_seed(0);
                token.hash(&mut hasher);
                let h = hasher.finish();
                let idx = (h as usize) % self.dim;
                let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
                v[idx] += val + (i as f32 % 3.0) * 0.01;
            }
            l2_normalize_slice(&mut v);
            out.push(v);
        }
        Ok(out)
    }
}

/// Builds the embedder described by `cfg`.
///
/// `APP_USE_FAKE_EMBEDDINGS=1` selects the hashing embedder; otherwise the
/// model directory is taken from `APP_MODEL_DIR`, then `cfg.model_dir`.
pub fn embedder_from_config(cfg: &EmbedConfig) -> Result<Box<dyn Embedder>> {
    let use_fake = std::env::var("APP_USE_FAKE_EMBEDDINGS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    if use_fake {
        tracing::info!(dim = cfg.dim, "using hashing embedder");
        return Ok(Box::new(HashingEmbedder::new(cfg.dim)));
    }
    let model_dir = resolve_model_dir(cfg)?;
    Ok(Box::new(SentenceEncoder::load(&model_dir, cfg.max_len)?))
}

fn resolve_model_dir(cfg: &EmbedConfig) -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("APP_MODEL_DIR") {
        let p = expand_path(&dir);
        if p.exists() {
            return Ok(p);
        }
    }
    if let Some(dir) = &cfg.model_dir {
        let p = expand_path(dir);
        if p.exists() {
            return Ok(p);
        }
        return Err(anyhow!(
            "configured embed.model_dir {} does not exist",
            p.display()
        ));
    }
    Err(anyhow!(
        "no embedding model directory; set embed.model_dir or APP_MODEL_DIR"
    ))
}
