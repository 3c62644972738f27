use webrag_core::config::EmbedConfig;
use webrag_embed::embedder_from_config;

#[test]
fn hashing_embedder_shapes_and_determinism() {
    // Force the hashing embedder to avoid loading model files
    std::env::set_var("APP_USE_FAKE_EMBEDDINGS", "1");

    let cfg = EmbedConfig::default();
    let embedder = embedder_from_config(&cfg).expect("embedder");
    assert_eq!(embedder.dim(), 384);

    let texts = vec!["hello world".to_string(), "hello world".to_string()];
    let embs = embedder.embed_batch(&texts).expect("embed_batch");
    let v1 = &embs[0];
    let v2 = &embs[1];

    assert_eq!(v1.len(), 384, "embedding dim follows the config");

    // Norm approximately 1.0
    let norm: f32 = v1.iter().map(|x| x * x).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() <= 1e-3, "vector is L2-normalized (norm={norm})");

    // Deterministic for same input
    for (a, b) in v1.iter().zip(v2.iter()) {
        assert!((a - b).abs() <= 1e-6);
    }

    // Different text points a different way
    let other = embedder
        .embed_batch(&["completely unrelated".to_string()])
        .expect("embed_batch");
    let dot: f32 = v1.iter().zip(other[0].iter()).map(|(a, b)| a * b).sum();
    assert!(dot < 0.99, "distinct inputs must not collapse to one vector");
}
