use webrag_core::types::Chunk;
use webrag_store::{dot, VectorStore};

fn chunk(id: &str, text: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: text.to_string(),
        source: format!("https://example.com/{id}"),
    }
}

fn unit(v: &[f32]) -> Vec<f32> {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    v.iter().map(|x| x / norm).collect()
}

#[test]
fn build_rejects_count_mismatch() {
    let err = VectorStore::build(vec![chunk("1", "a")], vec![]).expect_err("must fail");
    assert!(format!("{err:#}").contains("1 chunks vs 0 embeddings"));
}

#[test]
fn build_rejects_ragged_rows() {
    let err = VectorStore::build(
        vec![chunk("1", "a"), chunk("2", "b")],
        vec![vec![1.0, 0.0], vec![0.0, 1.0, 0.0]],
    )
    .expect_err("must fail");
    assert!(format!("{err:#}").contains("Dimension mismatch"));
}

#[test]
fn save_load_round_trip_preserves_rows() {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    let emb_path = tmp.path().join("embeddings.json");
    let meta_path = tmp.path().join("metadata.json");

    let store = VectorStore::build(
        vec![chunk("1", "first"), chunk("2", "second")],
        vec![unit(&[1.0, 0.0]), unit(&[0.0, 1.0])],
    )
    .expect("build");
    store.save(&emb_path, &meta_path).expect("save");

    let loaded = VectorStore::load(&emb_path, &meta_path).expect("load");
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded.dim(), 2);

    // Iterating all rows via search never goes out of range
    let hits = loaded.search(&unit(&[1.0, 1.0]), 10).expect("search");
    assert_eq!(hits.len(), 2);
}

#[test]
fn load_detects_stale_metadata() {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    let emb_path = tmp.path().join("embeddings.json");
    let meta_path = tmp.path().join("metadata.json");

    let store = VectorStore::build(
        vec![chunk("1", "first"), chunk("2", "second")],
        vec![unit(&[1.0, 0.0]), unit(&[0.0, 1.0])],
    )
    .expect("build");
    store.save(&emb_path, &meta_path).expect("save");

    // Metadata rebuilt without re-embedding: one record too few
    std::fs::write(
        &meta_path,
        serde_json::to_string(&vec![chunk("1", "first")]).expect("json"),
    )
    .expect("write");
    let err = VectorStore::load(&emb_path, &meta_path).expect_err("must fail");
    assert!(format!("{err:#}").contains("re-run webrag-index"));
}

#[test]
fn missing_artifacts_name_the_producing_stage() {
    let tmp = tempfile::TempDir::new().expect("tempdir");
    let err = VectorStore::load(
        &tmp.path().join("embeddings.json"),
        &tmp.path().join("metadata.json"),
    )
    .expect_err("must fail");
    assert!(format!("{err:#}").contains("webrag-index"));
}

#[test]
fn identical_row_is_top_hit_with_score_one() {
    let query = unit(&[0.3, 0.5, 0.8]);
    let store = VectorStore::build(
        vec![chunk("1", "match"), chunk("2", "other")],
        vec![query.clone(), unit(&[-0.8, 0.1, 0.2])],
    )
    .expect("build");

    let hits = store.search(&query, 1).expect("search");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].chunk.id, "1");
    assert!((hits[0].score - 1.0).abs() < 1e-5);
}

#[test]
fn ties_resolve_to_the_earlier_row() {
    let v = unit(&[1.0, 1.0]);
    let store = VectorStore::build(
        vec![chunk("1", "first"), chunk("2", "duplicate")],
        vec![v.clone(), v.clone()],
    )
    .expect("build");

    let hits = store.search(&v, 2).expect("search");
    assert_eq!(hits[0].chunk.id, "1");
    assert_eq!(hits[1].chunk.id, "2");
}

#[test]
fn near_duplicate_outranks_unrelated_chunk() {
    // Chunk A points almost exactly where the query does; B is orthogonal.
    let store = VectorStore::build(
        vec![
            chunk("1", "Gold loans require collateral."),
            chunk("2", "The cafeteria opens at nine."),
        ],
        vec![unit(&[0.99, 0.1, 0.0]), unit(&[0.0, 0.1, 0.99])],
    )
    .expect("build");

    let query = unit(&[1.0, 0.05, 0.0]);
    let hits = store.search(&query, 2).expect("search");
    assert_eq!(hits[0].chunk.id, "1");
    assert!(hits[0].score > hits[1].score);
}

#[test]
fn dot_matches_manual_sum() {
    assert!((dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]) - 32.0).abs() < 1e-6);
}
