#![allow(dead_code)]

use std::path::{Path, PathBuf};

use loomview_store::DocumentStore;
use tempfile::TempDir;

pub const TISSUES: [&str; 3] = ["lung", "liver", "brain"];

/// Three genes over `n_a + n_b` samples. `Batch` is `n_a` times "A"
/// followed by `n_b` times "B".
pub fn batch_store(n_a: usize, n_b: usize) -> DocumentStore {
    let n = n_a + n_b;
    let batch: Vec<&str> = (0..n).map(|i| if i < n_a { "A" } else { "B" }).collect();
    let tissue: Vec<&str> = (0..n).map(|i| TISSUES[i % 3]).collect();
    let cluster: Vec<f64> = (0..n).map(|i| (i % 4) as f64).collect();
    let x: Vec<f64> = (0..n).map(|i| i as f64 * 0.5).collect();
    let y: Vec<f64> = (0..n).map(|i| (n - i) as f64).collect();

    let matrix = vec![
        (0..n).map(|i| i as f64).collect(),
        vec![1.0; n],
        (0..n).map(|i| (i % 7) as f64).collect(),
    ];

    DocumentStore::new(matrix)
        .with_row_attr("Symbol", vec!["Cd4", "Cd8a", "Gapdh"])
        .with_row_attr("Entrez_ID", vec![12504.0, 12525.0, 14433.0])
        .with_col_attr("Batch", batch)
        .with_col_attr("Tissue", tissue)
        .with_col_attr("Cluster", cluster)
        .with_col_attr("X", x)
        .with_col_attr("Y", y)
        .with_attr("Classes", "Batch,Tissue,Cluster")
}

pub fn write_store(dir: &TempDir, name: &str, store: &DocumentStore) -> PathBuf {
    let path = dir.path().join(name);
    store.write(&path).unwrap();
    path
}

/// Temp dir holding `store.json` built by [`batch_store`].
pub fn batch_fixture(n_a: usize, n_b: usize) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_store(&dir, "store.json", &batch_store(n_a, n_b));
    (dir, path)
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
