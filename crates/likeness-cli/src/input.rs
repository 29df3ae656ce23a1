//! Embedding and batch file formats.

use anyhow::{Context, Result};
use likeness_core::Embedding;
use serde::Deserialize;
use std::path::Path;

/// An embedding file holds either a bare JSON array or an object with
/// `values` and an optional `model_version`.
#[derive(Deserialize)]
#[serde(untagged)]
enum EmbeddingFile {
    Bare(Vec<f32>),
    Labelled(Embedding),
}

pub fn parse_embedding(text: &str) -> Result<Embedding, serde_json::Error> {
    Ok(match serde_json::from_str::<EmbeddingFile>(text)? {
        EmbeddingFile::Bare(values) => Embedding::new(values),
        EmbeddingFile::Labelled(embedding) => embedding,
    })
}

pub fn read_embedding(path: &Path) -> Result<Embedding> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let embedding =
        parse_embedding(&text).with_context(|| format!("failed to parse {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        dim = embedding.dimension(),
        model_version = ?embedding.model_version,
        "loaded embedding"
    );
    Ok(embedding)
}

/// One line of a batch file.
#[derive(Debug, Clone, Deserialize)]
pub struct ComparePair {
    pub id: serde_json::Value,
    pub a: Vec<f32>,
    pub b: Vec<f32>,
}

/// Parse JSON Lines; blank lines are skipped. Errors name the 1-based line.
pub fn parse_pairs(text: &str) -> Result<Vec<ComparePair>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            serde_json::from_str::<ComparePair>(line).with_context(|| format!("batch line {}", i + 1))
        })
        .collect()
}
