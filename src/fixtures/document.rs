//! Fixture documents and serialized fixture sets.

use crate::fixtures::embedder::MockEmbedder;
use crate::linalg::{dot, dot_to_score};
use crate::types::{Result, SynthError, Vector};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Document label paired with its target similarity score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredDocument {
    /// Document text; doubles as the mock embedder lookup key.
    #[serde(alias = "PageContent")]
    pub page_content: String,

    /// Target similarity to the query, in [0, 1].
    #[serde(alias = "Score")]
    pub score: f64,
}

impl ScoredDocument {
    pub fn new(page_content: impl Into<String>, score: f64) -> Self {
        Self {
            page_content: page_content.into(),
            score,
        }
    }
}

/// Document with its generated embedding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddedDocument {
    pub page_content: String,
    pub score: f64,
    pub embedding: Vector,
}

impl EmbeddedDocument {
    /// Score actually realized against `query`, `(dot + 1) / 2`.
    pub fn implied_score(&self, query: &[f64]) -> Result<f64> {
        Ok(dot_to_score(dot(query, &self.embedding)?))
    }

    /// Embedding narrowed to `f32`, the width most vector stores take.
    pub fn embedding_f32(&self) -> Vec<f32> {
        self.embedding.iter().map(|&x| x as f32).collect()
    }
}

/// Query vector plus embedded documents, ready to load into a search test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureSet {
    pub dimension: usize,

    /// Base seed the document vectors were derived from.
    pub seed: u64,

    pub query: Vector,
    pub documents: Vec<EmbeddedDocument>,
}

impl FixtureSet {
    /// Look up a document by its content.
    pub fn document(&self, page_content: &str) -> Option<&EmbeddedDocument> {
        self.documents.iter().find(|d| d.page_content == page_content)
    }

    /// Mock embedder answering with this set's vectors.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::DuplicateDocument` if two documents share content
    pub fn embedder(&self) -> Result<MockEmbedder> {
        let mut embedder = MockEmbedder::new(self.query.clone());
        for doc in &self.documents {
            embedder.insert(doc.page_content.clone(), doc.embedding.clone())?;
        }
        Ok(embedder)
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read a fixture set written by [`FixtureSet::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Read a list of scored documents from a `.json`, `.yaml`, or `.yml` file.
///
/// # Errors
///
/// Returns `SynthError::ConfigError` for other extensions, or the
/// parse error of the matching format
pub fn load_documents(path: &Path) -> Result<Vec<ScoredDocument>> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    let content = fs::read_to_string(path)?;
    match extension.as_deref() {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        _ => Err(SynthError::config(format!(
            "Unsupported document file {} (expected .json, .yaml or .yml)",
            path.display()
        ))),
    }
}
