//! Mock embedder serving precomputed fixture vectors.

use crate::linalg::check_dimension;
use crate::types::{Result, SynthError, Vector};
use std::collections::HashMap;

/// Text-to-vector embedding interface.
pub trait Embedder {
    /// Embed a search query.
    fn embed_query(&self, text: &str) -> Result<Vector>;

    /// Embed documents, one vector per text, in order.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::UnknownDocument` for text the embedder cannot map
    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vector>>;

    /// Embedding dimensionality.
    fn dimensions(&self) -> usize;
}

/// Embedder that returns a fixed query vector for every query and looks
/// documents up by exact text.
#[derive(Debug, Clone)]
pub struct MockEmbedder {
    query_vector: Vector,
    documents: HashMap<String, Vector>,
}

impl MockEmbedder {
    /// Create an embedder with no documents.
    pub fn new(query_vector: Vector) -> Self {
        Self {
            query_vector,
            documents: HashMap::new(),
        }
    }

    /// Register the vector for a document text.
    ///
    /// # Errors
    ///
    /// Returns `SynthError::DimensionMismatch` if `vector` does not match the
    /// query dimension, or `SynthError::DuplicateDocument` if `text` is taken
    pub fn insert(&mut self, text: impl Into<String>, vector: Vector) -> Result<()> {
        check_dimension("mock_embedder_insert", self.query_vector.len(), vector.len())?;

        let text = text.into();
        if self.documents.contains_key(&text) {
            return Err(SynthError::DuplicateDocument(text));
        }
        self.documents.insert(text, vector);
        Ok(())
    }

    /// Number of registered documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl Embedder for MockEmbedder {
    fn embed_query(&self, _text: &str) -> Result<Vector> {
        Ok(self.query_vector.clone())
    }

    fn embed_documents(&self, texts: &[&str]) -> Result<Vec<Vector>> {
        texts
            .iter()
            .map(|text| {
                self.documents
                    .get(*text)
                    .cloned()
                    .ok_or_else(|| SynthError::UnknownDocument(text.to_string()))
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        self.query_vector.len()
    }
}
