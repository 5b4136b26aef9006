//! Labeled document fixtures and a mock embedder over them.
//!
//! A fixture set pairs one query vector with document vectors whose
//! query/document dot products hit each document's target score:
//!
//! ```rust
//! use percolate_synth::fixtures::{Embedder, FixtureBuilder, ScoredDocument};
//!
//! let docs = vec![
//!     ScoredDocument::new("Gabriel García Márquez", 0.80),
//!     ScoredDocument::new("Gabriela Mistral", 0.67),
//!     ScoredDocument::new("Miguel de Cervantes", 0.09),
//! ];
//!
//! let fixtures = FixtureBuilder::new(3, 42)
//!     .build(Some(vec![-0.5, 0.24, 0.71]), &docs)
//!     .unwrap();
//!
//! let embedder = fixtures.embedder().unwrap();
//! let v = embedder.embed_documents(&["Gabriela Mistral"]).unwrap();
//! assert_eq!(v[0].len(), 3);
//! ```

mod builder;
mod document;
mod embedder;

pub use builder::FixtureBuilder;
pub use document::{load_documents, EmbeddedDocument, FixtureSet, ScoredDocument};
pub use embedder::{Embedder, MockEmbedder};
