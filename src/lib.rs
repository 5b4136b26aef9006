//! Percolate Synth - synthetic embeddings for vector-search test fixtures
//!
//! Produces vectors with controllable algebraic relationships instead of
//! running a real embedding model:
//! - Random vectors with 24-bit components in [-1, 1)
//! - Vectors orthogonal to an existing basis (Gram-Schmidt)
//! - Mutually orthogonal (linearly independent) vector sets
//! - Document vectors whose dot product with a query hits a target score
//!
//! All randomness comes from an injected `rand::RngCore`, so a fixed seed
//! reproduces a fixture exactly.

pub mod config;
pub mod fixtures;
pub mod generator;
pub mod linalg;
pub mod otel;
pub mod random;
pub mod types;

pub use config::GeneratorConfig;
pub use fixtures::{Embedder, FixtureBuilder, FixtureSet, MockEmbedder, ScoredDocument};
pub use generator::{
    independent_vector_set, orthogonal_vector, scaled_vector, score_vector, EmbeddingGenerator,
    SolverConfig,
};
pub use linalg::{dot, is_linearly_independent, norm_squared};
pub use random::{normalized_component, normalized_vector};
pub use types::{Basis, Result, SynthError, Vector};
