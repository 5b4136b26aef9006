//! Vector generators with controllable algebraic relationships.
//!
//! Building blocks, leaf-first:
//!
//! 1. **Orthogonal**: random vector with its components along a basis projected out
//! 2. **Independent set**: N mutually orthogonal vectors, each built against the previous ones
//! 3. **Score**: document vector whose dot product with a query hits `2S - 1`
//! 4. **Scaled**: collinear companion with an exact dot product
//!
//! [`EmbeddingGenerator`] owns the random source and solver configuration so
//! callers do not have to thread both through every call.
//!
//! # Example
//!
//! ```rust
//! use percolate_synth::generator::EmbeddingGenerator;
//! use percolate_synth::linalg::dot;
//!
//! let mut gen = EmbeddingGenerator::seeded(7);
//! let query = gen.normalized_vector(16).unwrap();
//! let doc = gen.score_vector_random(0.9, &query).unwrap();
//! assert!((dot(&query, &doc).unwrap() - 0.8).abs() < 1e-9);
//! ```

mod independent;
mod orthogonal;
mod scaled;
mod score;

pub use independent::independent_vector_set;
pub use orthogonal::orthogonal_vector;
pub use scaled::scaled_vector;
pub use score::{score_vector, SolverConfig, DEFAULT_MAX_ATTEMPTS};

use crate::config::GeneratorConfig;
use crate::random::{self, seeded_rng};
use crate::types::{Basis, Result, Vector};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Generator facade over an injected random source.
///
/// Generic over the source so tests can supply a fixed-seed or mock RNG.
/// Not synchronized; use one generator per thread.
#[derive(Debug)]
pub struct EmbeddingGenerator<R: RngCore = StdRng> {
    rng: R,
    solver: SolverConfig,
}

impl EmbeddingGenerator<StdRng> {
    /// Create a deterministic generator from a seed.
    pub fn seeded(seed: u64) -> Self {
        Self::new(seeded_rng(seed), SolverConfig::default())
    }

    /// Create a generator seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), SolverConfig::default())
    }

    /// Create a generator from configuration.
    ///
    /// Uses `config.seed` when set, OS entropy otherwise.
    pub fn from_config(config: &GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => seeded_rng(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, config.solver_config())
    }
}

impl<R: RngCore> EmbeddingGenerator<R> {
    /// Create a generator over an existing random source.
    pub fn new(rng: R, solver: SolverConfig) -> Self {
        Self { rng, solver }
    }

    /// Solver configuration in use.
    pub fn solver_config(&self) -> &SolverConfig {
        &self.solver
    }

    /// Draw one component in [-1, 1).
    pub fn normalized_component(&mut self) -> Result<f64> {
        random::normalized_component(&mut self.rng)
    }

    /// Draw a vector of `dimension` components in [-1, 1).
    pub fn normalized_vector(&mut self, dimension: usize) -> Result<Vector> {
        random::normalized_vector(&mut self.rng, dimension)
    }

    /// Random vector orthogonal to every vector in `basis`.
    pub fn orthogonal_vector(&mut self, dimension: usize, basis: &[Vector]) -> Result<Vector> {
        orthogonal_vector(&mut self.rng, dimension, basis)
    }

    /// `count` mutually orthogonal vectors of `dimension`.
    pub fn independent_vector_set(&mut self, count: usize, dimension: usize) -> Result<Basis> {
        independent_vector_set(&mut self.rng, count, dimension)
    }

    /// Solve the last component of `basis` for the target score against `query`.
    pub fn score_vector(&mut self, score: f64, query: &[f64], basis: Vector) -> Result<Vector> {
        score_vector(&mut self.rng, score, query, basis, &self.solver)
    }

    /// Draw fresh leading components, then solve for the target score.
    pub fn score_vector_random(&mut self, score: f64, query: &[f64]) -> Result<Vector> {
        let leading = query.len().saturating_sub(1);
        let mut basis = if leading == 0 {
            Vec::new()
        } else {
            self.normalized_vector(leading)?
        };
        basis.push(0.0);
        self.score_vector(score, query, basis)
    }

    /// Draw a random primary of `dimension` and its scaled companion.
    ///
    /// # Returns
    ///
    /// `(primary, companion)` with `dot(primary, companion) = 2 * score - 1`
    pub fn scaled_pair(&mut self, score: f64, dimension: usize) -> Result<(Vector, Vector)> {
        let primary = self.normalized_vector(dimension)?;
        let companion = scaled_vector(score, &primary)?;
        Ok((primary, companion))
    }
}
