//! Random component and vector generation.
//!
//! Components are drawn from an injected random source rather than a global one,
//! so fixtures are reproducible from a seed:
//!
//! ```text
//! n  <- uniform integer in [0, 2^24)
//! x  =  2 * (n / 2^24) - 1          // x in [-1, 1), 24-bit granularity
//! ```
//!
//! # Example
//!
//! ```rust
//! use percolate_synth::random::{normalized_vector, seeded_rng};
//!
//! let mut rng = seeded_rng(42);
//! let v = normalized_vector(&mut rng, 8).unwrap();
//! assert_eq!(v.len(), 8);
//! assert!(v.iter().all(|x| (-1.0..1.0).contains(x)));
//! ```

use crate::otel::{generation_span, GenerationOp};
use crate::types::{Basis, Result, SynthError, Vector};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;

/// Bits of randomness per component.
pub const COMPONENT_BITS: u32 = 24;

const COMPONENT_RANGE: u32 = 1 << COMPONENT_BITS;

/// Draw one component uniformly distributed over [-1, 1).
///
/// # Arguments
///
/// * `rng` - Random source
///
/// # Returns
///
/// Value in [-1, 1) with 24 bits of granularity
///
/// # Errors
///
/// Returns `SynthError::GenerationError` if the random source fails
pub fn normalized_component<R: RngCore + ?Sized>(rng: &mut R) -> Result<f64> {
    let mut bytes = [0u8; 4];
    rng.try_fill_bytes(&mut bytes)
        .map_err(|e| SynthError::generation("normalized component", e))?;

    let n = u32::from_le_bytes(bytes) & (COMPONENT_RANGE - 1);
    Ok(2.0 * (f64::from(n) / f64::from(COMPONENT_RANGE)) - 1.0)
}

/// Build a vector of `dimension` independent components.
///
/// Consumes exactly `dimension` draws from `rng`.
///
/// # Errors
///
/// Returns `SynthError::InvalidDimension` if `dimension` is zero, or
/// `SynthError::GenerationError` if the random source fails
pub fn normalized_vector<R: RngCore + ?Sized>(rng: &mut R, dimension: usize) -> Result<Vector> {
    if dimension == 0 {
        return Err(SynthError::InvalidDimension {
            operation: "normalized_vector",
            dimension,
        });
    }

    let span = generation_span(GenerationOp::Vector, dimension);
    let _guard = span.enter();

    (0..dimension).map(|_| normalized_component(rng)).collect()
}

/// Create a deterministic random source from a seed.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive a stable seed for a labeled item from a base seed.
///
/// Hashes `seed || label` with BLAKE3 and takes the first 8 bytes, so each label
/// gets its own stream and adding labels never shifts the others.
pub fn seed_for_label(seed: u64, label: &str) -> u64 {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&seed.to_le_bytes());
    hasher.update(label.as_bytes());

    let mut head = [0u8; 8];
    head.copy_from_slice(&hasher.finalize().as_bytes()[..8]);
    u64::from_le_bytes(head)
}

/// Generate `count` random vectors in parallel.
///
/// Each vector gets its own thread-confined `StdRng` seeded with `seed + index`,
/// so output does not depend on the rayon thread count.
///
/// # Errors
///
/// Returns `SynthError::InvalidDimension` if `dimension` is zero
pub fn par_normalized_vectors(seed: u64, count: usize, dimension: usize) -> Result<Basis> {
    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = seeded_rng(seed.wrapping_add(i as u64));
            normalized_vector(&mut rng, dimension)
        })
        .collect()
}
