//! Mutually orthogonal vector sets.

use crate::generator::orthogonal::orthogonal_vector;
use crate::otel::{generation_span, GenerationOp};
use crate::types::{Basis, Result, SynthError};
use rand::RngCore;

/// Build `count` mutually orthogonal vectors of `dimension`.
///
/// Each vector is projected against all previously accumulated ones, so the
/// set is pairwise orthogonal (hence linearly independent) up to rounding.
/// No independence re-check or retry is needed.
///
/// # Arguments
///
/// * `rng` - Random source
/// * `count` - Number of vectors (0 returns an empty basis)
/// * `dimension` - Vector dimension
///
/// # Errors
///
/// Returns `SynthError::BasisOverflow` before drawing anything if
/// `count > dimension`, since the space cannot hold more orthogonal directions
pub fn independent_vector_set<R: RngCore + ?Sized>(
    rng: &mut R,
    count: usize,
    dimension: usize,
) -> Result<Basis> {
    let span = generation_span(GenerationOp::IndependentSet, dimension);
    let _guard = span.enter();

    if count > dimension {
        return Err(SynthError::BasisOverflow { count, dimension });
    }

    let mut vectors: Basis = Vec::with_capacity(count);
    for _ in 0..count {
        let v = orthogonal_vector(rng, dimension, &vectors)?;
        vectors.push(v);
    }

    Ok(vectors)
}
