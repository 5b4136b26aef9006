//! Gram-Schmidt projection against an existing basis.
//!
//! ```text
//! candidate = random_vector(dim)
//! for b in basis:
//!     candidate -= (dot(candidate, b) / dot(b, b)) * b
//! ```
//!
//! Projection is sequential, one basis vector at a time. For an orthogonal basis
//! the order does not change the result beyond rounding.

use crate::linalg::{check_dimension, dot, norm_squared};
use crate::otel::{generation_span, GenerationOp};
use crate::random::normalized_vector;
use crate::types::{Result, SynthError, Vector};
use rand::RngCore;

/// Return a random vector orthogonal to every vector in `basis`.
///
/// # Arguments
///
/// * `rng` - Random source for the candidate
/// * `dimension` - Target dimension
/// * `basis` - Zero or more basis vectors of `dimension`, assumed mutually orthogonal
///
/// # Returns
///
/// Vector of `dimension` with `|dot(result, b)|` at rounding level for each `b`
///
/// # Errors
///
/// Returns error if:
/// - A basis vector has a different dimension (`DimensionMismatch`)
/// - A basis vector has zero norm (`DegenerateInput`)
/// - The random source fails (`GenerationError`)
///
/// # Example
///
/// ```rust
/// use percolate_synth::generator::orthogonal_vector;
/// use percolate_synth::linalg::dot;
/// use percolate_synth::random::seeded_rng;
///
/// let query = vec![-0.5, 0.24, 0.71];
/// let v = orthogonal_vector(&mut seeded_rng(3), 3, &[query.clone()]).unwrap();
/// assert!(dot(&v, &query).unwrap().abs() < 1e-12);
/// ```
pub fn orthogonal_vector<R: RngCore + ?Sized>(
    rng: &mut R,
    dimension: usize,
    basis: &[Vector],
) -> Result<Vector> {
    let span = generation_span(GenerationOp::Orthogonal, dimension);
    let _guard = span.enter();

    let norms = validate_basis(dimension, basis)?;
    let mut candidate = normalized_vector(rng, dimension)?;

    for (b, norm_b2) in basis.iter().zip(norms) {
        let coefficient = dot(&candidate, b)? / norm_b2;
        for (c, bi) in candidate.iter_mut().zip(b.iter()) {
            *c -= coefficient * bi;
        }
    }

    Ok(candidate)
}

/// Check basis dimensions and norms before drawing, returning each squared norm.
fn validate_basis(dimension: usize, basis: &[Vector]) -> Result<Vec<f64>> {
    basis
        .iter()
        .enumerate()
        .map(|(i, b)| {
            check_dimension("orthogonal_vector", dimension, b.len())?;
            let norm_b2 = norm_squared(b);
            if norm_b2 == 0.0 || !norm_b2.is_finite() {
                return Err(SynthError::degenerate(format!(
                    "basis vector {} has norm^2 {}",
                    i, norm_b2
                )));
            }
            Ok(norm_b2)
        })
        .collect()
}
