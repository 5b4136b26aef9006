//! Collinear companion vectors with an exact target dot product.
//!
//! `v2 = v1 * (2S - 1) / |v1|^2`, so `dot(v1, v2) = 2S - 1` with no randomness.
//! Useful when a fixture needs an exact score and does not care that the two
//! vectors are parallel.

use crate::generator::score::validate_score;
use crate::linalg::{norm_squared, score_to_dot};
use crate::otel::{generation_span, GenerationOp};
use crate::types::{Result, SynthError, Vector};

/// Scale `primary` so its dot product with the result is `2 * score - 1`.
///
/// # Errors
///
/// Returns `SynthError::InvalidScore` for scores outside [0, 1], or
/// `SynthError::DegenerateInput` if `primary` has zero norm
pub fn scaled_vector(score: f64, primary: &[f64]) -> Result<Vector> {
    let span = generation_span(GenerationOp::Scaled, primary.len());
    let _guard = span.enter();

    validate_score(score)?;

    let norm2 = norm_squared(primary);
    if norm2 == 0.0 || !norm2.is_finite() {
        return Err(SynthError::degenerate(format!(
            "primary vector has norm^2 {}",
            norm2
        )));
    }

    let factor = score_to_dot(score) / norm2;
    Ok(primary.iter().map(|x| x * factor).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::linalg::dot;

    #[test]
    fn test_exact_dot_product() {
        let v1 = vec![0.2, -0.4, 0.9, 0.1];
        for score in [0.0, 0.17, 0.5, 0.9, 1.0] {
            let v2 = scaled_vector(score, &v1).unwrap();
            assert!((dot(&v1, &v2).unwrap() - score_to_dot(score)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_half_score_gives_zero_vector() {
        let v2 = scaled_vector(0.5, &[0.3, 0.4]).unwrap();
        assert_eq!(v2, vec![0.0, 0.0]);
    }

    #[test]
    fn test_zero_primary() {
        let err = scaled_vector(0.9, &[0.0, 0.0]).unwrap_err();
        assert!(matches!(err, SynthError::DegenerateInput(_)));
    }

    #[test]
    fn test_invalid_score() {
        assert!(matches!(
            scaled_vector(2.0, &[1.0]).unwrap_err(),
            SynthError::InvalidScore(_)
        ));
    }
}
