//! Dense linear algebra over fixed-dimension vectors.
//!
//! Every binary operation checks dimensions up front and fails with
//! `SynthError::DimensionMismatch` instead of truncating to the shorter operand.

use crate::types::{Result, SynthError};

/// Default relative tolerance for independence checks.
pub const DEFAULT_INDEPENDENCE_TOLERANCE: f64 = 1e-9;

/// Ensure two operands share a dimension.
pub(crate) fn check_dimension(operation: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(SynthError::DimensionMismatch {
            operation,
            expected,
            actual,
        });
    }
    Ok(())
}

/// Sum of elementwise products.
///
/// # Errors
///
/// Returns `SynthError::DimensionMismatch` if lengths differ
pub fn dot(v1: &[f64], v2: &[f64]) -> Result<f64> {
    check_dimension("dot", v1.len(), v2.len())?;
    Ok(v1.iter().zip(v2.iter()).map(|(a, b)| a * b).sum())
}

/// Squared Euclidean norm, `dot(v, v)`.
pub fn norm_squared(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Check whether two vectors are linearly independent.
///
/// Two vectors are dependent when one is a scalar multiple of the other, which is
/// exactly when Cauchy-Schwarz holds with equality. The test is relative:
///
/// ```text
/// dependent  <=>  dot(a, b)^2 >= (1 - tolerance) * |a|^2 * |b|^2
/// ```
///
/// A zero vector is dependent on everything.
///
/// # Arguments
///
/// * `v1` - First vector
/// * `v2` - Second vector (same dimension)
/// * `tolerance` - Relative tolerance on `1 - cos^2`
///
/// # Errors
///
/// Returns `SynthError::DimensionMismatch` if lengths differ
pub fn is_linearly_independent(v1: &[f64], v2: &[f64], tolerance: f64) -> Result<bool> {
    let d = dot(v1, v2)?;
    let n1 = norm_squared(v1);
    let n2 = norm_squared(v2);

    if n1 == 0.0 || n2 == 0.0 {
        return Ok(false);
    }

    Ok(d * d < (1.0 - tolerance) * n1 * n2)
}

/// Check whether a whole set of vectors is linearly independent.
///
/// Builds the Gram matrix `G[i][j] = dot(v_i, v_j)` and eliminates it in place.
/// The set is independent iff every pivot stays above `tolerance` times the
/// original squared norm of its vector (full rank). For two vectors this agrees
/// with [`is_linearly_independent`].
///
/// An empty set is independent.
///
/// # Errors
///
/// Returns `SynthError::DimensionMismatch` if the vectors differ in dimension
pub fn is_independent_set(vectors: &[Vec<f64>], tolerance: f64) -> Result<bool> {
    let n = vectors.len();
    if n == 0 {
        return Ok(true);
    }

    let mut gram = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let g = dot(&vectors[i], &vectors[j])?;
            gram[i][j] = g;
            gram[j][i] = g;
        }
    }

    let scale: Vec<f64> = (0..n).map(|i| gram[i][i]).collect();

    for k in 0..n {
        let pivot = gram[k][k];
        if pivot <= tolerance * scale[k] || pivot <= 0.0 {
            return Ok(false);
        }

        for i in (k + 1)..n {
            let factor = gram[i][k] / pivot;
            for j in (k + 1)..n {
                let delta = factor * gram[k][j];
                gram[i][j] -= delta;
            }
        }
    }

    Ok(true)
}

/// Cosine of the angle between two vectors.
///
/// # Errors
///
/// Returns `SynthError::DimensionMismatch` if lengths differ, or
/// `SynthError::DegenerateInput` if either vector has zero norm
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Result<f64> {
    let d = dot(a, b)?;
    let na = norm_squared(a);
    let nb = norm_squared(b);

    if na == 0.0 || nb == 0.0 {
        return Err(SynthError::degenerate("cosine similarity of a zero vector"));
    }

    Ok(d / (na.sqrt() * nb.sqrt()))
}

/// Map a similarity score in [0, 1] to a dot product in [-1, 1].
pub fn score_to_dot(score: f64) -> f64 {
    2.0 * score - 1.0
}

/// Inverse of [`score_to_dot`].
pub fn dot_to_score(dot: f64) -> f64 {
    (dot + 1.0) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot() {
        assert_eq!(dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap(), 32.0);
        assert_eq!(dot(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_dot_dimension_mismatch() {
        let err = dot(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            SynthError::DimensionMismatch {
                operation: "dot",
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_norm_squared() {
        assert_eq!(norm_squared(&[3.0, 4.0]), 25.0);
        assert_eq!(norm_squared(&[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_pair_independence() {
        let tol = DEFAULT_INDEPENDENCE_TOLERANCE;
        let q = [-0.5, 0.24, 0.71];

        // Scalar multiples are dependent, including negative ones
        let scaled: Vec<f64> = q.iter().map(|x| x * -2.5).collect();
        assert!(!is_linearly_independent(&q, &scaled, tol).unwrap());
        assert!(!is_linearly_independent(&q, &q, tol).unwrap());

        assert!(is_linearly_independent(&q, &[0.0, 0.0, 0.8451], tol).unwrap());
        assert!(is_linearly_independent(&[1.0, 0.0], &[0.0, 1.0], tol).unwrap());
    }

    #[test]
    fn test_zero_vector_is_dependent() {
        let tol = DEFAULT_INDEPENDENCE_TOLERANCE;
        assert!(!is_linearly_independent(&[0.0, 0.0], &[1.0, 2.0], tol).unwrap());
        assert!(!is_independent_set(&[vec![1.0, 0.0], vec![0.0, 0.0]], tol).unwrap());
    }

    #[test]
    fn test_set_independence() {
        let tol = DEFAULT_INDEPENDENCE_TOLERANCE;

        let standard = vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ];
        assert!(is_independent_set(&standard, tol).unwrap());

        // Third vector is the sum of the first two
        let dependent = vec![
            vec![1.0, 2.0, 0.0],
            vec![0.0, 1.0, 1.0],
            vec![1.0, 3.0, 1.0],
        ];
        assert!(!is_independent_set(&dependent, tol).unwrap());

        // Four vectors in 3-space can never be independent
        let mut overfull = standard.clone();
        overfull.push(vec![0.3, -0.2, 0.9]);
        assert!(!is_independent_set(&overfull, tol).unwrap());

        assert!(is_independent_set(&[], tol).unwrap());
    }

    #[test]
    fn test_set_check_agrees_with_pair_check() {
        let tol = DEFAULT_INDEPENDENCE_TOLERANCE;
        let a = vec![0.2, -0.7, 0.1];
        let b = vec![0.4, -1.4, 0.2];
        let c = vec![0.4, -1.4, 0.3];

        assert_eq!(
            is_independent_set(&[a.clone(), b.clone()], tol).unwrap(),
            is_linearly_independent(&a, &b, tol).unwrap()
        );
        assert_eq!(
            is_independent_set(&[a.clone(), c.clone()], tol).unwrap(),
            is_linearly_independent(&a, &c, tol).unwrap()
        );
    }

    #[test]
    fn test_set_dimension_mismatch() {
        let err = is_independent_set(&[vec![1.0, 0.0], vec![1.0]], 1e-9).unwrap_err();
        assert!(matches!(err, SynthError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_cosine_similarity() {
        let a = [1.0, 2.0, 3.0];
        let c = [-1.0, -2.0, -3.0];
        assert!((cosine_similarity(&a, &a).unwrap() - 1.0).abs() < 1e-12);
        assert!((cosine_similarity(&a, &c).unwrap() + 1.0).abs() < 1e-12);
        assert!(cosine_similarity(&a, &[0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_score_mapping() {
        assert_eq!(score_to_dot(0.0), -1.0);
        assert_eq!(score_to_dot(0.5), 0.0);
        assert_eq!(score_to_dot(1.0), 1.0);
        assert!((dot_to_score(score_to_dot(0.8)) - 0.8).abs() < 1e-15);
    }
}
