//! Score-targeted document vectors.
//!
//! Given a query `q` of dimension `D` and a document vector `b` whose first
//! `D - 1` components are fixed, solve for the last component so that
//!
//! ```text
//! dot(q, b) = 2S - 1        (S in [0, 1] mapped onto [-1, 1])
//! b[D-1]    = (2S - 1 - sum_{i<D-1} q[i] * b[i]) / q[D-1]
//! ```
//!
//! If the solved `b` lies along `q` the leading components are redrawn and the
//! solve is repeated, up to `SolverConfig::max_attempts` times.

use crate::linalg::{
    check_dimension, dot, is_linearly_independent, score_to_dot, DEFAULT_INDEPENDENCE_TOLERANCE,
};
use crate::otel::{generation_span, record_attempts, GenerationOp};
use crate::random::normalized_vector;
use crate::types::{Result, SynthError, Vector};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default retry budget for the score solver.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Parameters for the score solver.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Maximum solve attempts before giving up with `ConvergenceError`.
    pub max_attempts: usize,

    /// Relative tolerance for the query/document independence check.
    pub tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            tolerance: DEFAULT_INDEPENDENCE_TOLERANCE,
        }
    }
}

/// Reject scores outside [0, 1] and non-finite scores.
pub(crate) fn validate_score(score: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&score) {
        return Err(SynthError::InvalidScore(score));
    }
    Ok(())
}

/// Solve the last component of `basis` so that `dot(query, basis) = 2 * score - 1`.
///
/// The leading components of `basis` are used as given on the first attempt.
/// Later attempts redraw all of them from `rng`; recomputing with the same
/// leading components would reproduce the same collinear result.
///
/// # Arguments
///
/// * `rng` - Random source for redraws
/// * `score` - Target similarity in [0, 1]
/// * `query` - Fixed query vector of dimension `D >= 2`
/// * `basis` - Document vector of dimension `D`; its last component is overwritten
/// * `config` - Retry budget and independence tolerance
///
/// # Returns
///
/// The solved document vector
///
/// # Errors
///
/// Returns error if:
/// - `score` is outside [0, 1] (`InvalidScore`)
/// - `D < 2` (`InvalidDimension`)
/// - `basis` and `query` differ in length (`DimensionMismatch`)
/// - `query[D-1] == 0`, or the solved component is not finite (`DegenerateInput`)
/// - every attempt is collinear with `query` (`ConvergenceError`)
///
/// # Example
///
/// ```rust
/// use percolate_synth::generator::{score_vector, SolverConfig};
/// use percolate_synth::linalg::dot;
/// use percolate_synth::random::seeded_rng;
///
/// let q = vec![-0.5, 0.24, 0.71];
/// let b = score_vector(&mut seeded_rng(1), 0.8, &q, vec![0.0, 0.0, 0.0], &SolverConfig::default()).unwrap();
/// assert!((dot(&q, &b).unwrap() - 0.6).abs() < 1e-12);
/// ```
pub fn score_vector<R: RngCore + ?Sized>(
    rng: &mut R,
    score: f64,
    query: &[f64],
    mut basis: Vector,
    config: &SolverConfig,
) -> Result<Vector> {
    let dimension = query.len();
    let span = generation_span(GenerationOp::Score, dimension);
    let _guard = span.enter();

    validate_score(score)?;

    if dimension < 2 {
        return Err(SynthError::InvalidDimension {
            operation: "score_vector",
            dimension,
        });
    }
    check_dimension("score_vector", dimension, basis.len())?;

    let last = dimension - 1;
    let query_last = query[last];
    if query_last == 0.0 {
        return Err(SynthError::degenerate(format!(
            "query component {} is zero; cannot solve for the last document component",
            last
        )));
    }

    let target = score_to_dot(score);

    for attempt in 1..=config.max_attempts {
        if attempt > 1 {
            let leading = normalized_vector(rng, last)?;
            basis[..last].copy_from_slice(&leading);
        }

        let partial = dot(&query[..last], &basis[..last])?;
        let solved = (target - partial) / query_last;
        if !solved.is_finite() {
            return Err(SynthError::degenerate(format!(
                "solved component is {} (partial {}, query[{}] = {})",
                solved, partial, last, query_last
            )));
        }
        basis[last] = solved;

        if is_linearly_independent(query, &basis, config.tolerance)? {
            record_attempts(attempt);
            return Ok(basis);
        }

        debug!(attempt, "document vector collinear with query, redrawing leading components");
    }

    warn!(
        attempts = config.max_attempts,
        score, "score solver exhausted its retry budget"
    );
    Err(SynthError::ConvergenceError {
        attempts: config.max_attempts,
    })
}
