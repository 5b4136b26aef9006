//! Generation span helpers.

use tracing::{field, span, Level, Span};

/// Generator operation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOp {
    /// Random vector draw
    Vector,
    /// Gram-Schmidt projection against a basis
    Orthogonal,
    /// Mutually orthogonal set
    IndependentSet,
    /// Final-coordinate score solve
    Score,
    /// Collinear scaled companion
    Scaled,
    /// Labeled document fixture build
    Fixtures,
}

impl GenerationOp {
    /// Get operation name as string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Orthogonal => "orthogonal",
            Self::IndependentSet => "basis",
            Self::Score => "score",
            Self::Scaled => "scaled",
            Self::Fixtures => "fixtures",
        }
    }
}

/// Create generation span.
///
/// # Arguments
///
/// * `op` - Operation being performed
/// * `dimension` - Vector dimension the operation works in
///
/// # Returns
///
/// Tracing span with operation attributes. `synth.attempts` is left empty
/// for [`record_attempts`] to fill in.
pub fn generation_span(op: GenerationOp, dimension: usize) -> Span {
    span!(
        Level::DEBUG,
        "synth.generate",
        otel.name = format!("{} dim={}", op.as_str(), dimension),
        otel.kind = "internal",
        synth.op = op.as_str(),
        synth.dimension = dimension,
        synth.attempts = field::Empty,
    )
}

/// Record how many solver attempts an operation took on the current span.
pub fn record_attempts(attempts: usize) {
    Span::current().record("synth.attempts", attempts);
}
