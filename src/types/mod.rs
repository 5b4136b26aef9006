//! Core data types for synthetic embedding generation.
//!
//! - `Vector`: fixed-length sequence of `f64` components
//! - `Basis`: ordered, append-only collection of equal-dimension vectors
//! - `SynthError`: error type for all operations
//! - `Result`: convenient result type alias

pub mod error;

pub use error::{Result, SynthError};

/// Ordered, fixed-length sequence of floating-point components.
///
/// Dimension is fixed at creation. Vectors carry no identity beyond their contents.
pub type Vector = Vec<f64>;

/// Ordered collection of vectors sharing one dimension.
///
/// Grows by append only.
pub type Basis = Vec<Vector>;
