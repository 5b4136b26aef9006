//! Tracing instrumentation for generator operations.
//!
//! **Span naming**: `{synth.op} dim={dimension}`
//! - Example: `orthogonal dim=3`, `score dim=1536`
//!
//! All spans use the `INTERNAL` kind since generation is in-process work.
//!
//! # Example
//!
//! ```rust,ignore
//! use percolate_synth::otel::{generation_span, GenerationOp};
//!
//! let span = generation_span(GenerationOp::Orthogonal, 3);
//! let _guard = span.entered();
//! ```

pub mod span;

pub use span::{generation_span, record_attempts, GenerationOp};
