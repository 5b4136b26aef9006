//! Fixture set construction.

use crate::fixtures::document::{EmbeddedDocument, FixtureSet, ScoredDocument};
use crate::generator::{score_vector, SolverConfig};
use crate::linalg::check_dimension;
use crate::otel::{generation_span, GenerationOp};
use crate::random::{normalized_vector, seed_for_label, seeded_rng};
use crate::types::{Result, SynthError, Vector};
use std::collections::HashSet;
use tracing::debug;

/// Label used to derive the query's seed when no query is supplied.
const QUERY_LABEL: &str = "\u{0}query";

/// Builds query/document fixtures with target scores.
///
/// Every document draws from its own RNG seeded by `seed_for_label(seed, page_content)`,
/// so adding, removing or reordering documents leaves the other vectors unchanged.
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    dimension: usize,
    seed: u64,
    solver: SolverConfig,
}

impl FixtureBuilder {
    /// Create a builder for `dimension`-sized vectors derived from `seed`.
    pub fn new(dimension: usize, seed: u64) -> Self {
        Self {
            dimension,
            seed,
            solver: SolverConfig::default(),
        }
    }

    /// Override the score solver parameters.
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Build the fixture set.
    ///
    /// # Arguments
    ///
    /// * `query` - Query vector; drawn from the seed when `None`
    /// * `documents` - Labeled documents with target scores
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - `query` has the wrong dimension (`DimensionMismatch`)
    /// - two documents share content (`DuplicateDocument`)
    /// - any score solve fails (see [`score_vector`])
    pub fn build(&self, query: Option<Vector>, documents: &[ScoredDocument]) -> Result<FixtureSet> {
        let span = generation_span(GenerationOp::Fixtures, self.dimension);
        let _guard = span.enter();

        let query = match query {
            Some(q) => {
                check_dimension("fixture_query", self.dimension, q.len())?;
                q
            }
            None => {
                let mut rng = seeded_rng(seed_for_label(self.seed, QUERY_LABEL));
                normalized_vector(&mut rng, self.dimension)?
            }
        };

        let mut seen = HashSet::new();
        let mut embedded = Vec::with_capacity(documents.len());

        for doc in documents {
            if !seen.insert(doc.page_content.as_str()) {
                return Err(SynthError::DuplicateDocument(doc.page_content.clone()));
            }

            let mut rng = seeded_rng(seed_for_label(self.seed, &doc.page_content));
            let mut basis = if self.dimension > 1 {
                normalized_vector(&mut rng, self.dimension - 1)?
            } else {
                Vec::new()
            };
            basis.push(0.0);

            let embedding = score_vector(&mut rng, doc.score, &query, basis, &self.solver)?;
            debug!(document = %doc.page_content, score = doc.score, "embedded fixture document");

            embedded.push(EmbeddedDocument {
                page_content: doc.page_content.clone(),
                score: doc.score,
                embedding,
            });
        }

        Ok(FixtureSet {
            dimension: self.dimension,
            seed: self.seed,
            query,
            documents: embedded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn authors() -> Vec<ScoredDocument> {
        vec![
            ScoredDocument::new("Gabriel García Márquez", 0.80),
            ScoredDocument::new("Gabriela Mistral", 0.67),
            ScoredDocument::new("Miguel de Cervantes", 0.09),
        ]
    }

    #[test]
    fn test_scores_are_realized() {
        let query = vec![-0.5, 0.24, 0.71];
        let set = FixtureBuilder::new(3, 42).build(Some(query.clone()), &authors()).unwrap();

        assert_eq!(set.documents.len(), 3);
        for doc in &set.documents {
            assert!((doc.implied_score(&query).unwrap() - doc.score).abs() < 1e-12);
        }
    }

    #[test]
    fn test_documents_independent_of_order() {
        let builder = FixtureBuilder::new(8, 7);
        let mut reversed = authors();
        reversed.reverse();

        let a = builder.build(None, &authors()).unwrap();
        let b = builder.build(None, &reversed[..2]).unwrap();

        assert_eq!(a.query, b.query);
        assert_eq!(
            a.document("Gabriela Mistral").unwrap().embedding,
            b.document("Gabriela Mistral").unwrap().embedding
        );
    }

    #[test]
    fn test_duplicate_documents_rejected() {
        let docs = vec![ScoredDocument::new("a", 0.1), ScoredDocument::new("a", 0.2)];
        let err = FixtureBuilder::new(3, 1).build(None, &docs).unwrap_err();
        assert!(matches!(err, SynthError::DuplicateDocument(_)));
    }

    #[test]
    fn test_query_dimension_checked() {
        let err = FixtureBuilder::new(3, 1)
            .build(Some(vec![0.1, 0.2]), &authors())
            .unwrap_err();
        assert!(matches!(err, SynthError::DimensionMismatch { .. }));
    }
}
