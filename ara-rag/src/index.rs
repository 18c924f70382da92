//! Brute-force vector index over fact embeddings.
//!
//! [`FlatL2Index`] stores every embedding in one contiguous row-major buffer
//! and answers k-nearest-neighbor queries by a full scan. That is O(N·D) per
//! query, which is fine for a small static corpus. The index is built once and
//! is read-only afterwards, so it can be shared behind an `Arc` without locks.
//!
//! An empty corpus has no index at all: [`FlatL2Index::build`] returns `None`
//! and callers keep an `Option<FlatL2Index>`.

use serde::{Deserialize, Serialize};

use crate::document::{Embedding, FactId, Neighbor};
use crate::error::{RagError, Result};

/// How distances between vectors are measured.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Euclidean (L2) distance.
    #[default]
    Euclidean,
    /// Squared L2 distance, as reported by FAISS `IndexFlatL2`.
    SquaredEuclidean,
}

impl DistanceMetric {
    /// Distance between two equal-length vectors.
    pub fn distance(self, a: &[f32], b: &[f32]) -> f32 {
        let squared: f32 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
        match self {
            DistanceMetric::Euclidean => squared.sqrt(),
            DistanceMetric::SquaredEuclidean => squared,
        }
    }
}

/// An exact nearest-neighbor index using a flat scan.
///
/// # Example
///
/// ```rust,ignore
/// use ara_rag::{DistanceMetric, Embedding, FlatL2Index};
///
/// let index = FlatL2Index::build(embeddings, DistanceMetric::Euclidean)?
///     .expect("non-empty corpus");
/// let hits = index.search(&query_vector, 3)?;
/// ```
#[derive(Debug, Clone)]
pub struct FlatL2Index {
    dimensions: usize,
    metric: DistanceMetric,
    /// Row `i` occupies `vectors[i * dimensions..(i + 1) * dimensions]`.
    vectors: Vec<f32>,
    /// Row position → fact id.
    fact_ids: Vec<FactId>,
}

impl FlatL2Index {
    /// Build an index from one embedding per fact.
    ///
    /// Returns `Ok(None)` for an empty input: that is the "no index" state.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the embeddings do not all
    /// share the dimensionality of the first one,
    /// [`RagError::ConfigError`] if that dimensionality is zero, and
    /// [`RagError::EmbeddingError`] if any component is NaN or infinite.
    pub fn build(embeddings: Vec<Embedding>, metric: DistanceMetric) -> Result<Option<Self>> {
        let Some(first) = embeddings.first() else {
            return Ok(None);
        };
        let dimensions = first.vector.len();
        if dimensions == 0 {
            return Err(RagError::ConfigError("embeddings must have at least one dimension".into()));
        }
        let mut vectors = Vec::with_capacity(dimensions * embeddings.len());
        let mut fact_ids = Vec::with_capacity(embeddings.len());
        for embedding in embeddings {
            if embedding.vector.len() != dimensions {
                return Err(RagError::DimensionMismatch {
                    expected: dimensions,
                    actual: embedding.vector.len(),
                });
            }
            ensure_finite(&embedding.vector, &format!("fact {}", embedding.fact_id))?;
            vectors.extend_from_slice(&embedding.vector);
            fact_ids.push(embedding.fact_id);
        }
        Ok(Some(Self { dimensions, metric, vectors, fact_ids }))
    }

    /// Return the `k` closest facts, nearest first.
    ///
    /// Ties are broken by the smaller fact id. If `k` exceeds the number of
    /// indexed facts, every fact is returned.
    ///
    /// # Errors
    ///
    /// Returns [`RagError::DimensionMismatch`] if the query vector has the
    /// wrong length, and [`RagError::EmbeddingError`] if it is not finite.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimensions {
            return Err(RagError::DimensionMismatch {
                expected: self.dimensions,
                actual: query.len(),
            });
        }
        ensure_finite(query, "query")?;

        let mut scored: Vec<Neighbor> = self
            .rows()
            .zip(&self.fact_ids)
            .map(|(row, &fact_id)| Neighbor { fact_id, distance: self.metric.distance(row, query) })
            .collect();

        // Finite inputs can still overflow to infinity; total_cmp keeps the order total.
        scored.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.fact_id.cmp(&b.fact_id)));
        scored.truncate(k);
        Ok(scored)
    }

    fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.vectors.chunks_exact(self.dimensions)
    }

    /// Number of indexed facts.
    pub fn len(&self) -> usize {
        self.fact_ids.len()
    }

    /// Always `false`: an empty corpus produces no index.
    pub fn is_empty(&self) -> bool {
        self.fact_ids.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }
}

fn ensure_finite(vector: &[f32], what: &str) -> Result<()> {
    match vector.iter().position(|x| !x.is_finite()) {
        None => Ok(()),
        Some(i) => Err(RagError::EmbeddingError {
            provider: "index".into(),
            message: format!("{what} has a non-finite component at position {i}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emb(fact_id: FactId, vector: &[f32]) -> Embedding {
        Embedding { fact_id, vector: vector.to_vec() }
    }

    fn index(rows: &[&[f32]]) -> FlatL2Index {
        let embeddings = rows.iter().enumerate().map(|(i, v)| emb(i, v)).collect();
        FlatL2Index::build(embeddings, DistanceMetric::Euclidean).unwrap().unwrap()
    }

    #[test]
    fn empty_input_builds_no_index() {
        assert!(FlatL2Index::build(Vec::new(), DistanceMetric::Euclidean).unwrap().is_none());
    }

    #[test]
    fn rejects_mixed_dimensions() {
        let err = FlatL2Index::build(
            vec![emb(0, &[0.0, 1.0]), emb(1, &[1.0])],
            DistanceMetric::Euclidean,
        )
        .unwrap_err();
        assert!(matches!(err, RagError::DimensionMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn returns_nearest_first_with_l2_distance() {
        let idx = index(&[&[3.0, 4.0], &[0.0, 1.0], &[10.0, 10.0]]);
        let hits = idx.search(&[0.0, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0], Neighbor { fact_id: 1, distance: 1.0 });
        assert_eq!(hits[1], Neighbor { fact_id: 0, distance: 5.0 });
    }

    #[test]
    fn squared_metric_reports_squared_distance() {
        let idx = FlatL2Index::build(vec![emb(0, &[3.0, 4.0])], DistanceMetric::SquaredEuclidean)
            .unwrap()
            .unwrap();
        let hits = idx.search(&[0.0, 0.0], 1).unwrap();
        assert_eq!(hits[0].distance, 25.0);
    }

    #[test]
    fn ties_break_on_smaller_fact_id() {
        let idx = index(&[&[1.0, 0.0], &[0.0, 1.0], &[-1.0, 0.0]]);
        let hits = idx.search(&[0.0, 0.0], 3).unwrap();
        let ids: Vec<FactId> = hits.iter().map(|n| n.fact_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn k_larger_than_index_returns_everything() {
        let idx = index(&[&[1.0], &[2.0]]);
        assert_eq!(idx.search(&[0.0], 10).unwrap().len(), 2);
        assert!(idx.search(&[0.0], 0).unwrap().is_empty());
    }

    #[test]
    fn query_dimension_is_checked() {
        let idx = index(&[&[1.0, 2.0]]);
        assert!(matches!(
            idx.search(&[1.0], 1),
            Err(RagError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn non_finite_rows_are_rejected_at_build() {
        let embeddings = (0..40)
            .map(|i| emb(i, &[if i % 3 == 0 { f32::NAN } else { i as f32 }]))
            .collect();
        let err = FlatL2Index::build(embeddings, DistanceMetric::Euclidean).unwrap_err();
        assert!(matches!(err, RagError::EmbeddingError { .. }));
        assert!(err.to_string().contains("fact 0"));

        let err = FlatL2Index::build(vec![emb(0, &[1.0]), emb(1, &[f32::INFINITY])], DistanceMetric::Euclidean)
            .unwrap_err();
        assert!(matches!(err, RagError::EmbeddingError { .. }));
    }

    #[test]
    fn non_finite_query_is_rejected() {
        let idx = index(&[&[1.0], &[2.0]]);
        assert!(matches!(idx.search(&[f32::NAN], 2), Err(RagError::EmbeddingError { .. })));
        assert!(matches!(idx.search(&[f32::NEG_INFINITY], 2), Err(RagError::EmbeddingError { .. })));
    }

    #[test]
    fn overflowing_distances_sort_last() {
        let idx = index(&[&[f32::MAX], &[1.0], &[-f32::MAX]]);
        let hits = idx.search(&[0.0], 3).unwrap();
        let ids: Vec<FactId> = hits.iter().map(|n| n.fact_id).collect();
        assert_eq!(ids, vec![1, 0, 2]);
        assert!(hits[1].distance.is_infinite());
    }
}
