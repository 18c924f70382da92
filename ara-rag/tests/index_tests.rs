//! Property tests for flat L2 index search ordering and result size.

use ara_rag::{DistanceMetric, Embedding, FactId, FlatL2Index};
use proptest::prelude::*;

fn arb_vector(dim: usize) -> impl Strategy<Value = Vec<f32>> {
    proptest::collection::vec(-10.0f32..10.0f32, dim)
}

fn arb_embeddings(dim: usize) -> impl Strategy<Value = Vec<Embedding>> {
    proptest::collection::vec(arb_vector(dim), 1..30).prop_map(|vectors| {
        vectors
            .into_iter()
            .enumerate()
            .map(|(fact_id, vector)| Embedding { fact_id, vector })
            .collect()
    })
}

/// *For any* non-empty set of embeddings, searching returns `min(k, N)`
/// distinct fact ids ordered by non-decreasing distance, with ties ordered by
/// ascending fact id.
mod prop_flat_index_search {
    use super::*;

    const DIM: usize = 8;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn results_sorted_distinct_and_sized(
            embeddings in arb_embeddings(DIM),
            query in arb_vector(DIM),
            k in 0usize..40,
        ) {
            let n = embeddings.len();
            let index = FlatL2Index::build(embeddings, DistanceMetric::Euclidean).unwrap().unwrap();
            let results = index.search(&query, k).unwrap();

            prop_assert_eq!(results.len(), k.min(n));

            let mut ids: Vec<FactId> = results.iter().map(|r| r.fact_id).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), results.len());

            for window in results.windows(2) {
                prop_assert!(
                    window[0].distance < window[1].distance
                        || (window[0].distance == window[1].distance
                            && window[0].fact_id < window[1].fact_id),
                    "results not ordered: {:?} then {:?}",
                    window[0],
                    window[1],
                );
            }
        }

        #[test]
        fn nearest_matches_exhaustive_minimum(
            embeddings in arb_embeddings(DIM),
            query in arb_vector(DIM),
        ) {
            let expected = embeddings
                .iter()
                .map(|e| DistanceMetric::Euclidean.distance(&e.vector, &query))
                .fold(f32::INFINITY, f32::min);
            let index = FlatL2Index::build(embeddings, DistanceMetric::Euclidean).unwrap().unwrap();
            let best = index.search(&query, 1).unwrap();
            prop_assert_eq!(best[0].distance, expected);
        }

        #[test]
        fn search_is_repeatable(
            embeddings in arb_embeddings(DIM),
            query in arb_vector(DIM),
        ) {
            let index = FlatL2Index::build(embeddings, DistanceMetric::Euclidean).unwrap().unwrap();
            prop_assert_eq!(index.search(&query, 5).unwrap(), index.search(&query, 5).unwrap());
        }
    }
}

#[test]
fn index_size_equals_embedding_count() {
    let embeddings: Vec<Embedding> =
        (0..7).map(|i| Embedding { fact_id: i, vector: vec![i as f32, 0.0] }).collect();
    let index = FlatL2Index::build(embeddings, DistanceMetric::Euclidean).unwrap().unwrap();
    assert_eq!(index.len(), 7);
    assert_eq!(index.dimensions(), 2);
}
