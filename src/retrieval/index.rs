//! Exact flat nearest-neighbor index over chunk embeddings

use serde::{Deserialize, Serialize};

use crate::embeddings::cosine_similarity;
use crate::error::{Error, Result};
use crate::types::Chunk;

/// Distance metric for nearest-neighbor search
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Squared Euclidean distance (reference behavior)
    #[default]
    SquaredEuclidean,
    /// Cosine distance (1 - cosine similarity)
    Cosine,
}

impl DistanceMetric {
    fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Self::SquaredEuclidean => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| {
                    let d = x - y;
                    d * d
                })
                .sum(),
            Self::Cosine => 1.0 - cosine_similarity(a, b),
        }
    }
}

/// A slot matched by a search, with its distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Slot in the index; always has a corresponding chunk record
    pub slot: usize,
    /// Distance to the query vector (lower is closer)
    pub distance: f32,
}

/// Immutable flat index snapshot.
///
/// Vectors are stored row-major with one chunk record per slot. Snapshots
/// are built whole and swapped in atomically by the pipeline, so a search
/// can never observe vectors from one document and metadata from another.
/// Brute-force exact search is deliberate: at single-document scale,
/// correctness of the true top-k matters more than sublinear lookups.
pub struct FlatIndex {
    dimension: usize,
    metric: DistanceMetric,
    vectors: Vec<f32>,
    chunks: Vec<Chunk>,
}

impl FlatIndex {
    /// Create an empty index sized for `dimension`
    pub fn empty(dimension: usize, metric: DistanceMetric) -> Self {
        Self {
            dimension,
            metric,
            vectors: Vec::new(),
            chunks: Vec::new(),
        }
    }

    /// Build a populated index from parallel vectors and chunk records.
    ///
    /// All-or-nothing: a count mismatch or a vector of the wrong dimension
    /// fails the build and nothing is installed; callers keep their prior
    /// snapshot.
    pub fn build(
        dimension: usize,
        metric: DistanceMetric,
        vectors: Vec<Vec<f32>>,
        chunks: Vec<Chunk>,
    ) -> Result<Self> {
        if vectors.len() != chunks.len() {
            return Err(Error::IndexConsistency {
                vectors: vectors.len(),
                chunks: chunks.len(),
            });
        }

        let mut flat = Vec::with_capacity(vectors.len() * dimension);
        for vector in &vectors {
            if vector.len() != dimension {
                return Err(Error::DimensionMismatch {
                    expected: dimension,
                    got: vector.len(),
                });
            }
            flat.extend_from_slice(vector);
        }

        Ok(Self {
            dimension,
            metric,
            vectors: flat,
            chunks,
        })
    }

    /// Exact top-k search, ascending by distance.
    ///
    /// Fails with [`Error::EmptyIndex`] when no vectors are present so the
    /// caller can surface "no document has been uploaded yet" instead of a
    /// silent empty answer.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchHit>> {
        if self.chunks.is_empty() {
            return Err(Error::EmptyIndex);
        }
        if query.len() != self.dimension {
            return Err(Error::DimensionMismatch {
                expected: self.dimension,
                got: query.len(),
            });
        }

        let mut hits: Vec<SearchHit> = self
            .vectors
            .chunks_exact(self.dimension)
            .enumerate()
            .map(|(slot, vector)| SearchHit {
                slot,
                distance: self.metric.distance(query, vector),
            })
            .collect();

        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(k);

        Ok(hits)
    }

    /// Chunk record for a slot returned by [`search`](Self::search)
    pub fn chunk(&self, slot: usize) -> Option<&Chunk> {
        self.chunks.get(slot)
    }

    /// Current vector count
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no vectors
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Fixed vector dimension
    pub fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(i: u32) -> Chunk {
        Chunk::new("doc".to_string(), i, format!("chunk {}", i))
    }

    fn build_index(vectors: Vec<Vec<f32>>) -> FlatIndex {
        let chunks = (0..vectors.len() as u32).map(chunk).collect();
        FlatIndex::build(2, DistanceMetric::SquaredEuclidean, vectors, chunks).unwrap()
    }

    #[test]
    fn test_search_orders_by_ascending_distance() {
        let index = build_index(vec![
            vec![10.0, 0.0],
            vec![1.0, 0.0],
            vec![5.0, 0.0],
            vec![2.0, 0.0],
            vec![8.0, 0.0],
        ]);

        let hits = index.search(&[0.0, 0.0], 3).unwrap();
        assert_eq!(hits.len(), 3);
        assert_eq!(hits[0].slot, 1);
        assert_eq!(hits[1].slot, 3);
        assert_eq!(hits[2].slot, 2);
        for pair in hits.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
    }

    #[test]
    fn test_search_returns_at_most_k() {
        let index = build_index(vec![vec![1.0, 0.0], vec![2.0, 0.0]]);
        assert_eq!(index.search(&[0.0, 0.0], 5).unwrap().len(), 2);
        assert_eq!(index.search(&[0.0, 0.0], 1).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_index_search_fails() {
        let index = FlatIndex::empty(2, DistanceMetric::SquaredEuclidean);
        assert!(matches!(index.search(&[0.0, 0.0], 3), Err(Error::EmptyIndex)));
    }

    #[test]
    fn test_count_mismatch_rejected() {
        let result = FlatIndex::build(
            2,
            DistanceMetric::SquaredEuclidean,
            vec![vec![0.0, 0.0], vec![1.0, 1.0]],
            vec![chunk(0)],
        );
        assert!(matches!(
            result,
            Err(Error::IndexConsistency { vectors: 2, chunks: 1 })
        ));
    }

    #[test]
    fn test_wrong_dimension_rejected() {
        let result = FlatIndex::build(
            2,
            DistanceMetric::SquaredEuclidean,
            vec![vec![0.0, 0.0, 0.0]],
            vec![chunk(0)],
        );
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch { expected: 2, got: 3 })
        ));
    }

    #[test]
    fn test_query_dimension_checked() {
        let index = build_index(vec![vec![1.0, 0.0]]);
        assert!(matches!(
            index.search(&[1.0], 1),
            Err(Error::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn test_every_hit_has_a_chunk_record() {
        let index = build_index(vec![vec![1.0, 0.0], vec![2.0, 0.0], vec![3.0, 0.0]]);
        for hit in index.search(&[0.0, 0.0], 3).unwrap() {
            assert!(index.chunk(hit.slot).is_some());
        }
    }

    #[test]
    fn test_cosine_metric() {
        let chunks = vec![chunk(0), chunk(1)];
        let index = FlatIndex::build(
            2,
            DistanceMetric::Cosine,
            vec![vec![0.0, 1.0], vec![1.0, 0.0]],
            chunks,
        )
        .unwrap();

        let hits = index.search(&[1.0, 0.1], 2).unwrap();
        assert_eq!(hits[0].slot, 1);
    }
}
