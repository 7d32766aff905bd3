//! Exact nearest-neighbor index over document embeddings.

use ndarray::{Array2, ArrayView1};

/// Flat squared-L2 index. Holds only the embedding matrix; callers keep
/// the documents and map returned row indices back to them.
#[derive(Debug)]
pub struct VectorIndex {
    vectors: Array2<f32>,
}

impl VectorIndex {
    /// Build from a dense `(rows, dim)` matrix. Row order is the corpus
    /// order and is never rearranged.
    pub fn new(vectors: Array2<f32>) -> Self {
        Self { vectors }
    }

    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.nrows() == 0
    }

    pub fn dim(&self) -> usize {
        self.vectors.ncols()
    }

    /// Exact k-nearest-neighbor search by squared Euclidean distance.
    /// Returns `(row, distance)` pairs in ascending distance order,
    /// ties broken by row index, at most `k` entries.
    pub fn search(&self, query: ArrayView1<f32>, k: usize) -> Vec<(usize, f32)> {
        if k == 0 || self.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .rows()
            .into_iter()
            .enumerate()
            .map(|(row, stored)| {
                let dist = stored
                    .iter()
                    .zip(query.iter())
                    .map(|(a, b)| {
                        let d = a - b;
                        d * d
                    })
                    .sum::<f32>();
                (row, dist)
            })
            .collect();

        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(k);
        scored
    }
}
