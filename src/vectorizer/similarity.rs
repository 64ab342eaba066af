//! Pairwise cosine similarity over a whole corpus.

use rayon::prelude::*;
use tracing::info;

use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::compute::compare::{Compare, DefaultCompare};

/// Square, symmetric matrix of cosine similarities indexed by corpus position.
///
/// The diagonal is 1.0 for a document with any nonzero weight and 0.0 for an
/// all-zero document, which also scores 0.0 against every other document.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    /// row-major, `size * size`
    data: Vec<f64>,
}

impl SimilarityMatrix {
    /// Compute with the default comparator
    pub fn compute(vectors: &[ZeroSpVec<f64>]) -> Self {
        Self::compute_with::<DefaultCompare>(vectors)
    }

    /// Compute the upper triangle in parallel (one task per row) and mirror it.
    /// Each cell only walks the stored entries of its two vectors.
    pub fn compute_with<C>(vectors: &[ZeroSpVec<f64>]) -> Self
    where
        C: Compare<f64>,
    {
        let size = vectors.len();
        let norms: Vec<f64> = vectors.par_iter().map(|v| C::norm(v)).collect();

        let upper: Vec<Vec<f64>> = (0..size)
            .into_par_iter()
            .map(|i| {
                let mut row = Vec::with_capacity(size - i);
                row.push(if norms[i] == 0.0 { 0.0 } else { 1.0 });
                for j in (i + 1)..size {
                    let cos = C::cosine_from_parts(C::dot(&vectors[i], &vectors[j]), norms[i], norms[j]);
                    // rounding may push identical directions past 1
                    row.push(cos.min(1.0));
                }
                row
            })
            .collect();

        let mut data = vec![0.0; size * size];
        for (i, row) in upper.into_iter().enumerate() {
            for (offset, cos) in row.into_iter().enumerate() {
                let j = i + offset;
                data[i * size + j] = cos;
                data[j * size + i] = cos;
            }
        }

        info!(documents = size, "similarity matrix computed");
        SimilarityMatrix { size, data }
    }

    /// Number of documents (rows)
    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Similarity of documents `i` and `j`
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.size && j < self.size {
            Some(self.data[i * self.size + j])
        } else {
            None
        }
    }

    /// Row `i`: similarity of document `i` to every document, in corpus order
    #[inline]
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        if i < self.size {
            Some(&self.data[i * self.size..(i + 1) * self.size])
        } else {
            None
        }
    }

    /// All rows in corpus order
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics; an empty matrix has no rows anyway
        self.data.chunks(self.size.max(1))
    }
}
