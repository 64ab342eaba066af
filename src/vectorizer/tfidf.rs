use num::Num;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::encoder::CountVector;

pub trait TFIDFEngine<N>
where
    N: Num + Copy,
{
    /// Generate the IDF value of every vocabulary id
    /// # Arguments
    /// * `doc_freqs` - document frequency per id
    /// * `doc_num` - number of documents in the corpus
    /// # Returns
    /// * `Vec<N>` - IDF per id
    fn idf_vec(doc_freqs: &[u64], doc_num: u64) -> Vec<N>;

    /// Weight one count vector
    /// # Arguments
    /// * `counts` - raw term frequencies of one document
    /// * `idf` - output of `idf_vec`
    /// # Returns
    /// * `ZeroSpVec<N>` - TF-IDF weights; ids whose weight is zero are absent
    fn tf_idf_vec(counts: &CountVector, idf: &[N]) -> ZeroSpVec<N>;
}

/// Default TF-IDF engine
/// raw count * ln(N / df), no normalization.
/// Supports `f32` and `f64`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTFIDFEngine;

impl DefaultTFIDFEngine {
    #[inline]
    fn idf(doc_freq: u64, doc_num: u64) -> f64 {
        // df == N gives ln(1) = 0; df == 0 cannot occur for a vocabulary id
        if doc_freq == 0 || doc_num == 0 {
            return 0.0;
        }
        (doc_num as f64 / doc_freq as f64).ln()
    }
}

impl TFIDFEngine<f64> for DefaultTFIDFEngine {
    fn idf_vec(doc_freqs: &[u64], doc_num: u64) -> Vec<f64> {
        doc_freqs.iter().map(|&df| Self::idf(df, doc_num)).collect()
    }

    fn tf_idf_vec(counts: &CountVector, idf: &[f64]) -> ZeroSpVec<f64> {
        counts.map_values(|id, count| count as f64 * idf[id as usize])
    }
}

impl TFIDFEngine<f32> for DefaultTFIDFEngine {
    fn idf_vec(doc_freqs: &[u64], doc_num: u64) -> Vec<f32> {
        doc_freqs.iter().map(|&df| Self::idf(df, doc_num) as f32).collect()
    }

    fn tf_idf_vec(counts: &CountVector, idf: &[f32]) -> ZeroSpVec<f32> {
        counts.map_values(|id, count| count as f32 * idf[id as usize])
    }
}

/// Corpus-wide IDF table.
/// Built once per run and passed read-only to every weighting call.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct IDFVector<N = f64> {
    /// IDF per vocabulary id. Dense: every id has one.
    pub idf_vec: Vec<N>,
    /// document frequency per vocabulary id, recounted from the count vectors
    pub doc_freqs: Vec<u64>,
    /// document count
    pub doc_num: u64,
}

impl<N> IDFVector<N>
where
    N: Num + Copy + Send + Sync,
{
    /// Count document frequencies over the encoded corpus and derive IDF.
    ///
    /// # Arguments
    /// * `counts` - every document's count vector
    /// * `dim` - vocabulary size
    pub fn fit<E>(counts: &[CountVector], dim: usize) -> Self
    where
        E: TFIDFEngine<N>,
    {
        let mut doc_freqs = vec![0u64; dim];
        for doc in counts {
            for &id in doc.indices() {
                doc_freqs[id as usize] += 1;
            }
        }
        let doc_num = counts.len() as u64;
        IDFVector {
            idf_vec: E::idf_vec(&doc_freqs, doc_num),
            doc_freqs,
            doc_num,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.idf_vec.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idf_vec.is_empty()
    }

    /// Weight one document
    #[inline]
    pub fn transform<E>(&self, counts: &CountVector) -> ZeroSpVec<N>
    where
        E: TFIDFEngine<N>,
    {
        E::tf_idf_vec(counts, &self.idf_vec)
    }

    /// Weight every document, in parallel, keeping document order
    pub fn transform_all<E>(&self, counts: &[CountVector]) -> Vec<ZeroSpVec<N>>
    where
        E: TFIDFEngine<N>,
    {
        counts.par_iter().map(|doc| self.transform::<E>(doc)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(dim: usize, entries: &[(u32, u32)]) -> CountVector {
        let (inds, vals) = entries.iter().copied().unzip();
        ZeroSpVec::from_unsorted(dim, inds, vals)
    }

    #[test]
    fn idf_is_natural_log_ratio() {
        let idf: Vec<f64> = <DefaultTFIDFEngine as TFIDFEngine<f64>>::idf_vec(&[1, 2, 4], 4);
        assert_eq!(idf[0], 4f64.ln());
        assert_eq!(idf[1], 2f64.ln());
        assert_eq!(idf[2], 0.0);
    }

    #[test]
    fn universal_term_is_dropped_from_weights() {
        let corpus = vec![
            counts(2, &[(0, 3), (1, 1)]),
            counts(2, &[(0, 1)]),
        ];
        let idf = IDFVector::<f64>::fit::<DefaultTFIDFEngine>(&corpus, 2);
        assert_eq!(idf.doc_freqs, vec![2, 1]);
        assert_eq!(idf.doc_num, 2);

        let weights = idf.transform_all::<DefaultTFIDFEngine>(&corpus);
        assert_eq!(weights[0].indices(), &[1]);
        assert_eq!(weights[0].values(), &[2f64.ln()]);
        assert!(weights[1].is_zero());
    }

    #[test]
    fn weight_is_count_times_idf() {
        let corpus = vec![
            counts(3, &[(0, 2), (1, 1)]),
            counts(3, &[(1, 4)]),
            counts(3, &[(2, 1)]),
        ];
        let idf = IDFVector::<f64>::fit::<DefaultTFIDFEngine>(&corpus, 3);
        let w = idf.transform::<DefaultTFIDFEngine>(&corpus[0]);
        assert_eq!(w.get(0), Some(2.0 * 3f64.ln()));
        assert_eq!(w.get(1), Some(1.0 * 1.5f64.ln()));
        assert_eq!(w.get(2), Some(0.0));
    }

    #[test]
    fn f32_engine_matches_f64() {
        let corpus = vec![counts(2, &[(0, 1)]), counts(2, &[(1, 2)]), counts(2, &[(1, 1)])];
        let idf32 = IDFVector::<f32>::fit::<DefaultTFIDFEngine>(&corpus, 2);
        let idf64 = IDFVector::<f64>::fit::<DefaultTFIDFEngine>(&corpus, 2);
        for (a, b) in idf32.idf_vec.iter().zip(idf64.idf_vec.iter()) {
            assert!((*a as f64 - b).abs() < 1e-6);
        }
        let w = idf32.transform::<DefaultTFIDFEngine>(&corpus[1]);
        assert_eq!(w.indices(), &[1]);
    }

    #[test]
    fn empty_corpus_has_empty_idf() {
        let idf = IDFVector::<f64>::fit::<DefaultTFIDFEngine>(&[], 0);
        assert!(idf.is_empty());
        assert_eq!(idf.doc_num, 0);
    }
}
