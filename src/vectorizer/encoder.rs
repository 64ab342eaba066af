//! Bag-of-words encoding against a fixed vocabulary.

use rayon::prelude::*;

use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::term::TermFrequency;
use crate::vectorizer::vocabulary::Vocabulary;

/// Count vector of one document: vocabulary id -> occurrences
pub type CountVector = ZeroSpVec<u32>;

/// Encodes stem sequences as sparse count vectors.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<'a> {
    vocabulary: &'a Vocabulary,
}

impl<'a> Encoder<'a> {
    pub fn new(vocabulary: &'a Vocabulary) -> Self {
        Encoder { vocabulary }
    }

    /// Encode one document. Stems outside the vocabulary are skipped.
    pub fn encode<T>(&self, stems: &[T]) -> CountVector
    where
        T: AsRef<str>,
    {
        let freq = TermFrequency::from(stems);
        let mut inds = Vec::with_capacity(freq.term_num());
        let mut vals = Vec::with_capacity(freq.term_num());
        for (stem, count) in freq.iter() {
            if let Some(id) = self.vocabulary.id(stem) {
                inds.push(id);
                vals.push(count as u32);
            }
        }
        ZeroSpVec::from_unsorted(self.vocabulary.len(), inds, vals)
    }

    /// Encode every document, in parallel, keeping document order.
    pub fn encode_all<T>(&self, docs: &[Vec<T>]) -> Vec<CountVector>
    where
        T: AsRef<str> + Sync,
    {
        docs.par_iter().map(|stems| self.encode(stems)).collect()
    }
}
