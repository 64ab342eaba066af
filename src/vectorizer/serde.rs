use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::vectorizer::tfidf::IDFVector;
use crate::vectorizer::vocabulary::Vocabulary;

/// Serializable snapshot of one run's corpus statistics.
/// Holds the vocabulary in id order and the IDF table, not the documents.
///
/// `from_parts` / `into_parts` convert to and from the live types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerModel {
    /// stems in id order
    pub terms: Vec<String>,
    /// document frequency per id
    pub doc_freqs: Vec<u64>,
    /// IDF per id
    pub idf: Vec<f64>,
    /// document count
    pub doc_num: u64,
}

impl VectorizerModel {
    pub fn from_parts(vocabulary: &Vocabulary, idf: &IDFVector<f64>) -> Self {
        VectorizerModel {
            terms: vocabulary.iter().map(|(_, stem, _)| stem.to_string()).collect(),
            doc_freqs: vocabulary.doc_freqs().to_vec(),
            idf: idf.idf_vec.clone(),
            doc_num: vocabulary.doc_num(),
        }
    }

    /// Rebuild the vocabulary and IDF table.
    /// Returns `None` when the snapshot is internally inconsistent.
    pub fn into_parts(self) -> Option<(Vocabulary, IDFVector<f64>)> {
        if self.idf.len() != self.terms.len() {
            return None;
        }
        let idf = IDFVector {
            idf_vec: self.idf,
            doc_freqs: self.doc_freqs.clone(),
            doc_num: self.doc_num,
        };
        let vocabulary = Vocabulary::from_parts(self.terms, self.doc_freqs, self.doc_num)?;
        Some((vocabulary, idf))
    }

    /// Write as CBOR
    pub fn write_cbor<W: Write>(&self, writer: W) -> Result<()> {
        serde_cbor::to_writer(writer, self)?;
        Ok(())
    }

    /// Read from CBOR
    pub fn read_cbor<R: Read>(reader: R) -> Result<Self> {
        let model = serde_cbor::from_reader(reader)?;
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::tfidf::DefaultTFIDFEngine;
    use crate::vectorizer::vocabulary::VocabularyPolicy;
    use crate::vectorizer::encoder::Encoder;

    #[test]
    fn snapshot_restores_vocabulary_and_idf() {
        let policy = VocabularyPolicy {
            frequency_floor: 0,
            min_doc_freq: 1,
            max_doc_freq_fraction: 1.0,
            keep_n: None,
        };
        let selection = policy.select(vec![
            vec!["cat".to_string(), "mat".to_string()],
            vec!["mat".to_string(), "dog".to_string()],
        ]);
        let counts = Encoder::new(&selection.vocabulary).encode_all(&selection.pruned);
        let idf = IDFVector::<f64>::fit::<DefaultTFIDFEngine>(&counts, selection.vocabulary.len());

        let model = VectorizerModel::from_parts(&selection.vocabulary, &idf);
        assert_eq!(model.terms, vec!["cat", "mat", "dog"]);

        let mut bytes = Vec::new();
        model.write_cbor(&mut bytes).unwrap();
        let decoded = VectorizerModel::read_cbor(bytes.as_slice()).unwrap();
        assert_eq!(decoded, model);

        let (vocabulary, restored_idf) = decoded.into_parts().unwrap();
        assert_eq!(vocabulary, selection.vocabulary);
        assert_eq!(restored_idf, idf);
    }

    #[test]
    fn inconsistent_snapshot_is_rejected() {
        let model = VectorizerModel {
            terms: vec!["a".to_string()],
            doc_freqs: vec![1],
            idf: vec![],
            doc_num: 1,
        };
        assert!(model.into_parts().is_none());
    }
}
