pub mod compute;
pub mod corpus;
pub mod encoder;
pub mod normalizer;
pub mod serde;
pub mod similarity;
pub mod term;
pub mod tfidf;
pub mod vocabulary;

use std::marker::PhantomData;

use tracing::info;

use crate::config::PipelineConfig;
use crate::document::Document;
use crate::error::Result;
use crate::utils::math::vector::ZeroSpVec;
use crate::vectorizer::compute::compare::{Compare, DefaultCompare};
use crate::vectorizer::encoder::{CountVector, Encoder};
use crate::vectorizer::normalizer::Normalizer;
use crate::vectorizer::serde::VectorizerModel;
use crate::vectorizer::similarity::SimilarityMatrix;
use crate::vectorizer::tfidf::{DefaultTFIDFEngine, IDFVector, TFIDFEngine};
use crate::vectorizer::vocabulary::{PruneStats, Vocabulary};

/// Batch pipeline: normalize -> select vocabulary -> encode -> weight -> (similarity).
///
/// `EventVectorizer<E, C>` has the following generic parameters:
/// - `E`: TF-IDF calculation engine (default `DefaultTFIDFEngine`)
/// - `C`: vector comparator used by the similarity stage (default `DefaultCompare`)
///
/// Every stage consumes the previous stage's output for the whole corpus.
/// Within a stage, per-document work runs on the rayon pool and is gathered
/// back in document order, so output does not depend on scheduling.
pub struct EventVectorizer<E = DefaultTFIDFEngine, C = DefaultCompare>
where
    E: TFIDFEngine<f64>,
    C: Compare<f64>,
{
    config: PipelineConfig,
    normalizer: Normalizer,
    _marker: PhantomData<(E, C)>,
}

/// Everything one run derives from a corpus.
#[derive(Debug, Clone)]
pub struct Vectorized {
    pub vocabulary: Vocabulary,
    pub idf: IDFVector<f64>,
    /// count vector per document, corpus order
    pub counts: Vec<CountVector>,
    /// TF-IDF vector per document, corpus order
    pub tf_idf: Vec<ZeroSpVec<f64>>,
    /// present when the similarity stage is enabled
    pub similarity: Option<SimilarityMatrix>,
    pub stats: PruneStats,
}

impl Vectorized {
    /// Snapshot of the vocabulary and IDF table
    pub fn model(&self) -> VectorizerModel {
        VectorizerModel::from_parts(&self.vocabulary, &self.idf)
    }
}

impl EventVectorizer {
    /// Default engine and comparator
    pub fn with_config(config: PipelineConfig) -> Result<Self> {
        Self::new(config)
    }
}

impl<E, C> EventVectorizer<E, C>
where
    E: TFIDFEngine<f64>,
    C: Compare<f64>,
{
    /// Create a new pipeline. Fails if the configuration is out of range.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            normalizer: Normalizer::new(),
            _marker: PhantomData,
        })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage over raw texts in corpus order.
    pub fn vectorize<T>(&self, texts: &[T]) -> Vectorized
    where
        T: AsRef<str> + Sync,
    {
        info!(documents = texts.len(), "normalizing");
        let stems = self.normalizer.normalize_all(texts);

        let selection = self.config.vocabulary_policy().select(stems);
        let vocabulary = selection.vocabulary;

        let counts = Encoder::new(&vocabulary).encode_all(&selection.pruned);

        let idf = IDFVector::fit::<E>(&counts, vocabulary.len());
        debug_assert_eq!(idf.doc_freqs, vocabulary.doc_freqs());
        let tf_idf = idf.transform_all::<E>(&counts);
        info!(
            vocabulary = vocabulary.len(),
            weighted = tf_idf.iter().filter(|v| !v.is_zero()).count(),
            "weighting done"
        );

        let similarity = self
            .config
            .enable_similarity
            .then(|| SimilarityMatrix::compute_with::<C>(&tf_idf));

        Vectorized {
            vocabulary,
            idf,
            counts,
            tf_idf,
            similarity,
            stats: selection.stats,
        }
    }

    /// Run every stage over the documents' texts and attach each document's
    /// weight vector (and similarity row when enabled).
    pub fn process(&self, documents: &mut [Document]) -> Vectorized {
        let texts: Vec<&str> = documents.iter().map(Document::text).collect();
        let vectorized = self.vectorize(&texts);

        for (position, doc) in documents.iter_mut().enumerate() {
            doc.set_tf_idf(vectorized.tf_idf[position].clone());
            if let Some(row) = vectorized.similarity.as_ref().and_then(|m| m.row(position)) {
                doc.set_cos_sim(row.to_vec());
            }
        }
        vectorized
    }
}
