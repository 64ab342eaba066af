/// This crate turns a batch of event documents into TF-IDF vectors over a pruned,
/// corpus-derived vocabulary, with optional pairwise cosine similarity.
pub mod config;
pub mod document;
pub mod error;
pub mod utils;
pub mod vectorizer;

/// Event Vectorizer
/// The top-level struct of this crate, running the whole batch pipeline:
/// normalize -> build vocabulary -> encode -> weight -> (similarity).
///
/// Internally, it holds:
/// - The validated pipeline configuration
/// - A text normalizer (tokenizer, stopword filter, stemmer)
///
/// `EventVectorizer<E, C>` has the following generic parameters:
/// - `E`: TF-IDF calculation engine type (e.g., DefaultTFIDFEngine)
/// - `C`: vector comparator type used by the similarity stage (e.g., DefaultCompare)
///
/// A run is a pure function of the input batch and the configuration; the same
/// batch always yields the same ids, weights, and similarities.
pub use vectorizer::{EventVectorizer, Vectorized};

/// Pipeline Configuration
/// Pruning thresholds and stage switches. Loadable from a TOML file; missing keys
/// take their defaults.
pub use config::PipelineConfig;

/// Event Documents
/// `Document` is one input event. The pipeline attaches its TF-IDF vector and,
/// when similarity is enabled, its similarity row.
/// `EventId` accepts either an integer or a string id.
pub use document::{Document, EventId};

/// Error type for a failed run
pub use error::PipelineError;

/// Text Normalizer
/// Lowercases, splits on non-alphanumeric characters, drops English stopwords,
/// and stems what remains.
pub use vectorizer::normalizer::Normalizer;

/// Term Frequency structure
/// A struct for counting stem occurrences within one document (or a whole corpus).
/// It manages:
/// - The count of occurrences of each stem, in first-seen order
/// - The total number of stems counted
pub use vectorizer::term::TermFrequency;

/// Corpus Document Frequencies
/// Counts, for each stem, the number of documents it appears in.
/// It is used as the base data for the document-frequency pruning pass and for
/// IDF calculation.
pub use vectorizer::corpus::Corpus;

/// Vocabulary and Pruning Policy
/// `VocabularyPolicy` runs the two pruning passes and assigns dense ids in
/// first-seen order; `Vocabulary` is the resulting stem <-> id mapping with
/// document frequencies.
pub use vectorizer::vocabulary::{Vocabulary, VocabularyPolicy};

/// TF IDF Calculation Engine Trait
/// A trait that defines the behavior of a TF-IDF calculation engine.
///
/// By implementing this trait, you can plug different TF-IDF calculation strategies
/// into `EventVectorizer<E>`.
/// A default implementation, `DefaultTFIDFEngine`, computes `idf = ln(N / df)` and
/// `weight = count * idf` without normalization.
///
/// The default implementation supports the following parameter types:
/// - f32
/// - f64
pub use vectorizer::tfidf::{DefaultTFIDFEngine, IDFVector, TFIDFEngine};

/// Cosine Similarity
/// `SimilarityMatrix` is the symmetric all-pairs cosine matrix; `Compare` is the
/// pluggable comparator it is computed with.
pub use vectorizer::compute::compare::{Compare, DefaultCompare};
pub use vectorizer::similarity::SimilarityMatrix;

/// Model Snapshot
/// Serializable vocabulary + IDF table of one run (CBOR).
pub use vectorizer::serde::VectorizerModel;

/// Sparse vector with implicit zeros
pub use utils::math::vector::ZeroSpVec;
