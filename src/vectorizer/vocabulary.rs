//! Vocabulary selection.
//!
//! Pass 1 drops every stem whose corpus-wide occurrence count is at or below
//! `frequency_floor`. Pass 2 counts document frequency on what is left and keeps
//! stems with `min_doc_freq <= df <= floor(max_doc_freq_fraction * N)`; `keep_n`
//! then caps the survivors to the most widespread ones. Survivors get contiguous
//! ids in first-seen order.

use std::io::{self, Write};

use indexmap::IndexSet;
use tracing::{debug, info};

use crate::config::{DEFAULT_FREQUENCY_FLOOR, DEFAULT_KEEP_N, DEFAULT_MAX_DOC_FREQ_FRACTION, DEFAULT_MIN_DOC_FREQ};
use crate::vectorizer::corpus::Corpus;
use crate::vectorizer::term::TermFrequency;

/// Thresholds of the two pruning passes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VocabularyPolicy {
    /// Pass 1: survive only with more corpus-wide occurrences than this
    pub frequency_floor: u64,
    /// Pass 2: minimum document frequency
    pub min_doc_freq: u64,
    /// Pass 2: maximum document frequency as a fraction of the document count
    pub max_doc_freq_fraction: f64,
    /// cap on the number of surviving stems
    pub keep_n: Option<usize>,
}

impl Default for VocabularyPolicy {
    fn default() -> Self {
        VocabularyPolicy {
            frequency_floor: DEFAULT_FREQUENCY_FLOOR,
            min_doc_freq: DEFAULT_MIN_DOC_FREQ,
            max_doc_freq_fraction: DEFAULT_MAX_DOC_FREQ_FRACTION,
            keep_n: Some(DEFAULT_KEEP_N),
        }
    }
}

/// Bijection between surviving stems and ids `0..len`.
/// Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    terms: IndexSet<Box<str>>,
    /// document frequency per id
    doc_freqs: Vec<u64>,
    /// documents in the corpus the vocabulary was built from
    doc_num: u64,
}

impl Vocabulary {
    /// Assemble from stems in id order and their document frequencies.
    /// Returns `None` if lengths differ or a stem repeats.
    pub fn from_parts(terms: Vec<String>, doc_freqs: Vec<u64>, doc_num: u64) -> Option<Self> {
        if terms.len() != doc_freqs.len() {
            return None;
        }
        let len = terms.len();
        let terms: IndexSet<Box<str>> = terms.into_iter().map(String::into_boxed_str).collect();
        if terms.len() != len {
            return None;
        }
        Some(Vocabulary {
            terms,
            doc_freqs,
            doc_num,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Id of a stem
    #[inline]
    pub fn id(&self, stem: &str) -> Option<u32> {
        self.terms.get_index_of(stem).map(|id| id as u32)
    }

    /// Stem of an id
    #[inline]
    pub fn stem(&self, id: u32) -> Option<&str> {
        self.terms.get_index(id as usize).map(|s| s.as_ref())
    }

    #[inline]
    pub fn contains(&self, stem: &str) -> bool {
        self.terms.contains(stem)
    }

    /// Document frequency of an id
    #[inline]
    pub fn doc_freq(&self, id: u32) -> Option<u64> {
        self.doc_freqs.get(id as usize).copied()
    }

    #[inline]
    pub fn doc_freqs(&self) -> &[u64] {
        &self.doc_freqs
    }

    #[inline]
    pub fn doc_num(&self) -> u64 {
        self.doc_num
    }

    /// `(id, stem, document frequency)` in id order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str, u64)> {
        self.terms
            .iter()
            .zip(self.doc_freqs.iter())
            .enumerate()
            .map(|(id, (stem, &df))| (id as u32, stem.as_ref(), df))
    }

    /// Write as text: the document count, then `id\tstem\tdf` per line.
    pub fn write_dictionary<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", self.doc_num)?;
        for (id, stem, df) in self.iter() {
            writeln!(writer, "{id}\t{stem}\t{df}")?;
        }
        writer.flush()
    }
}

/// Stem counts at each step of a selection, for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    /// distinct stems before pruning
    pub raw_stems: usize,
    /// distinct stems surviving Pass 1
    pub after_frequency_floor: usize,
    /// distinct stems surviving Pass 2's band
    pub after_doc_freq_band: usize,
    /// final vocabulary size
    pub vocabulary: usize,
}

/// Result of [`VocabularyPolicy::select`].
#[derive(Debug, Clone)]
pub struct VocabularySelection {
    pub vocabulary: Vocabulary,
    /// per-document stems restricted to the vocabulary, order preserved
    pub pruned: Vec<Vec<String>>,
    pub stats: PruneStats,
}

impl VocabularyPolicy {
    /// Largest document frequency Pass 2 accepts for a corpus of `doc_num` documents
    #[inline]
    pub fn max_doc_freq(&self, doc_num: u64) -> u64 {
        (self.max_doc_freq_fraction * doc_num as f64).floor() as u64
    }

    /// Run both pruning passes over the whole corpus and assign ids.
    ///
    /// # Arguments
    /// * `docs` - each document's stem sequence, in corpus order
    ///
    /// # Returns
    /// * `VocabularySelection` - the vocabulary and the stems left to encode
    pub fn select(&self, docs: Vec<Vec<String>>) -> VocabularySelection {
        let doc_num = docs.len() as u64;

        // Pass 1: global frequency floor on raw stem multisets
        let mut global = TermFrequency::new();
        for doc in &docs {
            global.add_terms(doc);
        }
        let raw_stems = global.term_num();
        let floor = self.frequency_floor;
        let dropped_occurrences = global.remove_terms_by(|_, count| count <= floor);
        let after_frequency_floor = global.term_num();
        debug!(
            raw_stems,
            after_frequency_floor,
            floor,
            dropped_occurrences,
            kept_occurrences = global.term_sum(),
            "frequency floor applied"
        );

        let docs: Vec<Vec<String>> = docs
            .into_iter()
            .map(|doc| doc.into_iter().filter(|stem| global.contains_term(stem)).collect())
            .collect();

        // Pass 2: document-frequency band over the surviving stem sets
        let corpus = Corpus::from_docs(
            &docs.iter().map(|doc| TermFrequency::from(doc.as_slice())).collect::<Vec<_>>(),
        );
        let max_df = self.max_doc_freq(corpus.doc_num);
        let min_df = self.min_doc_freq;
        let mut candidates: Vec<(&str, u64)> = corpus
            .iter()
            .filter(|&(_, df)| df >= min_df && df <= max_df)
            .collect();
        let after_doc_freq_band = candidates.len();
        debug!(after_doc_freq_band, min_df, max_df, "document frequency band applied");

        if let Some(keep_n) = self.keep_n {
            if candidates.len() > keep_n {
                // stable: equal df keeps the earlier-seen stem
                let mut order: Vec<usize> = (0..candidates.len()).collect();
                order.sort_by(|&a, &b| candidates[b].1.cmp(&candidates[a].1));
                order.truncate(keep_n);
                order.sort_unstable();
                candidates = order.into_iter().map(|i| candidates[i]).collect();
                debug!(keep_n, "vocabulary capped");
            }
        }

        let mut terms = IndexSet::with_capacity(candidates.len());
        let mut doc_freqs = Vec::with_capacity(candidates.len());
        for (stem, df) in candidates {
            terms.insert(Box::<str>::from(stem));
            doc_freqs.push(df);
        }
        let vocabulary = Vocabulary {
            terms,
            doc_freqs,
            doc_num,
        };

        let pruned = docs
            .into_iter()
            .map(|doc| doc.into_iter().filter(|stem| vocabulary.contains(stem)).collect())
            .collect();

        let stats = PruneStats {
            raw_stems,
            after_frequency_floor,
            after_doc_freq_band,
            vocabulary: vocabulary.len(),
        };
        info!(
            documents = doc_num,
            raw_stems,
            vocabulary = stats.vocabulary,
            "vocabulary built"
        );

        VocabularySelection {
            vocabulary,
            pruned,
            stats,
        }
    }
}
