use indexmap::IndexMap;

use crate::vectorizer::term::TermFrequency;

/// keep document count and per-term document frequency
/// Terms are kept in the order they were first added.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    /// number of documents added
    pub doc_num: u64,
    /// term -> number of documents containing it
    pub term_counts: IndexMap<Box<str>, u64>,
}

impl Corpus {
    /// Create a new instance
    pub fn new() -> Self {
        Self {
            doc_num: 0,
            term_counts: IndexMap::new(),
        }
    }

    /// Add one document's distinct terms to the corpus
    /// Each term must appear at most once in `terms`.
    pub fn add_set<'a, I>(&mut self, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.doc_num += 1;
        for term in terms {
            if let Some(count) = self.term_counts.get_mut(term) {
                *count += 1;
            } else {
                self.term_counts.insert(term.into(), 1);
            }
        }
    }

    /// Build from each document's term frequencies, in document order
    pub fn from_docs(docs: &[TermFrequency]) -> Self {
        let mut corpus = Corpus::new();
        for doc in docs {
            corpus.add_set(doc.term_set_iter());
        }
        corpus
    }

    /// Iterate over terms and their document frequency in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_counts.iter().map(|(term, &df)| (term.as_ref(), df))
    }
}
