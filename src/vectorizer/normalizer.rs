//! Text normalization: raw event text into an ordered sequence of stems.
//!
//! 1. trim and lowercase
//! 2. split into maximal runs of word characters (alphanumeric or `_`)
//! 3. drop stopwords
//! 4. Porter-style (Snowball English) suffix stripping

use std::collections::HashSet;

use rayon::prelude::*;
use rust_stemmers::{Algorithm, Stemmer};

/// Closed English stopword set.
/// Includes the `s`, `t` and `don` fragments left over from splitting contractions.
pub const EN_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "your", "yours",
    "yourself", "yourselves", "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "these", "those", "am", "is", "are", "was", "were", "be",
    "been", "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an",
    "the", "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
    "with", "about", "against", "between", "into", "through", "during", "before", "after",
    "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
    "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
    "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
    "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just", "don",
    "should", "now",
];

/// Turns raw document text into stems.
pub struct Normalizer {
    stopwords: HashSet<&'static str>,
    stemmer: Stemmer,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Normalizer {
            stopwords: EN_STOPWORDS.iter().copied().collect(),
            stemmer: Stemmer::create(Algorithm::English),
        }
    }

    /// Split into maximal runs of word characters; everything else separates.
    /// `"don't"` becomes `["don", "t"]`.
    pub fn tokenize(text: &str) -> impl Iterator<Item = &str> {
        text.split(|c: char| !is_word_char(c)).filter(|s| !s.is_empty())
    }

    #[inline]
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }

    /// Normalize one document. Empty or separator-only text yields no stems.
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let line = text.trim().to_lowercase();
        Self::tokenize(&line)
            .filter(|token| !self.is_stopword(token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }

    /// Normalize every document of a batch, in parallel, keeping document order.
    pub fn normalize_all<T>(&self, texts: &[T]) -> Vec<Vec<String>>
    where
        T: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.normalize(text.as_ref())).collect()
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
