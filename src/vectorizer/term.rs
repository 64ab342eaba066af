use indexmap::IndexMap;

/// TermFrequency struct
/// Counts occurrences of each term (stem) in a document or across a corpus.
/// Terms are kept in first-seen order, so iteration is deterministic.
///
/// # Examples
/// ```
/// use event_vectorizer::TermFrequency;
/// let mut term_freq = TermFrequency::new();
/// term_freq.add_term("term1");
/// term_freq.add_term("term2");
/// term_freq.add_term("term1");
///
/// let counts: Vec<_> = term_freq.iter().collect();
/// assert_eq!(counts, vec![("term1", 2), ("term2", 1)]);
/// assert_eq!(term_freq.term_sum(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermFrequency {
    term_count: IndexMap<String, u64>,
    total_term_count: u64,
}

/// Implementation for adding and removing terms
impl TermFrequency {
    /// Create a new TermFrequency
    pub fn new() -> Self {
        TermFrequency {
            term_count: IndexMap::new(),
            total_term_count: 0,
        }
    }

    /// Add a term
    ///
    /// # Arguments
    /// * `term` - term to add
    #[inline]
    pub fn add_term(&mut self, term: &str) -> &mut Self {
        if let Some(count) = self.term_count.get_mut(term) {
            *count += 1;
        } else {
            self.term_count.insert(term.to_string(), 1);
        }
        self.total_term_count += 1;
        self
    }

    /// Add multiple terms
    ///
    /// # Arguments
    /// * `terms` - Slice of terms to add
    #[inline]
    pub fn add_terms<T>(&mut self, terms: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for term in terms {
            self.add_term(term.as_ref());
        }
        self
    }

    /// Remove terms by a condition
    ///
    /// # Arguments
    /// * `condition` - Closure to determine which terms to remove
    ///
    /// # Returns
    /// * `u64` - Total count of removed terms
    #[inline]
    pub fn remove_terms_by<F>(&mut self, condition: F) -> u64
    where
        F: Fn(&str, u64) -> bool,
    {
        let mut removed_total_count: u64 = 0;
        self.term_count.retain(|term, count| {
            if condition(term, *count) {
                removed_total_count += *count;
                false
            } else {
                true
            }
        });
        self.total_term_count -= removed_total_count;
        removed_total_count
    }
}

impl<T> From<&[T]> for TermFrequency
where
    T: AsRef<str>,
{
    fn from(terms: &[T]) -> Self {
        let mut tf = TermFrequency::new();
        tf.add_terms(terms);
        tf
    }
}

/// Implementation for retrieving information from TermFrequency
impl TermFrequency {
    /// Iterate over terms and their counts in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.term_count.iter().map(|(term, &count)| (term.as_str(), count))
    }

    /// Total count of all terms
    #[inline]
    pub fn term_sum(&self) -> u64 {
        self.total_term_count
    }

    #[inline]
    pub fn contains_term(&self, term: &str) -> bool {
        self.term_count.contains_key(term)
    }

    /// Iterate over the distinct terms in first-seen order
    #[inline]
    pub fn term_set_iter(&self) -> impl Iterator<Item = &str> {
        self.term_count.keys().map(|s| s.as_str())
    }

    /// Number of distinct terms
    #[inline]
    pub fn term_num(&self) -> usize {
        self.term_count.len()
    }
}
