/*! Document representations.

A document enters the system as a [RawDocument] (a bag of n-gram hashes with their frequency),
and is turned into a [ScoredDocument] (a sorted sparse TF-IDF vector) by [crate::tfidf::TfidfTransform].
!*/
use std::{collections::HashMap, hash::BuildHasherDefault};

use twox_hash::XxHash64;

/// term hash -> count map.
///
/// Keys are already hashes, so we use a fast non-cryptographic hasher.
pub type TermMap = HashMap<u64, usize, BuildHasherDefault<XxHash64>>;

/// A document as read from a corpus: n-gram hash frequencies and its url.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDocument {
    pub id: usize,
    pub terms: TermMap,
    pub url: String,
}

impl RawDocument {
    pub fn new(id: usize, terms: TermMap, url: String) -> Self {
        Self { id, terms, url }
    }

    /// Build a document from `(hash, count)` pairs.
    /// Counts of repeated hashes are summed.
    pub fn from_counts<I>(id: usize, counts: I, url: &str) -> Self
    where
        I: IntoIterator<Item = (u64, usize)>,
    {
        let mut terms = TermMap::default();
        for (hash, count) in counts {
            *terms.entry(hash).or_insert(0) += count;
        }
        Self {
            id,
            terms,
            url: url.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Weight of a single term in a document vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TermScore {
    pub hash: u64,
    pub weight: f32,
}

impl TermScore {
    pub fn new(hash: u64, weight: f32) -> Self {
        Self { hash, weight }
    }
}

impl From<(u64, f32)> for TermScore {
    fn from((hash, weight): (u64, f32)) -> Self {
        Self { hash, weight }
    }
}

/// Sparse weight vector of a document.
///
/// `weights` is strictly sorted by hash, without duplicates.
/// A document with no weights is the poison document used to stop workers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoredDocument {
    id: usize,
    url: String,
    weights: Vec<TermScore>,
}

impl ScoredDocument {
    /// Create a new scored document, sorting the weights by hash.
    ///
    /// Panics in debug builds if two weights share the same hash.
    pub fn new(id: usize, url: String, mut weights: Vec<TermScore>) -> Self {
        weights.sort_unstable_by_key(|ts| ts.hash);
        debug_assert!(
            weights.windows(2).all(|w| w[0].hash < w[1].hash),
            "duplicate hash in document {}",
            id
        );
        Self { id, url, weights }
    }

    /// The shutdown marker. Never a real document.
    pub fn poison() -> Self {
        Self::default()
    }

    pub fn is_poison(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn weights(&self) -> &[TermScore] {
        self.weights.as_ref()
    }

    /// Number of non-zero terms.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// In-memory reference corpus, read-only once built.
pub type ReferenceTable = Vec<ScoredDocument>;

#[cfg(test)]
mod tests {
    use super::{RawDocument, ScoredDocument, TermScore};

    #[test]
    fn from_counts_sums_repeats() {
        let doc = RawDocument::from_counts(0, vec![(1, 2), (2, 1), (1, 3)], "http://a");
        assert_eq!(doc.terms.get(&1), Some(&5));
        assert_eq!(doc.terms.get(&2), Some(&1));
        assert_eq!(doc.url, "http://a");
    }

    #[test]
    fn new_sorts_weights() {
        let weights = vec![
            TermScore::new(9, 0.1),
            TermScore::new(2, 0.4),
            TermScore::new(5, 0.3),
        ];
        let doc = ScoredDocument::new(1, "u".to_string(), weights);
        let hashes: Vec<u64> = doc.weights().iter().map(|ts| ts.hash).collect();
        assert_eq!(hashes, vec![2, 5, 9]);
        assert!(!doc.is_poison());
    }

    #[test]
    fn poison() {
        let p = ScoredDocument::poison();
        assert!(p.is_poison());
        assert_eq!(p.len(), 0);
    }
}
