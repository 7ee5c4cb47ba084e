//! Document frequency table.
use crate::document::{RawDocument, TermMap};

/// Number of reference documents containing each term, and the size of the reference corpus.
///
/// Built once before scoring starts, then only read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermStats {
    document_count: usize,
    df: TermMap,
    highest_df: usize,
}

impl TermStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregate document frequencies over a whole corpus.
    pub fn from_documents<'a, I>(documents: I) -> Self
    where
        I: IntoIterator<Item = &'a RawDocument>,
    {
        let mut stats = Self::new();
        for document in documents {
            stats.add_document(document);
        }
        stats
    }

    /// Count a document.
    ///
    /// Each distinct term is counted once, whatever its frequency in the document.
    pub fn add_document(&mut self, document: &RawDocument) {
        self.document_count += 1;
        for term in document.terms.keys() {
            let df = self.df.entry(*term).or_insert(0);
            *df += 1;
            self.highest_df = self.highest_df.max(*df);
        }
    }

    /// Document frequency of `term`, 0 if unseen.
    #[inline]
    pub fn df(&self, term: u64) -> usize {
        self.df.get(&term).copied().unwrap_or(0)
    }

    pub fn document_count(&self) -> usize {
        self.document_count
    }

    /// Document frequency of the most common term.
    pub fn highest_df(&self) -> usize {
        self.highest_df
    }

    /// Number of distinct terms.
    pub fn nb_terms(&self) -> usize {
        self.df.len()
    }
}
