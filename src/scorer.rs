//! Alignment score between two documents.
//!
//! The score is the (unnormalized) dot product of the two sparse TF-IDF vectors.
//! Vectors are expected to be normalized by [crate::tfidf::TfidfTransform] if a cosine similarity is wanted.
use std::cmp::Ordering;

use crate::document::{ScoredDocument, TermScore};

/// Dot product of two weight vectors sorted by hash.
///
/// Walks both vectors once (`O(|a| + |b|)`).
#[inline]
pub fn dot(a: &[TermScore], b: &[TermScore]) -> f32 {
    let (mut i, mut j) = (0, 0);
    let mut acc = 0f32;
    while i < a.len() && j < b.len() {
        match a[i].hash.cmp(&b[j].hash) {
            Ordering::Equal => {
                acc += a[i].weight * b[j].weight;
                i += 1;
                j += 1;
            }
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
        }
    }
    acc
}

/// Alignment score of two documents. Commutative.
#[inline]
pub fn score(a: &ScoredDocument, b: &ScoredDocument) -> f32 {
    dot(a.weights(), b.weights())
}
