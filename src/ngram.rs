//! Word n-gram extraction and hashing.
//!
//! Text is split on unicode word boundaries, then every window of `size` consecutive words
//! is hashed into a 64-bit term using [XxHash64] (seed 0).
//! Words of an n-gram are hashed as if they were joined by a single space,
//! so that `hash_ngram(&["foo", "bar"]) == hash_str("foo bar")`.
//!
//! Texts shorter than `size` words yield a single n-gram made of all their words.
use std::hash::Hasher;

use twox_hash::XxHash64;
use unicode_segmentation::UnicodeSegmentation;

use crate::document::TermMap;
use crate::error::Error;

const SEED: u64 = 0;

/// Hash a string.
pub fn hash_str(s: &str) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    hasher.write(s.as_bytes());
    hasher.finish()
}

/// Hash a sequence of words as if they were space-joined.
pub fn hash_ngram<S: AsRef<str>>(words: &[S]) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    for (idx, word) in words.iter().enumerate() {
        if idx > 0 {
            hasher.write(b" ");
        }
        hasher.write(word.as_ref().as_bytes());
    }
    hasher.finish()
}

/// N-gram extraction settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NgramConfig {
    pub size: usize,
    pub lowercase: bool,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            size: 1,
            lowercase: true,
        }
    }
}

/// Turns text into a term map.
#[derive(Debug, Clone)]
pub struct NgramExtractor {
    config: NgramConfig,
}

impl NgramExtractor {
    pub fn new(config: NgramConfig) -> Result<Self, Error> {
        if config.size == 0 {
            return Err(Error::Config("ngram size must be at least 1".to_string()));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &NgramConfig {
        &self.config
    }

    fn words(&self, text: &str) -> Vec<String> {
        if self.config.lowercase {
            text.unicode_words().map(|w| w.to_lowercase()).collect()
        } else {
            text.unicode_words().map(String::from).collect()
        }
    }

    /// Count hashed n-grams of `text`.
    pub fn extract(&self, text: &str) -> TermMap {
        let words = self.words(text);
        let mut terms = TermMap::default();
        if words.is_empty() {
            return terms;
        }

        if words.len() < self.config.size {
            terms.insert(hash_ngram(words.as_slice()), 1);
            return terms;
        }

        for window in words.windows(self.config.size) {
            *terms.entry(hash_ngram(window)).or_insert(0) += 1;
        }
        terms
    }
}

impl Default for NgramExtractor {
    fn default() -> Self {
        Self {
            config: NgramConfig::default(),
        }
    }
}
