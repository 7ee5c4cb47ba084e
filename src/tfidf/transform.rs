//! TF-IDF transform: turns a [RawDocument] into a sorted sparse [ScoredDocument].
use crate::document::{RawDocument, ScoredDocument, TermScore};

use super::{DocumentTf, IdfWeighting, TermStats, TfWeighting};

/// Terms found in fewer reference documents than this are ignored.
///
/// Document frequencies only count the reference corpus,
/// so a higher bound also ignores streamed terms unseen in the reference corpus.
pub const DEFAULT_MIN_DF: usize = 0;
/// Terms found in more reference documents than this are ignored.
pub const DEFAULT_MAX_DF: usize = 1000;

/// Weighting strategy applied to every document of a run.
///
/// The same transform (and the same [TermStats]) must be used for both corpora,
/// otherwise scores are meaningless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TfidfTransform {
    tf: TfWeighting,
    idf: IdfWeighting,
    normalize: bool,
    min_df: usize,
    max_df: usize,
}

impl Default for TfidfTransform {
    fn default() -> Self {
        Self {
            tf: TfWeighting::default(),
            idf: IdfWeighting::default(),
            normalize: true,
            min_df: DEFAULT_MIN_DF,
            max_df: DEFAULT_MAX_DF,
        }
    }
}

impl TfidfTransform {
    pub fn new(tf: TfWeighting, idf: IdfWeighting, normalize: bool) -> Self {
        Self {
            tf,
            idf,
            normalize,
            ..Default::default()
        }
    }

    /// Only keep terms whose document frequency is in `min_df..=max_df`.
    pub fn with_df_range(mut self, min_df: usize, max_df: usize) -> Self {
        self.min_df = min_df;
        self.max_df = max_df;
        self
    }

    pub fn tf(&self) -> TfWeighting {
        self.tf
    }

    pub fn idf(&self) -> IdfWeighting {
        self.idf
    }

    pub fn normalize(&self) -> bool {
        self.normalize
    }

    pub fn min_df(&self) -> usize {
        self.min_df
    }

    pub fn max_df(&self) -> usize {
        self.max_df
    }

    /// Weight of a term seen `tf` times in a document (of totals `doc`)
    /// and in `df` reference documents.
    ///
    /// Terms outside of the document frequency range weight zero.
    #[inline]
    pub fn weight(&self, tf: usize, doc: DocumentTf, df: usize, stats: &TermStats) -> f64 {
        if df < self.min_df || df > self.max_df {
            return 0.0;
        }
        self.tf.weight(tf, doc)
            * self
                .idf
                .weight(df, stats.document_count(), stats.highest_df())
    }

    /// Transform a document, consuming its term map.
    ///
    /// Zero (and non finite) weights are dropped, so the result may be empty
    /// even if the raw document is not.
    /// When normalization is on, the resulting vector has an L2 norm of 1.
    pub fn transform(&self, raw: RawDocument, stats: &TermStats) -> ScoredDocument {
        let RawDocument { id, terms, url } = raw;
        let doc = DocumentTf::from_terms(&terms);

        let mut weights: Vec<(u64, f64)> = terms
            .into_iter()
            .map(|(hash, tf)| (hash, self.weight(tf, doc, stats.df(hash), stats)))
            .filter(|(_, w)| *w != 0.0 && w.is_finite())
            .collect();

        if self.normalize {
            let norm = weights.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                weights.iter_mut().for_each(|(_, w)| *w /= norm);
            }
        }

        let weights = weights
            .into_iter()
            .map(|(hash, w)| TermScore::new(hash, w as f32))
            .filter(|ts| ts.weight != 0.0)
            .collect();

        ScoredDocument::new(id, url, weights)
    }
}
