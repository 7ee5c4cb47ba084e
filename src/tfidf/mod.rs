/*! TF-IDF weighting.

- [TermStats] aggregates document frequencies over the reference corpus.
- [TfidfTransform] turns raw term counts into sorted sparse weight vectors.
- [TfWeighting] and [IdfWeighting] select the formulas,
  and a document frequency range filters out too rare or too common terms.
!*/
mod stats;
mod transform;
mod weighting;

pub use stats::TermStats;
pub use transform::{TfidfTransform, DEFAULT_MAX_DF, DEFAULT_MIN_DF};
pub use weighting::{DocumentTf, IdfWeighting, TfWeighting};
