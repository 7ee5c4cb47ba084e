/*! TF and IDF weighting schemes.

| scheme                          | formula                   |
|---------------------------------|---------------------------|
| [TfWeighting::Log]              | `1 + ln(tf)`              |
| [TfWeighting::Raw]              | `tf`                      |
| [TfWeighting::Binary]           | `1`                       |
| [TfWeighting::Sqrt]             | `sqrt(tf)`                |
| [TfWeighting::Augmented]        | `0.4 + 0.6 * tf / max_tf` |
| [TfWeighting::MaxNorm]          | `tf / max_tf`             |
| [TfWeighting::Relative]         | `tf / sum_tf`             |
| [IdfWeighting::Smooth]          | `1 + ln(N / (1 + df))`    |
| [IdfWeighting::Plain]           | `ln(N / (1 + df))`        |
| [IdfWeighting::Log1p]           | `ln(1 + N / (1 + df))`    |
| [IdfWeighting::Unit]            | `1`                       |
| [IdfWeighting::MaxRatio]        | `ln(1 + max_df / df)`     |
| [IdfWeighting::Probabilistic]   | `ln((N - df) / df)`       |

`max_tf` and `sum_tf` are the highest and the total term count of the document ([DocumentTf]),
`max_df` the highest document frequency of the reference corpus.

A term frequency of zero always weights zero.
`N` is clamped to 1 so that an empty reference corpus still yields finite weights.
[IdfWeighting::MaxRatio] and [IdfWeighting::Probabilistic] weight terms unseen in the reference corpus zero,
and [IdfWeighting::Probabilistic] is zero when `df >= N`.
!*/
use std::str::FromStr;

use crate::document::TermMap;
use crate::error::Error;

/// Term count totals of a single document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DocumentTf {
    /// Highest term frequency.
    pub max: usize,
    /// Sum of all term frequencies.
    pub sum: usize,
}

impl DocumentTf {
    pub fn from_terms(terms: &TermMap) -> Self {
        terms.values().fold(Self::default(), |acc, &tf| Self {
            max: acc.max.max(tf),
            sum: acc.sum + tf,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TfWeighting {
    #[default]
    Log,
    Raw,
    Binary,
    Sqrt,
    Augmented,
    MaxNorm,
    Relative,
}

impl TfWeighting {
    /// Weight of a term seen `tf` times in a document with totals `doc`.
    #[inline]
    pub fn weight(&self, tf: usize, doc: DocumentTf) -> f64 {
        if tf == 0 {
            return 0.0;
        }
        // totals are at least tf, even when the caller did not fill them
        let max = doc.max.max(tf) as f64;
        let sum = doc.sum.max(tf) as f64;
        let tf = tf as f64;
        match self {
            Self::Log => 1.0 + tf.ln(),
            Self::Raw => tf,
            Self::Binary => 1.0,
            Self::Sqrt => tf.sqrt(),
            Self::Augmented => 0.4 + 0.6 * tf / max,
            Self::MaxNorm => tf / max,
            Self::Relative => tf / sum,
        }
    }
}

impl FromStr for TfWeighting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "log" => Ok(Self::Log),
            "raw" => Ok(Self::Raw),
            "binary" | "constant" => Ok(Self::Binary),
            "sqrt" => Ok(Self::Sqrt),
            "augmented" => Ok(Self::Augmented),
            "max" => Ok(Self::MaxNorm),
            "relative" => Ok(Self::Relative),
            other => Err(Error::Config(format!(
                "unknown tf weighting {:?} (expected log, raw, binary, sqrt, augmented, max or relative)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdfWeighting {
    #[default]
    Smooth,
    Plain,
    Log1p,
    Unit,
    MaxRatio,
    Probabilistic,
}

impl IdfWeighting {
    /// `df` is the number of reference documents containing the term,
    /// `total_docs` the size of the reference corpus
    /// and `max_df` the highest document frequency over the reference corpus.
    #[inline]
    pub fn weight(&self, df: usize, total_docs: usize, max_df: usize) -> f64 {
        let n = total_docs.max(1) as f64;
        let ratio = n / (1.0 + df as f64);
        match self {
            Self::Smooth => 1.0 + ratio.ln(),
            Self::Plain => ratio.ln(),
            Self::Log1p => ratio.ln_1p(),
            Self::Unit => 1.0,
            Self::MaxRatio if df == 0 => 0.0,
            Self::MaxRatio => (max_df.max(df) as f64 / df as f64).ln_1p(),
            Self::Probabilistic if df == 0 || df >= total_docs => 0.0,
            Self::Probabilistic => ((total_docs - df) as f64 / df as f64).ln(),
        }
    }
}

impl FromStr for IdfWeighting {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smooth" => Ok(Self::Smooth),
            "plain" => Ok(Self::Plain),
            "log1p" => Ok(Self::Log1p),
            "unit" => Ok(Self::Unit),
            "maxratio" => Ok(Self::MaxRatio),
            "prob" | "probabilistic" => Ok(Self::Probabilistic),
            other => Err(Error::Config(format!(
                "unknown idf weighting {:?} (expected smooth, plain, log1p, unit, maxratio or prob)",
                other
            ))),
        }
    }
}
