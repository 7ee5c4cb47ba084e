/*! Alignment run configuration.

Use [AlignConfigBuilder] to create an [AlignConfig]:
```
use docalign::config::AlignConfigBuilder;

let config = AlignConfigBuilder::default()
    .threshold(0.5)
    .workers(8)
    .build()
    .unwrap();
assert_eq!(config.queue_capacity(), 32);
```
!*/
use crate::error::Error;
use crate::tfidf::{IdfWeighting, TfWeighting, TfidfTransform, DEFAULT_MAX_DF, DEFAULT_MIN_DF};

pub const DEFAULT_THRESHOLD: f32 = 0.7;
pub const DEFAULT_WORKERS: usize = 4;
/// Queue capacity is this times the number of workers, unless set.
pub const QUEUE_FACTOR: usize = 4;

/// Validated configuration of an alignment run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignConfig {
    threshold: f32,
    workers: usize,
    queue_capacity: usize,
    transform: TfidfTransform,
}

impl AlignConfig {
    /// Pairs scoring at least this much are reported.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue_capacity
    }

    pub fn transform(&self) -> &TfidfTransform {
        &self.transform
    }
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            workers: DEFAULT_WORKERS,
            queue_capacity: DEFAULT_WORKERS * QUEUE_FACTOR,
            transform: TfidfTransform::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AlignConfigBuilder {
    threshold: f32,
    workers: usize,
    queue_capacity: Option<usize>,
    tf: TfWeighting,
    idf: IdfWeighting,
    normalize: bool,
    min_df: usize,
    max_df: usize,
}

impl AlignConfigBuilder {
    /// Validate and build the configuration.
    ///
    /// Fails on a non finite threshold, zero workers, a zero queue capacity
    /// or an empty document frequency range.
    pub fn build(&self) -> Result<AlignConfig, Error> {
        if !self.threshold.is_finite() {
            return Err(Error::Config(format!(
                "threshold must be a finite number, got {}",
                self.threshold
            )));
        }
        if self.workers == 0 {
            return Err(Error::Config("workers must be at least 1".to_string()));
        }
        if self.min_df > self.max_df {
            return Err(Error::Config(format!(
                "min df ({}) is greater than max df ({})",
                self.min_df, self.max_df
            )));
        }
        let queue_capacity = match self.queue_capacity {
            Some(0) => {
                return Err(Error::Config(
                    "queue capacity must be at least 1".to_string(),
                ))
            }
            Some(c) => c,
            None => self
                .workers
                .checked_mul(QUEUE_FACTOR)
                .ok_or_else(|| Error::Config(format!("too many workers: {}", self.workers)))?,
        };

        Ok(AlignConfig {
            threshold: self.threshold,
            workers: self.workers,
            queue_capacity,
            transform: TfidfTransform::new(self.tf, self.idf, self.normalize)
                .with_df_range(self.min_df, self.max_df),
        })
    }

    pub fn threshold(&mut self, threshold: f32) -> &mut Self {
        self.threshold = threshold;
        self
    }

    pub fn workers(&mut self, workers: usize) -> &mut Self {
        self.workers = workers;
        self
    }

    pub fn queue_capacity(&mut self, queue_capacity: usize) -> &mut Self {
        self.queue_capacity = Some(queue_capacity);
        self
    }

    pub fn tf(&mut self, tf: TfWeighting) -> &mut Self {
        self.tf = tf;
        self
    }

    pub fn idf(&mut self, idf: IdfWeighting) -> &mut Self {
        self.idf = idf;
        self
    }

    pub fn normalize(&mut self, normalize: bool) -> &mut Self {
        self.normalize = normalize;
        self
    }

    /// Ignore terms found in fewer reference documents.
    pub fn min_df(&mut self, min_df: usize) -> &mut Self {
        self.min_df = min_df;
        self
    }

    /// Ignore terms found in more reference documents.
    pub fn max_df(&mut self, max_df: usize) -> &mut Self {
        self.max_df = max_df;
        self
    }
}

impl Default for AlignConfigBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            workers: DEFAULT_WORKERS,
            queue_capacity: None,
            tf: TfWeighting::default(),
            idf: IdfWeighting::default(),
            normalize: true,
            min_df: DEFAULT_MIN_DF,
            max_df: DEFAULT_MAX_DF,
        }
    }
}
