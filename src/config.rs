use thiserror::Error;

/// Bucket count used by [`TableConfig::default`].
pub const DEFAULT_BUCKET_COUNT: usize = 16;

/// Load factor used by [`TableConfig::default`].
pub const DEFAULT_LOAD_FACTOR: f64 = 0.75;

/// Smallest accepted load factor.
///
/// A table with load factor `lf` holding a single entry needs more than
/// `1 / lf` buckets, so lower values would make the first insertion
/// allocate without bound.
pub const MIN_LOAD_FACTOR: f64 = 1.0 / 1024.0;

/// Reasons a [`TableConfig`] is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The table needs at least one bucket.
    #[error("bucket count must be at least 1")]
    ZeroBuckets,

    /// The load factor must be finite and at least [`MIN_LOAD_FACTOR`].
    #[error("load factor must be finite and at least 1/1024, got {0}")]
    InvalidLoadFactor(f64),
}

/// Construction parameters for a [`HashTable`](crate::HashTable).
///
/// # Examples
///
/// ```rust
/// use chain_hash::ConfigError;
/// use chain_hash::TableConfig;
///
/// let config = TableConfig::new().bucket_count(64).load_factor(0.5);
/// assert!(config.validate().is_ok());
///
/// let bad = TableConfig::new().load_factor(0.0);
/// assert_eq!(bad.validate(), Err(ConfigError::InvalidLoadFactor(0.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableConfig {
    /// Number of buckets the table starts with.
    pub bucket_count: usize,
    /// Ratio of entries to buckets above which the table doubles. Must be
    /// finite and at least [`MIN_LOAD_FACTOR`].
    pub load_factor: f64,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            bucket_count: DEFAULT_BUCKET_COUNT,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl TableConfig {
    /// Returns the default configuration: 16 buckets, load factor 0.75.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial bucket count.
    pub fn bucket_count(mut self, bucket_count: usize) -> Self {
        self.bucket_count = bucket_count;
        self
    }

    /// Sets the load factor threshold.
    ///
    /// Values below [`MIN_LOAD_FACTOR`] fail [`validate`](Self::validate).
    /// Values above 1 are accepted and let chains grow longer before the
    /// table doubles.
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks that the table can be built from this configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bucket_count == 0 {
            return Err(ConfigError::ZeroBuckets);
        }
        if !self.load_factor.is_finite() || self.load_factor < MIN_LOAD_FACTOR {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor));
        }
        Ok(())
    }
}
