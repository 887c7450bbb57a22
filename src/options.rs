//! Configuration options for loading KOML sources.
//!
//! - [`LoadOptions`]: main configuration struct
//! - [`DuplicateKeys`]: what to do when a qualified key is defined twice
//!
//! ## Examples
//!
//! ```rust
//! use koml::{load_with_options, DuplicateKeys, LoadOptions};
//!
//! let src = b"a = 1\na = 2\n";
//!
//! // Default: the last definition wins
//! let table = koml::load(src).unwrap();
//! assert_eq!(table.get_i32("a").unwrap(), 2);
//!
//! // Strict: duplicates abort the load
//! let options = LoadOptions::new().with_duplicate_keys(DuplicateKeys::Reject);
//! assert!(load_with_options(src, &options).is_err());
//! ```

/// Policy for a qualified key defined more than once.
///
/// # Examples
///
/// ```rust
/// use koml::DuplicateKeys;
///
/// assert_eq!(DuplicateKeys::default(), DuplicateKeys::LastWins);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// The later value replaces the earlier one. The symbol keeps the
    /// position of its first definition.
    #[default]
    LastWins,
    /// The load fails with [`Error::DuplicateKey`](crate::Error::DuplicateKey).
    Reject,
}

/// Configuration options for [`load_with_options`](crate::load_with_options).
///
/// # Examples
///
/// ```rust
/// use koml::{DuplicateKeys, LoadOptions};
///
/// let options = LoadOptions::new();
/// assert_eq!(options.duplicate_keys, DuplicateKeys::LastWins);
/// assert!(options.references);
///
/// let options = LoadOptions::new().with_references(false);
/// assert!(!options.references);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadOptions {
    pub duplicate_keys: DuplicateKeys,
    /// Whether `@key` references are accepted as values.
    pub references: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            duplicate_keys: DuplicateKeys::default(),
            references: true,
        }
    }
}

impl LoadOptions {
    /// Creates default options (last definition wins, references enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that reject duplicate keys.
    ///
    /// ```rust
    /// use koml::{DuplicateKeys, LoadOptions};
    ///
    /// assert_eq!(LoadOptions::strict().duplicate_keys, DuplicateKeys::Reject);
    /// ```
    #[must_use]
    pub fn strict() -> Self {
        LoadOptions {
            duplicate_keys: DuplicateKeys::Reject,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    #[must_use]
    pub fn with_references(mut self, enabled: bool) -> Self {
        self.references = enabled;
        self
    }
}
