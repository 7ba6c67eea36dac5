//! Options controlling how a course source is read.

/// The field separator used when none is configured.
pub const DEFAULT_DELIMITER: char = ',';

/// Ingestion options.
///
/// # Examples
///
/// ```
/// use catalog::config::{Config, DEFAULT_DELIMITER};
///
/// let config = Config::default();
/// assert_eq!(config.delimiter(), DEFAULT_DELIMITER);
/// assert!(!config.reject_duplicates());
///
/// let config = Config::default().with_delimiter('|').with_reject_duplicates(true);
/// assert_eq!(config.delimiter(), '|');
/// assert!(config.reject_duplicates());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    delimiter: char,
    reject_duplicates: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            reject_duplicates: false,
        }
    }
}

impl Config {
    /// Uses `delimiter` to separate fields.
    pub fn with_delimiter(self, delimiter: char) -> Self {
        Self { delimiter, ..self }
    }

    /// When set, validation fails on a course number defined twice. Otherwise the later row
    /// replaces the earlier one during load.
    pub fn with_reject_duplicates(self, reject_duplicates: bool) -> Self {
        Self {
            reject_duplicates,
            ..self
        }
    }

    /// The field separator.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Whether repeated course numbers fail validation.
    pub fn reject_duplicates(&self) -> bool {
        self.reject_duplicates
    }
}
