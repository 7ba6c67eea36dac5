//! Errors raised while validating or loading a course source.
//!
//! A lookup that finds nothing is not an error; [`CatalogIndex::search`] returns `None` for it.
//!
//! [`CatalogIndex::search`]: crate::index::CatalogIndex::search

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for ingestion.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Why a course source was rejected.
///
/// Every variant is fatal to the whole load attempt. The index is never touched when one is
/// returned from validation.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The source could not be opened or read.
    #[error("Unable to open file {}: {source}", .path.display())]
    SourceUnreadable {
        /// The path as given by the caller.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A row with fewer than two fields, or with an empty course number.
    #[error("Insufficient data on line {line}")]
    MalformedRow {
        /// 1-based line number.
        line: usize,
    },

    /// A prerequisite that no row in the source defines.
    #[error("Prerequisite {prerequisite} not found for course {course} on line {line}")]
    MissingPrerequisite {
        /// The prerequisite token as written.
        prerequisite: String,
        /// The first field of the offending row as written.
        course: String,
        /// 1-based line number.
        line: usize,
    },

    /// A course number defined by more than one row. Only reported when duplicates are rejected
    /// by the [`Config`][crate::config::Config].
    #[error("Course {course} on line {line} is already defined")]
    DuplicateCourse {
        /// The first field of the repeated row as written.
        course: String,
        /// 1-based line number of the repeat.
        line: usize,
    },
}

/// The kind of a [`LoadError`], without its details.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadErrorKind {
    /// See [`LoadError::SourceUnreadable`].
    SourceUnreadable,
    /// See [`LoadError::MalformedRow`].
    MalformedRow,
    /// See [`LoadError::MissingPrerequisite`].
    MissingPrerequisite,
    /// See [`LoadError::DuplicateCourse`].
    DuplicateCourse,
}

impl LoadError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            source,
        }
    }

    /// Which kind of failure this is.
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            Self::SourceUnreadable { .. } => LoadErrorKind::SourceUnreadable,
            Self::MalformedRow { .. } => LoadErrorKind::MalformedRow,
            Self::MissingPrerequisite { .. } => LoadErrorKind::MissingPrerequisite,
            Self::DuplicateCourse { .. } => LoadErrorKind::DuplicateCourse,
        }
    }

    /// The 1-based source line the failure was found on, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::SourceUnreadable { .. } => None,
            Self::MalformedRow { line }
            | Self::MissingPrerequisite { line, .. }
            | Self::DuplicateCourse { line, .. } => Some(*line),
        }
    }
}
