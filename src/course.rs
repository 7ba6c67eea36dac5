//! The record stored in the catalog and the key normalization shared by every layer.
//!
//! # Examples
//!
//! ```
//! use catalog::course::{normalize_key, Course};
//!
//! let course = Course::new("cs201", "Data Structures", ["cs101", ""]);
//!
//! // Keys are always stored uppercase and empty prerequisites are dropped.
//! assert_eq!(course.course_number(), "CS201");
//! assert_eq!(course.prerequisites(), ["CS101"]);
//! assert_eq!(normalize_key("cs201"), course.course_number());
//! ```

use std::fmt;

/// Normalizes a course number into the form used as the index key.
///
/// Every place that compares course numbers (both validation passes, load, and
/// [`CatalogIndex::search`][crate::index::CatalogIndex::search]) goes through this function.
pub fn normalize_key(raw: &str) -> String {
    raw.to_ascii_uppercase()
}

/// A single course: its number, its title, and the numbers of the courses it requires.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Course {
    course_number: String,
    course_title: String,
    prerequisites: Vec<String>,
}

impl Course {
    /// Builds a course, normalizing the course number and every prerequisite. Empty
    /// prerequisites are dropped; the rest keep their order, duplicates included.
    pub fn new<I, S>(course_number: &str, course_title: &str, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            course_number: normalize_key(course_number),
            course_title: course_title.to_string(),
            prerequisites: prerequisites
                .into_iter()
                .map(|p| normalize_key(p.as_ref()))
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// The uppercase course number. This is the key the index sorts by.
    pub fn course_number(&self) -> &str {
        &self.course_number
    }

    /// The title exactly as it appeared in the source.
    pub fn course_title(&self) -> &str {
        &self.course_title
    }

    /// Prerequisite course numbers in source order.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }
}

/// Formats as the listing line `NUMBER, Title`.
impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.course_number, self.course_title)
    }
}
