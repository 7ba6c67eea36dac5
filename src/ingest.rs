//! Reading course rows out of delimited text, checking them, and loading them into a
//! [`CatalogIndex`].
//!
//! A source is one course per line: the course number, the title, then any number of
//! prerequisite course numbers, all separated by a single delimiter character. There is no
//! quoting and no header row.
//!
//! Validation always runs to completion before the index is touched:
//!
//! 1. Every row must have at least a course number and a title. The course numbers are
//!    collected.
//! 2. Every non-empty prerequisite must be one of the collected course numbers.
//!
//! # Examples
//!
//! ```
//! use catalog::config::Config;
//! use catalog::error::LoadErrorKind;
//! use catalog::index::CatalogIndex;
//! use catalog::ingest;
//!
//! let config = Config::default();
//! let lines = [
//!     "CS101,Intro to CS",
//!     "CS201,Data Structures,CS101",
//!     "CS301,Algorithms,CS201,CS101",
//! ];
//!
//! assert_eq!(ingest::validate_lines(&lines, &config).unwrap(), 3);
//!
//! let mut index = CatalogIndex::new();
//! ingest::load_lines(&lines, &mut index, &config);
//! assert_eq!(index.search("cs301").unwrap().prerequisites(), ["CS201", "CS101"]);
//!
//! let err = ingest::validate_lines(&["CS201,Data Structures,CS999"], &config).unwrap_err();
//! assert_eq!(err.kind(), LoadErrorKind::MissingPrerequisite);
//! assert_eq!(err.to_string(), "Prerequisite CS999 not found for course CS201 on line 1");
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::course::{normalize_key, Course};
use crate::error::{LoadError, Result};
use crate::index::CatalogIndex;

/// Index of the first prerequisite field in a row.
const FIRST_PREREQUISITE: usize = 2;

/// Splits one line into its fields.
///
/// An empty line has no fields. A single trailing empty field is dropped, so `"A,B,"` has two
/// fields while `"A,,B"` has three.
///
/// # Examples
///
/// ```
/// use catalog::ingest::split_fields;
///
/// assert!(split_fields("", ',').is_empty());
/// assert_eq!(split_fields("CS101,Intro,", ','), ["CS101", "Intro"]);
/// assert_eq!(split_fields("CS201,DS,,CS101", ','), ["CS201", "DS", "", "CS101"]);
/// ```
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    if line.is_empty() {
        return Vec::new();
    }

    let mut fields: Vec<&str> = line.split(delimiter).collect();
    if fields.last().is_some_and(|f| f.is_empty()) {
        fields.pop();
    }
    fields
}

/// The fields of a row that can become a course, or `None` when the row lacks a course number or
/// a title.
fn row_fields(line: &str, delimiter: char) -> Option<Vec<&str>> {
    let fields = split_fields(line, delimiter);
    match fields.first() {
        Some(number) if !number.is_empty() && fields.len() > 1 => Some(fields),
        _ => None,
    }
}

/// Validates in-memory rows and returns how many there are.
///
/// Nothing is mutated. The first failing row decides the error.
pub fn validate_lines<S: AsRef<str>>(lines: &[S], config: &Config) -> Result<usize> {
    let delimiter = config.delimiter();

    let mut known = HashSet::with_capacity(lines.len());
    for (line_number, line) in numbered(lines) {
        let fields =
            row_fields(line, delimiter).ok_or(LoadError::MalformedRow { line: line_number })?;
        if !known.insert(normalize_key(fields[0])) && config.reject_duplicates() {
            return Err(LoadError::DuplicateCourse {
                course: fields[0].to_string(),
                line: line_number,
            });
        }
    }
    debug!(courses = known.len(), "collected course numbers");

    for (line_number, line) in numbered(lines) {
        let fields = split_fields(line, delimiter);
        for prerequisite in fields.iter().skip(FIRST_PREREQUISITE) {
            let key = normalize_key(prerequisite);
            if !key.is_empty() && !known.contains(&key) {
                return Err(LoadError::MissingPrerequisite {
                    prerequisite: prerequisite.to_string(),
                    course: fields[0].to_string(),
                    line: line_number,
                });
            }
        }
    }
    debug!("all prerequisites resolved");

    Ok(lines.len())
}

/// Clears `index` and fills it with one course per row, returning how many courses it holds
/// afterwards. A row repeating an earlier course number replaces that course, so the count can
/// be lower than the number of rows.
///
/// Call this only with rows that passed [`validate_lines`]. Rows that could not become a course
/// are skipped here rather than reported.
pub fn load_lines<S: AsRef<str>>(lines: &[S], index: &mut CatalogIndex, config: &Config) -> usize {
    index.clear();

    for (line_number, line) in numbered(lines) {
        let Some(fields) = row_fields(line, config.delimiter()) else {
            continue;
        };

        let course = Course::new(fields[0], fields[1], fields[FIRST_PREREQUISITE..].iter().copied());
        if let Some(replaced) = index.insert(course) {
            warn!(
                course = replaced.course_number(),
                line = line_number,
                "course defined again; keeping the later row"
            );
        }
    }

    index.len()
}

/// Validates the file at `path`.
///
/// Fails with [`LoadError::SourceUnreadable`] before any parsing if the file cannot be read.
pub fn validate_source(path: impl AsRef<Path>, config: &Config) -> Result<usize> {
    let path = path.as_ref();
    let lines = read_lines(path)?;
    let courses = validate_lines(&lines, config).inspect_err(|err| {
        warn!(path = %path.display(), %err, "course source rejected");
    })?;

    info!(path = %path.display(), courses, "validated course source");
    Ok(courses)
}

/// Reads the file at `path` again and loads it into `index`. Only call this once
/// [`validate_source`] has accepted the same file.
///
/// `index` is left untouched if the file can no longer be read.
pub fn load_source(path: impl AsRef<Path>, index: &mut CatalogIndex, config: &Config) -> Result<usize> {
    let path = path.as_ref();
    let lines = read_lines(path)?;
    let courses = load_lines(&lines, index, config);

    info!(path = %path.display(), courses, "loaded course source");
    Ok(courses)
}

/// Reads the file at `path` once, validates it, and only then replaces the contents of `index`.
///
/// On any error `index` is exactly as it was before the call.
///
/// # Examples
///
/// ```no_run
/// use catalog::config::Config;
/// use catalog::index::CatalogIndex;
/// use catalog::ingest;
///
/// let mut index = CatalogIndex::new();
/// match ingest::validate_and_load("courses.csv", &mut index, &Config::default()) {
///     Ok(courses) => println!("loaded {courses} courses"),
///     Err(err) => println!("Error: {err}"),
/// }
/// ```
pub fn validate_and_load(
    path: impl AsRef<Path>,
    index: &mut CatalogIndex,
    config: &Config,
) -> Result<usize> {
    let path = path.as_ref();
    let lines = read_lines(path)?;
    validate_lines(&lines, config).inspect_err(|err| {
        warn!(path = %path.display(), %err, "course source rejected");
    })?;

    let courses = load_lines(&lines, index, config);
    info!(path = %path.display(), courses, "loaded course source");
    Ok(courses)
}

/// Pairs every line with its 1-based line number.
fn numbered<S: AsRef<str>>(lines: &[S]) -> impl Iterator<Item = (usize, &str)> {
    lines.iter().enumerate().map(|(i, line)| (i + 1, line.as_ref()))
}

/// Reads every line of a file. Line terminators (`\n` or `\r\n`) are not part of the lines.
///
/// Bytes that are not valid UTF-8 become U+FFFD instead of failing the read.
fn read_lines(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|err| LoadError::unreadable(path, err))?;
    BufReader::new(file)
        .split(b'\n')
        .map(|line| line.map(|bytes| decode_line(&bytes)))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|err| LoadError::unreadable(path, err))
}

fn decode_line(bytes: &[u8]) -> String {
    let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
    String::from_utf8_lossy(bytes).into_owned()
}
