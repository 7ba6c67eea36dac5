//! This crate is an in-memory course catalog. Courses are read from a delimited text file,
//! checked, and stored in a Binary Search Tree keyed by course number so they can be looked up
//! one at a time or listed in order.
//!
//! ## Binary Search Tree
//!
//! The catalog is kept in a plain Binary Search Tree (see [`index`]). Every node stores one
//! course and has up to two children. The invariants are:
//!
//! 1. For every node, all the nodes in its left subtree have a course number less than its own.
//! 2. For every node, all the nodes in its right subtree have a course number greater than its
//!    own.
//!
//! Looking up a course takes `O(height)`. The tree is never rebalanced so a file sorted by
//! course number produces a tree whose height is the number of courses. Visiting the left
//! subtree, then the node, then the right subtree lists the courses in ascending order.
//!
//! ## Loading
//!
//! A source is only loaded once it has been fully validated (see [`ingest`]): every row needs a
//! course number and a title, and every prerequisite has to be defined somewhere in the same
//! source. A rejected source never changes the catalog.
//!
//! ```
//! use catalog::config::Config;
//! use catalog::index::CatalogIndex;
//! use catalog::ingest;
//!
//! let lines = ["CS201,Data Structures,CS101", "CS101,Intro to CS"];
//! let config = Config::default();
//! let mut index = CatalogIndex::new();
//!
//! if ingest::validate_lines(&lines, &config).is_ok() {
//!     ingest::load_lines(&lines, &mut index, &config);
//! }
//!
//! let listing: Vec<_> = index.iter().map(|c| c.to_string()).collect();
//! assert_eq!(listing, ["CS101, Intro to CS", "CS201, Data Structures"]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod config;
pub mod course;
pub mod error;
pub mod index;
pub mod ingest;
pub mod planner;

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
