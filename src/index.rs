//! The catalog's ordered index: a plain (unbalanced) binary search tree of [`Course`]s keyed by
//! course number.
//!
//! Every parent exclusively owns its children through a `Box`, so there are no parent pointers
//! and no shared nodes. All walks (insert, search, traversal, and teardown) are iterative, which
//! keeps the call stack flat even when sorted input degenerates the tree into a list.
//!
//! # Examples
//!
//! ```
//! use catalog::course::Course;
//! use catalog::index::CatalogIndex;
//!
//! let mut index = CatalogIndex::new();
//!
//! // Nothing in here yet.
//! assert!(index.search("CS101").is_none());
//!
//! index.insert(Course::new("CS201", "Data Structures", ["CS101"]));
//! index.insert(Course::new("CS101", "Intro to CS", std::iter::empty::<&str>()));
//!
//! // Lookups are case-insensitive.
//! assert_eq!(index.search("cs201").unwrap().course_title(), "Data Structures");
//!
//! // Iteration is in ascending key order.
//! let keys: Vec<_> = index.iter().map(|c| c.course_number()).collect();
//! assert_eq!(keys, ["CS101", "CS201"]);
//!
//! // Clearing drops everything.
//! index.clear();
//! assert!(index.is_empty());
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use tracing::debug;

use crate::course::{normalize_key, Course};

type Link = Option<Box<Node>>;

/// A Binary Search Tree of courses. Keys compare as uppercase byte strings.
///
/// Inserting a course whose number is already present replaces the stored course rather than
/// adding a second node, so every stored course is reachable by [`search`][Self::search].
#[derive(Default)]
pub struct CatalogIndex {
    root: Link,
    len: usize,
}

impl Drop for CatalogIndex {
    fn drop(&mut self) {
        destroy(self.root.take());
    }
}

impl fmt::Debug for CatalogIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl CatalogIndex {
    /// Generates a new, empty `CatalogIndex`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of courses stored.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the index holds no courses.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts `course` as a new leaf. Keys strictly less than a node's key go left and greater
    /// keys go right. The tree is never rebalanced.
    ///
    /// If a course with the same number is already stored, it is replaced in place and returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog::course::Course;
    /// use catalog::index::CatalogIndex;
    ///
    /// let mut index = CatalogIndex::new();
    ///
    /// assert!(index.insert(Course::new("CS101", "Intro", std::iter::empty::<&str>())).is_none());
    ///
    /// let old = index.insert(Course::new("cs101", "Intro to CS", std::iter::empty::<&str>()));
    /// assert_eq!(old.unwrap().course_title(), "Intro");
    /// assert_eq!(index.search("CS101").unwrap().course_title(), "Intro to CS");
    /// assert_eq!(index.len(), 1);
    /// ```
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            match course.course_number().cmp(node.course.course_number()) {
                Ordering::Less => slot = &mut node.left,
                Ordering::Equal => return Some(std::mem::replace(&mut node.course, course)),
                Ordering::Greater => slot = &mut node.right,
            }
        }

        *slot = Some(Node::new_boxed(course));
        self.len += 1;
        None
    }

    /// Finds the course with the given number. The key is normalized first so the lookup is
    /// case-insensitive. `None` means no such course is stored.
    ///
    /// # Examples
    ///
    /// ```
    /// use catalog::course::Course;
    /// use catalog::index::CatalogIndex;
    ///
    /// let mut index = CatalogIndex::new();
    /// index.insert(Course::new("CS301", "Algorithms", ["CS201", "CS101"]));
    ///
    /// assert_eq!(index.search("cs301").unwrap().prerequisites(), ["CS201", "CS101"]);
    /// assert!(index.search("CS999").is_none());
    /// ```
    pub fn search(&self, key: &str) -> Option<&Course> {
        let key = normalize_key(key);
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.as_str().cmp(node.course.course_number()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.course),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }

        None
    }

    /// Returns an iterator over every course in ascending key order. Each call starts a fresh
    /// walk from the root.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Removes every course. Children are destroyed before their parents. Calling this on an
    /// empty index does nothing.
    pub fn clear(&mut self) {
        if self.root.is_some() {
            debug!(courses = self.len, "clearing catalog index");
        }
        destroy(self.root.take());
        self.len = 0;
    }

    /// The number of nodes on the longest path from the root to a leaf. An empty index has a
    /// height of 0 and a single course gives a height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        stack.extend(self.root.as_deref().map(|n| (n, 1)));
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }

        height
    }
}

impl Extend<Course> for CatalogIndex {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CatalogIndex {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}

impl<'a> IntoIterator for &'a CatalogIndex {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Tears down a subtree in post-order using an explicit stack.
///
/// A node goes back on the stack beneath its detached children, so it is only dropped once both
/// of its subtrees are gone. Every `Node` that reaches `drop` has no children left, which keeps
/// `Box`'s own recursive drop from ever running deeper than one level.
fn destroy(root: Link) {
    let mut stack: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        let left = node.left.take();
        let right = node.right.take();
        if left.is_none() && right.is_none() {
            drop(node);
            continue;
        }

        stack.push(node);
        stack.extend(right);
        stack.extend(left);
    }
}

/// One course plus the subtrees holding smaller (`left`) and greater (`right`) keys.
struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    fn new_boxed(course: Course) -> Box<Self> {
        Box::new(Self {
            course,
            left: None,
            right: None,
        })
    }
}

/// In-order iterator over a [`CatalogIndex`], created by [`CatalogIndex::iter`].
///
/// The stack holds the chain of ancestors whose course has not been yielded yet.
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.course)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(number: &str) -> Course {
        Course::new(number, &format!("Title of {number}"), std::iter::empty::<&str>())
    }

    fn keys(index: &CatalogIndex) -> Vec<&str> {
        index.iter().map(Course::course_number).collect()
    }

    #[test]
    fn always_adding_left() {
        let numbers = ["CS10", "CS09", "CS08", "CS07", "CS06", "CS05", "CS04", "CS03", "CS02"];
        let mut inserted = Vec::new();

        let mut index = CatalogIndex::new();
        assert!(index.search("CS10").is_none());

        for number in numbers {
            index.insert(course(number));
            inserted.push(number);
            for inserted in &inserted {
                assert_eq!(index.search(inserted), Some(&course(inserted)));
            }
        }

        // Descending input never goes right so every node is on one path.
        assert_eq!(index.height(), numbers.len());
    }

    #[test]
    fn always_adding_right() {
        let numbers = ["CS01", "CS02", "CS03", "CS04", "CS05", "CS06", "CS07", "CS08", "CS09"];
        let mut inserted = Vec::new();

        let mut index = CatalogIndex::new();
        assert!(index.search("CS01").is_none());

        for number in numbers {
            index.insert(course(number));
            inserted.push(number);
            for inserted in &inserted {
                assert_eq!(index.search(inserted), Some(&course(inserted)));
            }
        }

        assert_eq!(index.height(), numbers.len());
    }

    #[test]
    fn in_order_is_sorted() {
        let mut index = CatalogIndex::new();
        for number in ["MATH201", "CS301", "cs101", "BIO100", "CS201", "MATH101"] {
            index.insert(course(number));
        }

        assert_eq!(
            keys(&index),
            ["BIO100", "CS101", "CS201", "CS301", "MATH101", "MATH201"]
        );
        assert_eq!(index.iter().len(), 6);
        assert_eq!(index.height(), 3);
    }

    #[test]
    fn iteration_is_restartable() {
        let index: CatalogIndex = ["B", "A", "C"].into_iter().map(course).collect();

        let first: Vec<_> = index.iter().collect();
        let second: Vec<_> = (&index).into_iter().collect();
        assert_eq!(first, second);

        let mut iter = index.iter();
        assert_eq!(iter.next().map(Course::course_number), Some("A"));
        // A fresh iterator is unaffected by the partially consumed one.
        assert_eq!(index.iter().count(), 3);
    }

    #[test]
    fn duplicate_key_replaces() {
        let mut index = CatalogIndex::new();
        index.insert(course("CS201"));
        index.insert(course("CS101"));
        index.insert(course("CS301"));

        let replacement = Course::new("cs201", "Data Structures", ["CS101"]);
        let old = index.insert(replacement.clone());

        assert_eq!(old, Some(course("CS201")));
        assert_eq!(index.search("CS201"), Some(&replacement));
        assert_eq!(index.len(), 3);
        assert_eq!(keys(&index), ["CS101", "CS201", "CS301"]);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut index: CatalogIndex = ["CS201", "CS101", "CS301"].into_iter().map(course).collect();

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        assert_eq!(index.height(), 0);
        assert!(index.search("CS101").is_none());

        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.iter().next(), None);

        // And it can be filled again.
        index.insert(course("CS101"));
        assert_eq!(keys(&index), ["CS101"]);
    }

    #[test]
    fn clear_empty_index() {
        let mut index = CatalogIndex::new();
        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn deep_tree_clears_without_overflow() {
        let mut index = CatalogIndex::new();
        for i in 0..20_000 {
            index.insert(course(&format!("C{i:05}")));
        }
        assert_eq!(index.height(), 20_000);
        assert_eq!(index.iter().count(), 20_000);

        index.clear();
        assert!(index.is_empty());
    }

    #[test]
    fn debug_lists_courses() {
        let index: CatalogIndex = ["B", "A"].into_iter().map(course).collect();
        let debug = format!("{index:?}");
        assert!(debug.find("\"A\"").unwrap() < debug.find("\"B\"").unwrap());
    }
}
