//! Groups and the collections partitioners build from them.
//!
//! A group is an ordered bucket of identifiers (test names or file paths)
//! that a single downstream worker runs together. Group indices start at 1.
//! Identifiers keep the order they were assigned in, they are never sorted.

use std::collections::BTreeMap;

/// A borrowed view of one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group<'g> {
    pub index: usize,
    pub items: &'g [String],
}

/// All groups of one partition, keyed by their 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupCollection(BTreeMap<usize, Vec<String>>);

impl GroupCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an identifier to the group at `index`, opening it if needed.
    pub fn add(&mut self, index: usize, item: impl Into<String>) {
        debug_assert!(index >= 1, "group indices start at 1");
        self.0.entry(index).or_default().push(item.into());
    }

    /// Put `items` at `index`, replacing whatever that group held before.
    ///
    /// Returns the previous content, if there was any.
    pub fn replace(&mut self, index: usize, items: Vec<String>) -> Option<Vec<String>> {
        debug_assert!(index >= 1, "group indices start at 1");
        self.0.insert(index, items)
    }

    pub fn get(&self, index: usize) -> Option<&[String]> {
        self.0.get(&index).map(Vec::as_slice)
    }

    /// Number of populated groups.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of identifiers over all groups.
    pub fn item_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Iterate groups in ascending index order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Group<'_>> {
        self.0.iter().map(|(index, items)| Group {
            index: *index,
            items: items.as_slice(),
        })
    }
}

impl<I, S> FromIterator<(usize, I)> for GroupCollection
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (usize, I)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(index, items)| (index, items.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }
}

/// The output of one partitioning pass, ready for a
/// [`GroupWriter`](crate::writer::GroupWriter).
///
/// The optional suite label ends up in the group file names so partitions of
/// different locations do not overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Partition {
    pub suite: Option<String>,
    pub groups: GroupCollection,
}

impl Partition {
    pub fn new(groups: GroupCollection) -> Self {
        Self {
            suite: None,
            groups,
        }
    }

    pub fn with_suite(self, suite: Option<String>) -> Self {
        Self { suite, ..self }
    }
}
