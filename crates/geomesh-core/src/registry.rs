//! Tag tables for managing the entities of one tag space.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{GeometryError, Result};
use crate::tag::{EntityKind, Tag};

/// Table of entities keyed by tag.
///
/// Entries are kept in tag order so that snapshots and exported scripts are
/// deterministic. The table also tracks the highest tag ever used, from which
/// automatic tags are allocated.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TagTable<T> {
    #[serde(skip)]
    kind: EntityKind,
    entries: BTreeMap<Tag, T>,
    #[serde(skip)]
    high_water: Tag,
}

impl<T> TagTable<T> {
    /// Creates a new empty table for the given tag space.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            entries: BTreeMap::new(),
            high_water: 0,
        }
    }

    /// Returns the kind of entity stored in this table.
    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    /// Resolves the tag for a new entry without inserting anything.
    ///
    /// An explicit tag must be strictly positive and unused. Without one, the
    /// next tag above every tag used so far is returned.
    pub fn resolve(&self, tag: Option<Tag>) -> Result<Tag> {
        match tag {
            Some(tag) if tag <= 0 => Err(GeometryError::InvalidTag {
                kind: self.kind,
                tag,
            }),
            Some(tag) if self.entries.contains_key(&tag) => Err(GeometryError::DuplicateTag {
                kind: self.kind,
                tag,
            }),
            Some(tag) => Ok(tag),
            None => self
                .high_water
                .checked_add(1)
                .ok_or(GeometryError::TagSpaceExhausted(self.kind)),
        }
    }

    /// Inserts an entry under a tag previously obtained from [`Self::resolve`].
    pub fn insert(&mut self, tag: Tag, value: T) {
        debug_assert!(tag > 0 && !self.entries.contains_key(&tag));
        self.high_water = self.high_water.max(tag);
        self.entries.insert(tag, value);
    }

    /// Gets a reference to an entry by tag.
    pub fn get(&self, tag: Tag) -> Option<&T> {
        self.entries.get(&tag)
    }

    /// Gets a mutable reference to an entry by tag.
    pub fn get_mut(&mut self, tag: Tag) -> Option<&mut T> {
        self.entries.get_mut(&tag)
    }

    /// Gets an entry by tag, failing with `UnknownReference` if it is missing.
    pub fn require(&self, tag: Tag) -> Result<&T> {
        self.entries
            .get(&tag)
            .ok_or(GeometryError::UnknownReference {
                kind: self.kind,
                tag,
            })
    }

    /// Checks if an entry with the given tag exists.
    pub fn contains(&self, tag: Tag) -> bool {
        self.entries.contains_key(&tag)
    }

    /// Returns an iterator over `(tag, entry)` pairs in tag order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &T)> {
        self.entries.iter().map(|(&tag, value)| (tag, value))
    }

    /// Returns the tags in ascending order.
    pub fn tags(&self) -> impl Iterator<Item = Tag> + '_ {
        self.entries.keys().copied()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_tags_start_at_one() {
        let table: TagTable<()> = TagTable::new(EntityKind::Point);
        assert_eq!(table.resolve(None).unwrap(), 1);
    }

    #[test]
    fn test_auto_tag_skips_explicit_tags() {
        let mut table = TagTable::new(EntityKind::Curve);
        let tag = table.resolve(Some(7)).unwrap();
        table.insert(tag, "a");
        assert_eq!(table.resolve(None).unwrap(), 8);
    }

    #[test]
    fn test_duplicate_tag() {
        let mut table = TagTable::new(EntityKind::Surface);
        table.insert(3, ());
        assert!(matches!(
            table.resolve(Some(3)),
            Err(GeometryError::DuplicateTag {
                kind: EntityKind::Surface,
                tag: 3
            })
        ));
    }

    #[test]
    fn test_non_positive_tag() {
        let table: TagTable<()> = TagTable::new(EntityKind::Volume);
        assert!(matches!(
            table.resolve(Some(0)),
            Err(GeometryError::InvalidTag { tag: 0, .. })
        ));
        assert!(table.resolve(Some(-2)).is_err());
    }

    #[test]
    fn test_exhausted_tag_space() {
        let mut table = TagTable::new(EntityKind::Point);
        table.insert(Tag::MAX, ());
        assert!(matches!(
            table.resolve(None),
            Err(GeometryError::TagSpaceExhausted(EntityKind::Point))
        ));
    }

    #[test]
    fn test_require_and_iter_order() {
        let mut table = TagTable::new(EntityKind::Point);
        table.insert(5, 'b');
        table.insert(2, 'a');
        assert_eq!(table.require(2).unwrap(), &'a');
        assert!(matches!(
            table.require(4),
            Err(GeometryError::UnknownReference { tag: 4, .. })
        ));
        assert_eq!(table.tags().collect::<Vec<_>>(), vec![2, 5]);
        assert_eq!(table.len(), 2);
        assert!(!table.is_empty());
    }
}
