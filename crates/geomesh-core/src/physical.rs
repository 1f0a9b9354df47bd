//! Physical groups of elementary entities.
//!
//! A physical group collects entities of one dimension under its own tag and
//! an optional name. When groups exist, mesh exports keep only the elements
//! that belong to at least one group.

use serde::Serialize;

use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::registry::TagTable;
use crate::tag::{Dim, EntityKind, Tag};

/// A tagged, optionally named set of entities of one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhysicalGroup {
    pub dim: Dim,
    pub entities: Vec<Tag>,
    pub name: Option<String>,
}

/// Physical groups of a synchronized model, one tag space per dimension.
#[derive(Debug, Clone, Serialize)]
pub struct PhysicalGroups {
    tables: [TagTable<PhysicalGroup>; 4],
}

impl Default for PhysicalGroups {
    fn default() -> Self {
        Self {
            tables: std::array::from_fn(|_| TagTable::new(EntityKind::PhysicalGroup)),
        }
    }
}

impl PhysicalGroups {
    /// Creates an empty set of groups.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a group of `dim`-dimensional entities of `geometry`.
    pub fn add(
        &mut self,
        geometry: &Geometry,
        dim: Dim,
        entities: &[Tag],
        tag: Option<Tag>,
    ) -> Result<Tag> {
        if entities.is_empty() {
            return Err(GeometryError::EmptyReferenceList(EntityKind::PhysicalGroup));
        }
        if let Some(&missing) = entities.iter().find(|&&t| !geometry.contains(dim, t)) {
            return Err(GeometryError::UnknownReference {
                kind: dim.kind(),
                tag: missing,
            });
        }

        let table = &mut self.tables[dim as usize];
        let tag = table.resolve(tag)?;
        table.insert(
            tag,
            PhysicalGroup {
                dim,
                entities: entities.to_vec(),
                name: None,
            },
        );
        log::debug!("added {dim} physical group {tag}: {entities:?}");
        Ok(tag)
    }

    /// Names an existing group.
    pub fn set_name(&mut self, dim: Dim, tag: Tag, name: impl Into<String>) -> Result<()> {
        let group = self.tables[dim as usize]
            .get_mut(tag)
            .ok_or(GeometryError::UnknownReference {
                kind: EntityKind::PhysicalGroup,
                tag,
            })?;
        group.name = Some(name.into());
        Ok(())
    }

    /// Gets a group by dimension and tag.
    pub fn get(&self, dim: Dim, tag: Tag) -> Option<&PhysicalGroup> {
        self.tables[dim as usize].get(tag)
    }

    /// Returns an iterator over `(tag, group)` ordered by dimension, then tag.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &PhysicalGroup)> {
        self.tables.iter().flat_map(TagTable::iter)
    }

    /// Returns the total number of groups.
    pub fn len(&self) -> usize {
        self.tables.iter().map(TagTable::len).sum()
    }

    /// Returns true if no group has been defined.
    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(TagTable::is_empty)
    }
}
