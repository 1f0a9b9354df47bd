//! The geometry description and its frozen snapshot.

use glam::DVec3;
use serde::Serialize;

use crate::entity::{Curve, CurveLoop, Point, Surface, SurfaceLoop, Volume};
use crate::registry::TagTable;
use crate::tag::{Dim, EntityKind, Tag};

/// A validated geometry description.
///
/// The builder owns a mutable working copy; [`GeometryBuilder::synchronize`]
/// hands out an `Arc<Geometry>` that is never mutated again.
///
/// [`GeometryBuilder::synchronize`]: crate::GeometryBuilder::synchronize
#[derive(Debug, Clone, Serialize)]
pub struct Geometry {
    pub(crate) points: TagTable<Point>,
    pub(crate) curves: TagTable<Curve>,
    pub(crate) curve_loops: TagTable<CurveLoop>,
    pub(crate) surfaces: TagTable<Surface>,
    pub(crate) surface_loops: TagTable<SurfaceLoop>,
    pub(crate) volumes: TagTable<Volume>,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            points: TagTable::new(EntityKind::Point),
            curves: TagTable::new(EntityKind::Curve),
            curve_loops: TagTable::new(EntityKind::CurveLoop),
            surfaces: TagTable::new(EntityKind::Surface),
            surface_loops: TagTable::new(EntityKind::SurfaceLoop),
            volumes: TagTable::new(EntityKind::Volume),
        }
    }
}

impl Geometry {
    /// Creates an empty description.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn points(&self) -> &TagTable<Point> {
        &self.points
    }

    pub fn curves(&self) -> &TagTable<Curve> {
        &self.curves
    }

    pub fn curve_loops(&self) -> &TagTable<CurveLoop> {
        &self.curve_loops
    }

    pub fn surfaces(&self) -> &TagTable<Surface> {
        &self.surfaces
    }

    pub fn surface_loops(&self) -> &TagTable<SurfaceLoop> {
        &self.surface_loops
    }

    pub fn volumes(&self) -> &TagTable<Volume> {
        &self.volumes
    }

    /// Gets a point by tag.
    pub fn point(&self, tag: Tag) -> Option<&Point> {
        self.points.get(tag)
    }

    /// Gets a curve by tag.
    pub fn curve(&self, tag: Tag) -> Option<&Curve> {
        self.curves.get(tag)
    }

    /// Gets a curve loop by tag.
    pub fn curve_loop(&self, tag: Tag) -> Option<&CurveLoop> {
        self.curve_loops.get(tag)
    }

    /// Gets a surface by tag.
    pub fn surface(&self, tag: Tag) -> Option<&Surface> {
        self.surfaces.get(tag)
    }

    /// Gets a surface loop by tag.
    pub fn surface_loop(&self, tag: Tag) -> Option<&SurfaceLoop> {
        self.surface_loops.get(tag)
    }

    /// Gets a volume by tag.
    pub fn volume(&self, tag: Tag) -> Option<&Volume> {
        self.volumes.get(tag)
    }

    /// Checks if an elementary entity of the given dimension exists.
    pub fn contains(&self, dim: Dim, tag: Tag) -> bool {
        match dim {
            Dim::Point => self.points.contains(tag),
            Dim::Curve => self.curves.contains(tag),
            Dim::Surface => self.surfaces.contains(tag),
            Dim::Volume => self.volumes.contains(tag),
        }
    }

    /// Returns the tags of all elementary entities of a dimension.
    pub fn entity_tags(&self, dim: Dim) -> Vec<Tag> {
        match dim {
            Dim::Point => self.points.tags().collect(),
            Dim::Curve => self.curves.tags().collect(),
            Dim::Surface => self.surfaces.tags().collect(),
            Dim::Volume => self.volumes.tags().collect(),
        }
    }

    /// Returns the number of elementary entities of a dimension.
    pub fn count(&self, dim: Dim) -> usize {
        match dim {
            Dim::Point => self.points.len(),
            Dim::Curve => self.curves.len(),
            Dim::Surface => self.surfaces.len(),
            Dim::Volume => self.volumes.len(),
        }
    }

    /// Returns the highest dimension holding at least one entity.
    pub fn max_dim(&self) -> Option<Dim> {
        Dim::ALL.into_iter().rev().find(|&dim| self.count(dim) > 0)
    }

    /// Returns true if nothing has been declared.
    pub fn is_empty(&self) -> bool {
        self.max_dim().is_none()
    }

    /// Returns the axis-aligned bounding box of all points.
    pub fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let mut points = self.points.iter().map(|(_, p)| p.position);
        let first = points.next()?;
        Some(points.fold((first, first), |(min, max), p| (min.min(p), max.max(p))))
    }
}
