//! Elementary entities of the geometry description.
//!
//! Entities only hold tags of the lower-dimensional entities they reference;
//! all lookups go through the owning [`Geometry`](crate::Geometry).

use glam::DVec3;
use serde::Serialize;

use crate::tag::Tag;

/// A point in 3D space with an optional target mesh size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Coordinates of the point.
    pub position: DVec3,
    /// Target element size near this point.
    pub mesh_size: Option<f64>,
}

/// A curve between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Curve {
    /// Straight segment from `start` to `end`.
    Line { start: Tag, end: Tag },
    /// Circle arc from `start` to `end` around `center`.
    ///
    /// The optional axis fixes the plane of the arc, which is needed when the
    /// endpoints are diametrically opposite.
    CircleArc {
        start: Tag,
        center: Tag,
        end: Tag,
        axis: Option<DVec3>,
    },
}

impl Curve {
    /// Returns the start point tag.
    pub fn start(&self) -> Tag {
        match *self {
            Curve::Line { start, .. } | Curve::CircleArc { start, .. } => start,
        }
    }

    /// Returns the end point tag.
    pub fn end(&self) -> Tag {
        match *self {
            Curve::Line { end, .. } | Curve::CircleArc { end, .. } => end,
        }
    }

    /// Returns `(first, last)` point tags when traversed in the given direction.
    pub fn oriented_endpoints(&self, forward: bool) -> (Tag, Tag) {
        if forward {
            (self.start(), self.end())
        } else {
            (self.end(), self.start())
        }
    }

    /// Returns every point tag the curve references.
    pub fn points(&self) -> Vec<Tag> {
        match *self {
            Curve::Line { start, end } => vec![start, end],
            Curve::CircleArc {
                start, center, end, ..
            } => vec![start, center, end],
        }
    }
}

/// An ordered, signed cycle of curves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurveLoop {
    /// Curve tags; a negative tag traverses the curve from end to start.
    pub curves: Vec<Tag>,
}

/// How a surface is spanned by its boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceKind {
    /// Planar surface bounded by planar loops.
    Plane,
    /// Surface interpolated through its boundary (transfinite filling).
    Filling,
}

/// A surface bounded by curve loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub kind: SurfaceKind,
    /// Curve loop tags; the first is the outer boundary, the rest are holes.
    pub loops: Vec<Tag>,
}

impl Surface {
    /// Returns the outer boundary loop tag.
    pub fn outer_loop(&self) -> Tag {
        self.loops[0]
    }

    /// Returns the hole loop tags.
    pub fn holes(&self) -> &[Tag] {
        &self.loops[1..]
    }
}

/// A closed shell of surfaces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceLoop {
    pub surfaces: Vec<Tag>,
}

/// A volume bounded by surface loops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Volume {
    /// Surface loop tags; the first is the outer shell, the rest are voids.
    pub shells: Vec<Tag>,
}
