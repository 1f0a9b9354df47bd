//! Tags, dimensions and entity kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};

/// Identifier of an entity within its tag space.
///
/// Tags are strictly positive. Curve loops carry signed curve tags where the
/// sign encodes the traversal direction, which is why the type is signed.
pub type Tag = i32;

/// Topological dimension of an elementary entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Dim {
    /// Points (0D).
    Point = 0,
    /// Curves (1D).
    Curve = 1,
    /// Surfaces (2D).
    Surface = 2,
    /// Volumes (3D).
    Volume = 3,
}

impl Dim {
    /// All dimensions in ascending order.
    pub const ALL: [Dim; 4] = [Dim::Point, Dim::Curve, Dim::Surface, Dim::Volume];

    /// Returns the dimension as an integer (0 to 3).
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns the elementary entity kind living in this dimension.
    pub fn kind(self) -> EntityKind {
        match self {
            Dim::Point => EntityKind::Point,
            Dim::Curve => EntityKind::Curve,
            Dim::Surface => EntityKind::Surface,
            Dim::Volume => EntityKind::Volume,
        }
    }
}

impl TryFrom<i32> for Dim {
    type Error = GeometryError;

    fn try_from(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Dim::Point),
            1 => Ok(Dim::Curve),
            2 => Ok(Dim::Surface),
            3 => Ok(Dim::Volume),
            _ => Err(GeometryError::InvalidDimension(value)),
        }
    }
}

impl fmt::Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.as_i32())
    }
}

/// Each kind owns an independent tag space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    Point,
    Curve,
    CurveLoop,
    Surface,
    SurfaceLoop,
    Volume,
    PhysicalGroup,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Point => "point",
            EntityKind::Curve => "curve",
            EntityKind::CurveLoop => "curve loop",
            EntityKind::Surface => "surface",
            EntityKind::SurfaceLoop => "surface loop",
            EntityKind::Volume => "volume",
            EntityKind::PhysicalGroup => "physical group",
        };
        f.write_str(name)
    }
}
