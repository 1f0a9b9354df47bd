//! Error types for geomesh geometry operations.

use thiserror::Error;

use crate::tag::{EntityKind, Tag};

/// The main error type for geometry description operations.
///
/// Every variant is raised by the call that introduces the problem; a failed
/// call never leaves a partially applied entity behind.
#[derive(Error, Debug)]
pub enum GeometryError {
    /// An explicit tag is already used within its tag space.
    #[error("{kind} tag {tag} is already in use")]
    DuplicateTag { kind: EntityKind, tag: Tag },

    /// A referenced entity does not exist.
    #[error("{kind} {tag} does not exist")]
    UnknownReference { kind: EntityKind, tag: Tag },

    /// The curves of a curve loop do not chain into a closed cycle.
    #[error(
        "curve loop is not closed: curve {curve} ends at point {end} but curve {next} starts at point {start}"
    )]
    OpenLoop {
        curve: Tag,
        end: Tag,
        next: Tag,
        start: Tag,
    },

    /// A mutation was attempted after the geometry was synchronized.
    #[error("geometry is synchronized and frozen - cannot {operation}")]
    FrozenGeometry { operation: &'static str },

    /// An explicit tag is not strictly positive.
    #[error("invalid {kind} tag {tag}: tags must be strictly positive")]
    InvalidTag { kind: EntityKind, tag: Tag },

    /// No more tags can be allocated in a tag space.
    #[error("{0} tag space exhausted")]
    TagSpaceExhausted(EntityKind),

    /// An integer does not name a geometric dimension.
    #[error("invalid dimension {0}: expected 0, 1, 2 or 3")]
    InvalidDimension(i32),

    /// The same entity is referenced twice where each may appear once.
    #[error("{kind} {tag} is listed more than once")]
    DuplicateReference { kind: EntityKind, tag: Tag },

    /// An entity was declared without any references.
    #[error("{0} requires at least one reference")]
    EmptyReferenceList(EntityKind),

    /// A point carries a mesh size that is not finite and positive.
    #[error("invalid mesh size {0}: must be finite and positive")]
    InvalidMeshSize(f64),

    /// A point has a NaN or infinite coordinate.
    #[error("point coordinates must be finite")]
    NonFiniteCoordinates,

    /// A curve collapses onto fewer distinct points than it needs.
    #[error("degenerate curve: {0}")]
    DegenerateCurve(String),

    /// A circle arc is geometrically inconsistent.
    #[error("invalid circle arc: {0}")]
    InvalidArc(String),

    /// The boundary loops of a plane surface are not a valid planar region.
    #[error("invalid plane surface boundary: {0}")]
    InvalidBoundary(String),

    /// A surface loop does not form a closed shell.
    #[error("surface loop is not closed: curve {curve} bounds {uses} surface(s), expected 2")]
    OpenShell { curve: Tag, uses: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;
