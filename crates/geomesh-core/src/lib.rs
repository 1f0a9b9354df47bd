//! Core abstractions for geomesh.
//!
//! This crate provides the declarative geometry description that is handed to a
//! meshing engine:
//! - [`GeometryBuilder`] accumulates points, curves, loops, surfaces and volumes
//! - [`Geometry`] is the frozen snapshot produced by synchronization
//! - [`PhysicalGroups`] tag sets of entities on a synchronized model
//! - Configuration [`Options`] and the [`GeometryError`] taxonomy

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Tags are Gmsh-style signed integers; counts are converted freely
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod builder;
pub mod entity;
pub mod error;
pub mod geometry;
pub mod options;
pub mod physical;
pub mod registry;
pub mod tag;
pub mod validate;

pub use builder::GeometryBuilder;
pub use entity::{Curve, CurveLoop, Point, Surface, SurfaceKind, SurfaceLoop, Volume};
pub use error::{GeometryError, Result};
pub use geometry::Geometry;
pub use options::{Options, ResyncPolicy};
pub use physical::{PhysicalGroup, PhysicalGroups};
pub use registry::TagTable;
pub use tag::{Dim, EntityKind, Tag};

// Re-export glam types for convenience
pub use glam::DVec3;
