//! geomesh: declarative geometry descriptions for Gmsh-style meshing engines.
//!
//! A program declares points, curves, loops, surfaces and volumes by integer
//! tag, synchronizes the description into a frozen snapshot and hands it to a
//! meshing engine, which generates a mesh and writes it to a file.
//!
//! # Quick Start
//!
//! ```no_run
//! use geomesh::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut model = Model::new("t1", GmshEngine::default());
//!     let geo = model.geo();
//!     let lc = Some(1e-2);
//!     geo.add_point(0.0, 0.0, 0.0, lc, Some(1))?;
//!     geo.add_point(0.1, 0.0, 0.0, lc, Some(2))?;
//!     geo.add_point(0.1, 0.3, 0.0, lc, Some(3))?;
//!     let p4 = geo.add_point(0.0, 0.3, 0.0, lc, None)?;
//!     geo.add_line(1, 2, Some(1))?;
//!     geo.add_line(3, 2, Some(2))?;
//!     geo.add_line(3, p4, Some(3))?;
//!     geo.add_line(p4, 1, Some(p4))?;
//!     geo.add_curve_loop(&[4, 1, -2, 3], Some(1))?;
//!     geo.add_plane_surface(&[1], Some(1))?;
//!
//!     model.synchronize()?;
//!     model.generate(Dim::Surface)?;
//!     model.write("t1.msh")?;
//!     model.finish(&RunArgs::from_env())
//! }
//! ```
//!
//! # Crates
//!
//! - `geomesh-core`: [`GeometryBuilder`], [`Geometry`] snapshots, [`PhysicalGroups`]
//! - `geomesh-engine`: the [`MeshingEngine`] seam with [`ScriptEngine`] and [`GmshEngine`]
//! - this crate: the [`Model`] session, [`shapes`] and the [`fem`] problem description

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod cli;
pub mod error;
pub mod fem;
pub mod model;
pub mod shapes;

pub use cli::RunArgs;
pub use error::{Error, Result};
pub use model::Model;

pub use geomesh_core::{
    Curve, CurveLoop, DVec3, Dim, EntityKind, Geometry, GeometryBuilder, GeometryError, Options,
    PhysicalGroup, PhysicalGroups, Point, ResyncPolicy, Surface, SurfaceKind, SurfaceLoop, Tag,
    Volume,
};
pub use geomesh_engine::{
    EngineError, GmshEngine, GmshOptions, MeshingEngine, OutputFormat, ScriptEngine,
};

/// Installs the `env_logger` backend, configured by `RUST_LOG`.
///
/// Does nothing if a logger is already installed.
pub fn init_logging() {
    if env_logger::try_init().is_ok() {
        log::debug!("geomesh logging initialized");
    }
}
