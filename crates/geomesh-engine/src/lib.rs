//! Meshing engine backends for geomesh.
//!
//! A [`MeshingEngine`] consumes the frozen [`Geometry`](geomesh_core::Geometry)
//! snapshot produced by synchronization, generates a mesh of a requested
//! dimension and writes it to a file whose extension selects the format.
//!
//! - [`ScriptEngine`] exports `.geo_unrolled` scripts and JSON, pure Rust
//! - [`GmshEngine`] drives the external `gmsh` executable

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod engine;
pub mod error;
pub mod format;
pub mod gmsh;
pub mod script;
pub mod script_engine;

pub use engine::MeshingEngine;
pub use error::{EngineError, Result};
pub use format::OutputFormat;
pub use gmsh::{GmshEngine, GmshOptions};
pub use script::{to_json, GeoScript};
pub use script_engine::ScriptEngine;
