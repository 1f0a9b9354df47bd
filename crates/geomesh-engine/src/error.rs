//! Error types for meshing engines.

use std::process::ExitStatus;

use geomesh_core::{Dim, GeometryError};
use thiserror::Error;

use crate::format::OutputFormat;

/// The error type for meshing engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// No geometry has been handed to the engine yet.
    #[error("no geometry synchronized - call synchronize() first")]
    NotSynchronized,

    /// Meshes can only be generated for curves, surfaces and volumes.
    #[error("cannot generate a {0} mesh - expected 1D, 2D or 3D")]
    InvalidDimension(Dim),

    /// A mesh format was requested before any mesh was generated.
    #[error("no mesh generated - call generate() before writing '{0}'")]
    NoMesh(String),

    /// The engine cannot produce the requested file format.
    #[error("the {engine} engine cannot write {format} files")]
    UnsupportedFormat {
        engine: &'static str,
        format: OutputFormat,
    },

    /// The external program could not be started.
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The external program reported a failure.
    #[error("'{program}' exited with {status}: {stderr}")]
    Process {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// Geometry error.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A specialized Result type for meshing engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
