//! Error type for the geomesh facade.

use geomesh_core::GeometryError;
use geomesh_engine::EngineError;
use thiserror::Error;

/// The error type for [`Model`](crate::Model) operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid geometry declaration.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Meshing engine failure.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Physical groups can only be defined on a synchronized model.
    #[error("model '{0}' is not synchronized - call synchronize() first")]
    NotSynchronized(String),
}

/// A specialized Result type for geomesh operations.
pub type Result<T> = std::result::Result<T, Error>;
