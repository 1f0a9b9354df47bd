//! The meshing engine seam.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use geomesh_core::{Dim, Geometry, PhysicalGroups};

use crate::error::{EngineError, Result};
use crate::format::OutputFormat;
use crate::script::{self, GeoScript};

/// An external meshing engine consuming frozen geometry snapshots.
///
/// The calling program synchronizes once, then asks for a mesh of a given
/// dimension and writes it to a file whose extension selects the format.
pub trait MeshingEngine {
    /// Returns a short name for log and error messages.
    fn name(&self) -> &'static str;

    /// Hands a frozen snapshot to the engine, discarding any previous mesh.
    fn synchronize(&mut self, model: &str, geometry: Arc<Geometry>) -> Result<()>;

    /// Replaces the physical groups used when exporting.
    fn set_physical_groups(&mut self, groups: &PhysicalGroups);

    /// Generates a mesh up to the given dimension.
    fn generate(&mut self, dim: Dim) -> Result<()>;

    /// Writes the mesh (or geometry) to `path`, inferring the format from
    /// its extension.
    fn write(&mut self, path: &Path) -> Result<()>;

    /// Opens an interactive viewer, if the engine has one.
    ///
    /// Blocks until the viewer is closed.
    fn show(&mut self) -> Result<()> {
        log::info!("the {} engine has no viewer", self.name());
        Ok(())
    }
}

impl<E: MeshingEngine + ?Sized> MeshingEngine for Box<E> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn synchronize(&mut self, model: &str, geometry: Arc<Geometry>) -> Result<()> {
        (**self).synchronize(model, geometry)
    }

    fn set_physical_groups(&mut self, groups: &PhysicalGroups) {
        (**self).set_physical_groups(groups);
    }

    fn generate(&mut self, dim: Dim) -> Result<()> {
        (**self).generate(dim)
    }

    fn write(&mut self, path: &Path) -> Result<()> {
        (**self).write(path)
    }

    fn show(&mut self) -> Result<()> {
        (**self).show()
    }
}

/// Model state shared by the engines: the snapshot they were handed and the
/// physical groups to export.
#[derive(Debug, Default)]
pub(crate) struct Staged {
    pub(crate) model: String,
    pub(crate) geometry: Option<Arc<Geometry>>,
    pub(crate) groups: PhysicalGroups,
}

impl Staged {
    pub(crate) fn synchronize(&mut self, model: &str, geometry: Arc<Geometry>) {
        model.clone_into(&mut self.model);
        self.geometry = Some(geometry);
    }

    pub(crate) fn geometry(&self) -> Result<&Arc<Geometry>> {
        self.geometry.as_ref().ok_or(EngineError::NotSynchronized)
    }

    /// Checks that `dim` can be meshed and warns when the model has nothing
    /// of that dimension.
    pub(crate) fn check_dimension(&self, dim: Dim) -> Result<()> {
        let geometry = self.geometry()?;
        if dim == Dim::Point {
            return Err(EngineError::InvalidDimension(dim));
        }
        if geometry.max_dim().map_or(true, |max| max < dim) {
            log::warn!(
                "model '{}' has no {} entities; the {} mesh only covers lower dimensions",
                self.model,
                dim,
                dim
            );
        }
        Ok(())
    }

    pub(crate) fn script<'a>(&'a self, geometry: &'a Geometry) -> GeoScript<'a> {
        GeoScript::new(&self.model, geometry).with_groups(&self.groups)
    }

    /// Writes geometry-only formats. Returns `false` for mesh formats.
    pub(crate) fn write_description(&self, path: &Path, format: OutputFormat) -> Result<bool> {
        let geometry = self.geometry()?;
        let contents = match format {
            OutputFormat::GeoUnrolled => self.script(geometry).to_string(),
            OutputFormat::Json => script::to_json(&self.model, geometry, &self.groups)?,
            _ => return Ok(false),
        };
        fs::write(path, contents)?;
        log::info!("wrote {} ({format})", path.display());
        Ok(true)
    }
}
