//! The modeling session.

use std::path::Path;
use std::sync::Arc;

use geomesh_core::{Dim, Geometry, GeometryBuilder, Options, PhysicalGroups, Tag};
use geomesh_engine::MeshingEngine;

use crate::cli::RunArgs;
use crate::error::{Error, Result};

/// A named model: a geometry builder, its physical groups and the meshing
/// engine the synchronized geometry is handed to.
///
/// # Example
///
/// ```
/// use geomesh::{Dim, Model, ScriptEngine};
///
/// # fn main() -> geomesh::Result<()> {
/// let mut model = Model::new("segment", ScriptEngine::new());
/// let geo = model.geo();
/// let a = geo.add_point(0.0, 0.0, 0.0, Some(0.1), None)?;
/// let b = geo.add_point(1.0, 0.0, 0.0, Some(0.1), None)?;
/// let line = geo.add_line(a, b, None)?;
///
/// model.synchronize()?;
/// model.add_physical_group(Dim::Curve, &[line], None)?;
/// model.generate(Dim::Curve)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Model<E: MeshingEngine> {
    name: String,
    builder: GeometryBuilder,
    groups: PhysicalGroups,
    engine: E,
}

impl<E: MeshingEngine> Model<E> {
    /// Creates an empty model with default options.
    pub fn new(name: impl Into<String>, engine: E) -> Self {
        Self::with_options(name, engine, Options::default())
    }

    /// Creates an empty model with the given builder options.
    pub fn with_options(name: impl Into<String>, engine: E, options: Options) -> Self {
        let name = name.into();
        log::info!("created model '{name}' ({} engine)", engine.name());
        Self {
            name,
            builder: GeometryBuilder::with_options(options),
            groups: PhysicalGroups::new(),
            engine,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the builder for geometry declarations.
    pub fn geo(&mut self) -> &mut GeometryBuilder {
        &mut self.builder
    }

    /// Returns the snapshot handed to the engine, if any.
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.builder.snapshot()
    }

    pub fn physical_groups(&self) -> &PhysicalGroups {
        &self.groups
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Freezes the geometry and hands the snapshot to the engine.
    pub fn synchronize(&mut self) -> Result<Arc<Geometry>> {
        let geometry = self.builder.synchronize();
        self.engine.synchronize(&self.name, Arc::clone(&geometry))?;
        self.engine.set_physical_groups(&self.groups);
        Ok(geometry)
    }

    fn synchronized(&self) -> Result<&Arc<Geometry>> {
        match self.builder.snapshot() {
            Some(geometry) if self.builder.is_synchronized() => Ok(geometry),
            _ => Err(Error::NotSynchronized(self.name.clone())),
        }
    }

    /// Groups entities of the synchronized model and returns the group tag.
    pub fn add_physical_group(
        &mut self,
        dim: Dim,
        entities: &[Tag],
        tag: Option<Tag>,
    ) -> Result<Tag> {
        let geometry = Arc::clone(self.synchronized()?);
        let tag = self.groups.add(&geometry, dim, entities, tag)?;
        self.engine.set_physical_groups(&self.groups);
        Ok(tag)
    }

    /// Names a physical group.
    pub fn set_physical_name(&mut self, dim: Dim, tag: Tag, name: &str) -> Result<()> {
        self.groups.set_name(dim, tag, name)?;
        self.engine.set_physical_groups(&self.groups);
        Ok(())
    }

    /// Generates a mesh of the synchronized geometry up to `dim`.
    pub fn generate(&mut self, dim: Dim) -> Result<()> {
        if self.builder.snapshot().is_some() && !self.builder.is_synchronized() {
            log::warn!(
                "model '{}' changed since the last synchronize(); meshing the previous snapshot",
                self.name
            );
        }
        self.engine.generate(dim)?;
        Ok(())
    }

    /// Writes the mesh or geometry to `path`, inferring the format from its
    /// extension.
    pub fn write(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.engine.write(path.as_ref())?;
        Ok(())
    }

    /// Opens the engine's interactive viewer.
    pub fn show(&mut self) -> Result<()> {
        self.engine.show()?;
        Ok(())
    }

    /// Shows the result unless the command line asked for no popup.
    pub fn finish(&mut self, args: &RunArgs) -> Result<()> {
        if args.popup {
            self.show()
        } else {
            log::debug!("viewer suppressed by -nopopup");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomesh_core::{GeometryError, ResyncPolicy};
    use geomesh_engine::{EngineError, ScriptEngine};

    fn segment(model: &mut Model<ScriptEngine>) -> Tag {
        let geo = model.geo();
        geo.add_point(0.0, 0.0, 0.0, None, Some(1)).unwrap();
        geo.add_point(1.0, 0.0, 0.0, None, Some(2)).unwrap();
        geo.add_line(1, 2, None).unwrap()
    }

    #[test]
    fn test_synchronize_hands_snapshot_to_engine() {
        let mut model = Model::new("segment", ScriptEngine::new());
        segment(&mut model);
        let geometry = model.synchronize().unwrap();

        assert!(Arc::ptr_eq(model.engine().geometry().unwrap(), &geometry));
        assert!(Arc::ptr_eq(model.geometry().unwrap(), &geometry));
        assert_eq!(model.name(), "segment");
    }

    #[test]
    fn test_groups_require_synchronize() {
        let mut model = Model::new("segment", ScriptEngine::new());
        let line = segment(&mut model);
        assert!(matches!(
            model.add_physical_group(Dim::Curve, &[line], None),
            Err(Error::NotSynchronized(_))
        ));

        model.synchronize().unwrap();
        let group = model.add_physical_group(Dim::Curve, &[line], None).unwrap();
        model.set_physical_name(Dim::Curve, group, "edge").unwrap();
        assert_eq!(
            model.physical_groups().get(Dim::Curve, group).unwrap().name.as_deref(),
            Some("edge")
        );
        assert!(model
            .engine()
            .script()
            .unwrap()
            .contains("Physical Curve(\"edge\", 1) = {1};"));
    }

    #[test]
    fn test_unknown_group_entity() {
        let mut model = Model::new("segment", ScriptEngine::new());
        segment(&mut model);
        model.synchronize().unwrap();
        assert!(matches!(
            model.add_physical_group(Dim::Curve, &[7], None),
            Err(Error::Geometry(GeometryError::UnknownReference { tag: 7, .. }))
        ));
    }

    #[test]
    fn test_frozen_after_synchronize() {
        let mut model = Model::new("segment", ScriptEngine::new());
        segment(&mut model);
        model.synchronize().unwrap();
        assert!(matches!(
            model.geo().add_point(2.0, 0.0, 0.0, None, None),
            Err(GeometryError::FrozenGeometry { .. })
        ));
    }

    #[test]
    fn test_warn_policy_needs_resync_for_groups() {
        let options = Options {
            resync_policy: ResyncPolicy::Warn,
            ..Options::default()
        };
        let mut model = Model::with_options("segment", ScriptEngine::new(), options);
        segment(&mut model);
        let first = model.synchronize().unwrap();

        model.geo().add_point(2.0, 0.0, 0.0, None, Some(3)).unwrap();
        let line = model.geo().add_line(2, 3, None).unwrap();
        assert!(matches!(
            model.add_physical_group(Dim::Curve, &[line], None),
            Err(Error::NotSynchronized(_))
        ));

        let second = model.synchronize().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));
        assert!(model.add_physical_group(Dim::Curve, &[line], None).is_ok());
    }

    #[test]
    fn test_engine_errors_propagate() {
        let mut model = Model::new("segment", ScriptEngine::new());
        assert!(matches!(
            model.generate(Dim::Curve),
            Err(Error::Engine(EngineError::NotSynchronized))
        ));
        segment(&mut model);
        model.synchronize().unwrap();
        assert!(matches!(
            model.write("segment.vtk"),
            Err(Error::Engine(EngineError::UnsupportedFormat { .. }))
        ));
    }

    #[test]
    fn test_finish_without_popup() {
        let mut model = Model::new("segment", ScriptEngine::new());
        segment(&mut model);
        model.synchronize().unwrap();
        model.finish(&RunArgs { popup: false }).unwrap();
        model.finish(&RunArgs::default()).unwrap();
    }
}
