//! A pure Rust engine that exports geometry descriptions only.

use std::path::Path;
use std::sync::Arc;

use geomesh_core::{Dim, Geometry, PhysicalGroups};

use crate::engine::{MeshingEngine, Staged};
use crate::error::{EngineError, Result};
use crate::format::OutputFormat;

/// Engine that stages geometry and writes `.geo_unrolled` or `.json` files.
///
/// Mesh requests are validated and recorded, which makes this engine useful
/// for exporting scripts to be meshed elsewhere and for testing programs
/// without the external mesher installed.
#[derive(Debug, Default)]
pub struct ScriptEngine {
    staged: Staged,
    generated: Vec<Dim>,
}

impl ScriptEngine {
    /// Creates an engine with no geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the snapshot handed over by the last synchronization.
    pub fn geometry(&self) -> Option<&Arc<Geometry>> {
        self.staged.geometry.as_ref()
    }

    /// Returns the mesh dimensions requested since the last synchronization.
    pub fn generated(&self) -> &[Dim] {
        &self.generated
    }

    /// Renders the staged model as a `.geo` script.
    pub fn script(&self) -> Result<String> {
        let geometry = self.staged.geometry()?;
        Ok(self.staged.script(geometry).to_string())
    }
}

impl MeshingEngine for ScriptEngine {
    fn name(&self) -> &'static str {
        "script"
    }

    fn synchronize(&mut self, model: &str, geometry: Arc<Geometry>) -> Result<()> {
        self.staged.synchronize(model, geometry);
        self.generated.clear();
        Ok(())
    }

    fn set_physical_groups(&mut self, groups: &PhysicalGroups) {
        self.staged.groups = groups.clone();
    }

    fn generate(&mut self, dim: Dim) -> Result<()> {
        self.staged.check_dimension(dim)?;
        self.generated.push(dim);
        log::info!("recorded {dim} mesh request for model '{}'", self.staged.model);
        Ok(())
    }

    fn write(&mut self, path: &Path) -> Result<()> {
        let format = OutputFormat::from_path(path);
        if self.staged.write_description(path, format)? {
            Ok(())
        } else {
            Err(EngineError::UnsupportedFormat {
                engine: self.name(),
                format,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomesh_core::GeometryBuilder;

    fn triangle() -> Arc<Geometry> {
        let mut geo = GeometryBuilder::new();
        geo.add_point(0.0, 0.0, 0.0, None, None).unwrap();
        geo.add_point(1.0, 0.0, 0.0, None, None).unwrap();
        geo.add_point(0.0, 1.0, 0.0, None, None).unwrap();
        geo.add_line(1, 2, None).unwrap();
        geo.add_line(2, 3, None).unwrap();
        geo.add_line(3, 1, None).unwrap();
        geo.add_curve_loop(&[1, 2, 3], None).unwrap();
        geo.add_plane_surface(&[1], None).unwrap();
        geo.synchronize()
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("geomesh-script-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_requires_synchronize() {
        let mut engine = ScriptEngine::new();
        assert!(matches!(
            engine.generate(Dim::Surface),
            Err(EngineError::NotSynchronized)
        ));
        assert!(matches!(
            engine.write(&temp_path("early.json")),
            Err(EngineError::NotSynchronized)
        ));
    }

    #[test]
    fn test_generate_records_dimensions() {
        let mut engine = ScriptEngine::new();
        engine.synchronize("triangle", triangle()).unwrap();
        engine.generate(Dim::Curve).unwrap();
        engine.generate(Dim::Surface).unwrap();
        assert_eq!(engine.generated(), &[Dim::Curve, Dim::Surface]);
        assert!(matches!(
            engine.generate(Dim::Point),
            Err(EngineError::InvalidDimension(Dim::Point))
        ));

        engine.synchronize("triangle", triangle()).unwrap();
        assert!(engine.generated().is_empty());
    }

    #[test]
    fn test_write_geometry_formats() {
        let mut engine = ScriptEngine::new();
        engine.synchronize("triangle", triangle()).unwrap();

        let script_path = temp_path("triangle.geo_unrolled");
        engine.write(&script_path).unwrap();
        let written = std::fs::read_to_string(&script_path).unwrap();
        assert_eq!(written, engine.script().unwrap());
        assert!(written.contains("Plane Surface(1) = {1};"));
        std::fs::remove_file(&script_path).ok();

        let json_path = temp_path("triangle.json");
        engine.write(&json_path).unwrap();
        assert!(std::fs::read_to_string(&json_path)
            .unwrap()
            .contains("\"model\": \"triangle\""));
        std::fs::remove_file(&json_path).ok();
    }

    #[test]
    fn test_mesh_formats_unsupported() {
        let mut engine = ScriptEngine::new();
        engine.synchronize("triangle", triangle()).unwrap();
        engine.generate(Dim::Surface).unwrap();
        assert!(matches!(
            engine.write(&temp_path("triangle.msh")),
            Err(EngineError::UnsupportedFormat {
                engine: "script",
                format: OutputFormat::Msh
            })
        ));
    }
}
