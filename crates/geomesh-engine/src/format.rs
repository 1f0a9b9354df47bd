//! Output formats inferred from file extensions.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// File format written by [`MeshingEngine::write`](crate::MeshingEngine::write).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Native mesh format, latest version.
    #[default]
    Msh,
    /// Native mesh format, version 2.2.
    Msh2,
    /// Native mesh format, version 4.1.
    Msh4,
    /// Legacy VTK.
    Vtk,
    /// I-deas universal file.
    Unv,
    /// Stereolithography (surface triangles).
    Stl,
    /// Geometry script with every entity written out.
    GeoUnrolled,
    /// JSON dump of the geometry description.
    Json,
}

impl OutputFormat {
    /// Infers the format from the file extension.
    ///
    /// Unknown or missing extensions fall back to the native mesh format.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("msh2") => OutputFormat::Msh2,
            Some("msh4") => OutputFormat::Msh4,
            Some("vtk") => OutputFormat::Vtk,
            Some("unv") => OutputFormat::Unv,
            Some("stl") => OutputFormat::Stl,
            Some("geo_unrolled" | "geo") => OutputFormat::GeoUnrolled,
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Msh,
        }
    }

    /// Returns the canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Msh => "msh",
            OutputFormat::Msh2 => "msh2",
            OutputFormat::Msh4 => "msh4",
            OutputFormat::Vtk => "vtk",
            OutputFormat::Unv => "unv",
            OutputFormat::Stl => "stl",
            OutputFormat::GeoUnrolled => "geo_unrolled",
            OutputFormat::Json => "json",
        }
    }

    /// Returns the name passed to `gmsh -format`, or `None` for geometry formats.
    pub fn gmsh_name(self) -> Option<&'static str> {
        match self {
            OutputFormat::Msh => Some("msh"),
            OutputFormat::Msh2 => Some("msh22"),
            OutputFormat::Msh4 => Some("msh41"),
            OutputFormat::Vtk => Some("vtk"),
            OutputFormat::Unv => Some("unv"),
            OutputFormat::Stl => Some("stl"),
            OutputFormat::GeoUnrolled | OutputFormat::Json => None,
        }
    }

    /// Returns true if writing this format requires a generated mesh.
    pub fn is_mesh(self) -> bool {
        self.gmsh_name().is_some()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ".{}", self.extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(OutputFormat::from_path(Path::new("t1.msh")), OutputFormat::Msh);
        assert_eq!(OutputFormat::from_path(Path::new("t1.UNV")), OutputFormat::Unv);
        assert_eq!(OutputFormat::from_path(Path::new("t1.msh2")), OutputFormat::Msh2);
        assert_eq!(
            OutputFormat::from_path(Path::new("out/torus.geo_unrolled")),
            OutputFormat::GeoUnrolled
        );
        assert_eq!(OutputFormat::from_path(Path::new("model.json")), OutputFormat::Json);
    }

    #[test]
    fn test_fallback_to_native() {
        assert_eq!(OutputFormat::from_path(Path::new("mesh")), OutputFormat::Msh);
        assert_eq!(OutputFormat::from_path(Path::new("mesh.xyz")), OutputFormat::Msh);
    }

    #[test]
    fn test_mesh_formats() {
        assert!(OutputFormat::Vtk.is_mesh());
        assert!(!OutputFormat::Json.is_mesh());
        assert_eq!(OutputFormat::Msh4.gmsh_name(), Some("msh41"));
        assert_eq!(OutputFormat::Stl.to_string(), ".stl");
    }
}
