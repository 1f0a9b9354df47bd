//! Engine driving the external `gmsh` executable.
//!
//! The staged geometry is written as a `.geo` script into a working
//! directory and meshed in batch mode:
//!
//! ```text
//! gmsh <work>/<model>.geo -<dim> -format <fmt> -o <file>
//! ```

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;

use geomesh_core::{Dim, Geometry, PhysicalGroups};
use serde::{Deserialize, Serialize};

use crate::engine::{MeshingEngine, Staged};
use crate::error::{EngineError, Result};
use crate::format::OutputFormat;

/// Options for the `gmsh` engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GmshOptions {
    /// Path or name of the gmsh executable.
    pub executable: PathBuf,

    /// Directory for generated scripts and meshes (system temp dir if unset).
    pub work_dir: Option<PathBuf>,

    /// Global factor applied to all mesh sizes.
    pub mesh_size_factor: f64,

    /// Save all elements even when physical groups are defined.
    pub save_all: bool,

    /// Number of threads (0 = gmsh default).
    pub threads: u32,
}

impl Default for GmshOptions {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("gmsh"),
            work_dir: None,
            mesh_size_factor: 1.0,
            save_all: false,
            threads: 0,
        }
    }
}

impl GmshOptions {
    /// Reads options from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Engine that meshes with the `gmsh` command-line program.
#[derive(Debug)]
pub struct GmshEngine {
    options: GmshOptions,
    work_dir: PathBuf,
    staged: Staged,
    /// Dimension and native mesh file of the last `generate`.
    mesh: Option<(Dim, PathBuf)>,
    last_output: Option<PathBuf>,
}

impl Default for GmshEngine {
    fn default() -> Self {
        Self::new(GmshOptions::default())
    }
}

impl GmshEngine {
    /// Creates an engine with the given options.
    pub fn new(options: GmshOptions) -> Self {
        let work_dir = options
            .work_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("geomesh"));
        Self {
            options,
            work_dir,
            staged: Staged::default(),
            mesh: None,
            last_output: None,
        }
    }

    /// Returns the engine options.
    pub fn options(&self) -> &GmshOptions {
        &self.options
    }

    /// Returns the path of the script for the staged model.
    pub fn script_path(&self) -> PathBuf {
        let stem: String = self
            .staged
            .model
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let stem = if stem.is_empty() { "model".to_string() } else { stem };
        self.work_dir.join(format!("{stem}.geo"))
    }

    /// Returns the native mesh produced by the last `generate`.
    pub fn mesh_path(&self) -> Option<&Path> {
        self.mesh.as_ref().map(|(_, path)| path.as_path())
    }

    fn write_script(&self, geometry: &Geometry) -> Result<PathBuf> {
        let mut script = self.staged.script(geometry);
        if (self.options.mesh_size_factor - 1.0).abs() > f64::EPSILON {
            script = script.with_setting("Mesh.MeshSizeFactor", self.options.mesh_size_factor);
        }
        if self.options.save_all {
            script = script.with_setting("Mesh.SaveAll", 1.0);
        }
        if self.options.threads > 0 {
            script = script.with_setting("General.NumThreads", f64::from(self.options.threads));
        }

        fs::create_dir_all(&self.work_dir)?;
        let path = self.script_path();
        fs::write(&path, script.to_string())?;
        log::debug!("wrote script {}", path.display());
        Ok(path)
    }

    fn run(&self, args: &[OsString]) -> Result<()> {
        let program = self.options.executable.display().to_string();
        log::debug!("running {program} {args:?}");

        let output = Command::new(&self.options.executable)
            .args(args)
            .output()
            .map_err(|source| EngineError::Launch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(EngineError::Process {
                program,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }

    /// File opened by `show`: the last written file gmsh can read, else the
    /// generated mesh, else a freshly written script.
    fn viewer_target(&self) -> Result<PathBuf> {
        match (&self.last_output, &self.mesh) {
            (Some(output), _) => Ok(output.clone()),
            (None, Some((_, mesh))) => Ok(mesh.clone()),
            (None, None) => {
                let geometry = Arc::clone(self.staged.geometry()?);
                self.write_script(&geometry)
            }
        }
    }

    fn mesh_args(script: &Path, dim: Dim, format: &str, output: &Path) -> Vec<OsString> {
        vec![
            script.into(),
            format!("-{}", dim.as_i32()).into(),
            "-format".into(),
            format.into(),
            "-o".into(),
            output.into(),
        ]
    }
}

impl MeshingEngine for GmshEngine {
    fn name(&self) -> &'static str {
        "gmsh"
    }

    fn synchronize(&mut self, model: &str, geometry: Arc<Geometry>) -> Result<()> {
        self.staged.synchronize(model, geometry);
        self.mesh = None;
        Ok(())
    }

    fn set_physical_groups(&mut self, groups: &PhysicalGroups) {
        self.staged.groups = groups.clone();
    }

    fn generate(&mut self, dim: Dim) -> Result<()> {
        self.staged.check_dimension(dim)?;
        let geometry = Arc::clone(self.staged.geometry()?);
        let script = self.write_script(&geometry)?;
        let mesh = script.with_extension("msh");

        self.run(&Self::mesh_args(&script, dim, "msh", &mesh))?;
        log::info!("generated {dim} mesh {}", mesh.display());
        self.mesh = Some((dim, mesh));
        Ok(())
    }

    fn write(&mut self, path: &Path) -> Result<()> {
        let format = OutputFormat::from_path(path);
        if self.staged.write_description(path, format)? {
            // gmsh cannot open the JSON dump.
            if format == OutputFormat::GeoUnrolled {
                self.last_output = Some(path.to_path_buf());
            }
            return Ok(());
        }

        let (dim, mesh) = self
            .mesh
            .clone()
            .ok_or_else(|| EngineError::NoMesh(path.display().to_string()))?;

        if format == OutputFormat::Msh {
            fs::copy(&mesh, path)?;
        } else {
            let geometry = Arc::clone(self.staged.geometry()?);
            let script = self.write_script(&geometry)?;
            let name = format.gmsh_name().unwrap_or("msh");
            self.run(&Self::mesh_args(&script, dim, name, path))?;
        }
        log::info!("wrote {} ({format})", path.display());
        self.last_output = Some(path.to_path_buf());
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        let target = self.viewer_target()?;
        log::info!("opening {} in gmsh", target.display());
        self.run(&[target.into_os_string()])
    }
}
