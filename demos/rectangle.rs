//! Meshes a 0.1 x 0.3 rectangle with gmsh.
//!
//! Mirrors the first Gmsh tutorial: three points with explicit tags, one with
//! an automatic tag, four lines, a curve loop and a plane surface.
//!
//! Run with `-nopopup` to skip the viewer.

use geomesh::*;

fn main() -> Result<()> {
    env_logger::init();
    let args = RunArgs::from_env();

    let mut model = Model::new("t1", GmshEngine::default());
    let geo = model.geo();

    let lc = Some(1e-2);
    geo.add_point(0.0, 0.0, 0.0, lc, Some(1))?;
    geo.add_point(0.1, 0.0, 0.0, lc, Some(2))?;
    geo.add_point(0.1, 0.3, 0.0, lc, Some(3))?;
    let p4 = geo.add_point(0.0, 0.3, 0.0, lc, None)?;

    geo.add_line(1, 2, Some(1))?;
    geo.add_line(3, 2, Some(2))?;
    geo.add_line(3, p4, Some(3))?;
    geo.add_line(p4, 1, Some(p4))?;

    geo.add_curve_loop(&[4, 1, -2, 3], Some(1))?;
    geo.add_plane_surface(&[1], Some(1))?;

    model.synchronize()?;
    model.generate(Dim::Surface)?;
    model.write("t1.msh")?;

    model.finish(&args)
}
