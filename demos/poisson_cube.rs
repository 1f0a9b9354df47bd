//! Prepares the unit cube Poisson problem.
//!
//! Meshes the unit cube with 32 divisions per edge, tags the Dirichlet faces
//! and the domain as physical groups and writes the mesh together with the
//! boundary values at the cube corners.
//!
//! Run with `-nopopup` to skip the viewer.

use geomesh::fem::PoissonProblem;
use geomesh::*;

const DIVISIONS: u32 = 32;

/// Positions of the points bounding a surface.
fn corners(geometry: &Geometry, surface: Tag) -> Vec<DVec3> {
    let Some(surface) = geometry.surface(surface) else {
        return Vec::new();
    };
    surface
        .loops
        .iter()
        .filter_map(|&l| geometry.curve_loop(l))
        .flat_map(|curve_loop| curve_loop.curves.iter())
        .filter_map(|&c| geometry.curve(c.abs()))
        .flat_map(Curve::points)
        .filter_map(|p| geometry.point(p).map(|point| point.position))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = RunArgs::from_env();

    let mut model = Model::new("poisson", GmshEngine::default());
    let size = 1.0 / f64::from(DIVISIONS);
    let volume = shapes::add_box(model.geo(), DVec3::ZERO, DVec3::ONE, Some(size))?;

    let geometry = model.synchronize()?;
    let problem = PoissonProblem::unit_cube();

    let faces: Vec<Tag> = geometry
        .entity_tags(Dim::Surface)
        .into_iter()
        .filter(|&face| {
            corners(&geometry, face)
                .iter()
                .all(|&x| problem.dirichlet_boundary.inside(x, true))
        })
        .collect();

    let dirichlet = model.add_physical_group(Dim::Surface, &faces, None)?;
    model.set_physical_name(Dim::Surface, dirichlet, "dirichlet")?;
    let domain = model.add_physical_group(Dim::Volume, &[volume], None)?;
    model.set_physical_name(Dim::Volume, domain, "domain")?;

    for sample in problem.dirichlet_samples(&geometry) {
        log::info!(
            "u0 at point {} {} = {}",
            sample.point,
            sample.position,
            sample.value
        );
    }
    log::info!(
        "f at the center = {}",
        problem.source.eval(DVec3::splat(0.5))
    );

    model.generate(Dim::Volume)?;
    model.write("poisson.msh")?;
    model.write("poisson.json")?;

    model.finish(&args)
}
