//! Meshes a hollow torus with gmsh.
//!
//! The outer and inner tori are built from half-circle arcs and bounded by
//! filled surfaces; the volume between the two shells is meshed in 3D.
//!
//! Run with `-nopopup` to skip the viewer.

use geomesh::*;

const OUTER_RADIUS: f64 = 4.0;
const INNER_RADIUS: f64 = 2.0;
const THICKNESS: f64 = 0.5;

fn main() -> Result<()> {
    env_logger::init();
    let args = RunArgs::from_env();

    let mut model = Model::new("torus", GmshEngine::default());
    let geo = model.geo();
    let lc = Some(0.1);

    // Center, then pairs of diameter endpoints on the y axis: outer circle,
    // inner circle, tube centers, offset outer circle, offset inner circle.
    let (outer, inner) = (OUTER_RADIUS, INNER_RADIUS);
    let tube = (outer + inner) / 2.0;
    let ys = [
        0.0,
        -outer,
        outer,
        -inner,
        inner,
        -tube,
        tube,
        -outer + THICKNESS,
        outer - THICKNESS,
        -inner - THICKNESS,
        inner + THICKNESS,
    ];
    for (tag, y) in (1..).zip(ys) {
        geo.add_point(0.0, y, 0.0, lc, Some(tag))?;
    }

    // Arcs around the z axis lie in the xy plane; arcs around the tube
    // centers need the x axis to fix their plane.
    let x = Some(DVec3::X);
    let arcs = [
        (2, 1, 3, None),
        (3, 1, 2, None),
        (4, 1, 5, None),
        (5, 1, 4, None),
        (4, 6, 2, x),
        (2, 6, 4, x),
        (3, 7, 5, x),
        (5, 7, 3, x),
        (8, 1, 9, None),
        (9, 1, 8, None),
        (10, 1, 11, None),
        (11, 1, 10, None),
        (9, 7, 11, x),
        (11, 7, 9, x),
        (10, 6, 8, x),
        (8, 6, 10, x),
    ];
    for (tag, (start, center, end, axis)) in (1..).zip(arcs) {
        geo.add_circle_arc(start, center, end, Some(tag), axis)?;
    }

    let loops: [&[Tag]; 8] = [
        &[1, 7, -3, 5],
        &[8, -1, 6, 3],
        &[7, 4, 5, -2],
        &[8, 2, 6, -4],
        &[15, -10, 13, 12],
        &[16, -12, 14, 10],
        &[15, 9, 13, -11],
        &[16, 11, 14, -9],
    ];
    for (tag, curves) in (1..).zip(loops) {
        geo.add_curve_loop(curves, Some(tag))?;
        geo.add_surface_filling(&[tag], Some(tag))?;
    }

    geo.add_surface_loop(&[1, 2, 3, 4], Some(1))?;
    geo.add_surface_loop(&[5, 6, 7, 8], Some(2))?;
    let volume = geo.add_volume(&[1, 2], None)?;
    log::info!("torus volume {volume}");

    model.synchronize()?;
    model.generate(Dim::Volume)?;
    model.write("torus.msh")?;

    model.finish(&args)
}
