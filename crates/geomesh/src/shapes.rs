//! Helpers declaring common shapes with the built-in entities.

use geomesh_core::{GeometryBuilder, GeometryError, Tag};
use glam::DVec3;

/// Declares an axis-aligned box and returns its volume tag.
///
/// Adds 8 points, 12 lines, 6 curve loops, 6 plane surfaces, one surface
/// loop and one volume, all with auto-allocated tags.
pub fn add_box(
    geo: &mut GeometryBuilder,
    min: DVec3,
    max: DVec3,
    mesh_size: Option<f64>,
) -> Result<Tag, GeometryError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(GeometryError::NonFiniteCoordinates);
    }
    if !min.cmplt(max).all() {
        return Err(GeometryError::InvalidBoundary(format!(
            "box corners {min} and {max} do not span a volume"
        )));
    }

    // Corner i sits at max along axis a when bit a of i is set.
    let mut corners = [0; 8];
    for (i, corner) in corners.iter_mut().enumerate() {
        let pick = |axis: usize, lo: f64, hi: f64| if i & (1 << axis) == 0 { lo } else { hi };
        *corner = geo.add_point(
            pick(0, min.x, max.x),
            pick(1, min.y, max.y),
            pick(2, min.z, max.z),
            mesh_size,
            None,
        )?;
    }

    let mut edges = [[0; 8]; 8];
    for axis in 0..3 {
        for low in (0..8usize).filter(|&i| i & (1 << axis) == 0) {
            let high = low | (1 << axis);
            edges[low][high] = geo.add_line(corners[low], corners[high], None)?;
        }
    }
    let signed = |from: usize, to: usize| {
        if from < to {
            edges[from][to]
        } else {
            -edges[to][from]
        }
    };

    let mut faces = Vec::with_capacity(6);
    for axis in 0..3 {
        let (b, c) = ((axis + 1) % 3, (axis + 2) % 3);
        for side in 0..2 {
            let c0 = side << axis;
            let cycle = [c0, c0 | 1 << b, c0 | 1 << b | 1 << c, c0 | 1 << c];
            let curves: Vec<Tag> = (0..4)
                .map(|k| signed(cycle[k], cycle[(k + 1) % 4]))
                .collect();
            let curve_loop = geo.add_curve_loop(&curves, None)?;
            faces.push(geo.add_plane_surface(&[curve_loop], None)?);
        }
    }

    let shell = geo.add_surface_loop(&faces, None)?;
    let volume = geo.add_volume(&[shell], None)?;
    log::debug!("added box {min} .. {max} as volume {volume}");
    Ok(volume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomesh_core::Dim;

    #[test]
    fn test_unit_box() {
        let mut geo = GeometryBuilder::new();
        let volume = add_box(&mut geo, DVec3::ZERO, DVec3::ONE, Some(0.25)).unwrap();
        assert_eq!(volume, 1);

        let geometry = geo.synchronize();
        assert_eq!(geometry.count(Dim::Point), 8);
        assert_eq!(geometry.count(Dim::Curve), 12);
        assert_eq!(geometry.count(Dim::Surface), 6);
        assert_eq!(geometry.count(Dim::Volume), 1);
        assert_eq!(geometry.surface_loops().len(), 1);

        let (lo, hi) = geometry.bounding_box().unwrap();
        assert_eq!(lo, DVec3::ZERO);
        assert_eq!(hi, DVec3::ONE);
    }

    #[test]
    fn test_two_boxes_get_fresh_tags() {
        let mut geo = GeometryBuilder::new();
        add_box(&mut geo, DVec3::ZERO, DVec3::ONE, None).unwrap();
        let second = add_box(&mut geo, DVec3::splat(2.0), DVec3::splat(3.0), None).unwrap();
        assert_eq!(second, 2);
        assert_eq!(geo.geometry().count(Dim::Point), 16);
        assert_eq!(geo.surface_loop(2).unwrap().surfaces, vec![7, 8, 9, 10, 11, 12]);
    }

    #[test]
    fn test_flat_box_rejected() {
        let mut geo = GeometryBuilder::new();
        let result = add_box(&mut geo, DVec3::ZERO, DVec3::new(1.0, 0.0, 1.0), None);
        assert!(matches!(result, Err(GeometryError::InvalidBoundary(_))));
        assert!(geo.geometry().is_empty());
    }

    #[test]
    fn test_infinite_corner_declares_nothing() {
        let mut geo = GeometryBuilder::new();
        let result = add_box(&mut geo, DVec3::ZERO, DVec3::INFINITY, None);
        assert!(matches!(result, Err(GeometryError::NonFiniteCoordinates)));
        assert!(geo.geometry().is_empty());

        let result = add_box(&mut geo, DVec3::splat(f64::NAN), DVec3::ONE, None);
        assert!(matches!(result, Err(GeometryError::NonFiniteCoordinates)));
        assert_eq!(geo.geometry().count(Dim::Point), 0);
    }
}
