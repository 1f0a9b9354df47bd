//! Validation of entity declarations against an existing description.
//!
//! Every check is a pure function of the current [`Geometry`]; the builder
//! runs them before touching any table so a failing call has no effect.
//!
//! Checks performed:
//! - references resolve within their tag space
//! - curve loops chain head-to-tail into a closed cycle
//! - plane surface boundaries are planar, simple and nested
//! - surface loops are closed (every bounding curve is shared by two surfaces)
//!   and list each surface once

use std::collections::{BTreeMap, BTreeSet};

use glam::{DVec2, DVec3};

use crate::entity::Curve;
use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::registry::TagTable;
use crate::tag::{EntityKind, Tag};

/// Checks that a point has finite coordinates and a usable mesh size.
pub fn check_point(position: DVec3, mesh_size: Option<f64>) -> Result<()> {
    if !position.is_finite() {
        return Err(GeometryError::NonFiniteCoordinates);
    }
    match mesh_size {
        Some(size) if !(size.is_finite() && size > 0.0) => {
            Err(GeometryError::InvalidMeshSize(size))
        }
        _ => Ok(()),
    }
}

/// Checks that every tag in `tags` exists in `table`.
///
/// `owner` names the entity being declared and is reported when the list is
/// empty.
pub fn check_references<T>(table: &TagTable<T>, tags: &[Tag], owner: EntityKind) -> Result<()> {
    if tags.is_empty() {
        return Err(GeometryError::EmptyReferenceList(owner));
    }
    tags.iter().try_for_each(|&tag| table.require(tag).map(|_| ()))
}

/// Checks that no tag appears twice in a reference list.
pub fn check_distinct(tags: &[Tag], kind: EntityKind) -> Result<()> {
    let mut seen = BTreeSet::new();
    match tags.iter().find(|&&tag| !seen.insert(tag)) {
        Some(&tag) => Err(GeometryError::DuplicateReference { kind, tag }),
        None => Ok(()),
    }
}

/// Checks a straight line between two points.
pub fn check_line(geometry: &Geometry, start: Tag, end: Tag) -> Result<()> {
    geometry.points.require(start)?;
    geometry.points.require(end)?;
    if start == end {
        return Err(GeometryError::DegenerateCurve(format!(
            "line starts and ends at point {start}"
        )));
    }
    Ok(())
}

/// Checks a circle arc: distinct points, equal radii and a usable axis.
pub fn check_circle_arc(
    geometry: &Geometry,
    start: Tag,
    center: Tag,
    end: Tag,
    axis: Option<DVec3>,
    tolerance: f64,
) -> Result<()> {
    let s = geometry.points.require(start)?.position;
    let c = geometry.points.require(center)?.position;
    let e = geometry.points.require(end)?.position;

    if start == center || center == end || start == end {
        return Err(GeometryError::DegenerateCurve(format!(
            "circle arc needs distinct start, center and end points, got {start}, {center}, {end}"
        )));
    }

    let r_start = (s - c).length();
    let r_end = (e - c).length();
    let radius = r_start.max(r_end);
    if radius <= f64::EPSILON {
        return Err(GeometryError::InvalidArc("zero radius".to_string()));
    }
    if (r_start - r_end).abs() > tolerance * radius {
        return Err(GeometryError::InvalidArc(format!(
            "start point {start} is {r_start} from center {center} but end point {end} is {r_end}"
        )));
    }

    if let Some(axis) = axis {
        if !axis.is_finite() || axis.length_squared() == 0.0 {
            return Err(GeometryError::InvalidArc(
                "axis must be a non-zero finite vector".to_string(),
            ));
        }
    }
    Ok(())
}

fn signed_curve(geometry: &Geometry, signed: Tag) -> Result<&Curve> {
    match signed.checked_abs() {
        Some(tag) if tag > 0 => geometry.curves.require(tag),
        _ => Err(GeometryError::UnknownReference {
            kind: EntityKind::Curve,
            tag: signed,
        }),
    }
}

/// Checks that signed curves chain into a closed cycle.
///
/// Curve `i` must end (respecting its sign) where curve `i + 1` starts, and
/// the last curve must end where the first starts.
pub fn check_curve_loop(geometry: &Geometry, curves: &[Tag]) -> Result<()> {
    if curves.is_empty() {
        return Err(GeometryError::EmptyReferenceList(EntityKind::CurveLoop));
    }

    let ends = curves
        .iter()
        .map(|&signed| Ok(signed_curve(geometry, signed)?.oriented_endpoints(signed > 0)))
        .collect::<Result<Vec<_>>>()?;

    for (i, &(_, end)) in ends.iter().enumerate() {
        let j = (i + 1) % ends.len();
        let (start, _) = ends[j];
        if end != start {
            return Err(GeometryError::OpenLoop {
                curve: curves[i],
                end,
                next: curves[j],
                start,
            });
        }
    }
    Ok(())
}

/// Checks that surfaces form a closed shell.
///
/// Each curve on the boundary of the shell's surfaces has to be shared by
/// exactly two surface boundaries. Orientation is not checked since the
/// meshing engine reorients surfaces within a loop.
pub fn check_shell(geometry: &Geometry, surfaces: &[Tag]) -> Result<()> {
    check_references(&geometry.surfaces, surfaces, EntityKind::SurfaceLoop)?;
    check_distinct(surfaces, EntityKind::Surface)?;

    let mut uses: BTreeMap<Tag, usize> = BTreeMap::new();
    for &surface_tag in surfaces {
        let surface = geometry.surfaces.require(surface_tag)?;
        for &loop_tag in &surface.loops {
            for &curve in &geometry.curve_loops.require(loop_tag)?.curves {
                *uses.entry(curve.abs()).or_default() += 1;
            }
        }
    }

    match uses.into_iter().find(|&(_, count)| count != 2) {
        Some((curve, count)) => Err(GeometryError::OpenShell { curve, uses: count }),
        None => Ok(()),
    }
}

/// Samples a curve as a polyline from its first to its last point.
///
/// Lines yield their two endpoints; arcs yield `arc_segments + 1` points.
pub fn sample_curve(
    geometry: &Geometry,
    curve: &Curve,
    forward: bool,
    arc_segments: u32,
) -> Result<Vec<DVec3>> {
    let position = |tag: Tag| geometry.points.require(tag).map(|p| p.position);

    let mut samples = match *curve {
        Curve::Line { start, end } => vec![position(start)?, position(end)?],
        Curve::CircleArc {
            start,
            center,
            end,
            axis,
        } => arc_points(
            position(start)?,
            position(center)?,
            position(end)?,
            axis,
            arc_segments.max(1),
        ),
    };

    if !forward {
        samples.reverse();
    }
    Ok(samples)
}

/// Samples a curve loop as a closed polygon (the first point is not repeated).
pub fn loop_polyline(geometry: &Geometry, loop_tag: Tag, arc_segments: u32) -> Result<Vec<DVec3>> {
    let curve_loop = geometry.curve_loops.require(loop_tag)?;
    let mut polyline = Vec::new();
    for &signed in &curve_loop.curves {
        let curve = signed_curve(geometry, signed)?;
        let samples = sample_curve(geometry, curve, signed > 0, arc_segments)?;
        polyline.extend_from_slice(&samples[..samples.len() - 1]);
    }
    Ok(polyline)
}

fn arc_points(start: DVec3, center: DVec3, end: DVec3, axis: Option<DVec3>, segments: u32) -> Vec<DVec3> {
    let a = start - center;
    let b = end - center;
    let radius = a.length();
    let u = a / radius;
    let normal = arc_normal(u, b, axis);
    let v = normal.cross(u);
    let sweep = b.dot(v).atan2(b.dot(u));

    (0..=segments)
        .map(|i| {
            if i == segments {
                return end;
            }
            let t = sweep * f64::from(i) / f64::from(segments);
            center + radius * (u * t.cos() + v * t.sin())
        })
        .collect()
}

/// Normal of the arc plane; `u` is the unit vector from center to start.
fn arc_normal(u: DVec3, b: DVec3, axis: Option<DVec3>) -> DVec3 {
    if let Some(axis) = axis {
        let n = axis - u * axis.dot(u);
        if n.length_squared() > 1e-24 * axis.length_squared() {
            return n.normalize();
        }
    }

    let n = u.cross(b);
    if n.length_squared() > 1e-24 * b.length_squared() {
        return n.normalize();
    }

    // Diametrically opposite endpoints without an axis: prefer the XY plane.
    if u.dot(DVec3::Z).abs() < 1e-9 {
        DVec3::Z
    } else {
        u.any_orthonormal_vector()
    }
}

/// Checks the boundary of a plane surface.
///
/// The loops must lie in one plane, no loop may cross itself or another loop,
/// and every hole must lie inside the outer loop and outside the other holes.
pub fn check_plane_boundary(
    geometry: &Geometry,
    loops: &[Tag],
    tolerance: f64,
    arc_segments: u32,
) -> Result<()> {
    if loops.is_empty() {
        return Err(GeometryError::EmptyReferenceList(EntityKind::Surface));
    }
    let polylines = loops
        .iter()
        .map(|&tag| Ok((tag, loop_polyline(geometry, tag, arc_segments)?)))
        .collect::<Result<Vec<_>>>()?;

    let scale = polyline_scale(polylines.iter().flat_map(|(_, polyline)| polyline));
    let eps = tolerance * scale;
    let (outer_tag, outer) = &polylines[0];

    let normal = newell_normal(outer);
    if normal.length() <= eps * scale {
        return Err(GeometryError::InvalidBoundary(format!(
            "outer curve loop {outer_tag} encloses no area"
        )));
    }
    let normal = normal.normalize();

    let origin = outer[0];
    for (tag, polyline) in &polylines {
        if polyline.iter().any(|&p| (p - origin).dot(normal).abs() > eps) {
            return Err(GeometryError::InvalidBoundary(format!(
                "curve loop {tag} is not planar"
            )));
        }
    }

    let u = normal.any_orthonormal_vector();
    let v = normal.cross(u);
    let polygons: Vec<(Tag, Vec<DVec2>)> = polylines
        .iter()
        .map(|(tag, polyline)| {
            let projected = polyline
                .iter()
                .map(|&p| DVec2::new((p - origin).dot(u), (p - origin).dot(v)))
                .collect();
            (*tag, projected)
        })
        .collect();

    for (tag, polygon) in &polygons {
        if self_intersects(polygon, eps) {
            return Err(GeometryError::InvalidBoundary(format!(
                "curve loop {tag} intersects itself"
            )));
        }
    }

    for (i, (tag_a, a)) in polygons.iter().enumerate() {
        for (tag_b, b) in &polygons[i + 1..] {
            if polygons_cross(a, b, eps) {
                return Err(GeometryError::InvalidBoundary(format!(
                    "curve loop {tag_a} crosses curve loop {tag_b}"
                )));
            }
        }
    }

    let (_, outer_polygon) = &polygons[0];
    for (i, (hole_tag, hole)) in polygons.iter().enumerate().skip(1) {
        if !point_in_polygon(hole[0], outer_polygon) {
            return Err(GeometryError::InvalidBoundary(format!(
                "hole loop {hole_tag} lies outside outer loop {outer_tag}"
            )));
        }
        for (j, (other_tag, other)) in polygons.iter().enumerate().skip(1) {
            if i != j && point_in_polygon(hole[0], other) {
                return Err(GeometryError::InvalidBoundary(format!(
                    "hole loop {hole_tag} lies inside hole loop {other_tag}"
                )));
            }
        }
    }
    Ok(())
}

/// Bounding box diagonal of the sampled boundary.
fn polyline_scale<'a>(points: impl Iterator<Item = &'a DVec3>) -> f64 {
    let (min, max) = points.fold(
        (DVec3::splat(f64::INFINITY), DVec3::splat(f64::NEG_INFINITY)),
        |(min, max), &p| (min.min(p), max.max(p)),
    );
    let diagonal = (max - min).length();
    if diagonal.is_finite() {
        diagonal.max(f64::EPSILON)
    } else {
        1.0
    }
}

/// Newell's method; the length of the result is twice the enclosed area.
fn newell_normal(polygon: &[DVec3]) -> DVec3 {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .fold(DVec3::ZERO, |n, (&p, &q)| n + p.cross(q))
}

fn segments(polygon: &[DVec2]) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .map(|(&p, &q)| (p, q))
}

fn self_intersects(polygon: &[DVec2], eps: f64) -> bool {
    let n = polygon.len();
    let edges: Vec<_> = segments(polygon).collect();
    for i in 0..n {
        for j in i + 2..n {
            if i == 0 && j == n - 1 {
                continue;
            }
            let (p1, p2) = edges[i];
            let (q1, q2) = edges[j];
            if segments_intersect(p1, p2, q1, q2, eps) {
                return true;
            }
        }
    }
    false
}

fn polygons_cross(a: &[DVec2], b: &[DVec2], eps: f64) -> bool {
    segments(a).any(|(p1, p2)| segments(b).any(|(q1, q2)| segments_intersect(p1, p2, q1, q2, eps)))
}

fn orient(a: DVec2, b: DVec2, c: DVec2) -> f64 {
    (b - a).perp_dot(c - a)
}

fn on_segment(a: DVec2, b: DVec2, p: DVec2, eps: f64) -> bool {
    p.x >= a.x.min(b.x) - eps
        && p.x <= a.x.max(b.x) + eps
        && p.y >= a.y.min(b.y) - eps
        && p.y <= a.y.max(b.y) + eps
}

/// Segment intersection including touching and collinear overlap.
fn segments_intersect(p1: DVec2, p2: DVec2, q1: DVec2, q2: DVec2, eps: f64) -> bool {
    let area_eps = eps * (p2 - p1).length().max((q2 - q1).length());
    let d1 = orient(q1, q2, p1);
    let d2 = orient(q1, q2, p2);
    let d3 = orient(p1, p2, q1);
    let d4 = orient(p1, p2, q2);

    let straddles = |x: f64, y: f64| (x > area_eps && y < -area_eps) || (x < -area_eps && y > area_eps);
    if straddles(d1, d2) && straddles(d3, d4) {
        return true;
    }

    (d1.abs() <= area_eps && on_segment(q1, q2, p1, eps))
        || (d2.abs() <= area_eps && on_segment(q1, q2, p2, eps))
        || (d3.abs() <= area_eps && on_segment(p1, p2, q1, eps))
        || (d4.abs() <= area_eps && on_segment(p1, p2, q2, eps))
}

/// Even-odd ray casting.
fn point_in_polygon(p: DVec2, polygon: &[DVec2]) -> bool {
    segments(polygon).fold(false, |inside, (a, b)| {
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                return !inside;
            }
        }
        inside
    })
}
