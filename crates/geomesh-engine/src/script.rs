//! Serialization of a geometry description.
//!
//! [`GeoScript`] renders a snapshot in the Gmsh `.geo` scripting language,
//! one statement per entity in tag order:
//!
//! ```text
//! Point(1) = {0, 0, 0, 0.01};
//! Line(1) = {1, 2};
//! Curve Loop(1) = {4, 1, -2, 3};
//! Plane Surface(1) = {1};
//! ```

use std::fmt;

use geomesh_core::{Curve, Dim, Geometry, PhysicalGroups, SurfaceKind, Tag};
use serde::Serialize;

use crate::error::Result;

/// A `.geo` script view of a geometry description.
pub struct GeoScript<'a> {
    model: &'a str,
    geometry: &'a Geometry,
    groups: Option<&'a PhysicalGroups>,
    settings: Vec<(&'static str, f64)>,
}

impl<'a> GeoScript<'a> {
    /// Creates a script for the given model name and geometry.
    pub fn new(model: &'a str, geometry: &'a Geometry) -> Self {
        Self {
            model,
            geometry,
            groups: None,
            settings: Vec::new(),
        }
    }

    /// Appends physical group statements.
    #[must_use]
    pub fn with_groups(mut self, groups: &'a PhysicalGroups) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Adds a numeric option statement such as `Mesh.SaveAll = 1;`.
    #[must_use]
    pub fn with_setting(mut self, name: &'static str, value: f64) -> Self {
        self.settings.push((name, value));
        self
    }
}

fn join(tags: &[Tag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Makes a name safe inside a double-quoted string on one script line.
fn quoted(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' => '\'',
            '\n' | '\r' => ' ',
            c => c,
        })
        .collect()
}

fn physical_keyword(dim: Dim) -> &'static str {
    match dim {
        Dim::Point => "Physical Point",
        Dim::Curve => "Physical Curve",
        Dim::Surface => "Physical Surface",
        Dim::Volume => "Physical Volume",
    }
}

impl fmt::Display for GeoScript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "// model \"{}\"", quoted(&self.model))?;
        writeln!(f, "SetFactory(\"Built-in\");")?;
        for (name, value) in &self.settings {
            writeln!(f, "{name} = {value};")?;
        }

        for (tag, point) in self.geometry.points().iter() {
            let p = point.position;
            match point.mesh_size {
                Some(lc) => writeln!(f, "Point({tag}) = {{{}, {}, {}, {lc}}};", p.x, p.y, p.z)?,
                None => writeln!(f, "Point({tag}) = {{{}, {}, {}}};", p.x, p.y, p.z)?,
            }
        }

        for (tag, curve) in self.geometry.curves().iter() {
            match *curve {
                Curve::Line { start, end } => writeln!(f, "Line({tag}) = {{{start}, {end}}};")?,
                Curve::CircleArc {
                    start,
                    center,
                    end,
                    axis: None,
                } => writeln!(f, "Circle({tag}) = {{{start}, {center}, {end}}};")?,
                Curve::CircleArc {
                    start,
                    center,
                    end,
                    axis: Some(n),
                } => writeln!(
                    f,
                    "Circle({tag}) = {{{start}, {center}, {end}}} Plane{{{}, {}, {}}};",
                    n.x, n.y, n.z
                )?,
            }
        }

        for (tag, curve_loop) in self.geometry.curve_loops().iter() {
            writeln!(f, "Curve Loop({tag}) = {{{}}};", join(&curve_loop.curves))?;
        }

        for (tag, surface) in self.geometry.surfaces().iter() {
            let keyword = match surface.kind {
                SurfaceKind::Plane => "Plane Surface",
                SurfaceKind::Filling => "Surface",
            };
            writeln!(f, "{keyword}({tag}) = {{{}}};", join(&surface.loops))?;
        }

        for (tag, shell) in self.geometry.surface_loops().iter() {
            writeln!(f, "Surface Loop({tag}) = {{{}}};", join(&shell.surfaces))?;
        }

        for (tag, volume) in self.geometry.volumes().iter() {
            writeln!(f, "Volume({tag}) = {{{}}};", join(&volume.shells))?;
        }

        if let Some(groups) = self.groups {
            for (tag, group) in groups.iter() {
                let keyword = physical_keyword(group.dim);
                let entities = join(&group.entities);
                match &group.name {
                    Some(name) => writeln!(
                        f,
                        "{keyword}(\"{}\", {tag}) = {{{entities}}};",
                        quoted(name)
                    )?,
                    None => writeln!(f, "{keyword}({tag}) = {{{entities}}};")?,
                }
            }
        }
        Ok(())
    }
}

#[derive(Serialize)]
struct ModelDocument<'a> {
    model: &'a str,
    geometry: &'a Geometry,
    physical_groups: &'a PhysicalGroups,
}

/// Serializes a model as pretty-printed JSON.
pub fn to_json(model: &str, geometry: &Geometry, groups: &PhysicalGroups) -> Result<String> {
    let document = ModelDocument {
        model,
        geometry,
        physical_groups: groups,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomesh_core::{DVec3, GeometryBuilder};

    fn rectangle() -> GeometryBuilder {
        let mut geo = GeometryBuilder::new();
        let lc = Some(1e-2);
        geo.add_point(0.0, 0.0, 0.0, lc, Some(1)).unwrap();
        geo.add_point(0.1, 0.0, 0.0, lc, Some(2)).unwrap();
        geo.add_point(0.1, 0.3, 0.0, lc, Some(3)).unwrap();
        geo.add_point(0.0, 0.3, 0.0, None, None).unwrap();
        geo.add_line(1, 2, Some(1)).unwrap();
        geo.add_line(3, 2, Some(2)).unwrap();
        geo.add_line(3, 4, Some(3)).unwrap();
        geo.add_line(4, 1, Some(4)).unwrap();
        geo.add_curve_loop(&[4, 1, -2, 3], Some(1)).unwrap();
        geo.add_plane_surface(&[1], Some(1)).unwrap();
        geo
    }

    #[test]
    fn test_rectangle_script() {
        let mut geo = rectangle();
        let geometry = geo.synchronize();
        let script = GeoScript::new("t1", &geometry).to_string();

        assert!(script.starts_with("// model \"t1\"\n"));
        assert!(script.contains("Point(1) = {0, 0, 0, 0.01};\n"));
        assert!(script.contains("Point(4) = {0, 0.3, 0};\n"));
        assert!(script.contains("Line(2) = {3, 2};\n"));
        assert!(script.contains("Curve Loop(1) = {4, 1, -2, 3};\n"));
        assert!(script.contains("Plane Surface(1) = {1};\n"));

        let point = script.find("Point(1)").unwrap();
        let line = script.find("Line(1)").unwrap();
        let surface = script.find("Plane Surface(1)").unwrap();
        assert!(point < line && line < surface);
    }

    #[test]
    fn test_settings_and_groups() {
        let mut geo = rectangle();
        let geometry = geo.synchronize();
        let mut groups = PhysicalGroups::new();
        groups.add(&geometry, Dim::Curve, &[1, 2, 4], Some(5)).unwrap();
        let surface = groups.add(&geometry, Dim::Surface, &[1], None).unwrap();
        groups.set_name(Dim::Surface, surface, "My surface").unwrap();

        let script = GeoScript::new("t1", &geometry)
            .with_setting("Mesh.SaveAll", 1.0)
            .with_groups(&groups)
            .to_string();

        assert!(script.contains("Mesh.SaveAll = 1;\n"));
        assert!(script.contains("Physical Curve(5) = {1, 2, 4};\n"));
        assert!(script.contains("Physical Surface(\"My surface\", 1) = {1};\n"));
    }

    #[test]
    fn test_names_stay_on_one_line() {
        let mut geo = rectangle();
        let geometry = geo.synchronize();
        let mut groups = PhysicalGroups::new();
        let surface = groups.add(&geometry, Dim::Surface, &[1], None).unwrap();
        groups
            .set_name(Dim::Surface, surface, "wall\"\nPoint(99) = {0, 0, 0};\r")
            .unwrap();

        let script = GeoScript::new("t1\nMesh 3;", &geometry)
            .with_groups(&groups)
            .to_string();

        assert!(script.starts_with("// model \"t1 Mesh 3;\"\n"));
        assert!(script.contains(
            "Physical Surface(\"wall' Point(99) = {0, 0, 0}; \", 1) = {1};\n"
        ));
        assert!(!script.lines().any(|line| line.starts_with("Point(99)")));
        assert!(!script.lines().any(|line| line.starts_with("Mesh 3")));
    }

    #[test]
    fn test_arc_with_axis() {
        let mut geo = GeometryBuilder::new();
        geo.add_point(0.0, -2.0, 0.0, None, Some(4)).unwrap();
        geo.add_point(0.0, -3.0, 0.0, None, Some(6)).unwrap();
        geo.add_point(0.0, -4.0, 0.0, None, Some(2)).unwrap();
        geo.add_circle_arc(4, 6, 2, Some(5), Some(DVec3::X)).unwrap();
        geo.add_circle_arc(2, 6, 4, None, None).unwrap();
        let geometry = geo.synchronize();
        let script = GeoScript::new("torus", &geometry).to_string();

        assert!(script.contains("Circle(5) = {4, 6, 2} Plane{1, 0, 0};\n"));
        assert!(script.contains("Circle(6) = {2, 6, 4};\n"));
    }

    #[test]
    fn test_json_document() {
        let mut geo = rectangle();
        let geometry = geo.synchronize();
        let json = to_json("t1", &geometry, &PhysicalGroups::new()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["model"], "t1");
        assert_eq!(value["geometry"]["curves"]["2"]["type"], "line");
        assert_eq!(value["geometry"]["curves"]["2"]["start"], 3);
        assert_eq!(value["geometry"]["curve_loops"]["1"]["curves"][2], -2);
        assert_eq!(value["geometry"]["surfaces"]["1"]["kind"], "plane");
    }
}
