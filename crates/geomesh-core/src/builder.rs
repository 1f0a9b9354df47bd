//! The geometry builder session.
//!
//! A [`GeometryBuilder`] owns the tag tables of one model. Each `add_*` call
//! validates its arguments against the current description, then inserts the
//! entity and returns its tag. Nothing is inserted when validation fails.
//!
//! # Example
//!
//! ```
//! use geomesh_core::GeometryBuilder;
//!
//! # fn main() -> geomesh_core::Result<()> {
//! let mut geo = GeometryBuilder::new();
//! let lc = Some(1e-2);
//! geo.add_point(0.0, 0.0, 0.0, lc, Some(1))?;
//! geo.add_point(0.1, 0.0, 0.0, lc, Some(2))?;
//! geo.add_point(0.1, 0.3, 0.0, lc, Some(3))?;
//! let p4 = geo.add_point(0.0, 0.3, 0.0, lc, None)?;
//!
//! geo.add_line(1, 2, Some(1))?;
//! geo.add_line(3, 2, Some(2))?;
//! geo.add_line(3, p4, Some(3))?;
//! geo.add_line(4, 1, Some(p4))?;
//!
//! geo.add_curve_loop(&[4, 1, -2, 3], Some(1))?;
//! geo.add_plane_surface(&[1], Some(1))?;
//!
//! let geometry = geo.synchronize();
//! assert_eq!(geometry.surfaces().len(), 1);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use glam::DVec3;

use crate::entity::{Curve, CurveLoop, Point, Surface, SurfaceKind, SurfaceLoop, Volume};
use crate::error::{GeometryError, Result};
use crate::geometry::Geometry;
use crate::options::{Options, ResyncPolicy};
use crate::tag::{EntityKind, Tag};
use crate::validate;

/// Builds a geometry description and freezes it into snapshots.
#[derive(Debug, Default)]
pub struct GeometryBuilder {
    geometry: Geometry,
    options: Options,
    /// Last snapshot handed out by `synchronize`.
    snapshot: Option<Arc<Geometry>>,
    /// Whether the description changed since the last snapshot.
    dirty: bool,
}

impl GeometryBuilder {
    /// Creates an empty builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty builder with the given options.
    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Returns the builder options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Returns the current (working) description.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Returns the last snapshot handed out by [`Self::synchronize`].
    pub fn snapshot(&self) -> Option<&Arc<Geometry>> {
        self.snapshot.as_ref()
    }

    /// Returns true if the latest snapshot reflects every declaration.
    pub fn is_synchronized(&self) -> bool {
        self.snapshot.is_some() && !self.dirty
    }

    pub fn point(&self, tag: Tag) -> Option<&Point> {
        self.geometry.point(tag)
    }

    pub fn curve(&self, tag: Tag) -> Option<&Curve> {
        self.geometry.curve(tag)
    }

    pub fn curve_loop(&self, tag: Tag) -> Option<&CurveLoop> {
        self.geometry.curve_loop(tag)
    }

    pub fn surface(&self, tag: Tag) -> Option<&Surface> {
        self.geometry.surface(tag)
    }

    pub fn surface_loop(&self, tag: Tag) -> Option<&SurfaceLoop> {
        self.geometry.surface_loop(tag)
    }

    pub fn volume(&self, tag: Tag) -> Option<&Volume> {
        self.geometry.volume(tag)
    }

    fn ensure_mutable(&self, operation: &'static str) -> Result<()> {
        if self.snapshot.is_none() {
            return Ok(());
        }
        match self.options.resync_policy {
            ResyncPolicy::Strict => Err(GeometryError::FrozenGeometry { operation }),
            ResyncPolicy::Warn => {
                log::warn!("geometry modified after synchronization ({operation}); synchronize again before meshing");
                Ok(())
            }
        }
    }

    /// Adds a point and returns its tag.
    ///
    /// Without an explicit `tag`, the next tag above every point tag used so
    /// far is allocated.
    pub fn add_point(
        &mut self,
        x: f64,
        y: f64,
        z: f64,
        mesh_size: Option<f64>,
        tag: Option<Tag>,
    ) -> Result<Tag> {
        self.ensure_mutable("add a point")?;
        let position = DVec3::new(x, y, z);
        validate::check_point(position, mesh_size)?;
        let tag = self.geometry.points.resolve(tag)?;

        self.geometry.points.insert(tag, Point { position, mesh_size });
        self.dirty = true;
        log::debug!("added point {tag} at {position}");
        Ok(tag)
    }

    /// Adds a straight line from `start` to `end`.
    pub fn add_line(&mut self, start: Tag, end: Tag, tag: Option<Tag>) -> Result<Tag> {
        self.ensure_mutable("add a line")?;
        validate::check_line(&self.geometry, start, end)?;
        let tag = self.geometry.curves.resolve(tag)?;

        self.geometry.curves.insert(tag, Curve::Line { start, end });
        self.dirty = true;
        log::debug!("added line {tag}: {start} -> {end}");
        Ok(tag)
    }

    /// Adds a circle arc from `start` to `end` around `center`.
    ///
    /// `axis` fixes the plane of the arc; it is only needed when `start` and
    /// `end` are diametrically opposite.
    pub fn add_circle_arc(
        &mut self,
        start: Tag,
        center: Tag,
        end: Tag,
        tag: Option<Tag>,
        axis: Option<DVec3>,
    ) -> Result<Tag> {
        self.ensure_mutable("add a circle arc")?;
        validate::check_circle_arc(
            &self.geometry,
            start,
            center,
            end,
            axis,
            self.options.tolerance,
        )?;
        let tag = self.geometry.curves.resolve(tag)?;

        self.geometry.curves.insert(
            tag,
            Curve::CircleArc {
                start,
                center,
                end,
                axis,
            },
        );
        self.dirty = true;
        log::debug!("added circle arc {tag}: {start} -> {end} around {center}");
        Ok(tag)
    }

    /// Adds a curve loop from signed curve tags.
    ///
    /// A negative tag traverses its curve from end to start. The curves must
    /// chain into a closed cycle.
    pub fn add_curve_loop(&mut self, curves: &[Tag], tag: Option<Tag>) -> Result<Tag> {
        self.ensure_mutable("add a curve loop")?;
        validate::check_curve_loop(&self.geometry, curves)?;
        let tag = self.geometry.curve_loops.resolve(tag)?;

        self.geometry.curve_loops.insert(
            tag,
            CurveLoop {
                curves: curves.to_vec(),
            },
        );
        self.dirty = true;
        log::debug!("added curve loop {tag}: {curves:?}");
        Ok(tag)
    }

    /// Adds a plane surface bounded by curve loops (outer first, then holes).
    pub fn add_plane_surface(&mut self, loops: &[Tag], tag: Option<Tag>) -> Result<Tag> {
        self.ensure_mutable("add a plane surface")?;
        validate::check_references(&self.geometry.curve_loops, loops, EntityKind::Surface)?;
        validate::check_plane_boundary(
            &self.geometry,
            loops,
            self.options.tolerance,
            self.options.arc_segments,
        )?;
        self.insert_surface(SurfaceKind::Plane, loops, tag)
    }

    /// Adds a surface filling the given curve loops.
    pub fn add_surface_filling(&mut self, loops: &[Tag], tag: Option<Tag>) -> Result<Tag> {
        self.ensure_mutable("add a surface filling")?;
        validate::check_references(&self.geometry.curve_loops, loops, EntityKind::Surface)?;
        self.insert_surface(SurfaceKind::Filling, loops, tag)
    }

    fn insert_surface(&mut self, kind: SurfaceKind, loops: &[Tag], tag: Option<Tag>) -> Result<Tag> {
        let tag = self.geometry.surfaces.resolve(tag)?;
        self.geometry.surfaces.insert(
            tag,
            Surface {
                kind,
                loops: loops.to_vec(),
            },
        );
        self.dirty = true;
        log::debug!("added {kind:?} surface {tag}: loops {loops:?}");
        Ok(tag)
    }

    /// Adds a surface loop; the surfaces must form a closed shell.
    pub fn add_surface_loop(&mut self, surfaces: &[Tag], tag: Option<Tag>) -> Result<Tag> {
        self.ensure_mutable("add a surface loop")?;
        validate::check_shell(&self.geometry, surfaces)?;
        let tag = self.geometry.surface_loops.resolve(tag)?;

        self.geometry.surface_loops.insert(
            tag,
            SurfaceLoop {
                surfaces: surfaces.to_vec(),
            },
        );
        self.dirty = true;
        log::debug!("added surface loop {tag}: {surfaces:?}");
        Ok(tag)
    }

    /// Adds a volume bounded by surface loops (outer shell first, then voids).
    pub fn add_volume(&mut self, shells: &[Tag], tag: Option<Tag>) -> Result<Tag> {
        self.ensure_mutable("add a volume")?;
        validate::check_references(&self.geometry.surface_loops, shells, EntityKind::Volume)?;
        validate::check_distinct(shells, EntityKind::SurfaceLoop)?;
        let tag = self.geometry.volumes.resolve(tag)?;

        self.geometry.volumes.insert(
            tag,
            Volume {
                shells: shells.to_vec(),
            },
        );
        self.dirty = true;
        log::debug!("added volume {tag}: shells {shells:?}");
        Ok(tag)
    }

    /// Freezes the description and returns the snapshot for the meshing engine.
    ///
    /// Synchronizing again without intervening changes returns the same
    /// snapshot. Under [`ResyncPolicy::Warn`], changes made after the previous
    /// synchronization produce a new snapshot.
    pub fn synchronize(&mut self) -> Arc<Geometry> {
        if let Some(snapshot) = &self.snapshot {
            if !self.dirty {
                log::debug!("geometry already synchronized");
                return Arc::clone(snapshot);
            }
            log::warn!("re-synchronizing modified geometry; the meshing engine rebuilds its model");
        }

        let snapshot = Arc::new(self.geometry.clone());
        log::info!(
            "synchronized geometry: {} points, {} curves, {} surfaces, {} volumes",
            snapshot.points().len(),
            snapshot.curves().len(),
            snapshot.surfaces().len(),
            snapshot.volumes().len()
        );
        self.snapshot = Some(Arc::clone(&snapshot));
        self.dirty = false;
        snapshot
    }
}
