//! Description of a Poisson boundary value problem.
//!
//! ```text
//! -Δu = f      in Ω
//!   u = u0     on the Dirichlet boundary
//! ∂u/∂n = g    on the rest of ∂Ω
//! ```
//!
//! Coefficients are [`ScalarField`] values and the Dirichlet boundary is a
//! [`BoundaryPredicate`], so a problem is plain data that a solver backend
//! can evaluate at its own degrees of freedom. Assembly and solving are left
//! to that backend.

use std::fmt;
use std::sync::Arc;

use geomesh_core::{Geometry, Tag};
use glam::DVec3;

/// Tolerance used by the unit cube boundary test.
pub const BOUNDARY_EPS: f64 = 3.0e-16;

/// A scalar coefficient evaluated at points of the domain.
#[derive(Clone)]
pub enum ScalarField {
    Constant(f64),
    Function(Arc<dyn Fn(DVec3) -> f64 + Send + Sync>),
}

impl ScalarField {
    /// Wraps a closure.
    pub fn function(f: impl Fn(DVec3) -> f64 + Send + Sync + 'static) -> Self {
        ScalarField::Function(Arc::new(f))
    }

    pub fn eval(&self, x: DVec3) -> f64 {
        match self {
            ScalarField::Constant(value) => *value,
            ScalarField::Function(f) => f(x),
        }
    }
}

impl fmt::Debug for ScalarField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarField::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            ScalarField::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<f64> for ScalarField {
    fn from(value: f64) -> Self {
        ScalarField::Constant(value)
    }
}

/// Selects the part of the boundary where a condition applies.
#[derive(Clone)]
pub enum BoundaryPredicate {
    /// The whole boundary.
    OnBoundary,
    /// Points within `eps` of a face of the box `[min, max]`.
    BoxFaces { min: DVec3, max: DVec3, eps: f64 },
    /// A closure of the point and whether it lies on the boundary.
    Function(Arc<dyn Fn(DVec3, bool) -> bool + Send + Sync>),
}

impl BoundaryPredicate {
    /// Wraps a closure.
    pub fn function(f: impl Fn(DVec3, bool) -> bool + Send + Sync + 'static) -> Self {
        BoundaryPredicate::Function(Arc::new(f))
    }

    /// Returns true if the condition applies at `x`.
    pub fn inside(&self, x: DVec3, on_boundary: bool) -> bool {
        match self {
            BoundaryPredicate::OnBoundary => on_boundary,
            BoundaryPredicate::BoxFaces { min, max, eps } => {
                x.cmplt(*min + *eps).any() || x.cmpgt(*max - *eps).any()
            }
            BoundaryPredicate::Function(f) => f(x, on_boundary),
        }
    }
}

impl fmt::Debug for BoundaryPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryPredicate::OnBoundary => f.write_str("OnBoundary"),
            BoundaryPredicate::BoxFaces { min, max, eps } => f
                .debug_struct("BoxFaces")
                .field("min", min)
                .field("max", max)
                .field("eps", eps)
                .finish(),
            BoundaryPredicate::Function(_) => f.write_str("Function(..)"),
        }
    }
}

/// A prescribed value at a geometry point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirichletSample {
    pub point: Tag,
    pub position: DVec3,
    pub value: f64,
}

/// A Poisson problem with mixed Dirichlet/Neumann boundary conditions.
#[derive(Debug, Clone)]
pub struct PoissonProblem {
    /// `u0`, imposed where `dirichlet_boundary` holds.
    pub dirichlet_value: ScalarField,
    pub dirichlet_boundary: BoundaryPredicate,
    /// Right-hand side `f`.
    pub source: ScalarField,
    /// Normal derivative `g` on the remaining boundary.
    pub neumann_flux: ScalarField,
}

impl PoissonProblem {
    /// The problem on the unit cube: `u0 = (x + y) z`,
    /// `f = 10 exp(-|x - c|² / 0.02)` centered at `c = (0.5, 0.5, 0.5)` and
    /// `g = 1000 sin(5x)`, with `u0` imposed on every face.
    pub fn unit_cube() -> Self {
        Self {
            dirichlet_value: ScalarField::function(|x| (x.x + x.y) * x.z),
            dirichlet_boundary: BoundaryPredicate::BoxFaces {
                min: DVec3::ZERO,
                max: DVec3::ONE,
                eps: BOUNDARY_EPS,
            },
            source: ScalarField::function(|x| {
                10.0 * (-(x - DVec3::splat(0.5)).length_squared() / 0.02).exp()
            }),
            neumann_flux: ScalarField::function(|x| 1000.0 * (5.0 * x.x).sin()),
        }
    }

    /// Evaluates the Dirichlet condition at the points of a geometry.
    ///
    /// Declared points are corners of the model boundary, so every point is
    /// passed to the predicate as lying on the boundary.
    pub fn dirichlet_samples(&self, geometry: &Geometry) -> Vec<DirichletSample> {
        geometry
            .points()
            .iter()
            .filter(|(_, p)| self.dirichlet_boundary.inside(p.position, true))
            .map(|(tag, p)| DirichletSample {
                point: tag,
                position: p.position,
                value: self.dirichlet_value.eval(p.position),
            })
            .collect()
    }
}
