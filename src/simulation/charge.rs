//! Charged point bodies and pairwise force accumulation
//!
//! Same-kind bodies interact through a closed-form inverse-square law:
//! Coulomb's law for electric charges, the permeability-derived analog
//! for magnetic pole strengths. Cross-kind pairs contribute zero force, a
//! known gap in the sandbox physics that is kept as-is rather than filled
//! with an invented cross-term
//!
//! The pairwise function is isolated in [`ChargedBody::force_upon`] so a
//! partitioned evaluation (grid, tree) could replace the direct O(n^2)
//! pass without touching the integration contract

use std::f64::consts::PI;

use crate::simulation::math::{normalize_or_zero, NVec3};
use crate::simulation::registry::Registry;

/// Vacuum permittivity, F/m
pub const PERMITTIVITY: f64 = 8.8541878128e-12;
/// Vacuum permeability, N/A^2
pub const PERMEABILITY: f64 = 1.25663706212e-6;
/// Coulomb constant, N*m^2/C^2
pub const COULOMB_CONST: f64 = 8.9875517923e9;

/// Which force law a body participates in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeKind {
    Electric,
    Magnetic,
}

/// Translational state on the rigid-body side of a charged body
///
/// The force pass only ever calls [`PointBody::add_force`] and reads the
/// position; the driver consumes the accumulated force once per tick
#[derive(Debug, Clone)]
pub struct PointBody {
    pub x: NVec3, // position
    pub v: NVec3, // velocity
    pub m: f64,   // mass
    force: NVec3, // accumulated external force for the current tick
}

impl PointBody {
    pub fn new(x: NVec3, v: NVec3, m: f64) -> Self {
        Self {
            x,
            v,
            m,
            force: NVec3::zeros(),
        }
    }

    /// Add an external force for the current tick
    pub fn add_force(&mut self, force: NVec3) {
        self.force += force;
    }

    pub fn force(&self) -> NVec3 {
        self.force
    }

    /// Semi-implicit translational update; consumes the accumulated force
    pub fn integrate(&mut self, dt: f64) {
        if self.m != 0.0 {
            self.v += self.force / self.m * dt;
        }
        self.x += self.v * dt;
        self.force = NVec3::zeros();
    }
}

/// Point-like charged body: a signed charge magnitude plus the kind that
/// selects its force law
#[derive(Debug, Clone)]
pub struct ChargedBody {
    pub charge: f64,
    pub kind: ChargeKind,
    pub body: PointBody,
}

impl ChargedBody {
    pub fn new(charge: f64, kind: ChargeKind, body: PointBody) -> Self {
        Self { charge, kind, body }
    }

    /// Force this body exerts upon `target`
    ///
    /// Zero for cross-kind pairs and for coincident positions (degenerate
    /// geometry must never produce NaN). Like signs repel: the force on
    /// `target` points along `target.x - self.x` when the charge product
    /// is positive
    pub fn force_upon(&self, target: &ChargedBody) -> NVec3 {
        if self.kind != target.kind {
            return NVec3::zeros();
        }

        let disp = target.body.x - self.body.x;
        let r2 = disp.norm_squared();
        if r2 == 0.0 {
            return NVec3::zeros();
        }

        let force_mag = match self.kind {
            ChargeKind::Magnetic => {
                (PERMEABILITY * self.charge * target.charge) / (4.0 * PI * r2)
            }
            ChargeKind::Electric => COULOMB_CONST * self.charge * target.charge / r2,
        };

        force_mag * normalize_or_zero(disp)
    }
}

/// Trait for force sources operating on the charged-body registry
/// Implementations add their contribution into `out[slot]` per active body
pub trait ForceLaw {
    fn accumulate(&self, registry: &Registry, out: &mut [NVec3]);
}

/// Collection of force terms; contributions are summed into a single force
/// vector per registry slot
pub struct ForceSet {
    terms: Vec<Box<dyn ForceLaw + Send + Sync>>,
}

impl ForceSet {
    /// Create an empty force set
    pub fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Add a force term
    pub fn with(mut self, term: impl ForceLaw + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total forces for all registry slots
    /// `out` needs one entry per slot; inactive slots stay zero
    pub fn accumulate_forces(&self, registry: &Registry, out: &mut [NVec3]) {
        // Zero buffer
        for f in out.iter_mut() {
            *f = NVec3::zeros();
        }
        // Iterate over all force contributors
        for term in &self.terms {
            term.accumulate(registry, out);
        }
    }
}

/// Direct same-kind inverse-square interaction over all active bodies
///
/// O(n^2) per pass, summed in slot order so results are deterministic for
/// a fixed registry layout. Acceptable for the small interactive
/// populations this sandbox targets
pub struct InverseSquareForce;

impl ForceLaw for InverseSquareForce {
    fn accumulate(&self, registry: &Registry, out: &mut [NVec3]) {
        for (handle, body) in registry.iter_active() {
            // Total force on `body` from every active partner this tick
            let mut total = NVec3::zeros();
            for (_, other) in registry.iter_active_excluding(handle) {
                total += other.force_upon(body);
            }
            out[handle.index()] += total;
        }
    }
}
