//! Force contributors for the point-body engine
//!
//! A [`Force`] is a vector plus bookkeeping (cached magnitude, lever arm,
//! dynamic flag, optional tag) wrapped around a closed set of force laws:
//! - `Constant`: fixed vector, never recomputed
//! - `Friction`: per-axis velocity-power damping of the owning body
//! - `Central`: directed from a source body toward a target body, with the
//!   magnitude given by a [`CentralLaw`] (fixed, inverse-square gravity, Hooke spring)
//!
//! Dynamic forces must be refreshed with [`Force::update`] before their vector
//! is read in a tick; a force that is not refreshed keeps last tick's value.

use crate::simulation::states::{BodyId, BodyLookup, BodyState};
use crate::simulation::vector::NVec2;

/// Gravitational constant in simulation units (not SI)
pub const G: f64 = 6.67;

/// Floor on squared separation for gravity, avoids the r -> 0 singularity
pub const MIN_DISTANCE_SQUARED: f64 = 1e-10;

/// Magnitude rule for a central force
///
/// Adding a central force law means adding a variant here and its arm in
/// [`CentralLaw::compute_magnitude`].
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CentralLaw {
    /// Magnitude is whatever was last set; only the direction tracks the bodies
    Fixed,
    /// G * m_source * m_target / d^2
    Gravitational { G: f64 },
    /// k * (d - rest_length); positive when stretched (pull), negative when compressed (push)
    Elastic { k: f64, rest_length: f64 },
}

impl CentralLaw {
    pub fn compute_magnitude(&self, source: &BodyState, target: &BodyState, current: f64) -> f64 {
        match *self {
            CentralLaw::Fixed => current,
            CentralLaw::Gravitational { G: g } => {
                let d2 = source.distance_squared(target).max(MIN_DISTANCE_SQUARED);
                g * source.mass * target.mass / d2
            }
            CentralLaw::Elastic { k, rest_length } => k * (source.distance(target) - rest_length),
        }
    }
}

/// Which law produces a force's vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ForceKind {
    Constant,
    Friction { k: f64, power: f64 },
    Central { source: BodyId, target: BodyId, law: CentralLaw },
}

/// A single force contribution attached to a body
#[derive(Debug, Clone, PartialEq)]
pub struct Force {
    vector: NVec2,
    magnitude: f64, // authoritative for torque and direction_between
    lever_arm: f64,
    dynamic: bool,
    tag: Option<String>,
    kind: ForceKind,
}

impl Force {
    /// Constant force `(x, y)`, static by default
    pub fn new(x: f64, y: f64) -> Self {
        let vector = NVec2::new(x, y);
        Self {
            vector,
            magnitude: vector.norm(),
            lever_arm: 0.0,
            dynamic: false,
            tag: None,
            kind: ForceKind::Constant,
        }
    }

    /// Damping `-k * sign(v) * |v|^power` on each axis of the owning body's velocity
    pub fn friction(k: f64, power: f64) -> Self {
        Self {
            vector: NVec2::zeros(),
            magnitude: 0.0,
            lever_arm: 0.0,
            dynamic: true,
            tag: None,
            kind: ForceKind::Friction { k, power },
        }
    }

    /// Fixed-magnitude force pointing from `source` toward `target`
    pub fn central(source: &BodyState, target: &BodyState, magnitude: f64) -> Self {
        Self::central_with(source, target, CentralLaw::Fixed, magnitude)
    }

    /// Newtonian attraction of `source` toward `target`
    pub fn gravitational(source: &BodyState, target: &BodyState, g: f64) -> Self {
        Self::central_with(source, target, CentralLaw::Gravitational { G: g }, 0.0)
    }

    /// Hooke spring between `source` and `target`
    pub fn elastic(source: &BodyState, target: &BodyState, rest_length: f64, k: f64) -> Self {
        Self::central_with(source, target, CentralLaw::Elastic { k, rest_length }, 0.0)
    }

    fn central_with(source: &BodyState, target: &BodyState, law: CentralLaw, magnitude: f64) -> Self {
        let mut force = Self {
            vector: NVec2::zeros(),
            magnitude,
            lever_arm: 0.0,
            dynamic: true,
            tag: None,
            kind: ForceKind::Central {
                source: source.id,
                target: target.id,
                law,
            },
        };
        force.refresh_central(source, target, law);
        force
    }

    pub fn with_lever_arm(mut self, lever_arm: f64) -> Self {
        self.lever_arm = lever_arm;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn set_tag(&mut self, tag: impl Into<String>) {
        self.tag = Some(tag.into());
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn vector(&self) -> NVec2 {
        self.vector
    }

    pub fn x(&self) -> f64 {
        self.vector.x
    }

    pub fn y(&self) -> f64 {
        self.vector.y
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    /// Change the stored magnitude; the vector follows on the next `direction_between`
    pub fn set_magnitude(&mut self, magnitude: f64) {
        self.magnitude = magnitude;
    }

    pub fn lever_arm(&self) -> f64 {
        self.lever_arm
    }

    pub fn is_dynamic(&self) -> bool {
        self.dynamic
    }

    pub fn set_dynamic(&mut self, dynamic: bool) {
        self.dynamic = dynamic;
    }

    pub fn kind(&self) -> &ForceKind {
        &self.kind
    }

    /// Point a central force at a different pair of bodies
    ///
    /// No-op for non-central forces.
    pub fn retarget(&mut self, source: BodyId, target: BodyId) {
        if let ForceKind::Central { law, .. } = self.kind {
            self.kind = ForceKind::Central { source, target, law };
        }
    }

    /// Zero the vector (magnitude untouched)
    pub fn reset(&mut self) {
        self.vector = NVec2::zeros();
    }

    pub fn torque(&self) -> f64 {
        self.magnitude * self.lever_arm
    }

    /// Rewrite the vector to have the stored magnitude and point from `a` to `b`
    ///
    /// Coincident points leave the vector as it was.
    pub fn direction_between(&mut self, a: NVec2, b: NVec2) {
        let d = b - a;
        let distance = d.norm();
        if distance > 0.0 {
            self.vector = d * (self.magnitude / distance);
        }
    }

    /// Recompute the vector from current body state and return it
    ///
    /// `own` is the body this force is attached to; partner bodies of central
    /// forces are resolved through `world` unless they are `own`. A partner
    /// that cannot be resolved leaves the force at its previous value.
    pub fn update<W>(&mut self, own: &BodyState, world: &W) -> NVec2
    where
        W: BodyLookup + ?Sized,
    {
        let kind = self.kind;
        match kind {
            ForceKind::Constant => {}
            ForceKind::Friction { k, power } => {
                self.vector = NVec2::new(
                    damping(own.velocity.x, k, power),
                    damping(own.velocity.y, k, power),
                );
                self.magnitude = self.vector.norm();
            }
            ForceKind::Central { source, target, law } => {
                let resolve = |id: BodyId| if id == own.id { Some(*own) } else { world.lookup(id) };
                if let (Some(s), Some(t)) = (resolve(source), resolve(target)) {
                    self.refresh_central(&s, &t, law);
                }
            }
        }
        self.vector
    }

    fn refresh_central(&mut self, source: &BodyState, target: &BodyState, law: CentralLaw) {
        self.magnitude = law.compute_magnitude(source, target, self.magnitude);
        self.direction_between(source.position, target.position);
    }
}

/// -k * sign(v) * |v|^power, zero at rest
fn damping(v: f64, k: f64, power: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        -k * v.signum() * v.abs().powf(power)
    }
}
