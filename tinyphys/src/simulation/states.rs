//! Core state types for the point-body engine
//!
//! - `Body` is the integrated point body: kinematic state, mass, collision
//!   radius, rotation and its two force lists
//! - `BodyState` is a read-only copy of what forces need from a body
//! - `BodyLookup` resolves a `BodyId` to a `BodyState`; dynamic forces read
//!   their partner bodies only through it
//! - `Snapshot` is the frozen, id-indexed set of states a system tick reads from

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::PhysicsError;
use crate::simulation::forces::Force;
use crate::simulation::vector::NVec2;

static NEXT_BODY_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique body identity, used by forces to name their partners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(u64);

impl BodyId {
    fn next() -> Self {
        BodyId(NEXT_BODY_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only view of a body at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyState {
    pub id: BodyId,
    pub position: NVec2,
    pub velocity: NVec2,
    pub mass: f64,
}

impl BodyState {
    pub fn distance_squared(&self, other: &BodyState) -> f64 {
        (other.position - self.position).norm_squared()
    }

    pub fn distance(&self, other: &BodyState) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Anything that can answer "where is body `id` right now"
pub trait BodyLookup {
    fn lookup(&self, id: BodyId) -> Option<BodyState>;
}

impl BodyLookup for [BodyState] {
    fn lookup(&self, id: BodyId) -> Option<BodyState> {
        self.iter().find(|s| s.id == id).copied()
    }
}

impl BodyLookup for [Body] {
    fn lookup(&self, id: BodyId) -> Option<BodyState> {
        self.iter().find(|b| b.id == id).map(Body::state)
    }
}

/// A lone partner body, e.g. the anchor of a spring
impl BodyLookup for Body {
    fn lookup(&self, id: BodyId) -> Option<BodyState> {
        (self.id == id).then(|| self.state())
    }
}

/// Frozen states of every body in a system at the start of a tick
///
/// Every force evaluated during the tick reads partner bodies from here, so
/// no body can observe another body's half-applied integration.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    states: Vec<BodyState>,
    index: HashMap<BodyId, usize>,
}

impl Snapshot {
    pub fn capture(bodies: &[Body]) -> Self {
        let states: Vec<BodyState> = bodies.iter().map(Body::state).collect();
        let index = states.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        Self { states, index }
    }

    pub fn states(&self) -> &[BodyState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl BodyLookup for Snapshot {
    fn lookup(&self, id: BodyId) -> Option<BodyState> {
        self.index.get(&id).map(|&i| self.states[i])
    }
}

/// A point body with mass, collision radius and kinematic rotation
///
/// Forces live in two lists: static forces are summed as-is every tick,
/// dynamic forces are recomputed from current body state before summing.
/// Integration steps live in [`crate::simulation::integrator`].
#[derive(Debug)]
pub struct Body {
    id: BodyId,
    pub label: Option<String>, // opaque id for the text export, never interpreted
    pub kind: Option<String>, // free-form category ("ship", "planet") for selection
    pub position: NVec2,
    pub velocity: NVec2,
    pub acceleration: NVec2,
    pub prev_position: NVec2, // Verlet history
    mass: f64,
    pub collision_radius: f64,
    pub angle: f64,
    pub angular_velocity: f64,
    pub(crate) dt: f64,
    pub(crate) dt_squared: f64,
    static_forces: Vec<Force>,
    dynamic_forces: Vec<Force>,
}

impl Body {
    pub const DEFAULT_TIMESTEP: f64 = 0.01;
    pub const DEFAULT_RADIUS: f64 = 1.0;

    /// Create a body at rest at `(x, y)`
    ///
    /// Rejects non-positive or non-finite mass; everything else about a body is
    /// allowed to go wrong silently.
    pub fn new(x: f64, y: f64, mass: f64) -> Result<Self, PhysicsError> {
        if !mass.is_finite() {
            return Err(PhysicsError::NonFiniteMass(mass));
        }
        if mass <= 0.0 {
            return Err(PhysicsError::NonPositiveMass(mass));
        }

        let position = NVec2::new(x, y);
        Ok(Self {
            id: BodyId::next(),
            label: None,
            kind: None,
            position,
            velocity: NVec2::zeros(),
            acceleration: NVec2::zeros(),
            prev_position: position,
            mass,
            collision_radius: Self::DEFAULT_RADIUS,
            angle: 0.0,
            angular_velocity: 0.0,
            dt: Self::DEFAULT_TIMESTEP,
            dt_squared: Self::DEFAULT_TIMESTEP * Self::DEFAULT_TIMESTEP,
            static_forces: Vec::new(),
            dynamic_forces: Vec::new(),
        })
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.collision_radius = radius;
        self
    }

    pub fn id(&self) -> BodyId {
        self.id
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn timestep(&self) -> f64 {
        self.dt
    }

    pub fn state(&self) -> BodyState {
        BodyState {
            id: self.id,
            position: self.position,
            velocity: self.velocity,
            mass: self.mass,
        }
    }

    pub fn set_position(&mut self, x: f64, y: f64) {
        self.position = NVec2::new(x, y);
    }

    pub fn set_velocity(&mut self, vx: f64, vy: f64) {
        self.velocity = NVec2::new(vx, vy);
    }

    pub fn set_acceleration(&mut self, ax: f64, ay: f64) {
        self.acceleration = NVec2::new(ax, ay);
    }

    pub fn set_prev_position(&mut self, x: f64, y: f64) {
        self.prev_position = NVec2::new(x, y);
    }

    /// Make the Verlet history agree with the current velocity
    ///
    /// Verlet ignores `velocity` as an input, so a velocity set directly on a
    /// body only takes effect on the Verlet path after this call.
    pub fn seed_verlet_history(&mut self) {
        self.prev_position = self.position - self.velocity * self.dt;
    }

    pub fn set_timestep(&mut self, dt: f64) {
        self.dt = dt;
        self.dt_squared = dt * dt;
    }

    pub fn distance_squared(&self, other: &Body) -> f64 {
        (other.position - self.position).norm_squared()
    }

    pub fn distance(&self, other: &Body) -> f64 {
        self.distance_squared(other).sqrt()
    }

    // =========================================================================================
    // Forces
    // =========================================================================================

    /// Attach a force; `dynamic` decides which list it joins and overrides the force's own flag
    pub fn add_force(&mut self, mut force: Force, dynamic: bool) {
        force.set_dynamic(dynamic);
        if dynamic {
            self.dynamic_forces.push(force);
        } else {
            self.static_forces.push(force);
        }
    }

    /// Attach a plain `(x, y)` force and hand it back for tagging
    pub fn add_force_xy(&mut self, x: f64, y: f64, dynamic: bool, lever_arm: f64) -> &mut Force {
        self.add_force(Force::new(x, y).with_lever_arm(lever_arm), dynamic);
        let list = if dynamic { &mut self.dynamic_forces } else { &mut self.static_forces };
        let last = list.len() - 1;
        &mut list[last]
    }

    /// Attach a fixed-magnitude central force pulling this body toward `target`
    pub fn add_central_force(&mut self, target: &BodyState, magnitude: f64) {
        let force = Force::central(&self.state(), target, magnitude);
        self.dynamic_forces.push(force);
    }

    /// Drop every force carrying `tag`, from both lists; returns how many went
    pub fn remove_forces_tagged(&mut self, tag: &str) -> usize {
        let before = self.static_forces.len() + self.dynamic_forces.len();
        self.static_forces.retain(|f| f.tag() != Some(tag));
        self.dynamic_forces.retain(|f| f.tag() != Some(tag));
        before - self.static_forces.len() - self.dynamic_forces.len()
    }

    pub fn static_forces(&self) -> &[Force] {
        &self.static_forces
    }

    pub fn dynamic_forces(&self) -> &[Force] {
        &self.dynamic_forces
    }

    /// Sum of `magnitude * lever_arm` over every attached force. Read-only; rotation ignores it.
    pub fn total_torque(&self) -> f64 {
        self.static_forces
            .iter()
            .chain(self.dynamic_forces.iter())
            .map(Force::torque)
            .sum()
    }

    /// Net force this tick: static forces as stored, dynamic forces refreshed first
    ///
    /// Partners of dynamic forces are resolved through `world`; this body's own
    /// state is always taken from `self`.
    pub fn sum_forces<W>(&mut self, world: &W) -> NVec2
    where
        W: BodyLookup + ?Sized,
    {
        let own = self.state();
        let mut total = NVec2::zeros();

        for force in &self.static_forces {
            total += force.vector();
        }
        for force in self.dynamic_forces.iter_mut() {
            total += force.update(&own, world);
        }
        total
    }

    /// a = F / m
    pub fn apply_newton_second_law<W>(&mut self, world: &W)
    where
        W: BodyLookup + ?Sized,
    {
        let net = self.sum_forces(world);
        self.acceleration = net / self.mass;
    }
}
