//! Orchestration of a set of bodies
//!
//! Every tick runs in two phases over all bodies:
//! 1. freeze a [`Snapshot`] of every body, then compute each body's
//!    acceleration from it (forces only ever read the snapshot)
//! 2. integrate every body with its own acceleration
//!
//! The threaded path runs each phase across contiguous chunks of bodies on
//! the rayon pool, with the end of the first scope as the barrier. Both paths
//! produce identical results.
//!
//! Gravity is wired once by [`System::setup_gravity`]. Bodies added
//! afterwards feel no gravity and exert none until the caller wires them.

use std::ops::Range;

use log::{debug, trace};

use crate::error::PhysicsError;
use crate::simulation::collision;
use crate::simulation::coordinates::Coordinate;
use crate::simulation::forces::{Force, G};
use crate::simulation::integrator::Integrator;
use crate::simulation::states::{Body, BodyId, BodyState, Snapshot};
use crate::simulation::utils::split_ranges;
use crate::simulation::vector::NVec2;

/// Mass-weighted mean position of a set of bodies
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CenterOfMass {
    pub position: NVec2,
    pub total_mass: f64,
}

/// Center of mass of any set of bodies; all zeros for an empty set
pub fn center_of_mass<'a, I>(bodies: I) -> CenterOfMass
where
    I: IntoIterator<Item = &'a Body>,
{
    let mut total_mass = 0.0;
    let mut weighted = NVec2::zeros();
    for b in bodies {
        total_mass += b.mass();
        weighted += b.mass() * b.position;
    }

    if total_mass == 0.0 {
        return CenterOfMass::default();
    }
    CenterOfMass {
        position: weighted / total_mass,
        total_mass,
    }
}

/// A collection of bodies advanced together
#[allow(non_snake_case)]
#[derive(Debug)]
pub struct System {
    bodies: Vec<Body>, // insertion order, kept only for reproducible iteration
    pub t: f64, // time
    dt: f64, // shared timestep
    pub G: f64, // gravitational constant used by setup_gravity
    pub gravity_enabled: bool,
    pub collisions_enabled: bool,
    threads: usize, // 0 = not split for threading
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

impl System {
    pub const DEFAULT_TIMESTEP: f64 = 0.1;

    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            t: 0.0,
            dt: Self::DEFAULT_TIMESTEP,
            G,
            gravity_enabled: false,
            collisions_enabled: false,
            threads: 0,
        }
    }

    // =========================================================================================
    // Membership
    // =========================================================================================

    pub fn add(&mut self, body: Body) -> BodyId {
        let id = body.id();
        self.bodies.push(body);
        id
    }

    /// Remove a body by identity; `None` if it is not a member
    ///
    /// Forces on other bodies that name the removed body keep their last value.
    pub fn remove(&mut self, id: BodyId) -> Option<Body> {
        let pos = self.bodies.iter().position(|b| b.id() == id)?;
        Some(self.bodies.remove(pos))
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id() == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id() == id)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Body> {
        self.bodies.iter_mut()
    }

    pub fn ids(&self) -> Vec<BodyId> {
        self.bodies.iter().map(Body::id).collect()
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn select_by_label(&self, label: &str) -> Vec<&Body> {
        self.bodies
            .iter()
            .filter(|b| b.label.as_deref() == Some(label))
            .collect()
    }

    pub fn select_by_kind(&self, kind: &str) -> Vec<&Body> {
        self.bodies
            .iter()
            .filter(|b| b.kind.as_deref() == Some(kind))
            .collect()
    }

    /// Ids of every member of `kind`, in insertion order, for directed gravity wiring
    pub fn ids_of_kind(&self, kind: &str) -> Vec<BodyId> {
        self.select_by_kind(kind).into_iter().map(Body::id).collect()
    }

    pub fn distance(&self, a: BodyId, b: BodyId) -> Option<f64> {
        Some(self.get(a)?.distance(self.get(b)?))
    }

    pub fn timestep(&self) -> f64 {
        self.dt
    }

    /// Set the shared timestep and push it to every current member
    pub fn set_timestep(&mut self, dt: f64) {
        self.dt = dt;
        for b in self.bodies.iter_mut() {
            b.set_timestep(dt);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.bodies)
    }

    pub fn center_of_mass(&self) -> CenterOfMass {
        center_of_mass(&self.bodies)
    }

    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.bodies.iter().map(Coordinate::from).collect()
    }

    // =========================================================================================
    // Gravity wiring
    // =========================================================================================

    /// Register reciprocal gravitational forces for every unordered pair of current members
    ///
    /// n bodies get n(n-1) dynamic forces, n-1 each, and every tick after this
    /// re-evaluates all of them. One-shot: later members are not wired.
    pub fn setup_gravity(&mut self) -> usize {
        self.gravity_enabled = true;

        let g = self.G;
        let states: Vec<BodyState> = self.bodies.iter().map(Body::state).collect();
        let n = states.len();
        let mut created = 0;

        for i in 0..n {
            for j in (i + 1)..n {
                self.bodies[i].add_force(Force::gravitational(&states[i], &states[j], g), true);
                self.bodies[j].add_force(Force::gravitational(&states[j], &states[i], g), true);
                created += 2;
            }
        }

        debug!("setup_gravity: {} bodies, {} gravitational forces", n, created);
        created
    }

    /// One-way gravity: every body in `affected` is pulled by every body in `attractors`
    ///
    /// Unknown ids and self-pairs are skipped. Attractors feel nothing back.
    pub fn setup_gravity_directed(&mut self, affected: &[BodyId], attractors: &[BodyId]) -> usize {
        self.gravity_enabled = true;

        let g = self.G;
        let sources: Vec<BodyState> = attractors
            .iter()
            .filter_map(|&id| self.get(id).map(Body::state))
            .collect();
        let mut created = 0;

        for &id in affected {
            let Some(body) = self.get_mut(id) else {
                continue;
            };
            let own = body.state();
            for source in sources.iter().filter(|s| s.id != id) {
                body.add_force(Force::gravitational(&own, source, g), true);
                created += 1;
            }
        }

        debug!("setup_gravity_directed: {} gravitational forces", created);
        created
    }

    // =========================================================================================
    // Collisions
    // =========================================================================================

    /// Every unordered pair whose centers are closer than the sum of their radii
    pub fn check_collisions(&self) -> Vec<(BodyId, BodyId)> {
        collision::colliding_pairs(&self.bodies)
            .into_iter()
            .map(|(i, j)| (self.bodies[i].id(), self.bodies[j].id()))
            .collect()
    }

    /// Elastic response for every colliding pair; returns the pair count
    pub fn apply_collisions(&mut self) -> usize {
        collision::apply_collisions(&mut self.bodies)
    }

    // =========================================================================================
    // Sequential update
    // =========================================================================================

    fn step(&mut self, integrator: Integrator) {
        let snapshot = Snapshot::capture(&self.bodies);
        for b in self.bodies.iter_mut() {
            b.apply_newton_second_law(&snapshot);
        }
        for b in self.bodies.iter_mut() {
            b.advance(integrator);
        }
        self.t += self.dt;
    }

    /// Advance every body one Verlet step. Collisions are not run on this path.
    pub fn update(&mut self) {
        self.step(Integrator::Verlet);
    }

    /// Advance every body one Euler step, then resolve collisions if enabled
    pub fn update_euler(&mut self) {
        self.step(Integrator::Euler);
        if self.collisions_enabled {
            self.apply_collisions();
        }
    }

    /// Dispatch on integrator, matching `update` / `update_euler`
    pub fn update_with(&mut self, integrator: Integrator) {
        match integrator {
            Integrator::Verlet => self.update(),
            Integrator::Euler => self.update_euler(),
        }
    }

    // =========================================================================================
    // Threaded update
    // =========================================================================================

    /// Use `threads` contiguous chunks for the threaded update
    pub fn split_for_threading(&mut self, threads: usize) -> Result<(), PhysicsError> {
        let ranges = split_ranges(self.bodies.len(), threads)?;
        debug!("split_for_threading: {} bodies into {} chunk(s)", self.bodies.len(), ranges.len());
        self.threads = threads;
        Ok(())
    }

    /// Chunk layout for the current membership, empty if never split
    pub fn chunk_ranges(&self) -> Vec<Range<usize>> {
        if self.threads == 0 {
            return Vec::new();
        }
        split_ranges(self.bodies.len(), self.threads).unwrap_or_default()
    }

    fn for_each_chunk<F>(bodies: &mut [Body], ranges: &[Range<usize>], f: F)
    where
        F: Fn(&mut Body) + Sync,
    {
        let mut chunks = Vec::with_capacity(ranges.len());
        let mut rest = bodies;
        for r in ranges {
            let (chunk, tail) = std::mem::take(&mut rest).split_at_mut(r.len());
            chunks.push(chunk);
            rest = tail;
        }

        let f = &f;
        rayon::scope(|s| {
            for chunk in chunks {
                s.spawn(move |_| {
                    for b in chunk.iter_mut() {
                        f(b);
                    }
                });
            }
        });
    }

    fn step_threaded(&mut self, integrator: Integrator) {
        let ranges = self.chunk_ranges();
        if ranges.is_empty() {
            // never split: same result on one thread
            self.step(integrator);
            return;
        }
        trace!("threaded step over {} chunk(s)", ranges.len());

        let snapshot = Snapshot::capture(&self.bodies);
        Self::for_each_chunk(&mut self.bodies, &ranges, |b| b.apply_newton_second_law(&snapshot));
        // every acceleration is final once the scope above has joined
        Self::for_each_chunk(&mut self.bodies, &ranges, |b| b.advance(integrator));
        self.t += self.dt;
    }

    /// Threaded counterpart of [`System::update`]
    ///
    /// Callers must not add or remove bodies while this is running; the
    /// borrow checker already enforces that for safe code.
    pub fn update_threaded(&mut self) {
        self.step_threaded(Integrator::Verlet);
    }

    /// Threaded counterpart of [`System::update_euler`]
    pub fn update_threaded_euler(&mut self) {
        self.step_threaded(Integrator::Euler);
        if self.collisions_enabled {
            self.apply_collisions();
        }
    }
}

impl<'a> IntoIterator for &'a System {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
