//! High-level runtime engine settings
//!
//! Selects integrator, threaded dispatch, and which system-level
//! behaviours (gravity wiring, collisions) a `Scenario` turns on

use crate::configuration::config::GravityTowardConfig;
use crate::simulation::integrator::Integrator;

#[derive(Debug, Clone)]
pub struct Engine {
    pub integrator: Integrator, // verlet or euler
    pub threads: Option<usize>, // None = sequential update
    pub gravity: bool, // wire mutual gravity between every body at build time
    pub collisions: bool, // elastic collisions on the Euler path
    pub gravity_toward: Option<GravityTowardConfig>, // directed gravity by body kind
}
