//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – integrator, threading, gravity and collision switches
//! - [`ParametersConfig`] – step size, gravitational constant, run length
//! - [`BodyConfig`]       – initial state for each body
//! - [`ForceConfig`]      – extra forces attached to bodies by index
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! A spring pendulum matching these types:
//!
//! ```yaml
//! engine:
//!   integrator: "verlet"    # or "euler"
//!   gravity: false          # wire mutual gravity between all bodies
//!   collisions: false       # elastic collisions (Euler path only)
//!   threads: 2              # optional, chunked threaded update
//!   gravity_toward:         # optional, one-way gravity by body kind
//!     affected: ship
//!     attractors: planet
//!
//! parameters:
//!   dt: 0.1                 # fixed step size
//!   G: 6.67                 # gravitational constant (optional)
//!   steps: 500              # steps for a headless run
//!
//! bodies:
//!   - x: [ 400.0, 250.0 ]
//!     v: [ 0.0, 0.0 ]       # optional
//!     m: 10.0
//!     label: ball
//!   - x: [ 500.0, 250.0 ]
//!     m: 1.0
//!     label: anchor
//!
//! forces:
//!   - kind: constant
//!     body: 0
//!     x: 0.0
//!     y: 98.1
//!   - kind: elastic
//!     body: 0
//!     target: 1
//!     rest_length: 90.0
//!     k: 10.0
//!   - kind: friction
//!     body: 0
//!     k: 0.01
//!     power: 1.0
//! ```
//!
//! The engine then maps this configuration into its runtime `Scenario`.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::simulation::forces::G;
use crate::simulation::integrator::Integrator;

fn default_g() -> f64 {
    G
}

fn default_power() -> f64 {
    1.0
}

/// High-level engine configuration
#[derive(Deserialize, Debug, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub integrator: Integrator, // Time integrator used for advancing the system state
    pub threads: Option<usize>, // Some(n) - chunked threaded update over n chunks
    #[serde(default)]
    pub gravity: bool, // `true` - every pair of bodies attracts, wired once at build time
    #[serde(default)]
    pub collisions: bool, // `true` - elastic collisions after each Euler step
    pub gravity_toward: Option<GravityTowardConfig>, // one-way gravity between body kinds
}

/// Bodies of kind `affected` are pulled by bodies of kind `attractors`
#[derive(Deserialize, Debug, Clone)]
pub struct GravityTowardConfig {
    pub affected: String,
    pub attractors: String,
}

/// Global numerical and physical parameters for a scenario
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub dt: f64, // time step size
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub steps: usize, // default run length for the headless runner
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug)]
pub struct BodyConfig {
    pub x: Vec<f64>, // Initial position
    pub v: Option<Vec<f64>>, // Initial velocity
    pub prev: Option<Vec<f64>>, // Explicit Verlet previous position, wins over `v` for Verlet
    pub m: f64, // Mass of the body
    pub radius: Option<f64>, // Collision radius
    #[serde(default)]
    pub omega: f64, // Angular velocity
    pub label: Option<String>, // Opaque id carried into the text export
    pub kind: Option<String>, // Category used by `gravity_toward`
}

/// A force attached to `body` (an index into `bodies`)
#[derive(Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ForceConfig {
    /// Fixed vector, static unless `dynamic` is set
    Constant {
        body: usize,
        x: f64,
        y: f64,
        #[serde(default)]
        lever_arm: f64,
        tag: Option<String>,
        #[serde(default)]
        dynamic: bool,
    },
    /// Velocity-power damping
    Friction {
        body: usize,
        k: f64,
        #[serde(default = "default_power")]
        power: f64,
    },
    /// Fixed-magnitude pull toward `target`
    Central { body: usize, target: usize, magnitude: f64 },
    /// One-way gravitational pull toward `target`
    Gravity { body: usize, target: usize },
    /// Hooke spring toward `target`
    Elastic {
        body: usize,
        target: usize,
        rest_length: f64,
        k: f64,
    },
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig, // Engine-level configuration
    pub parameters: ParametersConfig, // Global numerical and physical parameters
    pub bodies: Vec<BodyConfig>, // Initial state of every body
    #[serde(default)]
    pub forces: Vec<ForceConfig>, // Forces beyond the engine-level gravity wiring
}

impl ScenarioConfig {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let cfg = serde_yaml::from_reader(reader)?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("opening scenario {}", path.display()))?;
        Self::from_reader(BufReader::new(file)).with_context(|| format!("parsing scenario {}", path.display()))
    }
}
