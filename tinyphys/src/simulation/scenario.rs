//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime `Scenario`
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - system state (`System` with bodies, forces and gravity wiring at t = 0)

use log::{debug, info};

use crate::configuration::config::{BodyConfig, ForceConfig, ScenarioConfig};
use crate::error::PhysicsError;
use crate::simulation::engine::Engine;
use crate::simulation::forces::Force;
use crate::simulation::integrator::Integrator;
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, BodyId, BodyState};
use crate::simulation::system::System;
use crate::simulation::vector::NVec2;

/// A ready-to-run simulation: settings plus the system they drive
#[derive(Debug)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
}

fn vec2(field: &'static str, v: &[f64]) -> Result<NVec2, PhysicsError> {
    match v {
        [x, y, ..] => Ok(NVec2::new(*x, *y)),
        _ => Err(PhysicsError::BadVector { field, len: v.len() }),
    }
}

fn build_body(bc: &BodyConfig) -> Result<Body, PhysicsError> {
    let x = vec2("x", &bc.x)?;
    let mut body = Body::new(x.x, x.y, bc.m)?;

    if let Some(v) = &bc.v {
        body.velocity = vec2("v", v)?;
    }
    if let Some(r) = bc.radius {
        body.collision_radius = r;
    }
    body.angular_velocity = bc.omega;
    body.label = bc.label.clone();
    body.kind = bc.kind.clone();
    Ok(body)
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, PhysicsError> {
        // Parameters (runtime) from ParametersConfig
        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            G: p_cfg.G,
            steps: p_cfg.steps,
        };

        // Engine (runtime) from EngineConfig
        let e_cfg = cfg.engine;
        let engine = Engine {
            integrator: e_cfg.integrator,
            threads: e_cfg.threads,
            gravity: e_cfg.gravity,
            collisions: e_cfg.collisions,
            gravity_toward: e_cfg.gravity_toward,
        };

        let mut system = System::new();
        system.G = parameters.G;
        system.collisions_enabled = engine.collisions;

        // Bodies: map `BodyConfig` -> runtime `Body`, keeping ids by config index
        let mut ids: Vec<BodyId> = Vec::with_capacity(cfg.bodies.len());
        for bc in &cfg.bodies {
            ids.push(system.add(build_body(bc)?));
        }
        system.set_timestep(parameters.dt);

        // Verlet reads velocity from the position history, so seed it
        for (body, bc) in system.iter_mut().zip(&cfg.bodies) {
            if let Some(prev) = &bc.prev {
                let p = vec2("prev", prev)?;
                body.set_prev_position(p.x, p.y);
            } else if engine.integrator == Integrator::Verlet && bc.v.is_some() {
                body.seed_verlet_history();
            }
        }

        for fc in &cfg.forces {
            attach_force(&mut system, &ids, fc, parameters.G)?;
        }

        if engine.gravity {
            system.setup_gravity();
        }
        if let Some(gt) = &engine.gravity_toward {
            let affected = system.ids_of_kind(&gt.affected);
            let attractors = system.ids_of_kind(&gt.attractors);
            let created = system.setup_gravity_directed(&affected, &attractors);
            debug!("gravity_toward {} -> {}: {} forces", gt.affected, gt.attractors, created);
        }
        if let Some(threads) = engine.threads {
            system.split_for_threading(threads)?;
        }

        info!(
            "built scenario: {} bodies, {} extra forces, integrator {:?}",
            system.len(),
            cfg.forces.len(),
            engine.integrator
        );

        Ok(Self {
            engine,
            parameters,
            system,
        })
    }

    /// Advance one tick with the configured integrator and dispatch
    pub fn step(&mut self) {
        match (self.engine.threads.is_some(), self.engine.integrator) {
            (false, integrator) => self.system.update_with(integrator),
            (true, Integrator::Verlet) => self.system.update_threaded(),
            (true, Integrator::Euler) => self.system.update_threaded_euler(),
        }
    }

    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
        debug!("ran {} steps, t = {}", steps, self.system.t);
    }
}

fn attach_force(system: &mut System, ids: &[BodyId], fc: &ForceConfig, g: f64) -> Result<(), PhysicsError> {
    let state = |i: usize| -> Result<BodyState, PhysicsError> {
        ids.get(i)
            .and_then(|&id| system.get(id))
            .map(Body::state)
            .ok_or(PhysicsError::UnknownBody(i))
    };

    let (body, force, dynamic) = match fc {
        ForceConfig::Constant { body, x, y, lever_arm, tag, dynamic } => {
            let mut force = Force::new(*x, *y).with_lever_arm(*lever_arm);
            if let Some(tag) = tag {
                force.set_tag(tag.clone());
            }
            (*body, force, *dynamic)
        }
        ForceConfig::Friction { body, k, power } => (*body, Force::friction(*k, *power), true),
        ForceConfig::Central { body, target, magnitude } => {
            (*body, Force::central(&state(*body)?, &state(*target)?, *magnitude), true)
        }
        ForceConfig::Gravity { body, target } => {
            (*body, Force::gravitational(&state(*body)?, &state(*target)?, g), true)
        }
        ForceConfig::Elastic { body, target, rest_length, k } => {
            (*body, Force::elastic(&state(*body)?, &state(*target)?, *rest_length, *k), true)
        }
    };

    let id = ids.get(body).copied().ok_or(PhysicsError::UnknownBody(body))?;
    if let Some(b) = system.get_mut(id) {
        b.add_force(force, dynamic);
    }
    Ok(())
}
