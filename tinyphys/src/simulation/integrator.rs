//! Fixed-step time integrators for a single body
//!
//! Provides explicit Euler and position Verlet. Both read the acceleration
//! left by `apply_newton_second_law`, so a full step is always
//! "forces -> acceleration -> integrate -> rotate". `System` splits that
//! sequence into two phases across all bodies; `Body::tick` runs it for a
//! lone body.

use serde::Deserialize;

use super::states::{Body, BodyLookup};

/// Which integrator advances positions
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Integrator {
    /// Position Verlet. Far better energy behaviour for orbits and springs
    #[default]
    #[serde(rename = "verlet")]
    Verlet,

    /// Explicit Euler, first order, drifts in energy
    #[serde(rename = "euler")]
    Euler,
}

impl Body {
    /// v += dt * a, then x += dt * v
    pub fn euler_step(&mut self) {
        self.velocity += self.dt * self.acceleration;
        self.position += self.dt * self.velocity;
    }

    /// x_n+1 = 2 x_n - x_n-1 + a dt^2
    ///
    /// Velocity is re-estimated as (x_n+1 - x_n) / dt afterwards, only so that
    /// velocity-dependent forces have something to read. It lags the true
    /// Verlet velocity by half a step.
    pub fn verlet_step(&mut self) {
        let new_position = 2.0 * self.position - self.prev_position + self.acceleration * self.dt_squared;
        self.prev_position = self.position;
        self.position = new_position;
        self.velocity = (self.position - self.prev_position) / self.dt;
    }

    /// Kinematic rotation, angle += dt * omega (torque plays no part)
    pub fn rotate(&mut self) {
        self.angle += self.dt * self.angular_velocity;
    }

    /// Integrate with an already-computed acceleration, then rotate
    pub fn advance(&mut self, integrator: Integrator) {
        match integrator {
            Integrator::Verlet => self.verlet_step(),
            Integrator::Euler => self.euler_step(),
        }
        self.rotate();
    }

    /// One full Verlet step for a body whose partners live in `world`
    pub fn tick<W>(&mut self, world: &W)
    where
        W: BodyLookup + ?Sized,
    {
        self.apply_newton_second_law(world);
        self.advance(Integrator::Verlet);
    }

    /// One full Euler step for a body whose partners live in `world`
    pub fn tick_euler<W>(&mut self, world: &W)
    where
        W: BodyLookup + ?Sized,
    {
        self.apply_newton_second_law(world);
        self.advance(Integrator::Euler);
    }
}
