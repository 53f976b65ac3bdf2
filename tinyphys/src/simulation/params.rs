//! Numerical and physical parameters for a run
//!
//! `Parameters` holds runtime settings:
//! - fixed step size shared by every body,
//! - gravitational constant used when wiring gravity (`G`),
//! - number of steps a headless run advances

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub dt: f64, // step size
    pub G: f64, // gravitational constant
    pub steps: usize, // steps for a headless run
}
