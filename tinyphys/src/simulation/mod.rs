pub mod vector;
pub mod states;
pub mod forces;
pub mod integrator;
pub mod collision;
pub mod system;
pub mod coordinates;
pub mod utils;
pub mod params;
pub mod engine;
pub mod scenario;
