pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::PhysicsError;

pub use simulation::vector::{NVec2, Planar};
pub use simulation::states::{Body, BodyId, BodyLookup, BodyState, Snapshot};
pub use simulation::forces::{CentralLaw, Force, ForceKind, G, MIN_DISTANCE_SQUARED};
pub use simulation::integrator::Integrator;
pub use simulation::system::{center_of_mass, CenterOfMass, System};
pub use simulation::coordinates::{coordinates_to_string, Coordinate};
pub use simulation::scenario::Scenario;

pub use configuration::config::{BodyConfig, EngineConfig, ForceConfig, GravityTowardConfig, ParametersConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_gravity, bench_threaded_curve};
