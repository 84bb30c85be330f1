pub mod error;
pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::states::{NVec3, ClosestPair, FieldScan};
pub use simulation::params::{FieldParams, MIN_FIELD_STRENGTH, MAX_FIELD_STRENGTH};
pub use simulation::engine::{Engine, ExecutionResource};
pub use simulation::forces::{magnet_force, try_magnet_force, scan_field, displacement};
pub use simulation::polarity::polarity_weights;
pub use simulation::deformer::{deform, bbox_center, Deformation, MagnetDeformer};
pub use simulation::scenario::{Scenario, FrameReport};

pub use configuration::config::{EngineConfig, FieldConfig, PointSetConfig, ScenarioConfig};

pub use benchmark::benchmark::{bench_kernel, bench_kernel_curve};
