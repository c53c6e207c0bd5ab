// Domain layer: core speed model types and rules.

pub mod errors;
pub mod ports;
pub mod state;
pub mod systems;
pub mod tuning;

pub use errors::ConfigError;
pub use state::{
    Material, Passenger, PlayerId, SpeedPhase, StatusLine, SurfaceInputs, VehicleId, VehicleKind,
};
pub use tuning::SpeedTuning;
