// Use cases layer: the speed controller and the loop that drives it.

pub mod game;
pub mod speed_controller;
pub mod types;

pub use game::{HostWorld, world_task};
pub use speed_controller::SpeedController;
pub use types::{BoatSnapshot, GameEvent, RiderInput, WorldUpdate};
