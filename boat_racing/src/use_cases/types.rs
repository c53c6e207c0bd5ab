// Use-case level inputs/outputs for the world loop.

use crate::domain::{PlayerId, VehicleId, VehicleKind};
use glam::DVec3;

/// Rider controls as sampled by the host each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RiderInput {
    /// Signed forward input; positive accelerates, negative brakes.
    pub forward: f32,
    /// Signed steering input; positive turns right.
    pub turn: f32,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    /// Places a new vehicle; the host assigns its id.
    Spawn {
        kind: VehicleKind,
        position: DVec3,
        yaw: f64,
    },
    Mount { vehicle: VehicleId, player: PlayerId },
    Dismount { player: PlayerId },
    Input { player: PlayerId, input: RiderInput },
    /// The host unloaded or destroyed the vehicle.
    Despawn { vehicle: VehicleId },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoatSnapshot {
    pub id: VehicleId,
    pub position: DVec3,
    /// Controlled speed, zero when the boat is not under custom control.
    pub speed: f64,
}

#[derive(Debug, Clone)]
pub struct WorldUpdate {
    pub tick: u64,
    pub boats: Vec<BoatSnapshot>,
}
