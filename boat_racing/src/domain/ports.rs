use crate::domain::state::{Material, Passenger, VehicleId, VehicleKind};
use glam::DVec3;

// Port for reading vehicles and their riders from the host world.
pub trait VehicleWorld {
    type Vehicle: Copy;
    type Player: Copy;

    fn kind(&self, vehicle: Self::Vehicle) -> VehicleKind;
    fn identity(&self, vehicle: Self::Vehicle) -> VehicleId;
    fn location(&self, vehicle: Self::Vehicle) -> DVec3;
    fn facing(&self, vehicle: Self::Vehicle) -> DVec3;
    /// Passengers in seat order.
    fn passengers(&self, vehicle: Self::Vehicle) -> Vec<Passenger<Self::Player>>;
    /// Signed forward input of a rider, roughly in [-1, 1].
    fn forward_input(&self, player: Self::Player) -> f32;
}

// Port for terrain lookups.
pub trait TerrainQuery {
    /// Material of the block containing `point`.
    fn material_at(&self, point: DVec3) -> Material;
}

// Port for pushing a velocity onto a vehicle; the host integrates position and collisions.
pub trait VehicleMotion: VehicleWorld {
    fn set_velocity(&mut self, vehicle: Self::Vehicle, velocity: DVec3);
}

// Port for transient on-screen status lines. Fire-and-forget.
pub trait StatusChannel: VehicleWorld {
    fn send_status(&mut self, player: Self::Player, line: &str);
}
