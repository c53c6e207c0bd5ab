// In-memory host world: a sparse block grid plus vehicles and riders.
//
// Stands in for a game engine so the speed controller can be driven end to
// end without one. Coordinates follow the usual block-game convention: +Y is
// up, yaw 0 faces +Z and positive yaw turns towards -X.

use crate::domain::ports::{StatusChannel, TerrainQuery, VehicleMotion, VehicleWorld};
use crate::domain::{Material, Passenger, PlayerId, VehicleId, VehicleKind};
use crate::use_cases::{GameEvent, HostWorld, RiderInput};
use glam::{DVec3, IVec3};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// Velocity multiplier the host applies after each integration step.
pub const HOST_DRAG: f64 = 0.9;

/// Yaw change per tick at full steering input, in radians.
pub const TURN_RATE: f64 = 0.08;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Occupant {
    Player(PlayerId),
    Mob,
}

#[derive(Debug, Clone)]
struct SandboxVehicle {
    kind: VehicleKind,
    position: DVec3,
    yaw: f64,
    velocity: DVec3,
    occupants: Vec<Occupant>,
}

#[derive(Debug, Default)]
struct Rider {
    input: RiderInput,
    inbox: Vec<String>,
}

#[derive(Debug)]
pub struct SandboxWorld {
    blocks: HashMap<IVec3, Material>,
    background: Material,
    // Ordered so every tick dispatches vehicles in the same sequence.
    vehicles: BTreeMap<VehicleId, SandboxVehicle>,
    riders: HashMap<PlayerId, Rider>,
    next_id: u64,
}

impl SandboxWorld {
    /// Empty world where every unset block is `background`.
    pub fn new(background: Material) -> Self {
        Self {
            blocks: HashMap::new(),
            background,
            vehicles: BTreeMap::new(),
            riders: HashMap::new(),
            next_id: 1,
        }
    }

    /// Water world with a straight strip of blue ice along +Z at y = 63,
    /// `length` blocks long and five blocks wide, followed by a stone bank.
    pub fn ice_track(length: i32) -> Self {
        let mut world = Self::new(Material::Water);
        world.fill(IVec3::new(-2, 63, 0), IVec3::new(2, 63, length - 1), Material::BlueIce);
        world.fill(
            IVec3::new(-2, 63, length),
            IVec3::new(2, 63, length + 64),
            Material::Stone,
        );
        world
    }

    pub fn set_block(&mut self, at: IVec3, material: Material) {
        self.blocks.insert(at, material);
    }

    /// Fills the inclusive box between two corners.
    pub fn fill(&mut self, a: IVec3, b: IVec3, material: Material) {
        let (min, max) = (a.min(b), a.max(b));
        for x in min.x..=max.x {
            for y in min.y..=max.y {
                for z in min.z..=max.z {
                    self.blocks.insert(IVec3::new(x, y, z), material);
                }
            }
        }
    }

    pub fn spawn_vehicle(&mut self, kind: VehicleKind, position: DVec3, yaw: f64) -> VehicleId {
        let id = VehicleId(self.allocate_id());
        self.vehicles.insert(
            id,
            SandboxVehicle {
                kind,
                position,
                yaw,
                velocity: DVec3::ZERO,
                occupants: Vec::new(),
            },
        );
        id
    }

    pub fn add_player(&mut self) -> PlayerId {
        let id = PlayerId(self.allocate_id());
        self.riders.insert(id, Rider::default());
        id
    }

    /// Seats a non-player passenger in the next free seat.
    pub fn seat_mob(&mut self, vehicle: VehicleId) {
        if let Some(v) = self.vehicles.get_mut(&vehicle) {
            v.occupants.push(Occupant::Mob);
        }
    }

    pub fn mount(&mut self, vehicle: VehicleId, player: PlayerId) {
        if !self.riders.contains_key(&player) {
            warn!(%player, "mount from unknown player ignored");
            return;
        }
        self.dismount(player);
        match self.vehicles.get_mut(&vehicle) {
            Some(v) => v.occupants.push(Occupant::Player(player)),
            None => warn!(%vehicle, %player, "mount onto unknown vehicle ignored"),
        }
    }

    pub fn dismount(&mut self, player: PlayerId) {
        for v in self.vehicles.values_mut() {
            v.occupants.retain(|o| *o != Occupant::Player(player));
        }
    }

    pub fn set_input(&mut self, player: PlayerId, input: RiderInput) {
        if let Some(rider) = self.riders.get_mut(&player) {
            rider.input = input;
        }
    }

    pub fn despawn(&mut self, vehicle: VehicleId) -> bool {
        self.vehicles.remove(&vehicle).is_some()
    }

    pub fn position(&self, vehicle: VehicleId) -> Option<DVec3> {
        self.vehicles.get(&vehicle).map(|v| v.position)
    }

    pub fn velocity(&self, vehicle: VehicleId) -> Option<DVec3> {
        self.vehicles.get(&vehicle).map(|v| v.velocity)
    }

    /// Status lines delivered to a player so far, oldest first.
    pub fn statuses(&self, player: PlayerId) -> &[String] {
        self.riders
            .get(&player)
            .map(|r| r.inbox.as_slice())
            .unwrap_or(&[])
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl VehicleWorld for SandboxWorld {
    type Vehicle = VehicleId;
    type Player = PlayerId;

    fn kind(&self, vehicle: VehicleId) -> VehicleKind {
        // Stale handles never count as boats.
        self.vehicles
            .get(&vehicle)
            .map(|v| v.kind)
            .unwrap_or(VehicleKind::Minecart)
    }

    fn identity(&self, vehicle: VehicleId) -> VehicleId {
        vehicle
    }

    fn location(&self, vehicle: VehicleId) -> DVec3 {
        self.position(vehicle).unwrap_or(DVec3::ZERO)
    }

    fn facing(&self, vehicle: VehicleId) -> DVec3 {
        self.vehicles
            .get(&vehicle)
            .map(|v| DVec3::new(-v.yaw.sin(), 0.0, v.yaw.cos()))
            .unwrap_or(DVec3::ZERO)
    }

    fn passengers(&self, vehicle: VehicleId) -> Vec<Passenger<PlayerId>> {
        self.vehicles
            .get(&vehicle)
            .map(|v| {
                v.occupants
                    .iter()
                    .map(|o| match o {
                        Occupant::Player(p) => Passenger::Player(*p),
                        Occupant::Mob => Passenger::Other,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn forward_input(&self, player: PlayerId) -> f32 {
        self.riders.get(&player).map(|r| r.input.forward).unwrap_or(0.0)
    }
}

impl TerrainQuery for SandboxWorld {
    fn material_at(&self, point: DVec3) -> Material {
        let cell = point.floor().as_ivec3();
        self.blocks.get(&cell).copied().unwrap_or(self.background)
    }
}

impl VehicleMotion for SandboxWorld {
    fn set_velocity(&mut self, vehicle: VehicleId, velocity: DVec3) {
        if let Some(v) = self.vehicles.get_mut(&vehicle) {
            v.velocity = velocity;
        }
    }
}

impl StatusChannel for SandboxWorld {
    fn send_status(&mut self, player: PlayerId, line: &str) {
        if let Some(rider) = self.riders.get_mut(&player) {
            rider.inbox.push(line.to_string());
        }
    }
}

impl HostWorld for SandboxWorld {
    fn updated_vehicles(&self) -> Vec<VehicleId> {
        self.vehicles.keys().copied().collect()
    }

    fn apply_event(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::Spawn {
                kind,
                position,
                yaw,
            } => {
                self.spawn_vehicle(kind, position, yaw);
            }
            GameEvent::Mount { vehicle, player } => self.mount(vehicle, player),
            GameEvent::Dismount { player } => self.dismount(player),
            GameEvent::Input { player, input } => self.set_input(player, input),
            GameEvent::Despawn { vehicle } => {
                self.despawn(vehicle);
            }
        }
    }

    fn integrate(&mut self) {
        for v in self.vehicles.values_mut() {
            // Steering belongs to the host; the speed model only reads the facing.
            if let Some(Occupant::Player(p)) = v.occupants.first() {
                if let Some(rider) = self.riders.get(p) {
                    v.yaw += f64::from(rider.input.turn) * TURN_RATE;
                }
            }
            v.position += v.velocity;
            v.velocity *= HOST_DRAG;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_point_is_inside_a_set_block_then_its_material_is_returned() {
        let mut world = SandboxWorld::new(Material::Water);
        world.set_block(IVec3::new(0, 63, -1), Material::PackedIce);

        assert_eq!(world.material_at(DVec3::new(0.7, 63.8, -0.2)), Material::PackedIce);
        assert_eq!(world.material_at(DVec3::new(0.7, 63.8, 0.2)), Material::Water);
    }

    #[test]
    fn when_yaw_is_zero_then_boat_faces_positive_z() {
        let mut world = SandboxWorld::new(Material::Water);
        let boat = world.spawn_vehicle(VehicleKind::Boat, DVec3::ZERO, 0.0);

        assert_eq!(world.facing(boat), DVec3::new(-0.0, 0.0, 1.0));
    }

    #[test]
    fn when_player_mounts_another_boat_then_previous_seat_is_freed() {
        let mut world = SandboxWorld::new(Material::Water);
        let first = world.spawn_vehicle(VehicleKind::Boat, DVec3::ZERO, 0.0);
        let second = world.spawn_vehicle(VehicleKind::Boat, DVec3::X, 0.0);
        let player = world.add_player();

        world.mount(first, player);
        world.mount(second, player);

        assert!(world.passengers(first).is_empty());
        assert_eq!(world.passengers(second), vec![Passenger::Player(player)]);
    }

    #[test]
    fn when_rider_steers_then_facing_turns_and_unridden_boats_keep_theirs() {
        let mut world = SandboxWorld::new(Material::Water);
        let ridden = world.spawn_vehicle(VehicleKind::Boat, DVec3::ZERO, 0.0);
        let empty = world.spawn_vehicle(VehicleKind::Boat, DVec3::X, 0.0);
        let player = world.add_player();
        world.mount(ridden, player);
        world.set_input(
            player,
            RiderInput {
                forward: 0.0,
                turn: 1.0,
            },
        );

        world.integrate();

        let facing = world.facing(ridden);
        assert!((facing.x + TURN_RATE.sin()).abs() < 1e-12);
        assert!((facing.z - TURN_RATE.cos()).abs() < 1e-12);
        assert_eq!(world.facing(empty), DVec3::new(-0.0, 0.0, 1.0));
    }

    #[test]
    fn when_spawn_event_is_applied_then_a_new_vehicle_is_reported() {
        let mut world = SandboxWorld::new(Material::Water);

        world.apply_event(&GameEvent::Spawn {
            kind: VehicleKind::Boat,
            position: DVec3::new(1.0, 64.0, 2.0),
            yaw: 0.0,
        });

        let vehicles = world.updated_vehicles();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(world.kind(vehicles[0]), VehicleKind::Boat);
        assert_eq!(world.position(vehicles[0]), Some(DVec3::new(1.0, 64.0, 2.0)));
    }

    #[test]
    fn when_integrating_then_position_advances_and_host_drag_applies() {
        let mut world = SandboxWorld::new(Material::Water);
        let boat = world.spawn_vehicle(VehicleKind::Boat, DVec3::ZERO, 0.0);
        world.set_velocity(boat, DVec3::new(0.0, 0.0, 1.0));

        world.integrate();

        assert_eq!(world.position(boat), Some(DVec3::new(0.0, 0.0, 1.0)));
        assert_eq!(world.velocity(boat), Some(DVec3::new(0.0, 0.0, 0.9)));
    }
}
