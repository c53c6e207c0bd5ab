// Per-vehicle speed state and the tick handler that drives it.

use crate::domain::ports::{StatusChannel, TerrainQuery, VehicleMotion};
use crate::domain::systems::ice_speed::{self, TickOutcome};
use crate::domain::{Passenger, SpeedTuning, StatusLine, SurfaceInputs, VehicleId, VehicleKind};
use glam::DVec3;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Offset from the vehicle origin to the block sampled for the surface check.
pub const SURFACE_PROBE: DVec3 = DVec3::new(0.0, -0.2, 0.0);

/// Owns the speed of every boat under custom control.
///
/// A vehicle has an entry only while its last computed speed was at or above
/// [`ice_speed::SPEED_EPSILON`]. Entries leave when the speed decays, when
/// the rider leaves, or when the host reports the vehicle gone via [`Self::forget`].
#[derive(Debug)]
pub struct SpeedController {
    tuning: SpeedTuning,
    speeds: HashMap<VehicleId, f64>,
}

impl SpeedController {
    pub fn new(tuning: SpeedTuning) -> Self {
        Self {
            tuning,
            speeds: HashMap::new(),
        }
    }

    /// Current speed of a vehicle, `None` when it is not under control.
    pub fn speed_of(&self, id: VehicleId) -> Option<f64> {
        self.speeds.get(&id).copied()
    }

    /// Number of vehicles currently under control.
    pub fn tracked(&self) -> usize {
        self.speeds.len()
    }

    /// Drops the entry of a vehicle the host has despawned or unloaded.
    pub fn forget(&mut self, id: VehicleId) -> bool {
        let removed = self.speeds.remove(&id).is_some();
        if removed {
            debug!(vehicle_id = %id, "speed state dropped on unload");
        }
        removed
    }

    /// Handles one host tick notification for `vehicle`.
    ///
    /// Returns the outcome when the speed model ran, `None` when the vehicle
    /// was ignored (not a boat) or released (no player at the helm).
    pub fn on_vehicle_tick<W>(&mut self, world: &mut W, vehicle: W::Vehicle) -> Option<TickOutcome>
    where
        W: VehicleMotion + StatusChannel + TerrainQuery,
    {
        if world.kind(vehicle) != VehicleKind::Boat {
            return None;
        }

        let id = world.identity(vehicle);
        let rider = match world.passengers(vehicle).first() {
            Some(Passenger::Player(player)) => *player,
            _ => {
                if self.speeds.remove(&id).is_some() {
                    debug!(vehicle_id = %id, "rider left, releasing boat");
                }
                return None;
            }
        };

        let below = world.location(vehicle) + SURFACE_PROBE;
        let inputs = SurfaceInputs {
            on_ice: world.material_at(below).is_ice(),
            impulse: world.forward_input(rider),
            facing: world.facing(vehicle),
        };

        let outcome = ice_speed::update(self.speeds.get(&id).copied(), inputs, &self.tuning);

        match outcome.speed {
            None => {
                if self.speeds.remove(&id).is_some() {
                    trace!(vehicle_id = %id, "boat stopped");
                }
            }
            Some(speed) => {
                self.speeds.insert(id, speed);
                if let Some(velocity) = outcome.velocity {
                    world.set_velocity(vehicle, velocity);
                }
            }
        }

        trace!(
            vehicle_id = %id,
            phase = %outcome.phase,
            speed = outcome.displayed_speed(),
            "boat ticked"
        );

        if self.tuning.debug {
            let line = StatusLine {
                phase: outcome.phase,
                speed: outcome.displayed_speed(),
                ceiling: outcome.ceiling,
            };
            world.send_status(rider, &line.to_string());
        }

        Some(outcome)
    }
}
