use super::speed_controller::SpeedController;
use super::types::{BoatSnapshot, GameEvent, WorldUpdate};
use crate::domain::VehicleKind;
use crate::domain::ports::{StatusChannel, TerrainQuery, VehicleMotion};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, broadcast, mpsc};
use tracing::{debug, info};

/// Host world driven by the fixed-step loop.
pub trait HostWorld: VehicleMotion + StatusChannel + TerrainQuery {
    /// Vehicles the host reports as updated this tick, in dispatch order.
    fn updated_vehicles(&self) -> Vec<Self::Vehicle>;

    /// Applies a queued rider or lifecycle event.
    fn apply_event(&mut self, event: &GameEvent);

    /// Advances positions by the current velocities.
    fn integrate(&mut self);
}

pub async fn world_task<W: HostWorld>(
    mut world: W,
    mut controller: SpeedController,
    mut input_rx: mpsc::Receiver<GameEvent>,
    world_tx: broadcast::Sender<WorldUpdate>,
    tick_interval: Duration,
    shutdown: Arc<Notify>,
) -> (W, SpeedController) {
    let mut tick: u64 = 0;

    // Drive the fixed-step loop at the configured tick rate.
    let mut interval = tokio::time::interval(tick_interval);

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                info!(tick, tracked = controller.tracked(), "world loop stopped");
                break;
            }
            _ = interval.tick() => {}
        }

        while let Ok(ev) = input_rx.try_recv() {
            match &ev {
                GameEvent::Spawn { kind, position, .. } => {
                    info!(?kind, ?position, "vehicle spawned");
                }
                GameEvent::Mount { vehicle, player } => {
                    info!(%vehicle, %player, "rider mounted");
                }
                GameEvent::Dismount { player } => {
                    info!(%player, "rider dismounted");
                }
                GameEvent::Input { .. } => {}
                GameEvent::Despawn { vehicle } => {
                    info!(%vehicle, "vehicle despawned");
                    controller.forget(*vehicle);
                }
            }
            world.apply_event(&ev);
        }

        // One notification per vehicle, strictly in sequence.
        for vehicle in world.updated_vehicles() {
            controller.on_vehicle_tick(&mut world, vehicle);
        }
        world.integrate();

        tick += 1;
        let boats: Vec<BoatSnapshot> = world
            .updated_vehicles()
            .into_iter()
            .filter(|v| world.kind(*v) == VehicleKind::Boat)
            .map(|v| {
                let id = world.identity(v);
                BoatSnapshot {
                    id,
                    position: world.location(v),
                    speed: controller.speed_of(id).unwrap_or(0.0),
                }
            })
            .collect();

        if world_tx.send(WorldUpdate { tick, boats }).is_err() {
            debug!(tick, "no world update subscribers");
        }
    }

    (world, controller)
}
