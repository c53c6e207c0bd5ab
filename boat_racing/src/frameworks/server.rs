// Framework bootstrap: logging, enable/disable lifecycle and the demo run.

use crate::domain::{PlayerId, SpeedTuning, VehicleId, VehicleKind};
use crate::frameworks::config;
use crate::interface_adapters::SandboxWorld;
use crate::use_cases::{GameEvent, RiderInput, SpeedController, WorldUpdate, world_task};

use glam::DVec3;
use std::{io::Result, path::Path, sync::Arc, time::Duration};
use tokio::sync::{Notify, broadcast, mpsc};

/// Length of the sandbox ice strip, in blocks.
const DEMO_TRACK_LENGTH: i32 = 150;

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

/// Loads tuning for the lifetime of the process.
///
/// Writes the default settings file when none exists. Unreadable or
/// malformed files fall back to the built-in defaults.
pub fn enable(path: &Path) -> SpeedTuning {
    match config::save_default_config(path) {
        Ok(true) => tracing::info!(path = %path.display(), "wrote default config"),
        Ok(false) => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "could not write default config"),
    }

    let tuning = config::load_tuning(path).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "using default tuning");
        SpeedTuning::default()
    });

    tracing::info!(
        max_ice_speed = tuning.max_ice_speed,
        max_off_ice_speed = tuning.max_off_ice_speed,
        acceleration = tuning.acceleration,
        "boat racing enabled"
    );
    if tuning.debug {
        tracing::warn!("debug status lines enabled");
    }
    tuning
}

pub fn disable() {
    tracing::info!("boat racing disabled");
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let tuning = enable(&config::config_path());
    let result = run_demo(tuning, config::tick_interval(), config::demo_ticks()).await;
    disable();
    result.map(|_| ())
}

/// Rides one boat down the sandbox ice track for `ticks` ticks: full throttle
/// for the first 60%, coasting until 80%, braking for the rest, then dismounts.
///
/// Returns the last world update observed.
pub async fn run_demo(
    tuning: SpeedTuning,
    tick_interval: Duration,
    ticks: u64,
) -> Result<Option<WorldUpdate>> {
    let mut world = SandboxWorld::ice_track(DEMO_TRACK_LENGTH);
    let boat = world.spawn_vehicle(VehicleKind::Boat, DVec3::new(0.5, 64.0, 0.5), 0.0);
    let player = world.add_player();

    // input_tx/rx: Rider and lifecycle events go to the single world task.
    let (input_tx, input_rx) = mpsc::channel::<GameEvent>(config::INPUT_CHANNEL_CAPACITY);
    // world_tx/rx: Per-tick snapshots of every boat.
    let (world_tx, world_rx) = broadcast::channel::<WorldUpdate>(config::WORLD_BROADCAST_CAPACITY);
    let shutdown = Arc::new(Notify::new());

    let world_loop = tokio::spawn(world_task(
        world,
        SpeedController::new(tuning),
        input_rx,
        world_tx,
        tick_interval,
        shutdown.clone(),
    ));

    input_tx
        .send(GameEvent::Mount {
            vehicle: boat,
            player,
        })
        .await
        .map_err(|e| std::io::Error::other(format!("world loop closed: {e}")))?;

    let last = pilot(input_tx, world_rx, boat, player, ticks).await;
    shutdown.notify_one();

    let (world, controller) = world_loop
        .await
        .map_err(|e| std::io::Error::other(format!("world loop failed: {e}")))?;

    tracing::info!(
        tracked = controller.tracked(),
        position = ?world.position(boat),
        "demo finished"
    );
    Ok(last)
}

async fn pilot(
    input_tx: mpsc::Sender<GameEvent>,
    mut world_rx: broadcast::Receiver<WorldUpdate>,
    boat: VehicleId,
    player: PlayerId,
    ticks: u64,
) -> Option<WorldUpdate> {
    let coast_from = ticks * 6 / 10;
    let brake_from = ticks * 8 / 10;
    let mut last = None;
    let mut dismounted_at: Option<u64> = None;

    loop {
        let update = match world_rx.recv().await {
            Ok(update) => update,
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!(missed = n, "pilot lagged behind world updates");
                continue;
            }
            Err(broadcast::error::RecvError::Closed) => break,
        };

        let forward = if update.tick < coast_from {
            1.0
        } else if update.tick < brake_from {
            0.0
        } else {
            -1.0
        };
        if let Some(snapshot) = update.boats.iter().find(|b| b.id == boat) {
            if update.tick % 20 == 0 {
                tracing::info!(
                    tick = update.tick,
                    speed = snapshot.speed,
                    z = snapshot.position.z,
                    "boat"
                );
            }
        }

        // Wait for the world loop to release the boat, bounded in case it never does.
        if let Some(at) = dismounted_at {
            let released = update.boats.iter().all(|b| b.id != boat || b.speed == 0.0);
            let give_up = update.tick >= at + 20;
            last = Some(update);
            if released || give_up {
                break;
            }
            continue;
        }
        let event = if update.tick >= ticks {
            dismounted_at = Some(update.tick);
            GameEvent::Dismount { player }
        } else {
            GameEvent::Input {
                player,
                input: RiderInput { forward, turn: 0.0 },
            }
        };
        last = Some(update);
        if input_tx.send(event).await.is_err() {
            break;
        }
    }

    last
}
