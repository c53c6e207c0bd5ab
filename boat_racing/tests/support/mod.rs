// Shared harness for driving the world loop over a sandbox world in tests.
#![allow(dead_code)]

use boat_racing::domain::SpeedTuning;
use boat_racing::interface_adapters::SandboxWorld;
use boat_racing::use_cases::{GameEvent, SpeedController, WorldUpdate, world_task};
use std::{sync::Arc, time::Duration};
use tokio::sync::{Notify, broadcast, mpsc};
use tokio::task::JoinHandle;

// Generous capacity so a briefly descheduled test never lags behind.
const UPDATE_CAPACITY: usize = 4096;

pub struct Harness {
    pub input_tx: mpsc::Sender<GameEvent>,
    pub world_rx: broadcast::Receiver<WorldUpdate>,
    shutdown: Arc<Notify>,
    handle: JoinHandle<(SandboxWorld, SpeedController)>,
}

impl Harness {
    // Queue events before the loop starts so they all apply on the first tick.
    pub fn start(world: SandboxWorld, tuning: SpeedTuning, initial: Vec<GameEvent>) -> Self {
        let (input_tx, input_rx) = mpsc::channel::<GameEvent>(1024);
        for event in initial {
            input_tx.try_send(event).expect("input channel has room");
        }
        let (world_tx, world_rx) = broadcast::channel::<WorldUpdate>(UPDATE_CAPACITY);
        let shutdown = Arc::new(Notify::new());
        let handle = tokio::spawn(world_task(
            world,
            SpeedController::new(tuning),
            input_rx,
            world_tx,
            Duration::from_millis(1),
            shutdown.clone(),
        ));
        Self {
            input_tx,
            world_rx,
            shutdown,
            handle,
        }
    }

    pub async fn next_update(&mut self) -> WorldUpdate {
        tokio::time::timeout(Duration::from_secs(5), self.world_rx.recv())
            .await
            .expect("world update within timeout")
            .expect("world loop still running")
    }

    // Receives updates until one satisfies `done`, failing after `max_ticks`.
    pub async fn until(
        &mut self,
        max_ticks: u64,
        mut done: impl FnMut(&WorldUpdate) -> bool,
    ) -> WorldUpdate {
        loop {
            let update = self.next_update().await;
            if done(&update) {
                return update;
            }
            assert!(update.tick < max_ticks, "condition not met by tick {max_ticks}");
        }
    }

    pub async fn send(&self, event: GameEvent) {
        self.input_tx.send(event).await.expect("world loop accepts events");
    }

    pub async fn stop(self) -> (SandboxWorld, SpeedController) {
        self.shutdown.notify_one();
        self.handle.await.expect("world loop exits cleanly")
    }
}
