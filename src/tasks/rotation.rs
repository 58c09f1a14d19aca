use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use anyhow::Result;
use tokio::time::sleep;
use tracing::{debug, info, instrument};

use crate::engine::IndexingEngine;
use crate::publish::SnapshotPublisher;

/// Steps the engine's selection on a fixed interval and publishes after every
/// successful step.
///
/// Stopping is cooperative: [`stop`](Self::stop) is observed at the top of the
/// next iteration, after any in-flight sleep has finished. A stopped loop
/// cannot be restarted.
#[derive(Debug)]
pub struct RotationLoop {
    engine: Arc<IndexingEngine>,
    publisher: Arc<SnapshotPublisher>,
    interval: Duration,
    running: AtomicBool,
}

impl RotationLoop {
    pub fn new(
        engine: Arc<IndexingEngine>,
        publisher: Arc<SnapshotPublisher>,
        interval: Duration,
    ) -> Self {
        Self {
            engine,
            publisher,
            interval,
            running: AtomicBool::new(true),
        }
    }

    #[instrument(skip(self), fields(interval = ?self.interval))]
    pub async fn run(&self) -> Result<()> {
        let mut published = 0u64;
        while self.running.load(Ordering::SeqCst) {
            match self.engine.select_next() {
                Some(entry) => {
                    debug!(id = %entry.id, path = %entry.path.display(), "rotated");
                    self.publisher.publish_manifest();
                    self.publisher.publish_state();
                    published += 1;
                }
                None => debug!("cache empty; nothing to rotate"),
            }
            sleep(self.interval).await;
        }
        info!(published, "rotation loop stopped");
        Ok(())
    }

    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
