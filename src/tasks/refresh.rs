use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::select;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::engine::IndexingEngine;

/// Periodically rebuilds the index while the engine is active.
///
/// The scan itself is blocking IO and runs on the blocking pool, so it
/// proceeds in parallel with the rotation loop.
#[derive(Debug)]
pub struct RefreshLoop {
    engine: Arc<IndexingEngine>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl RefreshLoop {
    pub fn new(engine: Arc<IndexingEngine>, interval: Duration) -> Self {
        Self {
            engine,
            interval,
            shutdown: CancellationToken::new(),
        }
    }

    #[instrument(skip(self), fields(interval = ?self.interval))]
    pub async fn run(&self) -> Result<()> {
        let mut passes = 0u64;
        while !self.shutdown.is_cancelled() {
            if self.engine.is_active() {
                let engine = self.engine.clone();
                match tokio::task::spawn_blocking(move || engine.rebuild_index()).await {
                    Ok(report) => {
                        passes += 1;
                        debug!(?report, "refresh pass done");
                    }
                    Err(err) => warn!("refresh pass aborted: {err}"),
                }
            } else {
                debug!("engine inactive; skipping refresh");
            }

            select! {
                _ = self.shutdown.cancelled() => break,
                _ = sleep(self.interval) => {}
            }
        }
        info!(passes, "refresh loop stopped");
        Ok(())
    }

    /// Wake any pending wait and exit without another rebuild.
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }
}
