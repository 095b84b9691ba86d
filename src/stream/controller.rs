use std::sync::Arc;

use anyhow::{bail, Context, Result};
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::dashboard::state::DashboardState;

use super::loop_worker::generator_loop;

/// Owns the single background generator task, if any.
pub struct StreamController {
    handle: Option<JoinHandle<()>>,
    cancel_token: Option<CancellationToken>,
    tick_interval: Duration,
    seed: Option<u64>,
    starts: u64,
}

impl StreamController {
    pub fn new(tick_interval: Duration, seed: Option<u64>) -> Self {
        Self {
            handle: None,
            cancel_token: None,
            tick_interval,
            seed,
            starts: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start(
        &mut self,
        state: Arc<Mutex<DashboardState>>,
        updates: Arc<watch::Sender<u64>>,
    ) -> Result<()> {
        if self.handle.is_some() {
            bail!("generator already running");
        }

        let rng = match self.seed {
            // a fixed seed replays the same walk for each run, offset per start
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(self.starts)),
            None => StdRng::from_entropy(),
        };
        self.starts = self.starts.wrapping_add(1);

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(generator_loop(
            state,
            updates,
            self.tick_interval,
            rng,
            cancel_token.clone(),
        ));

        info!("Simulated stream started");
        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        Ok(())
    }

    /// Cancel the generator and wait for it to exit. A no-op when nothing is running.
    pub async fn stop(&mut self) -> Result<()> {
        if let Some(token) = self.cancel_token.take() {
            token.cancel();
        }

        if let Some(handle) = self.handle.take() {
            handle
                .await
                .context("generator task failed to join")?;
            info!("Simulated stream stopped");
        }
        Ok(())
    }
}
