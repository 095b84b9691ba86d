use std::sync::Arc;

use rand::Rng;
use tokio::sync::{watch, Mutex};
use tokio::time::{self, Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::dashboard::state::DashboardState;

use super::generator::next_reading;

// Set to false to silence per-tick logging in this module
const ENABLE_LOGS: bool = true;

use crate::{log_debug, log_info};

/// Drive the random walk until `cancel_token` fires.
///
/// The first reading lands one full period after start. Each tick re-checks the session
/// under the lock, so a tick that races a disconnect produces nothing.
pub async fn generator_loop<R>(
    state: Arc<Mutex<DashboardState>>,
    updates: Arc<watch::Sender<u64>>,
    tick_interval: Duration,
    mut rng: R,
    cancel_token: CancellationToken,
) where
    R: Rng + Send + 'static,
{
    let mut ticker = time::interval_at(Instant::now() + tick_interval, tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut ticks: u64 = 0;

    log_info!(
        "generator loop started (tick every {}ms)",
        tick_interval.as_millis()
    );

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                log_info!("generator loop shutting down after {} ticks", ticks);
                break;
            }
            _ = ticker.tick() => {
                let revision = {
                    let mut guard = state.lock().await;
                    if !guard.is_simulating() {
                        log_debug!("generator tick skipped: session no longer simulating");
                        continue;
                    }
                    let next = next_reading(&guard.reading(), &mut rng);
                    log_debug!(
                        "tick {}: mq3={:.1} mq4={:.1} mq8={:.1} mq135={:.1}",
                        ticks, next.mq3, next.mq4, next.mq8, next.mq135
                    );
                    guard.record(next)
                };

                ticks = ticks.wrapping_add(1);
                updates.send_replace(revision);
            }
        }
    }
}
