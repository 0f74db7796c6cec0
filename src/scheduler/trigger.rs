//! Periodic warm trigger
//!
//! Fires a warm cycle right away (unless disabled) and then on every
//! interval tick, and sweeps expired cache entries on a separate tick. Warm
//! cycles run in their own tasks so a slow scrape never delays the sweep or
//! shutdown; the warmer's in-flight guard keeps cycles from overlapping per
//! content type.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Notify, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::warmer::{CacheWarmer, WarmSummary};
use crate::cache::deadline_after;
use crate::config::CacheConfig;

/// Longest period either tick may use
pub const MAX_PERIOD: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Events emitted by the trigger loop
#[derive(Debug, Clone)]
pub enum WarmEvent {
    /// A warm cycle finished
    Completed {
        summary: WarmSummary,
        finished_at: DateTime<Utc>,
    },

    /// Expired entries were removed
    Swept { removed: usize },
}

/// Background loop driving the cache warmer
pub struct WarmScheduler {
    warmer: Arc<CacheWarmer>,
    warm_interval: Duration,
    sweep_interval: Duration,
    warm_on_startup: bool,
    event_sender: broadcast::Sender<WarmEvent>,
    is_running: Arc<RwLock<bool>>,
    stop_signal: Notify,
}

impl WarmScheduler {
    pub fn new(warmer: Arc<CacheWarmer>, config: &CacheConfig) -> Self {
        Self::with_intervals(
            warmer,
            config.warm_interval(),
            config.sweep_interval(),
            config.warm_on_startup,
        )
    }

    pub fn with_intervals(
        warmer: Arc<CacheWarmer>,
        warm_interval: Duration,
        sweep_interval: Duration,
        warm_on_startup: bool,
    ) -> Self {
        let (event_sender, _) = broadcast::channel(16);

        Self {
            warmer,
            warm_interval: warm_interval.min(MAX_PERIOD),
            sweep_interval: sweep_interval.min(MAX_PERIOD),
            warm_on_startup,
            event_sender,
            is_running: Arc::new(RwLock::new(false)),
            stop_signal: Notify::new(),
        }
    }

    /// Subscribe to trigger events
    pub fn subscribe(&self) -> broadcast::Receiver<WarmEvent> {
        self.event_sender.subscribe()
    }

    /// Run the loop on a background task
    pub fn spawn(self: Arc<Self>) -> JoinHandle<()> {
        tokio::spawn(async move { self.start().await })
    }

    /// Run the trigger loop until [`stop`](Self::stop) is called
    pub async fn start(&self) {
        *self.is_running.write().await = true;

        let now = Instant::now();
        let first_warm = if self.warm_on_startup {
            now
        } else {
            deadline_after(now, self.warm_interval)
        };

        let mut warm_tick = interval_at(first_warm, self.warm_interval);
        warm_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut sweep_tick = interval_at(
            deadline_after(now, self.sweep_interval),
            self.sweep_interval,
        );
        sweep_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(
            warm_interval_ms = self.warm_interval.as_millis() as u64,
            sweep_interval_secs = self.sweep_interval.as_secs(),
            warm_on_startup = self.warm_on_startup,
            "Warm scheduler started"
        );

        loop {
            tokio::select! {
                _ = warm_tick.tick() => {
                    self.spawn_warm_cycle();
                }
                _ = sweep_tick.tick() => {
                    let removed = self.warmer.cache().sweep_expired().await;
                    if removed > 0 {
                        let _ = self.event_sender.send(WarmEvent::Swept { removed });
                    }
                }
                _ = self.stop_signal.notified() => {
                    break;
                }
            }
        }

        *self.is_running.write().await = false;
        tracing::info!("Warm scheduler stopped");
    }

    /// Stop the trigger loop
    ///
    /// A warm cycle already running finishes on its own task.
    pub async fn stop(&self) {
        *self.is_running.write().await = false;
        self.stop_signal.notify_one();
    }

    /// Check if the loop is running
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    fn spawn_warm_cycle(&self) {
        let warmer = Arc::clone(&self.warmer);
        let sender = self.event_sender.clone();

        tokio::spawn(async move {
            let summary = warmer.warm_all().await;
            let _ = sender.send(WarmEvent::Completed {
                summary,
                finished_at: Utc::now(),
            });
        });
    }
}
