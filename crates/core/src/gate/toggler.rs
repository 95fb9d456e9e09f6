//! Periodic overload toggle.
//!
//! Flips the shared [`OverloadFlag`] on a fixed period for as long as it runs.
//! This stands in for a real admission-control signal; it does not look at
//! actual load.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::config::GateConfig;
use super::flag::OverloadFlag;

/// Callback invoked with the new flag value after every flip.
pub type ToggleCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Background task that flips the overload flag every `interval`.
pub struct OverloadToggler {
    flag: OverloadFlag,
    interval: Duration,
    on_toggle: Option<ToggleCallback>,

    // Runtime state
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl OverloadToggler {
    /// Create a toggler for `flag`. A zero interval is clamped to 1ms.
    pub fn new(flag: OverloadFlag, interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            flag,
            interval: interval.max(Duration::from_millis(1)),
            on_toggle: None,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            task: Mutex::new(None),
        }
    }

    pub fn from_config(flag: OverloadFlag, config: &GateConfig) -> Self {
        Self::new(flag, Duration::from_millis(config.toggle_interval_ms))
    }

    /// Register a callback run after each flip.
    pub fn with_toggle_callback(mut self, callback: ToggleCallback) -> Self {
        self.on_toggle = Some(callback);
        self
    }

    pub fn flag(&self) -> &OverloadFlag {
        &self.flag
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    /// Start flipping the flag. The first flip happens one interval from now.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Overload toggler already running");
            return;
        }

        info!(interval_ms = self.interval.as_millis() as u64, "Starting overload toggler");

        let handle = self.spawn_toggle_loop();
        *self.task.lock().await = Some(handle);
    }

    /// Stop the toggler and wait for its task to exit.
    ///
    /// The flag keeps whatever value it had at the time of the call.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            warn!("Overload toggler not running");
            return;
        }

        info!("Stopping overload toggler");

        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.task.lock().await.take() {
            if let Err(e) = handle.await {
                warn!("Overload toggler task ended abnormally: {}", e);
            }
        }

        info!("Overload toggler stopped");
    }

    fn spawn_toggle_loop(&self) -> JoinHandle<()> {
        let running = Arc::clone(&self.running);
        let flag = self.flag.clone();
        let on_toggle = self.on_toggle.clone();
        let interval = self.interval;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        let mut ticker = tokio::time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tokio::spawn(async move {
            debug!("Overload toggle loop started");
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!("Overload toggle loop received shutdown signal");
                        break;
                    }
                    _ = ticker.tick() => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        let overloaded = flag.toggle();
                        info!(overloaded, "Overload flag toggled");
                        if let Some(callback) = &on_toggle {
                            callback(overloaded);
                        }
                    }
                }
            }
            debug!("Overload toggle loop stopped");
        })
    }
}
