//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::{
    error::{Error, Result},
    timer::{FocusTimerEngine, PhaseChange, TickOutcome, TimerConfiguration, TimerSnapshot},
};

/// Main application state owning the timer engine.
///
/// All mutation goes through the engine mutex, so ticks and commands are
/// applied one at a time in arrival order.
#[derive(Debug)]
pub struct AppState {
    engine: Arc<Mutex<FocusTimerEngine>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Most recent failure of the phase change command
    pub last_notify_error: Arc<Mutex<Option<String>>>,
    /// Channel for snapshot updates after every mutation
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
    /// Channel for Focus<->Break transitions
    pub phase_change_tx: broadcast::Sender<PhaseChange>,
}

impl AppState {
    /// Create a new AppState with a paused engine built from `config`
    pub fn new(port: u16, host: String, config: TimerConfiguration) -> Self {
        let engine = FocusTimerEngine::new(config);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (phase_change_tx, _) = broadcast::channel(16);

        Self {
            engine: Arc::new(Mutex::new(engine)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            last_notify_error: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            phase_change_tx,
        }
    }

    /// Apply a mutation to the engine and publish the resulting snapshot
    fn with_engine<F, T>(&self, updater: F) -> Result<(T, TimerSnapshot)>
    where
        F: FnOnce(&mut FocusTimerEngine) -> T,
    {
        let mut engine = self
            .engine
            .lock()
            .map_err(|_| Error::LockPoisoned("timer engine"))?;

        let output = updater(&mut engine);
        let snapshot = engine.snapshot();

        // Publish before releasing the lock so snapshots arrive in mutation order.
        // send_replace never fails, even with no receivers left
        self.snapshot_tx.send_replace(snapshot.clone());
        drop(engine);

        Ok((output, snapshot))
    }

    /// Run a user command and record it as the last action
    fn command<F>(&self, action: &str, updater: F) -> Result<TimerSnapshot>
    where
        F: FnOnce(&mut FocusTimerEngine),
    {
        let (_, snapshot) = self.with_engine(updater)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        info!(
            "{}: {} phase at {} ({})",
            action,
            snapshot.phase,
            snapshot.display,
            if snapshot.is_running { "running" } else { "paused" }
        );
        Ok(snapshot)
    }

    pub fn start(&self) -> Result<TimerSnapshot> {
        self.command("start", |engine| engine.start())
    }

    pub fn pause(&self) -> Result<TimerSnapshot> {
        self.command("pause", |engine| engine.pause())
    }

    pub fn toggle(&self) -> Result<TimerSnapshot> {
        self.command("toggle", |engine| engine.toggle())
    }

    pub fn reset(&self) -> Result<TimerSnapshot> {
        self.command("reset", |engine| engine.reset())
    }

    pub fn increase_focus(&self) -> Result<TimerSnapshot> {
        self.command("focus-increase", |engine| {
            if !engine.increase_focus_duration() {
                debug!(
                    "Focus increase ignored in {} phase at {} minutes",
                    engine.phase(),
                    engine.focus_minutes()
                );
            }
        })
    }

    pub fn decrease_focus(&self) -> Result<TimerSnapshot> {
        self.command("focus-decrease", |engine| {
            if !engine.decrease_focus_duration() {
                debug!(
                    "Focus decrease ignored in {} phase at {} minutes",
                    engine.phase(),
                    engine.focus_minutes()
                );
            }
        })
    }

    /// Deliver one tick to the engine.
    ///
    /// Publishes the new snapshot and, when the tick ended a phase,
    /// broadcasts the transition to phase change listeners.
    pub fn tick(&self) -> Result<TickOutcome> {
        let (outcome, _) = self.with_engine(|engine| engine.tick())?;

        if let TickOutcome::PhaseChanged(change) = outcome {
            // No subscribers is fine; nobody is listening for notifications
            if self.phase_change_tx.send(change).is_err() {
                debug!("No phase change listeners for {} -> {}", change.from, change.to);
            }
        }

        Ok(outcome)
    }

    /// Get current timer snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot> {
        self.engine
            .lock()
            .map(|engine| engine.snapshot())
            .map_err(|_| Error::LockPoisoned("timer engine"))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe_snapshots(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Subscribe to Focus<->Break transitions
    pub fn subscribe_phase_changes(&self) -> broadcast::Receiver<PhaseChange> {
        self.phase_change_tx.subscribe()
    }

    /// Record the outcome of the latest phase change command
    pub fn set_notify_error(&self, error: Option<String>) {
        match self.last_notify_error.lock() {
            Ok(mut last) => *last = error,
            Err(e) => warn!("Failed to record notifier error: {}", e),
        }
    }

    pub fn get_notify_error(&self) -> Option<String> {
        self.last_notify_error.lock().ok().and_then(|e| e.clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Poison the engine mutex the way a panicking holder would
    #[cfg(test)]
    pub(crate) fn poison_engine(&self) {
        let engine = Arc::clone(&self.engine);
        let _ = std::thread::spawn(move || {
            let _guard = engine.lock();
            panic!("poisoning timer engine");
        })
        .join();
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
