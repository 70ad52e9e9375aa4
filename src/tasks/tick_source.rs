//! Tick source background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{state::AppState, timer::TickOutcome};

/// Interval between two ticks delivered to the engine
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that owns the wall clock and ticks the engine while it runs.
///
/// Ticks stop as soon as a snapshot reports the engine paused, whether by a
/// user command or by the engine pausing itself at a phase boundary.
pub async fn tick_source_task(state: Arc<AppState>) {
    info!("Starting tick source task");

    let mut snapshots = state.subscribe_snapshots();

    loop {
        // Wait for the engine to be started
        let started = snapshots.wait_for(|snapshot| snapshot.is_running).await.map(|_| ());
        if started.is_err() {
            info!("Snapshot channel closed, stopping tick source");
            return;
        }

        debug!("Timer running, delivering ticks every {:?}", TICK_PERIOD);
        let mut interval = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    match state.tick() {
                        Ok(TickOutcome::Counted) => {}
                        Ok(TickOutcome::PhaseChanged(change)) => {
                            debug!("Tick ended {} phase, waiting for next start", change.from);
                            break;
                        }
                        Ok(TickOutcome::Idle) => {
                            debug!("Tick delivered to paused timer, stopping ticks");
                            break;
                        }
                        Err(e) => {
                            // A poisoned engine never recovers
                            error!("Failed to tick timer: {}, stopping tick source", e);
                            return;
                        }
                    }
                }

                // Pause or reset - cancel the tick stream
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        info!("Snapshot channel closed, stopping tick source");
                        return;
                    }
                    if !snapshots.borrow_and_update().is_running {
                        debug!("Timer paused, stopping ticks");
                        break;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerConfiguration;

    #[tokio::test(start_paused = true)]
    async fn test_exits_when_engine_is_poisoned() {
        let state = Arc::new(AppState::new(
            0,
            "127.0.0.1".to_string(),
            TimerConfiguration::default(),
        ));
        let handle = tokio::spawn(tick_source_task(Arc::clone(&state)));
        tokio::task::yield_now().await;

        state.start().unwrap();
        state.poison_engine();

        let finished = tokio::time::timeout(Duration::from_secs(5), handle).await;
        assert!(finished.is_ok(), "tick source kept running on a poisoned engine");
    }
}
