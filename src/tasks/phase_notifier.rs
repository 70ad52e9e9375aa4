//! Phase change notifier background task

use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

use crate::{services::run_phase_command, state::AppState};

/// Background task that announces every Focus<->Break transition.
///
/// Each transition is logged; when `command` is set it is also run through
/// the shell. Command failures are recorded on the state and never reach
/// the engine.
pub async fn phase_notifier_task(state: Arc<AppState>, command: Option<String>) {
    info!("Starting phase notifier task");

    let mut phase_rx = state.subscribe_phase_changes();

    loop {
        match phase_rx.recv().await {
            Ok(change) => {
                info!("Phase changed: {} -> {} ({} minutes)", change.from, change.to, change.minutes);

                let Some(command) = &command else { continue };
                match run_phase_command(command, &change).await {
                    Ok(()) => state.set_notify_error(None),
                    Err(e) => {
                        warn!("{}", e);
                        state.set_notify_error(Some(e.to_string()));
                    }
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Phase notifier lagged, skipped {} transitions", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Phase change channel closed, stopping notifier");
                return;
            }
        }
    }
}
