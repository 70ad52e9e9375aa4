//! Phase change command execution

use tokio::process::Command;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    timer::PhaseChange,
};

/// Run the user's phase change command through `sh -c`.
///
/// The new phase and its length are passed as `FOCUS_TIMER_PHASE` and
/// `FOCUS_TIMER_MINUTES`.
pub async fn run_phase_command(command: &str, change: &PhaseChange) -> Result<()> {
    debug!("Running phase change command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .env("FOCUS_TIMER_PHASE", change.to.as_str())
        .env("FOCUS_TIMER_MINUTES", change.minutes.to_string())
        .output()
        .await
        .map_err(|e| Error::Notify(format!("failed to execute `{}`: {}", command, e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(Error::Notify(format!(
            "`{}` exited with {}: {}",
            command,
            output.status,
            stderr.trim()
        )));
    }

    info!("Phase change command completed for {} phase", change.to);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::Phase;

    fn to_break() -> PhaseChange {
        PhaseChange {
            from: Phase::Focus,
            to: Phase::Break,
            minutes: 5,
        }
    }

    #[tokio::test]
    async fn test_command_sees_phase_env() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("phase.txt");
        let command = format!(
            "printf '%s %s' \"$FOCUS_TIMER_PHASE\" \"$FOCUS_TIMER_MINUTES\" > {}",
            out.display()
        );

        run_phase_command(&command, &to_break()).await.unwrap();
        assert_eq!(std::fs::read_to_string(out).unwrap(), "break 5");
    }

    #[tokio::test]
    async fn test_failing_command_is_reported() {
        let err = run_phase_command("echo nope >&2; exit 3", &to_break()).await.unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Notify(_)));
        assert!(message.contains("nope"));
    }
}
