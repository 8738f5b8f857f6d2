use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::system::CommandRunner;

use super::super::{AlertKind, evaluator::alert_message, state::ThrottleState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// No notifier command is configured.
    Disabled,
    /// Still inside the cooldown window; nothing was run.
    Throttled,
    /// The notifier was attempted. `exit_code` is `None` when it could not be started or was
    /// ended by a signal.
    Dispatched { exit_code: Option<i32> },
}

/// Runs the notifier for `kind` unless its cooldown is still running. Any attempt past the
/// cooldown restarts the window, whatever the notifier's exit status.
pub async fn try_notify<R: CommandRunner>(
    runner: &R,
    config: &Config,
    state: &mut ThrottleState,
    kind: AlertKind,
    consumption: f32,
    now: DateTime<Utc>,
) -> NotifyOutcome {
    let Some(command) = config.notifier.command.as_deref() else {
        return NotifyOutcome::Disabled;
    };

    if !state.cooldown_elapsed(kind, now, config.alerts.cooldown_secs) {
        log::debug!(
            "notification_throttled kind={} last_sent={}",
            kind,
            state.last_sent(kind).to_rfc3339()
        );
        return NotifyOutcome::Throttled;
    }

    let message = alert_message(kind, consumption);
    let exit_code = match runner.run_with_message(command, &message).await {
        Ok(Some(0)) => {
            log::info!("notification_sent kind={} consumption={:.2}", kind, consumption);
            Some(0)
        }
        Ok(code) => {
            log::warn!("notifier_nonzero_exit kind={} code={:?}", kind, code);
            code
        }
        Err(error) => {
            log::warn!("notifier_failed kind={} error={}", kind, error);
            None
        }
    };

    state.mark_sent(kind, now);
    NotifyOutcome::Dispatched { exit_code }
}
