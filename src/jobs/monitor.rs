use chrono::Utc;
use tokio::sync::broadcast;
use tokio::time::{Duration, sleep};

use crate::app_context::AppContext;
use crate::monitor::run_cycle;
use crate::system::CommandRunner;

/// Runs sampling cycles until `shutdown` fires or its sender is dropped. A shutdown that
/// arrives mid-cycle takes effect once that cycle is done. Returns the completed cycles.
pub async fn run_monitor_loop<R: CommandRunner>(
    app_context: &AppContext,
    runner: &R,
    mut shutdown: broadcast::Receiver<()>,
) -> u64 {
    let config = &app_context.config;
    let interval = Duration::from_secs(config.monitor_interval);
    let mut previous_tick = None;
    let mut cycles = 0u64;

    loop {
        let now = Utc::now();

        if let Some(previous) = previous_tick {
            let elapsed_secs = now.signed_duration_since(previous).num_seconds().max(0);
            let threshold_secs = config.monitor_interval.saturating_mul(2) as i64;
            if elapsed_secs > threshold_secs {
                log::warn!(
                    "monitor_loop_delayed elapsed_secs={} threshold_secs={}",
                    elapsed_secs,
                    threshold_secs
                );
            }
        }
        previous_tick = Some(now);

        run_cycle(config, runner, &app_context.throttle, now).await;
        cycles += 1;

        tokio::select! {
            _ = sleep(interval) => {}
            _ = shutdown.recv() => {
                log::info!("monitor_loop_stopped cycles={}", cycles);
                return cycles;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::broadcast;
    use tokio::time::{Duration, sleep};

    use crate::app_context::AppContext;
    use crate::config::Config;
    use crate::monitor::{AlertKind, fixtures};
    use crate::system::scripted::ScriptedRunner;

    use super::run_monitor_loop;

    fn breaching_context(snapshot_dir: &std::path::Path) -> (AppContext, ScriptedRunner) {
        let mut config = Config::default();
        config.monitor_interval = 60;
        config.alerts.memory = 70.0;
        config.alerts.cooldown_secs = 1200;
        config.notifier.command = Some("notify-admin".to_string());
        config.snapshots.dir = snapshot_dir.display().to_string();

        let runner = ScriptedRunner::new()
            .with_output(
                &config.probes.memory_command,
                fixtures::free_table(8000000, 2000000),
            )
            .with_output(&config.probes.cpu_command, fixtures::sar_tail(90));

        (AppContext::new(config), runner)
    }

    #[tokio::test(start_paused = true)]
    async fn runs_until_shutdown_and_reports_cycles() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (app_context, runner) = breaching_context(dir.path());
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let (cycles, _) = tokio::join!(
            run_monitor_loop(&app_context, &runner, shutdown_rx),
            async {
                sleep(Duration::from_secs(121)).await;
                shutdown_tx.send(()).ok();
            }
        );

        assert_eq!(cycles, 3);
        // every breaching cycle snapshots, the cooldown allows a single notification
        assert_eq!(runner.files_written().len(), 6);
        let messages = runner.notifications();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("80.00%"));

        let state = app_context.throttle.lock().await;
        assert_eq!(
            state.last_sent(AlertKind::Cpu),
            chrono::DateTime::<chrono::Utc>::UNIX_EPOCH
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sender_stops_the_loop() {
        let dir = tempfile::tempdir().expect("temp dir");
        let (app_context, runner) = breaching_context(dir.path());
        let (shutdown_tx, shutdown_rx) = broadcast::channel::<()>(1);
        drop(shutdown_tx);

        let cycles = run_monitor_loop(&app_context, &runner, shutdown_rx).await;
        assert_eq!(cycles, 1);
    }
}
