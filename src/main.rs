mod app_context;
mod capabilities;
mod cli;
mod config;
mod extract;
mod jobs;
mod monitor;
mod system;

use std::process::ExitCode;

use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::EnvFilter;

use crate::app_context::AppContext;
use crate::capabilities::Capabilities;
use crate::cli::Cli;
use crate::jobs::run_monitor_loop;
use crate::system::ShellRunner;

fn init_json_logging() {
    if let Err(error) = tracing_log::LogTracer::init() {
        eprintln!(
            "logging bridge initialization failed (continuing with existing logger): {}",
            error
        );
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .json()
        .with_current_span(false)
        .with_span_list(false)
        .finish();

    if let Err(error) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("global logger initialization failed: {}", error);
    }
}

fn log_capability_warnings(capabilities: &Capabilities) {
    for missing in &capabilities.missing {
        log::warn!(
            "capability_degraded feature={} reason={}_unavailable",
            missing.feature,
            missing.program
        );
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_json_logging();

    let cli = Cli::parse();
    let config = match cli.resolve_config() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Configuration error: {}", error);
            return ExitCode::from(2);
        }
    };

    log::info!(
        "host_watchdog_starting interval_secs={} memory_threshold={} cpu_threshold={} notifier={}",
        config.monitor_interval,
        config.alerts.memory,
        config.alerts.cpu,
        config.notifier.command.is_some()
    );
    log_capability_warnings(&Capabilities::detect(&config));

    let runner = ShellRunner::new(config.command_timeout_secs);
    let app_context = AppContext::new(config);

    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                log::info!("shutdown_requested signal=ctrl_c");
                let _ = shutdown_tx.send(());
            }
            Err(error) => {
                log::error!("shutdown_listener_failed error={}", error);
                // dropping the sender would stop the monitor loop
                std::future::pending::<()>().await;
            }
        }
    });

    run_monitor_loop(&app_context, &runner, shutdown_rx).await;
    ExitCode::SUCCESS
}
