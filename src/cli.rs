use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigError, read_config};

/// Watches memory and CPU usage, saves process reports and runs a notifier on high usage.
#[derive(Debug, Parser)]
#[command(name = "host-watchdog", version)]
pub struct Cli {
    /// TOML config file; built-in defaults are used without one.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Memory usage percentage that triggers an alert.
    #[arg(short = 'm', long = "memory-threshold", value_name = "PCT")]
    pub memory_threshold: Option<f32>,

    /// CPU usage percentage that triggers an alert.
    #[arg(short = 'c', long = "cpu-threshold", value_name = "PCT")]
    pub cpu_threshold: Option<f32>,

    /// Seconds between two checks.
    #[arg(short = 't', long = "interval", value_name = "SECS")]
    pub interval_secs: Option<u64>,

    /// Command run with the alert text as its last argument.
    #[arg(short = 'r', long = "notify-command", value_name = "CMD")]
    pub notify_command: Option<String>,

    /// Minimum seconds between two notifications of the same kind.
    #[arg(short = 'n', long = "notify-cooldown", value_name = "SECS")]
    pub notify_cooldown_secs: Option<u64>,
}

impl Cli {
    /// Loads the config file (or defaults), applies the flags on top and validates the result.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => Config::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(threshold) = self.memory_threshold {
            config.alerts.memory = threshold;
        }
        if let Some(threshold) = self.cpu_threshold {
            config.alerts.cpu = threshold;
        }
        if let Some(interval) = self.interval_secs {
            config.monitor_interval = interval;
        }
        if let Some(command) = &self.notify_command {
            config.notifier.command = Some(command.clone());
        }
        if let Some(cooldown) = self.notify_cooldown_secs {
            config.alerts.cooldown_secs = cooldown;
        }
    }
}
