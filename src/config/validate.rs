use thiserror::Error;

use super::schema::{Config, SnapshotCommand};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Validation(String),
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.monitor_interval == 0 {
            return Err(ConfigError::Validation(
                "monitor_interval must be greater than 0".to_string(),
            ));
        }
        if self.command_timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "command_timeout_secs must be greater than 0".to_string(),
            ));
        }
        validate_percentage("alerts.memory", self.alerts.memory)?;
        validate_percentage("alerts.cpu", self.alerts.cpu)?;

        if let Some(command) = &self.notifier.command
            && command.trim().is_empty()
        {
            return Err(ConfigError::Validation(
                "notifier.command must not be empty when set".to_string(),
            ));
        }

        validate_not_blank("probes.memory_command", &self.probes.memory_command)?;
        validate_not_blank("probes.cpu_command", &self.probes.cpu_command)?;
        validate_not_blank("snapshots.dir", &self.snapshots.dir)?;
        validate_snapshot_commands("snapshots.memory", &self.snapshots.memory)?;
        validate_snapshot_commands("snapshots.cpu", &self.snapshots.cpu)?;
        Ok(())
    }
}

fn validate_percentage(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_nan() || !(0.0..=100.0).contains(&value) {
        return Err(ConfigError::Validation(format!(
            "{} must be between 0 and 100",
            field
        )));
    }
    Ok(())
}

fn validate_not_blank(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must not be empty",
            field
        )));
    }
    Ok(())
}

fn validate_snapshot_commands(
    field: &str,
    commands: &[SnapshotCommand],
) -> Result<(), ConfigError> {
    for (index, snapshot) in commands.iter().enumerate() {
        validate_not_blank(&format!("{}[{}].name", field, index), &snapshot.name)?;
        if snapshot.name.contains(['/', '\\']) || snapshot.name.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "{}[{}].name must be a plain file name prefix",
                field, index
            )));
        }
        validate_not_blank(&format!("{}[{}].command", field, index), &snapshot.command)?;
    }
    Ok(())
}
