use serde::Deserialize;

use crate::monitor::AlertKind;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_monitor_interval")]
    pub monitor_interval: u64,
    #[serde(default = "default_command_timeout_secs")]
    pub command_timeout_secs: u64,
    #[serde(default)]
    pub alerts: Alerts,
    #[serde(default)]
    pub notifier: Notifier,
    #[serde(default)]
    pub probes: Probes,
    #[serde(default)]
    pub snapshots: Snapshots,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Alerts {
    #[serde(default = "default_alert_memory")]
    pub memory: f32,
    #[serde(default = "default_alert_cpu")]
    pub cpu: f32,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
}

impl Alerts {
    pub fn threshold(&self, kind: AlertKind) -> f32 {
        match kind {
            AlertKind::Memory => self.memory,
            AlertKind::Cpu => self.cpu,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Notifier {
    #[serde(default)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Probes {
    #[serde(default = "default_memory_probe")]
    pub memory_command: String,
    #[serde(default = "default_cpu_probe")]
    pub cpu_command: String,
}

impl Probes {
    pub fn command(&self, kind: AlertKind) -> &str {
        match kind {
            AlertKind::Memory => &self.memory_command,
            AlertKind::Cpu => &self.cpu_command,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snapshots {
    #[serde(default = "default_snapshot_dir")]
    pub dir: String,
    #[serde(default = "default_memory_snapshots")]
    pub memory: Vec<SnapshotCommand>,
    #[serde(default = "default_cpu_snapshots")]
    pub cpu: Vec<SnapshotCommand>,
}

impl Snapshots {
    pub fn commands(&self, kind: AlertKind) -> &[SnapshotCommand] {
        match kind {
            AlertKind::Memory => &self.memory,
            AlertKind::Cpu => &self.cpu,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SnapshotCommand {
    /// File name prefix of the captured report.
    pub name: String,
    pub command: String,
}
