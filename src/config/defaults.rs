use super::schema::{Alerts, Config, Notifier, Probes, SnapshotCommand, Snapshots};

pub(super) fn default_monitor_interval() -> u64 {
    60
}

pub(super) fn default_command_timeout_secs() -> u64 {
    30
}

pub(super) fn default_alert_memory() -> f32 {
    70.0
}

pub(super) fn default_alert_cpu() -> f32 {
    70.0
}

pub(super) fn default_cooldown_secs() -> u64 {
    20 * 60
}

pub(super) fn default_memory_probe() -> String {
    "free -L".to_string()
}

pub(super) fn default_cpu_probe() -> String {
    "sar --dec=0 1 1 | tail -n 3".to_string()
}

pub(super) fn default_snapshot_dir() -> String {
    "reports".to_string()
}

pub(super) fn default_memory_snapshots() -> Vec<SnapshotCommand> {
    vec![
        snapshot_command("mem_report_ps", "ps aux --sort=-%mem"),
        snapshot_command("mem_report_top", "top -b -n 1 -o %MEM"),
    ]
}

pub(super) fn default_cpu_snapshots() -> Vec<SnapshotCommand> {
    vec![snapshot_command("cpu_report", "ps aux --sort=-%cpu")]
}

fn snapshot_command(name: &str, command: &str) -> SnapshotCommand {
    SnapshotCommand {
        name: name.to_string(),
        command: command.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            monitor_interval: default_monitor_interval(),
            command_timeout_secs: default_command_timeout_secs(),
            alerts: Alerts::default(),
            notifier: Notifier::default(),
            probes: Probes::default(),
            snapshots: Snapshots::default(),
        }
    }
}

impl Default for Alerts {
    fn default() -> Self {
        Self {
            memory: default_alert_memory(),
            cpu: default_alert_cpu(),
            cooldown_secs: default_cooldown_secs(),
        }
    }
}

impl Default for Probes {
    fn default() -> Self {
        Self {
            memory_command: default_memory_probe(),
            cpu_command: default_cpu_probe(),
        }
    }
}

impl Default for Snapshots {
    fn default() -> Self {
        Self {
            dir: default_snapshot_dir(),
            memory: default_memory_snapshots(),
            cpu: default_cpu_snapshots(),
        }
    }
}
