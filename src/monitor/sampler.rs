use thiserror::Error;

use crate::config::Probes;
use crate::extract::{FieldError, FieldRule};
use crate::system::CommandRunner;

use super::AlertKind;

/// `free -L` columns: SwapUse, CachUse, MemUse, MemFree.
const MEMORY_USED: FieldRule = FieldRule::FixedColumn { column: 2 };
const MEMORY_FREE: FieldRule = FieldRule::FixedColumn { column: 3 };

/// `sar --dec=0` right-aligns `%idle` values under the last three bytes of the label.
const CPU_IDLE: FieldRule = FieldRule::HeaderRelative {
    label: "%idle",
    skip: 2,
    width: 3,
};

#[derive(Debug, Error)]
pub enum SampleError {
    #[error("{kind} probe output has an unexpected layout: {source}")]
    Layout { kind: AlertKind, source: FieldError },
}

pub struct MetricSampler<'a, R> {
    runner: &'a R,
    probes: &'a Probes,
}

impl<'a, R: CommandRunner> MetricSampler<'a, R> {
    pub fn new(runner: &'a R, probes: &'a Probes) -> Self {
        Self { runner, probes }
    }

    pub async fn sample(&self, kind: AlertKind) -> Result<f32, SampleError> {
        match kind {
            AlertKind::Memory => Ok(self.sample_memory().await),
            AlertKind::Cpu => self.sample_cpu().await,
        }
    }

    /// Percentage of memory in use. Unreadable fields count as 0.
    pub async fn sample_memory(&self) -> f32 {
        let output = self.probe_output(AlertKind::Memory).await;

        let used = read_field_or_zero(AlertKind::Memory, MEMORY_USED, &output);
        let free = read_field_or_zero(AlertKind::Memory, MEMORY_FREE, &output);

        let total = used as f64 + free as f64;
        if total <= 0.0 {
            log::warn!("memory_table_degenerate used={} free={}", used, free);
            return 0.0;
        }

        as_percentage(used as f64 / total * 100.0)
    }

    /// Percentage of CPU not idle. Fails only when the output has no usable `%idle` column.
    pub async fn sample_cpu(&self) -> Result<f32, SampleError> {
        let output = self.probe_output(AlertKind::Cpu).await;

        let idle = match CPU_IDLE.extract(&output) {
            Ok(idle) => idle,
            Err(source) if source.aborts_phase() => {
                log::warn!(
                    "probe_layout_unrecognized kind=cpu error={} source={:?}",
                    source,
                    output
                );
                return Err(SampleError::Layout {
                    kind: AlertKind::Cpu,
                    source,
                });
            }
            Err(error) => {
                log_parse_failure(AlertKind::Cpu, &error, &output);
                return Ok(0.0);
            }
        };

        Ok(as_percentage(100.0 - f64::from(idle)))
    }

    async fn probe_output(&self, kind: AlertKind) -> String {
        let command = self.probes.command(kind);
        match self.runner.capture_output(command).await {
            Ok(output) => output,
            Err(error) => {
                log::warn!("probe_command_failed kind={} error={}", kind, error);
                String::new()
            }
        }
    }
}

fn read_field_or_zero(kind: AlertKind, rule: FieldRule, output: &str) -> i32 {
    match rule.extract(output) {
        Ok(value) => value,
        Err(error) => {
            log_parse_failure(kind, &error, output);
            0
        }
    }
}

fn log_parse_failure(kind: AlertKind, error: &FieldError, output: &str) {
    log::warn!(
        "field_parse_failed kind={} error={} raw={:?} source={:?}",
        kind,
        error,
        error.raw().unwrap_or_default(),
        output
    );
}

fn as_percentage(value: f64) -> f32 {
    value.clamp(0.0, 100.0) as f32
}

#[cfg(test)]
pub(crate) mod fixtures {
    /// One line of `free -L`: four 20-byte columns and a newline.
    pub(crate) fn free_table(used: i64, free: i64) -> String {
        format!(
            "{:<9}{:>11}{:<9}{:>11}{:<9}{:>11}{:<9}{:>11}\n",
            "SwapUse", 0, "CachUse", 1048576, "MemUse", used, "MemFree", free
        )
    }

    /// Header and data line with `%idle` at byte 40 and the value at byte 42.
    pub(crate) fn sar_tail(idle: i32) -> String {
        format!(
            "{:<40}%idle\n{:<42}{:>3}\n",
            "Average:        CPU     %user     %nice", "Average:        all      4      0", idle
        )
    }
}
