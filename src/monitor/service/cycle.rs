use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::config::Config;
use crate::system::CommandRunner;

use super::super::{AlertKind, evaluator::is_breach, sampler::MetricSampler, state::ThrottleState};
use super::{NotifyOutcome, capture_snapshots, try_notify};

#[derive(Debug, Clone, PartialEq)]
pub enum PhaseOutcome {
    /// The probe output could not be used at all this cycle.
    Skipped,
    Normal {
        reading: f32,
    },
    Breached {
        reading: f32,
        snapshots: Vec<PathBuf>,
        notification: NotifyOutcome,
    },
}

impl PhaseOutcome {
    pub fn reading(&self) -> Option<f32> {
        match self {
            PhaseOutcome::Skipped => None,
            PhaseOutcome::Normal { reading } | PhaseOutcome::Breached { reading, .. } => {
                Some(*reading)
            }
        }
    }

    pub fn is_breach(&self) -> bool {
        matches!(self, PhaseOutcome::Breached { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    pub memory: PhaseOutcome,
    pub cpu: PhaseOutcome,
}

impl CycleReport {
    #[cfg(test)]
    pub fn phase(&self, kind: AlertKind) -> &PhaseOutcome {
        match kind {
            AlertKind::Memory => &self.memory,
            AlertKind::Cpu => &self.cpu,
        }
    }
}

/// One sampling cycle: the memory phase, then the CPU phase. Each phase stands alone, so a
/// broken probe for one kind never keeps the other from being evaluated.
pub async fn run_cycle<R: CommandRunner>(
    config: &Config,
    runner: &R,
    throttle: &Mutex<ThrottleState>,
    now: DateTime<Utc>,
) -> CycleReport {
    let memory = run_phase(config, runner, throttle, AlertKind::Memory, now).await;
    let cpu = run_phase(config, runner, throttle, AlertKind::Cpu, now).await;

    tracing::info!(
        target: "monitor",
        module = "monitor",
        memory = memory.reading(),
        cpu = cpu.reading(),
        memory_threshold = config.alerts.memory,
        cpu_threshold = config.alerts.cpu,
        memory_over = memory.is_breach(),
        cpu_over = cpu.is_breach(),
        "monitor_metrics"
    );

    CycleReport { memory, cpu }
}

async fn run_phase<R: CommandRunner>(
    config: &Config,
    runner: &R,
    throttle: &Mutex<ThrottleState>,
    kind: AlertKind,
    now: DateTime<Utc>,
) -> PhaseOutcome {
    let sampler = MetricSampler::new(runner, &config.probes);
    let reading = match sampler.sample(kind).await {
        Ok(reading) => reading,
        Err(error) => {
            log::warn!("phase_skipped kind={} error={}", kind, error);
            return PhaseOutcome::Skipped;
        }
    };

    let threshold = config.alerts.threshold(kind);
    if !is_breach(reading, threshold) {
        return PhaseOutcome::Normal { reading };
    }

    log::warn!(
        "threshold_breached kind={} reading={:.2} threshold={:.2}",
        kind,
        reading,
        threshold
    );

    let snapshots = capture_snapshots(runner, &config.snapshots, kind, reading, now).await;
    let notification = {
        let mut state = throttle.lock().await;
        try_notify(runner, config, &mut state, kind, reading, now).await
    };

    PhaseOutcome::Breached {
        reading,
        snapshots,
        notification,
    }
}
