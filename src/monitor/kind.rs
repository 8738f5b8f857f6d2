use std::fmt;

/// An independent alert stream with its own threshold, throttle entry and snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertKind {
    Memory,
    Cpu,
}

impl AlertKind {
    /// Sampling order within a cycle.
    pub const ALL: [AlertKind; 2] = [AlertKind::Memory, AlertKind::Cpu];

    pub fn as_str(self) -> &'static str {
        match self {
            AlertKind::Memory => "memory",
            AlertKind::Cpu => "cpu",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AlertKind::Memory => "Memory consumption is high",
            AlertKind::Cpu => "CPU consumption is high",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
