mod cycle;
mod notify;
mod snapshot;

pub use cycle::run_cycle;
pub use notify::{NotifyOutcome, try_notify};
pub use snapshot::capture_snapshots;
