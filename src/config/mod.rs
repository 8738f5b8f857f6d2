mod defaults;
mod io;
mod schema;
mod validate;


pub use io::read_config;
pub use schema::{Alerts, Config, Notifier, Probes, SnapshotCommand, Snapshots};
pub use validate::ConfigError;
