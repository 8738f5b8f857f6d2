use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::Snapshots;
use crate::system::CommandRunner;

use super::super::AlertKind;

/// Saves the output of every snapshot command configured for `kind`. Returns the files that
/// were written completely; failures are logged and skipped.
pub async fn capture_snapshots<R: CommandRunner>(
    runner: &R,
    snapshots: &Snapshots,
    kind: AlertKind,
    consumption: f32,
    now: DateTime<Utc>,
) -> Vec<PathBuf> {
    let commands = snapshots.commands(kind);
    if commands.is_empty() {
        return Vec::new();
    }

    let dir = Path::new(&snapshots.dir);
    if let Err(error) = std::fs::create_dir_all(dir) {
        log::warn!(
            "snapshot_failed kind={} dir={} reason=create_dir error={}",
            kind,
            dir.display(),
            error
        );
        return Vec::new();
    }

    let mut written = Vec::with_capacity(commands.len());
    for snapshot in commands {
        let path = dir.join(snapshot_file_name(&snapshot.name, now, consumption));
        match runner.capture_to_file(&snapshot.command, &path).await {
            Ok(bytes) => {
                log::info!(
                    "snapshot_saved kind={} path={} bytes={}",
                    kind,
                    path.display(),
                    bytes
                );
                written.push(path);
            }
            Err(error) => {
                log::warn!(
                    "snapshot_failed kind={} path={} error={}",
                    kind,
                    path.display(),
                    error
                );
            }
        }
    }

    written
}

/// `<name>_<yymmdd_HHMMSS.micros>_<whole percent>.txt`, in UTC.
pub(crate) fn snapshot_file_name(name: &str, now: DateTime<Utc>, consumption: f32) -> String {
    format!(
        "{}_{}_{}.txt",
        name,
        now.format("%y%m%d_%H%M%S%.6f"),
        consumption.trunc() as i32
    )
}
