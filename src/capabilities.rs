use std::process::Command;

use crate::config::Config;
use crate::monitor::AlertKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingProgram {
    pub feature: String,
    pub program: String,
}

#[derive(Debug, Clone, Default)]
pub struct Capabilities {
    pub missing: Vec<MissingProgram>,
}

impl Capabilities {
    /// Checks that the first program of every configured command line is on `PATH`.
    pub fn detect(config: &Config) -> Self {
        let mut missing: Vec<MissingProgram> = Vec::new();

        for (feature, command_line) in required_commands(config) {
            let Some(program) = program_of(&command_line) else {
                continue;
            };
            if missing.iter().any(|entry| entry.program == program) {
                continue;
            }
            if !command_exists(program) {
                missing.push(MissingProgram {
                    feature,
                    program: program.to_string(),
                });
            }
        }

        Self { missing }
    }
}

fn required_commands(config: &Config) -> Vec<(String, String)> {
    let mut commands = Vec::new();

    for kind in AlertKind::ALL {
        commands.push((
            format!("{}_probe", kind),
            config.probes.command(kind).to_string(),
        ));
        for snapshot in config.snapshots.commands(kind) {
            commands.push((
                format!("{}_snapshot_{}", kind, snapshot.name),
                snapshot.command.clone(),
            ));
        }
    }

    if let Some(command) = &config.notifier.command {
        commands.push(("notifier".to_string(), command.clone()));
    }

    commands
}

fn program_of(command_line: &str) -> Option<&str> {
    command_line
        .split_whitespace()
        .next()
        .map(|program| program.trim_matches(|c: char| c == '\'' || c == '"'))
        .filter(|program| !program.is_empty())
}

fn command_exists(command: &str) -> bool {
    Command::new("sh")
        .arg("-c")
        .arg("command -v \"$1\" >/dev/null 2>&1")
        .arg("sh")
        .arg(command)
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}
