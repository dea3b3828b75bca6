//! Execution of planned commands.
//!
//! The dispatcher hands every command to a [`CommandRunner`]; whether anything
//! actually runs is decided here and nowhere else.

use std::process::Command;

use crate::error::InstallError;
use crate::plan::PlannedCommand;
use crate::privilege::Elevation;

pub trait CommandRunner {
    /// Runs one command to completion. A non-zero exit is an error.
    fn run(&mut self, command: &PlannedCommand) -> Result<(), InstallError>;
}

/// Executes commands on the host, elevated as required
pub struct SystemRunner {
    elevation: Elevation,
}

impl SystemRunner {
    pub fn new(elevation: Elevation) -> Self {
        Self { elevation }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&mut self, command: &PlannedCommand) -> Result<(), InstallError> {
        let invocation = self.elevation.wrap(command);
        let command_line = invocation.to_string();
        log::info!("+ {}", command_line);

        let status = Command::new(&invocation.program)
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .map_err(|source| InstallError::CommandSpawn {
                command: command_line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(InstallError::CommandFailure {
                command: command_line,
                code: status.code(),
            });
        }
        Ok(())
    }
}

/// Shows commands instead of running them and keeps a record of what would have run
#[derive(Debug, Default)]
pub struct DryRunRunner {
    recorded: Vec<String>,
    quiet: bool,
}

impl DryRunRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records without printing
    pub fn quiet() -> Self {
        Self {
            recorded: Vec::new(),
            quiet: true,
        }
    }

    pub fn recorded(&self) -> &[String] {
        &self.recorded
    }
}

impl CommandRunner for DryRunRunner {
    fn run(&mut self, command: &PlannedCommand) -> Result<(), InstallError> {
        let command_line = command.to_string();
        if !self.quiet {
            println!("+ {}", command_line);
        }
        self.recorded.push(command_line);
        Ok(())
    }
}
