use std::fmt;

use crate::error::InstallError;
use crate::host::Host;
use crate::plan::{write_command_line, PlannedCommand};

/// How commands are raised to root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Elevation {
    /// Already root
    None,
    Sudo,
    Su,
}

/// Fully resolved argv for one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl Elevation {
    /// Chooses sudo, then su, when not running as root
    pub fn resolve(host: &impl Host) -> Result<Self, InstallError> {
        if host.is_superuser() {
            Ok(Elevation::None)
        } else if host.has_command("sudo") {
            Ok(Elevation::Sudo)
        } else if host.has_command("su") {
            Ok(Elevation::Su)
        } else {
            Err(InstallError::PrivilegeUnavailable)
        }
    }

    pub fn wrap(&self, command: &PlannedCommand) -> Invocation {
        match self {
            Elevation::None => Invocation {
                program: command.program.clone(),
                args: command.args.clone(),
                env: command.env.clone(),
            },
            Elevation::Sudo => {
                let mut args = vec!["-E".to_string(), command.program.clone()];
                args.extend(command.args.iter().cloned());
                Invocation {
                    program: "sudo".to_string(),
                    args,
                    env: command.env.clone(),
                }
            }
            // su only takes a shell string, so the environment travels inside it
            Elevation::Su => Invocation {
                program: "su".to_string(),
                args: vec!["-c".to_string(), command.to_string()],
                env: Vec::new(),
            },
        }
    }
}

impl fmt::Display for Elevation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Elevation::None => write!(f, "none (running as root)"),
            Elevation::Sudo => write!(f, "sudo"),
            Elevation::Su => write!(f, "su"),
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_command_line(f, &self.env, &self.program, &self.args)
    }
}
