use std::io;

use thiserror::Error;

/// Everything that can stop an installation run
#[derive(Debug, Error)]
pub enum InstallError {
    /// Unknown or unhandled distribution/OS. `hint` carries tailored remediation text.
    #[error("Unsupported distribution '{platform}'")]
    UnsupportedPlatform {
        platform: String,
        hint: Option<String>,
    },

    #[error(
        "this installer needs the ability to run commands as root. \
         We are unable to find either \"sudo\" or \"su\" available to make this happen."
    )]
    PrivilegeUnavailable,

    #[error("command failed ({}): {command}", describe_code(.code))]
    CommandFailure { command: String, code: Option<i32> },

    #[error("failed to execute {command}")]
    CommandSpawn {
        command: String,
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    pub fn unsupported(platform: impl Into<String>) -> Self {
        InstallError::UnsupportedPlatform {
            platform: platform.into(),
            hint: None,
        }
    }

    /// The macOS case: nothing to configure here, point the user at the usual tooling.
    pub fn unsupported_macos() -> Self {
        InstallError::UnsupportedPlatform {
            platform: "macOS".to_string(),
            hint: Some(
                "git is not installed through this script on macOS.\n\
                 Install the Xcode Command Line Tools with: xcode-select --install\n\
                 or install git with Homebrew: brew install git"
                    .to_string(),
            ),
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            InstallError::CommandFailure { code: Some(code), .. } if *code != 0 => *code,
            _ => 1,
        }
    }
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}
