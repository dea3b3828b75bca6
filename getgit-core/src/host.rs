//! Read-only access to the machine we are installing on.
//!
//! Detection and the dispatcher only talk to the host through [`Host`], so the
//! whole flow can be exercised against an in-memory host in tests.

use std::fs;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

pub trait Host {
    /// Contents of a file, `None` when missing or unreadable
    fn read_file(&self, path: &str) -> Option<String>;

    /// Trimmed stdout of a command that exited successfully
    fn capture(&self, program: &str, args: &[&str]) -> Option<String>;

    /// Whether a command resolves on PATH
    fn has_command(&self, name: &str) -> bool;

    /// Kernel name as reported by `uname -s` ("Linux", "Darwin", ...)
    fn kernel_name(&self) -> String;

    fn is_superuser(&self) -> bool;

    /// Blocks for an advisory delay
    fn pause(&self, duration: Duration);
}

/// The real host
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl Host for SystemHost {
    fn read_file(&self, path: &str) -> Option<String> {
        fs::read_to_string(Path::new(path)).ok()
    }

    fn capture(&self, program: &str, args: &[&str]) -> Option<String> {
        let output = Command::new(program).args(args).output().ok()?;
        if !output.status.success() {
            log::debug!("{} {} exited with {}", program, args.join(" "), output.status);
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Some(stdout)
    }

    fn has_command(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }

    fn kernel_name(&self) -> String {
        self.capture("uname", &["-s"])
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| std::env::consts::OS.to_string())
    }

    fn is_superuser(&self) -> bool {
        #[cfg(unix)]
        {
            unsafe { libc::geteuid() == 0 }
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    fn pause(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
