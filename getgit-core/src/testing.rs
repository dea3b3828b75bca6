//! In-memory host for unit tests

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use crate::host::Host;

pub struct FakeHost {
    files: HashMap<String, String>,
    outputs: HashMap<String, String>,
    commands: HashSet<String>,
    kernel: String,
    superuser: bool,
    pub pauses: RefCell<Vec<Duration>>,
}

impl Default for FakeHost {
    fn default() -> Self {
        Self {
            files: HashMap::new(),
            outputs: HashMap::new(),
            commands: HashSet::new(),
            kernel: "Linux".to_string(),
            superuser: false,
            pauses: RefCell::new(Vec::new()),
        }
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: &str, contents: &str) -> Self {
        self.files.insert(path.to_string(), contents.to_string());
        self
    }

    /// Registers `command_line` (program and args joined by spaces) as a
    /// successful command printing `stdout`. The program becomes resolvable.
    pub fn with_output(mut self, command_line: &str, stdout: &str) -> Self {
        if let Some(program) = command_line.split_whitespace().next() {
            self.commands.insert(program.to_string());
        }
        self.outputs
            .insert(command_line.to_string(), stdout.trim().to_string());
        self
    }

    pub fn with_command(mut self, name: &str) -> Self {
        self.commands.insert(name.to_string());
        self
    }

    pub fn with_kernel(mut self, kernel: &str) -> Self {
        self.kernel = kernel.to_string();
        self
    }

    pub fn as_root(mut self) -> Self {
        self.superuser = true;
        self
    }

    pub fn pause_count(&self) -> usize {
        self.pauses.borrow().len()
    }
}

impl Host for FakeHost {
    fn read_file(&self, path: &str) -> Option<String> {
        self.files.get(path).cloned()
    }

    fn capture(&self, program: &str, args: &[&str]) -> Option<String> {
        let mut key = program.to_string();
        for arg in args {
            key.push(' ');
            key.push_str(arg);
        }
        self.outputs.get(&key).cloned()
    }

    fn has_command(&self, name: &str) -> bool {
        self.commands.contains(name)
    }

    fn kernel_name(&self) -> String {
        self.kernel.clone()
    }

    fn is_superuser(&self) -> bool {
        self.superuser
    }

    fn pause(&self, duration: Duration) {
        self.pauses.borrow_mut().push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_host_is_plain_linux_user() {
        let host = FakeHost::default();
        assert_eq!(host.kernel_name(), "Linux");
        assert!(!host.is_superuser());
        assert!(host.read_file("/etc/os-release").is_none());
        assert_eq!(host.pause_count(), 0);
    }
}
