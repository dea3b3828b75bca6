//! Install plans: the ordered package-manager commands for one distribution family.

use std::borrow::Cow;
use std::fmt;

use crate::config::{Package, RunConfig};
use crate::distro::{DistroFamily, PackageManager};

/// What a planned command is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    RepoSetup,
    CacheRefresh,
    Install,
}

/// One external command, not yet elevated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCommand {
    pub stage: Stage,
    pub env: Vec<(String, String)>,
    pub program: String,
    pub args: Vec<String>,
}

impl PlannedCommand {
    pub fn new(stage: Stage, program: &str, args: &[&str]) -> Self {
        Self {
            stage,
            env: Vec::new(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env.push((key.to_string(), value.to_string()));
        self
    }
}

impl fmt::Display for PlannedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_command_line(f, &self.env, &self.program, &self.args)
    }
}

/// Renders `KEY=value program args...` the way a shell would accept it
pub(crate) fn write_command_line(
    f: &mut fmt::Formatter<'_>,
    env: &[(String, String)],
    program: &str,
    args: &[String],
) -> fmt::Result {
    for (key, value) in env {
        write!(f, "{}={} ", key, shell_quote(value))?;
    }
    write!(f, "{}", shell_quote(program))?;
    for arg in args {
        write!(f, " {}", shell_quote(arg))?;
    }
    Ok(())
}

/// Quotes `arg` for `sh` when it contains anything beyond a safe character set
pub fn shell_quote(arg: &str) -> Cow<'_, str> {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=+@%,".contains(c));
    if safe {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg.replace('\'', r"'\''")))
    }
}

/// Commands to run for one family, in execution order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub family: DistroFamily,
    pub package_manager: PackageManager,
    commands: Vec<PlannedCommand>,
}

impl InstallPlan {
    pub fn build(
        family: DistroFamily,
        package_manager: PackageManager,
        package: &Package,
        config: &RunConfig,
    ) -> Self {
        let apt_package = apt_target(package, config);
        let rpm_package = rpm_target(package, config);
        let commands = match family {
            DistroFamily::DebianWithRepository => vec![
                apt(Stage::CacheRefresh, &["update", "-qq"]),
                apt(Stage::RepoSetup, &["install", "-y", "-qq", package.repo_helper]),
                PlannedCommand::new(Stage::RepoSetup, "add-apt-repository", &["-y", package.ppa]),
                apt(Stage::CacheRefresh, &["update", "-qq"]),
                apt(Stage::Install, &["install", "-y", "-qq", apt_package.as_str()]),
            ],
            DistroFamily::Debian => vec![
                apt(Stage::CacheRefresh, &["update", "-qq"]),
                apt(Stage::Install, &["install", "-y", "-qq", apt_package.as_str()]),
            ],
            DistroFamily::Rpm => {
                let program = package_manager.program();
                vec![
                    PlannedCommand::new(Stage::CacheRefresh, program, &["makecache"]),
                    PlannedCommand::new(
                        Stage::Install,
                        program,
                        &["install", "-y", rpm_package.as_str()],
                    ),
                ]
            }
        };

        Self {
            family,
            package_manager,
            commands,
        }
    }

    pub fn commands(&self) -> &[PlannedCommand] {
        &self.commands
    }

    /// Repository setup and cache refresh: everything before the first install step
    pub fn setup_commands(&self) -> &[PlannedCommand] {
        let end = self
            .commands
            .iter()
            .position(|c| c.stage == Stage::Install)
            .unwrap_or(self.commands.len());
        &self.commands[..end]
    }

    /// The install steps that follow [`InstallPlan::setup_commands`]
    pub fn install_commands(&self) -> &[PlannedCommand] {
        &self.commands[self.setup_commands().len()..]
    }
}

fn apt(stage: Stage, args: &[&str]) -> PlannedCommand {
    PlannedCommand::new(stage, PackageManager::AptGet.program(), args)
        .with_env("DEBIAN_FRONTEND", "noninteractive")
}

fn apt_target(package: &Package, config: &RunConfig) -> String {
    match &config.version {
        Some(version) => format!("{}={}*", package.apt_package, version),
        None => package.apt_package.to_string(),
    }
}

fn rpm_target(package: &Package, config: &RunConfig) -> String {
    match &config.version {
        Some(version) => format!("{}-{}", package.rpm_package, version),
        None => package.rpm_package.to_string(),
    }
}
