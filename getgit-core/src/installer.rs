//! The install dispatcher: turns a detected distribution into executed commands.

use std::time::Duration;

use crate::config::{Package, RunConfig, GIT};
use crate::distro::{DistributionInfo, DistroFamily, PackageManager};
use crate::error::InstallError;
use crate::host::Host;
use crate::plan::InstallPlan;
use crate::privilege::Elevation;
use crate::runner::{CommandRunner, DryRunRunner, SystemRunner};

/// Pause after the end-of-life warning
pub const END_OF_LIFE_DELAY: Duration = Duration::from_secs(10);
/// Pause after noticing an existing installation
pub const ALREADY_INSTALLED_DELAY: Duration = Duration::from_secs(5);

const RULE: &str =
    "================================================================================";

/// How a successful run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Package installed; `version` is what the installed command reports
    Installed { version: Option<String> },
    /// Stopped after repository setup (`--setup-repo`)
    RepositoryConfigured,
    /// Every command was shown, nothing was executed
    DryRun,
}

pub struct Installer<'a, H: Host> {
    host: &'a H,
    config: &'a RunConfig,
    package: &'a Package,
}

impl<'a, H: Host> Installer<'a, H> {
    pub fn new(host: &'a H, config: &'a RunConfig) -> Self {
        Self::with_package(host, config, &GIT)
    }

    pub fn with_package(host: &'a H, config: &'a RunConfig, package: &'a Package) -> Self {
        Self {
            host,
            config,
            package,
        }
    }

    /// Resolves the family and builds its plan without running anything
    pub fn plan(&self, info: &DistributionInfo) -> Result<InstallPlan, InstallError> {
        let family = DistroFamily::resolve(info)?;
        let package_manager = match family {
            DistroFamily::Rpm => PackageManager::for_rpm(|cmd| self.host.has_command(cmd)),
            DistroFamily::Debian | DistroFamily::DebianWithRepository => PackageManager::AptGet,
        };
        Ok(InstallPlan::build(
            family,
            package_manager,
            self.package,
            self.config,
        ))
    }

    /// Picks the runner for this config and runs the installation.
    ///
    /// Elevation is only required when commands really execute.
    pub fn install(&self, info: &DistributionInfo) -> Result<Outcome, InstallError> {
        DistroFamily::resolve(info)?;

        if self.config.dry_run {
            let mut runner = DryRunRunner::new();
            return self.run(info, &mut runner);
        }

        let elevation = Elevation::resolve(self.host)?;
        log::debug!("elevating commands with: {}", elevation);
        let mut runner = SystemRunner::new(elevation);
        self.run(info, &mut runner)
    }

    /// Runs the installation through `runner`, stopping at the first failed command
    pub fn run(
        &self,
        info: &DistributionInfo,
        runner: &mut dyn CommandRunner,
    ) -> Result<Outcome, InstallError> {
        let plan = self.plan(info)?;

        if info.is_end_of_life() {
            self.warn_end_of_life(info);
            self.host.pause(END_OF_LIFE_DELAY);
        }

        if self.host.has_command(self.package.command) {
            self.warn_already_installed();
            self.host.pause(ALREADY_INSTALLED_DELAY);
        }

        log::info!(
            "Installing {} on {} ({}, {})",
            self.package.name,
            info,
            plan.family.label(),
            plan.package_manager
        );

        for command in plan.setup_commands() {
            runner.run(command)?;
        }

        if self.config.repo_only {
            println!();
            println!(
                "Repository setup complete. Skipping installation of {} (--setup-repo).",
                self.package.name
            );
            return Ok(Outcome::RepositoryConfigured);
        }

        for command in plan.install_commands() {
            runner.run(command)?;
        }

        if self.config.dry_run {
            return Ok(Outcome::DryRun);
        }

        let version = self.installed_version();
        self.report_success(version.as_deref());
        Ok(Outcome::Installed { version })
    }

    /// Version string of the installed command, if it resolves
    pub fn installed_version(&self) -> Option<String> {
        if !self.host.has_command(self.package.command) {
            return None;
        }
        self.host
            .capture(self.package.command, &["--version"])
            .filter(|v| !v.is_empty())
    }

    fn warn_end_of_life(&self, info: &DistributionInfo) {
        println!();
        println!("DEPRECATION WARNING");
        println!(
            "    This Linux distribution ({}) reached end-of-life and is no longer supported by this script.",
            info
        );
        println!("    No updates or security fixes will be released for this distribution, and");
        println!("    the {} packages it offers may be outdated.", self.package.name);
        println!("    Please upgrade to a currently maintained version of {}.", info.id);
        println!();
        println!("Press Ctrl+C now to abort this script, or wait for the installation to continue.");
        println!();
    }

    fn warn_already_installed(&self) {
        let current = self
            .installed_version()
            .unwrap_or_else(|| "unknown version".to_string());
        println!(
            "Warning: the \"{}\" command appears to already exist on this system ({}).",
            self.package.command, current
        );
        println!();
        println!("If you already have {} installed, this script can cause trouble, which is", self.package.name);
        println!("why we're displaying this warning and provide the opportunity to cancel the");
        println!("installation.");
        println!();
        println!("You may press Ctrl+C now to abort this script.");
    }

    fn report_success(&self, version: Option<&str>) {
        println!();
        println!("{}", RULE);
        println!();
        println!("{} was installed successfully.", self.package.name);
        if let Some(version) = version {
            println!();
            println!("    {}", version);
        }
        println!();
        println!("{}", RULE);
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::PlannedCommand;
    use crate::testing::FakeHost;

    /// Succeeds until the configured call, then fails like apt-get would
    struct FailingRunner {
        fail_at: usize,
        seen: Vec<String>,
    }

    impl CommandRunner for FailingRunner {
        fn run(&mut self, command: &PlannedCommand) -> Result<(), InstallError> {
            self.seen.push(command.to_string());
            if self.seen.len() == self.fail_at {
                return Err(InstallError::CommandFailure {
                    command: command.to_string(),
                    code: Some(100),
                });
            }
            Ok(())
        }
    }

    fn run_recorded(
        host: &FakeHost,
        config: &RunConfig,
        info: &DistributionInfo,
    ) -> (Result<Outcome, InstallError>, Vec<String>) {
        let mut runner = DryRunRunner::quiet();
        let result = Installer::new(host, config).run(info, &mut runner);
        (result, runner.recorded().to_vec())
    }

    #[test]
    fn test_ubuntu_end_to_end() {
        let host = FakeHost::new();
        let info = DistributionInfo::new("ubuntu", "jammy");
        let (result, commands) = run_recorded(&host, &RunConfig::default(), &info);

        assert_eq!(result.unwrap(), Outcome::Installed { version: None });
        assert_eq!(
            commands,
            vec![
                "DEBIAN_FRONTEND=noninteractive apt-get update -qq",
                "DEBIAN_FRONTEND=noninteractive apt-get install -y -qq software-properties-common",
                "add-apt-repository -y ppa:git-core/ppa",
                "DEBIAN_FRONTEND=noninteractive apt-get update -qq",
                "DEBIAN_FRONTEND=noninteractive apt-get install -y -qq git",
            ]
        );
        assert_eq!(host.pause_count(), 0);
    }

    #[test]
    fn test_repo_only_stops_after_cache_refresh() {
        let host = FakeHost::new();
        let config = RunConfig::new(false, true, None);
        let info = DistributionInfo::new("ubuntu", "jammy");
        let (result, commands) = run_recorded(&host, &config, &info);

        assert_eq!(result.unwrap(), Outcome::RepositoryConfigured);
        assert_eq!(commands.len(), 4);
        assert_eq!(
            commands.last().unwrap(),
            "DEBIAN_FRONTEND=noninteractive apt-get update -qq"
        );
        assert!(!commands.iter().any(|c| c.ends_with("install -y -qq git")));
    }

    #[test]
    fn test_repo_only_on_debian_just_refreshes() {
        let host = FakeHost::new();
        let config = RunConfig::new(false, true, None);
        let info = DistributionInfo::new("debian", "bookworm");
        let (result, commands) = run_recorded(&host, &config, &info);

        assert_eq!(result.unwrap(), Outcome::RepositoryConfigured);
        assert_eq!(commands, vec!["DEBIAN_FRONTEND=noninteractive apt-get update -qq"]);
    }

    #[test]
    fn test_dry_run_needs_no_elevation() {
        // Not root, and neither sudo nor su available
        let host = FakeHost::new();
        let config = RunConfig::new(true, false, None);
        let info = DistributionInfo::new("fedora", "40");

        let outcome = Installer::new(&host, &config).install(&info).unwrap();
        assert_eq!(outcome, Outcome::DryRun);
    }

    #[test]
    fn test_dry_run_shows_the_real_plan() {
        let host = FakeHost::new().with_command("dnf");
        let info = DistributionInfo::new("fedora", "40");
        let dry = RunConfig::new(true, false, None);
        let real = RunConfig::default();

        let (dry_result, dry_commands) = run_recorded(&host, &dry, &info);
        assert_eq!(dry_result.unwrap(), Outcome::DryRun);

        let plan = Installer::new(&host, &real).plan(&info).unwrap();
        let planned: Vec<String> = plan.commands().iter().map(|c| c.to_string()).collect();
        assert_eq!(dry_commands, planned);
    }

    #[test]
    fn test_missing_elevation_aborts_before_any_command() {
        let host = FakeHost::new();
        let config = RunConfig::default();
        let info = DistributionInfo::new("debian", "bookworm");

        let err = Installer::new(&host, &config).install(&info).unwrap_err();
        assert!(matches!(err, InstallError::PrivilegeUnavailable));
    }

    #[test]
    fn test_centos_7_warns_once_and_uses_yum() {
        let host = FakeHost::new().with_command("yum");
        let info = DistributionInfo::new("centos", "7");
        let (result, commands) = run_recorded(&host, &RunConfig::default(), &info);

        assert!(result.is_ok());
        assert_eq!(*host.pauses.borrow(), vec![END_OF_LIFE_DELAY]);
        assert_eq!(commands, vec!["yum makecache", "yum install -y git"]);
    }

    #[test]
    fn test_existing_install_is_noticed_and_reported() {
        let host = FakeHost::new()
            .as_root()
            .with_output("git --version", "git version 2.34.1");
        let info = DistributionInfo::new("debian", "bookworm");
        let (result, _) = run_recorded(&host, &RunConfig::default(), &info);

        assert_eq!(
            result.unwrap(),
            Outcome::Installed {
                version: Some("git version 2.34.1".to_string())
            }
        );
        assert_eq!(*host.pauses.borrow(), vec![ALREADY_INSTALLED_DELAY]);
    }

    #[test]
    fn test_macos_is_unsupported_and_runs_nothing() {
        let host = FakeHost::new().with_kernel("Darwin");
        let info = DistributionInfo::new("darwin", "");
        let (result, commands) = run_recorded(&host, &RunConfig::default(), &info);

        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 1);
        match err {
            InstallError::UnsupportedPlatform { hint, .. } => {
                assert!(hint.unwrap().contains("xcode-select --install"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(commands.is_empty());
    }

    #[test]
    fn test_empty_id_is_unsupported() {
        let host = FakeHost::new().as_root();
        let err = Installer::new(&host, &RunConfig::default())
            .install(&DistributionInfo::default())
            .unwrap_err();
        assert!(matches!(err, InstallError::UnsupportedPlatform { .. }));
    }

    #[test]
    fn test_first_failure_aborts_the_run() {
        let host = FakeHost::new();
        let config = RunConfig::default();
        let info = DistributionInfo::new("ubuntu", "jammy");
        let mut runner = FailingRunner {
            fail_at: 2,
            seen: Vec::new(),
        };

        let err = Installer::new(&host, &config)
            .run(&info, &mut runner)
            .unwrap_err();
        assert_eq!(err.exit_code(), 100);
        assert_eq!(runner.seen.len(), 2);
    }
}
