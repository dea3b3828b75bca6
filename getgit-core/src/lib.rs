//! Detect the host Linux distribution and install git with its native package manager.
//!
//! The flow is one-way: [`detect`] reads the host identity, then an
//! [`Installer`] maps it to a [`DistroFamily`], builds an [`InstallPlan`] and
//! hands each command to a [`CommandRunner`]. Dry runs and tests swap in
//! [`DryRunRunner`]; nothing else changes.

mod config;
mod detect;
mod distro;
mod error;
mod host;
mod installer;
mod plan;
mod privilege;
mod runner;
mod status;

#[cfg(test)]
mod testing;

pub use config::{normalize_version, Package, RunConfig, GIT};
pub use detect::{detect, parse_os_release, DEBIAN_VERSION, OS_RELEASE};
pub use distro::{debian_codename, DistributionInfo, DistroFamily, PackageManager, END_OF_LIFE};
pub use error::InstallError;
pub use host::{Host, SystemHost};
pub use installer::{Installer, Outcome, ALREADY_INSTALLED_DELAY, END_OF_LIFE_DELAY};
pub use plan::{shell_quote, InstallPlan, PlannedCommand, Stage};
pub use privilege::{Elevation, Invocation};
pub use runner::{CommandRunner, DryRunRunner, SystemRunner};
pub use status::{check_status, StatusReport};
