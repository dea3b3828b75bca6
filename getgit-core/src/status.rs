use std::fmt;

use crate::config::Package;
use crate::detect::detect;
use crate::distro::{DistributionInfo, DistroFamily};
use crate::error::InstallError;
use crate::host::Host;
use crate::privilege::Elevation;

/// What an installation would run into on this host
#[derive(Debug)]
pub struct StatusReport {
    pub distribution: Result<DistributionInfo, InstallError>,
    pub family: Option<DistroFamily>,
    pub end_of_life: bool,
    pub elevation: Option<Elevation>,
    pub package_name: &'static str,
    /// Version reported by the already installed command
    pub installed: Option<String>,
}

impl StatusReport {
    pub fn is_supported(&self) -> bool {
        self.family.is_some()
    }
}

/// Gathers host status without changing anything
pub fn check_status(host: &impl Host, package: &Package) -> StatusReport {
    let distribution = detect(host);
    let (family, end_of_life) = match &distribution {
        Ok(info) => (DistroFamily::resolve(info).ok(), info.is_end_of_life()),
        Err(_) => (None, false),
    };

    let installed = if host.has_command(package.command) {
        host.capture(package.command, &["--version"])
            .or_else(|| Some("installed".to_string()))
    } else {
        None
    };

    StatusReport {
        distribution,
        family,
        end_of_life,
        elevation: Elevation::resolve(host).ok(),
        package_name: package.name,
        installed,
    }
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\n==================================================")?;
        writeln!(f, "  Host Status")?;
        writeln!(f, "==================================================\n")?;

        match &self.distribution {
            Ok(info) if info.id.is_empty() => writeln!(f, "✗ Distribution: unknown")?,
            Ok(info) => writeln!(f, "✓ Distribution: {}", info)?,
            Err(e) => writeln!(f, "✗ Distribution: {}", e)?,
        }

        match self.family {
            Some(family) => writeln!(f, "✓ Family: {}", family.label())?,
            None => writeln!(f, "✗ Family: unsupported")?,
        }

        if self.end_of_life {
            writeln!(f, "⚠ This release has reached end-of-life")?;
        }

        match self.elevation {
            Some(elevation) => writeln!(f, "✓ Elevation: {}", elevation)?,
            None => writeln!(f, "✗ Elevation: neither sudo nor su found")?,
        }

        match &self.installed {
            Some(version) => writeln!(f, "✓ {}: {}", self.package_name, version)?,
            None => writeln!(f, "✗ {}: not installed", self.package_name)?,
        }

        writeln!(f, "\n==================================================")
    }
}
