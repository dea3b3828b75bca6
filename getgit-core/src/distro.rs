use std::fmt;

use crate::error::InstallError;

/// Normalized identity of the host distribution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionInfo {
    /// Lowercase distribution id, e.g. "ubuntu". Empty when nothing could be read.
    pub id: String,
    /// Codename ("bookworm", "jammy") or numeric version ("7", "39")
    pub version: String,
}

impl DistributionInfo {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into().to_lowercase(),
            version: version.into(),
        }
    }

    /// True when this release no longer receives updates
    pub fn is_end_of_life(&self) -> bool {
        END_OF_LIFE
            .iter()
            .any(|(id, version)| *id == self.id && *version == self.version)
    }
}

impl fmt::Display for DistributionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.id)
        } else {
            write!(f, "{} {}", self.id, self.version)
        }
    }
}

/// Releases that are past end-of-life
pub const END_OF_LIFE: &[(&str, &str)] = &[
    ("centos", "7"),
    ("centos", "8"),
    ("rhel", "7"),
    ("debian", "wheezy"),
    ("debian", "jessie"),
    ("debian", "stretch"),
    ("debian", "buster"),
    ("raspbian", "jessie"),
    ("raspbian", "stretch"),
    ("raspbian", "buster"),
    ("ubuntu", "precise"),
    ("ubuntu", "trusty"),
    ("ubuntu", "xenial"),
];

/// Debian major version to codename
const DEBIAN_CODENAMES: &[(&str, &str)] = &[
    ("13", "trixie"),
    ("12", "bookworm"),
    ("11", "bullseye"),
    ("10", "buster"),
    ("9", "stretch"),
    ("8", "jessie"),
    ("7", "wheezy"),
];

/// Turns the contents of `/etc/debian_version` into a codename.
///
/// `12.5` becomes `bookworm`, `trixie/sid` becomes `trixie`; numbers missing
/// from the table are returned as-is.
pub fn debian_codename(debian_version: &str) -> String {
    let major = debian_version
        .trim()
        .split('/')
        .next()
        .unwrap_or_default()
        .split('.')
        .next()
        .unwrap_or_default();

    DEBIAN_CODENAMES
        .iter()
        .find(|(number, _)| *number == major)
        .map(|(_, codename)| codename.to_string())
        .unwrap_or_else(|| major.to_string())
}

/// Bucket of distributions that share the same install steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistroFamily {
    /// apt based, needs the upstream PPA for a current release (Ubuntu)
    DebianWithRepository,
    /// apt based, installs from the distribution archive (Debian, Raspbian)
    Debian,
    /// dnf or yum based (CentOS, RHEL, Fedora)
    Rpm,
}

impl DistroFamily {
    /// Maps a detected distribution to its family
    pub fn resolve(info: &DistributionInfo) -> Result<Self, InstallError> {
        match info.id.as_str() {
            "ubuntu" => Ok(DistroFamily::DebianWithRepository),
            "debian" | "raspbian" => Ok(DistroFamily::Debian),
            "centos" | "rhel" | "fedora" => Ok(DistroFamily::Rpm),
            "darwin" | "macos" => Err(InstallError::unsupported_macos()),
            "" => Err(InstallError::unsupported("unknown")),
            other => Err(InstallError::unsupported(other)),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DistroFamily::DebianWithRepository => "Debian-based with upstream repository",
            DistroFamily::Debian => "Debian-based",
            DistroFamily::Rpm => "RPM-based",
        }
    }
}

/// System package manager used to run the plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageManager {
    AptGet,
    Dnf,
    Yum,
}

impl PackageManager {
    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::AptGet => "apt-get",
            PackageManager::Dnf => "dnf",
            PackageManager::Yum => "yum",
        }
    }

    /// Picks the RPM package manager: dnf when present, yum otherwise
    pub fn for_rpm(has_command: impl Fn(&str) -> bool) -> Self {
        if has_command("dnf") {
            PackageManager::Dnf
        } else {
            PackageManager::Yum
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}
