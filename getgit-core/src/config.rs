/// Configuration for one installation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunConfig {
    /// Print the planned commands instead of running them
    pub dry_run: bool,
    /// Stop after the repository is configured and the cache refreshed
    pub repo_only: bool,
    /// Package version to request, without any leading `v`
    pub version: Option<String>,
}

impl RunConfig {
    /// Builds a config, normalizing the requested version.
    /// An empty version means "latest".
    pub fn new(dry_run: bool, repo_only: bool, version: Option<&str>) -> Self {
        Self {
            dry_run,
            repo_only,
            version: version.and_then(normalize_version),
        }
    }
}

/// Strips a leading `v` (as in `v2.43.0`) and surrounding whitespace
pub fn normalize_version(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    let stripped = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// The software this installer puts on the host
#[derive(Debug, Clone, Copy)]
pub struct Package {
    pub name: &'static str,
    /// Command that is on PATH once installed
    pub command: &'static str,
    pub apt_package: &'static str,
    pub rpm_package: &'static str,
    /// Third-party repository for distributions that ship an old release
    pub ppa: &'static str,
    /// Package that provides `add-apt-repository`
    pub repo_helper: &'static str,
}

pub const GIT: Package = Package {
    name: "Git",
    command: "git",
    apt_package: "git",
    rpm_package: "git",
    ppa: "ppa:git-core/ppa",
    repo_helper: "software-properties-common",
};
