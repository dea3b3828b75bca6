//! Distribution detection from os-release, lsb_release and debian_version.

use std::collections::HashMap;

use crate::distro::{debian_codename, DistributionInfo};
use crate::error::InstallError;
use crate::host::Host;

pub const OS_RELEASE: &str = "/etc/os-release";
pub const DEBIAN_VERSION: &str = "/etc/debian_version";

/// Ids that map to a distribution family
const RECOGNIZED_IDS: &[&str] = &["ubuntu", "debian", "raspbian", "centos", "rhel", "fedora"];

/// Parses `KEY=VALUE` lines, dropping comments and surrounding quotes
pub fn parse_os_release(contents: &str) -> HashMap<String, String> {
    let mut fields = HashMap::new();
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once('=') {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            fields.insert(key.trim().to_string(), value.to_string());
        }
    }
    fields
}

/// Detects the host distribution.
///
/// Missing identification sources produce an empty id rather than an error;
/// the only error is a Darwin kernel with nothing to identify.
pub fn detect(host: &impl Host) -> Result<DistributionInfo, InstallError> {
    let os_release = host
        .read_file(OS_RELEASE)
        .map(|contents| parse_os_release(&contents))
        .unwrap_or_default();

    let mut id = os_release.get("ID").cloned().unwrap_or_default();
    let mut codename = os_release
        .get("VERSION_CODENAME")
        .cloned()
        .filter(|c| !c.is_empty());

    if host.has_command("lsb_release") {
        if let Some(lsb_id) = non_empty(host.capture("lsb_release", &["-is"])) {
            log::debug!("lsb_release reports id '{}'", lsb_id);
            let lsb_id = normalize_lsb_id(&lsb_id);
            if id.is_empty() || RECOGNIZED_IDS.contains(&lsb_id.as_str()) {
                id = lsb_id;
            }
        }
        if let Some(lsb_codename) = non_empty(host.capture("lsb_release", &["-cs"])) {
            log::debug!("lsb_release reports codename '{}'", lsb_codename);
            codename = Some(lsb_codename);
        }
    }

    let id = id.to_lowercase();
    let version = if matches!(id.as_str(), "ubuntu" | "debian" | "raspbian") {
        match codename {
            Some(codename) => codename,
            None => host
                .read_file(DEBIAN_VERSION)
                .map(|v| debian_codename(&v))
                .unwrap_or_default(),
        }
    } else if matches!(id.as_str(), "centos" | "rhel" | "fedora") {
        // "7.9" and "7" are the same release
        os_release
            .get("VERSION_ID")
            .map(|v| v.split('.').next().unwrap_or_default().to_string())
            .unwrap_or_default()
    } else {
        os_release.get("VERSION_ID").cloned().unwrap_or_default()
    };

    let info = check_forked(host, DistributionInfo::new(id, version));

    if info.id.is_empty() && host.kernel_name().trim() == "Darwin" {
        return Err(InstallError::unsupported_macos());
    }

    log::debug!("detected distribution: '{}' version '{}'", info.id, info.version);
    Ok(info)
}

/// Re-derives id and version for distributions built on top of Debian or Ubuntu
fn check_forked(host: &impl Host, info: DistributionInfo) -> DistributionInfo {
    // Derivatives such as Linux Mint report their upstream with `-u`
    if host.has_command("lsb_release") {
        if let Some(upstream) = host.capture("lsb_release", &["-a", "-u"]) {
            let (upstream_id, upstream_codename) = parse_lsb_upstream(&upstream);
            if let (Some(upstream_id), Some(upstream_codename)) = (upstream_id, upstream_codename) {
                println!();
                println!("You're using '{}' version '{}'.", info.id, info.version);
                println!(
                    "Upstream release is '{}' version '{}'.",
                    upstream_id, upstream_codename
                );
                println!();
                return DistributionInfo::new(upstream_id, upstream_codename);
            }
        }
    }

    if let Some(debian_version) = host.read_file(DEBIAN_VERSION) {
        if info.id != "ubuntu" && info.id != "raspbian" {
            // OSMC runs Raspbian
            let id = if info.id == "osmc" { "raspbian" } else { "debian" };
            if info.id != id {
                log::debug!("'{}' is a Debian derivative, treating it as {}", info.id, id);
            }
            return DistributionInfo::new(id, debian_codename(&debian_version));
        }
    }

    info
}

/// Extracts the lowercase id and codename from `lsb_release -a -u` output
fn parse_lsb_upstream(output: &str) -> (Option<String>, Option<String>) {
    let mut id = None;
    let mut codename = None;
    for line in output.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value: String = value.chars().filter(|c| !c.is_whitespace()).collect();
        if value.is_empty() {
            continue;
        }
        if key.contains("id") {
            id = Some(value.to_lowercase());
        } else if key == "codename" {
            codename = Some(value.to_lowercase());
        }
    }
    (id, codename)
}

/// Maps `lsb_release -is` names onto os-release ids
fn normalize_lsb_id(lsb_id: &str) -> String {
    let id = lsb_id.trim().to_lowercase();
    if id.starts_with("redhatenterprise") {
        "rhel".to_string()
    } else if id.starts_with("centos") {
        "centos".to_string()
    } else {
        id
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
