//! Package count collection

use super::{Context, Provider};
use crate::error::Result;
use crate::render::{InfoLine, RenderItem};
use crate::utils::command::{command_exists, run_command};
use crate::utils::file::file_exists;
use std::fs;

/// Supported package managers for different Linux distributions
#[derive(Debug)]
enum PackageManager {
    Pacman,  // Arch Linux, Manjaro
    Dpkg,    // Debian, Ubuntu
    Rpm,     // Fedora, RHEL
    Xbps,    // Void Linux
    Portage, // Gentoo
    Nix,     // NixOS
}

pub struct Packages;

impl Provider for Packages {
    fn labels(&self) -> Vec<&str> {
        vec!["pkgs"]
    }

    fn produce(&self, ctx: &Context) -> Vec<RenderItem> {
        let count = package_count().unwrap_or(0);
        if !display_count(count, ctx.settings.pkg_threshold) {
            return Vec::new();
        }
        vec![RenderItem::Line(InfoLine::new("pkgs", count.to_string()))]
    }
}

/// Counts under the threshold are hidden as noise
fn display_count(count: usize, threshold: usize) -> bool {
    count >= threshold
}

fn package_count() -> Result<usize> {
    match detect_package_manager() {
        Some(PackageManager::Pacman) => pacman_count(),
        Some(PackageManager::Dpkg) => dpkg_count(),
        Some(PackageManager::Rpm) => rpm_count(),
        Some(PackageManager::Xbps) => xbps_count(),
        Some(PackageManager::Portage) => portage_count(),
        Some(PackageManager::Nix) => nix_count(),
        None => Ok(0),
    }
}

fn detect_package_manager() -> Option<PackageManager> {
    // file-based indicators first, most common systems first
    if file_exists("/var/lib/pacman/local") {
        Some(PackageManager::Pacman)
    } else if file_exists("/var/lib/dpkg/status") {
        Some(PackageManager::Dpkg)
    } else if file_exists("/var/lib/rpm") {
        Some(PackageManager::Rpm)
    } else if file_exists("/var/db/xbps") {
        Some(PackageManager::Xbps)
    } else if file_exists("/var/db/pkg") {
        Some(PackageManager::Portage)
    } else if command_exists("nix-store") {
        Some(PackageManager::Nix)
    } else {
        None
    }
}

fn pacman_count() -> Result<usize> {
    Ok(fs::read_dir("/var/lib/pacman/local")?.count())
}

fn dpkg_count() -> Result<usize> {
    let output = run_command("dpkg-query", &["-f", "${binary:Package}\n", "-W"])?;
    Ok(output.lines().filter(|line| !line.is_empty()).count())
}

fn rpm_count() -> Result<usize> {
    let output = run_command("rpm", &["-qa"])?;
    Ok(output.lines().filter(|line| !line.is_empty()).count())
}

fn xbps_count() -> Result<usize> {
    // package metadata lives as .plist files in /var/db/xbps
    if let Ok(entries) = fs::read_dir("/var/db/xbps") {
        let count = entries
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .path()
                    .file_name()
                    .and_then(|n| n.to_str())
                    .map(|n| n.ends_with(".plist"))
                    .unwrap_or(false)
            })
            .count();
        if count > 0 {
            return Ok(count);
        }
    }

    // fall back to xbps-query if directory counting found nothing
    let output = run_command("xbps-query", &["-l"])?;
    Ok(output.lines().count())
}

fn portage_count() -> Result<usize> {
    // /var/db/pkg is category/package, count the nested directories
    let mut count = 0;
    for entry in fs::read_dir("/var/db/pkg")?.flatten() {
        let path = entry.path();
        if path.is_dir() {
            if let Ok(sub_entries) = fs::read_dir(&path) {
                count += sub_entries.count();
            }
        }
    }
    Ok(count)
}

fn nix_count() -> Result<usize> {
    let output = run_command(
        "nix-store",
        &["--query", "--requisites", "/run/current-system/sw"],
    )?;
    Ok(output.lines().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_hides_small_counts() {
        assert!(!display_count(0, 10));
        assert!(!display_count(9, 10));
        assert!(display_count(10, 10));
        assert!(display_count(1247, 10));
    }

    #[test]
    fn test_threshold_is_configurable() {
        assert!(display_count(3, 1));
        assert!(!display_count(3, 100));
    }
}
