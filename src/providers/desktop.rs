//! Desktop environment and window manager detection

use super::{Context, Provider};
use crate::render::{InfoLine, RenderItem};
use crate::utils::command;
use std::env;
use std::fs;

/// Window-manager names recognized in the process scan
const WM_NAMES: [&str; 13] = [
    "sway",
    "hyprland",
    "kwin_wayland",
    "kwin_x11",
    "niri",
    "mutter",
    "xfwm4",
    "openbox",
    "i3",
    "bspwm",
    "awesome",
    "weston",
    "dwm",
];

/// Running window manager; empty when the window system is absent or
/// unrecognized
pub struct WindowManager;

impl Provider for WindowManager {
    fn labels(&self) -> Vec<&str> {
        vec!["wm"]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        match detect_wm() {
            Some(name) => vec![RenderItem::Line(InfoLine::new("wm", name))],
            None => Vec::new(),
        }
    }
}

fn detect_wm() -> Option<String> {
    if env::var_os("DISPLAY").is_some() {
        if let Some(name) = query_x_wm() {
            return Some(name);
        }
    }
    scan_wm_processes()
}

/// Ask the X server which window manager claims _NET_SUPPORTING_WM_CHECK
fn query_x_wm() -> Option<String> {
    let check = command::run_command("xprop", &["-root", "_NET_SUPPORTING_WM_CHECK"]).ok()?;
    let id = check
        .split_whitespace()
        .last()
        .filter(|id| id.starts_with("0x"))?;
    let reply = command::run_command("xprop", &["-id", id, "_NET_WM_NAME"]).ok()?;
    let value = reply.split('=').nth(1)?.trim().trim_matches('"').to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Fall back to matching process names against the known list
fn scan_wm_processes() -> Option<String> {
    let entries = fs::read_dir("/proc").ok()?;
    for entry in entries.flatten() {
        let name = entry.file_name();
        if name
            .to_str()
            .map_or(true, |n| n.parse::<u32>().is_err())
        {
            continue;
        }
        if let Ok(comm) = fs::read_to_string(entry.path().join("comm")) {
            let cmd = comm.trim();
            for wm in &WM_NAMES {
                if cmd == *wm || cmd.starts_with(wm) {
                    return Some(cmd.to_string());
                }
            }
        }
    }
    None
}

/// Desktop environment name, verbatim from the session environment
pub struct DesktopEnvironment;

impl Provider for DesktopEnvironment {
    fn labels(&self) -> Vec<&str> {
        vec!["de"]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        let value = env::var("XDG_CURRENT_DESKTOP")
            .ok()
            .filter(|v| !v.is_empty())
            .or_else(|| env::var("DESKTOP_SESSION").ok().filter(|v| !v.is_empty()));
        match value {
            Some(de) => vec![RenderItem::Line(InfoLine::new("de", de))],
            None => Vec::new(),
        }
    }
}
