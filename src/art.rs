//! Ascii art loading and measurement

use crate::data::OsRelease;
use crate::term::{strip_sequences, Palette};
use crate::utils::file;
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

/// Art bundled into the binary, keyed by os-release identity
fn builtin(identity: &str) -> Option<&'static str> {
    match identity {
        "alpine" => Some(include_str!("../ascii/alpine.txt")),
        "arch" => Some(include_str!("../ascii/arch.txt")),
        "debian" => Some(include_str!("../ascii/debian.txt")),
        "fedora" => Some(include_str!("../ascii/fedora.txt")),
        "gentoo" => Some(include_str!("../ascii/gentoo.txt")),
        "nixos" => Some(include_str!("../ascii/nixos.txt")),
        "ubuntu" => Some(include_str!("../ascii/ubuntu.txt")),
        "void" => Some(include_str!("../ascii/void.txt")),
        "linux" => Some(include_str!("../ascii/linux.txt")),
        _ => None,
    }
}

/// Glyph block with its measured display size
pub struct Art {
    pub lines: Vec<String>,
    pub width: usize,
    pub height: usize,
}

impl Art {
    fn from_text(text: String) -> Self {
        let (width, height) = measure(&text);
        Art {
            lines: text.lines().map(String::from).collect(),
            width,
            height,
        }
    }
}

/// Resolve art by priority: explicit argument, then the environment
/// override, then the detected os-release identity, then the generic
/// fallback.
pub fn load(
    explicit: Option<&str>,
    env_override: Option<&str>,
    os_release: Option<&OsRelease>,
    palette: &Palette,
) -> Art {
    let detected = os_release.and_then(|os| os.identity());
    let identity = explicit.or(env_override).or(detected).unwrap_or("linux");
    let text = lookup(identity)
        .unwrap_or_else(|| include_str!("../ascii/linux.txt").to_string());
    Art::from_text(substitute_colors(&text, palette))
}

/// Find art text for an identity
///
/// A path-looking identity loads straight from disk; otherwise the user
/// art directory is consulted before the built-in set.
fn lookup(identity: &str) -> Option<String> {
    if identity.contains('/') || identity.starts_with('~') {
        let expanded = shellexpand::tilde(identity).to_string();
        return file::read_file_safe(expanded).ok();
    }
    let identity = identity.to_lowercase();
    if let Some(dir) = dirs::config_dir() {
        let user_art: PathBuf = dir.join("picofetch/art").join(format!("{}.txt", identity));
        if user_art.exists() {
            if let Ok(text) = file::read_file_safe(&user_art) {
                return Some(text);
            }
        }
    }
    builtin(&identity).map(str::to_string)
}

/// Replace `${c1}`..`${c8}` tokens with resolved palette slots
pub fn substitute_colors(text: &str, palette: &Palette) -> String {
    let mut out = text.to_string();
    for n in 1..=8 {
        out = out.replace(&format!("${{c{}}}", n), palette.slot(n));
    }
    out
}

/// Width and height of art text, escape sequences excluded from the count
pub fn measure(text: &str) -> (usize, usize) {
    let stripped = strip_sequences(text);
    let width = stripped
        .lines()
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);
    let height = stripped.lines().count();
    (width, height)
}
