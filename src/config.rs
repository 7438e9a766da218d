//! Environment configuration and the user override table

use crate::utils::file;
use dirs::config_dir;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Runtime settings resolved once from `PF_*` environment variables
#[derive(Debug, Clone)]
pub struct Settings {
    pub term: String,
    /// Explicit PF_COLOR choice; None means auto-detect from the tty
    pub color_pref: Option<bool>,
    pub ascii: Option<String>,
    pub selection: Option<Vec<String>>,
    pub separator: String,
    /// PF_COL1..PF_COL8 slot digits
    pub palette_overrides: [Option<u8>; 8],
    /// PF_ALIGN info-column offset, replaces the measured art width
    pub align: Option<usize>,
    pub source: Option<String>,
    pub pkg_threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            term: String::new(),
            color_pref: None,
            ascii: None,
            selection: None,
            separator: ": ".to_string(),
            palette_overrides: Default::default(),
            align: None,
            source: None,
            pkg_threshold: 10,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from a lookup closure so tests can inject values
    pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let mut palette_overrides: [Option<u8>; 8] = Default::default();
        for (i, slot) in palette_overrides.iter_mut().enumerate() {
            *slot = lookup(&format!("PF_COL{}", i + 1))
                .and_then(|v| v.trim().parse().ok())
                .filter(|&digit| digit <= 9);
        }

        Settings {
            term: lookup("TERM").unwrap_or_default(),
            color_pref: lookup("PF_COLOR").and_then(|v| match v.trim() {
                "0" => Some(false),
                "1" => Some(true),
                _ => None,
            }),
            ascii: lookup("PF_ASCII").filter(|v| !v.is_empty()),
            selection: lookup("PF_INFO")
                .map(|v| v.split_whitespace().map(String::from).collect()),
            separator: lookup("PF_SEP").unwrap_or_else(|| ": ".to_string()),
            palette_overrides,
            align: lookup("PF_ALIGN").and_then(|v| v.trim().parse().ok()),
            source: lookup("PF_SOURCE").filter(|v| !v.is_empty()),
            pkg_threshold: 10,
        }
    }
}

/// User override table, loaded from the path in PF_SOURCE
///
/// Entries extend or replace registry providers before the built-in set
/// is finalized.
#[derive(Deserialize, Debug, Default)]
pub struct Overrides {
    #[serde(default)]
    pub providers: Vec<OverrideEntry>,
    pub pkg_threshold: Option<usize>,
}

/// One provider definition from the override table
#[derive(Deserialize, Debug, Clone)]
pub struct OverrideEntry {
    pub id: String,
    pub label: Option<String>,
    /// Literal value
    pub text: Option<String>,
    /// Command line run through `sh -c`; its stdout becomes the value
    pub run: Option<String>,
    #[serde(default)]
    pub suppress_separator: bool,
    /// 1-based palette slot for the label
    pub label_color: Option<u8>,
}

/// Load the override table named by PF_SOURCE, or the default location
/// when unset. Unreadable or malformed tables are reported once on
/// stderr and ignored; the run continues without them.
pub fn load_overrides(settings: &Settings) -> Option<Overrides> {
    let path: PathBuf = match &settings.source {
        Some(source) => PathBuf::from(shellexpand::tilde(source).to_string()),
        None => config_dir()?.join("picofetch/overrides.toml"),
    };
    if !path.exists() {
        return None;
    }
    let data = match file::read_file_safe(&path) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("picofetch: cannot read {}: {}", path.display(), err);
            return None;
        }
    };
    match toml::from_str(&data) {
        Ok(overrides) => Some(overrides),
        Err(err) => {
            eprintln!("picofetch: invalid override table {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings.separator, ": ");
        assert_eq!(settings.pkg_threshold, 10);
        assert!(settings.selection.is_none());
        assert!(settings.color_pref.is_none());
        assert!(settings.align.is_none());
    }

    #[test]
    fn test_selection_splits_on_whitespace() {
        let settings =
            Settings::from_lookup(lookup_from(&[("PF_INFO", "kernel  uptime memory")]));
        assert_eq!(
            settings.selection.as_deref(),
            Some(&["kernel".to_string(), "uptime".to_string(), "memory".to_string()][..])
        );
    }

    #[test]
    fn test_color_pref_parsing() {
        let off = Settings::from_lookup(lookup_from(&[("PF_COLOR", "0")]));
        assert_eq!(off.color_pref, Some(false));
        let on = Settings::from_lookup(lookup_from(&[("PF_COLOR", "1")]));
        assert_eq!(on.color_pref, Some(true));
        let junk = Settings::from_lookup(lookup_from(&[("PF_COLOR", "yes")]));
        assert_eq!(junk.color_pref, None);
    }

    #[test]
    fn test_palette_override_digits() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("PF_COL1", "6"),
            ("PF_COL3", "42"),
            ("PF_COL8", "0"),
        ]));
        assert_eq!(settings.palette_overrides[0], Some(6));
        // out-of-range digits are ignored
        assert_eq!(settings.palette_overrides[2], None);
        assert_eq!(settings.palette_overrides[7], Some(0));
    }

    #[test]
    fn test_align_override() {
        let settings = Settings::from_lookup(lookup_from(&[("PF_ALIGN", "24")]));
        assert_eq!(settings.align, Some(24));
    }

    #[test]
    fn test_override_table_parsing() {
        let table = r#"
pkg_threshold = 1

[[providers]]
id = "song"
run = "mpc current"

[[providers]]
id = "motd"
label = "note"
text = "hello"
suppress_separator = true
label_color = 3
"#;
        let overrides: Overrides = toml::from_str(table).unwrap();
        assert_eq!(overrides.pkg_threshold, Some(1));
        assert_eq!(overrides.providers.len(), 2);
        assert_eq!(overrides.providers[0].id, "song");
        assert_eq!(overrides.providers[0].run.as_deref(), Some("mpc current"));
        assert_eq!(overrides.providers[1].label.as_deref(), Some("note"));
        assert!(overrides.providers[1].suppress_separator);
        assert_eq!(overrides.providers[1].label_color, Some(3));
    }
}
