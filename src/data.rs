//! Cached system identity sources

use crate::error::Result;
use crate::utils::file;
use std::collections::HashMap;
use std::path::Path;

/// Key/value view of /etc/os-release
#[derive(Debug, Default, Clone)]
pub struct OsRelease {
    values: HashMap<String, String>,
}

impl OsRelease {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::parse(&file::read_file_safe(path)?))
    }

    /// Best-effort parse; malformed lines are skipped
    pub fn parse(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }
        OsRelease { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    /// Distro identity used to select ascii art
    pub fn identity(&self) -> Option<&str> {
        self.get("ID").or_else(|| {
            self.get("ID_LIKE")
                .and_then(|like| like.split_whitespace().next())
        })
    }
}

/// One uname() call cached for the whole run
#[derive(Debug, Default, Clone)]
pub struct Uname {
    pub release: String,
    pub machine: String,
    pub nodename: String,
}

impl Uname {
    pub fn query() -> Option<Self> {
        let mut buf: libc::utsname = unsafe { std::mem::zeroed() };
        if unsafe { libc::uname(&mut buf) } != 0 {
            return None;
        }
        Some(Uname {
            release: cstr_field(&buf.release),
            machine: cstr_field(&buf.machine),
            nodename: cstr_field(&buf.nodename),
        })
    }
}

fn cstr_field(field: &[libc::c_char]) -> String {
    let bytes: Vec<u8> = field
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}
