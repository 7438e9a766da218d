//! Memory usage from /proc/meminfo

use super::{Context, Provider};
use crate::render::{InfoLine, RenderItem};
use crate::utils::file;

/// Used and total memory in whole megabytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemUsage {
    pub used_mb: u64,
    pub total_mb: u64,
}

pub struct Memory;

impl Provider for Memory {
    fn labels(&self) -> Vec<&str> {
        vec!["memory"]
    }

    fn produce(&self, _ctx: &Context) -> Vec<RenderItem> {
        let text = match file::read_file_safe("/proc/meminfo") {
            Ok(text) => text,
            Err(_) => return Vec::new(),
        };
        match parse_meminfo(&text) {
            Some(mem) => vec![RenderItem::Line(InfoLine::new(
                "memory",
                format!("{}M / {}M", mem.used_mb, mem.total_mb),
            ))],
            None => Vec::new(),
        }
    }
}

/// Derive usage from meminfo key/value lines
///
/// MemAvailable is authoritative when the kernel provides it; otherwise
/// usage falls back to the classic free/buffers/cache subtraction.
pub fn parse_meminfo(text: &str) -> Option<MemUsage> {
    let mut total = None;
    let mut available = None;
    let mut shmem = 0u64;
    let mut free = 0u64;
    let mut buffers = 0u64;
    let mut cached = 0u64;
    let mut sreclaimable = 0u64;

    for line in text.lines() {
        let (key, rest) = match line.split_once(':') {
            Some(kv) => kv,
            None => continue,
        };
        let value = match rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) {
            Some(value) => value,
            None => continue,
        };
        match key.trim() {
            "MemTotal" => total = Some(value),
            "MemAvailable" => available = Some(value),
            "Shmem" => shmem = value,
            "MemFree" => free = value,
            "Buffers" => buffers = value,
            "Cached" => cached = value,
            "SReclaimable" => sreclaimable = value,
            _ => {}
        }
    }

    let total = total?;
    let used_kb = match available {
        Some(available) => total.saturating_sub(available),
        None => (total + shmem).saturating_sub(free + buffers + cached + sreclaimable),
    };
    Some(MemUsage {
        used_mb: used_kb / 1024,
        total_mb: total / 1024,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_available_formula() {
        let text = "MemTotal:  8000000 kB\nMemAvailable:  4000000 kB\n";
        let mem = parse_meminfo(text).unwrap();
        assert_eq!(mem.used_mb, 3906);
        assert_eq!(mem.total_mb, 7812);
    }

    #[test]
    fn test_fallback_formula_without_mem_available() {
        let text = "\
MemTotal:       8000000 kB
MemFree:        2000000 kB
Buffers:         500000 kB
Cached:         1000000 kB
Shmem:           100000 kB
SReclaimable:    100000 kB
";
        let mem = parse_meminfo(text).unwrap();
        // (8000000 + 100000 - 2000000 - 500000 - 1000000 - 100000) / 1024
        assert_eq!(mem.used_mb, 4394);
        assert_eq!(mem.total_mb, 7812);
    }

    #[test]
    fn test_missing_total_is_unparseable() {
        assert_eq!(parse_meminfo("MemFree: 123 kB\n"), None);
        assert_eq!(parse_meminfo(""), None);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let text = "MemTotal: lots kB\nMemTotal:  2048000 kB\nnoise\n";
        let mem = parse_meminfo(text).unwrap();
        assert_eq!(mem.total_mb, 2000);
    }
}
