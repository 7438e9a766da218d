//! String parsing utilities

/// Format uptime from seconds, omitting zero components
///
/// All-zero input yields "0m".
pub fn format_uptime(seconds: u64) -> String {
    let days = seconds / 86400;
    let hours = (seconds % 86400) / 3600;
    let minutes = (seconds % 3600) / 60;

    let mut out = String::new();
    if days > 0 {
        out.push_str(&format!("{}d ", days));
    }
    if hours > 0 {
        out.push_str(&format!("{}h ", hours));
    }
    if minutes > 0 {
        out.push_str(&format!("{}m ", minutes));
    }
    if out.is_empty() {
        out.push_str("0m");
    }
    out
}

/// First field of /proc/uptime as whole seconds
pub fn parse_uptime(text: &str) -> Option<u64> {
    text.split_whitespace()
        .next()?
        .parse::<f64>()
        .ok()
        .map(|secs| secs as u64)
}

/// Final path component
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
