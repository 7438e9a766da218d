//! File reading utilities

use crate::error::Result;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Safely read a file to string with error handling
pub fn read_file_safe<P: AsRef<Path>>(path: P) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Read first line of a file, trimmed
/// Optimized for single-line files like /proc/uptime
pub fn read_first_line<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path)?;
    let mut line = String::with_capacity(128);
    BufReader::new(file).read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Check if a file exists safely
pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().exists()
}
