//! Checks on command line input. These never touch the file's contents.
use std::fs;
use std::path::Path;

use crate::error::ValidationError;
use crate::scan_range::ScanRange;

/// Require a non-blank path naming an existing regular file
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<(), ValidationError> {
    let path = path.as_ref();
    if path.as_os_str().to_string_lossy().trim().is_empty() {
        return Err(ValidationError::EmptyPath);
    }
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(ValidationError::NotAFile(path.to_path_buf())),
        Err(_) => Err(ValidationError::FileNotFound(path.to_path_buf())),
    }
}

/// Turn zero, one or two scan numbers into a [`ScanRange`]
pub fn validate_scan_range(values: &[i32]) -> Result<ScanRange, ValidationError> {
    if values.len() > 2 {
        return Err(ValidationError::TooManyValues(values.len()));
    }
    if let Some(bad) = values.iter().copied().find(|v| *v < 1) {
        return Err(ValidationError::NonPositiveScan(bad));
    }
    match *values {
        [] => Ok(ScanRange::Full),
        [scan] => Ok(ScanRange::Single(scan)),
        [lo, hi] if hi < lo => Err(ValidationError::InvertedRange { lo, hi }),
        [lo, hi] => Ok(ScanRange::Between(lo, hi)),
        _ => Err(ValidationError::TooManyValues(values.len())),
    }
}
