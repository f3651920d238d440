//! Input validation primitives.
//!
//! Helpers that turn malformed config values into `config.invalid_value`
//! errors instead of repeating the same `if` + `Err(...)` chains.

use crate::error::{Error, Result};

/// Require a string to be non-empty after trimming.
///
/// Returns the untrimmed value on success; surrounding whitespace is
/// significant in file names and suffixes.
pub fn require_non_empty<'a>(value: &'a str, key: &str) -> Result<&'a str> {
    if value.trim().is_empty() {
        Err(Error::config_invalid_value(
            key,
            Some(value.to_string()),
            "must not be empty",
        ))
    } else {
        Ok(value)
    }
}

/// Require a value usable as a single file-name fragment.
pub fn require_file_name_fragment<'a>(value: &'a str, key: &str) -> Result<&'a str> {
    let value = require_non_empty(value, key)?;
    if value.contains('/') || value.contains('\\') {
        return Err(Error::config_invalid_value(
            key,
            Some(value.to_string()),
            "must not contain path separators",
        ));
    }
    Ok(value)
}
