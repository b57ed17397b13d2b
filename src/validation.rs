//! Small validators for settings values.

use std::ops::RangeInclusive;

/// Validates that a string names a `log` filter level.
///
/// # Arguments
///
/// * `level` - The string to validate.
///
/// # Returns
///
/// * `Ok(())` if the level is one of the known filter names.
/// * `Err(&'static str)` otherwise.
pub fn is_valid_log_level(level: &str) -> Result<(), &'static str> {
    match level {
        "off" | "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
        _ => Err("Log level must be one of off, error, warn, info, debug, trace"),
    }
}

/// Validates that a value lies within an inclusive range.
///
/// # Arguments
///
/// * `value` - The value to validate.
/// * `range` - The inclusive range to validate against.
///
/// # Returns
///
/// * `Ok(())` if the value is within the range.
/// * `Err(&'static str)` if the value is outside the range.
pub fn is_in_range<T: PartialOrd>(value: T, range: RangeInclusive<T>) -> Result<(), &'static str> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err("Value is outside the specified range")
    }
}
