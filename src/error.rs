//! Custom error types for the panel.
//!
//! This module defines the primary error type, `PanelError`, used across the
//! crate. Using the `thiserror` crate, it provides a centralized and
//! consistent way to classify failures:
//!
//! - **`Config`**: wraps errors from the `config` crate, typically file
//!   parsing or format issues in the simulator settings.
//! - **`Configuration`**: semantic errors in settings that parse fine but are
//!   logically invalid (e.g. a neutral value outside the channel range).
//!   These are caught during the validation step.
//! - **`MissingObject` / `MissingField` / `IndexOutOfRange` / `ValueKind`**:
//!   integration errors — the registry does not match the schema this panel
//!   was built against. These indicate a version mismatch between the GCS and
//!   the board's object set and are surfaced as hard failures, never silently
//!   tolerated.
//! - **`InvalidOption`**: an attempt to store a string that is not one of an
//!   enumerated field's declared options.
//!
//! Guarded refusals (an active alarm, a declined confirmation) are *not*
//! errors; those paths report through the UI seam and return `Ok`.

use thiserror::Error;

/// Convenience alias for results using the panel error type.
pub type AppResult<T> = std::result::Result<T, PanelError>;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Configuration validation error: {0}")]
    Configuration(String),

    #[error("Object '{0}' is not registered")]
    MissingObject(String),

    #[error("Object '{object}' has no field '{field}'")]
    MissingField { object: String, field: String },

    #[error("Index {index} out of range for field '{field}' ({len} elements)")]
    IndexOutOfRange {
        field: String,
        index: usize,
        len: usize,
    },

    #[error("Field '{field}' does not hold a {expected} value")]
    ValueKind {
        field: String,
        expected: &'static str,
    },

    #[error("'{value}' is not an option of field '{field}'")]
    InvalidOption { field: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_object_names_the_object() {
        let err = PanelError::MissingObject("ActuatorSettings".into());
        assert_eq!(err.to_string(), "Object 'ActuatorSettings' is not registered");
    }

    #[test]
    fn index_error_reports_field_and_bounds() {
        let err = PanelError::IndexOutOfRange {
            field: "ChannelMin".into(),
            index: 12,
            len: 10,
        };
        let msg = err.to_string();
        assert!(msg.contains("ChannelMin"));
        assert!(msg.contains("12"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn config_error_converts_via_from() {
        let source = config::ConfigError::Message("bad toml".into());
        let err: PanelError = source.into();
        assert!(matches!(err, PanelError::Config(_)));
    }
}
