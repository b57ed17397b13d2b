//! Names and sizes of the remote objects this panel works against.
//!
//! The registry schema is owned by the flight side; the GCS must agree on
//! object names, field names and array sizes byte-for-byte. Keeping them in
//! one module makes a schema mismatch a one-file diff.

/// Number of servo/motor output channels on the board.
///
/// Channel indices run 0..10 internally; operator-facing labels are 1-based.
pub const CHANNEL_COUNT: usize = 10;

/// Settings object holding channel assignments, ranges and update rates.
pub const ACTUATOR_SETTINGS: &str = "ActuatorSettings";

/// Command object carrying the live output values during channel testing.
pub const ACTUATOR_COMMAND: &str = "ActuatorCommand";

/// Per-subsystem alarm levels reported by the flight side.
pub const SYSTEM_ALARMS: &str = "SystemAlarms";

/// Channel array on [`ACTUATOR_COMMAND`].
pub const FIELD_CHANNEL: &str = "Channel";

/// Per-channel minimum output, on [`ACTUATOR_SETTINGS`].
pub const FIELD_CHANNEL_MIN: &str = "ChannelMin";
/// Per-channel maximum output, on [`ACTUATOR_SETTINGS`].
pub const FIELD_CHANNEL_MAX: &str = "ChannelMax";
/// Per-channel neutral point, on [`ACTUATOR_SETTINGS`].
pub const FIELD_CHANNEL_NEUTRAL: &str = "ChannelNeutral";

/// Update rate per output bank, indexed 0..4, on [`ACTUATOR_SETTINGS`].
pub const FIELD_CHANNEL_UPDATE_FREQ: &str = "ChannelUpdateFreq";

/// Spin-at-neutral-while-armed flag on [`ACTUATOR_SETTINGS`].
pub const FIELD_MOTORS_SPIN_WHILE_ARMED: &str = "MotorsSpinWhileArmed";

/// Enabled literal of [`FIELD_MOTORS_SPIN_WHILE_ARMED`]. The flag is an
/// enumerated field, not a boolean: the match is exact and case-sensitive.
pub const SPIN_TRUE: &str = "TRUE";
/// Disabled literal of [`FIELD_MOTORS_SPIN_WHILE_ARMED`].
pub const SPIN_FALSE: &str = "FALSE";

/// Alarm-level array on [`SYSTEM_ALARMS`].
pub const FIELD_ALARM: &str = "Alarm";

/// Row of the actuator subsystem within [`FIELD_ALARM`].
pub const ALARM_ACTUATOR: usize = 7;

/// Alarm level meaning "no fault".
pub const ALARM_OK: &str = "OK";

/// Declared levels of [`FIELD_ALARM`].
pub const ALARM_LEVELS: [&str; 5] = ["Uninitialised", "OK", "Warning", "Error", "Critical"];

/// Unit tag marking a field as an output channel assignment. Detection is a
/// substring match on the field's unit string.
pub const CHANNEL_UNIT_TAG: &str = "channel";

/// Number of output banks with independently configurable update rates.
pub const RATE_BANK_COUNT: usize = 4;
