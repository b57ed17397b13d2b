//! Output test interlock.
//!
//! Driving servos from the configuration panel means taking the actuator
//! command object away from the flight side. The interlock is a two-state
//! machine guarding that takeover:
//!
//! - **Idle** — outputs follow normal flight/ground telemetry rules.
//! - **Armed** — the GCS holds exclusive write access to the output channels
//!   and streams slider values straight to the board.
//!
//! Arming snapshots the command object's telemetry metadata and replaces it
//! with a ground-exclusive profile; disarming restores the snapshot verbatim.
//! Two guards sit in front of the transition: the actuator subsystem alarm
//! must read OK, and the operator must explicitly confirm that motors may
//! spin. Either guard refusing leaves the machine Idle and reverts the
//! toggle.

use crate::error::AppResult;
use crate::metadata::{AccessMode, ObjectMetadata, UpdateMode};
use crate::registry::ObjectRegistry;
use crate::schema::{
    ACTUATOR_COMMAND, ALARM_ACTUATOR, ALARM_OK, CHANNEL_COUNT, FIELD_ALARM, FIELD_CHANNEL,
    SYSTEM_ALARMS,
};
use crate::ui::UserPrompt;

/// Ground-side update period applied while armed, in telemetry time units.
pub const TEST_UPDATE_PERIOD: u32 = 100;

/// Warning shown when the actuator subsystem alarm blocks arming.
pub const ACTUATOR_ALARM_WARNING: &str = "The actuator module is in an error state. \
     This can also occur because there are no inputs. \
     Please fix these before testing outputs.";

/// Safety question asked before arming.
pub const TEST_MODE_QUESTION: &str = "This option will start your motors by the amount \
     selected on the sliders regardless of transmitter. It is recommended to remove \
     any blades from motors. Are you sure you want to do this?";

enum TestMode {
    Idle,
    Armed { saved: ObjectMetadata },
}

/// Safety state machine gating live output testing.
pub struct TestModeInterlock {
    mode: TestMode,
    /// Metadata read on the most recent refused or successful arming attempt.
    /// The restore path never reads this; it exists because the panel has
    /// always cached it on an alarm refusal, and downstream tooling observes
    /// it. See DESIGN.md.
    last_seen_metadata: Option<ObjectMetadata>,
}

impl Default for TestModeInterlock {
    fn default() -> Self {
        Self::new()
    }
}

impl TestModeInterlock {
    pub fn new() -> Self {
        Self {
            mode: TestMode::Idle,
            last_seen_metadata: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.mode, TestMode::Armed { .. })
    }

    /// Metadata cached by the most recent arming attempt, if any.
    pub fn last_seen_metadata(&self) -> Option<&ObjectMetadata> {
        self.last_seen_metadata.as_ref()
    }

    /// Request a transition to `enable` and return the resulting toggle
    /// state.
    ///
    /// A refused transition returns `Ok(false)` — the caller snaps the
    /// toggle control back to off. `Err` is reserved for registry schema
    /// mismatches.
    pub fn request(
        &mut self,
        enable: bool,
        registry: &ObjectRegistry,
        ui: &dyn UserPrompt,
    ) -> AppResult<bool> {
        if enable == self.is_armed() {
            return Ok(enable);
        }

        if !enable {
            if let TestMode::Armed { saved } = std::mem::replace(&mut self.mode, TestMode::Idle) {
                let command = registry.require(ACTUATOR_COMMAND)?;
                command.set_metadata(saved);
                log::info!("output test mode disarmed, telemetry metadata restored");
            }
            return Ok(false);
        }

        let level = self.actuator_alarm(registry)?;
        if level != ALARM_OK {
            log::warn!("output test refused, actuator alarm is '{level}'");
            ui.warn(ACTUATOR_ALARM_WARNING);
            // Cache the command metadata even though we refuse; the
            // panel has always done this on the alarm path.
            let command = registry.require(ACTUATOR_COMMAND)?;
            self.last_seen_metadata = Some(command.metadata());
            return Ok(false);
        }

        if !ui.confirm(TEST_MODE_QUESTION) {
            log::debug!("output test cancelled by operator");
            return Ok(false);
        }

        let command = registry.require(ACTUATOR_COMMAND)?;
        let saved = command.metadata();

        let mut armed = saved.clone();
        armed.flight_access = AccessMode::ReadOnly;
        armed.flight_telemetry_update_mode = UpdateMode::OnChange;
        armed.gcs_telemetry_acked = false;
        armed.gcs_telemetry_update_mode = UpdateMode::OnChange;
        armed.gcs_telemetry_update_period = TEST_UPDATE_PERIOD;
        command.set_metadata(armed);

        self.last_seen_metadata = Some(saved.clone());
        self.mode = TestMode::Armed { saved };
        log::info!("output test mode armed, GCS has exclusive channel access");
        Ok(true)
    }

    /// Forward a slider value to the board's channel array.
    ///
    /// Returns `Ok(true)` when the value was written and the command object
    /// marked updated. Dropped silently (`Ok(false)`) when the interlock is
    /// not armed or the index is outside the channel array — neither is an
    /// error.
    pub fn forward_channel(
        &self,
        registry: &ObjectRegistry,
        index: usize,
        value: i32,
    ) -> AppResult<bool> {
        if !self.is_armed() {
            return Ok(false);
        }
        if index >= CHANNEL_COUNT {
            log::debug!("dropping test value for out-of-range channel {index}");
            return Ok(false);
        }

        let command = registry.require(ACTUATOR_COMMAND)?;
        command
            .require_field(FIELD_CHANNEL)?
            .set_value_at(index, value)?;
        command.updated();
        log::trace!("forwarded {value} to output channel {index}");
        Ok(true)
    }

    /// Current actuator subsystem alarm level.
    fn actuator_alarm(&self, registry: &ObjectRegistry) -> AppResult<String> {
        let alarms = registry.require(SYSTEM_ALARMS)?;
        alarms.require_field(FIELD_ALARM)?.text_at(ALARM_ACTUATOR)
    }
}
