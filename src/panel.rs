//! The output configuration panel.
//!
//! [`OutputPanel`] owns the in-memory view the operator edits: ten channel
//! forms, four rate banks, the spin-while-armed flag and the test interlock.
//! Two operations move data between that view and the registry:
//!
//! - [`refresh_from_board`](OutputPanel::refresh_from_board) pulls the
//!   current registry state into the forms.
//! - [`apply_to_board`](OutputPanel::apply_to_board) pushes the forms back
//!   into the registry, from where the telemetry layer ships them.
//!
//! A pull triggered by an incoming telemetry update must not look like an
//! operator edit, so the dirty flag is saved before the pull and restored
//! after it, whatever happens in between.

use std::sync::{Arc, Mutex, PoisonError, Weak};

use crate::board::{profile_for, BoardInfo, RateBank};
use crate::channel::OutputChannelForm;
use crate::error::AppResult;
use crate::interlock::TestModeInterlock;
use crate::registry::ObjectRegistry;
use crate::schema::{
    ACTUATOR_SETTINGS, CHANNEL_COUNT, CHANNEL_UNIT_TAG, FIELD_CHANNEL_MAX, FIELD_CHANNEL_MIN,
    FIELD_CHANNEL_NEUTRAL, FIELD_CHANNEL_UPDATE_FREQ, FIELD_MOTORS_SPIN_WHILE_ARMED,
    RATE_BANK_COUNT, SPIN_FALSE, SPIN_TRUE,
};
use crate::ui::UserPrompt;

/// Documentation page opened by the panel's help action.
pub const OUTPUT_HELP_URL: &str = "https://docs.gcsproject.org/configuration/output";

/// Servo/motor output configuration panel state.
pub struct OutputPanel {
    registry: ObjectRegistry,
    board_info: Option<Arc<dyn BoardInfo + Send + Sync>>,
    channels: Vec<OutputChannelForm>,
    rate_banks: [RateBank; RATE_BANK_COUNT],
    spinning_armed: bool,
    interlock: TestModeInterlock,
    dirty: bool,
}

impl OutputPanel {
    /// Create a panel over `registry` with one form per output channel.
    pub fn new(registry: ObjectRegistry) -> Self {
        Self {
            registry,
            board_info: None,
            channels: (0..CHANNEL_COUNT).map(OutputChannelForm::new).collect(),
            rate_banks: std::array::from_fn(|_| RateBank::default()),
            spinning_armed: false,
            interlock: TestModeInterlock::new(),
            dirty: false,
        }
    }

    /// Attach the board-info collaborator used for bank profile resolution.
    ///
    /// Without one, pulls keep whatever bank labels and enabled flags are
    /// already shown.
    pub fn with_board_info(mut self, info: Arc<dyn BoardInfo + Send + Sync>) -> Self {
        self.board_info = Some(info);
        self
    }

    pub fn registry(&self) -> &ObjectRegistry {
        &self.registry
    }

    pub fn channels(&self) -> &[OutputChannelForm] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&OutputChannelForm> {
        self.channels.get(index)
    }

    pub fn rate_banks(&self) -> &[RateBank; RATE_BANK_COUNT] {
        &self.rate_banks
    }

    pub fn spinning_armed(&self) -> bool {
        self.spinning_armed
    }

    /// Master test toggle state.
    pub fn test_mode_enabled(&self) -> bool {
        self.interlock.is_armed()
    }

    pub fn interlock(&self) -> &TestModeInterlock {
        &self.interlock
    }

    /// Whether the view holds operator edits not yet applied to the board.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.dirty = dirty;
    }

    /// Pull the registry state into the panel.
    ///
    /// Preserves the pre-existing dirty flag across the whole operation,
    /// including the failure paths.
    pub fn refresh_from_board(&mut self) -> AppResult<()> {
        let dirty = self.dirty;
        let result = self.pull();
        self.dirty = dirty;
        result
    }

    fn pull(&mut self) -> AppResult<()> {
        for form in &mut self.channels {
            form.clear_assignment();
        }

        let settings = self.registry.require(ACTUATOR_SETTINGS)?;

        // Channel assignments: any field tagged as a channel unit is an
        // assignment field, and the selected option's position in its own
        // option list is the channel it binds to (the schema orders options
        // by output channel). A position past the last form means
        // "unassigned" and is dropped without comment.
        for field in settings.fields() {
            if !field.units().contains(CHANNEL_UNIT_TAG) {
                continue;
            }
            match field.selected_option_index() {
                Some(index) if index < self.channels.len() => {
                    self.channels[index].set_assignment(field.name());
                }
                Some(index) => {
                    log::debug!("assignment '{}' resolves past channel {index}", field.name());
                }
                None => {
                    log::debug!("assignment '{}' holds no known option", field.name());
                }
            }
        }

        let spin = settings
            .require_field(FIELD_MOTORS_SPIN_WHILE_ARMED)?
            .value();
        self.spinning_armed = spin.text() == Some(SPIN_TRUE);

        let rates = settings.require_field(FIELD_CHANNEL_UPDATE_FREQ)?;
        for (index, bank) in self.rate_banks.iter_mut().enumerate() {
            bank.rate = rates.number_at(index)? as u32;
        }
        if let Some(info) = &self.board_info {
            let model = info.board_model();
            match profile_for(model) {
                Some(profile) => profile.apply(&mut self.rate_banks),
                None => log::debug!("no bank profile for board model {model:#06x}"),
            }
        }

        let min_field = settings.require_field(FIELD_CHANNEL_MIN)?;
        let max_field = settings.require_field(FIELD_CHANNEL_MAX)?;
        let neutral_field = settings.require_field(FIELD_CHANNEL_NEUTRAL)?;
        for form in &mut self.channels {
            let min = min_field.number_at(form.index())? as i32;
            let max = max_field.number_at(form.index())? as i32;
            form.set_range(min, max);
            form.set_neutral(neutral_field.number_at(form.index())? as i32);
        }

        log::debug!("panel refreshed from registry");
        Ok(())
    }

    /// Push the panel state into the registry.
    ///
    /// All four bank rates are written unconditionally; a disabled bank
    /// writes whatever value its control holds (0 after a profile disabled
    /// it).
    pub fn apply_to_board(&self) -> AppResult<()> {
        let settings = self.registry.require(ACTUATOR_SETTINGS)?;

        let max_field = settings.require_field(FIELD_CHANNEL_MAX)?;
        let min_field = settings.require_field(FIELD_CHANNEL_MIN)?;
        let neutral_field = settings.require_field(FIELD_CHANNEL_NEUTRAL)?;
        for form in &self.channels {
            max_field.set_value_at(form.index(), form.max())?;
            min_field.set_value_at(form.index(), form.min())?;
            neutral_field.set_value_at(form.index(), form.neutral())?;
        }

        let rates = settings.require_field(FIELD_CHANNEL_UPDATE_FREQ)?;
        for (index, bank) in self.rate_banks.iter().enumerate() {
            rates.set_value_at(index, bank.rate)?;
        }

        log::debug!("panel state applied to registry");
        Ok(())
    }

    /// Write the spin-while-armed flag straight through to the registry.
    pub fn set_spinning_armed(&mut self, enabled: bool) -> AppResult<()> {
        let settings = self.registry.require(ACTUATOR_SETTINGS)?;
        settings
            .require_field(FIELD_MOTORS_SPIN_WHILE_ARMED)?
            .set_value(if enabled { SPIN_TRUE } else { SPIN_FALSE })?;
        self.spinning_armed = enabled;
        self.dirty = true;
        Ok(())
    }

    /// Toggle the master test switch and propagate the outcome to every
    /// channel form. Returns the resulting toggle state; a refused request
    /// comes back `false` with the toggle snapped off.
    pub fn set_test_mode(&mut self, enable: bool, ui: &dyn UserPrompt) -> AppResult<bool> {
        let granted = self.interlock.request(enable, &self.registry, ui)?;
        for form in &mut self.channels {
            form.enable_test(granted);
        }
        Ok(granted)
    }

    /// Operator moved a channel's neutral slider.
    ///
    /// Updates the form, marks the panel dirty, and — while test mode is
    /// armed — forwards the value live to the board. An index outside the
    /// channel array is ignored.
    pub fn set_channel_neutral(&mut self, index: usize, value: i32) -> AppResult<()> {
        let Some(form) = self.channels.get_mut(index) else {
            return Ok(());
        };
        form.set_neutral(value);
        self.dirty = true;
        self.send_channel_test(index, value)
    }

    /// Operator edited a channel's output range.
    pub fn set_channel_range(&mut self, index: usize, min: i32, max: i32) {
        if let Some(form) = self.channels.get_mut(index) {
            form.set_range(min, max);
            self.dirty = true;
        }
    }

    /// Operator edited a bank's update rate.
    pub fn set_bank_rate(&mut self, bank: usize, rate: u32) {
        if let Some(bank) = self.rate_banks.get_mut(bank) {
            bank.rate = rate;
            self.dirty = true;
        }
    }

    /// Forward a test value for one channel; dropped unless armed.
    pub fn send_channel_test(&mut self, index: usize, value: i32) -> AppResult<()> {
        self.interlock
            .forward_channel(&self.registry, index, value)?;
        Ok(())
    }

    /// Open the output configuration documentation.
    pub fn open_help(&self, ui: &dyn UserPrompt) {
        ui.open_url(OUTPUT_HELP_URL);
    }
}

/// Wire automatic refresh: whenever the settings object is marked updated by
/// the telemetry layer, pull its values back into the panel.
///
/// The handler runs synchronously inside the telemetry dispatch and takes the
/// panel lock; it must not be invoked while the caller already holds that
/// lock. The subscription holds only a weak panel reference, so dropping the
/// panel ends the wiring.
pub fn connect_refresh(panel: &Arc<Mutex<OutputPanel>>) -> AppResult<()> {
    let settings = {
        let guard = panel.lock().unwrap_or_else(PoisonError::into_inner);
        guard.registry.require(ACTUATOR_SETTINGS)?
    };

    let weak: Weak<Mutex<OutputPanel>> = Arc::downgrade(panel);
    settings.on_updated().connect(move |_| {
        let Some(panel) = weak.upgrade() else {
            return;
        };
        let mut panel = panel.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = panel.refresh_from_board() {
            log::error!("refresh after telemetry update failed: {err}");
        }
    });
    Ok(())
}
