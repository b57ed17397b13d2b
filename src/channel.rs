//! Per-channel output state.
//!
//! One [`OutputChannelForm`] mirrors one row of the panel: the assigned
//! function, the output range, the neutral point and the per-channel test
//! switch. Channel indices are 0-based internally and shown 1-based to the
//! operator.

use crate::events::Signal;

/// Label shown for a channel with no assigned function.
pub const UNASSIGNED_LABEL: &str = "-";

/// Payload of a per-channel value change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelChange {
    pub index: usize,
    pub value: i32,
}

/// UI state of a single output channel.
pub struct OutputChannelForm {
    index: usize,
    assignment: Option<String>,
    min: i32,
    max: i32,
    neutral: i32,
    test_enabled: bool,
    changed: Signal<ChannelChange>,
}

impl OutputChannelForm {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            assignment: None,
            min: 0,
            max: 0,
            neutral: 0,
            test_enabled: false,
            changed: Signal::new(),
        }
    }

    /// 0-based channel index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based number as shown to the operator.
    pub fn display_number(&self) -> usize {
        self.index + 1
    }

    /// Assigned function, if any.
    pub fn assignment(&self) -> Option<&str> {
        self.assignment.as_deref()
    }

    /// Assignment text for display, using the unassigned sentinel.
    pub fn assignment_label(&self) -> &str {
        self.assignment.as_deref().unwrap_or(UNASSIGNED_LABEL)
    }

    pub fn set_assignment(&mut self, function: impl Into<String>) {
        self.assignment = Some(function.into());
    }

    pub fn clear_assignment(&mut self) {
        self.assignment = None;
    }

    pub fn min(&self) -> i32 {
        self.min
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn neutral(&self) -> i32 {
        self.neutral
    }

    pub fn set_range(&mut self, min: i32, max: i32) {
        self.min = min;
        self.max = max;
    }

    /// Move the neutral slider.
    ///
    /// Always raises the changed signal; whether the value is forwarded to
    /// the board is the test interlock's decision, not the slider's.
    pub fn set_neutral(&mut self, value: i32) {
        self.neutral = value;
        self.changed.emit(&ChannelChange {
            index: self.index,
            value,
        });
    }

    /// Per-channel test switch, driven by the master test toggle.
    pub fn test_enabled(&self) -> bool {
        self.test_enabled
    }

    pub fn enable_test(&mut self, enabled: bool) {
        self.test_enabled = enabled;
    }

    /// Change notification source for this channel's slider.
    pub fn on_changed(&self) -> &Signal<ChannelChange> {
        &self.changed
    }
}

impl std::fmt::Debug for OutputChannelForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutputChannelForm")
            .field("index", &self.index)
            .field("assignment", &self.assignment_label())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("neutral", &self.neutral)
            .field("test_enabled", &self.test_enabled)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Arc;

    #[test]
    fn starts_unassigned() {
        let form = OutputChannelForm::new(4);
        assert_eq!(form.assignment(), None);
        assert_eq!(form.assignment_label(), "-");
        assert_eq!(form.display_number(), 5);
    }

    #[test]
    fn neutral_slider_notifies_with_index_and_value() {
        let mut form = OutputChannelForm::new(3);
        let seen = Arc::new(AtomicI32::new(0));
        let seen_in_handler = seen.clone();

        form.on_changed().connect(move |change| {
            assert_eq!(change.index, 3);
            seen_in_handler.store(change.value, Ordering::SeqCst);
        });

        form.set_neutral(1520);
        assert_eq!(seen.load(Ordering::SeqCst), 1520);
        assert_eq!(form.neutral(), 1520);
    }

    #[test]
    fn assignment_can_be_cleared() {
        let mut form = OutputChannelForm::new(0);
        form.set_assignment("FixedWingThrottle");
        assert_eq!(form.assignment(), Some("FixedWingThrottle"));

        form.clear_assignment();
        assert_eq!(form.assignment_label(), UNASSIGNED_LABEL);
    }
}
