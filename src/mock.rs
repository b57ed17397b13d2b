//! Bench fixtures: a flight-board-shaped registry and a scripted prompt.
//!
//! Lets the panel run without a board or a windowing toolkit. The registry
//! built here carries the same objects, fields and option lists the real
//! telemetry layer would populate, so tests and the bench simulator exercise
//! the exact schema the panel is written against.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::events::{read_guard, write_guard};
use crate::field::ObjectField;
use crate::registry::{DataObject, ObjectRegistry};
use crate::schema::{
    ACTUATOR_COMMAND, ACTUATOR_SETTINGS, ALARM_LEVELS, ALARM_OK, CHANNEL_COUNT, FIELD_ALARM,
    FIELD_CHANNEL, FIELD_CHANNEL_MAX, FIELD_CHANNEL_MIN, FIELD_CHANNEL_NEUTRAL,
    FIELD_CHANNEL_UPDATE_FREQ, FIELD_MOTORS_SPIN_WHILE_ARMED, RATE_BANK_COUNT, SPIN_FALSE,
    SPIN_TRUE, SYSTEM_ALARMS,
};
use crate::ui::UserPrompt;

/// Subsystem rows in the alarms object.
const ALARM_SUBSYSTEM_COUNT: usize = 13;

/// Output functions offered by the settings object, with their default
/// channel selection. `"None"` sits past the last channel in the option
/// list, so an unassigned function resolves to no channel at all.
const OUTPUT_FUNCTIONS: [(&str, &str); 5] = [
    ("Throttle", "Channel1"),
    ("Aileron1", "Channel2"),
    ("Elevator", "Channel3"),
    ("Rudder", "Channel4"),
    ("Aileron2", "None"),
];

fn channel_options() -> Vec<String> {
    let mut options: Vec<String> = (1..=CHANNEL_COUNT).map(|n| format!("Channel{n}")).collect();
    options.push("None".to_string());
    options
}

/// Build a registry shaped like a freshly connected flight board.
pub fn bench_registry() -> ObjectRegistry {
    bench_registry_with_ranges(1000, 2000, 1500)
}

/// Build a bench registry with every channel's range preset.
pub fn bench_registry_with_ranges(min: i32, max: i32, neutral: i32) -> ObjectRegistry {
    let registry = ObjectRegistry::new();

    let options = channel_options();
    let option_refs: Vec<&str> = options.iter().map(String::as_str).collect();

    let mut settings_fields = Vec::new();
    for (function, selected) in OUTPUT_FUNCTIONS {
        settings_fields.push(ObjectField::enumeration(
            function,
            "channel",
            &option_refs,
            selected,
        ));
    }
    settings_fields.push(ObjectField::number(
        FIELD_CHANNEL_MIN,
        "us",
        CHANNEL_COUNT,
        f64::from(min),
    ));
    settings_fields.push(ObjectField::number(
        FIELD_CHANNEL_MAX,
        "us",
        CHANNEL_COUNT,
        f64::from(max),
    ));
    settings_fields.push(ObjectField::number(
        FIELD_CHANNEL_NEUTRAL,
        "us",
        CHANNEL_COUNT,
        f64::from(neutral),
    ));
    settings_fields.push(ObjectField::number(
        FIELD_CHANNEL_UPDATE_FREQ,
        "Hz",
        RATE_BANK_COUNT,
        50.0,
    ));
    settings_fields.push(ObjectField::enumeration(
        FIELD_MOTORS_SPIN_WHILE_ARMED,
        "bool",
        &[SPIN_FALSE, SPIN_TRUE],
        SPIN_FALSE,
    ));
    registry.register(DataObject::new(ACTUATOR_SETTINGS, settings_fields));

    registry.register(DataObject::new(
        ACTUATOR_COMMAND,
        vec![ObjectField::number(FIELD_CHANNEL, "us", CHANNEL_COUNT, 0.0)],
    ));

    registry.register(DataObject::new(
        SYSTEM_ALARMS,
        vec![ObjectField::enumeration_array(
            FIELD_ALARM,
            "",
            &ALARM_LEVELS,
            ALARM_SUBSYSTEM_COUNT,
            ALARM_OK,
        )],
    ));

    registry
}

/// [`UserPrompt`] with a scripted confirmation answer.
///
/// Counts interactions so tests can assert which guards fired.
pub struct ScriptedPrompt {
    answer: bool,
    warnings: AtomicUsize,
    confirmations: AtomicUsize,
    opened_urls: RwLock<Vec<String>>,
}

impl ScriptedPrompt {
    /// Always answers the safety question with yes.
    pub fn confirming() -> Self {
        Self::with_answer(true)
    }

    /// Always answers the safety question with no.
    pub fn declining() -> Self {
        Self::with_answer(false)
    }

    fn with_answer(answer: bool) -> Self {
        Self {
            answer,
            warnings: AtomicUsize::new(0),
            confirmations: AtomicUsize::new(0),
            opened_urls: RwLock::new(Vec::new()),
        }
    }

    /// Number of warnings shown.
    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }

    /// Number of confirmation questions asked.
    pub fn confirmations(&self) -> usize {
        self.confirmations.load(Ordering::SeqCst)
    }

    /// URLs passed to `open_url`, oldest first.
    pub fn opened_urls(&self) -> Vec<String> {
        read_guard(&self.opened_urls).clone()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn warn(&self, message: &str) {
        log::info!("[prompt] warning: {message}");
        self.warnings.fetch_add(1, Ordering::SeqCst);
    }

    fn confirm(&self, message: &str) -> bool {
        log::info!("[prompt] confirm ({}): {message}", self.answer);
        self.confirmations.fetch_add(1, Ordering::SeqCst);
        self.answer
    }

    fn open_url(&self, url: &str) {
        log::info!("[prompt] open url: {url}");
        write_guard(&self.opened_urls).push(url.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_registry_matches_the_panel_schema() {
        let registry = bench_registry();

        let settings = registry.require(ACTUATOR_SETTINGS).unwrap();
        assert_eq!(
            settings
                .require_field(FIELD_CHANNEL_MIN)
                .unwrap()
                .element_count(),
            CHANNEL_COUNT
        );
        assert_eq!(
            settings
                .require_field(FIELD_CHANNEL_UPDATE_FREQ)
                .unwrap()
                .element_count(),
            RATE_BANK_COUNT
        );

        let command = registry.require(ACTUATOR_COMMAND).unwrap();
        assert_eq!(
            command.require_field(FIELD_CHANNEL).unwrap().element_count(),
            CHANNEL_COUNT
        );

        let alarms = registry.require(SYSTEM_ALARMS).unwrap();
        assert_eq!(
            alarms
                .require_field(FIELD_ALARM)
                .unwrap()
                .text_at(crate::schema::ALARM_ACTUATOR)
                .unwrap(),
            ALARM_OK
        );
    }

    #[test]
    fn assignment_fields_carry_the_channel_unit_tag() {
        let registry = bench_registry();
        let settings = registry.require(ACTUATOR_SETTINGS).unwrap();

        let tagged = settings
            .fields()
            .iter()
            .filter(|f| f.units().contains(crate::schema::CHANNEL_UNIT_TAG))
            .count();
        assert_eq!(tagged, OUTPUT_FUNCTIONS.len());
    }

    #[test]
    fn scripted_prompt_records_interactions() {
        let prompt = ScriptedPrompt::declining();
        prompt.warn("careful");
        assert!(!prompt.confirm("sure?"));
        prompt.open_url("https://example.org/docs");

        assert_eq!(prompt.warnings(), 1);
        assert_eq!(prompt.confirmations(), 1);
        assert_eq!(prompt.opened_urls(), vec!["https://example.org/docs"]);
    }
}
