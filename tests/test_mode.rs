//! Integration tests for the output test interlock, driven through the panel.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gcs_output_panel::mock::{bench_registry, ScriptedPrompt};
use gcs_output_panel::panel::OutputPanel;
use gcs_output_panel::registry::ObjectRegistry;
use gcs_output_panel::schema::{
    ACTUATOR_COMMAND, ALARM_ACTUATOR, CHANNEL_COUNT, FIELD_ALARM, FIELD_CHANNEL, SYSTEM_ALARMS,
};

fn set_actuator_alarm(registry: &ObjectRegistry, level: &str) {
    registry
        .require(SYSTEM_ALARMS)
        .unwrap()
        .require_field(FIELD_ALARM)
        .unwrap()
        .set_value_at(ALARM_ACTUATOR, level)
        .unwrap();
}

fn channel_command(registry: &ObjectRegistry, index: usize) -> f64 {
    registry
        .require(ACTUATOR_COMMAND)
        .unwrap()
        .require_field(FIELD_CHANNEL)
        .unwrap()
        .number_at(index)
        .unwrap()
}

#[test]
fn active_alarm_refuses_the_transition() {
    let registry = bench_registry();
    set_actuator_alarm(&registry, "Error");
    let before = registry.require(ACTUATOR_COMMAND).unwrap().metadata();

    let mut panel = OutputPanel::new(registry.clone());
    let prompt = ScriptedPrompt::confirming();

    let granted = panel.set_test_mode(true, &prompt).unwrap();
    assert!(!granted);
    assert!(!panel.test_mode_enabled());
    assert_eq!(prompt.warnings(), 1);
    // Never got as far as the safety question.
    assert_eq!(prompt.confirmations(), 0);
    // No metadata was applied.
    assert_eq!(registry.require(ACTUATOR_COMMAND).unwrap().metadata(), before);
}

#[test]
fn declined_confirmation_refuses_the_transition() {
    let registry = bench_registry();
    let before = registry.require(ACTUATOR_COMMAND).unwrap().metadata();

    let mut panel = OutputPanel::new(registry.clone());
    let prompt = ScriptedPrompt::declining();

    let granted = panel.set_test_mode(true, &prompt).unwrap();
    assert!(!granted);
    assert!(!panel.test_mode_enabled());
    assert_eq!(prompt.confirmations(), 1);
    assert_eq!(registry.require(ACTUATOR_COMMAND).unwrap().metadata(), before);
}

#[test]
fn arm_disarm_round_trip_restores_metadata_exactly() {
    let registry = bench_registry();
    let command = registry.require(ACTUATOR_COMMAND).unwrap();
    let before = command.metadata();

    let mut panel = OutputPanel::new(registry);
    let prompt = ScriptedPrompt::confirming();

    assert!(panel.set_test_mode(true, &prompt).unwrap());
    assert_ne!(command.metadata(), before);

    assert!(!panel.set_test_mode(false, &prompt).unwrap());
    assert_eq!(command.metadata(), before);
}

#[test]
fn armed_slider_changes_reach_the_command_array() {
    let registry = bench_registry();
    let mut panel = OutputPanel::new(registry.clone());
    let prompt = ScriptedPrompt::confirming();
    panel.refresh_from_board().unwrap();

    assert!(panel.set_test_mode(true, &prompt).unwrap());

    let updates = Arc::new(AtomicUsize::new(0));
    let updates_in_handler = updates.clone();
    registry
        .require(ACTUATOR_COMMAND)
        .unwrap()
        .on_updated()
        .connect(move |_| {
            updates_in_handler.fetch_add(1, Ordering::SeqCst);
        });

    panel.set_channel_neutral(3, 1620).unwrap();
    assert_eq!(channel_command(&registry, 3), 1620.0);
    assert_eq!(updates.load(Ordering::SeqCst), 1);
}

#[test]
fn slider_changes_are_dropped_while_disarmed() {
    let registry = bench_registry();
    let mut panel = OutputPanel::new(registry.clone());
    let prompt = ScriptedPrompt::confirming();
    panel.refresh_from_board().unwrap();

    panel.set_channel_neutral(3, 1620).unwrap();
    assert_eq!(channel_command(&registry, 3), 0.0);

    // Arm, drive, disarm: later changes must stop flowing.
    assert!(panel.set_test_mode(true, &prompt).unwrap());
    panel.set_channel_neutral(3, 1650).unwrap();
    assert!(!panel.set_test_mode(false, &prompt).unwrap());

    panel.set_channel_neutral(3, 1700).unwrap();
    assert_eq!(channel_command(&registry, 3), 1650.0);
}

#[test]
fn out_of_range_channel_indices_are_ignored() {
    let registry = bench_registry();
    let mut panel = OutputPanel::new(registry.clone());
    let prompt = ScriptedPrompt::confirming();

    assert!(panel.set_test_mode(true, &prompt).unwrap());
    panel.send_channel_test(CHANNEL_COUNT, 1800).unwrap();
    panel.send_channel_test(CHANNEL_COUNT + 5, 1800).unwrap();

    for index in 0..CHANNEL_COUNT {
        assert_eq!(channel_command(&registry, index), 0.0);
    }
}

#[test]
fn master_toggle_propagates_to_every_channel_switch() {
    let registry = bench_registry();
    let mut panel = OutputPanel::new(registry);
    let prompt = ScriptedPrompt::confirming();

    assert!(panel.channels().iter().all(|c| !c.test_enabled()));

    assert!(panel.set_test_mode(true, &prompt).unwrap());
    assert!(panel.channels().iter().all(|c| c.test_enabled()));

    assert!(!panel.set_test_mode(false, &prompt).unwrap());
    assert!(panel.channels().iter().all(|c| !c.test_enabled()));
}

#[test]
fn refused_arming_leaves_channel_switches_off() {
    let registry = bench_registry();
    set_actuator_alarm(&registry, "Warning");

    let mut panel = OutputPanel::new(registry);
    let prompt = ScriptedPrompt::confirming();

    assert!(!panel.set_test_mode(true, &prompt).unwrap());
    assert!(panel.channels().iter().all(|c| !c.test_enabled()));
}
