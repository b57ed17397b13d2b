//! # GCS Output Configuration Panel
//!
//! Library backing the servo/motor output page of a ground-control station:
//! viewing and editing channel assignments, output ranges, neutral points and
//! per-bank update rates held on a remote flight-control board, plus a
//! safety-interlocked mode that drives outputs directly for bench testing.
//!
//! The windowing toolkit and the telemetry transport stay outside; this crate
//! owns the state, the synchronization contract with the remote object
//! registry, and the interlock rules.
//!
//! ## Crate Structure
//!
//! - **`panel`**: the `OutputPanel` — per-channel forms, rate banks, the
//!   pull/push synchronizer and the dirty flag.
//! - **`interlock`**: the Idle/Armed test-mode state machine with its alarm
//!   and confirmation guards and live channel forwarding.
//! - **`board`**: board model codes, bank profiles and the `BoardInfo`
//!   collaborator trait.
//! - **`channel`**: one output channel's UI state and change signal.
//! - **`registry`** / **`field`** / **`metadata`**: the consumed remote
//!   object model — named objects, unit-tagged indexed fields, telemetry
//!   metadata.
//! - **`schema`**: object/field names and sizes shared with the flight side.
//! - **`events`**: synchronous signal/slot wiring.
//! - **`ui`**: the `UserPrompt` seam to the host GUI.
//! - **`config`** / **`validation`**: bench simulator settings.
//! - **`error`**: the `PanelError` enum and `AppResult` alias.
//! - **`mock`**: bench fixtures — a flight-board-shaped registry and a
//!   scripted prompt.

pub mod board;
pub mod channel;
pub mod config;
pub mod error;
pub mod events;
pub mod field;
pub mod interlock;
pub mod metadata;
pub mod mock;
pub mod panel;
pub mod registry;
pub mod schema;
pub mod ui;
pub mod validation;
