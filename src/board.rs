//! Board model detection and output bank profiles.
//!
//! Different board families group their output channels into different PWM
//! timer banks, so the number of independently rateable banks and the channel
//! ranges they cover depend on which board the GCS is talking to. The high
//! byte of the 16-bit board model code selects the family; unknown codes
//! leave the panel's bank display untouched.

use crate::schema::RATE_BANK_COUNT;

/// Collaborator reporting which board the telemetry session is attached to.
pub trait BoardInfo {
    /// 16-bit board model code; the family lives in the high byte.
    fn board_model(&self) -> u16;
}

/// One output bank's rate control state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateBank {
    /// Channel range covered by this bank, e.g. `"1-3"`.
    pub label: String,
    /// Update rate in Hz.
    pub rate: u32,
    /// Whether the rate control is active for the current board.
    pub enabled: bool,
}

impl Default for RateBank {
    fn default() -> Self {
        Self {
            label: "-".to_string(),
            rate: 0,
            enabled: false,
        }
    }
}

/// Bank layout of one board family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardProfile {
    labels: [&'static str; RATE_BANK_COUNT],
    enabled: [bool; RATE_BANK_COUNT],
}

impl BoardProfile {
    /// Apply this profile to the four rate banks.
    ///
    /// Disabled banks get their rate forced to 0 so a stale value cannot be
    /// pushed to a bank the board does not expose.
    pub fn apply(&self, banks: &mut [RateBank; RATE_BANK_COUNT]) {
        for (bank, (label, enabled)) in banks
            .iter_mut()
            .zip(self.labels.iter().zip(self.enabled.iter()))
        {
            bank.label = (*label).to_string();
            bank.enabled = *enabled;
            if !bank.enabled {
                bank.rate = 0;
            }
        }
    }

    pub fn enabled_banks(&self) -> usize {
        self.enabled.iter().filter(|e| **e).count()
    }
}

/// Coprocessor family: four banks, channels spread across timers.
static COPROCESSOR_PROFILE: BoardProfile = BoardProfile {
    labels: ["1-3", "4", "5,7-8", "6,9-10"],
    enabled: [true, true, true, true],
};

/// Mainboard family: two four-channel banks, banks 3-4 absent.
static MAINBOARD_PROFILE: BoardProfile = BoardProfile {
    labels: ["1-4", "5-8", "-", "-"],
    enabled: [true, true, false, false],
};

/// Resolve the bank profile for a board model code.
///
/// Returns `None` for families this panel knows nothing about; the caller
/// keeps whatever labels and enabled state were previously shown. That is
/// intentional, not an error.
pub fn profile_for(board_model: u16) -> Option<&'static BoardProfile> {
    match board_model & 0xff00 {
        0x0400 => Some(&COPROCESSOR_PROFILE),
        0x0100 => Some(&MAINBOARD_PROFILE),
        _ => None,
    }
}

/// Fixed board model, for tests and the bench simulator.
#[derive(Debug, Clone, Copy)]
pub struct FixedBoard(pub u16);

impl BoardInfo for FixedBoard {
    fn board_model(&self) -> u16 {
        self.0
    }
}
