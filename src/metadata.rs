//! Telemetry metadata carried by each remote object.

use serde::{Deserialize, Serialize};

/// Who may write an object's data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    ReadWrite,
    ReadOnly,
}

/// When an object is (re)transmitted by one end of the telemetry link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateMode {
    /// Sent on a fixed period.
    Periodic,
    /// Sent whenever the data changes.
    OnChange,
    /// Sent only on explicit request.
    Manual,
    /// Never sent.
    Never,
}

/// Per-object telemetry behavior, mirrored on both ends of the link.
///
/// Snapshots of this struct must restore bit-for-bit, so every member is plain
/// data and equality is derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Write access for the flight side.
    pub flight_access: AccessMode,
    /// Write access for the ground side.
    pub gcs_access: AccessMode,
    /// Flight-side transmissions require acknowledgement.
    pub flight_telemetry_acked: bool,
    pub flight_telemetry_update_mode: UpdateMode,
    /// Period for [`UpdateMode::Periodic`], in telemetry time units.
    pub flight_telemetry_update_period: u32,
    /// Ground-side transmissions require acknowledgement.
    pub gcs_telemetry_acked: bool,
    pub gcs_telemetry_update_mode: UpdateMode,
    pub gcs_telemetry_update_period: u32,
}

impl Default for ObjectMetadata {
    fn default() -> Self {
        Self {
            flight_access: AccessMode::ReadWrite,
            gcs_access: AccessMode::ReadWrite,
            flight_telemetry_acked: true,
            flight_telemetry_update_mode: UpdateMode::Periodic,
            flight_telemetry_update_period: 1000,
            gcs_telemetry_acked: true,
            gcs_telemetry_update_mode: UpdateMode::Manual,
            gcs_telemetry_update_period: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_compares_bit_for_bit() {
        let original = ObjectMetadata::default();
        let snapshot = original.clone();

        let mut modified = original.clone();
        modified.flight_access = AccessMode::ReadOnly;
        modified.gcs_telemetry_update_period = 100;

        assert_eq!(original, snapshot);
        assert_ne!(original, modified);
    }

    #[test]
    fn survives_serde_round_trip() {
        let metadata = ObjectMetadata {
            flight_access: AccessMode::ReadOnly,
            gcs_telemetry_update_mode: UpdateMode::OnChange,
            gcs_telemetry_update_period: 100,
            ..ObjectMetadata::default()
        };

        let json = serde_json::to_string(&metadata).unwrap();
        let back: ObjectMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(metadata, back);
    }
}
