//! Remote object registry.
//!
//! The registry is the panel's window onto the board: named data objects,
//! each a fixed set of named fields plus telemetry metadata. Object and
//! registry handles are cheap clones sharing one interior-locked store, which
//! is how the telemetry layer's "access is serialized internally" guarantee
//! is realized.
//!
//! Lookup comes in two flavors: `object`/`field` return `Option` for callers
//! that can shrug a miss off, and `require`/`require_field` return a
//! [`PanelError`] so schema mismatches surface as explicit integration errors
//! instead of an assumption-driven crash.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{AppResult, PanelError};
use crate::events::{read_guard, write_guard, Signal};
use crate::field::ObjectField;
use crate::metadata::ObjectMetadata;

struct ObjectInner {
    name: String,
    fields: Vec<ObjectField>,
    metadata: RwLock<ObjectMetadata>,
    updated: Signal<String>,
}

/// Handle to a named remote data object.
#[derive(Clone)]
pub struct DataObject {
    inner: Arc<ObjectInner>,
}

impl DataObject {
    /// Create an object with default metadata. Fields are fixed for the
    /// object's lifetime; only their values change.
    pub fn new(name: impl Into<String>, fields: Vec<ObjectField>) -> Self {
        Self {
            inner: Arc::new(ObjectInner {
                name: name.into(),
                fields,
                metadata: RwLock::new(ObjectMetadata::default()),
                updated: Signal::new(),
            }),
        }
    }

    /// Replace the initial metadata (builder style).
    pub fn with_metadata(self, metadata: ObjectMetadata) -> Self {
        *write_guard(&self.inner.metadata) = metadata;
        self
    }

    pub fn name(&self) -> &str {
        &self.inner.name
    }

    pub fn fields(&self) -> &[ObjectField] {
        &self.inner.fields
    }

    pub fn field(&self, name: &str) -> Option<&ObjectField> {
        self.inner.fields.iter().find(|f| f.name() == name)
    }

    /// Field lookup that treats a miss as a schema mismatch.
    pub fn require_field(&self, name: &str) -> AppResult<&ObjectField> {
        self.field(name).ok_or_else(|| PanelError::MissingField {
            object: self.inner.name.clone(),
            field: name.to_string(),
        })
    }

    /// Current telemetry metadata (snapshot copy).
    pub fn metadata(&self) -> ObjectMetadata {
        read_guard(&self.inner.metadata).clone()
    }

    pub fn set_metadata(&self, metadata: ObjectMetadata) {
        log::debug!("metadata updated on '{}'", self.inner.name);
        *write_guard(&self.inner.metadata) = metadata;
    }

    /// Signal that the object changed and should be (re)transmitted.
    ///
    /// The telemetry layer subscribes via [`on_updated`](Self::on_updated);
    /// this crate only raises the flag.
    pub fn updated(&self) {
        log::trace!("object '{}' marked updated", self.inner.name);
        self.inner.updated.emit(&self.inner.name);
    }

    /// Change notification source, payload = object name.
    pub fn on_updated(&self) -> &Signal<String> {
        &self.inner.updated
    }
}

impl std::fmt::Debug for DataObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataObject")
            .field("name", &self.inner.name)
            .field("fields", &self.inner.fields.len())
            .finish()
    }
}

/// Named collection of [`DataObject`]s, shared by cheap clone.
#[derive(Clone, Default)]
pub struct ObjectRegistry {
    objects: Arc<RwLock<HashMap<String, DataObject>>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object, replacing any previous one of the same name.
    pub fn register(&self, object: DataObject) {
        log::debug!("registered object '{}'", object.name());
        write_guard(&self.objects).insert(object.name().to_string(), object);
    }

    /// Look an object up by name.
    pub fn object(&self, name: &str) -> Option<DataObject> {
        read_guard(&self.objects).get(name).cloned()
    }

    /// Lookup that treats a miss as a schema mismatch.
    pub fn require(&self, name: &str) -> AppResult<DataObject> {
        self.object(name)
            .ok_or_else(|| PanelError::MissingObject(name.to_string()))
    }

    pub fn object_names(&self) -> Vec<String> {
        read_guard(&self.objects).keys().cloned().collect()
    }
}

impl std::fmt::Debug for ObjectRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("objects", &self.object_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_object() -> DataObject {
        DataObject::new(
            "ActuatorSettings",
            vec![ObjectField::number("ChannelMin", "us", 10, 1000.0)],
        )
    }

    #[test]
    fn lookup_finds_registered_objects() {
        let registry = ObjectRegistry::new();
        registry.register(sample_object());

        assert!(registry.object("ActuatorSettings").is_some());
        assert!(registry.object("FlightStatus").is_none());
    }

    #[test]
    fn require_reports_a_missing_object() {
        let registry = ObjectRegistry::new();
        let err = registry.require("ActuatorCommand").unwrap_err();
        assert!(matches!(err, PanelError::MissingObject(name) if name == "ActuatorCommand"));
    }

    #[test]
    fn require_field_reports_object_and_field() {
        let object = sample_object();
        let err = object.require_field("ChannelMax").unwrap_err();
        assert!(matches!(
            err,
            PanelError::MissingField { object, field }
                if object == "ActuatorSettings" && field == "ChannelMax"
        ));
    }

    #[test]
    fn handles_share_state() {
        let registry = ObjectRegistry::new();
        registry.register(sample_object());

        let a = registry.require("ActuatorSettings").unwrap();
        let b = registry.require("ActuatorSettings").unwrap();
        a.require_field("ChannelMin")
            .unwrap()
            .set_value_at(2, 1250.0)
            .unwrap();

        assert_eq!(
            b.require_field("ChannelMin").unwrap().number_at(2).unwrap(),
            1250.0
        );
    }

    #[test]
    fn updated_signal_carries_the_object_name() {
        let object = sample_object();
        let hits = Arc::new(AtomicUsize::new(0));
        let hits_in_handler = hits.clone();

        object.on_updated().connect(move |name| {
            assert_eq!(name, "ActuatorSettings");
            hits_in_handler.fetch_add(1, Ordering::SeqCst);
        });

        object.updated();
        object.updated();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn metadata_round_trips_through_set() {
        let object = sample_object();
        let mut metadata = object.metadata();
        metadata.gcs_telemetry_update_period = 100;
        object.set_metadata(metadata.clone());
        assert_eq!(object.metadata(), metadata);
    }
}
