//! Fields of a remote data object.
//!
//! A field has a name, a unit tag, an optional list of enumerated option
//! strings, and an indexed array of scalar values. Single-value fields are
//! arrays of one element; multi-channel fields (ranges, rates, the live
//! command array) index by channel. Values are read and written by
//! `(field, index)` pairs.
//!
//! Unit tags double as lightweight type information: the field synchronizer
//! recognizes channel-assignment fields by the substring `"channel"` in the
//! unit string rather than by name.

use serde::{Deserialize, Serialize};

use crate::error::{AppResult, PanelError};
use crate::events::{read_guard, write_guard};
use std::sync::RwLock;

/// A scalar stored in a field element.
///
/// Numeric fields hold `Number`; enumerated fields hold `Text` naming the
/// selected option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
}

impl FieldValue {
    /// The numeric value, if this is a `Number`.
    pub fn number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }

    /// The string value, if this is a `Text`.
    pub fn text(&self) -> Option<&str> {
        match self {
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => Some(s.as_str()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// A named, unit-tagged, indexed value array on a remote object.
///
/// Element count and option list are fixed by the schema at construction;
/// only the values change afterwards. Writes are serialized internally so a
/// field handle can be shared freely.
#[derive(Debug)]
pub struct ObjectField {
    name: String,
    units: String,
    options: Vec<String>,
    values: RwLock<Vec<FieldValue>>,
}

impl ObjectField {
    /// A numeric field with `element_count` elements, all set to `initial`.
    pub fn number(
        name: impl Into<String>,
        units: impl Into<String>,
        element_count: usize,
        initial: f64,
    ) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            options: Vec::new(),
            values: RwLock::new(vec![FieldValue::Number(initial); element_count.max(1)]),
        }
    }

    /// A single-element enumerated field currently set to `selected`.
    pub fn enumeration(
        name: impl Into<String>,
        units: impl Into<String>,
        options: &[&str],
        selected: &str,
    ) -> Self {
        Self::enumeration_array(name, units, options, 1, selected)
    }

    /// An enumerated field with `element_count` elements, all set to `initial`.
    pub fn enumeration_array(
        name: impl Into<String>,
        units: impl Into<String>,
        options: &[&str],
        element_count: usize,
        initial: &str,
    ) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            options: options.iter().map(|s| (*s).to_string()).collect(),
            values: RwLock::new(vec![
                FieldValue::Text(initial.to_string());
                element_count.max(1)
            ]),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit tag string. Assignment fields carry the channel tag here.
    pub fn units(&self) -> &str {
        &self.units
    }

    /// Declared option strings; empty for numeric fields.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn element_count(&self) -> usize {
        read_guard(&self.values).len()
    }

    /// Value of the first element. Every field has at least one.
    pub fn value(&self) -> FieldValue {
        read_guard(&self.values)[0].clone()
    }

    /// Value at `index`, or an integration error when out of range.
    pub fn value_at(&self, index: usize) -> AppResult<FieldValue> {
        let values = read_guard(&self.values);
        values
            .get(index)
            .cloned()
            .ok_or_else(|| PanelError::IndexOutOfRange {
                field: self.name.clone(),
                index,
                len: values.len(),
            })
    }

    /// Numeric value at `index`.
    pub fn number_at(&self, index: usize) -> AppResult<f64> {
        self.value_at(index)?
            .number()
            .ok_or_else(|| PanelError::ValueKind {
                field: self.name.clone(),
                expected: "numeric",
            })
    }

    /// Text value at `index`.
    pub fn text_at(&self, index: usize) -> AppResult<String> {
        match self.value_at(index)? {
            FieldValue::Text(s) => Ok(s),
            FieldValue::Number(_) => Err(PanelError::ValueKind {
                field: self.name.clone(),
                expected: "text",
            }),
        }
    }

    /// Write the first element.
    pub fn set_value(&self, value: impl Into<FieldValue>) -> AppResult<()> {
        self.set_value_at(0, value)
    }

    /// Write the element at `index`.
    ///
    /// Text writes to an enumerated field must name one of its declared
    /// options.
    pub fn set_value_at(&self, index: usize, value: impl Into<FieldValue>) -> AppResult<()> {
        let value = value.into();
        if let FieldValue::Text(text) = &value {
            if !self.options.is_empty() && !self.options.iter().any(|o| o == text) {
                return Err(PanelError::InvalidOption {
                    field: self.name.clone(),
                    value: text.clone(),
                });
            }
        }

        let mut values = write_guard(&self.values);
        let len = values.len();
        match values.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(PanelError::IndexOutOfRange {
                field: self.name.clone(),
                index,
                len,
            }),
        }
    }

    /// Position of the currently selected option within the option list.
    ///
    /// For channel-assignment fields this position *is* the channel index:
    /// the schema orders the option list by output channel, so the selected
    /// option's place in its own list decides which channel the function is
    /// bound to. `None` when the field is numeric or holds a string that is
    /// not (or no longer) in the option list.
    pub fn selected_option_index(&self) -> Option<usize> {
        let value = self.value();
        let selected = value.text()?;
        self.options.iter().position(|o| o == selected)
    }
}
