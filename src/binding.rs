//! Per-device action → input mapping.
//!
//! [`DeviceConfig`] is what a binding session edits and what gets persisted.
//! Action names are stored lower-cased so lookups ignore case.

use crate::device::DeviceId;
use crate::event::Input;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bindings for one device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub device_id: DeviceId,
    pub device_name: String,
    /// Stable hardware identifier used to match saved entries to devices.
    #[serde(default)]
    pub device_guid: String,
    #[serde(default)]
    inputs: BTreeMap<String, Input>,
}

impl DeviceConfig {
    pub fn new(device_id: DeviceId, device_name: impl Into<String>, device_guid: impl Into<String>) -> Self {
        Self {
            device_id,
            device_name: device_name.into(),
            device_guid: device_guid.into(),
            inputs: BTreeMap::new(),
        }
    }

    fn key(action: &str) -> String {
        action.to_ascii_lowercase()
    }

    pub fn has_mapping(&self, action: &str) -> bool {
        self.inputs.contains_key(&Self::key(action))
    }

    pub fn input_for(&self, action: &str) -> Option<&Input> {
        self.inputs.get(&Self::key(action))
    }

    /// Binds `action` to `input`, replacing any previous binding of that action.
    pub fn map_input(&mut self, action: &str, input: Input) {
        self.inputs.insert(Self::key(action), input);
    }

    /// Removes the binding for `action`, returning it if there was one.
    pub fn unmap_input(&mut self, action: &str) -> Option<Input> {
        self.inputs.remove(&Self::key(action))
    }

    pub fn clear(&mut self) {
        self.inputs.clear();
    }

    /// Whether `action` is bound to a control that `input` triggers.
    pub fn is_mapped_to(&self, action: &str, input: &Input) -> bool {
        self.input_for(action)
            .map(|stored| stored.triggered_by(input))
            .unwrap_or(false)
    }

    /// Every action (lower-cased) that `input` triggers.
    pub fn mapped_to(&self, input: &Input) -> Vec<&str> {
        self.inputs
            .iter()
            .filter(|(_, stored)| stored.triggered_by(input))
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Iterate `(action, input)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Input)> {
        self.inputs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }
}
