use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::ids::NodeId;

/// Closed set of value shapes a node property can take.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Id(NodeId),
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        PropertyValue::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl From<NodeId> for PropertyValue {
    fn from(value: NodeId) -> Self {
        PropertyValue::Id(value)
    }
}

/// Named values carried by one node, with host-side dirty tracking.
///
/// Setting a value records its name as dirty. The host drains dirty names
/// into a [`NodeDelta`] and mirrors it; observers apply the delta without
/// marking anything dirty themselves, so deltas never echo.
#[derive(Debug, Clone, Default)]
pub struct Properties {
    values: BTreeMap<String, PropertyValue>,
    dirty: Vec<String>,
}

impl Properties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// Writes a value and marks its name dirty. Writing the value a name
    /// already holds is a no-op.
    pub fn set(&mut self, name: &str, value: impl Into<PropertyValue>) {
        let value = value.into();
        if self.values.get(name) == Some(&value) {
            return;
        }
        self.values.insert(name.to_string(), value);
        if !self.dirty.iter().any(|dirty| dirty == name) {
            self.dirty.push(name.to_string());
        }
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Name-ordered iteration.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Drains every dirty name into a mirrorable delta. `None` when clean.
    pub fn take_delta(&mut self) -> Option<NodeDelta> {
        if self.dirty.is_empty() {
            return None;
        }
        let mut changes = Vec::new();
        for name in std::mem::take(&mut self.dirty) {
            if let Some(value) = self.values.get(&name) {
                changes.push((name, value.clone()));
            }
        }
        Some(NodeDelta { changes })
    }

    /// Applies a mirrored delta without touching dirty state.
    pub fn apply_delta(&mut self, delta: &NodeDelta) {
        for (name, value) in &delta.changes {
            self.values.insert(name.clone(), value.clone());
        }
    }

    /// Inserts an authored value without marking it dirty. Authored values
    /// exist on every duplicated copy already, so there is nothing to mirror.
    pub(crate) fn seed(&mut self, name: &str, value: PropertyValue) {
        self.values.insert(name.to_string(), value);
    }
}

/// One mirrored batch of property changes for a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDelta {
    changes: Vec<(String, PropertyValue)>,
}

impl NodeDelta {
    pub fn changes(&self) -> &[(String, PropertyValue)] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}
