use crate::descriptor::KnownField;
use crate::DecodeError;
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::collections::BTreeMap;

/// Raw extension slots of one content envelope, keyed by wire key.
///
/// Every stored value was either validated against its field's value type on
/// decode or produced by that type's encoder, so typed reads cannot fail.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtensionSlots {
    entries: BTreeMap<&'static str, JsonValue>,
}

impl ExtensionSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<&JsonValue> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occupied wire keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    pub(crate) fn put(&mut self, key: &'static str, value: JsonValue) {
        self.entries.insert(key, value);
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.entries.remove(key)
    }

    /// Reads both slots of every known field out of a wire mapping.
    ///
    /// `null` is treated as absence.
    pub(crate) fn from_wire(
        map: &JsonMap<String, JsonValue>,
        fields: &[&dyn KnownField],
    ) -> Result<Self, DecodeError> {
        let mut slots = Self::new();
        for field in fields {
            for key in [field.unstable_key(), field.stable_key()] {
                let Some(raw) = map.get(key).filter(|raw| !raw.is_null()) else {
                    continue;
                };
                field.check(raw).map_err(|reason| DecodeError::wrong_shape(key, reason))?;
                slots.put(key, raw.clone());
            }
        }
        Ok(slots)
    }

    pub(crate) fn write_into(&self, map: &mut JsonMap<String, JsonValue>) {
        for (key, value) in &self.entries {
            map.insert((*key).to_string(), value.clone());
        }
    }
}

/// Anything that owns a set of extension slots.
///
/// Raw slot mutation stays inside this crate; outside callers go through the
/// typed [`resolver`](crate::resolver) operations.
pub trait SlotStore {
    fn slots(&self) -> &ExtensionSlots;

    fn slots_mut(&mut self) -> &mut ExtensionSlots;
}

impl SlotStore for ExtensionSlots {
    fn slots(&self) -> &ExtensionSlots {
        self
    }

    fn slots_mut(&mut self) -> &mut ExtensionSlots {
        self
    }
}
