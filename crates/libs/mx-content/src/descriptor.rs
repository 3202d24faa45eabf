use core::fmt;
use core::marker::PhantomData;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A value that can live in an extension slot.
///
/// Decoding is fallible and runs once, when content is read from the wire.
/// Encoding is infallible so that writing a slot never fails.
pub trait ExtensionValue: Clone + PartialEq + fmt::Debug + Sized {
    fn from_slot(raw: &JsonValue) -> Result<Self, serde_json::Error>;

    fn to_slot(&self) -> JsonValue;
}

impl ExtensionValue for String {
    fn from_slot(raw: &JsonValue) -> Result<Self, serde_json::Error> {
        serde::Deserialize::deserialize(raw)
    }

    fn to_slot(&self) -> JsonValue {
        JsonValue::String(self.clone())
    }
}

impl ExtensionValue for u64 {
    fn from_slot(raw: &JsonValue) -> Result<Self, serde_json::Error> {
        serde::Deserialize::deserialize(raw)
    }

    fn to_slot(&self) -> JsonValue {
        JsonValue::from(*self)
    }
}

/// Serializes a derived wire model. Models made of strings, integers and
/// string-keyed maps always serialize; a failure is logged and yields `null`.
pub(crate) fn serialize_or_null<T: Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or_else(|err| {
        log::warn!("failed to serialize extension value: {err}");
        JsonValue::Null
    })
}

/// Stable/unstable wire key pair for one extension concept, typed by the
/// value stored under either key.
pub struct FieldPair<V> {
    name: &'static str,
    stable_key: &'static str,
    unstable_key: &'static str,
    value: PhantomData<fn() -> V>,
}

impl<V> FieldPair<V> {
    pub const fn new(
        name: &'static str,
        stable_key: &'static str,
        unstable_key: &'static str,
    ) -> Self {
        Self { name, stable_key, unstable_key, value: PhantomData }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn stable_key(&self) -> &'static str {
        self.stable_key
    }

    pub const fn unstable_key(&self) -> &'static str {
        self.unstable_key
    }
}

impl<V> Clone for FieldPair<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for FieldPair<V> {}

impl<V> PartialEq for FieldPair<V> {
    fn eq(&self, other: &Self) -> bool {
        self.stable_key == other.stable_key && self.unstable_key == other.unstable_key
    }
}

impl<V> Eq for FieldPair<V> {}

impl<V> fmt::Debug for FieldPair<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldPair")
            .field("name", &self.name)
            .field("stable_key", &self.stable_key)
            .field("unstable_key", &self.unstable_key)
            .finish()
    }
}

/// Type-erased view of a [`FieldPair`], used where the value type does not
/// matter: decode-time validation, promotion, and clearing.
pub trait KnownField: Sync {
    fn name(&self) -> &'static str;

    fn stable_key(&self) -> &'static str;

    fn unstable_key(&self) -> &'static str;

    /// Checks that `raw` decodes as this field's value type.
    fn check(&self, raw: &JsonValue) -> Result<(), String>;

    fn has_key(&self, key: &str) -> bool {
        self.stable_key() == key || self.unstable_key() == key
    }
}

impl<V: ExtensionValue> KnownField for FieldPair<V> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn stable_key(&self) -> &'static str {
        self.stable_key
    }

    fn unstable_key(&self) -> &'static str {
        self.unstable_key
    }

    fn check(&self, raw: &JsonValue) -> Result<(), String> {
        V::from_slot(raw).map(drop).map_err(|err| err.to_string())
    }
}
