use crate::descriptor::{serialize_or_null, ExtensionValue, FieldPair, KnownField};
use crate::keys::{
    ASSET_TYPE_PIN, ASSET_TYPE_SELF, STABLE_ASSET_KEY, STABLE_LOCATION_KEY, STABLE_TEXT_KEY,
    STABLE_TS_KEY, UNSTABLE_ASSET_KEY, UNSTABLE_LOCATION_KEY, UNSTABLE_TEXT_KEY, UNSTABLE_TS_KEY,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Structured location: `{ "uri": "geo:...", "description": "..." }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    #[serde(rename = "uri", default, skip_serializing_if = "Option::is_none")]
    pub geo_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl LocationInfo {
    pub fn new(geo_uri: impl Into<String>) -> Self {
        Self { geo_uri: Some(geo_uri.into()), description: None }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ExtensionValue for LocationInfo {
    fn from_slot(raw: &JsonValue) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    fn to_slot(&self) -> JsonValue {
        serialize_or_null(self)
    }
}

/// What a location refers to. Unknown discriminators are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LocationAssetType {
    /// The sender's own location (`m.self`).
    SelfLocation,
    /// A dropped pin (`m.pin`).
    Pin,
    Other(String),
}

impl LocationAssetType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SelfLocation => ASSET_TYPE_SELF,
            Self::Pin => ASSET_TYPE_PIN,
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for LocationAssetType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            ASSET_TYPE_SELF => Self::SelfLocation,
            ASSET_TYPE_PIN => Self::Pin,
            _ => Self::Other(raw),
        }
    }
}

impl From<LocationAssetType> for String {
    fn from(kind: LocationAssetType) -> Self {
        match kind {
            LocationAssetType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl From<&str> for LocationAssetType {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

/// Generic asset a location is attached to: `{ "type": "m.self" }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationAsset {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<LocationAssetType>,
}

impl LocationAsset {
    pub fn new(kind: LocationAssetType) -> Self {
        Self { kind: Some(kind) }
    }
}

impl ExtensionValue for LocationAsset {
    fn from_slot(raw: &JsonValue) -> Result<Self, serde_json::Error> {
        Self::deserialize(raw)
    }

    fn to_slot(&self) -> JsonValue {
        serialize_or_null(self)
    }
}

pub const LOCATION_INFO: FieldPair<LocationInfo> =
    FieldPair::new("location", STABLE_LOCATION_KEY, UNSTABLE_LOCATION_KEY);

/// Time the location refers to, in milliseconds since the UNIX epoch.
pub const TIMESTAMP: FieldPair<u64> = FieldPair::new("ts", STABLE_TS_KEY, UNSTABLE_TS_KEY);

pub const TEXT: FieldPair<String> = FieldPair::new("text", STABLE_TEXT_KEY, UNSTABLE_TEXT_KEY);

pub const LOCATION_ASSET: FieldPair<LocationAsset> =
    FieldPair::new("asset", STABLE_ASSET_KEY, UNSTABLE_ASSET_KEY);

/// Every extension field of location content.
pub const LOCATION_FIELDS: &[&dyn KnownField] =
    &[&LOCATION_INFO, &TIMESTAMP, &TEXT, &LOCATION_ASSET];
