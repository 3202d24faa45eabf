use crate::descriptor::{ExtensionValue, FieldPair, KnownField};
use crate::keys::{
    BODY_KEY, GEO_URI_KEY, MSGTYPE_KEY, MSGTYPE_LOCATION, NEW_CONTENT_KEY, RELATES_TO_KEY,
    REQUIRED_KEYS,
};
use crate::location::{
    LocationAsset, LocationInfo, LOCATION_ASSET, LOCATION_FIELDS, LOCATION_INFO, TEXT, TIMESTAMP,
};
use crate::relation::RelationContent;
use crate::resolver;
use crate::slots::{ExtensionSlots, SlotStore};
use crate::DecodeError;
use serde::Deserialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Family-independent part of a room message's content.
pub trait MessageContent {
    fn msg_type(&self) -> &str;

    /// Human-readable fallback for clients that do not understand the type.
    fn body(&self) -> &str;

    fn relates_to(&self) -> Option<&RelationContent>;

    /// Replacement content carried by an edit.
    fn new_content(&self) -> Option<&JsonMap<String, JsonValue>>;
}

/// Content of an `m.location` room message.
///
/// `body` and `geo_uri` are fixed at construction. Extension fields are read
/// and written through the [`resolver`]: reads prefer the stable key, writes
/// go to the unstable key.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationContent {
    body: String,
    geo_uri: String,
    relates_to: Option<RelationContent>,
    new_content: Option<JsonMap<String, JsonValue>>,
    slots: ExtensionSlots,
}

impl LocationContent {
    pub fn new(body: impl Into<String>, geo_uri: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            geo_uri: geo_uri.into(),
            relates_to: None,
            new_content: None,
            slots: ExtensionSlots::new(),
        }
    }

    pub fn decode(map: &JsonMap<String, JsonValue>) -> Result<Self, DecodeError> {
        match map.get(MSGTYPE_KEY) {
            None | Some(JsonValue::Null) => {}
            Some(JsonValue::String(found)) if found == MSGTYPE_LOCATION => {}
            Some(JsonValue::String(found)) => {
                return Err(DecodeError::UnexpectedMsgType { found: found.clone() })
            }
            Some(_) => return Err(DecodeError::wrong_shape(MSGTYPE_KEY, "expected a string")),
        }

        let body = required_string(map, BODY_KEY)?;
        let geo_uri = required_string(map, GEO_URI_KEY)?;

        let relates_to = match map.get(RELATES_TO_KEY) {
            None | Some(JsonValue::Null) => None,
            Some(raw) => Some(
                RelationContent::deserialize(raw)
                    .map_err(|err| DecodeError::wrong_shape(RELATES_TO_KEY, err.to_string()))?,
            ),
        };

        let new_content = match map.get(NEW_CONTENT_KEY) {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::Object(content)) => Some(content.clone()),
            Some(_) => return Err(DecodeError::wrong_shape(NEW_CONTENT_KEY, "expected an object")),
        };

        let slots = ExtensionSlots::from_wire(map, LOCATION_FIELDS)?;

        for key in map.keys().filter(|key| !is_known_key(key)) {
            log::trace!("ignoring unknown location content key '{key}'");
        }

        Ok(Self { body, geo_uri, relates_to, new_content, slots })
    }

    pub fn from_json_value(value: &JsonValue) -> Result<Self, DecodeError> {
        let JsonValue::Object(map) = value else {
            return Err(DecodeError::NotAnObject);
        };
        Self::decode(map)
    }

    pub fn from_json_str(input: &str) -> Result<Self, DecodeError> {
        let value = serde_json::from_str::<JsonValue>(input)
            .map_err(|err| DecodeError::Json(err.to_string()))?;
        Self::from_json_value(&value)
    }

    /// Wire mapping: required fields plus every occupied extension slot.
    pub fn encode(&self) -> JsonMap<String, JsonValue> {
        let mut map = JsonMap::new();
        map.insert(MSGTYPE_KEY.to_string(), JsonValue::String(MSGTYPE_LOCATION.to_string()));
        map.insert(BODY_KEY.to_string(), JsonValue::String(self.body.clone()));
        map.insert(GEO_URI_KEY.to_string(), JsonValue::String(self.geo_uri.clone()));
        if let Some(relation) = &self.relates_to {
            map.insert(RELATES_TO_KEY.to_string(), relation.to_json_value());
        }
        if let Some(content) = &self.new_content {
            map.insert(NEW_CONTENT_KEY.to_string(), JsonValue::Object(content.clone()));
        }
        self.slots.write_into(&mut map);
        map
    }

    pub fn to_json_value(&self) -> JsonValue {
        JsonValue::Object(self.encode())
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.encode())
    }

    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.encode())
    }

    /// The required base-format locator, independent of extension fields.
    pub fn geo_uri(&self) -> &str {
        &self.geo_uri
    }

    pub fn extension_slots(&self) -> &ExtensionSlots {
        &self.slots
    }

    pub fn get<V: ExtensionValue>(&self, pair: &FieldPair<V>) -> Option<V> {
        resolver::get(self, pair)
    }

    pub fn set<V: ExtensionValue>(&mut self, pair: &FieldPair<V>, value: V) {
        resolver::set(self, pair, value);
    }

    pub fn clear(&mut self, field: &dyn KnownField) {
        resolver::clear(self, field);
    }

    pub fn promote(&mut self, field: &dyn KnownField) {
        resolver::promote(self, field);
    }

    /// Promotes every location extension field, for emitting the stabilized
    /// representation.
    pub fn promote_all(&mut self) {
        resolver::promote_all(self, LOCATION_FIELDS);
    }

    pub fn location_info(&self) -> Option<LocationInfo> {
        self.get(&LOCATION_INFO)
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.get(&TIMESTAMP)
    }

    pub fn text(&self) -> Option<String> {
        self.get(&TEXT)
    }

    pub fn location_asset(&self) -> Option<LocationAsset> {
        self.get(&LOCATION_ASSET)
    }

    pub fn with_location_info(mut self, info: LocationInfo) -> Self {
        self.set(&LOCATION_INFO, info);
        self
    }

    pub fn with_timestamp(mut self, millis: u64) -> Self {
        self.set(&TIMESTAMP, millis);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.set(&TEXT, text.into());
        self
    }

    pub fn with_asset(mut self, asset: LocationAsset) -> Self {
        self.set(&LOCATION_ASSET, asset);
        self
    }

    pub fn with_relation(mut self, relation: RelationContent) -> Self {
        self.relates_to = Some(relation);
        self
    }

    pub fn is_edit(&self) -> bool {
        self.relates_to.as_ref().is_some_and(RelationContent::is_replace)
    }

    /// Wraps this content as an edit of `event_id`.
    ///
    /// The outer envelope keeps the extension slots so that clients which
    /// ignore `m.new_content` still render the new location.
    pub fn to_edit(&self, event_id: impl Into<String>) -> Self {
        let mut replacement = self.clone();
        replacement.relates_to = None;
        replacement.new_content = None;

        Self {
            body: format!("* {}", self.body),
            geo_uri: self.geo_uri.clone(),
            relates_to: Some(RelationContent::replace(event_id)),
            new_content: Some(replacement.encode()),
            slots: self.slots.clone(),
        }
    }

    /// Decodes `m.new_content`, if present.
    pub fn replacement(&self) -> Option<Result<Self, DecodeError>> {
        self.new_content.as_ref().map(Self::decode)
    }
}

impl MessageContent for LocationContent {
    fn msg_type(&self) -> &str {
        MSGTYPE_LOCATION
    }

    fn body(&self) -> &str {
        &self.body
    }

    fn relates_to(&self) -> Option<&RelationContent> {
        self.relates_to.as_ref()
    }

    fn new_content(&self) -> Option<&JsonMap<String, JsonValue>> {
        self.new_content.as_ref()
    }
}

impl SlotStore for LocationContent {
    fn slots(&self) -> &ExtensionSlots {
        &self.slots
    }

    fn slots_mut(&mut self) -> &mut ExtensionSlots {
        &mut self.slots
    }
}

fn required_string(
    map: &JsonMap<String, JsonValue>,
    key: &'static str,
) -> Result<String, DecodeError> {
    match map.get(key) {
        None | Some(JsonValue::Null) => Err(DecodeError::MissingField(key)),
        Some(JsonValue::String(value)) => Ok(value.clone()),
        Some(_) => Err(DecodeError::wrong_shape(key, "expected a string")),
    }
}

fn is_known_key(key: &str) -> bool {
    REQUIRED_KEYS.contains(&key)
        || key == RELATES_TO_KEY
        || key == NEW_CONTENT_KEY
        || LOCATION_FIELDS.iter().any(|field| field.has_key(key))
}

#[cfg(test)]
mod tests {
    use super::{LocationContent, MessageContent};
    use crate::keys::STABLE_TEXT_KEY;
    use crate::location::TEXT;
    use crate::DecodeError;
    use serde_json::json;

    #[test]
    fn missing_msgtype_defaults_to_location() {
        let content = LocationContent::from_json_value(&json!({
            "body": "here",
            "geo_uri": "geo:1,2"
        }))
        .expect("content decodes");
        assert_eq!(content.msg_type(), "m.location");
        assert_eq!(content.body(), "here");
    }

    #[test]
    fn null_extension_slot_is_absent() {
        let content = LocationContent::from_json_value(&json!({
            "msgtype": "m.location",
            "body": "here",
            "geo_uri": "geo:1,2",
            "m.text": null,
            "org.matrix.msc1767.text": "fallback"
        }))
        .expect("content decodes");
        assert_eq!(content.get(&TEXT).as_deref(), Some("fallback"));
        assert!(!content.extension_slots().contains(STABLE_TEXT_KEY));
    }

    #[test]
    fn required_fields_must_be_strings() {
        let err = LocationContent::from_json_value(&json!({ "body": 5, "geo_uri": "geo:1,2" }))
            .expect_err("body must be a string");
        assert!(matches!(err, DecodeError::WrongShape { ref field, .. } if field == "body"));

        let err = LocationContent::from_json_value(&json!({ "body": "here", "geo_uri": null }))
            .expect_err("geo_uri is required");
        assert_eq!(err, DecodeError::MissingField("geo_uri"));
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let content = LocationContent::from_json_value(&json!({
            "body": "here",
            "geo_uri": "geo:1,2",
            "org.example.custom": { "a": 1 }
        }))
        .expect("content decodes");
        assert!(!content.encode().contains_key("org.example.custom"));
    }

    #[test]
    fn json_text_matches_encoded_mapping() {
        let content = LocationContent::new("here", "geo:1,2").with_text("here");
        let compact = content.to_json_string().expect("content serializes");
        assert!(!compact.contains('\n'));
        let pretty = content.to_json_string_pretty().expect("content serializes");
        assert!(pretty.contains("\n  \"body\": \"here\""));

        for text in [compact, pretty] {
            assert_eq!(LocationContent::from_json_str(&text), Ok(content.clone()));
            let value: serde_json::Value = serde_json::from_str(&text).expect("valid json");
            assert_eq!(value, content.to_json_value());
        }
    }

    #[test]
    fn invalid_json_text_is_reported() {
        let err = LocationContent::from_json_str("{ not json").expect_err("invalid json");
        assert!(matches!(err, DecodeError::Json(_)));
        assert_eq!(LocationContent::from_json_str("[]"), Err(DecodeError::NotAnObject));
    }
}
