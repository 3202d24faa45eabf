//! `m.relates_to`: references from one event's content to another event.
//!
//! Relations are held by event identifier only; resolving them against the
//! timeline is the caller's job.

use crate::descriptor::serialize_or_null;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

pub const REL_TYPE_REPLACE: &str = "m.replace";
pub const REL_TYPE_ANNOTATION: &str = "m.annotation";
pub const REL_TYPE_REFERENCE: &str = "m.reference";
pub const REL_TYPE_THREAD: &str = "m.thread";

/// Annotation payload, e.g. the reaction emoji.
pub const ANNOTATION_KEY: &str = "key";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rel_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(rename = "m.in_reply_to", default, skip_serializing_if = "Option::is_none")]
    pub in_reply_to: Option<ReplyToContent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_falling_back: Option<bool>,
    /// Members of relation types not modelled above (`key` of annotations,
    /// ...), re-emitted unchanged.
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyToContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl RelationContent {
    /// Relation marking content as the replacement (edit) of `event_id`.
    pub fn replace(event_id: impl Into<String>) -> Self {
        Self::with_type(REL_TYPE_REPLACE, event_id)
    }

    pub fn reference(event_id: impl Into<String>) -> Self {
        Self::with_type(REL_TYPE_REFERENCE, event_id)
    }

    pub fn annotation(event_id: impl Into<String>, key: impl Into<String>) -> Self {
        let mut relation = Self::with_type(REL_TYPE_ANNOTATION, event_id);
        relation.extra.insert(ANNOTATION_KEY.to_string(), JsonValue::String(key.into()));
        relation
    }

    pub fn reply_to(event_id: impl Into<String>) -> Self {
        Self {
            in_reply_to: Some(ReplyToContent { event_id: Some(event_id.into()) }),
            ..Self::default()
        }
    }

    fn with_type(rel_type: &str, event_id: impl Into<String>) -> Self {
        Self {
            rel_type: Some(rel_type.to_string()),
            event_id: Some(event_id.into()),
            ..Self::default()
        }
    }

    pub fn is_replace(&self) -> bool {
        self.rel_type.as_deref() == Some(REL_TYPE_REPLACE)
    }

    /// The annotation key, for `m.annotation` relations.
    pub fn key(&self) -> Option<&str> {
        self.extra.get(ANNOTATION_KEY).and_then(JsonValue::as_str)
    }

    pub fn to_json_value(&self) -> JsonValue {
        serialize_or_null(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{RelationContent, REL_TYPE_ANNOTATION, REL_TYPE_REPLACE};
    use serde::Deserialize;
    use serde_json::json;

    #[test]
    fn reply_relation_uses_in_reply_to_key() {
        let relation = RelationContent::reply_to("$parent");
        assert_eq!(relation.to_json_value(), json!({ "m.in_reply_to": { "event_id": "$parent" } }));
        assert!(!relation.is_replace());
    }

    #[test]
    fn decodes_thread_fallback_relation() {
        let raw = json!({
            "rel_type": "m.thread",
            "event_id": "$root",
            "is_falling_back": true,
            "m.in_reply_to": { "event_id": "$latest" }
        });
        let relation = RelationContent::deserialize(&raw).expect("relation decodes");
        assert_eq!(relation.rel_type.as_deref(), Some("m.thread"));
        assert_eq!(relation.is_falling_back, Some(true));
        assert_eq!(relation.to_json_value(), raw);
    }

    #[test]
    fn annotation_keeps_its_key() {
        let raw = json!({ "rel_type": REL_TYPE_ANNOTATION, "event_id": "$target", "key": "👍" });
        let relation = RelationContent::deserialize(&raw).expect("relation decodes");
        assert_eq!(relation, RelationContent::annotation("$target", "👍"));
        assert_eq!(relation.key(), Some("👍"));
        assert_eq!(relation.to_json_value(), raw);
    }

    #[test]
    fn unmodelled_members_survive_re_encoding() {
        let raw = json!({
            "rel_type": "m.reference",
            "event_id": "$e",
            "key": "x",
            "org.example.weight": { "value": 3 }
        });
        let relation = RelationContent::deserialize(&raw).expect("relation decodes");
        assert_eq!(relation.key(), Some("x"));
        assert_eq!(relation.extra.len(), 2);
        assert_eq!(relation.to_json_value(), raw);
    }

    #[test]
    fn replace_relation_is_an_edit() {
        let relation = RelationContent::replace("$original");
        assert!(relation.is_replace());
        assert_eq!(
            relation.to_json_value(),
            json!({ "rel_type": REL_TYPE_REPLACE, "event_id": "$original" })
        );
    }
}
