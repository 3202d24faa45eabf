//! Wire keys of location message content.

pub const MSGTYPE_KEY: &str = "msgtype";
pub const BODY_KEY: &str = "body";
pub const GEO_URI_KEY: &str = "geo_uri";
pub const RELATES_TO_KEY: &str = "m.relates_to";
pub const NEW_CONTENT_KEY: &str = "m.new_content";

pub const MSGTYPE_LOCATION: &str = "m.location";

// MSC3488 location extension.
pub const UNSTABLE_LOCATION_KEY: &str = "org.matrix.msc3488.location";
pub const STABLE_LOCATION_KEY: &str = "m.location";
pub const UNSTABLE_TS_KEY: &str = "org.matrix.msc3488.ts";
pub const STABLE_TS_KEY: &str = "m.ts";
pub const UNSTABLE_ASSET_KEY: &str = "org.matrix.msc3488.asset";
pub const STABLE_ASSET_KEY: &str = "m.asset";

// MSC1767 extensible events text.
pub const UNSTABLE_TEXT_KEY: &str = "org.matrix.msc1767.text";
pub const STABLE_TEXT_KEY: &str = "m.text";

pub const ASSET_TYPE_SELF: &str = "m.self";
pub const ASSET_TYPE_PIN: &str = "m.pin";

pub(crate) const REQUIRED_KEYS: [&str; 3] = [MSGTYPE_KEY, BODY_KEY, GEO_URI_KEY];
