//! Matrix `m.location` message content.
//!
//! Extension fields introduced by numbered proposals live under two wire keys:
//! the unstable `org.matrix.mscXXXX.*` key older peers understand, and the
//! stable `m.*` key of the finalized Matrix specification. This crate resolves the
//! pair on read (stable wins) and writes through to the unstable key, so
//! content produced here stays readable by peers on either revision.
//!
//! - [`FieldPair`] describes one stable/unstable key pair and its value type
//! - [`ExtensionSlots`] holds the raw slots, [`resolver`] applies precedence
//! - [`LocationContent`] is the envelope: decode, encode, build, edit
//! - [`LocationContent::is_self_location`] and [`LocationContent::best_geo_uri`]
//!   derive presentation-facing values from the resolved fields

mod classify;
mod content;
mod descriptor;
mod error;
mod geo;
mod location;
mod slots;

pub mod keys;
pub mod relation;
pub mod resolver;

pub use content::{LocationContent, MessageContent};
pub use descriptor::{ExtensionValue, FieldPair, KnownField};
pub use error::{DecodeError, GeoUriError};
pub use geo::GeoUri;
pub use location::{
    LocationAsset, LocationAssetType, LocationInfo, LOCATION_ASSET, LOCATION_FIELDS,
    LOCATION_INFO, TEXT, TIMESTAMP,
};
pub use relation::{RelationContent, ReplyToContent};
pub use slots::{ExtensionSlots, SlotStore};
