use crate::config::EncodeConfig;
use anyhow::{Context, Result};
use mx_content::{
    GeoUri, KnownField, LocationAsset, LocationAssetType, LocationContent, LocationInfo,
    MessageContent, LOCATION_FIELDS,
};
use serde::Serialize;
use std::io::Read as _;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

/// Reads content JSON from `path`, or stdin when `path` is `None` or `-`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path.filter(|path| path.as_os_str() != "-") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input).context("failed to read stdin")?;
            Ok(input)
        }
    }
}

pub fn decode_input(input: &str) -> Result<LocationContent> {
    LocationContent::from_json_str(input).context("invalid location content")
}

pub fn render_content(content: &LocationContent, pretty: bool) -> Result<String> {
    let rendered =
        if pretty { content.to_json_string_pretty() } else { content.to_json_string() };
    rendered.context("failed to serialize content")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentSummary {
    pub body: String,
    pub geo_uri: String,
    pub best_geo_uri: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub uncertainty: Option<f64>,
    pub description: Option<String>,
    pub timestamp: Option<u64>,
    pub text: Option<String>,
    pub asset: Option<String>,
    pub is_self_location: bool,
    pub is_edit: bool,
    pub stable_keys: Vec<&'static str>,
    pub unstable_keys: Vec<&'static str>,
}

impl ContentSummary {
    pub fn from_content(content: &LocationContent) -> Self {
        let geo = match content.best_geo() {
            Ok(geo) => Some(geo),
            Err(err) => {
                log::warn!("cannot parse '{}': {err}", content.best_geo_uri());
                None
            }
        };
        let slots = content.extension_slots();
        let occupied = |key_of: fn(&dyn KnownField) -> &'static str| {
            LOCATION_FIELDS
                .iter()
                .map(|field| key_of(*field))
                .filter(|key| slots.contains(key))
                .collect::<Vec<_>>()
        };

        Self {
            body: content.body().to_string(),
            geo_uri: content.geo_uri().to_string(),
            best_geo_uri: content.best_geo_uri(),
            latitude: geo.map(|geo| geo.latitude),
            longitude: geo.map(|geo| geo.longitude),
            uncertainty: geo.and_then(|geo| geo.uncertainty),
            description: content.location_info().and_then(|info| info.description),
            timestamp: content.timestamp(),
            text: content.text(),
            asset: content
                .location_asset()
                .and_then(|asset| asset.kind)
                .map(|kind| kind.as_str().to_string()),
            is_self_location: content.is_self_location(),
            is_edit: content.is_edit(),
            stable_keys: occupied(|field| field.stable_key()),
            unstable_keys: occupied(|field| field.unstable_key()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryRenderer {
    Text,
    Json { pretty: bool },
}

impl SummaryRenderer {
    pub fn render(self, summary: &ContentSummary) -> Result<String> {
        match self {
            Self::Text => Ok(render_text(summary)),
            Self::Json { pretty: true } => {
                serde_json::to_string_pretty(summary).context("failed to serialize summary")
            }
            Self::Json { pretty: false } => {
                serde_json::to_string(summary).context("failed to serialize summary")
            }
        }
    }
}

fn render_text(summary: &ContentSummary) -> String {
    let mut out = String::new();
    let mut line = |label: &str, value: &dyn std::fmt::Display| {
        out.push_str(&format!("{label:<18}{value}\n"));
    };
    let none = "-";

    line("body", &summary.body);
    line("geo_uri", &summary.geo_uri);
    line("best geo uri", &summary.best_geo_uri);
    match (summary.latitude, summary.longitude) {
        (Some(lat), Some(lon)) => match summary.uncertainty {
            Some(u) => line("coordinates", &format!("{lat}, {lon} (±{u} m)")),
            None => line("coordinates", &format!("{lat}, {lon}")),
        },
        _ => line("coordinates", &none),
    }
    line("description", &summary.description.as_deref().unwrap_or(none));
    match summary.timestamp {
        Some(ts) => line("timestamp", &ts),
        None => line("timestamp", &none),
    }
    line("text", &summary.text.as_deref().unwrap_or(none));
    line("asset", &summary.asset.as_deref().unwrap_or(none));
    line("self location", &summary.is_self_location);
    line("edit", &summary.is_edit);
    line("stable keys", &join_or_none(&summary.stable_keys));
    line("unstable keys", &join_or_none(&summary.unstable_keys));
    out
}

fn join_or_none(keys: &[&str]) -> String {
    if keys.is_empty() {
        "-".to_string()
    } else {
        keys.join(", ")
    }
}

/// Parameters of `mxc build`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildRequest {
    pub body: String,
    pub geo_uri: String,
    pub description: Option<String>,
    /// Defaults to the current time.
    pub timestamp: Option<u64>,
    /// Defaults to `body`.
    pub text: Option<String>,
    /// `self`, `pin`, or a full asset type; defaults to the config value, then `m.self`.
    pub asset: Option<String>,
    pub promote: bool,
}

/// Builds content the way a sending client does: every extension value goes
/// through the unstable slot, stable keys only when promotion is requested.
pub fn build(request: &BuildRequest, config: &EncodeConfig) -> Result<LocationContent> {
    if let Err(err) = request.geo_uri.parse::<GeoUri>() {
        log::warn!("geo uri '{}' is not RFC 5870: {err}", request.geo_uri);
    }

    let mut info = LocationInfo::new(request.geo_uri.clone());
    info.description = request.description.clone();
    let timestamp = match request.timestamp {
        Some(ts) => ts,
        None => now_millis()?,
    };
    let asset = request
        .asset
        .as_deref()
        .or(config.default_asset.as_deref())
        .map_or(LocationAssetType::SelfLocation, parse_asset);

    let mut content = LocationContent::new(request.body.clone(), request.geo_uri.clone())
        .with_location_info(info)
        .with_timestamp(timestamp)
        .with_text(request.text.clone().unwrap_or_else(|| request.body.clone()))
        .with_asset(LocationAsset::new(asset));

    if request.promote || config.promote_stable {
        content.promote_all();
    }
    Ok(content)
}

/// Maps the short CLI names onto wire discriminators.
pub fn parse_asset(raw: &str) -> LocationAssetType {
    match raw {
        "self" => LocationAssetType::SelfLocation,
        "pin" => LocationAssetType::Pin,
        other => LocationAssetType::from(other),
    }
}

pub fn promote(mut content: LocationContent) -> LocationContent {
    content.promote_all();
    content
}

pub fn edit(content: &LocationContent, event_id: &str) -> LocationContent {
    content.to_edit(event_id)
}

fn now_millis() -> Result<u64> {
    let elapsed =
        SystemTime::now().duration_since(UNIX_EPOCH).context("system clock before UNIX epoch")?;
    u64::try_from(elapsed.as_millis()).context("timestamp out of range")
}
