use crate::content::LocationContent;
use crate::geo::GeoUri;
use crate::location::LocationAssetType;
use crate::GeoUriError;

impl LocationContent {
    /// Whether this location is the sender's own rather than a generic asset.
    ///
    /// Content without an asset, or with an asset that carries no type,
    /// counts as `m.self`.
    pub fn is_self_location(&self) -> bool {
        matches!(
            self.location_asset().and_then(|asset| asset.kind),
            None | Some(LocationAssetType::SelfLocation)
        )
    }

    /// The extension location's URI when present, else the required
    /// `geo_uri`.
    pub fn best_geo_uri(&self) -> String {
        self.location_info()
            .and_then(|info| info.geo_uri)
            .unwrap_or_else(|| self.geo_uri().to_string())
    }

    pub fn best_geo(&self) -> Result<GeoUri, GeoUriError> {
        self.best_geo_uri().parse()
    }
}

#[cfg(test)]
mod tests {
    use crate::{LocationAsset, LocationAssetType, LocationContent, LocationInfo};

    #[test]
    fn location_info_without_uri_falls_back() {
        let content = LocationContent::new("here", "geo:1,2;3")
            .with_location_info(LocationInfo { geo_uri: None, description: Some("desk".into()) });
        assert_eq!(content.best_geo_uri(), "geo:1,2;3");
    }

    #[test]
    fn pin_is_not_self() {
        let content = LocationContent::new("pin", "geo:1,2")
            .with_asset(LocationAsset::new(LocationAssetType::Pin));
        assert!(!content.is_self_location());
    }

    #[test]
    fn untyped_asset_is_self() {
        let content =
            LocationContent::new("me", "geo:1,2").with_asset(LocationAsset { kind: None });
        assert!(content.is_self_location());
    }

    #[test]
    fn best_geo_parses_extension_uri() {
        let content = LocationContent::new("here", "geo:1,2")
            .with_location_info(LocationInfo::new("geo:51.5008,0.1247;u=35"));
        let geo = content.best_geo().expect("valid geo uri");
        assert_eq!(geo.latitude, 51.5008);
        assert_eq!(geo.uncertainty, Some(35.0));
    }
}
