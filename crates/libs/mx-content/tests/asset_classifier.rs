use mx_content::{LocationAsset, LocationAssetType, LocationContent, LocationInfo, LOCATION_ASSET};
use serde_json::json;
use test_support::stable_location;

#[test]
fn no_asset_means_self() {
    let content = LocationContent::new("here", "geo:1,2");
    assert!(content.is_self_location());
}

#[test]
fn self_asset_means_self() {
    let content = LocationContent::new("here", "geo:1,2")
        .with_asset(LocationAsset::new(LocationAssetType::SelfLocation));
    assert!(content.is_self_location());
}

#[test]
fn any_other_discriminator_is_not_self() {
    for kind in ["m.pin", "org.example.vehicle", "m.self.extra", ""] {
        let mut content = LocationContent::new("here", "geo:1,2");
        content.set(&LOCATION_ASSET, LocationAsset::new(LocationAssetType::from(kind)));
        assert!(!content.is_self_location(), "{kind} must not classify as self");
    }
}

#[test]
fn classification_follows_stable_asset() {
    let mut raw = stable_location();
    raw["org.matrix.msc3488.asset"] = json!({ "type": "m.pin" });
    let content = LocationContent::from_json_value(&raw).expect("content decodes");
    assert!(content.is_self_location());

    raw["m.asset"] = json!({ "type": "m.pin" });
    raw["org.matrix.msc3488.asset"] = json!({ "type": "m.self" });
    let content = LocationContent::from_json_value(&raw).expect("content decodes");
    assert!(!content.is_self_location());
}

#[test]
fn extension_locator_takes_precedence() {
    let content = LocationContent::new("here", "geo:1,2;3")
        .with_location_info(LocationInfo::new("geo:9,9;9"));
    assert_eq!(content.best_geo_uri(), "geo:9,9;9");
}

#[test]
fn primary_locator_is_the_fallback() {
    let content = LocationContent::new("here", "geo:1,2;3");
    assert_eq!(content.best_geo_uri(), "geo:1,2;3");
}

#[test]
fn stable_locator_beats_unstable_locator() {
    let content = LocationContent::from_json_value(&stable_location()).expect("content decodes");
    assert_eq!(content.geo_uri(), "geo:1,2;3");
    assert_eq!(content.best_geo_uri(), "geo:9,9;9");

    let mut content = content;
    content.set(&mx_content::LOCATION_INFO, LocationInfo::new("geo:5,5"));
    assert_eq!(content.best_geo_uri(), "geo:9,9;9");
}
