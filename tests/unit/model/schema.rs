use super::*;

fn variant(id: &str, weight: Option<f64>) -> LayerVariant {
    LayerVariant {
        id: id.to_string(),
        label: id.to_string(),
        asset_cid: format!("bafy-{id}"),
        format: LayerAssetFormat::Png,
        traits: None,
        weight,
    }
}

#[test]
fn colorway_serializes_with_mode_tag() {
    let solid = Colorway::solid("#ff6b81");
    let json = serde_json::to_value(&solid).unwrap();
    assert_eq!(json["mode"], "solid");
    assert_eq!(json["color"], "#ff6b81");

    let gradient = Colorway::LinearGradient {
        angle_deg: 225.0,
        stops: vec![GradientStop {
            offset: 0.0,
            color: "#ffffff".to_string(),
            opacity: None,
        }],
    };
    let json = serde_json::to_value(&gradient).unwrap();
    assert_eq!(json["mode"], "linear-gradient");
    assert_eq!(json["angleDeg"], 225.0);
    // unset stop opacity is omitted entirely
    assert!(json["stops"][0].get("opacity").is_none());
}

#[test]
fn colorway_deserializes_kebab_modes() {
    let parsed: Colorway =
        serde_json::from_str(r##"{"mode":"radial-gradient","stops":[{"offset":0.5,"color":"#abcdef"}]}"##)
            .unwrap();
    let Colorway::RadialGradient { stops } = parsed else {
        panic!("expected radial gradient");
    };
    assert_eq!(stops.len(), 1);
    assert_eq!(stops[0].opacity, None);
}

#[test]
fn colorway_validation_rejects_bad_input() {
    assert!(Colorway::solid("#123456").validate().is_ok());
    assert!(Colorway::solid("teal").validate().is_err());
    assert!(
        Colorway::LinearGradient {
            angle_deg: f64::NAN,
            stops: vec![GradientStop {
                offset: 0.0,
                color: "#ffffff".to_string(),
                opacity: None,
            }],
        }
        .validate()
        .is_err()
    );
    assert!(
        Colorway::RadialGradient { stops: Vec::new() }
            .validate()
            .is_err()
    );
    assert!(
        Colorway::RadialGradient {
            stops: vec![GradientStop {
                offset: 1.5,
                color: "#ffffff".to_string(),
                opacity: None,
            }],
        }
        .validate()
        .is_err()
    );
    assert!(
        Colorway::RadialGradient {
            stops: vec![GradientStop {
                offset: 0.5,
                color: "#ffffff".to_string(),
                opacity: Some(2.0),
            }],
        }
        .validate()
        .is_err()
    );
}

#[test]
fn layer_fields_use_manifest_naming() {
    let layer = SelectedLayer {
        category_id: "base".to_string(),
        order: 3,
        variant: variant("v1", None),
        tint: None,
        opacity: Some(0.5),
        blend: Some(LayerBlend::Multiply),
    };
    let json = serde_json::to_value(&layer).unwrap();
    assert_eq!(json["categoryId"], "base");
    assert_eq!(json["variant"]["assetCid"], "bafy-v1");
    assert_eq!(json["blendMode"], "multiply");
}

#[test]
fn optional_layer_fields_are_omitted() {
    let layer = SelectedLayer {
        category_id: "base".to_string(),
        order: 0,
        variant: variant("v1", None),
        tint: None,
        opacity: None,
        blend: None,
    };
    let json = serde_json::to_value(&layer).unwrap();
    assert!(json.get("tint").is_none());
    assert!(json.get("opacity").is_none());
    assert!(json.get("blendMode").is_none());
}

#[test]
fn manifest_validate_flags_bad_entries() {
    let good = LayersManifest {
        categories: vec![LayerCategory {
            id: "base".to_string(),
            label: "Base".to_string(),
            z_index: 0,
            max_selectable: None,
            variants: vec![variant("v1", Some(2.0))],
        }],
    };
    assert!(good.validate().is_ok());

    let mut bad = good.clone();
    bad.categories[0].variants[0].weight = Some(-1.0);
    assert!(bad.validate().is_err());

    let mut bad = good.clone();
    bad.categories[0].variants[0].asset_cid = " ".to_string();
    assert!(bad.validate().is_err());

    let mut bad = good;
    bad.categories[0].id = String::new();
    assert!(bad.validate().is_err());
}

#[test]
fn attribute_values_serialize_untagged() {
    let number = Attribute::number("Body", 60);
    let json = serde_json::to_value(&number).unwrap();
    assert_eq!(json["value"], 60.0);
    assert_eq!(json["display_type"], "number");

    let text = Attribute::new("Rarity", "Common");
    let json = serde_json::to_value(&text).unwrap();
    assert_eq!(json["value"], "Common");
    assert!(json.get("display_type").is_none());
}

#[test]
fn lineage_root_is_generation_zero() {
    let root = LineageSnapshot::root();
    assert_eq!(root.generation, 0);
    assert!(root.parents.is_empty());
}
