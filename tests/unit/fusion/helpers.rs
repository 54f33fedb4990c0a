use super::*;

use crate::model::schema::{Attribute, TeaMetadataProperties};

fn metadata_with(colorway: Colorway, stats: FlavorStats, generation: u32) -> TeaMetadata {
    TeaMetadata {
        name: "Parent".to_string(),
        description: "A parent tea.".to_string(),
        image: "ipfs://bafyparent".to_string(),
        external_url: None,
        animation_url: None,
        background_color: None,
        attributes: vec![Attribute::new("Rarity", "Common")],
        properties: TeaMetadataProperties {
            version: "1.0.0".to_string(),
            seed: "seed".to_string(),
            rank: 1,
            rarity: "Common".to_string(),
            flavor_profile: "Matcha".to_string(),
            infusion: "Matcha Infusion".to_string(),
            colorway,
            layers: Vec::new(),
            lineage: LineageSnapshot {
                generation,
                parents: Vec::new(),
            },
            stats,
            mix_count: 0,
            generated_at: "2025-06-01T00:00:00.000Z".to_string(),
        },
    }
}

fn parent(colorway: Colorway, stats: FlavorStats, generation: u32) -> FusionParent {
    FusionParent {
        token_id: Some("42".to_string()),
        image_cid: Some("bafyparent".to_string()),
        metadata: metadata_with(colorway, stats, generation),
        weight: None,
    }
}

fn stats(body: i32, caffeine: i32, sweetness: i32) -> FlavorStats {
    FlavorStats {
        body,
        caffeine,
        sweetness,
    }
}

#[test]
fn palette_of_a_solid_is_its_color() {
    let metadata = metadata_with(Colorway::solid("#34d399"), stats(50, 50, 50), 0);
    assert_eq!(extract_palette(&metadata), ["#34d399"]);
}

#[test]
fn palette_of_a_gradient_is_its_stops() {
    let colorway = Colorway::LinearGradient {
        angle_deg: 225.0,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: "#ff0000".to_string(),
                opacity: None,
            },
            GradientStop {
                offset: 1.0,
                color: "#0000ff".to_string(),
                opacity: None,
            },
        ],
    };
    let metadata = metadata_with(colorway, stats(50, 50, 50), 0);
    assert_eq!(extract_palette(&metadata), ["#ff0000", "#0000ff"]);
}

#[test]
fn distinct_endpoints_make_a_two_stop_gradient() {
    let colorway = derive_fusion_colorway(
        &["#ff0000".to_string()],
        &["#00ff00".to_string(), "#0000ff".to_string()],
    );
    let Colorway::LinearGradient { angle_deg, stops } = colorway else {
        panic!("expected gradient");
    };
    assert_eq!(angle_deg, FUSION_GRADIENT_ANGLE_DEG);
    assert_eq!(stops.len(), 2);
    assert_eq!((stops[0].offset, stops[0].color.as_str()), (0.0, "#ff0000"));
    assert_eq!((stops[1].offset, stops[1].color.as_str()), (1.0, "#0000ff"));
}

#[test]
fn matching_endpoints_collapse_to_a_solid_average() {
    // case-insensitive endpoint comparison
    let colorway =
        derive_fusion_colorway(&["#34d399".to_string()], &["#34D399".to_string()]);
    let Colorway::Solid { color } = colorway else {
        panic!("expected solid");
    };
    assert_eq!(color, "#34d399");
}

#[test]
fn solid_average_spans_both_palettes() {
    let palette1 = vec!["#000000".to_string(), "#888888".to_string()];
    let palette2 = vec!["#ffffff".to_string(), "#000000".to_string()];
    // endpoints "#000000" and "#000000" match, so all four colors average
    let Colorway::Solid { color } = derive_fusion_colorway(&palette1, &palette2) else {
        panic!("expected solid");
    };
    // (0 + 136 + 255 + 0) / 4 = 97.75 -> 98 = 0x62
    assert_eq!(color, "#626262");
}

#[test]
fn missing_palettes_fall_back_to_white() {
    let Colorway::Solid { color } = derive_fusion_colorway(&[], &[]) else {
        panic!("expected solid");
    };
    assert_eq!(color, "#ffffff");
}

#[test]
fn second_palette_falls_back_to_the_first() {
    let colorway = derive_fusion_colorway(
        &["#ff0000".to_string(), "#0000ff".to_string()],
        &[],
    );
    let Colorway::LinearGradient { stops, .. } = colorway else {
        panic!("expected gradient");
    };
    assert_eq!(stops[1].color, "#0000ff");
}

#[test]
fn stats_average_componentwise_with_rounding() {
    let fused = derive_fusion_stats(&[stats(40, 20, 80), stats(60, 80, 40)]);
    assert_eq!(fused, stats(50, 50, 60));

    // .5 rounds away from zero
    let fused = derive_fusion_stats(&[stats(1, 1, 1), stats(2, 2, 2)]);
    assert_eq!(fused, stats(2, 2, 2));
}

#[test]
fn no_parents_yield_neutral_stats() {
    assert_eq!(derive_fusion_stats(&[]), stats(50, 50, 50));
}

#[test]
fn lineage_advances_past_the_oldest_parent() {
    let lineage = build_lineage(&[
        parent(Colorway::solid("#ff0000"), stats(50, 50, 50), 2),
        parent(Colorway::solid("#0000ff"), stats(50, 50, 50), 0),
    ]);
    assert_eq!(lineage.generation, 3);
    assert_eq!(lineage.parents.len(), 2);
    assert_eq!(lineage.parents[0].contribution, DEFAULT_CONTRIBUTION);
    assert_eq!(lineage.parents[0].palette, ["#ff0000"]);
    assert_eq!(lineage.parents[1].palette, ["#0000ff"]);
    assert_eq!(lineage.parents[0].token_id.as_deref(), Some("42"));
}

#[test]
fn explicit_contribution_is_kept() {
    let mut p = parent(Colorway::solid("#ff0000"), stats(50, 50, 50), 0);
    p.weight = Some(70.0);
    let lineage = build_lineage(&[p]);
    assert_eq!(lineage.parents[0].contribution, 70.0);
}
