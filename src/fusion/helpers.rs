use crate::{
    foundation::color::{average_colors, format_hex},
    model::schema::{
        BlendComponentSnapshot, Colorway, FlavorStats, GradientStop, LineageSnapshot, TeaMetadata,
    },
};

/// Gradient axis angle for fused two-parent colorways.
pub const FUSION_GRADIENT_ANGLE_DEG: f64 = 120.0;

/// Contribution assumed for a parent that does not declare one.
pub const DEFAULT_CONTRIBUTION: f64 = 50.0;

const FALLBACK_COLOR: &str = "#ffffff";

#[derive(Clone, Debug)]
/// One parent entering a fusion.
pub struct FusionParent {
    /// Parent token identifier, when known.
    pub token_id: Option<String>,
    /// Parent image CID, when known.
    pub image_cid: Option<String>,
    /// The parent's metadata document.
    pub metadata: TeaMetadata,
    /// Percentage share (0-100) recorded as the contribution; defaults to 50.
    pub weight: Option<f64>,
}

/// Collect the colors of a metadata document's colorway.
pub fn extract_palette(metadata: &TeaMetadata) -> Vec<String> {
    match &metadata.properties.colorway {
        Colorway::Solid { color } => vec![color.clone()],
        Colorway::LinearGradient { stops, .. } | Colorway::RadialGradient { stops } => {
            stops.iter().map(|stop| stop.color.clone()).collect()
        }
    }
}

/// Derive the child colorway from two parent palettes.
///
/// The axis runs from the first color of the first palette to the last color
/// of the second (falling back to the first palette, then white). Matching
/// endpoints collapse to a solid average of both palettes; otherwise the
/// result is a two-stop linear gradient at 120°.
pub fn derive_fusion_colorway(palette1: &[String], palette2: &[String]) -> Colorway {
    let start = palette1.first().map(String::as_str).unwrap_or(FALLBACK_COLOR);
    let end = palette2
        .last()
        .or_else(|| palette1.last())
        .map(String::as_str)
        .unwrap_or(FALLBACK_COLOR);

    if start.eq_ignore_ascii_case(end) {
        let averaged = average_colors(palette1.iter().chain(palette2).map(String::as_str));
        return Colorway::solid(format_hex(averaged));
    }

    Colorway::LinearGradient {
        angle_deg: FUSION_GRADIENT_ANGLE_DEG,
        stops: vec![
            GradientStop {
                offset: 0.0,
                color: start.to_string(),
                opacity: None,
            },
            GradientStop {
                offset: 1.0,
                color: end.to_string(),
                opacity: None,
            },
        ],
    }
}

/// Average the parents' stat blocks, rounding each component to the nearest
/// integer. No parents yields the neutral 50/50/50 block.
pub fn derive_fusion_stats(parents: &[FlavorStats]) -> FlavorStats {
    if parents.is_empty() {
        return FlavorStats {
            body: 50,
            caffeine: 50,
            sweetness: 50,
        };
    }
    let n = parents.len() as f64;
    let mean = |pick: fn(&FlavorStats) -> i32| {
        (parents.iter().map(|stats| f64::from(pick(stats))).sum::<f64>() / n).round() as i32
    };
    FlavorStats {
        body: mean(|s| s.body),
        caffeine: mean(|s| s.caffeine),
        sweetness: mean(|s| s.sweetness),
    }
}

/// Build the child's ancestry record: generation is one past the oldest
/// parent, and each parent contributes its palette for later visualization.
pub fn build_lineage(parents: &[FusionParent]) -> LineageSnapshot {
    let generation = 1 + parents
        .iter()
        .map(|parent| parent.metadata.properties.lineage.generation)
        .max()
        .unwrap_or(0);

    LineageSnapshot {
        generation,
        parents: parents
            .iter()
            .map(|parent| BlendComponentSnapshot {
                token_id: parent.token_id.clone(),
                image_cid: parent.image_cid.clone(),
                contribution: parent.weight.unwrap_or(DEFAULT_CONTRIBUTION),
                palette: extract_palette(&parent.metadata),
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fusion/helpers.rs"]
mod tests;
