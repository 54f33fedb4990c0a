use std::collections::BTreeMap;

use crate::foundation::{
    color::parse_hex,
    error::{TeaError, TeaResult},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// File format of a layer asset, which determines how it is drawn.
pub enum LayerAssetFormat {
    /// Raster image drawn as-is.
    Png,
    /// SVG whose alpha channel can additionally be filled with a tint on top of the raster.
    SvgMask,
    /// SVG used purely as an alpha mask for a colorway fill.
    SvgGradient,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One selectable asset within a layer category. Immutable once defined by the manifest.
pub struct LayerVariant {
    /// Unique identifier of the variant within its category.
    pub id: String,
    /// Human-readable name (e.g. "Strawberry pearls").
    pub label: String,
    /// CID, absolute URL, or root-relative path of the source asset.
    #[serde(rename = "assetCid")]
    pub asset_cid: String,
    /// File format, determines the draw path.
    pub format: LayerAssetFormat,
    /// Extra flat trait data (rarity, tags, recipe links) kept serializable as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traits: Option<BTreeMap<String, serde_json::Value>>,
    /// Selection weight for randomization; treated as 1 when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A named compositing slot holding interchangeable variants.
pub struct LayerCategory {
    /// Category identifier, e.g. "base", "topping", "straw".
    pub id: String,
    /// Display title.
    pub label: String,
    /// Compositing order; lower values draw below higher ones.
    #[serde(rename = "zIndex")]
    pub z_index: i32,
    /// Optional cap on simultaneously selected variants.
    #[serde(rename = "maxSelectable", default, skip_serializing_if = "Option::is_none")]
    pub max_selectable: Option<u32>,
    /// Available variants.
    pub variants: Vec<LayerVariant>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Remotely-hosted document describing all available layer categories/variants.
pub struct LayersManifest {
    /// All categories in manifest order.
    pub categories: Vec<LayerCategory>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single gradient color stop.
pub struct GradientStop {
    /// Position along the gradient axis, in `[0, 1]`.
    pub offset: f64,
    /// Stop color in hex.
    pub color: String,
    /// Optional stop opacity in `[0, 1]`; opaque when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
/// Tagged description of a fill applied to a layer or background.
pub enum Colorway {
    /// Flat color fill.
    Solid {
        /// Fill color in hex.
        color: String,
    },
    /// Linear gradient through the rectangle center.
    LinearGradient {
        /// Axis rotation in degrees; 0° is horizontal.
        #[serde(rename = "angleDeg")]
        angle_deg: f64,
        /// Ordered color stops; offsets are assumed non-decreasing.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient centered on the rectangle midpoint.
    RadialGradient {
        /// Ordered color stops; offsets are assumed non-decreasing.
        stops: Vec<GradientStop>,
    },
}

impl Colorway {
    /// Build a solid colorway.
    pub fn solid(color: impl Into<String>) -> Self {
        Self::Solid {
            color: color.into(),
        }
    }

    /// Validate structural invariants: parseable colors, non-empty gradient
    /// stops, stop offsets and opacities within range.
    pub fn validate(&self) -> TeaResult<()> {
        match self {
            Self::Solid { color } => {
                parse_hex(color)?;
            }
            Self::LinearGradient { angle_deg, stops } => {
                if !angle_deg.is_finite() {
                    return Err(TeaError::validation("gradient angleDeg must be finite"));
                }
                validate_stops(stops)?;
            }
            Self::RadialGradient { stops } => validate_stops(stops)?,
        }
        Ok(())
    }
}

fn validate_stops(stops: &[GradientStop]) -> TeaResult<()> {
    if stops.is_empty() {
        return Err(TeaError::validation("gradient stops must be non-empty"));
    }
    for stop in stops {
        if !stop.offset.is_finite() || !(0.0..=1.0).contains(&stop.offset) {
            return Err(TeaError::validation("gradient stop offset must be in [0, 1]"));
        }
        parse_hex(&stop.color)?;
        if let Some(opacity) = stop.opacity
            && (!opacity.is_finite() || !(0.0..=1.0).contains(&opacity))
        {
            return Err(TeaError::validation(
                "gradient stop opacity must be in [0, 1] when set",
            ));
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
/// Blend mode used when compositing a layer onto the canvas.
pub enum LayerBlend {
    /// Standard "source over destination" (premultiplied alpha).
    #[default]
    SourceOver,
    /// Multiply blend.
    Multiply,
    /// Screen blend.
    Screen,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A variant bound to a render order plus optional tint/opacity/blend overrides.
pub struct SelectedLayer {
    /// Owning category identifier.
    #[serde(rename = "categoryId")]
    pub category_id: String,
    /// Compositing order; layers draw in ascending order.
    pub order: i32,
    /// Chosen variant.
    pub variant: LayerVariant,
    /// Colorway applied to mask/gradient formats; ignored for plain rasters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<Colorway>,
    /// Layer opacity in `[0, 1]`; opaque when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Blend mode; source-over when unset.
    #[serde(rename = "blendMode", default, skip_serializing_if = "Option::is_none")]
    pub blend: Option<LayerBlend>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Serialized form of a [`SelectedLayer`], recorded permanently in metadata.
pub struct LayerSnapshot {
    /// Owning category identifier.
    pub category_id: String,
    /// Chosen variant identifier.
    pub variant_id: String,
    /// Variant display label.
    pub label: String,
    /// Compositing order.
    pub order: i32,
    /// Resolved `ipfs://` asset URI.
    pub asset_uri: String,
    /// Applied colorway, when the layer allows customization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tint: Option<Colorway>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// One parent's contribution to a fused item.
pub struct BlendComponentSnapshot {
    /// Parent token identifier, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
    /// Parent image CID for off-chain verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_cid: Option<String>,
    /// Percentage contribution (0-100) of this parent.
    pub contribution: f64,
    /// Parent color palette for later visualization.
    pub palette: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Generational ancestry record. A fresh (non-fusion) item has generation 0
/// and no parents; a fusion child's generation is 1 + max parent generation.
pub struct LineageSnapshot {
    /// Generation counter, `>= 0`.
    pub generation: u32,
    /// One component per parent.
    pub parents: Vec<BlendComponentSnapshot>,
}

impl LineageSnapshot {
    /// Lineage for a freshly generated item.
    pub fn root() -> Self {
        Self {
            generation: 0,
            parents: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Flavor stat block; components are conventionally in `[0, 100]`.
pub struct FlavorStats {
    /// Body stat.
    pub body: i32,
    /// Caffeine stat.
    pub caffeine: i32,
    /// Sweetness stat.
    pub sweetness: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Marketplace display hint for numeric attributes.
pub enum DisplayType {
    /// Plain number.
    Number,
    /// Percentage boost.
    BoostPercentage,
    /// Numeric boost.
    BoostNumber,
    /// Unix-date value.
    Date,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
/// Attribute value: either numeric or free text.
pub enum AttributeValue {
    /// Numeric value.
    Number(f64),
    /// Text value.
    Text(String),
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A single `trait_type`/`value` attribute entry.
pub struct Attribute {
    /// Trait name.
    pub trait_type: String,
    /// Trait value.
    pub value: AttributeValue,
    /// Optional marketplace display hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<DisplayType>,
}

impl Attribute {
    /// Plain attribute without a display hint.
    pub fn new(trait_type: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type: None,
        }
    }

    /// Numeric attribute rendered with the `number` display hint.
    pub fn number(trait_type: impl Into<String>, value: i32) -> Self {
        Self {
            trait_type: trait_type.into(),
            value: value.into(),
            display_type: Some(DisplayType::Number),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
/// Structured generative properties nested inside [`TeaMetadata`].
pub struct TeaMetadataProperties {
    /// Metadata schema version.
    pub version: String,
    /// Generation seed.
    pub seed: String,
    /// Item rank.
    pub rank: u32,
    /// Rarity label.
    pub rarity: String,
    /// Flavor profile label.
    pub flavor_profile: String,
    /// Infusion label.
    pub infusion: String,
    /// Applied colorway.
    pub colorway: Colorway,
    /// Layer snapshots in compositing order.
    pub layers: Vec<LayerSnapshot>,
    /// Ancestry record.
    pub lineage: LineageSnapshot,
    /// Flavor stat block.
    pub stats: FlavorStats,
    /// Total number of mixes in this item's history.
    pub mix_count: u32,
    /// Generation timestamp in ISO-8601.
    pub generated_at: String,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// The externally-serialized NFT metadata document. Created once per
/// mint/fusion event and never mutated after upload.
pub struct TeaMetadata {
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Image URI (`ipfs://…`).
    pub image: String,
    /// Optional external page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    /// Optional animation URI (`ipfs://…`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation_url: Option<String>,
    /// Optional background color hex (no `#`, per marketplace convention).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    /// Flat attribute list; nine baseline entries first, extras after.
    pub attributes: Vec<Attribute>,
    /// Structured generative properties.
    pub properties: TeaMetadataProperties,
}

impl LayersManifest {
    /// Validate manifest invariants: non-empty category/variant identity
    /// fields and finite, non-negative selection weights.
    pub fn validate(&self) -> TeaResult<()> {
        for category in &self.categories {
            if category.id.trim().is_empty() {
                return Err(TeaError::validation("category id must be non-empty"));
            }
            for variant in &category.variants {
                if variant.id.trim().is_empty() {
                    return Err(TeaError::validation(format!(
                        "variant in category '{}' has empty id",
                        category.id
                    )));
                }
                if variant.asset_cid.trim().is_empty() {
                    return Err(TeaError::validation(format!(
                        "variant '{}' must reference an asset",
                        variant.id
                    )));
                }
                if let Some(weight) = variant.weight
                    && (!weight.is_finite() || weight < 0.0)
                {
                    return Err(TeaError::validation(format!(
                        "variant '{}' weight must be finite and >= 0",
                        variant.id
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/schema.rs"]
mod tests;
