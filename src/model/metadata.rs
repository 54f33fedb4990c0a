use chrono::{DateTime, SecondsFormat, Utc};

use crate::{
    model::schema::{
        Attribute, Colorway, FlavorStats, LayerSnapshot, LineageSnapshot, TeaMetadata,
        TeaMetadataProperties,
    },
    select::flavors::FlavorSwatch,
};

/// Version stamp written into every metadata document.
pub const METADATA_VERSION: &str = "1.0.0";

const IPFS_PREFIX: &str = "ipfs://";

/// Prefix a raw content identifier with the `ipfs://` scheme.
///
/// Idempotent: an already-prefixed URI passes through unchanged.
pub fn to_ipfs_uri(cid_or_uri: &str) -> String {
    if cid_or_uri.starts_with(IPFS_PREFIX) {
        cid_or_uri.to_string()
    } else {
        format!("{IPFS_PREFIX}{cid_or_uri}")
    }
}

#[derive(Clone, Debug)]
/// Everything needed to assemble a [`TeaMetadata`] document.
pub struct BuildMetadataInput {
    /// Item name.
    pub name: String,
    /// Item description.
    pub description: String,
    /// Raw image content id (prefixed with `ipfs://` at build time).
    pub image_cid: String,
    /// Optional animation content id.
    pub animation_cid: Option<String>,
    /// Optional external page URL.
    pub external_url: Option<String>,
    /// Optional background color hex.
    pub background_color: Option<String>,
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
    /// Total mixes in this item's history.
    pub mix_count: u32,
    /// Extra attributes appended after the nine baseline entries.
    pub additional_attributes: Vec<Attribute>,
}

/// The nine baseline attributes, in their fixed order.
fn baseline_attributes(input: &BuildMetadataInput) -> Vec<Attribute> {
    vec![
        Attribute::new("Rank", input.rank),
        Attribute::new("Rarity", input.rarity.clone()),
        Attribute::new("Flavor Profile", input.flavor_profile.clone()),
        Attribute::new("Infusion", input.infusion.clone()),
        Attribute::new("Generations", input.lineage.generation),
        Attribute::new("Mix Count", input.mix_count),
        Attribute::number("Body", input.stats.body),
        Attribute::number("Caffeine", input.stats.caffeine),
        Attribute::number("Sweetness", input.stats.sweetness),
    ]
}

/// Assemble a metadata document, stamping `generatedAt` with the current time.
pub fn build_tea_metadata(input: BuildMetadataInput) -> TeaMetadata {
    build_tea_metadata_at(input, Utc::now())
}

/// Assemble a metadata document with an explicit clock.
///
/// Deterministic: two calls with identical inputs and the same `generated_at`
/// produce identical documents.
pub fn build_tea_metadata_at(input: BuildMetadataInput, generated_at: DateTime<Utc>) -> TeaMetadata {
    let mut attributes = baseline_attributes(&input);
    attributes.extend(input.additional_attributes);

    TeaMetadata {
        name: input.name,
        description: input.description,
        image: to_ipfs_uri(&input.image_cid),
        external_url: input.external_url,
        animation_url: input.animation_cid.as_deref().map(to_ipfs_uri),
        background_color: input.background_color,
        attributes,
        properties: TeaMetadataProperties {
            version: METADATA_VERSION.to_string(),
            seed: input.seed,
            rank: input.rank,
            rarity: input.rarity,
            flavor_profile: input.flavor_profile,
            infusion: input.infusion,
            colorway: input.colorway,
            layers: input.layers,
            lineage: input.lineage,
            stats: input.stats,
            mix_count: input.mix_count,
            generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        },
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Naming/description template derived from a flavor swatch and seed.
pub struct FlavorTemplate {
    /// Source swatch.
    pub swatch: &'static FlavorSwatch,
    /// Item display name.
    pub name: String,
    /// Infusion label.
    pub infusion: String,
    /// Flavor profile label.
    pub flavor_profile: String,
    /// Rarity label.
    pub rarity: String,
    /// Item description.
    pub description: String,
}

/// Build display naming for a swatch, using the first six seed characters
/// (uppercased) as the item suffix.
pub fn build_flavor_template(
    swatch: &'static FlavorSwatch,
    seed: &str,
    rarity: impl Into<String>,
) -> FlavorTemplate {
    let suffix: String = seed.chars().take(6).collect::<String>().to_uppercase();
    FlavorTemplate {
        swatch,
        name: format!("{} Brew #{suffix}", swatch.name),
        infusion: format!("{} Infusion", swatch.name),
        flavor_profile: swatch.name.to_string(),
        rarity: rarity.into(),
        description: format!(
            "A {} Crafted for the Stellar Tea collection.",
            swatch.description.to_lowercase()
        ),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/metadata.rs"]
mod tests;
