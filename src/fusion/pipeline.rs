use crate::{
    assets::store::AssetSource,
    foundation::error::{TeaError, TeaResult},
    fusion::helpers::{
        FusionParent, build_lineage, derive_fusion_colorway, derive_fusion_stats, extract_palette,
    },
    model::{
        metadata::{BuildMetadataInput, build_tea_metadata, to_ipfs_uri},
        schema::{Colorway, LayerAssetFormat, LayerSnapshot, SelectedLayer, TeaMetadata},
    },
    render::compositor::{RenderOptions, RenderResult, render_tea_image},
};

/// Canvas edge length for fused renders.
const FUSION_CANVAS: u32 = 1024;

#[derive(Clone, Debug, PartialEq, Eq)]
/// Receipt returned by an uploader: the CID of the pinned content.
pub struct UploadReceipt {
    pub cid: String,
}

/// Pinning backend for fusion artifacts.
pub trait IpfsUploader {
    /// Pin raw bytes under a suggested name, returning the CID.
    fn upload_bytes(&self, name: &str, content_type: &str, bytes: &[u8])
    -> TeaResult<UploadReceipt>;

    /// Pin a JSON document under a suggested name, returning the CID.
    fn upload_json(&self, name: &str, value: &serde_json::Value) -> TeaResult<UploadReceipt>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Explicit result of a mint attempt.
pub enum MintOutcome {
    /// The item was minted under this token id.
    Minted { token_id: String },
    /// The chain rejected the mint; the artifacts remain pinned.
    Rejected { reason: String },
}

/// On-chain minting backend.
///
/// Both the pinned metadata URI and the full document are provided so
/// implementations can serve URI-referencing and payload-carrying contracts
/// alike.
pub trait MintClient {
    /// Mint an item for the given metadata.
    fn mint(&self, metadata_uri: &str, metadata: &TeaMetadata) -> TeaResult<MintOutcome>;
}

#[derive(Clone, Debug)]
/// Everything a fusion needs: the parents being burned and the layer
/// selection of the child.
pub struct FusionRequest {
    /// Parents entering the fusion, in order.
    pub parents: Vec<FusionParent>,
    /// Child layer selection; gradient slots are tinted with the derived
    /// colorway before rendering.
    pub layers: Vec<SelectedLayer>,
    /// Child generation seed.
    pub seed: String,
    /// Child rank.
    pub rank: u32,
    /// Child rarity label.
    pub rarity: String,
    /// Child flavor profile label; also woven into the description.
    pub flavor_profile: String,
    /// Child infusion label.
    pub infusion: String,
    /// Total mixes in the child's history.
    pub mix_count: u32,
    /// Optional external page URL written into the metadata.
    pub external_url: Option<String>,
}

#[derive(Clone, Debug)]
/// Output of a completed fusion.
pub struct FusionResult {
    /// Child metadata document, as uploaded.
    pub metadata: TeaMetadata,
    /// CID of the rendered child image.
    pub image_cid: String,
    /// CID of the uploaded metadata document.
    pub metadata_cid: String,
    /// Mint attempt result.
    pub outcome: MintOutcome,
}

/// Snapshot a layer selection for permanent recording in metadata.
pub fn build_layer_snapshots(layers: &[SelectedLayer]) -> Vec<LayerSnapshot> {
    layers
        .iter()
        .map(|layer| LayerSnapshot {
            category_id: layer.category_id.clone(),
            variant_id: layer.variant.id.clone(),
            label: layer.variant.label.clone(),
            order: layer.order,
            asset_uri: to_ipfs_uri(&layer.variant.asset_cid),
            tint: layer.tint.clone(),
        })
        .collect()
}

/// Run a fusion end to end: derive the child traits from the parents, render
/// the child image, pin image and metadata, then attempt the mint.
///
/// Uploads are not rolled back on a rejected mint; the outcome says which.
pub fn complete_fusion(
    source: &dyn AssetSource,
    uploader: &dyn IpfsUploader,
    minter: &dyn MintClient,
    request: &FusionRequest,
) -> TeaResult<FusionResult> {
    if request.layers.is_empty() {
        return Err(TeaError::validation("no layers provided for fusion rendering"));
    }

    let palettes: Vec<Vec<String>> = request
        .parents
        .iter()
        .map(|parent| extract_palette(&parent.metadata))
        .collect();
    let empty = Vec::new();
    let palette1 = palettes.first().unwrap_or(&empty);
    let palette2 = palettes.get(1).unwrap_or(palette1);
    let colorway = derive_fusion_colorway(palette1, palette2);

    let parent_stats: Vec<_> = request
        .parents
        .iter()
        .map(|parent| parent.metadata.properties.stats)
        .collect();
    let stats = derive_fusion_stats(&parent_stats);
    let lineage = build_lineage(&request.parents);

    let mut layers = request.layers.clone();
    for layer in &mut layers {
        if layer.variant.format == LayerAssetFormat::SvgGradient {
            layer.tint = Some(colorway.clone());
        }
    }

    let mut options = RenderOptions::new(FUSION_CANVAS, FUSION_CANVAS);
    options.background = Some(Colorway::solid("#ffffff"));
    options.with_png = true;
    let RenderResult { png, .. } = render_tea_image(source, &layers, &options)?;
    let png = png.ok_or_else(|| TeaError::validation("fusion render produced no png"))?;

    tracing::info!(seed = %request.seed, parents = request.parents.len(), "uploading fusion artifacts");
    let image = uploader.upload_bytes(
        &format!("{}-fusion.png", request.seed),
        "image/png",
        &png,
    )?;

    let suffix: String = request.seed.chars().take(6).collect::<String>().to_uppercase();
    let metadata = build_tea_metadata(BuildMetadataInput {
        name: format!("Stellar Tea Fusion {suffix}"),
        description: format!(
            "A collaborative Stellar Tea fusion bursting with {} notes.",
            request.flavor_profile
        ),
        image_cid: image.cid.clone(),
        animation_cid: None,
        external_url: request.external_url.clone(),
        background_color: None,
        seed: request.seed.clone(),
        rank: request.rank,
        rarity: request.rarity.clone(),
        flavor_profile: request.flavor_profile.clone(),
        infusion: request.infusion.clone(),
        colorway,
        layers: build_layer_snapshots(&layers),
        lineage,
        stats,
        mix_count: request.mix_count,
        additional_attributes: Vec::new(),
    });

    let metadata_value = serde_json::to_value(&metadata)
        .map_err(|e| TeaError::serde(format!("serialize fusion metadata: {e}")))?;
    let pinned = uploader.upload_json(&format!("{}-fusion.json", request.seed), &metadata_value)?;

    let outcome = minter.mint(&to_ipfs_uri(&pinned.cid), &metadata)?;
    if let MintOutcome::Rejected { reason } = &outcome {
        tracing::warn!(%reason, "mint rejected");
    }

    Ok(FusionResult {
        metadata,
        image_cid: image.cid,
        metadata_cid: pinned.cid,
        outcome,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/fusion/pipeline.rs"]
mod tests;
