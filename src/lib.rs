//! teaforge: a generative tea-NFT client engine.
//!
//! The crate turns a layer selection into a finished collectible: it picks
//! weighted variants from a remote layers manifest (or the bundled local
//! assets), composites them on a CPU raster canvas with colorway fills and
//! SVG alpha masks, derives fused traits from parent metadata, and emits
//! marketplace-ready metadata documents.
//!
//! Pipeline shape:
//!
//! 1. **select** — choose one variant per category ([`select::manifest`]) or
//!    build the fixed local stack ([`select::local`]).
//! 2. **assets** — fetch and decode every referenced asset up front
//!    ([`assets::store::PreparedLayerStore`]); rendering does no IO.
//! 3. **render** — composite premultiplied layers bottom-up
//!    ([`render::compositor::render_tea_image`]).
//! 4. **fusion / metadata** — derive child traits from parents
//!    ([`fusion::helpers`]) and assemble the immutable document
//!    ([`model::metadata::build_tea_metadata`]).

#![forbid(unsafe_code)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod fusion;
pub mod model;
pub mod render;
pub mod select;

pub use assets::{
    resolve::{DEFAULT_GATEWAY, to_gateway_url},
    store::{AssetSource, DirAssetSource, HttpAssetSource, PreparedLayerStore},
};
pub use config::GeneratorConfig;
pub use foundation::error::{TeaError, TeaResult};
pub use fusion::{
    helpers::{
        FusionParent, build_lineage, derive_fusion_colorway, derive_fusion_stats, extract_palette,
    },
    pipeline::{
        FusionRequest, FusionResult, IpfsUploader, MintClient, MintOutcome, UploadReceipt,
        complete_fusion,
    },
};
pub use model::{
    metadata::{BuildMetadataInput, build_tea_metadata, build_tea_metadata_at, to_ipfs_uri},
    schema::{
        Attribute, Colorway, FlavorStats, LayerAssetFormat, LayerBlend, LayerSnapshot,
        LayerVariant, LayersManifest, LineageSnapshot, SelectedLayer, TeaMetadata,
    },
};
pub use render::{
    compositor::{RenderOptions, RenderResult, render_tea_image},
    surface::Surface,
};
pub use select::{
    local::{LocalGenOptions, LocalGeneration, generate_local_layers},
    manifest::{fetch_layers_manifest, select_from_manifest, weighted_pick},
};
