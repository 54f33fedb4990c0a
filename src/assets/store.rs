use std::{
    collections::HashMap,
    io::Read,
    path::{Component, Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::{
        decode::{decode_raster, rasterize_svg},
        resolve::to_gateway_url,
    },
    foundation::error::{TeaError, TeaResult},
    model::schema::{LayerAssetFormat, SelectedLayer},
    render::surface::Surface,
};

/// Provider of raw asset bytes for a layer reference.
///
/// Implementations resolve CIDs, URLs, or root-relative paths however their
/// backing store requires; the render path never does IO itself.
pub trait AssetSource {
    /// Fetch the raw bytes behind an asset reference.
    fn fetch(&self, asset_ref: &str) -> TeaResult<Vec<u8>>;
}

/// Asset source backed by an IPFS gateway (and optionally a web origin for
/// root-relative asset paths).
#[derive(Clone, Debug, Default)]
pub struct HttpAssetSource {
    /// Gateway base URL; the default public gateway is used when unset.
    pub gateway_base_url: Option<String>,
    /// Origin prepended to root-relative references such as `/nft/...`.
    pub origin_base_url: Option<String>,
}

impl HttpAssetSource {
    fn resolve(&self, asset_ref: &str) -> TeaResult<String> {
        if let Some(rest) = asset_ref.strip_prefix('/') {
            let origin = self.origin_base_url.as_deref().ok_or_else(|| {
                TeaError::config(format!(
                    "root-relative asset '{asset_ref}' requires an origin base URL"
                ))
            })?;
            return Ok(format!("{}/{rest}", origin.trim_end_matches('/')));
        }
        Ok(to_gateway_url(asset_ref, self.gateway_base_url.as_deref()))
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch(&self, asset_ref: &str) -> TeaResult<Vec<u8>> {
        let url = self.resolve(asset_ref)?;
        let response = match ureq::get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(TeaError::fetch(
                    Some(code),
                    format!("asset fetch '{url}' returned {}", response.status_text()),
                ));
            }
            Err(err) => {
                return Err(TeaError::fetch(None, format!("asset fetch '{url}': {err}")));
            }
        };

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| TeaError::fetch(None, format!("read asset body '{url}': {e}")))?;
        Ok(bytes)
    }
}

/// Asset source reading from a local directory; root-relative references are
/// resolved against the directory root.
#[derive(Clone, Debug)]
pub struct DirAssetSource {
    root: PathBuf,
}

impl DirAssetSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Normalize a reference into a safe relative path, rejecting traversal.
fn normalize_rel_path(asset_ref: &str) -> TeaResult<PathBuf> {
    let trimmed = asset_ref.trim_start_matches('/');
    let mut rel = PathBuf::new();
    for component in Path::new(trimmed).components() {
        match component {
            Component::Normal(part) => rel.push(part),
            Component::CurDir => {}
            _ => {
                return Err(TeaError::validation(format!(
                    "asset path '{asset_ref}' escapes the asset root"
                )));
            }
        }
    }
    if rel.as_os_str().is_empty() {
        return Err(TeaError::validation("asset path must be non-empty"));
    }
    Ok(rel)
}

impl AssetSource for DirAssetSource {
    fn fetch(&self, asset_ref: &str) -> TeaResult<Vec<u8>> {
        let path = self.root.join(normalize_rel_path(asset_ref)?);
        let bytes = std::fs::read(&path)
            .with_context(|| format!("read asset file {}", path.display()))?;
        Ok(bytes)
    }
}

/// All layer assets fetched and decoded at the render size, keyed by their
/// asset reference. Built once before rendering so the compositor stays pure.
pub struct PreparedLayerStore {
    surfaces: HashMap<String, Surface>,
}

impl PreparedLayerStore {
    /// Fetch and decode every asset the selection references.
    ///
    /// Raster assets are resized to `width` x `height`; SVG assets are
    /// rasterized at that size. Duplicate references are fetched once.
    pub fn prepare(
        source: &dyn AssetSource,
        layers: &[SelectedLayer],
        width: u32,
        height: u32,
    ) -> TeaResult<Self> {
        let mut surfaces = HashMap::new();
        for layer in layers {
            let asset_ref = layer.variant.asset_cid.as_str();
            if surfaces.contains_key(asset_ref) {
                continue;
            }
            tracing::debug!(asset = asset_ref, format = ?layer.variant.format, "preparing asset");
            let bytes = source.fetch(asset_ref)?;
            let surface = match layer.variant.format {
                LayerAssetFormat::Png => decode_raster(&bytes, width, height)?,
                LayerAssetFormat::SvgMask | LayerAssetFormat::SvgGradient => {
                    rasterize_svg(&bytes, width, height)?
                }
            };
            surfaces.insert(asset_ref.to_string(), surface);
        }
        Ok(Self { surfaces })
    }

    /// Look up a prepared surface by asset reference.
    pub fn surface(&self, asset_ref: &str) -> TeaResult<&Surface> {
        self.surfaces.get(asset_ref).ok_or_else(|| {
            TeaError::validation(format!("asset '{asset_ref}' was not prepared"))
        })
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
