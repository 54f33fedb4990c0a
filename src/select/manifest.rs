use rand::Rng;

use crate::{
    assets::resolve::DEFAULT_GATEWAY,
    config::GeneratorConfig,
    foundation::error::{TeaError, TeaResult},
    model::schema::{LayerVariant, LayersManifest, SelectedLayer},
};

/// Resolve the gateway URL of a layers manifest CID.
///
/// A trailing slash on the gateway base is trimmed; the default public
/// gateway is used when no base is configured.
pub fn resolve_manifest_url(manifest_cid: &str, gateway_base_url: Option<&str>) -> String {
    let base = gateway_base_url.unwrap_or(DEFAULT_GATEWAY).trim_end_matches('/');
    format!("{base}/ipfs/{manifest_cid}")
}

/// Fetch and parse the layers manifest named by `config`.
///
/// A missing manifest CID is a [`TeaError::Config`] before any network call;
/// HTTP failures surface as [`TeaError::Fetch`] with the status attached.
pub fn fetch_layers_manifest(config: &GeneratorConfig) -> TeaResult<LayersManifest> {
    let cid = config.require_manifest_cid()?;
    let url = resolve_manifest_url(cid, config.gateway_base_url.as_deref());
    tracing::debug!(%url, "fetching layers manifest");

    let response = match ureq::get(&url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            return Err(TeaError::fetch(
                Some(code),
                format!("manifest fetch '{url}' returned {}", response.status_text()),
            ));
        }
        Err(err) => {
            return Err(TeaError::fetch(None, format!("manifest fetch '{url}': {err}")));
        }
    };

    let manifest: LayersManifest = response
        .into_json()
        .map_err(|e| TeaError::serde(format!("parse layers manifest: {e}")))?;
    manifest.validate()?;
    Ok(manifest)
}

/// Roulette-wheel selection over a variant list.
///
/// Each variant weighs 1 unless it declares a weight. A uniform threshold is
/// drawn in `[0, total)` and weights accumulate in list order; the first
/// variant whose cumulative weight reaches the threshold wins. If rounding
/// keeps the threshold from ever being crossed, the last variant wins.
pub fn weighted_pick<'a, R: Rng + ?Sized>(
    variants: &'a [LayerVariant],
    rng: &mut R,
) -> Option<&'a LayerVariant> {
    if variants.is_empty() {
        return None;
    }
    let total: f64 = variants.iter().map(|v| v.weight.unwrap_or(1.0)).sum();
    if !(total > 0.0) {
        return variants.first();
    }
    pick_at_threshold(variants, rng.gen_range(0.0..total))
}

fn pick_at_threshold(variants: &[LayerVariant], threshold: f64) -> Option<&LayerVariant> {
    let mut cumulative = 0.0;
    for variant in variants {
        cumulative += variant.weight.unwrap_or(1.0);
        if threshold <= cumulative {
            return Some(variant);
        }
    }
    variants.last()
}

/// Pick one variant per category and bind it to the category's z-order.
///
/// Categories without variants are skipped; the returned layers are ordered
/// by ascending `z_index` so they composite bottom-up.
pub fn select_from_manifest<R: Rng + ?Sized>(
    manifest: &LayersManifest,
    rng: &mut R,
) -> Vec<SelectedLayer> {
    let mut categories: Vec<_> = manifest.categories.iter().collect();
    categories.sort_by_key(|category| category.z_index);

    categories
        .into_iter()
        .filter_map(|category| {
            let variant = weighted_pick(&category.variants, rng)?;
            Some(SelectedLayer {
                category_id: category.id.clone(),
                order: category.z_index,
                variant: variant.clone(),
                tint: None,
                opacity: None,
                blend: None,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/select/manifest.rs"]
mod tests;
