use anyhow::Context;
use base64::Engine;
use image::ImageEncoder;

use crate::{
    assets::store::{AssetSource, PreparedLayerStore},
    foundation::error::{TeaError, TeaResult},
    model::schema::{Colorway, LayerAssetFormat, LayerBlend, SelectedLayer},
    render::{colorway::fill_colorway, surface::Surface},
};

#[derive(Clone, Debug)]
/// Canvas and output settings for a render.
pub struct RenderOptions {
    /// Logical canvas width in pixels.
    pub width: u32,
    /// Logical canvas height in pixels.
    pub height: u32,
    /// Background fill painted before any layer; transparent when unset.
    pub background: Option<Colorway>,
    /// Physical-to-logical pixel ratio; the frame is rendered at
    /// `round(dimension * pixel_ratio)`.
    pub pixel_ratio: f64,
    /// Also return the encoded PNG bytes (the data URL is always built).
    pub with_png: bool,
}

impl RenderOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: None,
            pixel_ratio: 1.0,
            with_png: false,
        }
    }
}

/// A finished render.
pub struct RenderResult {
    /// Composited frame at physical resolution, premultiplied.
    pub frame: Surface,
    /// Encoded PNG bytes, when requested.
    pub png: Option<Vec<u8>>,
    /// `data:image/png;base64,...` URL of the frame.
    pub data_url: String,
}

/// Composite a layer selection into a finished image.
///
/// Layers draw in ascending `order`; all assets are fetched and decoded up
/// front so compositing itself does no IO.
pub fn render_tea_image(
    source: &dyn AssetSource,
    layers: &[SelectedLayer],
    options: &RenderOptions,
) -> TeaResult<RenderResult> {
    if !(options.pixel_ratio.is_finite() && options.pixel_ratio > 0.0) {
        return Err(TeaError::validation(format!(
            "pixel ratio must be finite and positive, got {}",
            options.pixel_ratio
        )));
    }
    let width = (f64::from(options.width) * options.pixel_ratio).round() as u32;
    let height = (f64::from(options.height) * options.pixel_ratio).round() as u32;

    let mut ordered: Vec<&SelectedLayer> = layers.iter().collect();
    ordered.sort_by_key(|layer| layer.order);

    let store = PreparedLayerStore::prepare(source, layers, width, height)?;
    tracing::debug!(layers = ordered.len(), assets = store.len(), width, height, "compositing");

    let mut canvas = Surface::new(width, height)?;
    if let Some(background) = &options.background {
        fill_colorway(&mut canvas, background)?;
    }

    for layer in ordered {
        let asset = store.surface(&layer.variant.asset_cid)?;
        let opacity = layer.opacity.unwrap_or(1.0);
        let blend = layer.blend.unwrap_or_default();

        match (layer.variant.format, &layer.tint) {
            // Gradient slot: the SVG is only an alpha mask for the tint fill.
            (LayerAssetFormat::SvgGradient, Some(tint)) => {
                let mut fill = Surface::new(width, height)?;
                fill_colorway(&mut fill, tint)?;
                fill.mask_by(asset)?;
                canvas.draw_over(&fill, opacity, blend)?;
            }
            // Tinted mask: draw the artwork, then lay the masked fill on top.
            (LayerAssetFormat::SvgMask, Some(tint)) => {
                canvas.draw_over(asset, opacity, blend)?;
                let mut fill = Surface::new(width, height)?;
                fill_colorway(&mut fill, tint)?;
                fill.mask_by(asset)?;
                canvas.draw_over(&fill, 1.0, LayerBlend::SourceOver)?;
            }
            _ => canvas.draw_over(asset, opacity, blend)?,
        }
    }

    let png = encode_png(&canvas)?;
    let data_url = format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&png)
    );

    Ok(RenderResult {
        frame: canvas,
        png: options.with_png.then_some(png),
        data_url,
    })
}

/// Encode a surface as straight-alpha RGBA8 PNG.
pub fn encode_png(surface: &Surface) -> TeaResult<Vec<u8>> {
    let straight = surface.to_straight();
    let mut bytes = Vec::new();
    image::codecs::png::PngEncoder::new(&mut bytes)
        .write_image(
            &straight,
            surface.width(),
            surface.height(),
            image::ExtendedColorType::Rgba8,
        )
        .context("encode png")?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
