use crate::{
    foundation::color::premultiply_rgba8,
    foundation::error::{TeaError, TeaResult},
    render::surface::Surface,
};

/// Decode a raster image, resize it to the canvas, and premultiply.
pub fn decode_raster(bytes: &[u8], width: u32, height: u32) -> TeaResult<Surface> {
    let image = image::load_from_memory(bytes)
        .map_err(|e| TeaError::decode(format!("decode raster asset: {e}")))?;
    let image = if image.width() != width || image.height() != height {
        image.resize_exact(width, height, image::imageops::FilterType::Triangle)
    } else {
        image
    };

    let rgba = image.into_rgba8();
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for px in rgba.pixels() {
        let [r, g, b, a] = px.0;
        data.extend_from_slice(&premultiply_rgba8(r, g, b, a));
    }
    Surface::from_premul(width, height, data)
}

/// Rasterize an SVG document at the canvas size.
///
/// The document is scaled non-uniformly so its viewbox covers the full
/// canvas; the output is premultiplied, as delivered by the rasterizer.
pub fn rasterize_svg(bytes: &[u8], width: u32, height: u32) -> TeaResult<Surface> {
    let tree = usvg::Tree::from_data(bytes, &usvg::Options::default())
        .map_err(|e| TeaError::decode(format!("parse svg asset: {e}")))?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
        TeaError::validation(format!("svg raster target {width}x{height} is empty"))
    })?;

    let size = tree.size();
    let sx = width as f32 / size.width();
    let sy = height as f32 / size.height();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );

    Surface::from_premul(width, height, pixmap.take())
}
