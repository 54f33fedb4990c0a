use crate::{
    foundation::color::unpremultiply_rgba8,
    foundation::error::{TeaError, TeaResult},
    model::schema::LayerBlend,
};

/// Rounding multiply of two `0..=255` channel values.
#[inline]
pub(crate) fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

/// Porter-Duff source-over for one premultiplied channel.
#[inline]
pub(crate) fn over(src: u32, dst: u32, src_alpha: u32) -> u32 {
    src + mul_div255(dst, 255 - src_alpha)
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A fixed-size raster of premultiplied RGBA8 pixels.
///
/// Every pixel that enters or leaves compositing is premultiplied; callers
/// unpremultiply only at the encode boundary via [`Surface::to_straight`].
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface. Zero dimensions are rejected.
    pub fn new(width: u32, height: u32) -> TeaResult<Self> {
        if width == 0 || height == 0 {
            return Err(TeaError::validation(format!(
                "surface dimensions must be non-zero, got {width}x{height}"
            )));
        }
        Ok(Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        })
    }

    /// Wrap an existing premultiplied RGBA8 buffer.
    pub fn from_premul(width: u32, height: u32, data: Vec<u8>) -> TeaResult<Self> {
        if width == 0 || height == 0 {
            return Err(TeaError::validation(format!(
                "surface dimensions must be non-zero, got {width}x{height}"
            )));
        }
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(TeaError::validation(format!(
                "surface buffer length {} does not match {width}x{height} (expected {expected})",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied RGBA8 pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    fn check_same_size(&self, other: &Surface, what: &str) -> TeaResult<()> {
        if self.width != other.width || self.height != other.height {
            return Err(TeaError::validation(format!(
                "{what} size {}x{} does not match target {}x{}",
                other.width, other.height, self.width, self.height
            )));
        }
        Ok(())
    }

    /// Composite `src` onto this surface with a global opacity and blend mode.
    pub fn draw_over(&mut self, src: &Surface, opacity: f64, blend: LayerBlend) -> TeaResult<()> {
        self.check_same_size(src, "source layer")?;
        let opacity = (opacity.clamp(0.0, 1.0) * 255.0).round() as u32;
        if opacity == 0 {
            return Ok(());
        }

        for (dst_px, src_px) in self.data.chunks_exact_mut(4).zip(src.data.chunks_exact(4)) {
            let sr = mul_div255(src_px[0] as u32, opacity);
            let sg = mul_div255(src_px[1] as u32, opacity);
            let sb = mul_div255(src_px[2] as u32, opacity);
            let sa = mul_div255(src_px[3] as u32, opacity);
            let [dr, dg, db, da] =
                [dst_px[0] as u32, dst_px[1] as u32, dst_px[2] as u32, dst_px[3] as u32];

            let (or, og, ob) = match blend {
                LayerBlend::SourceOver => (over(sr, dr, sa), over(sg, dg, sa), over(sb, db, sa)),
                LayerBlend::Multiply => (
                    multiply_channel(sr, dr, sa, da),
                    multiply_channel(sg, dg, sa, da),
                    multiply_channel(sb, db, sa, da),
                ),
                LayerBlend::Screen => (
                    screen_channel(sr, dr),
                    screen_channel(sg, dg),
                    screen_channel(sb, db),
                ),
            };
            let oa = over(sa, da, sa);

            dst_px[0] = or.min(255) as u8;
            dst_px[1] = og.min(255) as u8;
            dst_px[2] = ob.min(255) as u8;
            dst_px[3] = oa.min(255) as u8;
        }
        Ok(())
    }

    /// Keep only the pixels covered by `mask`, scaling every channel of this
    /// surface by the mask's alpha (Porter-Duff destination-in).
    pub fn mask_by(&mut self, mask: &Surface) -> TeaResult<()> {
        self.check_same_size(mask, "mask")?;
        for (dst_px, mask_px) in self.data.chunks_exact_mut(4).zip(mask.data.chunks_exact(4)) {
            let ma = mask_px[3] as u32;
            for channel in dst_px {
                *channel = mul_div255(*channel as u32, ma) as u8;
            }
        }
        Ok(())
    }

    /// Copy out as straight (unpremultiplied) RGBA8 for encoding.
    pub fn to_straight(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply_rgba8([px[0], px[1], px[2], px[3]]));
        }
        out
    }
}

/// Premultiplied multiply blend for one channel.
#[inline]
fn multiply_channel(src: u32, dst: u32, src_alpha: u32, dst_alpha: u32) -> u32 {
    mul_div255(src, dst) + mul_div255(src, 255 - dst_alpha) + mul_div255(dst, 255 - src_alpha)
}

/// Premultiplied screen blend for one channel.
#[inline]
fn screen_channel(src: u32, dst: u32) -> u32 {
    src + dst - mul_div255(src, dst)
}
