use crate::{
    foundation::color::{parse_hex, premultiply_rgba8},
    foundation::error::TeaResult,
    model::schema::{Colorway, GradientStop},
    render::surface::{Surface, over},
};

/// Paint a colorway across the whole surface (source-over).
///
/// Linear gradients run through the rectangle center along the requested
/// angle, spanning far enough to cover every pixel; radial gradients reach
/// `max(width, height) / 2` from the center.
pub fn fill_colorway(surface: &mut Surface, colorway: &Colorway) -> TeaResult<()> {
    match colorway {
        Colorway::Solid { color } => {
            let rgb = parse_hex(color)?;
            let px = premultiply_rgba8(rgb.r, rgb.g, rgb.b, 255);
            fill_uniform(surface, px);
        }
        Colorway::LinearGradient { angle_deg, stops } => {
            let ramp = Ramp::resolve(stops)?;
            let width = f64::from(surface.width());
            let height = f64::from(surface.height());
            let (cx, cy) = (width / 2.0, height / 2.0);
            let theta = angle_deg.to_radians();
            let (dir_x, dir_y) = (theta.cos(), theta.sin());
            // Half the axis span needed to cover the whole rectangle.
            let half = (dir_x.abs() * width + dir_y.abs() * height) / 2.0;

            fill_by_position(surface, |x, y| {
                let proj = (x - cx) * dir_x + (y - cy) * dir_y;
                let t = if half > 0.0 { proj / (2.0 * half) + 0.5 } else { 0.5 };
                ramp.sample(t.clamp(0.0, 1.0))
            });
        }
        Colorway::RadialGradient { stops } => {
            let ramp = Ramp::resolve(stops)?;
            let width = f64::from(surface.width());
            let height = f64::from(surface.height());
            let (cx, cy) = (width / 2.0, height / 2.0);
            let radius = width.max(height) / 2.0;

            fill_by_position(surface, |x, y| {
                let dist = ((x - cx).powi(2) + (y - cy).powi(2)).sqrt();
                let t = if radius > 0.0 { dist / radius } else { 0.0 };
                ramp.sample(t.clamp(0.0, 1.0))
            });
        }
    }
    Ok(())
}

fn fill_uniform(surface: &mut Surface, px: [u8; 4]) {
    let sa = px[3] as u32;
    for dst in surface.data_mut().chunks_exact_mut(4) {
        for c in 0..4 {
            dst[c] = over(px[c] as u32, dst[c] as u32, sa).min(255) as u8;
        }
    }
}

fn fill_by_position(surface: &mut Surface, sample: impl Fn(f64, f64) -> [u8; 4]) {
    let width = surface.width() as usize;
    for (index, dst) in surface.data_mut().chunks_exact_mut(4).enumerate() {
        let x = (index % width) as f64 + 0.5;
        let y = (index / width) as f64 + 0.5;
        let px = sample(x, y);
        let sa = px[3] as u32;
        for c in 0..4 {
            dst[c] = over(px[c] as u32, dst[c] as u32, sa).min(255) as u8;
        }
    }
}

struct ResolvedStop {
    offset: f64,
    // Straight-alpha channels: rgb in 0..=255, alpha in 0..=1.
    r: f64,
    g: f64,
    b: f64,
    a: f64,
}

/// Gradient stops resolved to sampleable straight-alpha colors.
struct Ramp {
    stops: Vec<ResolvedStop>,
}

impl Ramp {
    fn resolve(stops: &[GradientStop]) -> TeaResult<Self> {
        let mut resolved = Vec::with_capacity(stops.len());
        for stop in stops {
            let rgb = parse_hex(&stop.color)?;
            resolved.push(ResolvedStop {
                offset: stop.offset,
                r: f64::from(rgb.r),
                g: f64::from(rgb.g),
                b: f64::from(rgb.b),
                a: stop.opacity.unwrap_or(1.0).clamp(0.0, 1.0),
            });
        }
        Ok(Self { stops: resolved })
    }

    /// Sample at `t` in `[0, 1]`. Colors interpolate in straight alpha and
    /// premultiply at the end; an empty ramp samples opaque white.
    fn sample(&self, t: f64) -> [u8; 4] {
        let Some(first) = self.stops.first() else {
            return [255, 255, 255, 255];
        };
        let last = self.stops.last().unwrap_or(first);

        let (r, g, b, a) = if t <= first.offset {
            (first.r, first.g, first.b, first.a)
        } else if t >= last.offset {
            (last.r, last.g, last.b, last.a)
        } else {
            let mut sampled = (last.r, last.g, last.b, last.a);
            for pair in self.stops.windows(2) {
                let (lo, hi) = (&pair[0], &pair[1]);
                if t <= hi.offset {
                    let span = hi.offset - lo.offset;
                    let f = if span > 0.0 { (t - lo.offset) / span } else { 0.0 };
                    sampled = (
                        lo.r + (hi.r - lo.r) * f,
                        lo.g + (hi.g - lo.g) * f,
                        lo.b + (hi.b - lo.b) * f,
                        lo.a + (hi.a - lo.a) * f,
                    );
                    break;
                }
            }
            sampled
        };

        let alpha = (a * 255.0).round().clamp(0.0, 255.0) as u8;
        premultiply_rgba8(
            r.round().clamp(0.0, 255.0) as u8,
            g.round().clamp(0.0, 255.0) as u8,
            b.round().clamp(0.0, 255.0) as u8,
            alpha,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/colorway.rs"]
mod tests;
