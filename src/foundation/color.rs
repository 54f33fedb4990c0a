use crate::foundation::error::{TeaError, TeaResult};

/// Straight-alpha RGB color with 8-bit components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// Parse a `#rrggbb` (or bare `rrggbb`) hex color.
pub fn parse_hex(color: &str) -> TeaResult<Rgb> {
    let normalized = color.strip_prefix('#').unwrap_or(color);
    if normalized.len() != 6 || !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(TeaError::validation(format!(
            "color '{color}' must be a 6-digit hex value"
        )));
    }

    let value = u32::from_str_radix(normalized, 16)
        .map_err(|e| TeaError::validation(format!("color '{color}': {e}")))?;
    Ok(Rgb {
        r: ((value >> 16) & 255) as u8,
        g: ((value >> 8) & 255) as u8,
        b: (value & 255) as u8,
    })
}

/// Format a color as lowercase `#rrggbb`.
pub fn format_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Component-wise mean of a color list, rounded and clamped per channel.
///
/// Unparsable entries are skipped; an empty (or fully unparsable) list yields
/// opaque white, the same fallback the colorway fill uses for degenerate input.
pub fn average_colors<'a>(colors: impl IntoIterator<Item = &'a str>) -> Rgb {
    let mut totals = (0u32, 0u32, 0u32);
    let mut count = 0u32;
    for color in colors {
        let Ok(rgb) = parse_hex(color) else {
            continue;
        };
        totals.0 += u32::from(rgb.r);
        totals.1 += u32::from(rgb.g);
        totals.2 += u32::from(rgb.b);
        count += 1;
    }

    if count == 0 {
        return Rgb {
            r: 255,
            g: 255,
            b: 255,
        };
    }

    let mean = |total: u32| -> u8 {
        let v = (f64::from(total) / f64::from(count)).round();
        v.clamp(0.0, 255.0) as u8
    };
    Rgb {
        r: mean(totals.0),
        g: mean(totals.1),
        b: mean(totals.2),
    }
}

/// Convert straight-alpha RGBA8 to premultiplied RGBA8 (r,g,b scaled by a).
pub fn premultiply_rgba8(r: u8, g: u8, b: u8, a: u8) -> [u8; 4] {
    fn premul(c: u8, a: u8) -> u8 {
        let c = u16::from(c);
        let a = u16::from(a);
        (((c * a) + 127) / 255) as u8
    }

    [premul(r, a), premul(g, a), premul(b, a), a]
}

/// Convert a premultiplied RGBA8 pixel back to straight alpha.
pub fn unpremultiply_rgba8(px: [u8; 4]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let unpremul = |c: u8| -> u8 {
        let v = (u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a);
        v.min(255) as u8
    };
    [unpremul(px[0]), unpremul(px[1]), unpremul(px[2]), a]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
