use rand::Rng;

use crate::{
    model::schema::{Colorway, GradientStop, LayerAssetFormat, LayerVariant, SelectedLayer},
    select::flavors::{FlavorSwatch, pick_random_flavor},
};

/// Root path of the bundled generator assets.
const BASE_PATH: &str = "/nft/generate";

/// Gradient axis angle for locally generated two-flavor colorways.
const LOCAL_GRADIENT_ANGLE_DEG: f64 = 225.0;

#[derive(Clone, Copy, Debug, Default)]
/// Options for local (manifest-less) generation.
pub struct LocalGenOptions {
    /// Always emit a solid colorway instead of rolling for a gradient.
    pub force_solid: bool,
}

#[derive(Clone, Debug)]
/// Output of local generation: a full layer stack plus the rolled colorway
/// and the flavor pair behind it.
pub struct LocalGeneration {
    /// Five selected layers with orders 0..=4.
    pub layers: Vec<SelectedLayer>,
    /// Rolled colorway (also applied as the gradient-fill layer tint).
    pub colorway: Colorway,
    /// Primary and secondary flavor; both slots hold the primary for solids.
    pub flavors: (&'static FlavorSwatch, &'static FlavorSwatch),
}

fn pad4(value: u32) -> String {
    format!("{value:04}")
}

/// Re-roll up to 5 times for a secondary flavor distinct from `primary`;
/// a duplicate is accepted after that.
fn pick_second_flavor<R: Rng + ?Sized>(
    rng: &mut R,
    primary: &'static FlavorSwatch,
) -> &'static FlavorSwatch {
    let mut candidate = pick_random_flavor(rng);
    let mut attempts = 0;
    while candidate.id == primary.id && attempts < 5 {
        candidate = pick_random_flavor(rng);
        attempts += 1;
    }
    candidate
}

/// Roll a colorway from the flavor palette: gradient with probability 0.6
/// (unless forced solid), linear at 225° with stops at offsets 0 and 1.
fn create_colorway<R: Rng + ?Sized>(
    rng: &mut R,
    force_solid: bool,
) -> (Colorway, (&'static FlavorSwatch, &'static FlavorSwatch)) {
    let primary = pick_random_flavor(rng);
    let secondary = if force_solid {
        primary
    } else {
        pick_second_flavor(rng, primary)
    };
    let use_gradient = !force_solid && rng.gen_range(0.0..1.0) > 0.4;

    if !use_gradient {
        return (Colorway::solid(primary.hex), (primary, primary));
    }

    (
        Colorway::LinearGradient {
            angle_deg: LOCAL_GRADIENT_ANGLE_DEG,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: primary.hex.to_string(),
                    opacity: None,
                },
                GradientStop {
                    offset: 1.0,
                    color: secondary.hex.to_string(),
                    opacity: None,
                },
            ],
        },
        (primary, secondary),
    )
}

fn variant(id: String, label: String, format: LayerAssetFormat) -> LayerVariant {
    LayerVariant {
        asset_cid: id.clone(),
        id,
        label,
        format,
        traits: None,
        weight: None,
    }
}

fn layer(category_id: &str, order: i32, variant: LayerVariant) -> SelectedLayer {
    SelectedLayer {
        category_id: category_id.to_string(),
        order,
        variant,
        tint: None,
        opacity: None,
        blend: None,
    }
}

/// Produce the fixed five-category local layer stack.
///
/// The base raster index is uniform in `[1, 9]` and the topper index uniform
/// in `[20, 29]`; the gradient-fill mask is tinted with the rolled colorway.
pub fn generate_local_layers<R: Rng + ?Sized>(
    rng: &mut R,
    options: &LocalGenOptions,
) -> LocalGeneration {
    let (colorway, flavors) = create_colorway(rng, options.force_solid);

    let base_index = rng.gen_range(1..=9u32);
    let topper_index = rng.gen_range(20..=29u32);

    let mut gradient_fill = layer(
        "gradient-fill",
        1,
        variant(
            format!("{BASE_PATH}/0010.svg"),
            "Gradient mask".to_string(),
            LayerAssetFormat::SvgGradient,
        ),
    );
    gradient_fill.tint = Some(colorway.clone());

    let layers = vec![
        layer(
            "base-foreground",
            0,
            variant(
                format!("{BASE_PATH}/{}.png", pad4(base_index)),
                format!("Base {}", pad4(base_index)),
                LayerAssetFormat::Png,
            ),
        ),
        gradient_fill,
        layer(
            "mid-topper",
            2,
            variant(
                format!("{BASE_PATH}/{}.png", pad4(topper_index)),
                format!("Topper {}", pad4(topper_index)),
                LayerAssetFormat::Png,
            ),
        ),
        layer(
            "glass-frame",
            3,
            variant(
                format!("{BASE_PATH}/0030.png"),
                "Glass Frame".to_string(),
                LayerAssetFormat::Png,
            ),
        ),
        layer(
            "highlights",
            4,
            variant(
                format!("{BASE_PATH}/0040.png"),
                "Highlights".to_string(),
                LayerAssetFormat::Png,
            ),
        ),
    ];

    LocalGeneration {
        layers,
        colorway,
        flavors,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/local.rs"]
mod tests;
