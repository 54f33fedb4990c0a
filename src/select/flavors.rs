use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// A named flavor color swatch used by local generation and naming templates.
pub struct FlavorSwatch {
    /// Stable identifier.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Swatch color in hex.
    pub hex: &'static str,
    /// One-line description used in naming templates.
    pub description: &'static str,
}

/// The fixed flavor palette.
pub const FLAVOR_SWATCHES: &[FlavorSwatch] = &[
    FlavorSwatch {
        id: "strawberry",
        name: "Strawberry",
        hex: "#ff6b81",
        description: "Bright strawberry milk tea with a silky finish.",
    },
    FlavorSwatch {
        id: "matcha",
        name: "Matcha",
        hex: "#34d399",
        description: "Stone-ground matcha with a grassy, creamy body.",
    },
    FlavorSwatch {
        id: "taro",
        name: "Taro",
        hex: "#a78bfa",
        description: "Velvety taro blend with a nutty sweetness.",
    },
    FlavorSwatch {
        id: "mango",
        name: "Mango",
        hex: "#fbbf24",
        description: "Sun-ripened mango over a light jasmine base.",
    },
    FlavorSwatch {
        id: "butterfly-pea",
        name: "Butterfly Pea",
        hex: "#60a5fa",
        description: "Color-shifting butterfly pea infusion with citrus notes.",
    },
    FlavorSwatch {
        id: "hibiscus",
        name: "Hibiscus",
        hex: "#f43f5e",
        description: "Tart hibiscus steep with a deep ruby hue.",
    },
    FlavorSwatch {
        id: "brown-sugar",
        name: "Brown Sugar",
        hex: "#b45309",
        description: "Caramelized brown sugar syrup streaked through fresh milk.",
    },
    FlavorSwatch {
        id: "lychee",
        name: "Lychee",
        hex: "#fda4af",
        description: "Floral lychee nectar with a crisp green tea base.",
    },
];

/// Look up a swatch by identifier.
pub fn flavor_by_id(id: &str) -> Option<&'static FlavorSwatch> {
    FLAVOR_SWATCHES.iter().find(|swatch| swatch.id == id)
}

/// Default swatch used when no explicit flavor is chosen.
pub fn default_flavor() -> &'static FlavorSwatch {
    &FLAVOR_SWATCHES[0]
}

/// Pick a swatch uniformly at random.
pub fn pick_random_flavor<R: Rng + ?Sized>(rng: &mut R) -> &'static FlavorSwatch {
    &FLAVOR_SWATCHES[rng.gen_range(0..FLAVOR_SWATCHES.len())]
}

#[cfg(test)]
#[path = "../../tests/unit/select/flavors.rs"]
mod tests;
