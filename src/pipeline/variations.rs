//! Tonal variants and auxiliary color schemes derived from a base color.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::{Color, Hsl};

/// Tonal variant labels, in canonical generation order. Truncating a variant
/// set keeps a prefix of this order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Light,
    Lighter,
    Dark,
    Darker,
    Vibrant,
    Muted,
    Complementary,
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::Light,
        Variant::Lighter,
        Variant::Dark,
        Variant::Darker,
        Variant::Vibrant,
        Variant::Muted,
        Variant::Complementary,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Light => "light",
            Variant::Lighter => "lighter",
            Variant::Dark => "dark",
            Variant::Darker => "darker",
            Variant::Vibrant => "vibrant",
            Variant::Muted => "muted",
            Variant::Complementary => "complementary",
        }
    }
}

/// Variant maps carry this many entries unless a caller asks otherwise.
pub const DEFAULT_VARIANT_COUNT: usize = 5;

fn derive(base: Hsl, variant: Variant) -> Hsl {
    let Hsl { h, s, l } = base;
    match variant {
        Variant::Light => Hsl::new(h, (s * 0.4).max(0.1), (l * 1.4).min(0.95)),
        Variant::Lighter => Hsl::new(h, (s * 0.3).max(0.05), (l * 1.6).min(0.98)),
        Variant::Dark => Hsl::new(h, (s * 1.2).min(1.0), (l * 0.4).max(0.1)),
        Variant::Darker => Hsl::new(h, (s * 1.4).min(1.0), (l * 0.2).max(0.05)),
        Variant::Vibrant => Hsl::new(h, (s * 1.3).min(1.0), (l * 1.1).min(0.8)),
        Variant::Muted => Hsl::new(h, s * 0.6, l * 0.9),
        Variant::Complementary => Hsl::new((h + 0.5).rem_euclid(1.0), s, l),
    }
}

/// Generate the first `count` tonal variants of `base` in canonical order.
pub fn variations(base: Color, count: usize) -> BTreeMap<Variant, Color> {
    let hsl = base.to_hsl();
    Variant::ALL
        .iter()
        .take(count)
        .map(|&v| (v, Color::from_hsl(derive(hsl, v))))
        .collect()
}

/// Analogous scheme: `n` hues at 0.1 (36°) steps centered on the base hue,
/// same saturation and lightness, ordered from the most negative offset.
pub fn analogous_scheme(base: Color, n: usize) -> Vec<Color> {
    let hsl = base.to_hsl();
    let half = (n / 2) as i32;
    (-half..=half)
        .map(|i| Color::from_hsl(Hsl::new(hsl.h + i as f32 * 0.1, hsl.s, hsl.l)))
        .collect()
}

/// Complementary scheme: the base color and its 180° rotation.
pub fn complementary_scheme(base: Color) -> Vec<Color> {
    let hsl = base.to_hsl();
    vec![base, Color::from_hsl(Hsl::new(hsl.h + 0.5, hsl.s, hsl.l))]
}

/// Triadic scheme: the base color and its two 120° rotations.
pub fn triadic_scheme(base: Color) -> Vec<Color> {
    let hsl = base.to_hsl();
    vec![
        base,
        Color::from_hsl(Hsl::new(hsl.h + 1.0 / 3.0, hsl.s, hsl.l)),
        Color::from_hsl(Hsl::new(hsl.h + 2.0 / 3.0, hsl.s, hsl.l)),
    ]
}
