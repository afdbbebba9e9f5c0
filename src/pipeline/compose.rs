use crate::color::Color;
use crate::pipeline::pair::select_pair;
use crate::pipeline::variations::{variations, Variant, DEFAULT_VARIANT_COUNT};
use crate::theme::{Mode, SemanticColors, ThemeRecord};

/// Accent colors are capped at this many palette entries.
const MAX_ACCENTS: usize = 6;

/// Mixed-mode background when the primary's `lighter` variant is missing.
const MIXED_BACKGROUND_FALLBACK: Color = Color::new(0xf0, 0xf0, 0xf0);

/// Assemble a complete named theme for one mode from an extracted palette.
pub fn compose_theme(palette: &[Color], mode: Mode) -> ThemeRecord {
    let (primary, secondary) = select_pair(palette);

    let primary_variants = variations(primary, DEFAULT_VARIANT_COUNT);
    let secondary_variants = variations(secondary, DEFAULT_VARIANT_COUNT);

    let accent_colors: Vec<Color> = palette
        .iter()
        .copied()
        .filter(|c| *c != primary && *c != secondary)
        .take(MAX_ACCENTS)
        .collect();

    let semantic = match mode {
        Mode::Light => SemanticColors::LIGHT,
        Mode::Dark => SemanticColors::DARK,
        Mode::Mixed => {
            let background = primary_variants
                .get(&Variant::Lighter)
                .copied()
                .unwrap_or(MIXED_BACKGROUND_FALLBACK);
            SemanticColors::mixed(background)
        }
    };

    ThemeRecord {
        name: mode.theme_name().to_string(),
        mode,
        primary,
        primary_variants,
        secondary,
        secondary_variants,
        accent_colors,
        semantic,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<Color> {
        vec![
            Color::new(32, 128, 192),
            Color::new(192, 64, 32),
            Color::new(32, 192, 96),
            Color::new(224, 192, 32),
            Color::new(128, 32, 192),
            Color::new(16, 16, 64),
            Color::new(224, 224, 128),
            Color::new(192, 32, 128),
            Color::new(64, 160, 160),
        ]
    }

    #[test]
    fn accents_exclude_primary_and_secondary_and_cap_at_six() {
        let palette = palette();
        let theme = compose_theme(&palette, Mode::Light);
        assert_eq!(theme.accent_colors.len(), 6);
        assert!(!theme.accent_colors.contains(&theme.primary));
        assert!(!theme.accent_colors.contains(&theme.secondary));
        // Accents keep palette order.
        let positions: Vec<usize> = theme
            .accent_colors
            .iter()
            .map(|c| palette.iter().position(|p| p == c).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }

    #[test]
    fn variant_maps_have_default_count() {
        let theme = compose_theme(&palette(), Mode::Dark);
        assert_eq!(theme.primary_variants.len(), DEFAULT_VARIANT_COUNT);
        assert_eq!(theme.secondary_variants.len(), DEFAULT_VARIANT_COUNT);
    }

    #[test]
    fn light_and_dark_use_fixed_semantic_tables() {
        assert_eq!(
            compose_theme(&palette(), Mode::Light).semantic,
            SemanticColors::LIGHT
        );
        assert_eq!(
            compose_theme(&palette(), Mode::Dark).semantic,
            SemanticColors::DARK
        );
    }

    #[test]
    fn mixed_background_is_primary_lighter_variant() {
        let theme = compose_theme(&palette(), Mode::Mixed);
        let lighter = theme.primary_variants[&Variant::Lighter];
        assert_eq!(theme.semantic.background, lighter);
        assert_eq!(theme.semantic.surface.to_hex(), "#ffffff");
    }

    #[test]
    fn theme_names_follow_mode() {
        assert_eq!(compose_theme(&palette(), Mode::Light).name, "Light Theme");
        assert_eq!(compose_theme(&palette(), Mode::Dark).name, "Dark Theme");
        assert_eq!(compose_theme(&palette(), Mode::Mixed).name, "Mixed Theme");
    }

    #[test]
    fn same_pair_across_modes() {
        let palette = palette();
        let light = compose_theme(&palette, Mode::Light);
        let dark = compose_theme(&palette, Mode::Dark);
        assert_eq!(light.primary, dark.primary);
        assert_eq!(light.secondary, dark.secondary);
    }

    #[test]
    fn serializes_to_flat_mapping() {
        let theme = compose_theme(&palette(), Mode::Light);
        let value = serde_json::to_value(&theme).unwrap();
        let obj = value.as_object().unwrap();
        // Semantic slots are flattened to the top level.
        assert_eq!(obj["background"], "#ffffff");
        assert_eq!(obj["on_background"], "#212529");
        assert_eq!(obj["mode"], "light");
        assert!(obj["primary_variants"].is_object());
        assert!(obj["accent_colors"].is_array());
        assert!(obj["primary_variants"]["lighter"].is_string());
    }
}
