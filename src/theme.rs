use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::pipeline::variations::Variant;

/// Theme mode. All three are computed for every analysis; `Mixed` keeps a
/// light chrome over a background tinted from the image's primary color.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
    Mixed,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Light, Mode::Dark, Mode::Mixed];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
            Mode::Mixed => "mixed",
        }
    }

    pub fn theme_name(self) -> &'static str {
        match self {
            Mode::Light => "Light Theme",
            Mode::Dark => "Dark Theme",
            Mode::Mixed => "Mixed Theme",
        }
    }

    /// Suggest a mode from the theme's primary color: dark chrome when the
    /// primary sits in the lower half of the lightness range.
    pub fn from_primary(primary: Color) -> Mode {
        if primary.to_hsl().l < 0.5 {
            Mode::Dark
        } else {
            Mode::Light
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fixed semantic slots of a theme. Values are mode-dependent constants,
/// except the mixed-mode background which is derived from the primary color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticColors {
    pub background: Color,
    pub surface: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
    pub info: Color,
    pub on_primary: Color,
    pub on_secondary: Color,
    pub on_background: Color,
    pub on_surface: Color,
    pub on_error: Color,
}

impl SemanticColors {
    pub const LIGHT: SemanticColors = SemanticColors {
        background: Color::new(0xff, 0xff, 0xff),
        surface: Color::new(0xf8, 0xf9, 0xfa),
        error: Color::new(0xdc, 0x35, 0x45),
        warning: Color::new(0xff, 0xc1, 0x07),
        success: Color::new(0x28, 0xa7, 0x45),
        info: Color::new(0x17, 0xa2, 0xb8),
        on_primary: Color::new(0xff, 0xff, 0xff),
        on_secondary: Color::new(0xff, 0xff, 0xff),
        on_background: Color::new(0x21, 0x25, 0x29),
        on_surface: Color::new(0x49, 0x50, 0x57),
        on_error: Color::new(0xff, 0xff, 0xff),
    };

    pub const DARK: SemanticColors = SemanticColors {
        background: Color::new(0x12, 0x12, 0x12),
        surface: Color::new(0x1e, 0x1e, 0x1e),
        error: Color::new(0xcf, 0x66, 0x79),
        warning: Color::new(0xff, 0xb7, 0x4d),
        success: Color::new(0x81, 0xc7, 0x84),
        info: Color::new(0x4f, 0xc3, 0xf7),
        on_primary: Color::new(0x00, 0x00, 0x00),
        on_secondary: Color::new(0x00, 0x00, 0x00),
        on_background: Color::new(0xff, 0xff, 0xff),
        on_surface: Color::new(0xe0, 0xe0, 0xe0),
        on_error: Color::new(0x00, 0x00, 0x00),
    };

    /// Mixed mode: light chrome over an image-tinted background.
    pub fn mixed(background: Color) -> SemanticColors {
        SemanticColors {
            background,
            surface: Color::new(0xff, 0xff, 0xff),
            error: Color::new(0xe5, 0x39, 0x35),
            warning: Color::new(0xfb, 0x8c, 0x00),
            success: Color::new(0x43, 0xa0, 0x47),
            info: Color::new(0x1e, 0x88, 0xe5),
            on_primary: Color::new(0xff, 0xff, 0xff),
            on_secondary: Color::new(0x00, 0x00, 0x00),
            on_background: Color::new(0x00, 0x00, 0x00),
            on_surface: Color::new(0x00, 0x00, 0x00),
            on_error: Color::new(0xff, 0xff, 0xff),
        }
    }
}

/// A complete named theme for one mode.
///
/// Serializes to a flat mapping: colors as hex strings, variant maps nested,
/// accents as an ordered array, semantic slots at the top level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeRecord {
    pub name: String,
    pub mode: Mode,
    pub primary: Color,
    pub primary_variants: BTreeMap<Variant, Color>,
    pub secondary: Color,
    pub secondary_variants: BTreeMap<Variant, Color>,
    pub accent_colors: Vec<Color>,
    #[serde(flatten)]
    pub semantic: SemanticColors,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_semantic_constants() {
        let s = &SemanticColors::LIGHT;
        assert_eq!(s.background.to_hex(), "#ffffff");
        assert_eq!(s.surface.to_hex(), "#f8f9fa");
        assert_eq!(s.error.to_hex(), "#dc3545");
        assert_eq!(s.warning.to_hex(), "#ffc107");
        assert_eq!(s.success.to_hex(), "#28a745");
        assert_eq!(s.info.to_hex(), "#17a2b8");
        assert_eq!(s.on_background.to_hex(), "#212529");
        assert_eq!(s.on_surface.to_hex(), "#495057");
    }

    #[test]
    fn dark_semantic_constants() {
        let s = &SemanticColors::DARK;
        assert_eq!(s.background.to_hex(), "#121212");
        assert_eq!(s.surface.to_hex(), "#1e1e1e");
        assert_eq!(s.error.to_hex(), "#cf6679");
        assert_eq!(s.warning.to_hex(), "#ffb74d");
        assert_eq!(s.success.to_hex(), "#81c784");
        assert_eq!(s.info.to_hex(), "#4fc3f7");
        assert_eq!(s.on_primary.to_hex(), "#000000");
        assert_eq!(s.on_surface.to_hex(), "#e0e0e0");
    }

    #[test]
    fn mixed_semantic_uses_given_background() {
        let bg = Color::new(0xf0, 0xf0, 0xf0);
        let s = SemanticColors::mixed(bg);
        assert_eq!(s.background, bg);
        assert_eq!(s.surface.to_hex(), "#ffffff");
        assert_eq!(s.error.to_hex(), "#e53935");
        assert_eq!(s.warning.to_hex(), "#fb8c00");
        assert_eq!(s.success.to_hex(), "#43a047");
        assert_eq!(s.info.to_hex(), "#1e88e5");
        assert_eq!(s.on_background.to_hex(), "#000000");
    }

    #[test]
    fn mode_from_primary_picks_dark_for_dim_colors() {
        assert_eq!(Mode::from_primary(Color::new(20, 20, 60)), Mode::Dark);
        assert_eq!(Mode::from_primary(Color::new(220, 220, 250)), Mode::Light);
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Mode::Mixed).unwrap(), "\"mixed\"");
    }
}
