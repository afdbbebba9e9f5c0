//! End-to-end analysis: image -> palette -> pair -> variants -> themes.

pub mod compose;
pub mod extract;
pub mod pair;
pub mod variations;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::color::Color;
use crate::error::{Result, ThemeError};
use crate::theme::{Mode, ThemeRecord};
use extract::ExtractOptions;

/// Palette substituted when analysis fails for any reason.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::new(0x34, 0x98, 0xdb),
    Color::new(0x2e, 0xcc, 0x71),
    Color::new(0xe7, 0x4c, 0x3c),
    Color::new(0xf3, 0x9c, 0x12),
    Color::new(0x9b, 0x59, 0xb6),
    Color::new(0x1a, 0xbc, 0x9c),
];

/// Pipeline progression. `Failed` is terminal and reachable from any state;
/// it still produces a usable (default) result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Loading,
    Extracting,
    Composing,
    Done,
    Failed,
}

/// Auxiliary schemes derived from the most prevalent palette color.
#[derive(Debug, Clone, Serialize)]
pub struct ColorSchemes {
    pub analogous: Vec<Color>,
    pub complementary: Vec<Color>,
    pub triadic: Vec<Color>,
}

/// Everything the engine knows after analyzing one image.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub source_image: PathBuf,
    /// Dimensions after downscaling; `None` when the image never loaded.
    pub image_size: Option<(u32, u32)>,
    pub dominant_colors: Vec<Color>,
    pub primary_pair: (Color, Color),
    pub themes: BTreeMap<Mode, ThemeRecord>,
    pub color_scheme: ColorSchemes,
}

impl AnalysisResult {
    /// Theme for a mode. All three modes are always present.
    pub fn theme(&self, mode: Mode) -> &ThemeRecord {
        &self.themes[&mode]
    }
}

/// Single-image analysis pipeline.
///
/// Stateless between invocations apart from the observable [`Stage`]; each
/// analyzer handles exactly one image.
pub struct Analyzer {
    path: PathBuf,
    options: ExtractOptions,
    stage: Stage,
}

impl Analyzer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_options(path, ExtractOptions::default())
    }

    pub fn with_options(path: impl Into<PathBuf>, options: ExtractOptions) -> Self {
        Self {
            path: path.into(),
            options,
            stage: Stage::Idle,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Analyze the image. Never fails: any internal error is logged and the
    /// fixed default palette result is returned instead, so the caller always
    /// receives a usable set of themes.
    pub fn analyze(&mut self) -> AnalysisResult {
        match self.run() {
            Ok(result) => {
                self.enter(Stage::Done);
                info!(
                    image = %self.path.display(),
                    colors = result.dominant_colors.len(),
                    "analysis complete"
                );
                result
            }
            Err(err) => {
                self.enter(Stage::Failed);
                warn!(
                    image = %self.path.display(),
                    error = %err,
                    "analysis failed, substituting default palette"
                );
                assemble(self.path.clone(), None, DEFAULT_PALETTE.to_vec())
            }
        }
    }

    fn run(&mut self) -> Result<AnalysisResult> {
        self.enter(Stage::Loading);
        let img = extract::load_image(&self.path)?;

        self.enter(Stage::Extracting);
        let palette = extract::extract_palette(&img, &self.options);
        if palette.is_empty() {
            return Err(ThemeError::EmptyPalette);
        }

        self.enter(Stage::Composing);
        Ok(assemble(
            self.path.clone(),
            Some(img.dimensions()),
            palette,
        ))
    }

    fn enter(&mut self, stage: Stage) {
        debug!(from = ?self.stage, to = ?stage, "pipeline stage");
        self.stage = stage;
    }
}

/// Analyze an image with default options. The single entry point for
/// callers that do not need to tune extraction.
pub fn analyze(path: &Path) -> AnalysisResult {
    Analyzer::new(path).analyze()
}

fn assemble(
    source_image: PathBuf,
    image_size: Option<(u32, u32)>,
    palette: Vec<Color>,
) -> AnalysisResult {
    let primary_pair = pair::select_pair(&palette);
    let themes: BTreeMap<Mode, ThemeRecord> = Mode::ALL
        .iter()
        .map(|&mode| (mode, compose::compose_theme(&palette, mode)))
        .collect();

    // Schemes derive from the most prevalent color; `palette` is never empty
    // here (extraction errors out first, and the default palette has six).
    let base = palette[0];
    let color_scheme = ColorSchemes {
        analogous: variations::analogous_scheme(base, 5),
        complementary: variations::complementary_scheme(base),
        triadic: variations::triadic_scheme(base),
    };

    AnalysisResult {
        source_image,
        image_size,
        dominant_colors: palette,
        primary_pair,
        themes,
        color_scheme,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreadable_path_falls_back_to_default_palette() {
        let mut analyzer = Analyzer::new("/nonexistent/wallpaper.png");
        let result = analyzer.analyze();

        assert_eq!(analyzer.stage(), Stage::Failed);
        assert_eq!(result.dominant_colors, DEFAULT_PALETTE.to_vec());
        assert_eq!(result.image_size, None);
        let modes: Vec<Mode> = result.themes.keys().copied().collect();
        assert_eq!(modes, vec![Mode::Light, Mode::Dark, Mode::Mixed]);
    }

    #[test]
    fn default_result_pair_comes_from_default_palette() {
        let mut analyzer = Analyzer::new("/nonexistent/wallpaper.png");
        let result = analyzer.analyze();
        let (primary, secondary) = result.primary_pair;
        // The pair must come from the default palette itself.
        assert!(result.dominant_colors.contains(&primary));
        assert!(result.dominant_colors.contains(&secondary));
    }

    #[test]
    fn default_result_still_carries_schemes() {
        let mut analyzer = Analyzer::new("/nonexistent/wallpaper.png");
        let result = analyzer.analyze();
        assert_eq!(result.color_scheme.analogous.len(), 5);
        assert_eq!(result.color_scheme.complementary.len(), 2);
        assert_eq!(result.color_scheme.triadic.len(), 3);
        assert_eq!(result.color_scheme.complementary[0], DEFAULT_PALETTE[0]);
    }

    #[test]
    fn stage_starts_idle() {
        let analyzer = Analyzer::new("whatever.png");
        assert_eq!(analyzer.stage(), Stage::Idle);
    }

    #[test]
    fn result_serializes_with_mode_keyed_themes() {
        let mut analyzer = Analyzer::new("/nonexistent/wallpaper.png");
        let value = serde_json::to_value(analyzer.analyze()).unwrap();
        assert!(value["themes"]["light"].is_object());
        assert!(value["themes"]["dark"].is_object());
        assert!(value["themes"]["mixed"].is_object());
        assert!(value["dominant_colors"].is_array());
        assert_eq!(value["dominant_colors"][0], "#3498db");
    }
}
