use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, ThemeError>;

/// Errors produced by the analysis engine.
///
/// None of these cross the [`analyze`](crate::pipeline::Analyzer::analyze)
/// boundary: the pipeline absorbs them and substitutes the default result.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Image file could not be opened or decoded.
    #[error("failed to load image {}", path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Malformed hex color string passed to a conversion routine.
    #[error("invalid color format {input:?}: expected `#rrggbb`")]
    InvalidColorFormat { input: String },

    /// Extraction produced no usable colors (e.g. a pure grayscale image
    /// where every candidate fails the saturation gate).
    #[error("no usable colors extracted from image")]
    EmptyPalette,
}
