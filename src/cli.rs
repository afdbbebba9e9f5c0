use std::path::PathBuf;

use clap::Parser;

use crate::backends::Platform;
use crate::theme::Mode;

/// Generate desktop color themes from wallpaper images.
#[derive(Parser, Debug)]
#[command(name = "walltint", version, about)]
pub struct Args {
    /// Path to the image to analyze
    pub image: Option<PathBuf>,

    /// Target platform (auto-detected from XDG_CURRENT_DESKTOP if omitted)
    #[arg(short, long, value_enum)]
    pub platform: Option<Platform>,

    /// Theme mode to apply (picked from the primary color if omitted)
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Apply the theme and wallpaper after analysis
    #[arg(long)]
    pub apply: bool,

    /// Write the full analysis as JSON to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print colored palette previews for every theme
    #[arg(long)]
    pub preview: bool,

    /// Launch the interactive theme preview
    #[arg(long, conflicts_with = "apply")]
    pub tui: bool,

    /// Number of palette colors to extract
    #[arg(short = 'n', long = "colors", default_value_t = 10)]
    pub colors: usize,

    /// Quantization tolerance per channel
    #[arg(long, default_value_t = 32)]
    pub tolerance: u8,

    /// List supported platforms and exit
    #[arg(long)]
    pub list_platforms: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
