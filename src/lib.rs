//! # walltint
//!
//! Analyzes a wallpaper image, derives coherent light/dark/mixed color
//! themes, and applies them to a desktop environment.
//!
//! The engine extracts a diverse dominant palette, picks the
//! highest-contrast primary/secondary pair, derives tonal variants, and
//! assembles themed semantic slots. [`analyze`] never fails: on any internal
//! error it logs the cause and returns a result built from a fixed default
//! palette, so callers always receive usable themes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use walltint::theme::Mode;
//!
//! let result = walltint::analyze(Path::new("wallpaper.jpg"));
//! let dark = result.theme(Mode::Dark);
//! println!("primary: {}, background: {}", dark.primary, dark.semantic.background);
//! ```

pub mod backends;
pub mod cli;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod preview;
pub mod theme;
pub mod tui;

pub use color::{Color, Hsl};
pub use error::{Result, ThemeError};
pub use pipeline::{analyze, AnalysisResult, Analyzer};
pub use theme::{Mode, ThemeRecord};
