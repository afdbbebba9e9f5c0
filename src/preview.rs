//! Terminal report: colored swatches for palettes, pairs and schemes.

use crossterm::style::{Color as TermColor, Stylize};

use crate::color::Color;
use crate::pipeline::AnalysisResult;
use crate::theme::ThemeRecord;

fn term_color(c: Color) -> TermColor {
    TermColor::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

/// A block of `width` spaces on the color's background.
fn color_block(c: Color, width: usize) -> String {
    " ".repeat(width).on(term_color(c)).to_string()
}

/// Print the full analysis report to stdout.
pub fn print_results(result: &AnalysisResult) {
    println!("Image: {}", result.source_image.display());
    if let Some((w, h)) = result.image_size {
        println!("Size:  {w}x{h}");
    }

    println!("\nDominant colors:");
    for (i, color) in result.dominant_colors.iter().enumerate() {
        println!("  {:2}. {} {color}", i + 1, color_block(*color, 6));
    }

    let (primary, secondary) = result.primary_pair;
    println!("\nPrimary pair:");
    println!("  primary    {} {primary}", color_block(primary, 4));
    println!("  secondary  {} {secondary}", color_block(secondary, 4));

    println!("\nColor schemes:");
    print_scheme("analogous", &result.color_scheme.analogous);
    print_scheme("complementary", &result.color_scheme.complementary);
    print_scheme("triadic", &result.color_scheme.triadic);
}

fn print_scheme(name: &str, colors: &[Color]) {
    print!("  {name:<14}");
    for color in colors {
        print!("{}", color_block(*color, 3));
    }
    println!();
}

/// Print one theme's palette as labeled swatches.
pub fn print_palette(theme: &ThemeRecord) {
    println!("{}:", theme.name);
    let rows = [
        ("primary", theme.primary),
        ("secondary", theme.secondary),
        ("background", theme.semantic.background),
        ("surface", theme.semantic.surface),
    ];
    for (label, color) in rows {
        println!("  {} {label:<12} {color}", color_block(color, 6));
    }
    for (i, accent) in theme.accent_colors.iter().take(3).enumerate() {
        let label = format!("accent {}", i + 1);
        println!("  {} {label:<12} {accent}", color_block(*accent, 6));
    }
}
