use std::collections::HashMap;
use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;
use tracing::debug;

use crate::color::Color;
use crate::error::{Result, ThemeError};

/// Images are downscaled so the largest side never exceeds this, bounding
/// extraction cost independent of the source resolution.
pub const MAX_DIM: u32 = 400;

/// Pixels whose mean quantized brightness falls outside (20, 240) are
/// near-black or near-white and excluded from the candidate pool.
const MIN_BRIGHTNESS: f32 = 20.0;
const MAX_BRIGHTNESS: f32 = 240.0;

/// Minimum Manhattan distance between any two accepted palette colors.
const MIN_DISTANCE: u32 = 70;

/// Minimum HSL saturation for a candidate; rejects grays.
const MIN_SATURATION: f32 = 0.1;

/// Knobs for palette extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Maximum number of palette entries.
    pub num_colors: usize,
    /// Quantization bucket size per channel.
    pub tolerance: u8,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            num_colors: 10,
            tolerance: 32,
        }
    }
}

/// Load an image and downscale it to fit within 400x400 (preserving aspect
/// ratio, high-quality resampling).
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let img = image::open(path).map_err(|source| ThemeError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let img = if img.width() > MAX_DIM || img.height() > MAX_DIM {
        img.resize(MAX_DIM, MAX_DIM, FilterType::Lanczos3)
    } else {
        img
    };
    Ok(img.to_rgb8())
}

/// Extract a diverse, non-gray dominant palette.
///
/// Pixels are quantized into `tolerance`-sized buckets, near-black and
/// near-white pixels are dropped (unless that would empty the pool), and the
/// most frequent buckets are greedily accepted subject to a saturation gate
/// and a pairwise diversity floor. Returns colors in acceptance order; may be
/// empty for fully desaturated images.
pub fn extract_palette(img: &RgbImage, options: &ExtractOptions) -> Vec<Color> {
    let tolerance = options.tolerance.max(1);
    let quantize = |c: u8| c / tolerance * tolerance;

    let quantized: Vec<[u8; 3]> = img
        .pixels()
        .map(|p| [quantize(p[0]), quantize(p[1]), quantize(p[2])])
        .collect();

    let filtered: Vec<[u8; 3]> = quantized
        .iter()
        .filter(|px| {
            let mean = (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0;
            mean > MIN_BRIGHTNESS && mean < MAX_BRIGHTNESS
        })
        .copied()
        .collect();
    // Never produce an empty candidate pool.
    let pool: &[[u8; 3]] = if filtered.is_empty() {
        &quantized
    } else {
        &filtered
    };

    // Frequency count, remembering first-seen order for deterministic ties.
    let mut counts: HashMap<[u8; 3], (usize, usize)> = HashMap::new();
    for (index, px) in pool.iter().enumerate() {
        let entry = counts.entry(*px).or_insert((0, index));
        entry.0 += 1;
    }

    let mut candidates: Vec<([u8; 3], usize, usize)> = counts
        .into_iter()
        .map(|(px, (count, first))| (px, count, first))
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    candidates.truncate(options.num_colors * 5);

    let mut selected: Vec<Color> = Vec::new();
    for (px, _, _) in candidates {
        if selected.len() >= options.num_colors {
            break;
        }
        let color = Color::new(px[0], px[1], px[2]);
        if color.to_hsl().s < MIN_SATURATION {
            continue;
        }
        if selected.iter().any(|&s| color.distance(s) < MIN_DISTANCE) {
            continue;
        }
        selected.push(color);
    }

    debug!(
        pixels = pool.len(),
        selected = selected.len(),
        "palette extracted"
    );
    selected
}
