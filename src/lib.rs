//! Dominant color extraction.
//!
//! Pixels are sampled on a fixed grid, grouped with k-means++ / Lloyd
//! iterations, and reported as a palette ordered by how many samples each
//! color represents.
//!
//! ```rust
//! use image::{Rgb, RgbImage};
//! use kmeans_color_scan::{PaletteBuilder, ScanConfig};
//!
//! let img = RgbImage::from_fn(8, 8, |x, _| if x < 6 { Rgb([200, 0, 0]) } else { Rgb([0, 0, 200]) });
//! let config = ScanConfig::default().with_cluster_count(2).with_sampling_stride(1);
//! let palette = PaletteBuilder::new(config).color_stats(&img).unwrap();
//! assert_eq!(palette[0].hex(), "C80000");
//! assert_eq!(palette[0].count, 48);
//! ```

#![forbid(unsafe_code)]

pub mod color;
pub mod config;
pub mod error;
pub mod kmeans;
pub mod palette_builder;
pub mod sampler;

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub use color::{ColorPoint, DistanceMeasure, Euclidean};
pub use config::ScanConfig;
pub use error::{Error, Result};
pub use kmeans::{Cluster, KMeans};
pub use palette_builder::{PaletteBuilder, PaletteEntry, build_palette};
pub use sampler::{Raster, sample};

/// Decode `input` and return its dominant colors, most prevalent first.
///
/// # Errors
/// When the bytes are not a supported image, or `config` is invalid.
pub fn color_stats_from_bytes(input: &[u8], config: &ScanConfig) -> Result<Vec<PaletteEntry>> {
    let img = image::load_from_memory(input)?;
    PaletteBuilder::new(*config).color_stats(&img)
}

/// Dominant colors of an encoded image.
///
/// Returns an array of `{ color, count, share }` objects where `color` is an
/// uppercase `RRGGBB` string, sorted by `count` descending.
#[wasm_bindgen]
pub fn dominant_colors(
    input: Vec<u8>,
    n_colors: usize,
    stride: u32,
    max_iterations: Option<usize>,
    seed: Option<u64>,
) -> std::result::Result<Array, JsValue> {
    let mut config = ScanConfig::default()
        .with_cluster_count(n_colors)
        .with_sampling_stride(stride);
    if let Some(max_iterations) = max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if let Some(seed) = seed {
        config = config.with_random_seed(seed);
    }

    let palette = color_stats_from_bytes(&input, &config)
        .map_err(|e| JsValue::from_str(&format!("Unable to extract palette: {e}")))?;

    let out = Array::new();
    for entry in &palette {
        let obj = Object::new();
        Reflect::set(&obj, &JsValue::from_str("color"), &JsValue::from_str(&entry.hex()))?;
        Reflect::set(&obj, &JsValue::from_str("count"), &JsValue::from_f64(entry.count as f64))?;
        Reflect::set(&obj, &JsValue::from_str("share"), &JsValue::from_f64(entry.share))?;
        out.push(&obj);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

    use super::*;

    fn png_bytes(img: RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap_or_else(|e| panic!("{e:#?}"));
        buf
    }

    #[test]
    fn decodes_and_ranks() {
        let img = RgbImage::from_fn(10, 10, |x, y| {
            if x + y < 4 { Rgb([0, 128, 0]) } else { Rgb([240, 240, 240]) }
        });
        let config = ScanConfig::default()
            .with_cluster_count(2)
            .with_sampling_stride(1);
        let palette = color_stats_from_bytes(&png_bytes(img), &config)
            .unwrap_or_else(|e| panic!("{e:#?}"));
        assert_eq!(palette.len(), 2);
        assert_eq!(palette[0].hex(), "F0F0F0");
        assert_eq!(palette[0].count, 90);
        assert_eq!(palette[1].hex(), "008000");
        assert_eq!(palette[1].count, 10);
    }

    #[test]
    fn js_export_signature() {
        let export: fn(
            Vec<u8>,
            usize,
            u32,
            Option<usize>,
            Option<u64>,
        ) -> std::result::Result<Array, JsValue> = dominant_colors;
        let _ = export;
    }

    #[test]
    fn garbage_bytes_surface_decode_error() {
        let result = color_stats_from_bytes(b"definitely not an image", &ScanConfig::default());
        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
