// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// OCR image preprocessing — grayscale reduction and optional Otsu
// binarization of rasterized page images, in place on disk.

use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use sastra_core::error::{Result, SastraError};
use tracing::{debug, instrument};

/// Prepare a rasterized page image for OCR, rewriting the file in place.
///
/// Reduces the image to a single grayscale channel; with `binarize` set, an
/// Otsu threshold is applied on top, which helps low-contrast scans. Images
/// that are already single-channel are left untouched unless binarization is
/// requested.
#[instrument(skip_all, fields(path = %path.display(), binarize))]
pub fn prepare_page(path: &Path, binarize: bool) -> Result<()> {
    let img = image::open(path).map_err(|err| {
        SastraError::Image(format!(
            "failed to open page image {}: {}",
            path.display(),
            err
        ))
    })?;

    if matches!(img, DynamicImage::ImageLuma8(_)) && !binarize {
        debug!("Page image already grayscale");
        return Ok(());
    }

    let gray = img.to_luma8();
    let prepared = if binarize { binarize_otsu(&gray) } else { gray };

    prepared.save(path).map_err(|err| {
        SastraError::Image(format!(
            "failed to save preprocessed page {}: {}",
            path.display(),
            err
        ))
    })?;

    debug!("Page image prepared for OCR");
    Ok(())
}

/// Apply global Otsu binarization: pixels at or below the computed threshold
/// become black, the rest white.
pub fn binarize_otsu(gray: &GrayImage) -> GrayImage {
    let threshold = otsu_threshold(gray);
    debug!(threshold, "Otsu threshold computed");

    let (width, height) = gray.dimensions();
    let mut output = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let val = gray.get_pixel(x, y).0[0];
            let binary = if val <= threshold { 0u8 } else { 255u8 };
            output.put_pixel(x, y, Luma([binary]));
        }
    }

    output
}

/// Compute the Otsu threshold for a grayscale image.
///
/// Finds the threshold value that maximises the between-class variance of
/// the black and white pixel groups.
fn otsu_threshold(gray: &GrayImage) -> u8 {
    let mut histogram = [0u64; 256];
    for pixel in gray.pixels() {
        histogram[pixel.0[0] as usize] += 1;
    }

    let total_pixels = gray.width() as u64 * gray.height() as u64;
    if total_pixels == 0 {
        return 128;
    }

    let mut sum_total: f64 = 0.0;
    for (i, &count) in histogram.iter().enumerate() {
        sum_total += i as f64 * count as f64;
    }

    let mut sum_background: f64 = 0.0;
    let mut weight_background: u64 = 0;
    let mut max_variance: f64 = 0.0;
    let mut best_threshold: u8 = 0;

    for (t, &count) in histogram.iter().enumerate() {
        weight_background += count;
        if weight_background == 0 {
            continue;
        }
        let weight_foreground = total_pixels - weight_background;
        if weight_foreground == 0 {
            break;
        }

        sum_background += t as f64 * count as f64;
        let mean_background = sum_background / weight_background as f64;
        let mean_foreground = (sum_total - sum_background) / weight_foreground as f64;

        let between_variance = weight_background as f64
            * weight_foreground as f64
            * (mean_background - mean_foreground).powi(2);

        if between_variance > max_variance {
            max_variance = between_variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}
