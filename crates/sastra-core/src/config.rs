// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Extraction pipeline configuration.

use serde::{Deserialize, Serialize};

/// Page-segmentation mode handed to the OCR engine (`--psm`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageSegMode {
    /// Fully automatic page segmentation.
    Auto,
    /// Assume a single column of text of variable sizes.
    SingleColumn,
    /// Assume a single uniform block of text.
    SingleBlock,
}

impl PageSegMode {
    /// The numeric flag value Tesseract expects on the command line.
    pub fn as_flag(&self) -> &'static str {
        match self {
            PageSegMode::Auto => "3",
            PageSegMode::SingleColumn => "4",
            PageSegMode::SingleBlock => "6",
        }
    }
}

impl Default for PageSegMode {
    fn default() -> Self {
        PageSegMode::Auto
    }
}

/// Options controlling a single extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOptions {
    /// Rasterization resolution in dots per inch. Only the OCR path renders
    /// pages, so this has no effect on direct text-layer extraction.
    pub dpi: u32,
    /// Tesseract language code (ISO 639-2).
    pub language: String,
    /// The text layer is accepted when it contains strictly more Khmer-script
    /// runs than this.
    pub khmer_run_threshold: usize,
    /// Page-segmentation mode for OCR.
    pub segmentation: PageSegMode,
    /// Apply Otsu binarization after grayscale conversion. Helps low-contrast
    /// scans, off by default.
    pub binarize: bool,
}

impl Default for ExtractionOptions {
    fn default() -> Self {
        Self {
            dpi: 300,
            language: "khm".to_string(),
            khmer_run_threshold: 3,
            segmentation: PageSegMode::default(),
            binarize: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = ExtractionOptions::default();
        assert_eq!(options.dpi, 300);
        assert_eq!(options.language, "khm");
        assert_eq!(options.khmer_run_threshold, 3);
        assert_eq!(options.segmentation, PageSegMode::Auto);
        assert!(!options.binarize);
    }

    #[test]
    fn psm_flags() {
        assert_eq!(PageSegMode::Auto.as_flag(), "3");
        assert_eq!(PageSegMode::SingleColumn.as_flag(), "4");
        assert_eq!(PageSegMode::SingleBlock.as_flag(), "6");
    }
}
