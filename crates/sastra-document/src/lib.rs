// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sastra-document — Document processing for the Sastra extractor.
//
// Provides PDF text-layer reading (lopdf), page rasterization (pdftoppm),
// OCR image preprocessing (grayscale, optional binarization), the Tesseract
// engine wrapper, and the extraction pipeline that selects between the two
// strategies.

pub mod extract;
pub mod pdf;
pub mod raster;
pub mod scan;

// Re-export the primary types so callers can use `sastra_document::KhmerExtractor` etc.
pub use extract::{Extraction, ExtractionMethod, KhmerExtractor};
pub use pdf::reader::TextLayerReader;
pub use raster::PageRasterizer;
pub use scan::ocr::TesseractEngine;
