// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Sastra.

use thiserror::Error;

/// Top-level error type for all Sastra operations.
#[derive(Debug, Error)]
pub enum SastraError {
    // -- Input errors --
    #[error("PDF file not found: {0}")]
    InputNotFound(String),

    // -- OCR engine availability --
    #[error("Tesseract is not available: {0}")]
    OcrUnavailable(String),

    #[error("OCR language pack missing: {0}")]
    LanguageMissing(String),

    // -- Pipeline errors --
    #[error("text-layer extraction failed: {0}")]
    TextLayer(String),

    #[error("failed to convert PDF to images: {0}")]
    Raster(String),

    #[error("OCR failed: {0}")]
    Ocr(String),

    #[error("image processing failed: {0}")]
    Image(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SastraError>;
