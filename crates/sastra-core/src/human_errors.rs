// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages with installation troubleshooting.
//
// Every technical error is mapped to plain English plus an actionable
// suggestion. The CLI prints these instead of a generic tip list.

use crate::error::SastraError;

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
}

/// Convert a `SastraError` into a `HumanError` with a concrete next step.
pub fn humanize_error(err: &SastraError) -> HumanError {
    match err {
        SastraError::InputNotFound(path) => HumanError {
            message: "The PDF file could not be found.".into(),
            suggestion: format!("Check that {path} exists and the path is spelled correctly."),
        },

        SastraError::OcrUnavailable(_) => HumanError {
            message: "Tesseract is not installed or not in PATH.".into(),
            suggestion: "Install it from https://github.com/tesseract-ocr/tesseract and make \
                         sure the `tesseract` binary is on your PATH."
                .into(),
        },

        SastraError::LanguageMissing(detail) => HumanError {
            message: "The required Tesseract language pack is not installed.".into(),
            suggestion: format!(
                "Download the language's .traineddata file (for Khmer: khm.traineddata from \
                 https://github.com/tesseract-ocr/tessdata) and place it in Tesseract's \
                 tessdata directory. ({detail})"
            ),
        },

        SastraError::Raster(detail) => HumanError {
            message: "The PDF pages could not be converted to images.".into(),
            suggestion: format!(
                "Make sure poppler-utils is installed so the `pdftoppm` tool is available, \
                 and check that the PDF is not corrupted. ({detail})"
            ),
        },

        SastraError::Ocr(detail) => HumanError {
            message: "Text recognition failed.".into(),
            suggestion: format!(
                "Re-run with a higher --dpi, or check the Tesseract installation. ({detail})"
            ),
        },

        SastraError::TextLayer(detail) => HumanError {
            message: "The PDF could not be read.".into(),
            suggestion: format!(
                "The file may be damaged. Try opening it in a PDF viewer to check it works. \
                 ({detail})"
            ),
        },

        SastraError::Image(detail) => HumanError {
            message: "A rendered page image could not be processed.".into(),
            suggestion: format!("Re-run the extraction; if it persists, report it. ({detail})"),
        },

        SastraError::Io(detail) => HumanError {
            message: "A file could not be read or written.".into(),
            suggestion: format!("Check permissions and free disk space. ({detail})"),
        },
    }
}
