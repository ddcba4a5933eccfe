// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tesseract engine wrapper — drives the external `tesseract` binary for
// page recognition, with availability and language-pack preflight.
//
// Language packs are installable .traineddata files in Tesseract's tessdata
// directory; the Khmer pack is `khm`. The wrapper never assumes a pack is
// present — `preflight` probes the binary and its installed languages before
// the pipeline commits to OCR.

use std::path::Path;
use std::process::Command;

use sastra_core::config::PageSegMode;
use sastra_core::error::{Result, SastraError};
use tracing::{debug, instrument};

/// Sastra OCR engine — recognizes text on prepared page images.
///
/// The engine is configured once with a language and page-segmentation mode
/// and reused for every page of a document.
pub struct TesseractEngine {
    /// Tesseract language code (ISO 639-2), e.g. `khm`.
    language: String,
    /// Page-segmentation mode passed as `--psm`.
    segmentation: PageSegMode,
}

impl TesseractEngine {
    /// Create an engine for `language` with the given segmentation mode.
    pub fn new(language: impl Into<String>, segmentation: PageSegMode) -> Self {
        Self {
            language: language.into(),
            segmentation,
        }
    }

    // -- Availability ---------------------------------------------------------

    /// Probe the installed Tesseract version.
    ///
    /// Returns the first line of the version banner. Tesseract 4.x prints it
    /// to stderr, 5.x to stdout; both are accepted.
    pub fn version() -> Result<String> {
        let output = Command::new("tesseract")
            .arg("--version")
            .output()
            .map_err(|err| {
                SastraError::OcrUnavailable(format!(
                    "tesseract not installed or not in PATH: {}",
                    err
                ))
            })?;

        if !output.status.success() {
            return Err(SastraError::OcrUnavailable(format!(
                "`tesseract --version` exited with {}",
                output.status
            )));
        }

        let banner = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };

        Ok(banner.lines().next().unwrap_or_default().trim().to_string())
    }

    /// List the installed language packs via `tesseract --list-langs`.
    pub fn available_languages() -> Result<Vec<String>> {
        let output = Command::new("tesseract")
            .arg("--list-langs")
            .output()
            .map_err(|err| {
                SastraError::OcrUnavailable(format!(
                    "tesseract not installed or not in PATH: {}",
                    err
                ))
            })?;

        if !output.status.success() {
            return Err(SastraError::OcrUnavailable(format!(
                "`tesseract --list-langs` exited with {}",
                output.status
            )));
        }

        // Older Tesseract prints the listing to stderr, newer to stdout.
        let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
        listing.push('\n');
        listing.push_str(&String::from_utf8_lossy(&output.stderr));

        Ok(parse_language_list(&listing))
    }

    /// Verify the engine is installed and the configured language pack is
    /// present. Called once per extraction, before any strategy runs.
    #[instrument(skip(self), fields(language = %self.language))]
    pub fn preflight(&self) -> Result<()> {
        let version = Self::version()?;
        debug!(%version, "Tesseract detected");

        let languages = Self::available_languages()?;
        if !languages.iter().any(|lang| lang == &self.language) {
            return Err(SastraError::LanguageMissing(format!(
                "language pack '{}' is not installed (available: {})",
                self.language,
                languages.join(", ")
            )));
        }

        Ok(())
    }

    // -- Recognition ----------------------------------------------------------

    /// Recognize the text of one prepared page image.
    #[instrument(skip(self), fields(image = %image_path.display()))]
    pub fn recognize_page(&self, image_path: &Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.segmentation.as_flag())
            .output()
            .map_err(|err| SastraError::Ocr(format!("failed to run tesseract: {}", err)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SastraError::Ocr(format!(
                "tesseract failed on {}: {}",
                image_path.display(),
                stderr.trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|err| SastraError::Ocr(format!("tesseract produced invalid UTF-8: {}", err)))
    }
}

/// Parse `--list-langs` output into language codes.
///
/// The listing is a banner line ("List of available languages (3):")
/// followed by one code per line; warnings about missing config files may be
/// interleaved. Keep only single-token lines.
fn parse_language_list(listing: &str) -> Vec<String> {
    listing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| !line.contains(' ') && !line.ends_with(':'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_listing() {
        let listing = "List of available languages (3):\neng\nkhm\nosd\n";
        assert_eq!(parse_language_list(listing), vec!["eng", "khm", "osd"]);
    }

    #[test]
    fn parses_listing_with_warnings() {
        let listing = "Warning: could not load any config\n\
                       List of available languages in \"/usr/share/tessdata/\" (2):\n\
                       eng\n\
                       khm\n";
        assert_eq!(parse_language_list(listing), vec!["eng", "khm"]);
    }

    #[test]
    fn empty_listing_yields_no_languages() {
        assert!(parse_language_list("").is_empty());
        assert!(parse_language_list("List of available languages (0):\n").is_empty());
    }

    #[test]
    fn missing_language_error_names_the_pack() {
        // Only run the real preflight when a tesseract binary exists; the
        // point here is the error message for a pack that cannot exist.
        if TesseractEngine::version().is_err() {
            eprintln!("tesseract not available, skipping");
            return;
        }

        let engine = TesseractEngine::new("zzz-no-such-pack", PageSegMode::Auto);
        match engine.preflight() {
            Err(SastraError::LanguageMissing(detail)) => {
                assert!(detail.contains("zzz-no-such-pack"));
            }
            other => panic!("expected LanguageMissing, got {other:?}"),
        }
    }
}
