// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF text-layer reader — pulls text directly from a PDF's embedded,
// selectable content using the `lopdf` crate.

use std::path::Path;

use lopdf::Document;
use sastra_core::error::{Result, SastraError};
use tracing::{debug, info, instrument};

/// Reads the embedded text layer of an existing PDF.
///
/// Wraps `lopdf::Document` and provides per-page and whole-document text
/// extraction. Whether the text it returns is *usable* is a separate question
/// answered by the Khmer-run heuristic in the pipeline; scanned PDFs typically
/// yield little or nothing here.
pub struct TextLayerReader {
    /// The underlying lopdf document.
    document: Document,
}

impl TextLayerReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    ///
    /// Encrypted documents get one empty-password decryption attempt; many
    /// PDFs in the wild are "encrypted" only with owner restrictions.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let mut document = Document::load(path_ref).map_err(|err| {
            SastraError::TextLayer(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        if document.is_encrypted() {
            debug!("PDF is encrypted, attempting empty-password decryption");
            document.decrypt("").map_err(|err| {
                SastraError::TextLayer(format!(
                    "failed to decrypt {}: {}",
                    path_ref.display(),
                    err
                ))
            })?;
        }

        debug!(pages = document.get_pages().len(), "PDF loaded");
        Ok(Self { document })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            SastraError::TextLayer(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");
        Ok(Self { document })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    // -- Extraction -----------------------------------------------------------

    /// Extract the embedded text of a single page (1-indexed).
    pub fn page_text(&self, page_number: u32) -> Result<String> {
        self.document.extract_text(&[page_number]).map_err(|err| {
            SastraError::TextLayer(format!(
                "text extraction failed on page {}: {}",
                page_number, err
            ))
        })
    }

    /// Concatenate every page's embedded text in page order, each page
    /// followed by a blank-line separator.
    #[instrument(skip(self))]
    pub fn all_text(&self) -> Result<String> {
        let pages = self.document.get_pages();
        let mut page_numbers: Vec<u32> = pages.keys().copied().collect();
        page_numbers.sort_unstable();

        let mut text = String::new();
        for page_number in page_numbers {
            text.push_str(&self.page_text(page_number)?);
            text.push_str("\n\n");
        }

        debug!(chars = text.len(), "Text layer extracted");
        Ok(text)
    }
}
