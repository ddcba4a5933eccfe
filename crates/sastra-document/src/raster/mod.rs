// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page rasterization — renders every PDF page to a PNG image using the
// poppler `pdftoppm` tool, into a temp directory scoped to the result.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use sastra_core::error::{Result, SastraError};
use tempfile::TempDir;
use tracing::{debug, info, instrument};

/// One rendered page image.
#[derive(Debug)]
pub struct RasterizedPage {
    /// 1-indexed page number as reported by pdftoppm's file naming.
    pub number: u32,
    /// Path of the PNG inside the scoped temp directory.
    pub path: PathBuf,
}

/// All rendered pages of a document, in page order.
///
/// Holds the temp directory the images live in; dropping this removes them,
/// on the error path as well as on success.
#[derive(Debug)]
pub struct RasterizedPages {
    _dir: TempDir,
    /// Rendered pages sorted by page number.
    pub pages: Vec<RasterizedPage>,
}

/// Renders PDF pages to images via `pdftoppm`.
pub struct PageRasterizer {
    /// Render resolution in dots per inch.
    dpi: u32,
}

impl PageRasterizer {
    /// Create a rasterizer rendering at `dpi` dots per inch.
    pub fn new(dpi: u32) -> Self {
        Self { dpi }
    }

    /// Render every page of `path` to a PNG.
    ///
    /// Any failure here is terminal for the extraction: there is no cheaper
    /// strategy left to fall back to, so the error carries the tool's stderr.
    #[instrument(skip(self), fields(path = %path.display(), dpi = self.dpi))]
    pub fn rasterize(&self, path: &Path) -> Result<RasterizedPages> {
        let dir = tempfile::Builder::new()
            .prefix("sastra-pages-")
            .tempdir()
            .map_err(SastraError::Io)?;
        let prefix = dir.path().join("page");

        debug!("Running pdftoppm");
        let output = Command::new("pdftoppm")
            .arg("-png")
            .arg("-r")
            .arg(self.dpi.to_string())
            .arg(path)
            .arg(&prefix)
            .output()
            .map_err(|err| SastraError::Raster(format!("failed to run pdftoppm: {}", err)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SastraError::Raster(format!(
                "pdftoppm failed on {}: {}",
                path.display(),
                stderr.trim()
            )));
        }

        let pages = collect_page_images(dir.path())?;
        if pages.is_empty() {
            return Err(SastraError::Raster(
                "pdftoppm produced no page images".to_string(),
            ));
        }

        info!(pages = pages.len(), "Rasterized PDF pages");
        Ok(RasterizedPages { _dir: dir, pages })
    }
}

/// Collect the `page-N.png` files pdftoppm generated in `dir`, ordered
/// numerically so page 10 sorts after page 9 (lexicographic order would not).
fn collect_page_images(dir: &Path) -> Result<Vec<RasterizedPage>> {
    let mut pages = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("png") {
            continue;
        }
        if let Some(number) = page_number(&path) {
            pages.push(RasterizedPage { number, path });
        }
    }

    pages.sort_by_key(|page| page.number);
    Ok(pages)
}

/// Parse the page number out of a pdftoppm output name (`page-12.png` → 12).
fn page_number(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let (_, digits) = stem.rsplit_once('-')?;
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_parses_pdftoppm_names() {
        assert_eq!(page_number(Path::new("/tmp/x/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("/tmp/x/page-12.png")), Some(12));
        // Zero-padded names (pdftoppm pads for multi-digit page counts).
        assert_eq!(page_number(Path::new("/tmp/x/page-007.png")), Some(7));
    }

    #[test]
    fn page_number_rejects_unrelated_names() {
        assert_eq!(page_number(Path::new("/tmp/x/page.png")), None);
        assert_eq!(page_number(Path::new("/tmp/x/page-abc.png")), None);
    }

    #[test]
    fn collect_orders_pages_numerically() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["page-10.png", "page-2.png", "page-1.png", "notes.txt"] {
            fs::write(dir.path().join(name), b"").expect("touch");
        }

        let pages = collect_page_images(dir.path()).expect("collects");
        let numbers: Vec<u32> = pages.iter().map(|p| p.number).collect();
        assert_eq!(numbers, vec![1, 2, 10]);
    }

    #[test]
    fn collect_ignores_non_page_pngs() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("cover.png"), b"").expect("touch");
        fs::write(dir.path().join("page-3.png"), b"").expect("touch");

        let pages = collect_page_images(dir.path()).expect("collects");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].number, 3);
    }
}
