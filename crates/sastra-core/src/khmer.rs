// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Khmer-script detection heuristics.
//
// A "run" is a maximal substring whose code points all fall in the Khmer
// Unicode block (U+1780–U+17FF). The run count over a PDF's text layer is
// what decides whether the document is text-based or needs OCR.

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches one maximal run of Khmer-block code points.
static KHMER_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\u{1780}-\u{17FF}]+").expect("Khmer run pattern is valid"));

/// Whether `ch` falls in the Khmer Unicode block.
pub fn is_khmer(ch: char) -> bool {
    ('\u{1780}'..='\u{17FF}').contains(&ch)
}

/// Count the maximal runs of Khmer-script code points in `text`.
pub fn khmer_run_count(text: &str) -> usize {
    KHMER_RUN.find_iter(text).count()
}

/// Decide whether text-layer content is substantial enough to treat the PDF
/// as text-based: strictly more than `threshold` Khmer runs accepts the
/// layer; anything else routes the document to OCR.
pub fn has_enough_khmer(text: &str, threshold: usize) -> bool {
    khmer_run_count(text) > threshold
}
