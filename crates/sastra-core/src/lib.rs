// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sastra — Core types, errors, and Khmer-script heuristics shared across all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod khmer;

pub use config::{ExtractionOptions, PageSegMode};
pub use error::{Result, SastraError};
