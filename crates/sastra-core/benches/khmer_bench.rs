// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the Khmer-script run scanner.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use sastra_core::khmer::khmer_run_count;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Benchmark run counting over a synthetic mixed Khmer/Latin document.
///
/// The input interleaves Khmer phrases with Latin filler the way a real
/// extracted text layer does (headers, numbers, page furniture), repeated to
/// roughly the size of a short report. This is the hot path of the strategy
/// selector: every extraction scans the whole text layer exactly once.
fn bench_khmer_run_count(c: &mut Criterion) {
    let paragraph = "របាយការណ៍ប្រចាំឆ្នាំ Annual Report 2025 — page 7\n\
                     ព្រះរាជាណាចក្រកម្ពុជា Kingdom of Cambodia\n\
                     total: 1,024.50 USD សរុប\n";
    let document: String = paragraph.repeat(200);

    c.bench_function("khmer_run_count (mixed ~60KB)", |b| {
        b.iter(|| khmer_run_count(black_box(&document)));
    });
}

criterion_group!(benches, bench_khmer_run_count);
criterion_main!(benches);
