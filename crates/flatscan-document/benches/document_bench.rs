// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the flatscan-document crate: the full scan
// pipeline on a synthetic photo, and the contrast stretch on its own.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use flatscan_core::ScanConfig;
use flatscan_document::Scanner;
use flatscan_document::scan::stretch_contrast;

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Dark 800x1000 frame with a bright page from (100, 120) to (700, 880).
fn synthetic_photo() -> DynamicImage {
    let mut img = RgbImage::from_pixel(800, 1000, Rgb([30, 30, 30]));
    for y in 120..880 {
        for x in 100..700 {
            img.put_pixel(x, y, Rgb([240, 235, 225]));
        }
    }
    DynamicImage::ImageRgb8(img)
}

/// Detection plus a 100 ppi A4 warp, without and with the contrast stretch.
fn bench_scan_pipeline(c: &mut Criterion) {
    let photo = synthetic_photo();

    let plain = Scanner::with_config(ScanConfig {
        ppi: 100,
        ..ScanConfig::default()
    });
    c.bench_function("scan (800x1000 -> A4 @ 100ppi)", |b| {
        b.iter(|| black_box(plain.scan(black_box(&photo)).map(|o| o.page)));
    });

    let adjusted = Scanner::with_config(ScanConfig {
        ppi: 100,
        adjust: true,
        ..ScanConfig::default()
    });
    c.bench_function("scan + adjust (800x1000 -> A4 @ 100ppi)", |b| {
        b.iter(|| black_box(adjusted.scan(black_box(&photo)).map(|o| o.page)));
    });
}

fn bench_contrast_stretch(c: &mut Criterion) {
    let page = RgbImage::from_fn(827, 1170, |x, y| {
        Rgb([(60 + x % 120) as u8, (40 + y % 150) as u8, ((x + y) % 256) as u8])
    });

    c.bench_function("stretch_contrast (827x1170)", |b| {
        b.iter(|| black_box(stretch_contrast(black_box(&page), 1)));
    });
}

criterion_group!(benches, bench_scan_pipeline, bench_contrast_stretch);
criterion_main!(benches);
