// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast stretch — per-channel linear intensity remap with histogram tail
// trimming.

use image::RgbImage;
use tracing::{debug, instrument};

/// Inclusive intensity range `[low, high]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntensityRange {
    pub low: u8,
    pub high: u8,
}

impl IntensityRange {
    pub const FULL: IntensityRange = IntensityRange { low: 0, high: 255 };
}

/// Stretch each channel of `image` independently.
///
/// `tolerance` is the percentage of pixels trimmed from each histogram tail
/// when picking the input range; it is clamped to 0..=100. A tolerance of 0
/// keeps the full input range, which makes the stretch an identity.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn stretch_contrast(image: &RgbImage, tolerance: u8) -> RgbImage {
    let mut output = image.clone();

    for channel in 0..3 {
        let input = if tolerance > 0 {
            input_range(&channel_histogram(image, channel), tolerance)
        } else {
            IntensityRange::FULL
        };
        let lut = stretch_table(input, IntensityRange::FULL);
        debug!(channel, in_low = input.low, in_high = input.high, "Channel stretched");

        for pixel in output.pixels_mut() {
            pixel.0[channel] = lut[usize::from(pixel.0[channel])];
        }
    }

    output
}

/// 256-bin histogram of one channel.
pub fn channel_histogram(image: &RgbImage, channel: usize) -> [u64; 256] {
    let mut histogram = [0u64; 256];
    for pixel in image.pixels() {
        histogram[usize::from(pixel.0[channel])] += 1;
    }
    histogram
}

/// Input range with `tolerance` percent trimmed from each tail.
///
/// Each bound is the smallest intensity whose cumulative count reaches
/// `total * tol / 100` (low) or `total * (100 - tol) / 100` (high).
pub fn input_range(histogram: &[u64; 256], tolerance: u8) -> IntensityRange {
    let tol = u64::from(tolerance.min(100));

    let mut cumulative = [0u64; 256];
    let mut running = 0u64;
    for (slot, &count) in cumulative.iter_mut().zip(histogram.iter()) {
        running += count;
        *slot = running;
    }

    let total = running;
    let low_bound = total * tol / 100;
    let upp_bound = total * (100 - tol) / 100;
    let first_reaching = |bound: u64| cumulative.partition_point(|&c| c < bound).min(255) as u8;

    IntensityRange {
        low: first_reaching(low_bound),
        high: first_reaching(upp_bound),
    }
}

/// Lookup table for `v' = clamp(round((v - in.low) * scale) + out.low, out.low, out.high)`.
///
/// Values below `input.low` map to `output.low`. A collapsed input range
/// (`low == high`) uses a scale of zero and an inverted one (`low > high`,
/// from trimming 50% or more) a negative scale; either way every value maps
/// to `output.low`.
pub fn stretch_table(input: IntensityRange, output: IntensityRange) -> [u8; 256] {
    let in_span = f32::from(input.high) - f32::from(input.low);
    let out_span = f32::from(output.high) - f32::from(output.low);
    let scale = if in_span == 0.0 { 0.0 } else { out_span / in_span };

    let mut table = [0u8; 256];
    for (value, slot) in table.iter_mut().enumerate() {
        let shifted = (value as f32 - f32::from(input.low)).max(0.0);
        let mapped = (shifted * scale).round() + f32::from(output.low);
        *slot = mapped.clamp(f32::from(output.low), f32::from(output.high)) as u8;
    }
    table
}
