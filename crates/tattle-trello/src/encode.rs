// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JPEG encoding of screenshots.

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use tattle_core::SendError;

/// Quality used when none is configured, on a `0.0..=1.0` scale.
pub const DEFAULT_JPEG_QUALITY: f32 = 0.8;

/// Maps a `0.0..=1.0` quality onto the encoder's `1..=100` scale.
pub fn quality_percent(quality: f32) -> u8 {
    if quality.is_nan() {
        return quality_percent(DEFAULT_JPEG_QUALITY);
    }
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Encodes `image` as a baseline JPEG. Any alpha channel is discarded.
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>, SendError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(SendError::ImageEncodingFailed {
            reason: format!("image is {}x{}", image.width(), image.height()),
        });
    }

    let rgb = image.to_rgb8();
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, quality)
        .encode(rgb.as_raw(), rgb.width(), rgb.height(), ColorType::Rgb8)
        .map_err(|e| SendError::ImageEncodingFailed {
            reason: e.to_string(),
        })?;
    Ok(buf)
}
