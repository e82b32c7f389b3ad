// SPDX-FileCopyrightText: 2026 Tattle Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Screenshot and payload fixtures.

use image::{DynamicImage, Rgba, RgbaImage};
use tattle_core::{FeedbackPayload, Screenshot};

/// A `size`×`size` opaque red image.
pub fn red_image(size: u32) -> DynamicImage {
    solid_image(size, size, [255, 0, 0, 255])
}

pub fn solid_image(width: u32, height: u32, rgba: [u8; 4]) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba(rgba)))
}

/// A payload whose only content is a red square.
pub fn red_payload(size: u32) -> FeedbackPayload {
    FeedbackPayload::new(Screenshot::new(red_image(size)))
}

/// A red original with a differently sized green annotation.
pub fn annotated_payload() -> FeedbackPayload {
    FeedbackPayload::new(
        Screenshot::new(red_image(8)).with_annotated(solid_image(12, 6, [0, 255, 0, 255])),
    )
}

/// A payload whose image has no pixels and therefore cannot be encoded.
pub fn empty_payload() -> FeedbackPayload {
    FeedbackPayload::new(Screenshot::new(DynamicImage::ImageRgba8(RgbaImage::new(0, 0))))
}

/// Whether `needle` occurs anywhere in `haystack`.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    position(haystack, needle).is_some()
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
pub fn position(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
