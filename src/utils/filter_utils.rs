//! Degenerate image filtering
//!
//! This module decides whether a decoded chunk carries any information.
//! A chunk whose every channel is constant across all pixels (a single flat
//! colour, including all black) is treated as noise and never written.

use image::DynamicImage;
use log::debug;

/// Compute the (min, max) value of every channel of an 8-bit image
///
/// # Arguments
/// * `image` - The image to inspect
///
/// # Returns
/// One `(min, max)` pair per channel, in channel order. An image without
/// pixels yields `(u8::MAX, u8::MIN)` for every channel.
pub fn channel_extrema(image: &DynamicImage) -> Vec<(u8, u8)> {
    let channels = image.color().channel_count() as usize;
    let mut extrema = vec![(u8::MAX, u8::MIN); channels];

    for pixel in image.as_bytes().chunks_exact(channels) {
        for (range, &value) in extrema.iter_mut().zip(pixel) {
            range.0 = range.0.min(value);
            range.1 = range.1.max(value);
        }
    }

    extrema
}

/// Check whether raw bytes hold at most one distinct value
///
/// An empty slice counts as uniform.
pub fn is_uniform(bytes: &[u8]) -> bool {
    match bytes.split_first() {
        Some((first, rest)) => rest.iter().all(|b| b == first),
        None => true,
    }
}

/// Check whether every channel of the image holds a single value
///
/// Empty images are degenerate as well.
pub fn is_degenerate(image: &DynamicImage) -> bool {
    if image.width() == 0 || image.height() == 0 {
        return true;
    }

    let extrema = channel_extrema(image);
    let flat = extrema.iter().all(|(min, max)| min == max);
    if flat {
        debug!("Flat image, channel extrema: {:?}", extrema);
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{RgbImage, RgbaImage, Rgb, Rgba};

    #[test]
    fn test_flat_image_is_degenerate() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 3, Rgb([0x7F, 0x7F, 0x7F])));
        assert!(is_degenerate(&image));
        assert_eq!(channel_extrema(&image), vec![(0x7F, 0x7F); 3]);
    }

    #[test]
    fn test_black_image_is_degenerate() {
        let image = DynamicImage::ImageRgba8(RgbaImage::new(8, 8));
        assert!(is_degenerate(&image));
    }

    #[test]
    fn test_single_varying_channel_passes() {
        let mut image = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        image.put_pixel(1, 1, Rgba([10, 20, 30, 254]));
        let image = DynamicImage::ImageRgba8(image);

        assert!(!is_degenerate(&image));
        assert_eq!(channel_extrema(&image), vec![(10, 10), (20, 20), (30, 30), (254, 255)]);
    }

    #[test]
    fn test_distinct_flat_channels_are_degenerate() {
        // A flat non-grey colour is still a single colour
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(3, 3, Rgb([1, 2, 3])));
        assert!(is_degenerate(&image));
    }

    #[test]
    fn test_uniform_bytes() {
        assert!(is_uniform(&[]));
        assert!(is_uniform(&[0x7F]));
        assert!(is_uniform(&[0x7F; 100]));
        assert!(!is_uniform(&[0x7F, 0x7F, 0x00]));
    }

    #[test]
    fn test_empty_image_is_degenerate() {
        let image = DynamicImage::ImageRgb8(RgbImage::new(0, 0));
        assert!(is_degenerate(&image));
    }
}
