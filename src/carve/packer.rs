//! Channel packing
//!
//! Reinterprets a raw byte buffer as a row-major pixel grid and reorders
//! the tagged channels into a canonical RGB or RGBA image.

use image::{DynamicImage, RgbImage, RgbaImage};

use crate::carve::errors::{CarveError, CarveResult};
use crate::carve::layout::ChannelLayout;

/// Decode a raw chunk into an RGB(A) image
///
/// The byte at `(y * width + x) * bpp + c` is channel `c` of pixel `(x, y)`.
/// Missing trailing bytes decode as zero; bytes past the end of the grid
/// are ignored. Padding channels never reach the output.
///
/// # Arguments
/// * `data` - Raw chunk bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `layout` - Channel layout of a pixel in `data`
///
/// # Returns
/// An `ImageRgba8` when the layout has alpha, otherwise an `ImageRgb8`
pub fn pack_channels(
    data: &[u8],
    width: u32,
    height: u32,
    layout: &ChannelLayout,
) -> CarveResult<DynamicImage> {
    let bpp = layout.bytes_per_pixel();
    let plan = layout.plan();
    let out_channels = plan.len();
    let too_large = || {
        CarveError::InvalidArgument(format!("{}x{} {} image is too large", width, height, layout))
    };
    let pixel_count = (width as usize).checked_mul(height as usize).ok_or_else(too_large)?;
    let output_len = pixel_count.checked_mul(out_channels).ok_or_else(too_large)?;
    // every source offset below stays under pixel_count * bpp
    pixel_count.checked_mul(bpp).ok_or_else(too_large)?;

    let mut pixels = vec![0u8; output_len];
    for (index, out) in pixels.chunks_exact_mut(out_channels).enumerate() {
        let base = index * bpp;
        for (slot, &source) in out.iter_mut().zip(plan) {
            *slot = data.get(base + source).copied().unwrap_or(0);
        }
    }

    let image = if layout.has_alpha() {
        RgbaImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgba8)
    } else {
        RgbImage::from_raw(width, height, pixels).map(DynamicImage::ImageRgb8)
    };

    image.ok_or_else(|| {
        CarveError::GenericError(format!(
            "Pixel buffer does not match {}x{} {} image",
            width, height, layout
        ))
    })
}
