// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::{gaussian_blur, BlurImage, BlurImageMut, FastBlurChannels};
use image::{DynamicImage, GrayAlphaImage, GrayImage, RgbImage, RgbaImage};

fn blur_raw(
    raw: &[u8],
    width: u32,
    height: u32,
    channels: FastBlurChannels,
    sigma: f32,
    epsilon: Option<f32>,
) -> Option<Vec<u8>> {
    let (width, height) = (width as usize, height as usize);
    let src = BlurImage::borrow(raw, width, height, channels);
    let mut dst = BlurImageMut::alloc(width, height, channels).ok()?;
    if let Err(err) = gaussian_blur(&src, &mut dst, sigma, epsilon) {
        log::debug!("Gaussian blur of {width}x{height} image failed: {err}");
        return None;
    }
    Some(dst.into_vec())
}

/// Performs gaussian blur on the image
///
/// NOTE: Alpha must be associated if this image with alpha
///
/// Supports 8-bit luma, luma with alpha, RGB and RGBA images,
/// `None` is returned for other formats and for invalid `sigma` or `epsilon`.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `sigma` - Standard deviation of the kernel.
/// * `epsilon` - Relative weight below which taps are dropped, default if `None`.
#[must_use]
pub fn gaussian_blur_image(
    image: DynamicImage,
    sigma: f32,
    epsilon: Option<f32>,
) -> Option<DynamicImage> {
    match image {
        DynamicImage::ImageLuma8(gray) => {
            let (width, height) = gray.dimensions();
            let data = blur_raw(&gray, width, height, FastBlurChannels::Plane, sigma, epsilon)?;
            Some(DynamicImage::ImageLuma8(GrayImage::from_raw(
                width, height, data,
            )?))
        }
        DynamicImage::ImageLumaA8(luma_alpha) => {
            let (width, height) = luma_alpha.dimensions();
            let data = blur_raw(
                &luma_alpha,
                width,
                height,
                FastBlurChannels::Channels2,
                sigma,
                epsilon,
            )?;
            Some(DynamicImage::ImageLumaA8(GrayAlphaImage::from_raw(
                width, height, data,
            )?))
        }
        DynamicImage::ImageRgb8(rgb) => {
            let (width, height) = rgb.dimensions();
            let data = blur_raw(
                &rgb,
                width,
                height,
                FastBlurChannels::Channels3,
                sigma,
                epsilon,
            )?;
            Some(DynamicImage::ImageRgb8(RgbImage::from_raw(
                width, height, data,
            )?))
        }
        DynamicImage::ImageRgba8(rgba) => {
            let (width, height) = rgba.dimensions();
            let data = blur_raw(
                &rgba,
                width,
                height,
                FastBlurChannels::Channels4,
                sigma,
                epsilon,
            )?;
            Some(DynamicImage::ImageRgba8(RgbaImage::from_raw(
                width, height, data,
            )?))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};

    #[test]
    fn test_blur_dynamic_image() {
        let rgb = RgbImage::from_pixel(9, 6, Rgb([10, 120, 250]));
        let blurred = gaussian_blur_image(DynamicImage::ImageRgb8(rgb.clone()), 1.5, None).unwrap();
        assert_eq!(blurred.as_rgb8().unwrap(), &rgb);

        let mut rgba = RgbaImage::from_pixel(9, 6, Rgba([0, 0, 0, 255]));
        rgba.put_pixel(4, 3, Rgba([255, 255, 255, 255]));
        let blurred = gaussian_blur_image(DynamicImage::ImageRgba8(rgba), 1., None).unwrap();
        let blurred = blurred.as_rgba8().unwrap();
        assert_eq!(blurred.get_pixel(3, 3), blurred.get_pixel(5, 3));
        assert_eq!(blurred.get_pixel(0, 0)[3], 255);

        let gray = DynamicImage::ImageLuma8(GrayImage::new(4, 4));
        assert!(gaussian_blur_image(gray.clone(), 0., None).is_none());
        assert!(gaussian_blur_image(gray.to_luma16().into(), 1., None).is_none());
    }
}
