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

use crate::gaussian::engine::GaussianBlur;
use crate::gaussian::params::{GaussianBlurParams, DEFAULT_EPSILON};
use crate::{BlurError, BlurImage, BlurImageMut, FastBlurChannels};

/// Creates a gaussian blur for images of the given layout.
///
/// # Arguments
///
/// * `channels` - Count of interleaved channels, from 1 to 4
/// * `sigma` - Standard deviation of the kernel
/// * `epsilon` - Relative weight below which taps are dropped, [DEFAULT_EPSILON] if `None`
///
/// Returns `None` when the configuration is invalid.
pub fn create_gaussian_blur(
    width: usize,
    height: usize,
    channels: usize,
    sigma: f32,
    epsilon: Option<f32>,
) -> Option<GaussianBlur> {
    let channels = FastBlurChannels::try_from(channels).ok()?;
    let params = GaussianBlurParams::new(width, height, channels, sigma)
        .with_epsilon(epsilon.unwrap_or(DEFAULT_EPSILON));
    match GaussianBlur::new(params) {
        Ok(blur) => Some(blur),
        Err(err) => {
            log::debug!("Gaussian blur was not created: {err}");
            None
        }
    }
}

/// Performs gaussian blur on the image.
///
/// Builds a one-shot [GaussianBlur] for `src` layout, prefer keeping a
/// [GaussianBlur] when many images of the same size are processed.
///
/// # Arguments
///
/// * `sigma` - Standard deviation of the kernel
/// * `epsilon` - Relative weight below which taps are dropped, [DEFAULT_EPSILON] if `None`
pub fn gaussian_blur(
    src: &BlurImage<'_>,
    dst: &mut BlurImageMut<'_>,
    sigma: f32,
    epsilon: Option<f32>,
) -> Result<(), BlurError> {
    src.check_layout()?;
    let params = GaussianBlurParams::new(src.width, src.height, src.channels, sigma)
        .with_epsilon(epsilon.unwrap_or(DEFAULT_EPSILON));
    let mut blur = GaussianBlur::new(params)?;
    blur.blur_image(src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_rejects_invalid_configuration() {
        assert!(create_gaussian_blur(0, 10, 3, 1., None).is_none());
        assert!(create_gaussian_blur(10, 0, 3, 1., None).is_none());
        assert!(create_gaussian_blur(10, 10, 0, 1., None).is_none());
        assert!(create_gaussian_blur(10, 10, 5, 1., None).is_none());
        assert!(create_gaussian_blur(10, 10, 3, 0., None).is_none());
        assert!(create_gaussian_blur(10, 10, 3, 1e-7, None).is_none());
        assert!(create_gaussian_blur(10, 10, 3, 1., Some(1e-7)).is_none());
        assert!(create_gaussian_blur(10, 10, 3, f32::NAN, None).is_none());
        assert!(create_gaussian_blur(8, 8, 1, 1e20, None).is_none());
        assert!(create_gaussian_blur(8, 8, 1, f32::INFINITY, None).is_none());

        let blur = create_gaussian_blur(10, 10, 3, 1., None).unwrap();
        assert_eq!(blur.params().epsilon, DEFAULT_EPSILON);
        assert_eq!(blur.kernel().len(), 5);
    }

    #[test]
    fn test_gaussian_blur_image_views() {
        let width = 20usize;
        let height = 10usize;
        let mut data = vec![0u8; width * height];
        data[5 * width + 10] = 255;
        let src = BlurImage::borrow(&data, width, height, FastBlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        gaussian_blur(&src, &mut dst, 1.5, None).unwrap();
        let out = dst.data.borrow();
        let center = out[5 * width + 10];
        assert!(center > 0 && center < 255);
        assert_eq!(out[5 * width + 9], out[5 * width + 11]);
        assert_eq!(out[4 * width + 10], out[6 * width + 10]);
        assert_eq!(out[0], 0);

        let mut small = vec![0u8; 3];
        let mut wrong = BlurImageMut::borrow(&mut small, 3, 1, FastBlurChannels::Plane);
        assert!(gaussian_blur(&src, &mut wrong, 1.5, None).is_err());
    }
}
