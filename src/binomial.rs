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

use crate::util::check_slice_size;
use crate::{BlurError, BlurImage, BlurImageMut, FastBlurChannels};

/// `src[x - 1] + 2 * src[x] + src[x + 1]` per channel, border pixels replicated.
fn horizontal_sums<const CN: usize>(src: &[u8], width: usize, dst: &mut [u16]) {
    for x in 0..width {
        let left = x.saturating_sub(1) * CN;
        let right = (x + 1).min(width - 1) * CN;
        let center = x * CN;
        for c in 0..CN {
            dst[center + c] = src[left + c] as u16
                + 2 * src[center + c] as u16
                + src[right + c] as u16;
        }
    }
}

#[inline]
fn source_row(src: &[u8], stride: usize, row_size: usize, y: usize) -> &[u8] {
    &src[y * stride..y * stride + row_size]
}

fn blur_3x3_impl<const CN: usize>(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
) {
    let row_size = width * CN;

    // Sums of rows y - 1, y and y + 1
    let mut sums = [
        vec![0u16; row_size],
        vec![0u16; row_size],
        vec![0u16; row_size],
    ];
    let first = source_row(src, src_stride, row_size, 0);
    horizontal_sums::<CN>(first, width, &mut sums[1]);
    let (head, tail) = sums.split_at_mut(1);
    head[0].copy_from_slice(&tail[0]);
    let second = source_row(src, src_stride, row_size, 1.min(height - 1));
    horizontal_sums::<CN>(second, width, &mut sums[2]);

    for y in 0..height {
        let dst_row = &mut dst[y * dst_stride..y * dst_stride + row_size];
        for (((dst, &top), &mid), &bottom) in dst_row
            .iter_mut()
            .zip(sums[0].iter())
            .zip(sums[1].iter())
            .zip(sums[2].iter())
        {
            *dst = ((top + 2 * mid + bottom + 8) >> 4) as u8;
        }

        sums.rotate_left(1);
        if y + 2 < height {
            let next = source_row(src, src_stride, row_size, y + 2);
            horizontal_sums::<CN>(next, width, &mut sums[2]);
        } else {
            let (head, tail) = sums.split_at_mut(2);
            tail[0].copy_from_slice(&head[1]);
        }
    }
}

/// Performs gaussian blur with fixed binomial 3x3 kernel.
///
/// Every point is `(src[x-1, y-1] + 2*src[x, y-1] + src[x+1, y-1] +
/// 2*(src[x-1, y] + 2*src[x, y] + src[x+1, y]) +
/// src[x-1, y+1] + 2*src[x, y+1] + src[x+1, y+1] + 8) / 16`,
/// pixels outside the image repeat the nearest border pixel.
///
/// # Arguments
///
/// * `src_stride`, `dst_stride` - Row length in bytes, at least `width * channels`
pub fn gaussian_blur_3x3(
    src: &[u8],
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
    width: usize,
    height: usize,
    channels: FastBlurChannels,
) -> Result<(), BlurError> {
    let cn = channels.channels();
    check_slice_size(src, src_stride, width, height, cn)?;
    check_slice_size(dst, dst_stride, width, height, cn)?;
    let dispatcher = match channels {
        FastBlurChannels::Plane => blur_3x3_impl::<1>,
        FastBlurChannels::Channels2 => blur_3x3_impl::<2>,
        FastBlurChannels::Channels3 => blur_3x3_impl::<3>,
        FastBlurChannels::Channels4 => blur_3x3_impl::<4>,
    };
    dispatcher(src, src_stride, dst, dst_stride, width, height);
    Ok(())
}

/// Performs gaussian blur with fixed binomial 3x3 kernel on image views.
///
/// See [gaussian_blur_3x3] for the exact formula.
pub fn gaussian_blur_3x3_image(
    src: &BlurImage<'_>,
    dst: &mut BlurImageMut<'_>,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    src.check_same_shape(dst)?;
    let dst_stride = dst.stride;
    gaussian_blur_3x3(
        src.data,
        src.stride,
        dst.data.borrow_mut(),
        dst_stride,
        src.width,
        src.height,
        src.channels,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn reference_3x3(src: &[u8], width: usize, height: usize, cn: usize) -> Vec<u8> {
        let taps = [1u32, 2, 1];
        let mut dst = vec![0u8; src.len()];
        for y in 0..height as isize {
            for x in 0..width as isize {
                for c in 0..cn {
                    let mut sum = 0u32;
                    for (ky, &wy) in taps.iter().enumerate() {
                        for (kx, &wx) in taps.iter().enumerate() {
                            let sy = (y + ky as isize - 1).clamp(0, height as isize - 1) as usize;
                            let sx = (x + kx as isize - 1).clamp(0, width as isize - 1) as usize;
                            sum += wy * wx * src[(sy * width + sx) * cn + c] as u32;
                        }
                    }
                    dst[(y as usize * width + x as usize) * cn + c] = ((sum + 8) >> 4) as u8;
                }
            }
        }
        dst
    }

    #[test]
    fn test_3x3_hand_computed() {
        let mut src = vec![0u8; 9];
        src[4] = 160;
        let mut dst = vec![0u8; 9];
        gaussian_blur_3x3(&src, 3, &mut dst, 3, 3, 3, FastBlurChannels::Plane).unwrap();
        assert_eq!(dst, vec![10, 20, 10, 20, 40, 20, 10, 20, 10]);
    }

    #[test]
    fn test_3x3_flat_and_single_pixel() {
        for cn in 1..=4usize {
            let channels = FastBlurChannels::try_from(cn).unwrap();
            let src = vec![99u8; 7 * 5 * cn];
            let mut dst = vec![0u8; src.len()];
            gaussian_blur_3x3(&src, 7 * cn, &mut dst, 7 * cn, 7, 5, channels).unwrap();
            assert!(dst.iter().all(|&v| v == 99));

            let pixel: Vec<u8> = (0..cn as u8).map(|c| 40 + c * 50).collect();
            let mut out = vec![0u8; cn];
            gaussian_blur_3x3(&pixel, cn, &mut out, cn, 1, 1, channels).unwrap();
            assert_eq!(pixel, out);
        }
    }

    #[test]
    fn test_3x3_matches_reference() {
        let mut rng = StdRng::seed_from_u64(33);
        for cn in 1..=4usize {
            let channels = FastBlurChannels::try_from(cn).unwrap();
            for &(width, height) in &[(1usize, 6usize), (6, 1), (2, 2), (17, 13)] {
                let src: Vec<u8> = (0..width * height * cn).map(|_| rng.random()).collect();
                let stride = width * cn + 5;
                let mut dst = vec![0u8; stride * height];
                gaussian_blur_3x3(&src, width * cn, &mut dst, stride, width, height, channels)
                    .unwrap();
                let expected = reference_3x3(&src, width, height, cn);
                for y in 0..height {
                    assert_eq!(
                        &dst[y * stride..y * stride + width * cn],
                        &expected[y * width * cn..(y + 1) * width * cn]
                    );
                }
            }
        }
    }

    #[test]
    fn test_3x3_image_views() {
        let data = vec![10u8, 200, 30, 40, 50, 60];
        let src = BlurImage::borrow(&data, 3, 2, FastBlurChannels::Plane);
        let mut dst = BlurImageMut::default();
        gaussian_blur_3x3_image(&src, &mut dst).unwrap();
        let expected = reference_3x3(&data, 3, 2, 1);
        assert_eq!(dst.data.borrow(), expected.as_slice());

        let short = vec![0u8; 5];
        let src = BlurImage::borrow(&short, 3, 2, FastBlurChannels::Plane);
        assert!(gaussian_blur_3x3_image(&src, &mut dst).is_err());
    }
}
