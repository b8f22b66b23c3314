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

use crate::gaussian::row_ring::RowWindow;
use crate::mlaf::mlaf;
use crate::CpuFeatures;

/// One backend of the separable gaussian blur.
///
/// Every implementation has to produce the same numbers as [ScalarBlurPass]
/// up to float rounding order, so the engine can pick whichever is the fastest.
pub trait GaussianBlurPass: Send + Sync {
    /// Short backend name, e.g. `"avx2"`.
    fn name(&self) -> &'static str;

    /// Horizontal pass over one padded row.
    ///
    /// `dst[i] = sum(weights[k] * src[i + k * channels])` for every `i` in `dst`,
    /// `src` must hold `dst.len() + (weights.len() - 1) * channels` items.
    fn blur_cols(&self, src: &[u8], weights: &[f32], dst: &mut [f32]);

    /// Vertical pass over the ring of filtered rows.
    ///
    /// Slot `k` of `window` is multiplied by `weights[k]`, sum is rounded half to even
    /// and saturated into `u8`.
    fn blur_rows(&self, window: RowWindow<'_>, weights: &[f32], dst: &mut [u8]);
}

/// Converts an accumulated sample to `u8`, rounding half to even as vector units do.
#[inline(always)]
pub(crate) fn saturate_u8(value: f32) -> u8 {
    // `as` saturates and maps NaN to zero
    value.round_ties_even() as u8
}

/// Kernel length known at compile time, `0` means it is taken from the weights.
#[inline(always)]
pub(crate) const fn taps<const K: usize>(weights_len: usize) -> usize {
    if K != 0 {
        K
    } else {
        weights_len
    }
}

/// Portable reference backend.
#[derive(Copy, Clone, Default)]
pub(crate) struct ScalarBlurPass<const CN: usize, const K: usize> {}

impl<const CN: usize, const K: usize> ScalarBlurPass<CN, K> {
    pub(crate) fn new(_: CpuFeatures) -> Self {
        Self::default()
    }
}

impl<const CN: usize, const K: usize> GaussianBlurPass for ScalarBlurPass<CN, K> {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn blur_cols(&self, src: &[u8], weights: &[f32], dst: &mut [f32]) {
        blur_cols_scalar::<CN, K>(src, weights, dst, 0);
    }

    fn blur_rows(&self, window: RowWindow<'_>, weights: &[f32], dst: &mut [u8]) {
        blur_rows_scalar::<K>(window, weights, dst, 0);
    }
}

/// Scalar horizontal pass from column `start`, shared with vector backends as their tail.
#[inline(always)]
pub(crate) fn blur_cols_scalar<const CN: usize, const K: usize>(
    src: &[u8],
    weights: &[f32],
    dst: &mut [f32],
    start: usize,
) {
    let kernel = taps::<K>(weights.len());
    let weights = &weights[..kernel];
    let size = dst.len();
    for (i, dst) in dst.iter_mut().enumerate().skip(start) {
        let src = &src[i..i + (kernel - 1) * CN + 1];
        let mut sum = 0f32;
        for (k, &weight) in weights.iter().enumerate() {
            sum = mlaf(sum, weight, src[k * CN] as f32);
        }
        *dst = sum;
    }
    debug_assert!(src.len() >= size + (kernel - 1) * CN);
}

/// Scalar vertical pass from column `start`, shared with vector backends as their tail.
#[inline(always)]
pub(crate) fn blur_rows_scalar<const K: usize>(
    window: RowWindow<'_>,
    weights: &[f32],
    dst: &mut [u8],
    start: usize,
) {
    let kernel = taps::<K>(weights.len());
    let weights = &weights[..kernel];
    let size = dst.len().min(window.size);
    for (i, dst) in dst[..size].iter_mut().enumerate().skip(start) {
        let mut sum = 0f32;
        for (k, &weight) in weights.iter().enumerate() {
            sum = mlaf(sum, weight, window.data[k * window.stride + i]);
        }
        *dst = saturate_u8(sum);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::row_ring::RowRing;

    #[test]
    fn test_saturate_rounds_half_to_even() {
        assert_eq!(saturate_u8(0.5), 0);
        assert_eq!(saturate_u8(1.5), 2);
        assert_eq!(saturate_u8(2.5), 2);
        assert_eq!(saturate_u8(2.51), 3);
        assert_eq!(saturate_u8(-3.), 0);
        assert_eq!(saturate_u8(300.), 255);
        assert_eq!(saturate_u8(f32::NAN), 0);
    }

    #[test]
    fn test_scalar_cols_steps_by_channels() {
        let weights = [0.25f32, 0.5, 0.25];
        // two channels, padded by one pixel on each side
        let src = [10u8, 100, 10, 100, 30, 200, 50, 0, 50, 0];
        let mut dst = [0f32; 6];
        ScalarBlurPass::<2, 3>::default().blur_cols(&src, &weights, &mut dst);
        assert_eq!(dst, [15., 125., 30., 125., 45., 50.]);

        let mut any = [0f32; 6];
        ScalarBlurPass::<2, 0>::default().blur_cols(&src, &weights, &mut any);
        assert_eq!(dst, any);
    }

    #[test]
    fn test_scalar_rows_weights_slots() {
        let mut ring = RowRing::new(3, 4, 16).unwrap();
        ring.slot_mut(0).copy_from_slice(&[0., 10., 255., 4.]);
        ring.slot_mut(1).copy_from_slice(&[100., 10., 255., 5.]);
        ring.slot_mut(2).copy_from_slice(&[0., 11., 255., 6.]);
        let weights = [0.25f32, 0.5, 0.25];
        let mut dst = [0u8; 4];
        ScalarBlurPass::<1, 3>::default().blur_rows(ring.window(), &weights, &mut dst);
        assert_eq!(dst, [50, 10, 255, 5]);
    }
}
