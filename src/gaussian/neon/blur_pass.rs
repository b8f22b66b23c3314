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

use crate::gaussian::blur_pass::{blur_cols_scalar, blur_rows_scalar, taps, GaussianBlurPass};
use crate::gaussian::neon::utils::{vld1_u8_f32_x2, vqmovn_f32_x2_u8};
use crate::gaussian::row_ring::RowWindow;
use crate::CpuFeatures;
use std::arch::aarch64::*;

/// NEON backend, 4 lanes processed in pairs.
#[derive(Copy, Clone, Default)]
pub(crate) struct NeonBlurPass<const CN: usize, const K: usize> {}

impl<const CN: usize, const K: usize> NeonBlurPass<CN, K> {
    pub(crate) fn new(_: CpuFeatures) -> Self {
        Self::default()
    }
}

impl<const CN: usize, const K: usize> GaussianBlurPass for NeonBlurPass<CN, K> {
    fn name(&self) -> &'static str {
        "neon"
    }

    fn blur_cols(&self, src: &[u8], weights: &[f32], dst: &mut [f32]) {
        let kernel = taps::<K>(weights.len());
        assert!(weights.len() >= kernel);
        assert!(src.len() >= dst.len() + (kernel - 1) * CN);
        unsafe {
            blur_cols_neon::<CN, K>(src, weights, dst);
        }
    }

    fn blur_rows(&self, window: RowWindow<'_>, weights: &[f32], dst: &mut [u8]) {
        let kernel = taps::<K>(weights.len());
        assert!(weights.len() >= kernel && window.rows >= kernel);
        assert!(dst.len() <= window.size);
        unsafe {
            blur_rows_neon::<K>(window, weights, dst);
        }
    }
}

unsafe fn blur_cols_neon<const CN: usize, const K: usize>(
    src: &[u8],
    weights: &[f32],
    dst: &mut [f32],
) {
    let kernel = taps::<K>(weights.len());
    let size = dst.len();
    let size_f = size - size % 8;
    let src_ptr = src.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    let mut i = 0usize;
    while i < size_f {
        let ps = src_ptr.add(i);
        let w = vdupq_n_f32(*weights.get_unchecked(0));
        let v = vld1_u8_f32_x2(ps);
        let mut sum0 = vmulq_f32(v.0, w);
        let mut sum1 = vmulq_f32(v.1, w);
        for k in 1..kernel {
            let w = vdupq_n_f32(*weights.get_unchecked(k));
            let v = vld1_u8_f32_x2(ps.add(k * CN));
            sum0 = vfmaq_f32(sum0, v.0, w);
            sum1 = vfmaq_f32(sum1, v.1, w);
        }
        vst1q_f32(dst_ptr.add(i), sum0);
        vst1q_f32(dst_ptr.add(i + 4), sum1);
        i += 8;
    }

    blur_cols_scalar::<CN, K>(src, weights, dst, size_f);
}

unsafe fn blur_rows_neon<const K: usize>(window: RowWindow<'_>, weights: &[f32], dst: &mut [u8]) {
    let kernel = taps::<K>(weights.len());
    let size = dst.len();
    let size_a = size - size % 16;
    let size_f = size - size % 8;
    let stride = window.stride;
    let src = window.data.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    let mut i = 0usize;
    while i < size_a {
        let mut sum0 = vdupq_n_f32(0.);
        let mut sum1 = vdupq_n_f32(0.);
        let mut sum2 = vdupq_n_f32(0.);
        let mut sum3 = vdupq_n_f32(0.);
        for k in 0..kernel {
            let w = vdupq_n_f32(*weights.get_unchecked(k));
            let ps = src.add(i + k * stride);
            sum0 = vfmaq_f32(sum0, vld1q_f32(ps), w);
            sum1 = vfmaq_f32(sum1, vld1q_f32(ps.add(4)), w);
            sum2 = vfmaq_f32(sum2, vld1q_f32(ps.add(8)), w);
            sum3 = vfmaq_f32(sum3, vld1q_f32(ps.add(12)), w);
        }
        vst1q_u8(
            dst_ptr.add(i),
            vcombine_u8(vqmovn_f32_x2_u8(sum0, sum1), vqmovn_f32_x2_u8(sum2, sum3)),
        );
        i += 16;
    }

    while i < size_f {
        let mut sum0 = vdupq_n_f32(0.);
        let mut sum1 = vdupq_n_f32(0.);
        for k in 0..kernel {
            let w = vdupq_n_f32(*weights.get_unchecked(k));
            let ps = src.add(i + k * stride);
            sum0 = vfmaq_f32(sum0, vld1q_f32(ps), w);
            sum1 = vfmaq_f32(sum1, vld1q_f32(ps.add(4)), w);
        }
        vst1_u8(dst_ptr.add(i), vqmovn_f32_x2_u8(sum0, sum1));
        i += 8;
    }

    blur_rows_scalar::<K>(window, weights, dst, size_f);
}
