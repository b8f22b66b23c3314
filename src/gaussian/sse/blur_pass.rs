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
use crate::gaussian::row_ring::RowWindow;
use crate::gaussian::sse::utils::{
    _mm_load_ps_x, _mm_load_u8_ps, _mm_pack_ps_x4_epu8, _mm_store_ps_epu8, _mm_store_ps_x,
};
use crate::CpuFeatures;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// SSE4.1 backend, 4 lanes.
#[derive(Copy, Clone, Default)]
pub(crate) struct Sse41BlurPass<const CN: usize, const K: usize> {}

impl<const CN: usize, const K: usize> Sse41BlurPass<CN, K> {
    pub(crate) fn new(_: CpuFeatures) -> Self {
        Self::default()
    }
}

impl<const CN: usize, const K: usize> GaussianBlurPass for Sse41BlurPass<CN, K> {
    fn name(&self) -> &'static str {
        "sse4.1"
    }

    fn blur_cols(&self, src: &[u8], weights: &[f32], dst: &mut [f32]) {
        let kernel = taps::<K>(weights.len());
        assert!(weights.len() >= kernel);
        assert!(src.len() >= dst.len() + (kernel - 1) * CN);
        unsafe {
            if dst.as_ptr().align_offset(16) == 0 {
                blur_cols_sse::<CN, K, true>(src, weights, dst);
            } else {
                blur_cols_sse::<CN, K, false>(src, weights, dst);
            }
        }
    }

    fn blur_rows(&self, window: RowWindow<'_>, weights: &[f32], dst: &mut [u8]) {
        let kernel = taps::<K>(weights.len());
        assert!(weights.len() >= kernel && window.rows >= kernel);
        assert!(dst.len() <= window.size);
        unsafe {
            if window.is_aligned(16) {
                blur_rows_sse::<K, true>(window, weights, dst);
            } else {
                blur_rows_sse::<K, false>(window, weights, dst);
            }
        }
    }
}

#[target_feature(enable = "sse4.1")]
unsafe fn blur_cols_sse<const CN: usize, const K: usize, const ALIGNED: bool>(
    src: &[u8],
    weights: &[f32],
    dst: &mut [f32],
) {
    let kernel = taps::<K>(weights.len());
    let size = dst.len();
    let size_f = size - size % 4;
    let src_ptr = src.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    let mut i = 0usize;
    while i < size_f {
        let ps = src_ptr.add(i);
        let mut sum = _mm_mul_ps(_mm_set1_ps(*weights.get_unchecked(0)), _mm_load_u8_ps(ps));
        for k in 1..kernel {
            let w = _mm_set1_ps(*weights.get_unchecked(k));
            sum = _mm_add_ps(sum, _mm_mul_ps(w, _mm_load_u8_ps(ps.add(k * CN))));
        }
        _mm_store_ps_x::<ALIGNED>(dst_ptr.add(i), sum);
        i += 4;
    }

    blur_cols_scalar::<CN, K>(src, weights, dst, size_f);
}

#[target_feature(enable = "sse4.1")]
unsafe fn blur_rows_sse<const K: usize, const ALIGNED: bool>(
    window: RowWindow<'_>,
    weights: &[f32],
    dst: &mut [u8],
) {
    let kernel = taps::<K>(weights.len());
    let size = dst.len();
    let size_a = size - size % 16;
    let size_f = size - size % 4;
    let stride = window.stride;
    let src = window.data.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    let mut i = 0usize;
    while i < size_a {
        let mut sum0 = _mm_setzero_ps();
        let mut sum1 = _mm_setzero_ps();
        let mut sum2 = _mm_setzero_ps();
        let mut sum3 = _mm_setzero_ps();
        for k in 0..kernel {
            let w = _mm_set1_ps(*weights.get_unchecked(k));
            let ps = src.add(i + k * stride);
            sum0 = _mm_add_ps(sum0, _mm_mul_ps(w, _mm_load_ps_x::<ALIGNED>(ps)));
            sum1 = _mm_add_ps(sum1, _mm_mul_ps(w, _mm_load_ps_x::<ALIGNED>(ps.add(4))));
            sum2 = _mm_add_ps(sum2, _mm_mul_ps(w, _mm_load_ps_x::<ALIGNED>(ps.add(8))));
            sum3 = _mm_add_ps(sum3, _mm_mul_ps(w, _mm_load_ps_x::<ALIGNED>(ps.add(12))));
        }
        _mm_storeu_si128(
            dst_ptr.add(i) as *mut __m128i,
            _mm_pack_ps_x4_epu8(sum0, sum1, sum2, sum3),
        );
        i += 16;
    }

    while i < size_f {
        let mut sum = _mm_setzero_ps();
        for k in 0..kernel {
            let w = _mm_set1_ps(*weights.get_unchecked(k));
            sum = _mm_add_ps(sum, _mm_mul_ps(w, _mm_load_ps_x::<ALIGNED>(src.add(i + k * stride))));
        }
        _mm_store_ps_epu8(dst_ptr.add(i), sum);
        i += 4;
    }

    blur_rows_scalar::<K>(window, weights, dst, size_f);
}
