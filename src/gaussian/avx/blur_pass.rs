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

use crate::gaussian::avx::utils::{
    _mm256_load_ps_x, _mm256_load_u8_ps, _mm256_opt_fmlaf_ps, _mm256_pack_ps_x4_epu8,
    _mm256_store_ps_epu8, _mm256_store_ps_x,
};
use crate::gaussian::blur_pass::{blur_cols_scalar, blur_rows_scalar, taps, GaussianBlurPass};
use crate::gaussian::row_ring::RowWindow;
use crate::CpuFeatures;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// AVX2 backend, 8 lanes, fused multiply-add when the CPU has it.
#[derive(Copy, Clone, Default)]
pub(crate) struct Avx2BlurPass<const CN: usize, const K: usize> {
    fma: bool,
}

impl<const CN: usize, const K: usize> Avx2BlurPass<CN, K> {
    pub(crate) fn new(features: CpuFeatures) -> Self {
        Self { fma: features.fma }
    }
}

impl<const CN: usize, const K: usize> GaussianBlurPass for Avx2BlurPass<CN, K> {
    fn name(&self) -> &'static str {
        if self.fma {
            "avx2+fma"
        } else {
            "avx2"
        }
    }

    fn blur_cols(&self, src: &[u8], weights: &[f32], dst: &mut [f32]) {
        let kernel = taps::<K>(weights.len());
        assert!(weights.len() >= kernel);
        assert!(src.len() >= dst.len() + (kernel - 1) * CN);
        let aligned = dst.as_ptr().align_offset(32) == 0;
        unsafe {
            match (self.fma, aligned) {
                (true, true) => blur_cols_avx_fma::<CN, K, true>(src, weights, dst),
                (true, false) => blur_cols_avx_fma::<CN, K, false>(src, weights, dst),
                (false, true) => blur_cols_avx_def::<CN, K, true>(src, weights, dst),
                (false, false) => blur_cols_avx_def::<CN, K, false>(src, weights, dst),
            }
        }
    }

    fn blur_rows(&self, window: RowWindow<'_>, weights: &[f32], dst: &mut [u8]) {
        let kernel = taps::<K>(weights.len());
        assert!(weights.len() >= kernel && window.rows >= kernel);
        assert!(dst.len() <= window.size);
        let aligned = window.is_aligned(32);
        unsafe {
            match (self.fma, aligned) {
                (true, true) => blur_rows_avx_fma::<K, true>(window, weights, dst),
                (true, false) => blur_rows_avx_fma::<K, false>(window, weights, dst),
                (false, true) => blur_rows_avx_def::<K, true>(window, weights, dst),
                (false, false) => blur_rows_avx_def::<K, false>(window, weights, dst),
            }
        }
    }
}

#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn blur_cols_avx_fma<const CN: usize, const K: usize, const ALIGNED: bool>(
    src: &[u8],
    weights: &[f32],
    dst: &mut [f32],
) {
    blur_cols_avx_impl::<CN, K, true, ALIGNED>(src, weights, dst);
}

#[target_feature(enable = "avx2")]
unsafe fn blur_cols_avx_def<const CN: usize, const K: usize, const ALIGNED: bool>(
    src: &[u8],
    weights: &[f32],
    dst: &mut [f32],
) {
    blur_cols_avx_impl::<CN, K, false, ALIGNED>(src, weights, dst);
}

#[target_feature(enable = "avx2", enable = "fma")]
unsafe fn blur_rows_avx_fma<const K: usize, const ALIGNED: bool>(
    window: RowWindow<'_>,
    weights: &[f32],
    dst: &mut [u8],
) {
    blur_rows_avx_impl::<K, true, ALIGNED>(window, weights, dst);
}

#[target_feature(enable = "avx2")]
unsafe fn blur_rows_avx_def<const K: usize, const ALIGNED: bool>(
    window: RowWindow<'_>,
    weights: &[f32],
    dst: &mut [u8],
) {
    blur_rows_avx_impl::<K, false, ALIGNED>(window, weights, dst);
}

#[inline(always)]
unsafe fn blur_cols_avx_impl<const CN: usize, const K: usize, const FMA: bool, const ALIGNED: bool>(
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
        let mut sum = _mm256_mul_ps(
            _mm256_set1_ps(*weights.get_unchecked(0)),
            _mm256_load_u8_ps(ps),
        );
        for k in 1..kernel {
            sum = _mm256_opt_fmlaf_ps::<FMA>(
                sum,
                _mm256_set1_ps(*weights.get_unchecked(k)),
                _mm256_load_u8_ps(ps.add(k * CN)),
            );
        }
        _mm256_store_ps_x::<ALIGNED>(dst_ptr.add(i), sum);
        i += 8;
    }

    blur_cols_scalar::<CN, K>(src, weights, dst, size_f);
}

#[inline(always)]
unsafe fn blur_rows_avx_impl<const K: usize, const FMA: bool, const ALIGNED: bool>(
    window: RowWindow<'_>,
    weights: &[f32],
    dst: &mut [u8],
) {
    let kernel = taps::<K>(weights.len());
    let size = dst.len();
    let size_a = size - size % 32;
    let size_f = size - size % 8;
    let stride = window.stride;
    let src = window.data.as_ptr();
    let dst_ptr = dst.as_mut_ptr();

    let mut i = 0usize;
    while i < size_a {
        let mut sum0 = _mm256_setzero_ps();
        let mut sum1 = _mm256_setzero_ps();
        let mut sum2 = _mm256_setzero_ps();
        let mut sum3 = _mm256_setzero_ps();
        for k in 0..kernel {
            let w = _mm256_set1_ps(*weights.get_unchecked(k));
            let ps = src.add(i + k * stride);
            sum0 = _mm256_opt_fmlaf_ps::<FMA>(sum0, w, _mm256_load_ps_x::<ALIGNED>(ps));
            sum1 = _mm256_opt_fmlaf_ps::<FMA>(sum1, w, _mm256_load_ps_x::<ALIGNED>(ps.add(8)));
            sum2 = _mm256_opt_fmlaf_ps::<FMA>(sum2, w, _mm256_load_ps_x::<ALIGNED>(ps.add(16)));
            sum3 = _mm256_opt_fmlaf_ps::<FMA>(sum3, w, _mm256_load_ps_x::<ALIGNED>(ps.add(24)));
        }
        _mm256_storeu_si256(
            dst_ptr.add(i) as *mut __m256i,
            _mm256_pack_ps_x4_epu8(sum0, sum1, sum2, sum3),
        );
        i += 32;
    }

    while i < size_f {
        let mut sum = _mm256_setzero_ps();
        for k in 0..kernel {
            sum = _mm256_opt_fmlaf_ps::<FMA>(
                sum,
                _mm256_set1_ps(*weights.get_unchecked(k)),
                _mm256_load_ps_x::<ALIGNED>(src.add(i + k * stride)),
            );
        }
        _mm256_store_ps_epu8(dst_ptr.add(i), sum);
        i += 8;
    }

    blur_rows_scalar::<K>(window, weights, dst, size_f);
}
