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

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Widens 8 consecutive bytes into floats.
#[inline(always)]
pub(crate) unsafe fn _mm256_load_u8_ps(ptr: *const u8) -> __m256 {
    _mm256_cvtepi32_ps(_mm256_cvtepu8_epi32(_mm_loadl_epi64(ptr as *const __m128i)))
}

#[inline(always)]
pub(crate) unsafe fn _mm256_opt_fmlaf_ps<const FMA: bool>(
    a: __m256,
    b: __m256,
    c: __m256,
) -> __m256 {
    if FMA {
        _mm256_fmadd_ps(b, c, a)
    } else {
        _mm256_add_ps(_mm256_mul_ps(b, c), a)
    }
}

#[inline(always)]
pub(crate) unsafe fn _mm256_load_ps_x<const ALIGNED: bool>(ptr: *const f32) -> __m256 {
    if ALIGNED {
        _mm256_load_ps(ptr)
    } else {
        _mm256_loadu_ps(ptr)
    }
}

#[inline(always)]
pub(crate) unsafe fn _mm256_store_ps_x<const ALIGNED: bool>(ptr: *mut f32, v: __m256) {
    if ALIGNED {
        _mm256_store_ps(ptr, v)
    } else {
        _mm256_storeu_ps(ptr, v)
    }
}

/// Rounds 32 floats half to even and packs them with unsigned saturation, order is kept.
#[inline(always)]
pub(crate) unsafe fn _mm256_pack_ps_x4_epu8(
    v0: __m256,
    v1: __m256,
    v2: __m256,
    v3: __m256,
) -> __m256i {
    let i0 = _mm256_cvtps_epi32(v0);
    let i1 = _mm256_cvtps_epi32(v1);
    let i2 = _mm256_cvtps_epi32(v2);
    let i3 = _mm256_cvtps_epi32(v3);
    // packs work per 128-bit lane, dwords come out as 0 4 1 5 2 6 3 7
    let packed = _mm256_packus_epi16(_mm256_packs_epi32(i0, i1), _mm256_packs_epi32(i2, i3));
    _mm256_permutevar8x32_epi32(packed, _mm256_setr_epi32(0, 4, 1, 5, 2, 6, 3, 7))
}

/// Rounds 8 floats half to even and writes them as 8 saturated bytes.
#[inline(always)]
pub(crate) unsafe fn _mm256_store_ps_epu8(ptr: *mut u8, v: __m256) {
    let i0 = _mm256_cvtps_epi32(v);
    let w = _mm_packs_epi32(
        _mm256_castsi256_si128(i0),
        _mm256_extracti128_si256::<1>(i0),
    );
    _mm_storel_epi64(ptr as *mut __m128i, _mm_packus_epi16(w, w));
}
