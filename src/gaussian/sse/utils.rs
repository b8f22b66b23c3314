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

/// Widens 4 consecutive bytes into floats.
#[inline(always)]
pub(crate) unsafe fn _mm_load_u8_ps(ptr: *const u8) -> __m128 {
    _mm_cvtepi32_ps(_mm_cvtepu8_epi32(_mm_loadu_si32(ptr as *const _)))
}

#[inline(always)]
pub(crate) unsafe fn _mm_load_ps_x<const ALIGNED: bool>(ptr: *const f32) -> __m128 {
    if ALIGNED {
        _mm_load_ps(ptr)
    } else {
        _mm_loadu_ps(ptr)
    }
}

#[inline(always)]
pub(crate) unsafe fn _mm_store_ps_x<const ALIGNED: bool>(ptr: *mut f32, v: __m128) {
    if ALIGNED {
        _mm_store_ps(ptr, v)
    } else {
        _mm_storeu_ps(ptr, v)
    }
}

/// Rounds 16 floats half to even and packs them with unsigned saturation.
#[inline(always)]
pub(crate) unsafe fn _mm_pack_ps_x4_epu8(
    v0: __m128,
    v1: __m128,
    v2: __m128,
    v3: __m128,
) -> __m128i {
    let i0 = _mm_cvtps_epi32(v0);
    let i1 = _mm_cvtps_epi32(v1);
    let i2 = _mm_cvtps_epi32(v2);
    let i3 = _mm_cvtps_epi32(v3);
    _mm_packus_epi16(_mm_packs_epi32(i0, i1), _mm_packs_epi32(i2, i3))
}

/// Rounds 4 floats half to even and writes them as 4 saturated bytes.
#[inline(always)]
pub(crate) unsafe fn _mm_store_ps_epu8(ptr: *mut u8, v: __m128) {
    let i0 = _mm_cvtps_epi32(v);
    let w = _mm_packs_epi32(i0, i0);
    let b = _mm_packus_epi16(w, w);
    (ptr as *mut i32).write_unaligned(_mm_cvtsi128_si32(b));
}
