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


/// Copies one image row into `dst` with `half` edge pixels replicated on both sides.
///
/// `dst` must hold `src.len() + 2 * half * CN` items, `src` must contain whole pixels.
#[inline]
pub(crate) fn pad_cols<const CN: usize>(src: &[u8], half: usize, dst: &mut [u8]) {
    debug_assert_eq!(src.len() % CN, 0);
    debug_assert_eq!(dst.len(), src.len() + 2 * half * CN);
    let pad = half * CN;
    let (left, rest) = dst.split_at_mut(pad);
    let (body, right) = rest.split_at_mut(src.len());

    let first = &src[..CN];
    for dst in left.chunks_exact_mut(CN) {
        dst.copy_from_slice(first);
    }
    body.copy_from_slice(src);
    let last = &src[src.len() - CN..];
    for dst in right.chunks_exact_mut(CN) {
        dst.copy_from_slice(last);
    }
}

/// Runtime channels count entry to [pad_cols].
pub(crate) fn pad_cols_dyn(src: &[u8], half: usize, channels: usize, dst: &mut [u8]) {
    match channels {
        1 => pad_cols::<1>(src, half, dst),
        2 => pad_cols::<2>(src, half, dst),
        3 => pad_cols::<3>(src, half, dst),
        _ => pad_cols::<4>(src, half, dst),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_replicates_whole_pixels() {
        let src = [1u8, 2, 3, 4, 5, 6, 7, 8, 9];
        let mut dst = vec![0u8; src.len() + 2 * 2 * 3];
        pad_cols_dyn(&src, 2, 3, &mut dst);
        assert_eq!(
            dst,
            vec![1, 2, 3, 1, 2, 3, 1, 2, 3, 4, 5, 6, 7, 8, 9, 7, 8, 9, 7, 8, 9]
        );
    }

    #[test]
    fn test_pad_single_pixel_row() {
        let src = [10u8, 20];
        let mut dst = vec![0u8; 2 + 2 * 3 * 2];
        pad_cols::<2>(&src, 3, &mut dst);
        for pixel in dst.chunks_exact(2) {
            assert_eq!(pixel, &[10, 20]);
        }
    }

    #[test]
    fn test_pad_without_margin() {
        let src = [4u8, 3, 2, 1];
        let mut dst = vec![0u8; 4];
        pad_cols::<1>(&src, 0, &mut dst);
        assert_eq!(dst, src);
    }
}
