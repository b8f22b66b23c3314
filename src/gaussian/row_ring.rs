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

use crate::safe_math::{SafeAdd, SafeMul};
use crate::BlurError;
use aligned_vec::{AVec, RuntimeAlign};

/// Ring of horizontally filtered rows.
///
/// Holds exactly `kernel` rows, each `size` floats long and placed `stride`
/// floats apart, where `stride` is rounded up so every row starts on the
/// requested alignment. Rotation is done by relabeling slots, rows are never moved
/// unless an edge row has to be replicated.
pub(crate) struct RowRing {
    data: AVec<f32, RuntimeAlign>,
    stride: usize,
    size: usize,
    kernel: usize,
}

/// Borrowed view over every slot of a [RowRing], in slot order.
#[derive(Copy, Clone)]
pub struct RowWindow<'a> {
    pub(crate) data: &'a [f32],
    pub(crate) stride: usize,
    pub(crate) size: usize,
    pub(crate) rows: usize,
}

impl<'a> RowWindow<'a> {
    /// Slot `k` of the window.
    #[inline(always)]
    pub fn row(&self, k: usize) -> &'a [f32] {
        &self.data[k * self.stride..k * self.stride + self.size]
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Every slot starts on `bytes` boundary.
    #[inline]
    pub(crate) fn is_aligned(&self, bytes: usize) -> bool {
        (self.data.as_ptr() as usize) % bytes == 0 && (self.stride * size_of::<f32>()) % bytes == 0
    }
}

impl RowRing {
    pub(crate) fn new(kernel: usize, size: usize, alignment: usize) -> Result<RowRing, BlurError> {
        let lanes = (alignment / size_of::<f32>()).max(1);
        let stride = size.safe_add(lanes - 1)? / lanes * lanes;
        let total = stride.safe_mul(kernel)?;
        let mut data = AVec::<f32, RuntimeAlign>::new(alignment);
        data.try_reserve_exact(total)
            .map_err(|_| BlurError::ExceedingPointerSize)?;
        data.resize(total, 0.);
        Ok(RowRing {
            data,
            stride,
            size,
            kernel,
        })
    }

    #[inline(always)]
    pub(crate) fn slot_mut(&mut self, slot: usize) -> &mut [f32] {
        debug_assert!(slot < self.kernel);
        let start = slot * self.stride;
        &mut self.data[start..start + self.size]
    }

    /// Copies slot `from` over slot `to`.
    #[inline]
    pub(crate) fn replicate(&mut self, from: usize, to: usize) {
        debug_assert!(from < self.kernel && to < self.kernel);
        if from != to {
            let start = from * self.stride;
            self.data
                .copy_within(start..start + self.size, to * self.stride);
        }
    }

    #[inline]
    pub(crate) fn window(&self) -> RowWindow<'_> {
        RowWindow {
            data: &self.data,
            stride: self.stride,
            size: self.size,
            rows: self.kernel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_layout_is_aligned() {
        let ring = RowRing::new(5, 13, 64).unwrap();
        assert_eq!(ring.stride, 16);
        assert_eq!(ring.data.as_ptr() as usize % 64, 0);
        let window = ring.window();
        assert!(window.is_aligned(64));
        assert_eq!(window.rows(), 5);
        assert_eq!(window.size(), 13);
        assert_eq!(window.row(4).len(), 13);
    }

    #[test]
    fn test_ring_slots_are_independent() {
        let mut ring = RowRing::new(3, 7, 16).unwrap();
        for slot in 0..3 {
            ring.slot_mut(slot).fill(slot as f32 + 1.);
        }
        ring.replicate(2, 0);
        let window = ring.window();
        assert!(window.row(0).iter().all(|&x| x == 3.));
        assert!(window.row(1).iter().all(|&x| x == 2.));
        assert!(window.row(2).iter().all(|&x| x == 3.));
    }

    #[test]
    fn test_ring_overflow_is_reported() {
        assert!(matches!(
            RowRing::new(usize::MAX / 2, 1024, 16),
            Err(BlurError::ExceedingPointerSize)
        ));
        // Addressable, but larger than any allocation may be
        assert!(matches!(
            RowRing::new(isize::MAX as usize / 64, 16, 16),
            Err(BlurError::ExceedingPointerSize)
        ));
    }
}
