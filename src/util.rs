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
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum BlurError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ImagesMustMatch,
    ExceedingPointerSize,
    NegativeOrZeroSigma,
    InvalidEpsilon,
    UnsupportedChannels(usize),
    InvalidAlignment(usize),
}

impl Error for BlurError {}

impl std::fmt::Display for BlurError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlurError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            BlurError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            BlurError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            BlurError::ImagesMustMatch => {
                f.write_str("Source and destination images must match in their dimensions")
            }
            BlurError::ExceedingPointerSize => {
                f.write_str("Image bounds and blurring kernel exceeds pointer capacity")
            }
            BlurError::NegativeOrZeroSigma => {
                f.write_str("Sigma must be at least 1e-6, negative or zero sigma is not supported")
            }
            BlurError::InvalidEpsilon => {
                f.write_str("Epsilon must be at least 1e-6, negative or zero epsilon is not supported")
            }
            BlurError::UnsupportedChannels(cn) => f.write_fmt(format_args!(
                "Channels count must be in range 1..=4, but received {cn}"
            )),
            BlurError::InvalidAlignment(alignment) => f.write_fmt(format_args!(
                "Alignment must be a power of two and a multiple of 4, but received {alignment}"
            )),
        }
    }
}

/// Checks that `arr` can hold `height` rows of `width * cn` items placed `stride` items apart.
pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
    cn: usize,
) -> Result<(), BlurError> {
    if width == 0 || height == 0 {
        return Err(BlurError::ZeroBaseSize);
    }
    let row_size = width.safe_mul(cn)?;
    if stride < row_size {
        return Err(BlurError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: row_size,
            received: stride,
        }));
    }
    let required = stride.safe_mul(height - 1)?.safe_add(row_size)?;
    if arr.len() < required {
        return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_size_accepts_short_last_row() {
        let data = vec![0u8; 16 * 2 + 12];
        assert!(check_slice_size(&data, 16, 4, 3, 3).is_ok());
    }

    #[test]
    fn test_slice_size_rejects_small_stride() {
        let data = vec![0u8; 64];
        assert_eq!(
            check_slice_size(&data, 8, 4, 2, 3),
            Err(BlurError::MinimumStrideSizeMismatch(MismatchedSize {
                expected: 12,
                received: 8
            }))
        );
    }

    #[test]
    fn test_slice_size_rejects_short_slice() {
        let data = vec![0u8; 20];
        assert!(matches!(
            check_slice_size(&data, 12, 4, 2, 3),
            Err(BlurError::MinimumSliceSizeMismatch(_))
        ));
        assert_eq!(
            check_slice_size(&data, 12, 0, 2, 3),
            Err(BlurError::ZeroBaseSize)
        );
    }

    #[test]
    fn test_slice_size_overflow_is_reported() {
        let data = vec![0u8; 64];
        assert_eq!(
            check_slice_size(&data, usize::MAX / 2, 4, 3, 3),
            Err(BlurError::ExceedingPointerSize)
        );
        assert_eq!(
            check_slice_size(&data, 64, usize::MAX / 2, 3, 3),
            Err(BlurError::ExceedingPointerSize)
        );
    }
}
