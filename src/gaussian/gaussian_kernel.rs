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

/// Symmetric 1D gaussian kernel normalized to unit sum.
///
/// Weights are stored twice in a row, so any rotation of the kernel is a plain
/// subslice: `rotated(w)[k] == weights()[(w + k) % len()]`.
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianKernel {
    half: usize,
    weights: Vec<f32>,
}

impl GaussianKernel {
    /// Builds a kernel for given sigma, taps with relative weight below `epsilon` are dropped.
    ///
    /// Fails with [BlurError::ExceedingPointerSize] when the kernel can't be addressed
    /// or allocated.
    pub fn new(sigma: f32, epsilon: f32) -> Result<GaussianKernel, BlurError> {
        let half = kernel_half(sigma, epsilon)?;
        let kernel = half.safe_mul(2)?.safe_add(1)?;
        let count = kernel.safe_mul(2)?;
        let mut weights = Vec::new();
        weights
            .try_reserve_exact(count)
            .map_err(|_| BlurError::ExceedingPointerSize)?;
        weights.resize(count, 0f32);
        weights[half] = 1.;
        for i in 0..half {
            let x = (i + 1) as f32 / sigma;
            let weight = (-0.5 * x * x).exp();
            weights[half + 1 + i] = weight;
            weights[half - 1 - i] = weight;
        }
        let sum: f32 = weights[..kernel].iter().sum();
        let scale = 1. / sum;
        for weight in weights[..kernel].iter_mut() {
            *weight *= scale;
        }
        weights.copy_within(0..kernel, kernel);
        Ok(GaussianKernel { half, weights })
    }

    /// Count of taps on each side of the center
    #[inline]
    pub fn half(&self) -> usize {
        self.half
    }

    #[inline]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        2 * self.half + 1
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights[..self.len()]
    }

    /// Kernel started from tap `shift`, `shift` must not exceed kernel length.
    #[inline]
    pub(crate) fn rotated(&self, shift: usize) -> &[f32] {
        &self.weights[shift..shift + self.len()]
    }
}

/// `floor(sqrt(-ln(epsilon)) * sigma)`, zero when epsilon leaves no room for taps.
pub(crate) fn kernel_half(sigma: f32, epsilon: f32) -> Result<usize, BlurError> {
    let spread = (-epsilon.ln()).max(0.).sqrt() * sigma;
    // Weights take 8 bytes per tap on each side
    if !(spread < (isize::MAX as usize / 8) as f32) {
        return Err(BlurError::ExceedingPointerSize);
    }
    Ok(spread.floor() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        for &(sigma, epsilon) in &[
            (0.5f32, 0.001f32),
            (1., 0.001),
            (1.5, 0.01),
            (2.7, 0.001),
            (7.3, 0.0001),
        ] {
            let kernel = GaussianKernel::new(sigma, epsilon).unwrap();
            let weights = kernel.weights();
            assert_eq!(weights.len(), 2 * kernel.half() + 1);
            let sum: f32 = weights.iter().sum();
            assert!(
                (sum - 1.).abs() <= 1e-5,
                "Sum expected to be 1, but it was {sum} for sigma {sigma}"
            );
            for i in 0..weights.len() {
                assert_eq!(weights[i], weights[weights.len() - 1 - i]);
            }
            for i in 0..kernel.half() {
                assert!(weights[i] < weights[i + 1], "Weights must grow to the center");
            }
        }
    }

    #[test]
    fn test_kernel_half_formula() {
        // sqrt(-ln(0.001)) = 2.628
        assert_eq!(GaussianKernel::new(1., 0.001).unwrap().half(), 2);
        assert_eq!(GaussianKernel::new(2., 0.001).unwrap().half(), 5);
        assert_eq!(GaussianKernel::new(1., 0.5).unwrap().half(), 0);
        assert_eq!(GaussianKernel::new(3., 1.).unwrap().half(), 0);
        assert_eq!(GaussianKernel::new(3., 2.).unwrap().half(), 0);
    }

    #[test]
    fn test_kernel_weights_values() {
        let kernel = GaussianKernel::new(1., 0.001).unwrap();
        let e1 = (-0.5f32).exp();
        let e2 = (-2f32).exp();
        let sum = 1. + 2. * e1 + 2. * e2;
        let expected = [e2 / sum, e1 / sum, 1. / sum, e1 / sum, e2 / sum];
        for (&w, &e) in kernel.weights().iter().zip(expected.iter()) {
            assert!((w - e).abs() < 1e-6, "Weight {w} differs from {e}");
        }
    }

    #[test]
    fn test_kernel_rotation() {
        let kernel = GaussianKernel::new(1.3, 0.001).unwrap();
        let len = kernel.len();
        for shift in 0..=len {
            let rotated = kernel.rotated(shift);
            for (k, &w) in rotated.iter().enumerate() {
                assert_eq!(w, kernel.weights()[(shift + k) % len]);
            }
        }
    }

    #[test]
    fn test_huge_kernel_is_rejected() {
        assert_eq!(
            GaussianKernel::new(1e20, 0.001),
            Err(BlurError::ExceedingPointerSize)
        );
        assert_eq!(
            GaussianKernel::new(f32::MAX, 0.001),
            Err(BlurError::ExceedingPointerSize)
        );
        assert!(kernel_half(1e20, 0.001).is_err());
        assert_eq!(kernel_half(1e20, 1.), Ok(0));
    }

    #[test]
    fn test_degenerate_kernel() {
        let kernel = GaussianKernel::new(0.3, 0.001).unwrap();
        assert_eq!(kernel.half(), 0);
        assert_eq!(kernel.weights(), &[1.]);
    }
}
