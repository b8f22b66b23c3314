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

use crate::safe_math::SafeMul;
use crate::{BlurError, FastBlurChannels};

/// Tail weight tolerance used when none is given.
pub const DEFAULT_EPSILON: f32 = 0.001;

/// Scratch rows are aligned for the widest vector unit the crate knows about.
pub const DEFAULT_ALIGNMENT: usize = 64;

const MIN_SIGMA: f32 = 1e-6;
const MIN_EPSILON: f32 = 1e-6;

/// Parameters of a gaussian blur engine.
///
/// `sigma` controls the kernel spread, `epsilon` the relative weight below which
/// kernel taps are dropped: `half = floor(sqrt(-ln(epsilon)) * sigma)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GaussianBlurParams {
    pub width: usize,
    pub height: usize,
    pub channels: FastBlurChannels,
    pub sigma: f32,
    pub epsilon: f32,
    /// Alignment in bytes of the intermediate float rows.
    pub alignment: usize,
}

impl GaussianBlurParams {
    pub fn new(
        width: usize,
        height: usize,
        channels: FastBlurChannels,
        sigma: f32,
    ) -> GaussianBlurParams {
        GaussianBlurParams {
            width,
            height,
            channels,
            sigma,
            epsilon: DEFAULT_EPSILON,
            alignment: DEFAULT_ALIGNMENT,
        }
    }

    pub fn with_epsilon(self, epsilon: f32) -> GaussianBlurParams {
        GaussianBlurParams { epsilon, ..self }
    }

    pub fn with_alignment(self, alignment: usize) -> GaussianBlurParams {
        GaussianBlurParams { alignment, ..self }
    }

    /// Count of bytes in one image row.
    #[inline]
    pub fn row_size(&self) -> Result<usize, BlurError> {
        self.width.safe_mul(self.channels.channels())
    }

    pub fn validate(&self) -> Result<(), BlurError> {
        if self.width == 0 || self.height == 0 {
            return Err(BlurError::ZeroBaseSize);
        }
        // NaN must fail as well, hence no plain `<` here
        if !(self.sigma >= MIN_SIGMA) || !self.sigma.is_finite() {
            return Err(BlurError::NegativeOrZeroSigma);
        }
        if !(self.epsilon >= MIN_EPSILON) {
            return Err(BlurError::InvalidEpsilon);
        }
        if !self.alignment.is_power_of_two() || self.alignment < size_of::<f32>() {
            return Err(BlurError::InvalidAlignment(self.alignment));
        }
        self.row_size()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_validation() {
        let params = GaussianBlurParams::new(16, 9, FastBlurChannels::Channels3, 1.5);
        assert!(params.validate().is_ok());
        assert_eq!(params.row_size(), Ok(48));
        assert_eq!(params.epsilon, DEFAULT_EPSILON);

        assert_eq!(
            GaussianBlurParams::new(0, 9, FastBlurChannels::Plane, 1.).validate(),
            Err(BlurError::ZeroBaseSize)
        );
        assert_eq!(
            GaussianBlurParams::new(4, 0, FastBlurChannels::Plane, 1.).validate(),
            Err(BlurError::ZeroBaseSize)
        );
        assert_eq!(
            GaussianBlurParams::new(4, 4, FastBlurChannels::Plane, 0.).validate(),
            Err(BlurError::NegativeOrZeroSigma)
        );
        assert_eq!(
            GaussianBlurParams::new(4, 4, FastBlurChannels::Plane, f32::NAN).validate(),
            Err(BlurError::NegativeOrZeroSigma)
        );
        assert_eq!(
            GaussianBlurParams::new(4, 4, FastBlurChannels::Plane, 1.)
                .with_epsilon(1e-7)
                .validate(),
            Err(BlurError::InvalidEpsilon)
        );
        assert_eq!(
            GaussianBlurParams::new(4, 4, FastBlurChannels::Plane, 1.)
                .with_alignment(24)
                .validate(),
            Err(BlurError::InvalidAlignment(24))
        );
        assert_eq!(
            GaussianBlurParams::new(4, 4, FastBlurChannels::Plane, 1.)
                .with_alignment(2)
                .validate(),
            Err(BlurError::InvalidAlignment(2))
        );
        assert_eq!(
            GaussianBlurParams::new(usize::MAX / 2, 4, FastBlurChannels::Channels3, 1.).validate(),
            Err(BlurError::ExceedingPointerSize)
        );
    }
}
