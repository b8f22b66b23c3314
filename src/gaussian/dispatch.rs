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

#[cfg(all(target_arch = "x86_64", feature = "avx"))]
use crate::gaussian::avx::Avx2BlurPass;
use crate::gaussian::blur_pass::{GaussianBlurPass, ScalarBlurPass};
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
use crate::gaussian::neon::NeonBlurPass;
#[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
use crate::gaussian::sse::Sse41BlurPass;
use crate::{CpuFeatures, FastBlurChannels};

macro_rules! make_pass {
    ($pass:ident, $features:expr, $channels:expr, $kernel:expr) => {
        match $channels {
            FastBlurChannels::Plane => make_pass!(@kernel $pass, $features, 1, $kernel),
            FastBlurChannels::Channels2 => make_pass!(@kernel $pass, $features, 2, $kernel),
            FastBlurChannels::Channels3 => make_pass!(@kernel $pass, $features, 3, $kernel),
            FastBlurChannels::Channels4 => make_pass!(@kernel $pass, $features, 4, $kernel),
        }
    };
    (@kernel $pass:ident, $features:expr, $cn:literal, $kernel:expr) => {
        match $kernel {
            3 => Box::new($pass::<$cn, 3>::new($features)) as Box<dyn GaussianBlurPass>,
            5 => Box::new($pass::<$cn, 5>::new($features)) as Box<dyn GaussianBlurPass>,
            7 => Box::new($pass::<$cn, 7>::new($features)) as Box<dyn GaussianBlurPass>,
            9 => Box::new($pass::<$cn, 9>::new($features)) as Box<dyn GaussianBlurPass>,
            _ => Box::new($pass::<$cn, 0>::new($features)) as Box<dyn GaussianBlurPass>,
        }
    };
}

/// Picks the fastest backend allowed by `features`.
///
/// Kernels of 3, 5, 7 and 9 taps get routines with the tap count fixed at compile
/// time, any other length takes the generic routine of the same backend.
/// Vector backends are skipped for images narrower than one vector.
#[allow(unused_variables)]
pub(crate) fn select_blur_pass(
    features: CpuFeatures,
    channels: FastBlurChannels,
    kernel: usize,
    width: usize,
) -> Box<dyn GaussianBlurPass> {
    #[cfg(all(target_arch = "x86_64", feature = "avx"))]
    if features.avx2 && width >= 8 {
        return make_pass!(Avx2BlurPass, features, channels, kernel);
    }
    #[cfg(all(any(target_arch = "x86_64", target_arch = "x86"), feature = "sse"))]
    if features.sse41 && width >= 4 {
        return make_pass!(Sse41BlurPass, features, channels, kernel);
    }
    #[cfg(all(target_arch = "aarch64", feature = "neon"))]
    if features.neon && width >= 4 {
        return make_pass!(NeonBlurPass, features, channels, kernel);
    }
    make_pass!(ScalarBlurPass, features, channels, kernel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gaussian::gaussian_kernel::GaussianKernel;
    use crate::gaussian::row_ring::RowRing;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_scalar_selected_without_features() {
        for cn in 1..=4usize {
            let channels = FastBlurChannels::try_from(cn).unwrap();
            for kernel in [3usize, 5, 7, 9, 11, 27] {
                let pass = select_blur_pass(CpuFeatures::none(), channels, kernel, 512);
                assert_eq!(pass.name(), "scalar");
            }
        }
    }

    #[test]
    #[cfg(all(target_arch = "x86_64", feature = "sse", feature = "avx"))]
    fn test_restricted_features_select_backend() {
        let detected = CpuFeatures::detect();
        let channels = FastBlurChannels::Channels3;
        if detected.sse41 {
            let sse = CpuFeatures {
                sse41: true,
                ..CpuFeatures::none()
            };
            assert_eq!(select_blur_pass(sse, channels, 5, 64).name(), "sse4.1");
        }
        if detected.avx2 {
            let avx = CpuFeatures {
                sse41: detected.sse41,
                avx2: true,
                ..CpuFeatures::none()
            };
            assert_eq!(select_blur_pass(avx, channels, 5, 64).name(), "avx2");
            assert_eq!(select_blur_pass(avx, channels, 5, 7).name(), "sse4.1");
        }
        if detected.avx2 && detected.fma {
            assert_eq!(select_blur_pass(detected, channels, 11, 64).name(), "avx2+fma");
        }
    }

    #[test]
    fn test_narrow_images_use_scalar() {
        let pass = select_blur_pass(CpuFeatures::detect(), FastBlurChannels::Channels4, 5, 3);
        assert_eq!(pass.name(), "scalar");
    }

    #[test]
    fn test_passes_match_scalar() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for features in CpuFeatures::detected_tiers() {
            passes_match_scalar(&mut rng, features);
        }
    }

    fn passes_match_scalar(rng: &mut StdRng, features: CpuFeatures) {
        for cn in 1..=4usize {
            let channels = FastBlurChannels::try_from(cn).unwrap();
            for sigma in [0.45f32, 0.9, 1.4, 1.75, 2.5, 4.1] {
                let kernel = GaussianKernel::new(sigma, 0.001).unwrap();
                let half = kernel.half();
                for width in [4usize, 9, 16, 37, 130] {
                    let size = width * cn;
                    let padded: Vec<u8> = (0..size + 2 * half * cn).map(|_| rng.random()).collect();

                    let reference = select_blur_pass(CpuFeatures::none(), channels, kernel.len(), width);
                    let candidate = select_blur_pass(features, channels, kernel.len(), width);

                    let mut expected = vec![0f32; size];
                    let mut received = vec![0f32; size];
                    reference.blur_cols(&padded, kernel.weights(), &mut expected);
                    candidate.blur_cols(&padded, kernel.weights(), &mut received);
                    for (i, (&e, &r)) in expected.iter().zip(received.iter()).enumerate() {
                        let diff = (e - r).abs();
                        assert!(
                            diff <= 1e-3,
                            "Diff expected to be less than 1e-3, but it was {diff} at {i}, backend {}",
                            candidate.name()
                        );
                    }

                    let mut ring = RowRing::new(kernel.len(), size, 64).unwrap();
                    for slot in 0..kernel.len() {
                        for v in ring.slot_mut(slot).iter_mut() {
                            *v = rng.random_range(0f32..255f32);
                        }
                    }
                    for shift in 0..kernel.len() {
                        let mut expected = vec![0u8; size];
                        let mut received = vec![0u8; size];
                        reference.blur_rows(ring.window(), kernel.rotated(shift), &mut expected);
                        candidate.blur_rows(ring.window(), kernel.rotated(shift), &mut received);
                        for (i, (&e, &r)) in expected.iter().zip(received.iter()).enumerate() {
                            let diff = (e as i32 - r as i32).abs();
                            assert!(
                                diff <= 1,
                                "Diff expected to be less than 1, but it was {diff} at {i}, backend {}",
                                candidate.name()
                            );
                        }
                    }
                }
            }
        }
    }
}
