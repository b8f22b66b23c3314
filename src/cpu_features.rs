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


/// Instruction set extensions a blur backend may rely on.
///
/// Detected once with [CpuFeatures::detect] and handed to
/// [crate::GaussianBlur::with_features], so the caller decides which backends
/// are eligible. [CpuFeatures::none] forces the portable scalar path.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct CpuFeatures {
    pub sse41: bool,
    pub avx2: bool,
    pub fma: bool,
    pub neon: bool,
}

impl CpuFeatures {
    /// Nothing is available, only the scalar backend can be selected.
    pub const fn none() -> CpuFeatures {
        CpuFeatures {
            sse41: false,
            avx2: false,
            fma: false,
            neon: false,
        }
    }

    /// Queries the running CPU.
    pub fn detect() -> CpuFeatures {
        #[allow(unused_mut)]
        let mut features = CpuFeatures::none();
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            features.sse41 = std::arch::is_x86_feature_detected!("sse4.1");
            features.avx2 = std::arch::is_x86_feature_detected!("avx2");
            features.fma = std::arch::is_x86_feature_detected!("fma");
        }
        #[cfg(target_arch = "aarch64")]
        {
            features.neon = std::arch::is_aarch64_feature_detected!("neon");
        }
        features
    }

    /// Every backend tier the running CPU supports, from the narrowest to [CpuFeatures::detect].
    #[cfg(test)]
    pub(crate) fn detected_tiers() -> Vec<CpuFeatures> {
        let detected = CpuFeatures::detect();
        let sse = CpuFeatures {
            sse41: detected.sse41,
            ..CpuFeatures::none()
        };
        let avx = CpuFeatures {
            avx2: detected.avx2,
            ..sse
        };
        let mut tiers = vec![sse, avx, detected];
        tiers.dedup();
        tiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detected_features_are_consistent() {
        let features = CpuFeatures::detect();
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            assert!(!features.sse41 && !features.avx2 && !features.fma);
        }
        #[cfg(not(target_arch = "aarch64"))]
        {
            assert!(!features.neon);
        }
        if features.avx2 {
            assert!(features.sse41, "AVX2 implies SSE4.1");
        }
        assert_eq!(CpuFeatures::none(), CpuFeatures::default());
    }

    #[test]
    fn test_tiers_never_exceed_detected() {
        let detected = CpuFeatures::detect();
        let tiers = CpuFeatures::detected_tiers();
        assert_eq!(tiers.last(), Some(&detected));
        for tier in tiers {
            assert!(!tier.sse41 || detected.sse41);
            assert!(!tier.avx2 || detected.avx2);
            assert!(!tier.fma || detected.fma);
            assert!(!tier.neon || detected.neon);
        }
    }
}
