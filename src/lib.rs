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

#![allow(clippy::too_many_arguments, clippy::int_plus_one)]
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Separable gaussian blur for 8-bit interleaved images.
//!
//! [GaussianBlur] derives a normalized kernel from `sigma` and `epsilon`,
//! allocates all scratch memory once and then blurs any number of images of
//! the configured size, using SSE4.1, AVX2 or NEON when available.

mod binomial;
mod channels_configuration;
mod cpu_features;
mod gaussian;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod gaussian_blur_image;
mod image;
mod mlaf;
mod safe_math;
mod util;

pub use binomial::{gaussian_blur_3x3, gaussian_blur_3x3_image};
pub use channels_configuration::FastBlurChannels;
pub use cpu_features::CpuFeatures;
pub use gaussian::{
    create_gaussian_blur, gaussian_blur, GaussianBlur, GaussianBlurParams, GaussianBlurPass,
    GaussianKernel, RowWindow, DEFAULT_ALIGNMENT, DEFAULT_EPSILON,
};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use gaussian_blur_image::gaussian_blur_image;
pub use image::{BlurImage, BlurImageMut, BufferStore};
pub use util::{BlurError, MismatchedSize};
