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


#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use simdblur::{CpuFeatures, FastBlurChannels, GaussianBlur, GaussianBlurParams};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub width: u8,
    pub height: u8,
    pub channels: u8,
    pub sigma: u8,
    pub value: u8,
    pub padding: u8,
}

fuzz_target!(|data: SrcImage| {
    let Ok(channels) = FastBlurChannels::try_from(data.channels as usize % 4 + 1) else {
        return;
    };
    fuzz_8bit(
        data.width as usize,
        data.height as usize,
        channels,
        data.sigma as f32 / 16.,
        data.value,
        data.padding as usize % 17,
    );
});

fn fuzz_8bit(
    width: usize,
    height: usize,
    channels: FastBlurChannels,
    sigma: f32,
    value: u8,
    padding: usize,
) {
    if width == 0 || height == 0 || sigma == 0. {
        return;
    }
    let params = GaussianBlurParams::new(width, height, channels, sigma);
    let stride = width * channels.channels() + padding;
    let src_image = vec![value; stride * height];

    for features in [CpuFeatures::detect(), CpuFeatures::none()] {
        let mut blur = GaussianBlur::with_features(params, features).unwrap();
        let mut dst_image = vec![0u8; stride * height];
        blur.run(&src_image, stride, &mut dst_image, stride).unwrap();
        for row in dst_image.chunks_exact(stride) {
            assert!(row[..width * channels.channels()].iter().all(|&v| v == value));
        }

        let mut in_place = src_image.clone();
        blur.run_in_place(&mut in_place, stride).unwrap();
        assert_eq!(in_place, src_image);
    }
}
