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

use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use simdblur::{
    gaussian_blur_3x3, CpuFeatures, FastBlurChannels, GaussianBlur, GaussianBlurParams,
};

const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let src_bytes: Vec<u8> = (0..WIDTH * HEIGHT * 4).map(|_| rng.random()).collect();

    for (channels, name) in [
        (FastBlurChannels::Plane, "Gray"),
        (FastBlurChannels::Channels3, "RGB"),
        (FastBlurChannels::Channels4, "RGBA"),
    ] {
        let stride = WIDTH * channels.channels();
        let src = &src_bytes[..stride * HEIGHT];
        for sigma in [0.8f32, 1.5, 3., 10.] {
            let params = GaussianBlurParams::new(WIDTH, HEIGHT, channels, sigma);
            let mut blur = GaussianBlur::new(params).unwrap();
            let backend = blur.backend();
            c.bench_function(
                &format!("{name} gauss blur sigma {sigma}: {backend}"),
                |b| {
                    let mut dst_bytes = vec![0u8; stride * HEIGHT];
                    b.iter(|| {
                        blur.run(src, stride, &mut dst_bytes, stride).unwrap();
                    })
                },
            );

            let mut scalar = GaussianBlur::with_features(params, CpuFeatures::none()).unwrap();
            c.bench_function(&format!("{name} gauss blur sigma {sigma}: scalar"), |b| {
                let mut dst_bytes = vec![0u8; stride * HEIGHT];
                b.iter(|| {
                    scalar.run(src, stride, &mut dst_bytes, stride).unwrap();
                })
            });
        }

        c.bench_function(&format!("{name} gauss blur 3x3"), |b| {
            let mut dst_bytes = vec![0u8; stride * HEIGHT];
            b.iter(|| {
                gaussian_blur_3x3(src, stride, &mut dst_bytes, stride, WIDTH, HEIGHT, channels)
                    .unwrap();
            })
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
