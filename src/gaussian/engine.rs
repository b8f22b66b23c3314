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

use crate::gaussian::blur_pass::GaussianBlurPass;
use crate::gaussian::dispatch::select_blur_pass;
use crate::gaussian::gaussian_kernel::{kernel_half, GaussianKernel};
use crate::gaussian::pad::pad_cols_dyn;
use crate::gaussian::params::GaussianBlurParams;
use crate::gaussian::row_ring::RowRing;
use crate::safe_math::{SafeAdd, SafeMul};
use crate::util::check_slice_size;
use crate::{BlurError, BlurImage, BlurImageMut, CpuFeatures};

/// Row source and row target of one blur run.
trait RowAccess {
    fn source(&self, y: usize) -> &[u8];
    fn target(&mut self, y: usize) -> &mut [u8];
    /// Copies source row `y` to the target row `y`.
    fn copy_row(&mut self, y: usize);
}

struct SplitRows<'a> {
    src: &'a [u8],
    src_stride: usize,
    dst: &'a mut [u8],
    dst_stride: usize,
    row_size: usize,
}

impl RowAccess for SplitRows<'_> {
    #[inline]
    fn source(&self, y: usize) -> &[u8] {
        let start = y * self.src_stride;
        &self.src[start..start + self.row_size]
    }

    #[inline]
    fn target(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.dst_stride;
        &mut self.dst[start..start + self.row_size]
    }

    #[inline]
    fn copy_row(&mut self, y: usize) {
        let src = y * self.src_stride;
        let dst = y * self.dst_stride;
        self.dst[dst..dst + self.row_size].copy_from_slice(&self.src[src..src + self.row_size]);
    }
}

/// Source and target are the same buffer. Output row `y` is written only after
/// every source row it depends on was consumed into the ring.
struct SharedRows<'a> {
    buf: &'a mut [u8],
    stride: usize,
    row_size: usize,
}

impl RowAccess for SharedRows<'_> {
    #[inline]
    fn source(&self, y: usize) -> &[u8] {
        let start = y * self.stride;
        &self.buf[start..start + self.row_size]
    }

    #[inline]
    fn target(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.buf[start..start + self.row_size]
    }

    #[inline]
    fn copy_row(&mut self, _: usize) {}
}

struct BlurScratch {
    /// One source row with `half` replicated pixels on both sides.
    cols: Vec<u8>,
    rows: RowRing,
    pass: Box<dyn GaussianBlurPass>,
}

impl BlurScratch {
    /// Pads source row and blurs it horizontally into ring `slot`.
    #[inline]
    fn load(&mut self, src: &[u8], half: usize, channels: usize, weights: &[f32], slot: usize) {
        pad_cols_dyn(src, half, channels, &mut self.cols);
        self.pass
            .blur_cols(&self.cols, weights, self.rows.slot_mut(slot));
    }
}

/// Separable gaussian blur for 8-bit interleaved images of fixed dimensions.
///
/// All scratch memory is allocated once on construction, every run reuses it.
/// Every row is blurred horizontally into a ring of `kernel` float rows, each
/// output row is then produced by weighting the ring with the kernel rotated by
/// the ring position. Edges are handled by replicating the border pixels.
///
/// # Example
///
/// ```
/// use simdblur::{FastBlurChannels, GaussianBlur, GaussianBlurParams};
///
/// let params = GaussianBlurParams::new(32, 16, FastBlurChannels::Channels3, 1.5);
/// let mut blur = GaussianBlur::new(params).unwrap();
/// let src = vec![77u8; 32 * 16 * 3];
/// let mut dst = vec![0u8; 32 * 16 * 3];
/// blur.run(&src, 32 * 3, &mut dst, 32 * 3).unwrap();
/// assert!(dst.iter().all(|&v| v == 77));
/// ```
pub struct GaussianBlur {
    params: GaussianBlurParams,
    /// Bytes in one image row.
    row_size: usize,
    kernel: GaussianKernel,
    /// Rows needed to fill the ring before the first output row.
    nose: usize,
    /// Output rows that still consume a new source row.
    body: usize,
    /// `None` for a single tap kernel, blur degrades to a copy then.
    scratch: Option<BlurScratch>,
}

impl GaussianBlur {
    /// Creates a blur using the best backend available on the running CPU.
    pub fn new(params: GaussianBlurParams) -> Result<GaussianBlur, BlurError> {
        GaussianBlur::with_features(params, CpuFeatures::detect())
    }

    /// Creates a blur restricted to the instruction sets enabled in `features`.
    pub fn with_features(
        params: GaussianBlurParams,
        features: CpuFeatures,
    ) -> Result<GaussianBlur, BlurError> {
        params.validate()?;
        let row_size = params.row_size()?;
        let half = kernel_half(params.sigma, params.epsilon)?;
        let nose = (half + 1).min(params.height);
        let body = params.height + 1 - nose;

        // Scratch is the largest allocation, so it goes before the weights
        let scratch = if half == 0 {
            None
        } else {
            let len = half.safe_mul(2)?.safe_add(1)?;
            let rows = RowRing::new(len, row_size, params.alignment)?;
            let padded = half
                .safe_mul(2)?
                .safe_mul(params.channels.channels())?
                .safe_add(row_size)?;
            let mut cols = Vec::new();
            cols.try_reserve_exact(padded)
                .map_err(|_| BlurError::ExceedingPointerSize)?;
            cols.resize(padded, 0u8);
            let pass = select_blur_pass(features, params.channels, len, params.width);
            Some(BlurScratch { cols, rows, pass })
        };
        let kernel = GaussianKernel::new(params.sigma, params.epsilon)?;

        let blur = GaussianBlur {
            params,
            row_size,
            kernel,
            nose,
            body,
            scratch,
        };
        log::debug!(
            "Gaussian blur {}x{}x{}, sigma {}, epsilon {}: half {}, kernel {}, backend {}",
            params.width,
            params.height,
            params.channels.channels(),
            params.sigma,
            params.epsilon,
            half,
            blur.kernel.len(),
            blur.backend()
        );
        Ok(blur)
    }

    #[inline]
    pub fn params(&self) -> &GaussianBlurParams {
        &self.params
    }

    #[inline]
    pub fn kernel(&self) -> &GaussianKernel {
        &self.kernel
    }

    /// Name of the backend selected for this blur, `"copy"` for a single tap kernel.
    pub fn backend(&self) -> &'static str {
        self.scratch
            .as_ref()
            .map(|scratch| scratch.pass.name())
            .unwrap_or("copy")
    }

    /// Blurs `src` into `dst`.
    ///
    /// Strides are in bytes and may exceed the row size, bytes past the row
    /// size are neither read nor written.
    pub fn run(
        &mut self,
        src: &[u8],
        src_stride: usize,
        dst: &mut [u8],
        dst_stride: usize,
    ) -> Result<(), BlurError> {
        let (width, height, cn) = self.dimensions();
        check_slice_size(src, src_stride, width, height, cn)?;
        check_slice_size(dst, dst_stride, width, height, cn)?;
        let mut rows = SplitRows {
            src,
            src_stride,
            dst,
            dst_stride,
            row_size: self.row_size,
        };
        self.blur(&mut rows);
        Ok(())
    }

    /// Blurs `buf` in place.
    pub fn run_in_place(&mut self, buf: &mut [u8], stride: usize) -> Result<(), BlurError> {
        let (width, height, cn) = self.dimensions();
        check_slice_size(buf, stride, width, height, cn)?;
        let mut rows = SharedRows {
            buf,
            stride,
            row_size: self.row_size,
        };
        self.blur(&mut rows);
        Ok(())
    }

    /// Blurs `src` into `dst`, owned destination storage is resized to `src`.
    pub fn blur_image(
        &mut self,
        src: &BlurImage<'_>,
        dst: &mut BlurImageMut<'_>,
    ) -> Result<(), BlurError> {
        src.check_layout()?;
        dst.check_layout(Some(src))?;
        src.check_same_shape(dst)?;
        if src.width != self.params.width
            || src.height != self.params.height
            || src.channels != self.params.channels
        {
            return Err(BlurError::ImagesMustMatch);
        }
        let dst_stride = dst.stride;
        self.run(src.data, src.stride, dst.data.borrow_mut(), dst_stride)
    }

    #[inline]
    fn dimensions(&self) -> (usize, usize, usize) {
        (
            self.params.width,
            self.params.height,
            self.params.channels.channels(),
        )
    }

    fn blur<R: RowAccess>(&mut self, io: &mut R) {
        let height = self.params.height;
        let channels = self.params.channels.channels();
        let (nose, body) = (self.nose, self.body);
        let kernel = &self.kernel;
        let Some(scratch) = self.scratch.as_mut() else {
            log::trace!("Single tap kernel, copying {height} rows");
            for y in 0..height {
                io.copy_row(y);
            }
            return;
        };
        let half = kernel.half();
        let len = kernel.len();
        let weights = kernel.weights();

        // Rows above the image repeat the first row, rows below repeat the last one.
        scratch.load(io.source(0), half, channels, weights, half);
        for slot in 0..half {
            scratch.rows.replicate(half, slot);
        }
        for y in 1..nose {
            scratch.load(io.source(y), half, channels, weights, half + y);
        }
        for y in nose..=half {
            scratch.rows.replicate(half + nose - 1, half + y);
        }
        scratch
            .pass
            .blur_rows(scratch.rows.window(), kernel.rotated(0), io.target(0));

        for y in 1..body {
            let slot = (y + 2 * half) % len;
            scratch.load(io.source(y + half), half, channels, weights, slot);
            scratch.pass.blur_rows(
                scratch.rows.window(),
                kernel.rotated(len - y % len),
                io.target(y),
            );
        }

        let last = (body + 2 * half - 1) % len;
        for y in body..height {
            let slot = (y + 2 * half) % len;
            scratch.rows.replicate(last, slot);
            scratch.pass.blur_rows(
                scratch.rows.window(),
                kernel.rotated(len - y % len),
                io.target(y),
            );
        }
    }
}
