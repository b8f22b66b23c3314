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
use crate::util::check_slice_size;
use crate::{BlurError, FastBlurChannels};

/// Pixels behind a [BlurImageMut], either caller memory or an owned buffer.
#[derive(Debug)]
pub enum BufferStore<'a> {
    Borrowed(&'a mut [u8]),
    Owned(Vec<u8>),
}

impl BufferStore<'_> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

/// Read only 8-bit image with interleaved channels.
#[derive(Debug, Copy, Clone)]
pub struct BlurImage<'a> {
    pub data: &'a [u8],
    pub width: usize,
    pub height: usize,
    /// Bytes between starts of two consecutive rows
    pub stride: usize,
    pub channels: FastBlurChannels,
}

impl<'a> BlurImage<'a> {
    /// Borrows tightly packed rows.
    pub fn borrow(data: &'a [u8], width: usize, height: usize, channels: FastBlurChannels) -> Self {
        let stride = width.saturating_mul(channels.channels());
        Self::with_stride(data, width, height, stride, channels)
    }

    /// Borrows rows placed `stride` bytes apart.
    pub fn with_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
        channels: FastBlurChannels,
    ) -> Self {
        Self {
            data,
            width,
            height,
            stride,
            channels,
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), BlurError> {
        check_slice_size(
            self.data,
            self.stride,
            self.width,
            self.height,
            self.channels.channels(),
        )
    }

    /// Both images have the same dimensions and channels.
    #[inline]
    pub fn check_same_shape(&self, other: &BlurImageMut<'_>) -> Result<(), BlurError> {
        if self.width == other.width
            && self.height == other.height
            && self.channels == other.channels
        {
            return Ok(());
        }
        Err(BlurError::ImagesMustMatch)
    }
}

/// Writable 8-bit image with interleaved channels.
///
/// Owned storage follows the layout of the source image it is written from.
#[derive(Debug)]
pub struct BlurImageMut<'a> {
    pub data: BufferStore<'a>,
    pub width: usize,
    pub height: usize,
    /// Bytes between starts of two consecutive rows
    pub stride: usize,
    pub channels: FastBlurChannels,
}

impl Default for BlurImageMut<'_> {
    fn default() -> Self {
        BlurImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
            stride: 0,
            channels: FastBlurChannels::Plane,
        }
    }
}

impl<'a> BlurImageMut<'a> {
    /// Allocates a zeroed image with tightly packed rows.
    pub fn alloc(
        width: usize,
        height: usize,
        channels: FastBlurChannels,
    ) -> Result<Self, BlurError> {
        let stride = width.safe_mul(channels.channels())?;
        Ok(Self {
            data: BufferStore::Owned(vec![0u8; stride.safe_mul(height)?]),
            width,
            height,
            stride,
            channels,
        })
    }

    /// Mutably borrows tightly packed rows.
    pub fn borrow(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        channels: FastBlurChannels,
    ) -> Self {
        let stride = width.saturating_mul(channels.channels());
        Self::with_stride(data, width, height, stride, channels)
    }

    /// Mutably borrows rows placed `stride` bytes apart.
    pub fn with_stride(
        data: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
        channels: FastBlurChannels,
    ) -> Self {
        Self {
            data: BufferStore::Borrowed(data),
            width,
            height,
            stride,
            channels,
        }
    }

    /// Checks that the storage can hold the image.
    ///
    /// Owned storage is reshaped to `source` instead of being checked.
    pub fn check_layout(&mut self, source: Option<&BlurImage<'_>>) -> Result<(), BlurError> {
        if let (Some(source), BufferStore::Owned(vec)) = (source, &mut self.data) {
            let stride = source.width.safe_mul(source.channels.channels())?;
            vec.resize(stride.safe_mul(source.height)?, 0);
            self.width = source.width;
            self.height = source.height;
            self.stride = stride;
            self.channels = source.channels;
            return Ok(());
        }
        check_slice_size(
            self.data.borrow(),
            self.stride,
            self.width,
            self.height,
            self.channels.channels(),
        )
    }

    /// Pixels as one vector, rows keep their stride.
    pub fn into_vec(self) -> Vec<u8> {
        match self.data {
            BufferStore::Borrowed(p_ref) => p_ref.to_vec(),
            BufferStore::Owned(vec) => vec,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owned_destination_follows_source_layout() {
        let src = vec![7u8; 5 * 3 * 2];
        let src_image = BlurImage::borrow(&src, 5, 3, FastBlurChannels::Channels2);
        let mut dst = BlurImageMut::default();
        dst.check_layout(Some(&src_image)).unwrap();
        assert_eq!(dst.width, 5);
        assert_eq!(dst.height, 3);
        assert_eq!(dst.stride, 10);
        assert_eq!(dst.data.borrow().len(), 30);
        assert!(src_image.check_same_shape(&dst).is_ok());
        assert_eq!(dst.into_vec(), vec![0u8; 30]);
    }

    #[test]
    fn test_borrowed_destination_is_checked() {
        let mut dst = vec![0u8; 8];
        let mut dst_image = BlurImageMut::borrow(&mut dst, 4, 4, FastBlurChannels::Plane);
        assert!(matches!(
            dst_image.check_layout(None),
            Err(BlurError::MinimumSliceSizeMismatch(_))
        ));
    }

    #[test]
    fn test_padded_rows() {
        let data = vec![1u8; 10 * 2 + 6];
        let image = BlurImage::with_stride(&data, 2, 3, 10, FastBlurChannels::Channels3);
        assert!(image.check_layout().is_ok());
        let image = BlurImage::with_stride(&data, 2, 3, 5, FastBlurChannels::Channels3);
        assert!(matches!(
            image.check_layout(),
            Err(BlurError::MinimumStrideSizeMismatch(_))
        ));
    }

    #[test]
    fn test_alloc_overflow() {
        assert_eq!(
            BlurImageMut::alloc(usize::MAX / 2, 2, FastBlurChannels::Channels4).unwrap_err(),
            BlurError::ExceedingPointerSize
        );
        let image = BlurImageMut::alloc(3, 2, FastBlurChannels::Channels4).unwrap();
        assert_eq!(image.stride, 12);
        assert_eq!(image.data.borrow().len(), 24);
    }
}
