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

use crate::BlurError;

pub(crate) trait SafeAdd<T: Copy> {
    fn safe_add(&self, other: T) -> Result<T, BlurError>;
}

pub(crate) trait SafeMul<T: Copy> {
    fn safe_mul(&self, other: T) -> Result<T, BlurError>;
}

macro_rules! safe_math_impl {
    ($type_name: ident) => {
        impl SafeAdd<$type_name> for $type_name {
            #[inline(always)]
            fn safe_add(&self, other: $type_name) -> Result<$type_name, BlurError> {
                self.checked_add(other)
                    .ok_or(BlurError::ExceedingPointerSize)
            }
        }

        impl SafeMul<$type_name> for $type_name {
            #[inline(always)]
            fn safe_mul(&self, other: $type_name) -> Result<$type_name, BlurError> {
                self.checked_mul(other)
                    .ok_or(BlurError::ExceedingPointerSize)
            }
        }
    };
}

safe_math_impl!(usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_math_overflow() {
        assert_eq!(3usize.safe_mul(4), Ok(12));
        assert_eq!(usize::MAX.safe_add(1), Err(BlurError::ExceedingPointerSize));
        assert_eq!(
            (usize::MAX / 2).safe_mul(3),
            Err(BlurError::ExceedingPointerSize)
        );
    }
}
