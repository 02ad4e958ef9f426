/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use std::error::Error;

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
/// Shows size mismatching
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MergeError {
    ZeroBaseSize,
    MinimumSliceSizeMismatch(MismatchedSize),
    MinimumStrideSizeMismatch(MismatchedSize),
    ChannelOrderMismatch,
    ImagesMustMatch,
    ShiftOutOfRange { shift: i32, height: usize },
    ExceedingPointerSize,
    ThreadPoolUnavailable,
}

impl Error for MergeError {}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MergeError::MinimumSliceSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum image slice size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            MergeError::MinimumStrideSizeMismatch(size) => f.write_fmt(format_args!(
                "Minimum stride must have size at least {} but it is {}",
                size.expected, size.received
            )),
            MergeError::ZeroBaseSize => f.write_str("Image size must not be zero"),
            MergeError::ChannelOrderMismatch => {
                f.write_str("White and UV images must share the same channel order")
            }
            MergeError::ImagesMustMatch => {
                f.write_str("Destination image must match the composite dimensions")
            }
            MergeError::ShiftOutOfRange { shift, height } => f.write_fmt(format_args!(
                "Row shift {shift} is out of range for composite height {height}"
            )),
            MergeError::ExceedingPointerSize => {
                f.write_str("Image bounds exceed pointer capacity")
            }
            MergeError::ThreadPoolUnavailable => f.write_str("Unable to build worker pool"),
        }
    }
}

/// Validates that `arr` can hold `height` rows of `width` pixels of `cn` bytes
/// separated by `stride` bytes. The last row is not required to carry padding.
pub(crate) fn check_slice_size<T>(
    arr: &[T],
    stride: usize,
    width: usize,
    height: usize,
    cn: usize,
) -> Result<(), MergeError> {
    if width == 0 || height == 0 {
        return Err(MergeError::ZeroBaseSize);
    }
    let row_bytes = width
        .checked_mul(cn)
        .ok_or(MergeError::ExceedingPointerSize)?;
    if stride < row_bytes {
        return Err(MergeError::MinimumStrideSizeMismatch(MismatchedSize {
            expected: row_bytes,
            received: stride,
        }));
    }
    let required = stride
        .checked_mul(height - 1)
        .and_then(|x| x.checked_add(row_bytes))
        .ok_or(MergeError::ExceedingPointerSize)?;
    if arr.len() < required {
        return Err(MergeError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: required,
            received: arr.len(),
        }));
    }
    Ok(())
}
