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
use crate::util::check_slice_size;
use crate::{ChannelOrder, ImageSize, MergeError};
use std::borrow::Cow;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    /// Drops previous content of an owned store and refills it with `value`.
    /// Borrowed stores are left as is.
    pub(crate) fn reset(&mut self, new_size: usize, value: T) {
        match self {
            Self::Borrowed(_) => {}
            Self::Owned(vec) => {
                vec.clear();
                vec.resize(new_size, value);
            }
        }
    }
}

/// Packed stride of `width` pixels, 0 (resolved lazily by `row_stride`) if it
/// overflows `u32`.
#[inline]
fn packed_stride(width: u32, order: ChannelOrder) -> u32 {
    width.checked_mul(order.channels() as u32).unwrap_or(0)
}

/// Single composite pixel, channels independent from byte order.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct Pixel {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl Pixel {
    pub const fn new(blue: u8, green: u8, red: u8) -> Pixel {
        Pixel { blue, green, red }
    }

    #[inline]
    pub fn read(px: &[u8], order: ChannelOrder) -> Pixel {
        Pixel {
            blue: px[order.blue_index()],
            green: px[order.green_index()],
            red: px[order.red_index()],
        }
    }

    #[inline]
    pub fn write(&self, px: &mut [u8], order: ChannelOrder) {
        px[order.blue_index()] = self.blue;
        px[order.green_index()] = self.green;
        px[order.red_index()] = self.red;
    }
}

/// Immutable image store
pub struct MergeImage<'a> {
    pub data: Cow<'a, [u8]>,
    pub width: u32,
    pub height: u32,
    /// Image stride, bytes per row, might be 0
    pub stride: u32,
    pub order: ChannelOrder,
}

/// Mutable image store
/// If it owns vector it is resized to the composite on merge.
pub struct MergeImageMut<'a> {
    pub data: BufferStore<'a, u8>,
    pub width: u32,
    pub height: u32,
    /// Image stride, bytes per row, might be 0
    pub stride: u32,
    pub order: ChannelOrder,
}

impl Default for MergeImageMut<'_> {
    fn default() -> Self {
        MergeImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
            stride: 0,
            order: ChannelOrder::Bgr,
        }
    }
}

impl<'a> MergeImage<'a> {
    /// Borrows existing data
    /// Stride will be default `width * 3`, or 0 when it does not fit `u32`
    pub fn borrow(arr: &'a [u8], width: u32, height: u32, order: ChannelOrder) -> Self {
        Self {
            data: Cow::Borrowed(arr),
            width,
            height,
            stride: packed_stride(width, order),
            order,
        }
    }

    /// Borrows existing data having padded rows
    pub fn borrow_with_stride(
        arr: &'a [u8],
        width: u32,
        height: u32,
        stride: u32,
        order: ChannelOrder,
    ) -> Self {
        Self {
            data: Cow::Borrowed(arr),
            width,
            height,
            stride,
            order,
        }
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> usize {
        if self.stride == 0 {
            (self.width as usize).saturating_mul(self.order.channels())
        } else {
            self.stride as usize
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), MergeError> {
        check_slice_size(
            self.data.as_ref(),
            self.row_stride(),
            self.width as usize,
            self.height as usize,
            self.order.channels(),
        )
    }

    /// Pixels of row `y`, padding excluded.
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.row_stride();
        &self.data.as_ref()[start..start + self.width as usize * self.order.channels()]
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        let cn = self.order.channels();
        Pixel::read(&self.row(y)[x * cn..x * cn + cn], self.order)
    }

    /// Deep clone as mutable image
    pub fn clone_as_mut<'f>(&self) -> MergeImageMut<'f> {
        MergeImageMut {
            data: BufferStore::Owned(self.data.to_vec()),
            width: self.width,
            height: self.height,
            stride: self.stride,
            order: self.order,
        }
    }
}

impl<'a> MergeImageMut<'a> {
    /// Mutable borrows existing data
    /// Stride will be default `width * 3`, or 0 when it does not fit `u32`
    pub fn borrow(arr: &'a mut [u8], width: u32, height: u32, order: ChannelOrder) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride: packed_stride(width, order),
            order,
        }
    }

    /// Mutable borrows existing data having padded rows
    pub fn borrow_with_stride(
        arr: &'a mut [u8],
        width: u32,
        height: u32,
        stride: u32,
        order: ChannelOrder,
    ) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
            stride,
            order,
        }
    }

    #[inline]
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width as usize, self.height as usize)
    }

    /// Returns row stride
    #[inline]
    pub fn row_stride(&self) -> usize {
        if self.stride == 0 {
            (self.width as usize).saturating_mul(self.order.channels())
        } else {
            self.stride as usize
        }
    }

    #[inline]
    pub fn check_layout(&self) -> Result<(), MergeError> {
        check_slice_size(
            self.data.borrow(),
            self.row_stride(),
            self.width as usize,
            self.height as usize,
            self.order.channels(),
        )
    }

    /// Makes the store ready to receive a composite of `size`.
    ///
    /// Owned storage is reallocated packed and zero filled, borrowed storage
    /// must already describe exactly `size` and `order`.
    pub(crate) fn prepare(
        &mut self,
        size: ImageSize,
        order: ChannelOrder,
    ) -> Result<(), MergeError> {
        if matches!(self.data, BufferStore::Owned(_)) {
            let width = u32::try_from(size.width).map_err(|_| MergeError::ExceedingPointerSize)?;
            let height =
                u32::try_from(size.height).map_err(|_| MergeError::ExceedingPointerSize)?;
            let stride = width
                .checked_mul(order.channels() as u32)
                .ok_or(MergeError::ExceedingPointerSize)?;
            let len = (stride as usize)
                .checked_mul(size.height)
                .ok_or(MergeError::ExceedingPointerSize)?;
            self.width = width;
            self.height = height;
            self.stride = stride;
            self.order = order;
            self.data.reset(len, 0);
            return Ok(());
        }
        self.check_layout()?;
        if self.size() != size || self.order != order {
            return Err(MergeError::ImagesMustMatch);
        }
        Ok(())
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        let cn = self.order.channels();
        let start = y * self.row_stride() + x * cn;
        Pixel::read(&self.data.borrow()[start..start + cn], self.order)
    }

    #[inline]
    pub fn to_immutable_ref(&self) -> MergeImage<'_> {
        MergeImage {
            data: Cow::Borrowed(self.data.borrow()),
            stride: self.stride,
            width: self.width,
            height: self.height,
            order: self.order,
        }
    }
}
