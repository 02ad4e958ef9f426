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
use crate::{
    merge, BufferStore, ChannelOrder, MergeError, MergeImage, MismatchedSize, RowShift,
    ThreadingPolicy,
};
use image::{DynamicImage, RgbImage};

/// Builds white/UV composite from images provided by image crate.
///
/// Both captures are converted into 8-bit RGB first, so any decodable color type
/// is accepted. Result is always [DynamicImage::ImageRgb8].
///
/// # Arguments
///
/// * `white`: Capture under white light.
/// * `uv`: Capture under ultraviolet light.
/// * `shift`: Sensor misalignment in rows, see [RowShift].
/// * `threading_policy`: see [ThreadingPolicy] for more info.
///
#[tracing::instrument(
    skip(white, uv),
    fields(
        white_size = ?(white.width(), white.height()),
        uv_size = ?(uv.width(), uv.height())
    )
)]
pub fn merge_dynamic_images(
    white: &DynamicImage,
    uv: &DynamicImage,
    shift: RowShift,
    threading_policy: ThreadingPolicy,
) -> Result<DynamicImage, MergeError> {
    let white = white.to_rgb8();
    let uv = uv.to_rgb8();
    let white_image = MergeImage::borrow(&white, white.width(), white.height(), ChannelOrder::Rgb);
    let uv_image = MergeImage::borrow(&uv, uv.width(), uv.height(), ChannelOrder::Rgb);

    let composite = merge(&white_image, &uv_image, shift, threading_policy)?;
    let width = composite.width;
    let height = composite.height;
    let received = composite.data.borrow().len();
    let raw = match composite.data {
        BufferStore::Owned(vec) => vec,
        BufferStore::Borrowed(slice) => slice.to_vec(),
    };
    let rgb = RgbImage::from_raw(width, height, raw).ok_or(
        MergeError::MinimumSliceSizeMismatch(MismatchedSize {
            expected: width as usize * height as usize * 3,
            received,
        }),
    )?;
    Ok(DynamicImage::ImageRgb8(rgb))
}
