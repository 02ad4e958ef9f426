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

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use uvmerge::{ChannelOrder, MergeImage, MergeImageMut, RowShift, ThreadingPolicy};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImages {
    pub white_width: u8,
    pub white_height: u8,
    pub uv_width: u8,
    pub uv_height: u8,
    pub white_padding: u8,
    pub uv_padding: u8,
    pub shift: i16,
    pub value: u8,
    pub rgb: bool,
    pub borrowed: bool,
    pub threaded: bool,
}

fuzz_target!(|data: SrcImages| {
    let order = if data.rgb {
        ChannelOrder::Rgb
    } else {
        ChannelOrder::Bgr
    };
    let white_stride = data.white_width as usize * 3 + data.white_padding as usize % 8;
    let uv_stride = data.uv_width as usize * 3 + data.uv_padding as usize % 8;
    let white_data = vec![data.value; white_stride * data.white_height as usize];
    let uv_data = vec![data.value.wrapping_add(1); uv_stride * data.uv_height as usize];
    let white = MergeImage::borrow_with_stride(
        &white_data,
        data.white_width as u32,
        data.white_height as u32,
        white_stride as u32,
        order,
    );
    let uv = MergeImage::borrow_with_stride(
        &uv_data,
        data.uv_width as u32,
        data.uv_height as u32,
        uv_stride as u32,
        order,
    );
    let policy = if data.threaded {
        ThreadingPolicy::Adaptive
    } else {
        ThreadingPolicy::Single
    };

    let width = data.white_width.min(data.uv_width) as usize;
    let height = data.white_height.min(data.uv_height) as usize;
    let shift = RowShift(data.shift as i32);

    let mut storage = vec![0u8; width * height * 3];
    let mut dst = if data.borrowed {
        MergeImageMut::borrow(&mut storage, width as u32, height as u32, order)
    } else {
        MergeImageMut::default()
    };

    let valid = width > 0 && height > 0 && (shift.rows().unsigned_abs() as usize) < height;
    let result = uvmerge::merge_into(&white, &uv, &mut dst, shift, policy);
    assert_eq!(result.is_ok(), valid, "{result:?}");
    if result.is_ok() {
        for y in 0..height {
            for x in 0..width {
                assert_eq!(dst.pixel(x, y).red, 0);
            }
        }
    }
});
