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
use crate::{ChannelOrder, MergeError, MergeImage, MergeImageMut, Pixel, RowShift, ThreadingPolicy};
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::prelude::ParallelSliceMut;

/// Builds white/UV composite into a newly allocated image.
///
/// See [merge_into] for the composition rules.
///
/// # Arguments
///
/// * `white`: Capture under white light.
/// * `uv`: Capture under ultraviolet light, same channel order as `white`.
/// * `shift`: Sensor misalignment in rows, see [RowShift].
/// * `threading_policy`: see [ThreadingPolicy] for more info.
///
pub fn merge(
    white: &MergeImage,
    uv: &MergeImage,
    shift: RowShift,
    threading_policy: ThreadingPolicy,
) -> Result<MergeImageMut<'static>, MergeError> {
    let mut composite = MergeImageMut::default();
    merge_into(white, uv, &mut composite, shift, threading_policy)?;
    Ok(composite)
}

/// Builds white/UV composite into `destination`.
///
/// Composite has the size of the region covered by both sources,
/// `min(white.width, uv.width) x min(white.height, uv.height)`, larger sources are
/// read from their top-left corner only. For every composite pixel:
///
/// * red is always 0;
/// * blue is the blue channel of `white`, displaced down by [RowShift::white_offset] rows;
/// * green is the blue channel of `uv`, displaced down by [RowShift::uv_offset] rows.
///
/// Rows where the displaced source has no data yet are zero in its channel.
///
/// Owned destination is reallocated and zero filled, borrowed destination must
/// match composite size and channel order exactly.
///
/// # Arguments
///
/// * `white`: Capture under white light.
/// * `uv`: Capture under ultraviolet light, same channel order as `white`.
/// * `destination`: Composite storage.
/// * `shift`: Sensor misalignment in rows, magnitude must be less than composite height.
/// * `threading_policy`: see [ThreadingPolicy] for more info.
///
pub fn merge_into(
    white: &MergeImage,
    uv: &MergeImage,
    destination: &mut MergeImageMut,
    shift: RowShift,
    threading_policy: ThreadingPolicy,
) -> Result<(), MergeError> {
    white.check_layout()?;
    uv.check_layout()?;
    if white.order != uv.order {
        return Err(MergeError::ChannelOrderMismatch);
    }
    let order = white.order;
    let size = white.size().min(uv.size());
    shift.check(size.height)?;
    destination.prepare(size, order)?;

    let pool = threading_policy.pool(size.width as u32, size.height as u32)?;

    tracing::debug!(
        width = size.width,
        height = size.height,
        shift = shift.rows(),
        threads = pool.as_ref().map_or(1, |p| p.current_num_threads()),
        "merging white and uv captures"
    );

    let dst_stride = destination.row_stride();
    let row_bytes = size.width * order.channels();
    let white_offset = shift.white_offset();
    let uv_offset = shift.uv_offset();

    let merge_row = |y: usize, dst_row: &mut [u8]| {
        let white_row = y.checked_sub(white_offset).map(|sy| white.row(sy));
        let uv_row = y.checked_sub(uv_offset).map(|sy| uv.row(sy));
        merge_row_impl(white_row, uv_row, &mut dst_row[..row_bytes], order);
    };

    // Each worker owns one destination row and reads sources only, rows never
    // overlap so no synchronization is required.
    let dst = destination.data.borrow_mut();
    if let Some(pool) = &pool {
        pool.install(|| {
            dst.par_chunks_mut(dst_stride)
                .take(size.height)
                .enumerate()
                .for_each(|(y, dst_row)| merge_row(y, dst_row));
        });
    } else {
        dst.chunks_mut(dst_stride)
            .take(size.height)
            .enumerate()
            .for_each(|(y, dst_row)| merge_row(y, dst_row));
    }
    Ok(())
}

/// `None` source means the displaced image has not reached this row.
#[inline]
fn merge_row_impl(
    white_row: Option<&[u8]>,
    uv_row: Option<&[u8]>,
    dst_row: &mut [u8],
    order: ChannelOrder,
) {
    let cn = order.channels();
    let blue = order.blue_index();
    for (x, dst) in dst_row.chunks_exact_mut(cn).enumerate() {
        let px = x * cn + blue;
        Pixel {
            blue: white_row.map_or(0, |row| row[px]),
            green: uv_row.map_or(0, |row| row[px]),
            red: 0,
        }
        .write(dst, order);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;

    fn filled(width: usize, height: usize, px: Pixel) -> Vec<u8> {
        let mut data = vec![0u8; width * height * 3];
        for dst in data.chunks_exact_mut(3) {
            px.write(dst, ChannelOrder::Bgr);
        }
        data
    }

    fn gradient(width: usize, height: usize, seed: u8) -> Vec<u8> {
        let mut data = vec![0u8; width * height * 3];
        for (i, dst) in data.iter_mut().enumerate() {
            *dst = (i as u8).wrapping_mul(31).wrapping_add(seed);
        }
        data
    }

    #[test]
    fn test_aligned_copies_blue_channels() {
        let white = filled(2, 2, Pixel::new(30, 20, 10));
        let uv = filled(2, 2, Pixel::new(30, 20, 10));
        let white = MergeImage::borrow(&white, 2, 2, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv, 2, 2, ChannelOrder::Bgr);
        let composite = merge(&white, &uv, RowShift::ALIGNED, ThreadingPolicy::Single).unwrap();
        assert_eq!((composite.width, composite.height), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(composite.pixel(x, y), Pixel::new(30, 30, 0));
            }
        }
    }

    #[test]
    fn test_positive_shift_blanks_leading_white_rows() {
        let white = filled(2, 2, Pixel::new(7, 1, 1));
        let uv = filled(2, 2, Pixel::new(5, 1, 1));
        let white = MergeImage::borrow(&white, 2, 2, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv, 2, 2, ChannelOrder::Bgr);
        let composite = merge(&white, &uv, RowShift(1), ThreadingPolicy::Single).unwrap();
        assert_eq!(composite.data.borrow(), &[0, 5, 0, 0, 5, 0, 7, 5, 0, 7, 5, 0]);
    }

    #[test]
    fn test_negative_shift_blanks_leading_uv_rows() {
        let white = filled(2, 2, Pixel::new(7, 1, 1));
        let uv = filled(2, 2, Pixel::new(5, 1, 1));
        let white = MergeImage::borrow(&white, 2, 2, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv, 2, 2, ChannelOrder::Bgr);
        let composite = merge(&white, &uv, RowShift(-1), ThreadingPolicy::Single).unwrap();
        assert_eq!(composite.data.borrow(), &[7, 0, 0, 7, 0, 0, 7, 5, 0, 7, 5, 0]);
    }

    fn check_shift_properties(width: usize, height: usize, s: i32, policy: ThreadingPolicy) {
        let white_data = gradient(width, height, 3);
        let uv_data = gradient(width, height, 101);
        let white = MergeImage::borrow(&white_data, width as u32, height as u32, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, width as u32, height as u32, ChannelOrder::Bgr);
        let composite = merge(&white, &uv, RowShift(s), policy).unwrap();
        let k = s.unsigned_abs() as usize;
        for y in 0..height {
            for x in 0..width {
                let px = composite.pixel(x, y);
                assert_eq!(px.red, 0, "Red must be empty at ({x}, {y}), shift {s}");
                let (expected_blue, expected_green) = if s >= 0 {
                    let blue = if y < k { 0 } else { white.pixel(x, y - k).blue };
                    (blue, uv.pixel(x, y).blue)
                } else {
                    let green = if y < k { 0 } else { uv.pixel(x, y - k).blue };
                    (white.pixel(x, y).blue, green)
                };
                assert_eq!(
                    px.blue, expected_blue,
                    "Blue mismatch at ({x}, {y}), shift {s}, policy {policy:?}"
                );
                assert_eq!(
                    px.green, expected_green,
                    "Green mismatch at ({x}, {y}), shift {s}, policy {policy:?}"
                );
            }
        }
    }

    #[test]
    fn test_shift_properties() {
        for s in [-6, -1, 0, 1, 5] {
            check_shift_properties(13, 9, s, ThreadingPolicy::Single);
        }
    }

    #[test]
    fn test_shift_properties_multithreaded() {
        let policy = ThreadingPolicy::Fixed(NonZeroUsize::new(4).unwrap());
        for s in [-3, 0, 7] {
            check_shift_properties(37, 29, s, policy);
        }
    }

    #[test]
    fn test_threading_does_not_change_output() {
        let (width, height) = (67usize, 53usize);
        let white_data = gradient(width, height, 17);
        let uv_data = gradient(width, height, 59);
        let white = MergeImage::borrow(&white_data, width as u32, height as u32, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, width as u32, height as u32, ChannelOrder::Bgr);
        let single = merge(&white, &uv, RowShift(-4), ThreadingPolicy::Single).unwrap();
        let fixed = merge(
            &white,
            &uv,
            RowShift(-4),
            ThreadingPolicy::Fixed(NonZeroUsize::new(8).unwrap()),
        )
        .unwrap();
        assert_eq!(single.data.borrow(), fixed.data.borrow());
    }

    #[test]
    fn test_dimension_mismatch_clips_to_top_left() {
        let white_data = gradient(4, 4, 9);
        let uv_data = filled(2, 2, Pixel::new(5, 0, 0));
        let white = MergeImage::borrow(&white_data, 4, 4, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, 2, 2, ChannelOrder::Bgr);
        let composite = merge(&white, &uv, RowShift::ALIGNED, ThreadingPolicy::Single).unwrap();
        assert_eq!((composite.width, composite.height), (2, 2));
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(
                    composite.pixel(x, y),
                    Pixel::new(white.pixel(x, y).blue, 5, 0)
                );
            }
        }
    }

    #[test]
    fn test_output_size_is_element_wise_minimum() {
        let white_data = vec![1u8; 5 * 2 * 3];
        let uv_data = vec![1u8; 3 * 4 * 3];
        let white = MergeImage::borrow(&white_data, 5, 2, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, 3, 4, ChannelOrder::Bgr);
        let composite = merge(&white, &uv, RowShift(1), ThreadingPolicy::Single).unwrap();
        assert_eq!((composite.width, composite.height), (3, 2));
        assert_eq!(composite.data.borrow().len(), 3 * 2 * 3);
    }

    #[test]
    fn test_strided_sources_match_packed() {
        let (width, height) = (5usize, 4usize);
        let packed = gradient(width, height, 42);
        let stride = width * 3 + 7;
        let mut padded = vec![255u8; stride * height];
        for (src, dst) in packed
            .chunks_exact(width * 3)
            .zip(padded.chunks_exact_mut(stride))
        {
            dst[..width * 3].copy_from_slice(src);
        }
        let packed_image =
            MergeImage::borrow(&packed, width as u32, height as u32, ChannelOrder::Bgr);
        let padded_image = MergeImage::borrow_with_stride(
            &padded,
            width as u32,
            height as u32,
            stride as u32,
            ChannelOrder::Bgr,
        );
        let expected = merge(
            &packed_image,
            &packed_image,
            RowShift(2),
            ThreadingPolicy::Single,
        )
        .unwrap();
        let received = merge(
            &padded_image,
            &padded_image,
            RowShift(2),
            ThreadingPolicy::Single,
        )
        .unwrap();
        assert_eq!(expected.data.borrow(), received.data.borrow());
    }

    #[test]
    fn test_rgb_order_reads_and_writes_blue_at_last_byte() {
        let white_data = [1u8, 2, 30, 1, 2, 31];
        let uv_data = [4u8, 5, 60, 4, 5, 61];
        let white = MergeImage::borrow(&white_data, 1, 2, ChannelOrder::Rgb);
        let uv = MergeImage::borrow(&uv_data, 1, 2, ChannelOrder::Rgb);
        let composite = merge(&white, &uv, RowShift::ALIGNED, ThreadingPolicy::Single).unwrap();
        assert_eq!(composite.order, ChannelOrder::Rgb);
        assert_eq!(composite.data.borrow(), &[0, 60, 30, 0, 61, 31]);
    }

    #[test]
    fn test_borrowed_destination_keeps_padding() {
        let white_data = filled(2, 2, Pixel::new(9, 0, 0));
        let uv_data = filled(2, 2, Pixel::new(4, 0, 0));
        let white = MergeImage::borrow(&white_data, 2, 2, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, 2, 2, ChannelOrder::Bgr);
        let mut storage = vec![200u8; 8 * 2];
        let mut dst = MergeImageMut::borrow_with_stride(&mut storage, 2, 2, 8, ChannelOrder::Bgr);
        merge_into(&white, &uv, &mut dst, RowShift::ALIGNED, ThreadingPolicy::Single).unwrap();
        assert_eq!(
            storage,
            vec![9, 4, 0, 9, 4, 0, 200, 200, 9, 4, 0, 9, 4, 0, 200, 200]
        );
    }

    #[test]
    fn test_borrowed_destination_of_wrong_size_is_untouched() {
        let white_data = filled(2, 2, Pixel::new(9, 0, 0));
        let uv_data = filled(2, 2, Pixel::new(4, 0, 0));
        let white = MergeImage::borrow(&white_data, 2, 2, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, 2, 2, ChannelOrder::Bgr);
        let mut storage = vec![200u8; 3 * 3 * 3];
        let mut dst = MergeImageMut::borrow(&mut storage, 3, 3, ChannelOrder::Bgr);
        assert_eq!(
            merge_into(&white, &uv, &mut dst, RowShift::ALIGNED, ThreadingPolicy::Single),
            Err(MergeError::ImagesMustMatch)
        );
        assert!(storage.iter().all(|&x| x == 200));
    }

    #[test]
    fn test_rejects_shift_reaching_height() {
        let data = vec![0u8; 4 * 3 * 3];
        let white = MergeImage::borrow(&data, 4, 3, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&data, 4, 3, ChannelOrder::Bgr);
        for s in [3, -3, 100, i32::MIN] {
            let result = merge(&white, &uv, RowShift(s), ThreadingPolicy::Single);
            assert_eq!(
                result.err(),
                Some(MergeError::ShiftOutOfRange {
                    shift: s,
                    height: 3
                })
            );
        }
    }

    #[test]
    fn test_shift_is_checked_against_clipped_height() {
        let tall = vec![0u8; 2 * 8 * 3];
        let short = vec![0u8; 2 * 2 * 3];
        let white = MergeImage::borrow(&tall, 2, 8, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&short, 2, 2, ChannelOrder::Bgr);
        assert!(merge(&white, &uv, RowShift(2), ThreadingPolicy::Single).is_err());
        assert!(merge(&white, &uv, RowShift(1), ThreadingPolicy::Single).is_ok());
    }

    #[test]
    fn test_rejects_width_overflowing_packed_stride() {
        let data = [0u8; 12];
        let huge = MergeImage::borrow(&data, u32::MAX / 2, 2, ChannelOrder::Bgr);
        let valid = MergeImage::borrow(&data, 2, 2, ChannelOrder::Bgr);
        for (white, uv) in [(&huge, &valid), (&valid, &huge)] {
            let result = merge(white, uv, RowShift::ALIGNED, ThreadingPolicy::Single);
            assert!(
                matches!(
                    result.err(),
                    Some(MergeError::MinimumSliceSizeMismatch(_))
                        | Some(MergeError::ExceedingPointerSize)
                ),
                "Oversized width must be reported as a layout error"
            );
        }
    }

    #[test]
    fn test_multithreaded_padded_borrowed_destination() {
        let (width, height) = (300usize, 260usize);
        let white_data = gradient(width, height, 23);
        let uv_data = gradient(width, height, 71);
        let white =
            MergeImage::borrow(&white_data, width as u32, height as u32, ChannelOrder::Bgr);
        let uv = MergeImage::borrow(&uv_data, width as u32, height as u32, ChannelOrder::Bgr);
        let expected = merge(&white, &uv, RowShift(9), ThreadingPolicy::Single).unwrap();

        let stride = width * 3 + 5;
        // Last row carries no padding.
        let mut storage = vec![211u8; stride * (height - 1) + width * 3];
        let mut dst = MergeImageMut::borrow_with_stride(
            &mut storage,
            width as u32,
            height as u32,
            stride as u32,
            ChannelOrder::Bgr,
        );
        merge_into(
            &white,
            &uv,
            &mut dst,
            RowShift(9),
            ThreadingPolicy::Fixed(NonZeroUsize::new(4).unwrap()),
        )
        .unwrap();
        for y in 0..height {
            for x in 0..width {
                assert_eq!(
                    dst.pixel(x, y),
                    expected.pixel(x, y),
                    "Pixel mismatch at ({x}, {y})"
                );
            }
        }
        for (y, row) in storage.chunks(stride).enumerate() {
            assert!(
                row[width * 3..].iter().all(|&x| x == 211),
                "Padding was overwritten at row {y}"
            );
        }
    }

    #[test]
    fn test_rejects_invalid_buffers() {
        let data = vec![0u8; 12];
        let valid = MergeImage::borrow(&data, 2, 2, ChannelOrder::Bgr);
        let empty = MergeImage::borrow(&data, 0, 2, ChannelOrder::Bgr);
        let short = MergeImage::borrow(&data[..11], 2, 2, ChannelOrder::Bgr);
        let rgb = MergeImage::borrow(&data, 2, 2, ChannelOrder::Rgb);
        assert_eq!(
            merge(&empty, &valid, RowShift::ALIGNED, ThreadingPolicy::Single).err(),
            Some(MergeError::ZeroBaseSize)
        );
        assert!(matches!(
            merge(&valid, &short, RowShift::ALIGNED, ThreadingPolicy::Single).err(),
            Some(MergeError::MinimumSliceSizeMismatch(_))
        ));
        assert_eq!(
            merge(&valid, &rgb, RowShift::ALIGNED, ThreadingPolicy::Single).err(),
            Some(MergeError::ChannelOrderMismatch)
        );
    }
}
