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
#![cfg_attr(docsrs, feature(doc_cfg))]
//! Composes a white-light and an ultraviolet capture of the same scene into a
//! single three channel image.
//!
//! The composite carries the white capture's blue channel as blue and the UV
//! capture's blue channel as green, red is left empty. Sensors are physically
//! offset, so one of the captures is displaced by a whole number of rows, see
//! [RowShift].
//!
//! ```
//! use uvmerge::{merge, ChannelOrder, MergeImage, RowShift, ThreadingPolicy};
//!
//! let white = vec![7u8; 4 * 4 * 3];
//! let uv = vec![5u8; 4 * 4 * 3];
//! let white = MergeImage::borrow(&white, 4, 4, ChannelOrder::Bgr);
//! let uv = MergeImage::borrow(&uv, 4, 4, ChannelOrder::Bgr);
//! let composite = merge(&white, &uv, RowShift(1), ThreadingPolicy::Adaptive).unwrap();
//! assert_eq!(composite.pixel(0, 0).blue, 0);
//! assert_eq!(composite.pixel(0, 1).blue, 7);
//! assert_eq!(composite.pixel(0, 0).green, 5);
//! ```

mod channel_order;
mod image;
mod img_size;
mod merge;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod merge_image;
mod shift;
mod threading_policy;
mod util;

pub use channel_order::ChannelOrder;
pub use self::image::{BufferStore, MergeImage, MergeImageMut, Pixel};
pub use img_size::ImageSize;
pub use merge::{merge, merge_into};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use merge_image::merge_dynamic_images;
pub use shift::RowShift;
pub use threading_policy::ThreadingPolicy;
pub use util::{MergeError, MismatchedSize};
