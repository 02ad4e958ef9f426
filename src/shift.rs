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
use crate::MergeError;

/// Vertical misalignment between the white and the UV sensor, in whole rows.
///
/// Positive values push the white image down: composite row `y` takes white
/// row `y - shift` and the first `shift` rows have no white data.
/// Negative values push the UV image down in the same manner.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub struct RowShift(pub i32);

impl RowShift {
    pub const ALIGNED: RowShift = RowShift(0);

    #[inline]
    pub fn rows(&self) -> i32 {
        self.0
    }

    /// Rows the white image is displaced by.
    #[inline]
    pub fn white_offset(&self) -> usize {
        if self.0 > 0 {
            self.0.unsigned_abs() as usize
        } else {
            0
        }
    }

    /// Rows the UV image is displaced by.
    #[inline]
    pub fn uv_offset(&self) -> usize {
        if self.0 < 0 {
            self.0.unsigned_abs() as usize
        } else {
            0
        }
    }

    /// Shift must leave at least one row of the displaced image in the composite.
    pub fn check(&self, height: usize) -> Result<(), MergeError> {
        if self.0.unsigned_abs() as usize >= height {
            return Err(MergeError::ShiftOutOfRange {
                shift: self.0,
                height,
            });
        }
        Ok(())
    }
}
