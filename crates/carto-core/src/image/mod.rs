// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CPU-side representation of decoded raster data.
//!
//! Decoding itself happens upstream (tile loading); this module only holds
//! the decoded result and the shared handle through which several buckets
//! may reference the same pixels.

use crate::math::Extent2D;
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Bytes per pixel of a premultiplied RGBA image.
pub const PIXEL_STRIDE: usize = 4;

/// An error raised when constructing an image from raw parts.
#[derive(Debug)]
pub enum ImageError {
    /// The pixel byte length does not match the declared extent.
    SizeMismatch {
        /// The byte length implied by the extent.
        expected: usize,
        /// The byte length actually supplied.
        actual: usize,
    },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::SizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Pixel buffer length {actual} does not match extent (expected {expected})"
                )
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// A decoded raster image with premultiplied alpha, ready for GPU upload.
///
/// Color channels are pre-multiplied by alpha, as required by the
/// compositing math on the dispatcher side. The pixel data is immutable
/// once decoded; mutation happens by replacing the whole image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PremultipliedImage {
    size: Extent2D,
    pixels: Vec<u8>,
}

impl PremultipliedImage {
    /// Creates a fully transparent image of the given extent.
    pub fn new(size: Extent2D) -> Self {
        Self {
            pixels: vec![0; size.area() as usize * PIXEL_STRIDE],
            size,
        }
    }

    /// Wraps an already-decoded pixel buffer.
    ///
    /// ## Errors
    /// * `ImageError::SizeMismatch` - If `pixels` is not exactly
    ///   `width * height * 4` bytes long.
    pub fn from_raw(size: Extent2D, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = size.area() as usize * PIXEL_STRIDE;
        if pixels.len() != expected {
            return Err(ImageError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    /// The pixel extent of the image.
    pub fn size(&self) -> Extent2D {
        self.size
    }

    /// The number of bytes in one row of pixels.
    pub fn bytes_per_row(&self) -> u32 {
        self.size.width * PIXEL_STRIDE as u32
    }

    /// The raw premultiplied RGBA bytes, row-major.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

/// A thread-safe, reference-counted handle to a decoded image.
///
/// This acts as a smart pointer, providing shared ownership of the pixel
/// data: the same decoded tile may back several buckets (e.g. zoom-level
/// fallback tiles). Cloning a handle is cheap, as it only increments the
/// reference count. The pixels are deallocated when the last handle drops.
#[derive(Debug, Clone)]
pub struct ImageHandle(Arc<PremultipliedImage>);

impl ImageHandle {
    /// Creates a new handle that takes ownership of the image data.
    pub fn new(image: PremultipliedImage) -> Self {
        Self(Arc::new(image))
    }

    /// Returns `true` if both handles point at the same allocation.
    ///
    /// This is identity, not pixel equality; two handles over identical
    /// pixel content in different allocations compare unequal.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }
}

impl Deref for ImageHandle {
    type Target = PremultipliedImage;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<PremultipliedImage> for ImageHandle {
    fn from(image: PremultipliedImage) -> Self {
        Self::new(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_validates_length() {
        let size = Extent2D::new(2, 2);
        assert!(PremultipliedImage::from_raw(size, vec![0; 16]).is_ok());

        let err = PremultipliedImage::from_raw(size, vec![0; 15]).unwrap_err();
        assert_eq!(
            format!("{err}"),
            "Pixel buffer length 15 does not match extent (expected 16)"
        );
    }

    #[test]
    fn test_handle_shares_pixels() {
        let image = PremultipliedImage::new(Extent2D::new(4, 4));
        let a = ImageHandle::new(image);
        let b = a.clone();
        assert!(ImageHandle::ptr_eq(&a, &b));
        assert_eq!(a.pixels().len(), b.pixels().len());

        let c = ImageHandle::new(PremultipliedImage::new(Extent2D::new(4, 4)));
        assert!(!ImageHandle::ptr_eq(&a, &c));
    }

    #[test]
    fn test_bytes_per_row() {
        let image = PremultipliedImage::new(Extent2D::new(256, 128));
        assert_eq!(image.bytes_per_row(), 1024);
        assert_eq!(image.pixels().len(), 256 * 128 * 4);
    }
}
