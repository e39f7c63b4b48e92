//! The decoded image, ready to be written out.

use bytemuck::{Pod, Zeroable};

use crate::png::PngColorType;

/// Red, Green, Blue, 8 bits each.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGB888 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}

/// Pixel data with its dimensions.
///
/// Samples are one byte each, row-major, with the channels of each pixel
/// interleaved (`Y` for grayscale, `R G B` for color). There's no padding
/// between rows.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelRaster {
  width: u32,
  height: u32,
  color: PngColorType,
  pixels: Vec<u8>,
}
impl core::fmt::Debug for PixelRaster {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PixelRaster")
      .field("width", &self.width)
      .field("height", &self.height)
      .field("color", &self.color)
      .field("pixels", &(&self.pixels[..self.pixels.len().min(12)], self.pixels.len()))
      .finish()
  }
}
impl PixelRaster {
  /// ## Panics
  /// * If `pixels` isn't exactly `width * height * channels` bytes.
  #[must_use]
  pub fn new(width: u32, height: u32, color: PngColorType, pixels: Vec<u8>) -> Self {
    assert_eq!(
      (width as usize) * (height as usize) * color.channel_count(),
      pixels.len(),
      "pixel buffer doesn't match the dimensions"
    );
    Self { width, height, color, pixels }
  }
  #[inline]
  #[must_use]
  pub const fn width(&self) -> u32 {
    self.width
  }
  #[inline]
  #[must_use]
  pub const fn height(&self) -> u32 {
    self.height
  }
  #[inline]
  #[must_use]
  pub const fn color(&self) -> PngColorType {
    self.color
  }
  #[inline]
  #[must_use]
  pub const fn channels(&self) -> usize {
    self.color.channel_count()
  }
  #[inline]
  #[must_use]
  pub fn pixels(&self) -> &[u8] {
    &self.pixels
  }
  #[inline]
  #[must_use]
  pub fn into_pixels(self) -> Vec<u8> {
    self.pixels
  }

  /// The samples of row `y`, or `None` if that's past the bottom.
  #[inline]
  #[must_use]
  pub fn row(&self, y: u32) -> Option<&[u8]> {
    let stride = self.width as usize * self.channels();
    if stride == 0 {
      return None;
    }
    self.pixels.chunks_exact(stride).nth(y as usize)
  }

  /// The pixels of a color raster, as RGB values.
  ///
  /// Grayscale rasters give `None`.
  #[inline]
  #[must_use]
  pub fn rgb_pixels(&self) -> Option<&[RGB888]> {
    match self.color {
      PngColorType::RGB => bytemuck::try_cast_slice(&self.pixels).ok(),
      PngColorType::Y => None,
    }
  }

  /// The Netpbm format number for writing this raster: `5` (graymap) or `6`
  /// (pixmap).
  #[inline]
  #[must_use]
  pub const fn netpbm_tag(&self) -> u8 {
    match self.color {
      PngColorType::Y => 5,
      PngColorType::RGB => 6,
    }
  }
}
