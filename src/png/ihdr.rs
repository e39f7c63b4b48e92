use super::*;

/// The types of color that this decoder supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
    }
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = ();
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      _ => return Err(()),
    })
  }
}

/// Names a field of the `IHDR` chunk, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderField {
  Width,
  Height,
  BitDepth,
  ColorType,
  CompressionMethod,
  FilterMethod,
  InterlaceMethod,
}
impl HeaderField {
  /// Describes what values of this field we accept.
  #[must_use]
  pub const fn expected(self) -> &'static str {
    match self {
      Self::Width | Self::Height => "a non-zero size within the dimension limit",
      Self::BitDepth => "8",
      Self::ColorType => "0 or 2",
      Self::CompressionMethod | Self::FilterMethod | Self::InterlaceMethod => "0",
    }
  }
}
impl core::fmt::Display for HeaderField {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.write_str(match self {
      Self::Width => "width",
      Self::Height => "height",
      Self::BitDepth => "bit depth",
      Self::ColorType => "color type",
      Self::CompressionMethod => "compression method",
      Self::FilterMethod => "filter method",
      Self::InterlaceMethod => "interlace method",
    })
  }
}

/// Image Header
///
/// Only 8 bits per channel, non-interlaced, grayscale or RGB images get this
/// far: everything else is rejected while parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// pixel color type
  pub color_type: PngColorType,
}
impl IHDR {
  /// Parses the payload of an `IHDR` chunk.
  ///
  /// Fields are checked in the order they're stored, and the first bad one is
  /// the one reported. Width and height are also checked against
  /// `max_dimension`.
  pub fn interpret(data: &[u8], max_dimension: u32) -> PngResult<Self> {
    let unsupported = |field, value: u8| PngError::UnsupportedFeature { field, value: value.into() };
    match *data {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method] => {
        let width = u32::from_be_bytes([w0, w1, w2, w3]);
        if width == 0 || width > max_dimension {
          return Err(PngError::UnsupportedFeature { field: HeaderField::Width, value: width });
        }
        let height = u32::from_be_bytes([h0, h1, h2, h3]);
        if height == 0 || height > max_dimension {
          return Err(PngError::UnsupportedFeature { field: HeaderField::Height, value: height });
        }
        if bit_depth != 8 {
          return Err(unsupported(HeaderField::BitDepth, bit_depth));
        }
        let color_type = PngColorType::try_from(color_type)
          .map_err(|_| unsupported(HeaderField::ColorType, color_type))?;
        if compression_method != 0 {
          return Err(unsupported(HeaderField::CompressionMethod, compression_method));
        }
        if filter_method != 0 {
          return Err(unsupported(HeaderField::FilterMethod, filter_method));
        }
        if interlace_method != 0 {
          return Err(unsupported(HeaderField::InterlaceMethod, interlace_method));
        }
        Ok(Self { width, height, color_type })
      }
      _ => Err(PngError::MalformedHeader { len: data.len() }),
    }
  }

  /// Samples (and so bytes) per pixel.
  #[inline]
  #[must_use]
  pub const fn channels(&self) -> usize {
    self.color_type.channel_count()
  }

  /// Bytes of sample data in one row, not counting the filter byte.
  pub fn bytes_per_scanline(&self) -> PngResult<usize> {
    (self.width as usize).checked_mul(self.channels()).ok_or(PngError::AllocationFailure)
  }

  /// Gets the buffer size required to perform Zlib decompression.
  ///
  /// Each line is a filter byte plus the line's samples.
  pub fn get_zlib_decompression_requirement(&self) -> PngResult<usize> {
    self
      .bytes_per_scanline()?
      .checked_add(1)
      .and_then(|filterline| filterline.checked_mul(self.height as usize))
      .ok_or(PngError::AllocationFailure)
  }

  /// Gets the buffer size of the final, unfiltered, pixel data.
  pub fn get_raster_requirement(&self) -> PngResult<usize> {
    self
      .bytes_per_scanline()?
      .checked_mul(self.height as usize)
      .ok_or(PngError::AllocationFailure)
  }
}
