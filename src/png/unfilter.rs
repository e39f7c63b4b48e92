//! Reverses the per-scanline filters.
//!
//! From the PNG spec:
//!
//! > Filters are applied to **bytes**, not to pixels, regardless of the bit
//! > depth or color type of the image.
//!
//! With 8 bits per channel a pixel is `channels` bytes, so the "left" byte is
//! always `channels` bytes back. Every prediction reads the output raster,
//! never the filtered input, and bytes without a left or upper neighbor
//! predict with 0 in that position.

use super::*;

/// The filter type that starts each scanline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  None = 0,
  Sub = 1,
  Up = 2,
  Average = 3,
  Paeth = 4,
}
impl TryFrom<u8> for FilterType {
  type Error = ();
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => FilterType::None,
      1 => FilterType::Sub,
      2 => FilterType::Up,
      3 => FilterType::Average,
      4 => FilterType::Paeth,
      _ => return Err(()),
    })
  }
}

/// Picks the neighbor closest to `up + left - upper_left`.
///
/// Ties go to `up`, then `left`, then `upper_left`. Note that this is not the
/// order that most PNG decoders use (they check `left` first), and the order
/// of the tests must not be rearranged.
#[inline]
#[must_use]
pub const fn paeth_predict(up: u8, left: u8, upper_left: u8) -> u8 {
  let up_ = up as i32;
  let left_ = left as i32;
  let upper_left_ = upper_left as i32;
  let p: i32 = up_ + left_ - upper_left_;
  let dist_up = (p - up_).abs();
  let dist_left = (p - left_).abs();
  let dist_upper_left = (p - upper_left_).abs();
  if dist_up <= dist_left && dist_up <= dist_upper_left {
    up
  } else if dist_left <= dist_upper_left {
    left
  } else {
    upper_left
  }
}

/// Unfilters a single scanline.
///
/// * `filtered` is the row's bytes after the filter type byte.
/// * `prior` is the previous row of the output, or `None` for the top row.
/// * `out` receives the reconstructed samples.
///
/// ## Panics
/// * If `filtered`, `out`, and `prior` (when given) aren't all the same
///   length.
pub fn unfilter_scanline(
  filter: FilterType, channels: usize, filtered: &[u8], prior: Option<&[u8]>, out: &mut [u8],
) {
  assert_eq!(filtered.len(), out.len());
  if let Some(prior) = prior {
    assert_eq!(prior.len(), out.len());
  }
  let up = |x: usize| prior.map_or(0, |p| p[x]);

  match filter {
    FilterType::None => out.copy_from_slice(filtered),
    FilterType::Sub => {
      for x in 0..out.len() {
        let left = if x >= channels { out[x - channels] } else { 0 };
        out[x] = filtered[x].wrapping_add(left);
      }
    }
    FilterType::Up => {
      for x in 0..out.len() {
        out[x] = filtered[x].wrapping_add(up(x));
      }
    }
    FilterType::Average => {
      for x in 0..out.len() {
        let left = if x >= channels { out[x - channels] } else { 0 };
        let average = ((left as u32 + up(x) as u32) / 2) as u8;
        out[x] = filtered[x].wrapping_add(average);
      }
    }
    FilterType::Paeth => {
      for x in 0..out.len() {
        let (left, upper_left) =
          if x >= channels { (out[x - channels], up(x - channels)) } else { (0, 0) };
        out[x] = filtered[x].wrapping_add(paeth_predict(up(x), left, upper_left));
      }
    }
  }
}

/// Turns the decompressed, filtered, data into the final pixel data.
///
/// `filtered` must hold at least `height` lines of `1 + width * channels`
/// bytes each; anything past that is ignored. The output has the filter bytes
/// removed: `height` rows of `width * channels` bytes.
///
/// ## Failure
/// * [`UnknownFilterType`](PngError::UnknownFilterType) for a filter byte
///   above 4, naming the row.
/// * [`DecompressionFailure`](PngError::DecompressionFailure) if `filtered`
///   is too short for the header.
/// * [`AllocationFailure`](PngError::AllocationFailure) if the output buffer
///   can't be obtained.
pub fn reconstruct(filtered: &[u8], header: &IHDR) -> PngResult<Vec<u8>> {
  let channels = header.channels();
  let bytes_per_scanline = header.bytes_per_scanline()?;
  let bytes_per_filterline = bytes_per_scanline + 1;
  let raster_len = header.get_raster_requirement()?;
  if filtered.len() < header.get_zlib_decompression_requirement()? {
    return Err(PngError::DecompressionFailure);
  }

  let mut raster: Vec<u8> = Vec::new();
  raster.try_reserve_exact(raster_len)?;
  raster.resize(raster_len, 0);

  let lines = filtered.chunks_exact(bytes_per_filterline).take(header.height as usize);
  let mut prior: Option<&[u8]> = None;
  let mut rest: &mut [u8] = &mut raster;
  for (y, line) in lines.enumerate() {
    let (&filter_byte, samples) = match line.split_first() {
      Some(split) => split,
      None => unreachable!("filter lines are never empty"),
    };
    let filter = FilterType::try_from(filter_byte)
      .map_err(|_| PngError::UnknownFilterType { row: y as u32, filter: filter_byte })?;
    let (out, more) = core::mem::take(&mut rest).split_at_mut(bytes_per_scanline);
    unfilter_scanline(filter, channels, samples, prior, out);
    prior = Some(&*out);
    rest = more;
  }

  Ok(raster)
}
