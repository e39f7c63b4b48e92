#![forbid(unsafe_code)]

//! Writes (and reads back the header of) binary
//! [Netpbm](https://en.wikipedia.org/wiki/Netpbm) files.
//!
//! Only the two formats that a [`PixelRaster`] maps onto are handled:
//! * `P5`: binary graymap, one byte per pixel.
//! * `P6`: binary pixmap, three bytes (`r g b`) per pixel.
//!
//! Both are extremely simple formats with absolutely no compression: an
//! ASCII header giving the tag, the width and height, and the maximum sample
//! value, then the raw samples row by row.
//!
//! Important: The colorspace of a Netpbm file is never given in the header.
//! The samples are written exactly as the PNG stored them, so whatever the
//! PNG's colorspace was (usually sRGB) is what the reader should assume.

use core::{
  num::ParseIntError,
  str::{from_utf8, Utf8Error},
};
use std::io::{self, Write};

use crate::raster::PixelRaster;

/// The only maximum sample value that gets written.
pub const NETPBM_MAX_VALUE: u32 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetpbmError {
  ParseError,
  /// The tag value given wasn't `5` or `6`.
  TagError,
  /// The current version doesn't handle maximum values other than 255.
  MaxValueError,
}
impl From<Utf8Error> for NetpbmError {
  #[inline]
  fn from(_: Utf8Error) -> Self {
    NetpbmError::ParseError
  }
}
impl From<ParseIntError> for NetpbmError {
  #[inline]
  fn from(_: ParseIntError) -> Self {
    NetpbmError::ParseError
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetpbmHeader {
  /// The tag sets the format of the bytes after the header:
  /// * 5: binary grayscale
  /// * 6: binary rgb
  pub tag: u8,
  pub width: u32,
  pub height: u32,
  /// Max value per channel entry.
  pub max: u32,
}
impl NetpbmHeader {
  /// Samples per pixel for this tag.
  #[inline]
  #[must_use]
  pub const fn channels(&self) -> usize {
    if self.tag == 6 {
      3
    } else {
      1
    }
  }
}

/// Skips whitespace and `#` comments.
#[inline]
pub fn netpbm_trim(mut bytes: &[u8]) -> &[u8] {
  loop {
    match bytes {
      [u, tail @ ..] if u.is_ascii_whitespace() => bytes = tail,
      [b'#', tail @ ..] => {
        let mut it = tail.splitn(2, |&u| u == b'\n');
        it.next();
        bytes = it.next().unwrap_or(&[]);
      }
      _ => return bytes,
    }
  }
}

#[inline]
fn netpbm_pull_tag(bytes: &[u8]) -> Result<(u8, &[u8]), NetpbmError> {
  match bytes {
    [b'P', tag, rest @ ..] => Ok((tag.wrapping_sub(b'0'), netpbm_trim(rest))),
    _ => Err(NetpbmError::ParseError),
  }
}

#[inline]
fn netpbm_pull_ascii_u32(bytes: &[u8]) -> Result<(u32, &[u8]), NetpbmError> {
  let mut it = bytes.splitn(2, |u| !u.is_ascii_digit());
  let digits = it.next().ok_or(NetpbmError::ParseError)?;
  let spare = it.next().ok_or(NetpbmError::ParseError)?;
  let number = from_utf8(digits)?.parse::<u32>()?;
  Ok((number, spare))
}

/// Parses a `P5`/`P6` header, returning it and the sample bytes after it.
///
/// Exactly one whitespace byte separates the max value from the samples, so
/// it's the only thing skipped there.
pub fn netpbm_pull_header(bytes: &[u8]) -> Result<(NetpbmHeader, &[u8]), NetpbmError> {
  let (tag, rest) = netpbm_pull_tag(bytes)?;
  if !(5..=6).contains(&tag) {
    return Err(NetpbmError::TagError);
  }
  let (width, rest) = netpbm_pull_ascii_u32(rest)?;
  let (height, rest) = netpbm_pull_ascii_u32(netpbm_trim(rest))?;
  let (max, rest) = netpbm_pull_ascii_u32(netpbm_trim(rest))?;
  if max != NETPBM_MAX_VALUE {
    return Err(NetpbmError::MaxValueError);
  }
  Ok((NetpbmHeader { tag, width, height, max }, rest))
}

/// Writes the header lines for a raster.
pub fn netpbm_write_header<W: Write>(w: &mut W, raster: &PixelRaster) -> io::Result<()> {
  write!(
    w,
    "P{tag}\n{width} {height}\n{max}\n",
    tag = raster.netpbm_tag(),
    width = raster.width(),
    height = raster.height(),
    max = NETPBM_MAX_VALUE
  )
}

/// Writes a full `P5`/`P6` file for the raster.
pub fn netpbm_write_raster<W: Write>(mut w: W, raster: &PixelRaster) -> io::Result<()> {
  netpbm_write_header(&mut w, raster)?;
  w.write_all(raster.pixels())?;
  w.flush()
}
