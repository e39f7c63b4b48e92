use core::fmt::{Display, Formatter};
use std::{collections::TryReserveError, io};

use crate::png::{HeaderField, PngChunkTy};

/// Result type for everything in this crate.
pub type PngResult<T> = Result<T, PngError>;

/// An error from decoding a PNG.
///
/// Every error is fatal to the decode: nothing is retried and no partial
/// image is ever handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The first 8 bytes weren't the PNG signature.
  NotAPngFile,

  /// The first chunk wasn't an `IHDR`.
  MissingHeader,

  /// A chunk showed up somewhere it isn't allowed to be.
  ///
  /// This is image data before the header, or a second header.
  OutOfOrderChunk {
    /// The chunk that was out of place.
    chunk: PngChunkTy,
  },

  /// The header names something this decoder doesn't handle.
  UnsupportedFeature {
    /// Which header field was rejected.
    field: HeaderField,
    /// The value found in the header.
    value: u32,
  },

  /// The `IHDR` payload wasn't exactly 13 bytes.
  MalformedHeader {
    /// The length that was actually found.
    len: usize,
  },

  /// The input ended before the data it declared.
  TruncatedStream,

  /// The allocator couldn't give us enough space, or the required size
  /// doesn't even fit in `usize`.
  AllocationFailure,

  /// The Zlib data didn't inflate to exactly the number of bytes the header
  /// calls for.
  DecompressionFailure,

  /// A scanline started with a filter byte outside of `0..=4`.
  UnknownFilterType {
    /// Zero-based scanline index.
    row: u32,
    /// The filter byte found.
    filter: u8,
  },

  /// A chunk's declared CRC doesn't match its contents.
  ///
  /// Only checked when [`DecodeOptions::verify_checksums`](crate::png::DecodeOptions)
  /// is set.
  ChecksumMismatch {
    /// The chunk that failed.
    chunk: PngChunkTy,
    /// The CRC stored in the file.
    declared: u32,
    /// The CRC computed from the chunk.
    actual: u32,
  },

  /// Some other I/O failure.
  Io(io::ErrorKind),
}

impl Display for PngError {
  fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::NotAPngFile => write!(f, "input file is not in PNG format"),
      Self::MissingHeader => write!(f, "the first chunk of the file is not IHDR"),
      Self::OutOfOrderChunk { chunk } => write!(f, "unexpected {chunk:?} chunk"),
      Self::UnsupportedFeature { field, value } => {
        write!(f, "unsupported {field} value {value}, expected {}", field.expected())
      }
      Self::MalformedHeader { len } => {
        write!(f, "IHDR chunk has {len} bytes of data, expected 13")
      }
      Self::TruncatedStream => write!(f, "unexpected end of the PNG data"),
      Self::AllocationFailure => write!(f, "not enough memory to decode the image"),
      Self::DecompressionFailure => write!(f, "the compressed image data is corrupt"),
      Self::UnknownFilterType { row, filter } => {
        write!(f, "scanline {row} has unknown filter type {filter}")
      }
      Self::ChecksumMismatch { chunk, declared, actual } => write!(
        f,
        "{chunk:?} chunk CRC mismatch: declared {declared:#010X}, actual {actual:#010X}"
      ),
      Self::Io(kind) => write!(f, "I/O error: {kind}"),
    }
  }
}

impl std::error::Error for PngError {}

impl From<TryReserveError> for PngError {
  #[inline]
  fn from(_: TryReserveError) -> Self {
    Self::AllocationFailure
  }
}

impl From<io::Error> for PngError {
  #[inline]
  fn from(e: io::Error) -> Self {
    match e.kind() {
      io::ErrorKind::UnexpectedEof => Self::TruncatedStream,
      io::ErrorKind::OutOfMemory => Self::AllocationFailure,
      kind => Self::Io(kind),
    }
  }
}
