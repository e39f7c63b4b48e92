use super::*;

use crate::raster::PixelRaster;

/// Knobs for [`decode_png`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  /// Check each chunk's CRC, failing on a mismatch.
  ///
  /// Off by default, in which case corrupted chunks are accepted as long as
  /// the rest of the decode works out.
  pub verify_checksums: bool,
  /// The largest width or height that will be accepted.
  pub max_dimension: u32,
}
impl Default for DecodeOptions {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl DecodeOptions {
  /// The format itself limits width and height to `2^31 - 1`.
  pub const FORMAT_MAX_DIMENSION: u32 = u32::MAX >> 1;

  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { verify_checksums: false, max_dimension: Self::FORMAT_MAX_DIMENSION }
  }
  #[inline]
  #[must_use]
  pub const fn with_verify_checksums(self, verify_checksums: bool) -> Self {
    Self { verify_checksums, ..self }
  }
  #[inline]
  #[must_use]
  pub const fn with_max_dimension(self, max_dimension: u32) -> Self {
    Self { max_dimension, ..self }
  }
}

/// Where the chunk dispatch is at.
enum DecodeState {
  /// Nothing read past the signature yet.
  AwaitingHeader,
  /// Header seen, collecting image data.
  Collecting { header: IHDR, compressed: CompressedStream, last_was_idat: bool },
}

/// Decodes a full PNG datastream.
///
/// The stream is read chunk by chunk: the header is interpreted, image data
/// is accumulated, other chunks are skipped, and at `IEND` the data is
/// decompressed and unfiltered. Nothing after the `IEND` chunk is read.
///
/// ## Failure
/// Any problem at all stops the decode; see [`PngError`] for the list.
pub fn decode_png<R: Read>(stream: &mut R, options: DecodeOptions) -> PngResult<PixelRaster> {
  read_signature(stream)?;

  let mut state = DecodeState::AwaitingHeader;
  loop {
    let chunk = read_chunk(stream)?;
    if options.verify_checksums {
      chunk.verify_crc()?;
    }
    state = match (state, chunk.ty()) {
      (DecodeState::AwaitingHeader, PngChunkTy::IHDR) => {
        let header = IHDR::interpret(chunk.data(), options.max_dimension)?;
        debug!("header: {:?}", header);
        DecodeState::Collecting { header, compressed: CompressedStream::new(), last_was_idat: false }
      }
      (DecodeState::AwaitingHeader, PngChunkTy::IDAT) => {
        return Err(PngError::OutOfOrderChunk { chunk: PngChunkTy::IDAT });
      }
      (DecodeState::AwaitingHeader, _) => return Err(PngError::MissingHeader),
      (DecodeState::Collecting { .. }, PngChunkTy::IHDR) => {
        return Err(PngError::OutOfOrderChunk { chunk: PngChunkTy::IHDR });
      }
      (DecodeState::Collecting { header, mut compressed, last_was_idat }, PngChunkTy::IDAT) => {
        if !last_was_idat && compressed.chunk_count() > 0 {
          warn!("IDAT chunks are not contiguous");
        }
        compressed.append(chunk.data())?;
        DecodeState::Collecting { header, compressed, last_was_idat: true }
      }
      (DecodeState::Collecting { header, compressed, .. }, PngChunkTy::IEND) => {
        return finish_decode(header, compressed);
      }
      (DecodeState::Collecting { header, compressed, .. }, ty) => {
        if ty.is_critical() {
          debug!("skipping unknown critical chunk {:?}", ty);
        } else {
          trace!("skipping {:?} chunk", ty);
        }
        DecodeState::Collecting { header, compressed, last_was_idat: false }
      }
    };
  }
}

/// Decodes PNG bytes that are already in memory.
#[inline]
pub fn decode_png_bytes(bytes: &[u8], options: DecodeOptions) -> PngResult<PixelRaster> {
  decode_png(&mut &bytes[..], options)
}

fn finish_decode(header: IHDR, compressed: CompressedStream) -> PngResult<PixelRaster> {
  debug!(
    "collected {} bytes of image data in {} chunks",
    compressed.len(),
    compressed.chunk_count()
  );
  let expected_size = header.get_zlib_decompression_requirement()?;
  let filtered = inflate_filtered_data(&compressed.into_compressed(), expected_size)?;
  let pixels = reconstruct(&filtered, &header)?;
  debug!("reconstructed {} bytes of pixel data", pixels.len());
  Ok(PixelRaster::new(header.width, header.height, header.color_type, pixels))
}
