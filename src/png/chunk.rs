use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
///
/// * If this is the case, the rest of the bytes are very likely PNG data.
/// * If this is *not* the case, the rest of the bytes are very likely *not* PNG
///   data.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Consumes the 8 byte signature from the front of the stream.
///
/// A stream too short to even hold a signature isn't a PNG either, so that's
/// also reported as [`PngError::NotAPngFile`].
pub fn read_signature<R: Read>(stream: &mut R) -> PngResult<()> {
  let mut signature = [0_u8; 8];
  match stream.read_exact(&mut signature) {
    Ok(()) if is_png_signature_correct(&signature) => Ok(()),
    Ok(()) => Err(PngError::NotAPngFile),
    Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(PngError::NotAPngFile),
    Err(e) => Err(e.into()),
  }
}

/// The four ASCII bytes naming a chunk's role.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct PngChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
impl PngChunkTy {
  /// Image Header
  pub const IHDR: Self = Self(*b"IHDR");
  /// Image Data
  pub const IDAT: Self = Self(*b"IDAT");
  /// Image End
  pub const IEND: Self = Self(*b"IEND");

  /// If this is one of the chunk types the format requires decoders to know.
  ///
  /// Bit 5 of the first byte being clear marks a critical chunk.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0b10_0000) == 0
  }
}
impl Debug for PngChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    Debug::fmt(core::str::from_utf8(self.0.as_slice()).unwrap_or("?"), f)
  }
}

/// One chunk, read out of the stream with its payload copied into an owned
/// buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct PngChunk {
  ty: PngChunkTy,
  data: Vec<u8>,
  declared_crc: u32,
}
impl Debug for PngChunk {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("ty", &self.ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl PngChunk {
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> PngChunkTy {
    self.ty
  }
  #[inline]
  #[must_use]
  pub fn data(&self) -> &[u8] {
    &self.data
  }
  #[inline]
  #[must_use]
  pub fn into_data(self) -> Vec<u8> {
    self.data
  }
  #[inline]
  #[must_use]
  pub const fn declared_crc(&self) -> u32 {
    self.declared_crc
  }
  #[inline]
  #[must_use]
  pub fn compute_actual_crc(&self) -> u32 {
    chunk_crc(self.ty, &self.data)
  }
  /// Fails with [`PngError::ChecksumMismatch`] if the declared CRC is wrong.
  pub fn verify_crc(&self) -> PngResult<()> {
    let actual = self.compute_actual_crc();
    if actual == self.declared_crc {
      Ok(())
    } else {
      Err(PngError::ChecksumMismatch { chunk: self.ty, declared: self.declared_crc, actual })
    }
  }
}

/// The CRC-32 a chunk carries: over the type tag followed by the payload,
/// but not the length.
#[inline]
#[must_use]
pub fn chunk_crc(ty: PngChunkTy, data: &[u8]) -> u32 {
  let mut hasher = Hasher::new();
  hasher.update(&ty.0);
  hasher.update(data);
  hasher.finalize()
}

/// How much of a chunk's payload is reserved before reading it. Bigger
/// payloads grow the buffer as the bytes actually arrive.
const PAYLOAD_RESERVE_LIMIT: usize = 1 << 20;

fn read_u32_be<R: Read>(stream: &mut R) -> PngResult<u32> {
  let mut bytes = [0_u8; 4];
  stream.read_exact(&mut bytes)?;
  Ok(u32::from_be_bytes(bytes))
}

/// Reads exactly one chunk from the stream.
///
/// Consumes `12 + length` bytes: the big-endian length, the type tag, the
/// payload, then the CRC (which is kept on the chunk but not checked here).
pub fn read_chunk<R: Read>(stream: &mut R) -> PngResult<PngChunk> {
  let len = read_u32_be(stream)? as usize;
  let mut ty = [0_u8; 4];
  stream.read_exact(&mut ty)?;
  let ty = PngChunkTy(ty);

  let mut data: Vec<u8> = Vec::new();
  data.try_reserve_exact(len.min(PAYLOAD_RESERVE_LIMIT))?;
  let got = stream.by_ref().take(len as u64).read_to_end(&mut data)?;
  if got < len {
    return Err(PngError::TruncatedStream);
  }

  let declared_crc = read_u32_be(stream)?;
  trace!("read chunk {:?} with {} data bytes", ty, len);
  Ok(PngChunk { ty, data, declared_crc })
}
