use super::*;

/// All the `IDAT` payloads of an image, joined end to end.
///
/// * Image data is stored with Zlib compression applied.
/// * Images can have more than one IDAT chunk. Multiple chunks are treated as
///   a single Zlib datastream, so chunk boundaries aren't kept.
///
/// Appending is the only mutation. Once the image ends the stream is sealed
/// with [`into_compressed`](Self::into_compressed), handing the bytes on to
/// decompression.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct CompressedStream {
  bytes: Vec<u8>,
  chunk_count: usize,
}
impl Debug for CompressedStream {
  #[inline]
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("CompressedStream")
      .field("bytes", &(&self.bytes[..self.bytes.len().min(12)], self.bytes.len()))
      .field("chunk_count", &self.chunk_count)
      .finish()
  }
}
impl CompressedStream {
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { bytes: Vec::new(), chunk_count: 0 }
  }

  /// Adds one chunk's payload to the end of the stream.
  pub fn append(&mut self, chunk_payload: &[u8]) -> PngResult<()> {
    self.bytes.try_reserve(chunk_payload.len())?;
    self.bytes.extend_from_slice(chunk_payload);
    self.chunk_count += 1;
    Ok(())
  }

  /// Total compressed bytes so far.
  #[inline]
  #[must_use]
  pub fn len(&self) -> usize {
    self.bytes.len()
  }

  #[inline]
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.bytes.is_empty()
  }

  /// How many chunks have been appended.
  #[inline]
  #[must_use]
  pub const fn chunk_count(&self) -> usize {
    self.chunk_count
  }

  #[inline]
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.bytes
  }

  /// Seals the stream.
  #[inline]
  #[must_use]
  pub fn into_compressed(self) -> Vec<u8> {
    self.bytes
  }
}

#[test]
fn test_compressed_stream_keeps_order_and_length() {
  let mut stream = CompressedStream::new();
  assert!(stream.is_empty());
  stream.append(&[1, 2, 3]).unwrap();
  stream.append(&[]).unwrap();
  stream.append(&[4, 5]).unwrap();
  assert_eq!(stream.len(), 3 + 0 + 2);
  assert_eq!(stream.chunk_count(), 3);
  assert_eq!(stream.as_bytes(), &[1, 2, 3, 4, 5]);
  assert_eq!(stream.into_compressed(), vec![1, 2, 3, 4, 5]);
}
