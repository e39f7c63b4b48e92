use super::*;

use miniz_oxide::inflate::decompress_slice_iter_to_slice;

/// Decompresses the Zlib stream into a buffer of exactly `expected_size`
/// bytes.
///
/// The output is allocated in full before decompression starts. The stream
/// must produce exactly that many bytes and then end cleanly (including the
/// Adler-32 check), otherwise the result is a
/// [`DecompressionFailure`](PngError::DecompressionFailure).
pub fn inflate_filtered_data(compressed: &[u8], expected_size: usize) -> PngResult<Vec<u8>> {
  let mut filtered: Vec<u8> = Vec::new();
  filtered.try_reserve_exact(expected_size)?;
  filtered.resize(expected_size, 0);

  trace!("inflating {} compressed bytes into {} bytes", compressed.len(), expected_size);
  match decompress_slice_iter_to_slice(&mut filtered, core::iter::once(compressed), true, false) {
    Ok(count) if count == expected_size => Ok(filtered),
    Ok(count) => {
      debug!("zlib stream ended after {} of {} bytes", count, expected_size);
      Err(PngError::DecompressionFailure)
    }
    Err(status) => {
      debug!("zlib decompression failed: {:?}", status);
      Err(PngError::DecompressionFailure)
    }
  }
}
