use png2pnm::netpbm::netpbm_write_raster;
use png2pnm::png::*;
use png2pnm::PngError;
use walkdir::WalkDir;

use crate::build::*;

#[test]
fn test_read_chunk_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let mut stream = &v[..];
    while read_chunk(&mut stream).is_ok() {
      //
    }
  }
}

#[test]
fn test_fixture_files_match_their_netpbm_copies() {
  let mut checked = 0;
  for entry in WalkDir::new("tests/png/fixtures").into_iter().filter_map(|e| e.ok()) {
    let path = entry.path();
    if path.extension().map_or(true, |ext| ext != "png") {
      continue;
    }
    println!("{}", path.display());
    let png = std::fs::read(path).unwrap();
    let options = DecodeOptions::default().with_verify_checksums(true);
    let raster = decode_png_bytes(&png, options).unwrap();
    let expected_path =
      if raster.channels() == 3 { path.with_extension("ppm") } else { path.with_extension("pgm") };
    let expected = std::fs::read(&expected_path).unwrap();

    let mut written = Vec::new();
    netpbm_write_raster(&mut written, &raster).unwrap();
    assert_eq!(written, expected, "{}", path.display());

    // walking the chunks by hand ends exactly at IEND
    let mut stream = &png[..];
    read_signature(&mut stream).unwrap();
    while read_chunk(&mut stream).unwrap().ty() != PngChunkTy::IEND {}
    assert!(stream.is_empty(), "{}", path.display());
    checked += 1;
  }
  assert_eq!(checked, 4);
}

#[test]
fn test_decode_random_data_no_panics() {
  // even totally random data should never panic the decoder!
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    v.extend_from_slice(&super::rand_bytes(1024));
    assert!(decode_png_bytes(&v, DecodeOptions::default()).is_err());
  }
  // random data after a valid header
  for _ in 0..10 {
    let mut v = PNG_SIGNATURE.to_vec();
    push_chunk(&mut v, b"IHDR", &ihdr_data(16, 16, 8, 2));
    push_chunk(&mut v, b"IDAT", &super::rand_bytes(512));
    push_chunk(&mut v, b"IEND", &[]);
    assert!(decode_png_bytes(&v, DecodeOptions::default()).is_err());
  }
}

#[test]
fn test_every_filter_round_trips_through_decode() {
  for (color_type, channels) in [(0_u8, 1_usize), (2, 3)] {
    let (w, h) = (13, 9);
    let raster = test_pattern(w, h, channels);
    for filter in 0..=4 {
      let png = png_from_raster(w, h, color_type, &raster, |_| filter, 64);
      let decoded = decode_png_bytes(&png, DecodeOptions::default()).unwrap();
      assert_eq!(decoded.width(), w);
      assert_eq!(decoded.height(), h);
      assert_eq!(decoded.channels(), channels);
      assert_eq!(decoded.pixels(), &raster[..], "filter {filter} color type {color_type}");
    }
  }
}

#[test]
fn test_mixed_filters_and_many_idat_chunks() {
  let (w, h) = (40, 25);
  let raster = test_pattern(w, h, 3);
  let png = png_from_raster(w, h, 2, &raster, |y| (y % 5) as u8, 7);
  let options = DecodeOptions::default().with_verify_checksums(true);
  let decoded = decode_png_bytes(&png, options).unwrap();
  assert_eq!(decoded.pixels(), &raster[..]);
  let rgb = decoded.rgb_pixels().unwrap();
  assert_eq!(rgb.len(), (w * h) as usize);
  assert_eq!([rgb[1].r, rgb[1].g, rgb[1].b], [raster[3], raster[4], raster[5]]);
}

#[test]
fn test_single_pixel_images() {
  for (color_type, channels) in [(0_u8, 1_usize), (2, 3)] {
    let raster = test_pattern(1, 1, channels);
    for filter in 0..=4 {
      let png = png_from_raster(1, 1, color_type, &raster, |_| filter, 1024);
      let decoded = decode_png_bytes(&png, DecodeOptions::default()).unwrap();
      assert_eq!(decoded.pixels(), &raster[..]);
    }
  }
}

#[test]
fn test_unsupported_headers() {
  for (bit_depth, color_type, field, value) in [
    (16, 0, HeaderField::BitDepth, 16),
    (4, 0, HeaderField::BitDepth, 4),
    (8, 3, HeaderField::ColorType, 3),
    (8, 4, HeaderField::ColorType, 4),
    (8, 6, HeaderField::ColorType, 6),
  ] {
    let mut png = PNG_SIGNATURE.to_vec();
    push_chunk(&mut png, b"IHDR", &ihdr_data(2, 2, bit_depth, color_type));
    push_chunk(&mut png, b"IEND", &[]);
    assert_eq!(
      decode_png_bytes(&png, DecodeOptions::default()),
      Err(PngError::UnsupportedFeature { field, value })
    );
  }
}

#[test]
fn test_truncated_anywhere_fails_cleanly() {
  let raster = test_pattern(5, 5, 1);
  let png = png_from_raster(5, 5, 0, &raster, |_| 4, 16);
  for cut in 0..png.len() {
    let result = decode_png_bytes(&png[..cut], DecodeOptions::default());
    assert!(result.is_err(), "cut at {cut} decoded anyway");
  }
  assert!(decode_png_bytes(&png, DecodeOptions::default()).is_ok());
}
