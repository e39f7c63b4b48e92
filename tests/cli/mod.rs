use std::{
  path::PathBuf,
  process::{Command, Output},
};

use png2pnm::netpbm::{netpbm_pull_header, NetpbmHeader};

use crate::build::*;

fn png2pnm(args: &[&std::ffi::OsStr]) -> Output {
  png2pnm_with_log(args, None)
}

fn png2pnm_with_log(args: &[&std::ffi::OsStr], log_filter: Option<&str>) -> Output {
  let mut command = Command::new(env!("CARGO_BIN_EXE_png2pnm"));
  command.args(args).env_remove("PNG2PNM_LOG");
  if let Some(filter) = log_filter {
    command.env("PNG2PNM_LOG", filter);
  }
  command.output().unwrap()
}

/// A path in the temp dir that no other test uses.
fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("png2pnm-{}-{name}", std::process::id()))
}

#[test]
fn test_converts_rgb_to_ppm() {
  let (w, h) = (6, 4);
  let raster = test_pattern(w, h, 3);
  let input = temp_path("rgb.png");
  let output = temp_path("rgb.ppm");
  std::fs::write(&input, png_from_raster(w, h, 2, &raster, |y| (y % 5) as u8, 100)).unwrap();

  let out = png2pnm(&[input.as_os_str(), output.as_os_str()]);
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
  assert_eq!(out.status.code(), Some(0));

  let written = std::fs::read(&output).unwrap();
  let (header, samples) = netpbm_pull_header(&written).unwrap();
  assert_eq!(header, NetpbmHeader { tag: 6, width: w, height: h, max: 255 });
  assert_eq!(samples, &raster[..]);
  assert!(written.starts_with(b"P6\n6 4\n255\n"));

  let _ = std::fs::remove_file(input);
  let _ = std::fs::remove_file(output);
}

#[test]
fn test_converts_gray_to_pgm() {
  let (w, h) = (3, 3);
  let raster = test_pattern(w, h, 1);
  let input = temp_path("gray.png");
  let output = temp_path("gray.pgm");
  std::fs::write(&input, png_from_raster(w, h, 0, &raster, |_| 4, 100)).unwrap();

  let out = png2pnm(&[input.as_os_str(), output.as_os_str(), "--verify-crc".as_ref()]);
  assert_eq!(out.status.code(), Some(0));

  let written = std::fs::read(&output).unwrap();
  let (header, samples) = netpbm_pull_header(&written).unwrap();
  assert_eq!(header.tag, 5);
  assert_eq!(samples, &raster[..]);

  let _ = std::fs::remove_file(input);
  let _ = std::fs::remove_file(output);
}

#[test]
fn test_not_a_png_exits_with_one() {
  let input = temp_path("text.png");
  let output = temp_path("text.pgm");
  std::fs::write(&input, b"this is not a png file at all").unwrap();

  let out = png2pnm(&[input.as_os_str(), output.as_os_str()]);
  assert_eq!(out.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("not in PNG format"), "{stderr}");
  assert!(!output.exists());

  let _ = std::fs::remove_file(input);
}

#[test]
fn test_missing_input_exits_with_one() {
  let input = temp_path("does-not-exist.png");
  let output = temp_path("does-not-exist.pgm");
  let out = png2pnm(&[input.as_os_str(), output.as_os_str()]);
  assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_wrong_argument_count_exits_with_one() {
  assert_eq!(png2pnm(&[]).status.code(), Some(1));
  assert_eq!(png2pnm(&["only-one.png".as_ref()]).status.code(), Some(1));
  assert_eq!(png2pnm(&["a.png".as_ref(), "b.pgm".as_ref(), "c".as_ref()]).status.code(), Some(1));
}

#[test]
fn test_logging_levels() {
  let raster = test_pattern(2, 2, 1);
  let input = temp_path("log.png");
  let output = temp_path("log.pgm");
  std::fs::write(&input, png_from_raster(2, 2, 0, &raster, |_| 0, 100)).unwrap();
  let args = [input.as_os_str(), output.as_os_str()];

  // quiet by default
  let out = png2pnm(&args);
  assert_eq!(out.status.code(), Some(0));
  assert!(out.stderr.is_empty(), "{}", String::from_utf8_lossy(&out.stderr));

  let out = png2pnm_with_log(&args, Some("debug"));
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("header:"), "{stderr}");
  assert!(!stderr.contains("read chunk"), "{stderr}");

  // -vv wins over the environment
  let out = png2pnm_with_log(&[args[0], args[1], "-vv".as_ref()], Some("error"));
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("read chunk \"IHDR\""), "{stderr}");

  let _ = std::fs::remove_file(input);
  let _ = std::fs::remove_file(output);
}

#[test]
fn test_warns_about_split_idat_after_empty_one() {
  let zlib = miniz_oxide::deflate::compress_to_vec_zlib(&[0, 1, 2, 0, 3, 4], 6);
  let mut png = png2pnm::png::PNG_SIGNATURE.to_vec();
  push_chunk(&mut png, b"IHDR", &ihdr_data(2, 2, 8, 0));
  push_chunk(&mut png, b"IDAT", &[]);
  push_chunk(&mut png, b"tEXt", b"Comment\0in the way");
  push_chunk(&mut png, b"IDAT", &zlib);
  push_chunk(&mut png, b"IEND", &[]);
  let input = temp_path("gap.png");
  let output = temp_path("gap.pgm");
  std::fs::write(&input, png).unwrap();

  let out = png2pnm(&[input.as_os_str(), output.as_os_str()]);
  assert_eq!(out.status.code(), Some(0));
  let stderr = String::from_utf8_lossy(&out.stderr);
  assert!(stderr.contains("IDAT chunks are not contiguous"), "{stderr}");
  assert_eq!(std::fs::read(&output).unwrap(), b"P5\n2 2\n255\n\x01\x02\x03\x04");

  let _ = std::fs::remove_file(input);
  let _ = std::fs::remove_file(output);
}
