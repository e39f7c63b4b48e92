#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]

//! A crate for turning PNG files into raw Netpbm rasters.
//!
//! The decoder handles the PNG container (signature, chunks, header), joins
//! and inflates the compressed image data, and undoes the per-scanline
//! filtering. The result is a [`PixelRaster`] that the [`netpbm`] module can
//! write out as a `P5` or `P6` file.
//!
//! ```no_run
//! use png2pnm::{png::{decode_png, DecodeOptions}, netpbm::netpbm_write_raster};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut input = std::io::BufReader::new(std::fs::File::open("in.png")?);
//! let raster = decode_png(&mut input, DecodeOptions::default())?;
//! netpbm_write_raster(std::fs::File::create("out.pnm")?, &raster)?;
//! # Ok(())
//! # }
//! ```
//!
//! Only 8-bit grayscale and 8-bit RGB images without interlacing are
//! supported.

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

pub mod error;
pub use error::*;

pub mod png;

pub mod raster;
pub use raster::*;

pub mod netpbm;
