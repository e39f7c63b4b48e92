#![forbid(unsafe_code)]

//! Holds all the tools for decoding PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! Only a small part of PNG is supported: 8 bits per channel, grayscale or
//! RGB, no interlacing. Anything else is rejected up front with
//! [`PngError::UnsupportedFeature`].
//!
//! ## Automatic Decoding
//!
//! Call [`decode_png`] with any [`Read`] source (or [`decode_png_bytes`] for
//! a slice) and you get back a [`PixelRaster`](crate::raster::PixelRaster).
//!
//! ## Decoding a PNG Yourself
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! After an 8 byte signature, each chunk is a big-endian length, a 4 byte
//! type, that many bytes of data, and a CRC. There's three chunk types that
//! matter here:
//! * **Header** (`IHDR`) - This has the image's dimensions and pixel format.
//!   It must be the first chunk.
//! * **Image Data** (`IDAT`) - One or more chunks of compressed data. All of
//!   the compressed data forms a single zlib data stream.
//! * **End** (`IEND`) - The last chunk, lets you know you had the full PNG and
//!   your data wasn't truncated accidentally.
//!
//! Every other chunk is ancillary as far as this decoder cares, and is read
//! past without being looked at.
//!
//! The steps that [`decode_png`] takes, which you can also do one at a time:
//!
//! 1) [`read_signature`] to check the first 8 bytes.
//! 2) [`read_chunk`] repeatedly. The first chunk goes to
//!    [`IHDR::interpret`].
//! 3) Each `IDAT` payload is appended to a [`CompressedStream`].
//! 4) At `IEND`, [`inflate_filtered_data`] decompresses the stream into
//!    exactly [`get_zlib_decompression_requirement`](IHDR::get_zlib_decompression_requirement)
//!    bytes. This gives you *filtered* data, not the final data you want.
//! 5) [`reconstruct`] undoes the filtering, giving `height` rows of
//!    `width * channels` bytes.
//!
//! ## Checksums
//!
//! By default the chunk CRCs are read but not checked (and the decoder never
//! looks at the bytes after `IEND`). Set
//! [`DecodeOptions::verify_checksums`] to have a bad CRC fail the decode.

use core::fmt::Debug;
use std::io::{self, Read};

use crc32fast::Hasher;
use log::{debug, trace, warn};

use crate::error::{PngError, PngResult};

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod idat;
pub use idat::*;

mod inflate;
pub use inflate::*;

mod unfilter;
pub use unfilter::*;

mod decoder;
pub use decoder::*;
