//! Decoding of PNG data.
//!
//! * [Portable Network Graphics Specification (Second Edition)][png-spec]
//!
//! [png-spec]: https://www.w3.org/TR/2003/REC-PNG-20031110/
//!
//! ## Automatic Decoding
//!
//! Call [`decode_png`] with anything that's a [`ByteSource`] (a byte slice, or
//! a file wrapped in an [`IoSource`](crate::IoSource)) and you get back the
//! image as a [`Bitmap`] of [`ARGB8888`] pixels, along with the
//! [`ImageDescriptor`] that says what the file actually stored.
//!
//! ```no_run
//! # fn main() -> Result<(), pngstream::PngError> {
//! let bytes: &[u8] = unimplemented!("data from somewhere");
//! let image = pngstream::png::decode_png(bytes)?;
//! println!("{}x{}", image.bitmap.width, image.bitmap.height);
//! # Ok(())
//! # }
//! ```
//!
//! ## What's Supported
//!
//! Greyscale, greyscale with alpha, RGB, and RGBA images at 8 or 16 bits per
//! channel, without interlacing. Anything else is rejected with
//! [`PngError::Unsupported`]. 16-bit channels are reduced to 8 bits by
//! keeping just the high byte.
//!
//! ## Decoding Step By Step
//!
//! The general format of a PNG is that the information is stored in "chunks".
//! Decoding goes through these stages, each of which is public if you want to
//! drive it yourself:
//!
//! 1) [`parse_chunks`] checks the signature and reads every chunk up to the
//!    `IEND` chunk.
//! 2) [`interpret_header`] reads the [`ImageDescriptor`] from the first chunk,
//!    which must be `IHDR`.
//! 3) [`IdatStream`] joins the payloads of all the `IDAT` chunks into a single
//!    stream, and [`ZlibReader`] decompresses that stream as it's read.
//! 4) [`ScanlineReconstructor`] reads the decompressed data one scanline at a
//!    time and reverses each line's filter.
//! 5) [`compose_scanline`] converts the unfiltered bytes of each line into
//!    pixels.
//!
//! ## Things That Are Skipped
//!
//! * Chunk CRCs are not checked unless you set
//!   [`verify_crc`](DecodeOptions::verify_crc).
//! * Every chunk other than `IHDR`, `IDAT`, and `IEND` is ignored. That
//!   includes any color space, gamma, or transparency information.
//! * Decompressed data past the end of the last scanline is ignored.

use core::fmt::{Debug, Write};

use alloc::vec::Vec;

use crate::{
  bitmap::{xy_width_to_index, Bitmap},
  pixel_formats::ARGB8888,
  ByteSource, PngError, PngResult, UnsupportedFeature,
};

mod crc32;
use crc32::chunk_crc;

mod chunk;
pub use chunk::*;

mod idat;
pub use idat::*;

mod zlib;
pub use zlib::*;

mod ihdr;
pub use ihdr::*;

mod unfilter;
pub use unfilter::*;

mod compose;
pub use compose::*;


/// Settings for [`decode_png_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
  /// Check the CRC of every chunk. Off by default.
  pub verify_crc: bool,
  /// Images wider than this are rejected before any allocation.
  pub max_width: u32,
  /// Images taller than this are rejected before any allocation.
  pub max_height: u32,
}
impl Default for DecodeOptions {
  /// No CRC checks, and width and height limited to 17,000 each.
  #[inline]
  fn default() -> Self {
    Self { verify_crc: false, max_width: 17_000, max_height: 17_000 }
  }
}

/// A fully decoded PNG.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PngImage {
  /// What the file stored, before conversion to [`ARGB8888`].
  pub descriptor: ImageDescriptor,
  /// The pixels.
  pub bitmap: Bitmap<ARGB8888>,
}

/// Decodes a PNG with the default [`DecodeOptions`].
#[inline]
pub fn decode_png<S: ByteSource>(src: S) -> PngResult<PngImage> {
  decode_png_with(src, &DecodeOptions::default())
}

/// Decodes a PNG.
///
/// The entire source is read up to the end of the `IEND` chunk before any
/// decompression starts.
///
/// ## Failure
/// Decoding is all or nothing, any error means no image at all.
/// * [`TruncatedInput`](PngError::TruncatedInput): the file or the
///   decompressed image data ended early.
/// * [`BadSignature`](PngError::BadSignature): not a PNG.
/// * [`WrongFormat`](PngError::WrongFormat): the first chunk isn't a valid
///   `IHDR`.
/// * [`Unsupported`](PngError::Unsupported): the image uses a feature this
///   crate doesn't decode.
/// * [`UnsupportedFilter`](PngError::UnsupportedFilter): a scanline has an
///   unknown filter type.
/// * [`DecompressionFailed`](PngError::DecompressionFailed): the `IDAT` data
///   isn't a valid zlib stream.
/// * [`CrcMismatch`](PngError::CrcMismatch): only when checking CRCs.
/// * [`DimensionsTooLarge`](PngError::DimensionsTooLarge): over the limits in
///   `options`.
/// * [`Alloc`](PngError::Alloc): the allocator couldn't give us enough space.
pub fn decode_png_with<S: ByteSource>(src: S, options: &DecodeOptions) -> PngResult<PngImage> {
  let chunks = parse_chunks_with(src, options.verify_crc)?;
  let descriptor = interpret_header(&chunks)?;
  if descriptor.width > options.max_width || descriptor.height > options.max_height {
    return Err(PngError::DimensionsTooLarge);
  }
  let mut bitmap = Bitmap::try_new(descriptor.width, descriptor.height, ARGB8888::OPAQUE_BLACK)?;
  let mut pixel_data = ZlibReader::new(IdatStream::new(&chunks))?;
  let mut lines = ScanlineReconstructor::new(&descriptor)?;
  while let Some((y, line)) = lines.next_row(&mut pixel_data)? {
    compose_scanline(&descriptor, y, line, &mut bitmap);
  }
  Ok(PngImage { descriptor, bitmap })
}
