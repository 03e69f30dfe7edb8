use super::*;

const PALETTE_FLAG: u8 = 0b001;
const COLOR_FLAG: u8 = 0b010;
const ALPHA_FLAG: u8 = 0b100;

/// The parts of the image header that drive decoding.
///
/// Only images this crate can decode can be described: 8 or 16 bits per
/// channel, greyscale or RGB, optional alpha, not interlaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageDescriptor {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel, 8 or 16
  pub bit_depth: u8,
  /// 1 through 4
  pub channels: u8,
  /// 1 or 2
  pub bytes_per_channel: u8,
  /// if the last channel is alpha
  pub has_alpha: bool,
  /// RGB when set, greyscale otherwise
  pub is_color: bool,
}
impl ImageDescriptor {
  /// Interprets the data of an `IHDR` chunk.
  ///
  /// ## Failure
  /// * [`WrongFormat`](PngError::WrongFormat) if the chunk isn't `IHDR`, or
  ///   is too short to hold the header fields.
  /// * [`Unsupported`](PngError::Unsupported) for any bit depth other than 8
  ///   or 16, for palette images, and for any non-zero compression, filter,
  ///   or interlace method. These are checked in that order.
  pub fn from_header_chunk(chunk: &Chunk) -> PngResult<Self> {
    if chunk.chunk_ty != ChunkType::IHDR {
      return Err(PngError::WrongFormat);
    }
    match chunk.data.as_slice() {
      [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, compression_method, filter_method, interlace_method, ..] =>
      {
        if !matches!(bit_depth, 8 | 16) {
          return Err(UnsupportedFeature::BitDepth(*bit_depth).into());
        }
        if (color_type & PALETTE_FLAG) != 0 {
          return Err(UnsupportedFeature::Palette.into());
        }
        if *compression_method != 0 {
          return Err(UnsupportedFeature::CompressionMethod(*compression_method).into());
        }
        if *filter_method != 0 {
          return Err(UnsupportedFeature::FilterMethod(*filter_method).into());
        }
        if *interlace_method != 0 {
          return Err(UnsupportedFeature::InterlaceMethod(*interlace_method).into());
        }
        let is_color = (color_type & COLOR_FLAG) != 0;
        let has_alpha = (color_type & ALPHA_FLAG) != 0;
        Ok(Self {
          width: u32::from_be_bytes([*w0, *w1, *w2, *w3]),
          height: u32::from_be_bytes([*h0, *h1, *h2, *h3]),
          bit_depth: *bit_depth,
          channels: (if is_color { 3 } else { 1 }) + u8::from(has_alpha),
          bytes_per_channel: bit_depth / 8,
          has_alpha,
          is_color,
        })
      }
      _ => Err(PngError::WrongFormat),
    }
  }

  /// Bytes per pixel within a scanline (a "color group").
  #[inline]
  #[must_use]
  pub const fn color_length(&self) -> usize {
    (self.channels as usize) * (self.bytes_per_channel as usize)
  }

  /// Bytes per scanline, not counting the filter byte.
  ///
  /// `None` if this would overflow.
  #[inline]
  #[must_use]
  pub const fn scanline_length(&self) -> Option<usize> {
    self.color_length().checked_mul(self.width as usize)
  }
}

/// Interprets the first chunk of a PNG as its header.
///
/// ## Failure
/// * [`WrongFormat`](PngError::WrongFormat) if there are no chunks, as well
///   as all the failures of [`ImageDescriptor::from_header_chunk`].
#[inline]
pub fn interpret_header(chunks: &[Chunk]) -> PngResult<ImageDescriptor> {
  chunks.first().ok_or(PngError::WrongFormat).and_then(ImageDescriptor::from_header_chunk)
}
