use core::fmt;

use crate::png::ChunkType;

/// Shorthand for a result that can fail with a [`PngError`].
pub type PngResult<T> = Result<T, PngError>;

/// A PNG feature that this decoder deliberately does not handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnsupportedFeature {
  /// Only bit depths of 8 and 16 are decoded.
  BitDepth(u8),
  /// Indexed color.
  Palette,
  /// Anything other than compression method 0 (zlib).
  CompressionMethod(u8),
  /// Anything other than filter method 0 (the five adaptive filters).
  FilterMethod(u8),
  /// Anything other than interlace method 0 (Adam7 is not decoded).
  InterlaceMethod(u8),
}
impl fmt::Display for UnsupportedFeature {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::BitDepth(depth) => {
        write!(f, "bit depth {depth} is not supported, only 8 and 16 are")
      }
      Self::Palette => write!(f, "palette based images are not supported"),
      Self::CompressionMethod(m) => write!(f, "compression method {m} is not supported"),
      Self::FilterMethod(m) => write!(f, "filter method {m} is not supported"),
      Self::InterlaceMethod(m) => write!(f, "interlace method {m} is not supported"),
    }
  }
}

/// An error from decoding PNG data.
///
/// Decoding is all or nothing: every one of these aborts the decode and no
/// partial image is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PngError {
  /// The data ended before a structural field was complete (the signature, a
  /// chunk header, chunk data, or the bytes of a scanline).
  TruncatedInput,

  /// The first 8 bytes aren't the PNG signature.
  BadSignature,

  /// The data doesn't have the expected structure (eg: the first chunk isn't
  /// the image header).
  WrongFormat,

  /// The image uses a feature outside what this crate decodes.
  Unsupported(UnsupportedFeature),

  /// A scanline declared a filter type other than 0 through 4.
  UnsupportedFilter {
    /// the row the filter byte was read for
    row: u32,
    /// the filter byte
    value: u8,
  },

  /// The zlib decompressor rejected the concatenated image data.
  DecompressionFailed,

  /// A chunk's declared CRC didn't match its contents.
  ///
  /// Only produced when CRC checking was requested.
  CrcMismatch {
    /// the chunk with the bad CRC
    chunk_ty: ChunkType,
    /// the CRC stored in the file
    declared: u32,
    /// the CRC computed from the chunk
    actual: u32,
  },

  /// The declared width or height is over the decode limits.
  DimensionsTooLarge,

  /// The allocator couldn't give us enough space.
  Alloc,

  /// The underlying reader failed for a reason other than running out of data.
  #[cfg(feature = "std")]
  Io(std::io::ErrorKind),
}
impl fmt::Display for PngError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::TruncatedInput => write!(f, "unexpected end of input"),
      Self::BadSignature => write!(f, "not a PNG signature"),
      Self::WrongFormat => write!(f, "malformed PNG structure"),
      Self::Unsupported(feature) => write!(f, "unsupported PNG: {feature}"),
      Self::UnsupportedFilter { row, value } => {
        write!(f, "scanline {row} uses unknown filter type {value}")
      }
      Self::DecompressionFailed => write!(f, "image data failed to decompress"),
      Self::CrcMismatch { chunk_ty, declared, actual } => write!(
        f,
        "{chunk_ty:?} chunk CRC mismatch: declared {declared:#010X}, actual {actual:#010X}"
      ),
      Self::DimensionsTooLarge => write!(f, "image dimensions exceed the decode limits"),
      Self::Alloc => write!(f, "allocation failed"),
      #[cfg(feature = "std")]
      Self::Io(kind) => write!(f, "I/O error: {kind}"),
    }
  }
}
impl From<UnsupportedFeature> for PngError {
  #[inline]
  fn from(feature: UnsupportedFeature) -> Self {
    Self::Unsupported(feature)
  }
}
impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::Alloc
  }
}
#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
impl std::error::Error for PngError {}
