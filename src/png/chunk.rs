use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

/// The 4-byte type tag of a chunk.
///
/// Only the chunk types that affect decoding get their own variant, every
/// other tag is kept as-is in [`Other`](ChunkType::Other) and skipped.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
pub enum ChunkType {
  /// Image Header
  IHDR,
  /// Palette
  PLTE,
  /// Image Data
  IDAT,
  /// Image End
  IEND,
  /// Any other chunk.
  Other([u8; 4]),
}
impl ChunkType {
  /// The tag as it appears in the file.
  #[inline]
  #[must_use]
  pub const fn to_bytes(self) -> [u8; 4] {
    match self {
      Self::IHDR => *b"IHDR",
      Self::PLTE => *b"PLTE",
      Self::IDAT => *b"IDAT",
      Self::IEND => *b"IEND",
      Self::Other(tag) => tag,
    }
  }

  /// If a decoder must understand this chunk to show the image correctly.
  ///
  /// This is bit 5 of the first byte being clear (an uppercase letter).
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.to_bytes()[0] & 0b0010_0000) == 0
  }
}
impl From<[u8; 4]> for ChunkType {
  #[inline]
  fn from(tag: [u8; 4]) -> Self {
    match &tag {
      b"IHDR" => Self::IHDR,
      b"PLTE" => Self::PLTE,
      b"IDAT" => Self::IDAT,
      b"IEND" => Self::IEND,
      _ => Self::Other(tag),
    }
  }
}
impl Debug for ChunkType {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.to_bytes().iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

/// One chunk of a PNG file.
///
/// The chunk's CRC is not kept (see [`parse_chunks_with`] if you want it
/// checked).
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Chunk {
  /// The type tag.
  pub chunk_ty: ChunkType,
  /// The payload, possibly empty.
  pub data: Vec<u8>,
}
impl Debug for Chunk {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Chunk")
      .field("chunk_ty", &self.chunk_ty)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}
impl Chunk {
  /// Reads one `length, type, data, crc` record.
  ///
  /// When `verify_crc` is set the declared CRC must match the one computed
  /// from the type and data.
  pub fn read_from<S: ByteSource>(src: &mut S, verify_crc: bool) -> PngResult<Self> {
    let len = src.read_be_uint(4)? as usize;
    let tag: [u8; 4] = src.read_array()?;
    let data = src.read_vec(len)?;
    let declared = src.read_be_uint(4)?;
    let chunk_ty = ChunkType::from(tag);
    if verify_crc {
      let actual = chunk_crc(tag, &data);
      if actual != declared {
        return Err(PngError::CrcMismatch { chunk_ty, declared, actual });
      }
    }
    Ok(Self { chunk_ty, data })
  }
}

/// Reads the PNG signature and then every chunk up to and including `IEND`.
///
/// Chunk CRCs are not checked.
///
/// ## Failure
/// * [`TruncatedInput`](PngError::TruncatedInput) if the data ends before the
///   signature or any chunk is complete.
/// * [`BadSignature`](PngError::BadSignature) if the first 8 bytes are not
///   [`PNG_SIGNATURE`].
#[inline]
pub fn parse_chunks<S: ByteSource>(src: S) -> PngResult<Vec<Chunk>> {
  parse_chunks_with(src, false)
}

/// As [`parse_chunks`], optionally also checking each chunk's CRC.
pub fn parse_chunks_with<S: ByteSource>(mut src: S, verify_crc: bool) -> PngResult<Vec<Chunk>> {
  let signature: [u8; 8] = src.read_array()?;
  if signature != PNG_SIGNATURE {
    return Err(PngError::BadSignature);
  }
  let mut chunks = Vec::new();
  loop {
    let chunk = Chunk::read_from(&mut src, verify_crc)?;
    let is_end = chunk.chunk_ty == ChunkType::IEND;
    chunks.try_reserve(1)?;
    chunks.push(chunk);
    if is_end {
      return Ok(chunks);
    }
  }
}
