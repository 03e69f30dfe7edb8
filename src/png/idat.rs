use super::*;

/// All of the `IDAT` payloads of a PNG, read as one continuous stream.
///
/// PNG encoders may split the compressed image data across any number of
/// `IDAT` chunks, and the split points mean nothing. This joins them back up:
/// reading moves from one `IDAT` to the next without a break, skipping over
/// any other chunk types in between, and the end of data is only reported
/// once there's no `IDAT` left.
///
/// This is a one-pass stream. To read the data again make a new one.
#[derive(Debug, Clone)]
pub struct IdatStream<'c> {
  chunks: core::slice::Iter<'c, Chunk>,
  current: &'c [u8],
}
impl<'c> IdatStream<'c> {
  /// Makes a stream over the `IDAT` chunks within `chunks`.
  #[inline]
  #[must_use]
  pub fn new(chunks: &'c [Chunk]) -> Self {
    Self { chunks: chunks.iter(), current: &[] }
  }

  /// Gets the rest of the current `IDAT` payload, or the whole next
  /// non-empty one.
  ///
  /// Returns `None` once all the data has been read.
  #[inline]
  pub fn next_segment(&mut self) -> Option<&'c [u8]> {
    if self.current.is_empty() {
      self.current = self
        .chunks
        .by_ref()
        .filter(|chunk| chunk.chunk_ty == ChunkType::IDAT)
        .map(|chunk| chunk.data.as_slice())
        .find(|data| !data.is_empty())?;
    }
    Some(core::mem::take(&mut self.current))
  }
}
impl ByteSource for IdatStream<'_> {
  fn read_bytes(&mut self, buf: &mut [u8]) -> PngResult<usize> {
    if buf.is_empty() {
      return Ok(0);
    }
    let segment = match self.next_segment() {
      Some(segment) => segment,
      None => return Ok(0),
    };
    let n = buf.len().min(segment.len());
    let (head, tail) = segment.split_at(n);
    buf[..n].copy_from_slice(head);
    self.current = tail;
    Ok(n)
  }
}
