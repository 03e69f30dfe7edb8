use super::*;

use alloc::boxed::Box;
use miniz_oxide::{
  inflate::stream::{inflate, InflateState},
  DataFormat, MZError, MZFlush, MZStatus,
};

const INPUT_BUFFER_SIZE: usize = 8 * 1024;

/// Decompresses a zlib stream as it's read.
///
/// Compressed bytes are pulled from the inner source only when more output is
/// asked for, so the whole decompressed image is never held in memory at
/// once.
///
/// Any problem with the compressed data (bad header, bad block, checksum
/// failure, or the compressed data ending early) is reported as
/// [`DecompressionFailed`](PngError::DecompressionFailed). Errors from the
/// inner source are passed along unchanged.
pub struct ZlibReader<S> {
  source: S,
  state: Box<InflateState>,
  input: Box<[u8]>,
  input_pos: usize,
  input_len: usize,
  source_done: bool,
  stream_done: bool,
}
impl<S> core::fmt::Debug for ZlibReader<S> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("ZlibReader")
      .field("buffered", &(self.input_len - self.input_pos))
      .field("source_done", &self.source_done)
      .field("stream_done", &self.stream_done)
      .finish()
  }
}
impl<S: ByteSource> ZlibReader<S> {
  /// Wraps a source of zlib compressed bytes.
  pub fn new(source: S) -> PngResult<Self> {
    let mut input = Vec::new();
    input.try_reserve_exact(INPUT_BUFFER_SIZE)?;
    input.resize(INPUT_BUFFER_SIZE, 0);
    Ok(Self {
      source,
      state: InflateState::new_boxed(DataFormat::Zlib),
      input: input.into_boxed_slice(),
      input_pos: 0,
      input_len: 0,
      source_done: false,
      stream_done: false,
    })
  }

  fn refill(&mut self) -> PngResult<()> {
    if self.input_pos == self.input_len && !self.source_done {
      self.input_len = self.source.read_bytes(&mut self.input)?;
      self.input_pos = 0;
      self.source_done = self.input_len == 0;
    }
    Ok(())
  }
}
impl<S: ByteSource> ByteSource for ZlibReader<S> {
  fn read_bytes(&mut self, buf: &mut [u8]) -> PngResult<usize> {
    if buf.is_empty() || self.stream_done {
      return Ok(0);
    }
    loop {
      self.refill()?;
      let pending = &self.input[self.input_pos..self.input_len];
      let result = inflate(&mut self.state, pending, buf, MZFlush::None);
      self.input_pos += result.bytes_consumed;
      match result.status {
        Ok(MZStatus::StreamEnd) => {
          self.stream_done = true;
          return Ok(result.bytes_written);
        }
        Ok(MZStatus::Ok) if result.bytes_written > 0 => return Ok(result.bytes_written),
        Ok(MZStatus::Ok) => {
          // no output, but we must have made progress or be able to get more
          // input, otherwise the stream is stuck.
          if result.bytes_consumed == 0 && self.input_pos < self.input_len {
            return Err(PngError::DecompressionFailed);
          }
          if self.source_done && self.input_pos == self.input_len {
            return Err(PngError::DecompressionFailed);
          }
        }
        // the decompressor wants more input than it was given
        Err(MZError::Buf) if !self.source_done => (),
        Ok(MZStatus::NeedDict) | Err(_) => return Err(PngError::DecompressionFailed),
      }
    }
  }
}
