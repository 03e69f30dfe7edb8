//! Sequential reading of bytes and fixed width integers.
//!
//! Everything the decoder consumes (the file itself, the joined image data,
//! and the decompressed scanlines) is read through the [`ByteSource`] trait.

use alloc::vec::Vec;

use crate::{PngError, PngResult};

const READ_VEC_STEP: usize = 64 * 1024;

/// A sequential source of bytes.
///
/// The only required method is [`read_bytes`](ByteSource::read_bytes), all
/// the other methods are built on it and fail with
/// [`TruncatedInput`](PngError::TruncatedInput) when the source runs out
/// early.
pub trait ByteSource {
  /// Reads up to `buf.len()` bytes into the start of `buf`.
  ///
  /// Returns how many bytes were written. A return of `Ok(0)` with a non-empty
  /// `buf` means the end of the data.
  fn read_bytes(&mut self, buf: &mut [u8]) -> PngResult<usize>;

  /// Fills all of `buf`.
  fn read_exact_into(&mut self, mut buf: &mut [u8]) -> PngResult<()> {
    while !buf.is_empty() {
      match self.read_bytes(buf)? {
        0 => return Err(PngError::TruncatedInput),
        n => buf = &mut buf[n..],
      }
    }
    Ok(())
  }

  /// Reads exactly `n` bytes into a new vec.
  ///
  /// A length of 0 gives an empty vec without any allocation. The vec grows
  /// as data actually arrives, so a bogus huge `n` fails with
  /// `TruncatedInput` instead of allocating all of `n` up front.
  fn read_vec(&mut self, n: usize) -> PngResult<Vec<u8>> {
    let mut v = Vec::new();
    while v.len() < n {
      let start = v.len();
      let step = (n - start).min(READ_VEC_STEP);
      v.try_reserve(step)?;
      v.resize(start + step, 0);
      self.read_exact_into(&mut v[start..])?;
    }
    Ok(v)
  }

  /// Reads exactly `N` bytes.
  #[inline]
  fn read_array<const N: usize>(&mut self) -> PngResult<[u8; N]> {
    let mut a = [0_u8; N];
    self.read_exact_into(&mut a)?;
    Ok(a)
  }

  /// Reads a single byte.
  #[inline]
  fn read_u8(&mut self) -> PngResult<u8> {
    self.read_array::<1>().map(|[u]| u)
  }

  /// Reads an `n` byte unsigned integer, most significant byte first.
  ///
  /// ## Panics
  /// * If `n` is more than 4.
  fn read_be_uint(&mut self, n: usize) -> PngResult<u32> {
    assert!(n <= 4, "at most 4 bytes fit in a u32");
    let mut out = 0_u32;
    for _ in 0..n {
      out = (out << 8) | u32::from(self.read_u8()?);
    }
    Ok(out)
  }

  /// Reads an `n` byte unsigned integer, least significant byte first.
  ///
  /// ## Panics
  /// * If `n` is more than 4.
  fn read_le_uint(&mut self, n: usize) -> PngResult<u32> {
    assert!(n <= 4, "at most 4 bytes fit in a u32");
    let mut out = 0_u32;
    for i in 0..n {
      out |= u32::from(self.read_u8()?) << (8 * i);
    }
    Ok(out)
  }
}

impl ByteSource for &[u8] {
  #[inline]
  fn read_bytes(&mut self, buf: &mut [u8]) -> PngResult<usize> {
    let n = buf.len().min(self.len());
    let (head, tail) = self.split_at(n);
    buf[..n].copy_from_slice(head);
    *self = tail;
    Ok(n)
  }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
  #[inline]
  fn read_bytes(&mut self, buf: &mut [u8]) -> PngResult<usize> {
    (**self).read_bytes(buf)
  }
}

/// Adapts any [`Read`](std::io::Read) type (a file, a socket, etc) into a
/// [`ByteSource`].
///
/// * [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof) becomes
///   [`TruncatedInput`](PngError::TruncatedInput).
/// * [`Interrupted`](std::io::ErrorKind::Interrupted) reads are retried.
/// * Any other error kind is passed along as [`PngError::Io`].
///
/// Reads are passed straight through, so wrap the reader in a `BufReader` if
/// it's slow to make small reads.
#[cfg(feature = "std")]
#[cfg_attr(docs_rs, doc(cfg(feature = "std")))]
#[derive(Debug, Clone, Default)]
pub struct IoSource<R>(pub R);
#[cfg(feature = "std")]
impl<R: std::io::Read> ByteSource for IoSource<R> {
  fn read_bytes(&mut self, buf: &mut [u8]) -> PngResult<usize> {
    use std::io::ErrorKind;
    loop {
      match self.0.read(buf) {
        Ok(n) => return Ok(n),
        Err(e) if e.kind() == ErrorKind::Interrupted => (),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => return Err(PngError::TruncatedInput),
        Err(e) => return Err(PngError::Io(e.kind())),
      }
    }
  }
}
