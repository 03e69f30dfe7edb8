use super::*;

/// The per-scanline filter types of PNG filter method 0.
///
/// The encoder picks one of these for each scanline, and stores each byte as
/// the difference between the real value and a prediction made from bytes
/// already seen. Unfiltering adds the prediction back in.
///
/// In all cases the "left" byte is the same byte of the previous pixel on this
/// line, the "above" byte is the same byte of this pixel on the line before,
/// and the "upper left" is the same byte of the previous pixel on the line
/// before. Neighbors off the edge of the image are 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum FilterType {
  /// Bytes are stored as-is.
  None = 0,
  /// Predicts the left byte.
  Sub = 1,
  /// Predicts the above byte.
  Up = 2,
  /// Predicts the floored mean of the left and above bytes.
  Average = 3,
  /// Predicts with [`paeth_predict`].
  Paeth = 4,
}
impl FilterType {
  /// If this filter looks at the previous line.
  #[inline]
  #[must_use]
  pub const fn uses_above(self) -> bool {
    matches!(self, Self::Up | Self::Average | Self::Paeth)
  }
}
impl TryFrom<u8> for FilterType {
  /// The unknown filter byte.
  type Error = u8;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      other => return Err(other),
    })
  }
}

/// The Paeth predictor: whichever of `a` (left), `b` (above), or `c` (upper
/// left) is closest to `a + b - c`.
///
/// Ties go to `a`, then `b`, then `c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // Note: the order of these tests is part of the PNG format, changing it
  // changes the output.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Reverses one scanline's filter, in place.
///
/// * `line` is the filtered scanline without its filter byte.
/// * `above` is the previous line *after* it was unfiltered, or `None` for
///   the first line of the image.
/// * `color_length` is the bytes per pixel, which is how far back the "left"
///   byte is.
///
/// All the math is done mod 256.
///
/// ## Panics
/// * If `above` is given and is shorter than `line`.
pub fn unfilter_scanline(
  filter: FilterType, line: &mut [u8], above: Option<&[u8]>, color_length: usize,
) {
  let len = line.len();
  let left_start = color_length.min(len);
  match (filter, above) {
    (FilterType::None, _) | (FilterType::Up, None) => (),
    (FilterType::Sub, _) => {
      for i in left_start..len {
        line[i] = line[i].wrapping_add(line[i - color_length]);
      }
    }
    (FilterType::Up, Some(above)) => {
      line.iter_mut().zip(&above[..len]).for_each(|(x, b)| *x = x.wrapping_add(*b));
    }
    (FilterType::Average, None) => {
      // the above byte is always 0
      for i in left_start..len {
        line[i] = line[i].wrapping_add(line[i - color_length] / 2);
      }
    }
    (FilterType::Average, Some(above)) => {
      for i in 0..left_start {
        line[i] = line[i].wrapping_add(above[i] / 2);
      }
      for i in left_start..len {
        let a = u16::from(line[i - color_length]);
        let b = u16::from(above[i]);
        line[i] = line[i].wrapping_add(((a + b) / 2) as u8);
      }
    }
    (FilterType::Paeth, None) => {
      // with no above line the prediction is always the left byte, which
      // makes this the same as Sub.
      for i in left_start..len {
        line[i] = line[i].wrapping_add(paeth_predict(line[i - color_length], 0, 0));
      }
    }
    (FilterType::Paeth, Some(above)) => {
      for i in 0..left_start {
        line[i] = line[i].wrapping_add(paeth_predict(0, above[i], 0));
      }
      for i in left_start..len {
        let predicted = paeth_predict(line[i - color_length], above[i], above[i - color_length]);
        line[i] = line[i].wrapping_add(predicted);
      }
    }
  }
}

/// Reads filtered scanlines from decompressed image data and unfilters them
/// one at a time.
///
/// This holds two line buffers. Each call to
/// [`next_row`](Self::next_row) swaps them, so that last call's line becomes
/// the "above" line, and the other buffer receives the new line. Neither
/// buffer is ever read while it's being written.
#[derive(Debug, Clone)]
pub struct ScanlineReconstructor {
  height: u32,
  color_length: usize,
  row: u32,
  current: Vec<u8>,
  previous: Vec<u8>,
}
impl ScanlineReconstructor {
  /// Makes a reconstructor for the image described.
  ///
  /// ## Failure
  /// * [`Alloc`](PngError::Alloc) if the two line buffers can't be allocated
  ///   (including if the line length doesn't fit in a `usize`).
  pub fn new(descriptor: &ImageDescriptor) -> PngResult<Self> {
    let line_len = descriptor.scanline_length().ok_or(PngError::Alloc)?;
    let mut current = Vec::new();
    current.try_reserve_exact(line_len)?;
    current.resize(line_len, 0);
    let mut previous = Vec::new();
    previous.try_reserve_exact(line_len)?;
    previous.resize(line_len, 0);
    Ok(Self {
      height: descriptor.height,
      color_length: descriptor.color_length(),
      row: 0,
      current,
      previous,
    })
  }

  /// The row that the next call to [`next_row`](Self::next_row) will read.
  #[inline]
  #[must_use]
  pub const fn row(&self) -> u32 {
    self.row
  }

  /// Reads and unfilters the next scanline.
  ///
  /// Gives the row index and the unfiltered bytes of that row, or `None` once
  /// every row has been read.
  ///
  /// ## Failure
  /// * [`UnsupportedFilter`](PngError::UnsupportedFilter) if the filter byte
  ///   is not 0 through 4.
  /// * [`TruncatedInput`](PngError::TruncatedInput) if `src` ends before the
  ///   scanline is complete.
  /// * Any error from `src` itself.
  ///
  /// After an error the reconstructor's state is unspecified and it should
  /// be discarded.
  pub fn next_row<S: ByteSource>(&mut self, src: &mut S) -> PngResult<Option<(u32, &[u8])>> {
    if self.row >= self.height {
      return Ok(None);
    }
    let row = self.row;
    let value = src.read_u8()?;
    let filter =
      FilterType::try_from(value).map_err(|value| PngError::UnsupportedFilter { row, value })?;
    core::mem::swap(&mut self.current, &mut self.previous);
    src.read_exact_into(&mut self.current)?;
    let above = if row > 0 && filter.uses_above() { Some(self.previous.as_slice()) } else { None };
    unfilter_scanline(filter, &mut self.current, above, self.color_length);
    self.row += 1;
    Ok(Some((row, &self.current)))
  }
}
