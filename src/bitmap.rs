//! Owned raster images.

use alloc::vec::Vec;

use crate::{pixel_formats::ARGB8888, PngResult};

/// Converts an `(x,y)` position within a given `width` 2D space into a linear
/// index.
#[inline]
#[must_use]
pub const fn xy_width_to_index(x: u32, y: u32, width: u32) -> usize {
  (y as usize) * (width as usize) + (x as usize)
}

/// An owned direct-color image.
///
/// Pixels are stored in row-major order, starting at the top left.
///
/// The fields are public, but if you put them together weirdly (a `pixels`
/// length other than `width * height`) the methods of this type might return
/// `None` for positions that look like they should be in bounds.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub struct Bitmap<P = ARGB8888> {
  pub width: u32,
  pub height: u32,
  pub pixels: Vec<P>,
}
impl<P: Clone> Bitmap<P> {
  /// Makes a bitmap with every pixel set to `fill`.
  ///
  /// ## Failure
  /// * If the allocator can't reserve `width * height` pixels.
  pub fn try_new(width: u32, height: u32, fill: P) -> PngResult<Self> {
    let count = (width as usize).checked_mul(height as usize).ok_or(crate::PngError::Alloc)?;
    let mut pixels = Vec::new();
    pixels.try_reserve_exact(count)?;
    pixels.resize(count, fill);
    Ok(Self { width, height, pixels })
  }
}
impl<P> Bitmap<P> {
  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get(&self, x: u32, y: u32) -> Option<&P> {
    if x < self.width && y < self.height {
      self.pixels.get(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Gets the pixel at the position, or `None` if the position is out of
  /// bounds.
  #[inline]
  #[must_use]
  pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut P> {
    if x < self.width && y < self.height {
      self.pixels.get_mut(xy_width_to_index(x, y, self.width))
    } else {
      None
    }
  }

  /// Gets one full row of pixels.
  #[inline]
  #[must_use]
  pub fn row(&self, y: u32) -> Option<&[P]> {
    if y < self.height {
      let start = xy_width_to_index(0, y, self.width);
      self.pixels.get(start..start + self.width as usize)
    } else {
      None
    }
  }

  /// Converts every pixel into another pixel type.
  #[inline]
  #[must_use]
  pub fn convert<Q: From<P>>(self) -> Bitmap<Q> {
    Bitmap {
      width: self.width,
      height: self.height,
      pixels: self.pixels.into_iter().map(Q::from).collect(),
    }
  }
}
