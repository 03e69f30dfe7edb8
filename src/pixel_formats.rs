//! The decoder's output pixel format.
//!
//! Every decoded image is stored as [`ARGB8888`] no matter what the PNG holds:
//! * Greyscale is copied to each of the red, green, and blue channels.
//! * Images without alpha are fully opaque.
//! * 16-bit channels keep only their high byte.
//!
//! To use the pixels somewhere that expects RGBA order, convert them into
//! [`r8g8b8a8_Srgb`] (PNG color data is sRGB unless the file says otherwise,
//! and this decoder doesn't read color space chunks).

use bytemuck::{Pod, Zeroable};
use pixel_formats::r8g8b8a8_Srgb;

/// An 8-bit per channel pixel with alpha in the leading position.
///
/// Packed into a `u32` (most significant byte first) this is `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct ARGB8888 {
  pub a: u8,
  pub r: u8,
  pub g: u8,
  pub b: u8,
}
impl ARGB8888 {
  /// Fully opaque black.
  pub const OPAQUE_BLACK: Self = Self { a: 0xFF, r: 0, g: 0, b: 0 };

  /// Unpacks an `0xAARRGGBB` value.
  #[inline]
  #[must_use]
  pub const fn from_u32(argb: u32) -> Self {
    let [a, r, g, b] = argb.to_be_bytes();
    Self { a, r, g, b }
  }

  /// Packs into an `0xAARRGGBB` value.
  #[inline]
  #[must_use]
  pub const fn to_u32(self) -> u32 {
    u32::from_be_bytes([self.a, self.r, self.g, self.b])
  }
}
impl From<u32> for ARGB8888 {
  #[inline]
  fn from(argb: u32) -> Self {
    Self::from_u32(argb)
  }
}
impl From<ARGB8888> for u32 {
  #[inline]
  fn from(px: ARGB8888) -> Self {
    px.to_u32()
  }
}
impl From<ARGB8888> for r8g8b8a8_Srgb {
  #[inline]
  fn from(ARGB8888 { a, r, g, b }: ARGB8888) -> Self {
    r8g8b8a8_Srgb { r, g, b, a }
  }
}
impl From<r8g8b8a8_Srgb> for ARGB8888 {
  #[inline]
  fn from(r8g8b8a8_Srgb { r, g, b, a }: r8g8b8a8_Srgb) -> Self {
    Self { a, r, g, b }
  }
}

#[test]
fn test_argb_packing_is_alpha_leading() {
  let px = ARGB8888::from_u32(0x80_10_20_30);
  assert_eq!(px, ARGB8888 { a: 0x80, r: 0x10, g: 0x20, b: 0x30 });
  assert_eq!(px.to_u32(), 0x80_10_20_30);
  // the in-memory byte order matches the packed order
  assert_eq!(bytemuck::bytes_of(&px), &[0x80, 0x10, 0x20, 0x30]);
  let rgba = r8g8b8a8_Srgb::from(px);
  assert_eq!((rgba.r, rgba.g, rgba.b, rgba.a), (0x10, 0x20, 0x30, 0x80));
}
