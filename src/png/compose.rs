use super::*;

/// Turns one unfiltered color group (the bytes of one pixel) into an
/// [`ARGB8888`].
///
/// * Only the high byte of 16-bit channels is used.
/// * PNG stores alpha last, here it moves to the front.
/// * Greyscale is copied into red, green, and blue.
/// * Without an alpha channel the pixel is fully opaque.
///
/// ## Panics
/// * If `color_group` is shorter than `descriptor.color_length()`.
#[must_use]
pub fn compose_pixel(descriptor: &ImageDescriptor, color_group: &[u8]) -> ARGB8888 {
  let channels = descriptor.channels as usize;
  let step = descriptor.bytes_per_channel as usize;
  // the high byte of each channel, in file order
  let mut samples = [0_u8; 4];
  samples
    .iter_mut()
    .zip(color_group.iter().step_by(step))
    .take(channels)
    .for_each(|(s, c)| *s = *c);
  let samples = &mut samples[..channels];
  if descriptor.has_alpha {
    samples.rotate_right(1);
  }
  let (a, color) = if descriptor.has_alpha {
    (samples[0], &samples[1..])
  } else {
    (0xFF, &samples[..])
  };
  let [r, g, b] = if descriptor.is_color { [color[0], color[1], color[2]] } else { [color[0]; 3] };
  ARGB8888::from_u32(u32::from_be_bytes([a, r, g, b]))
}

/// Writes one unfiltered scanline into row `y` of the bitmap.
///
/// ## Panics
/// * If `line` holds fewer than `bitmap.width` color groups.
pub fn compose_scanline(
  descriptor: &ImageDescriptor, y: u32, line: &[u8], bitmap: &mut Bitmap<ARGB8888>,
) {
  let color_length = descriptor.color_length();
  let start = xy_width_to_index(0, y, bitmap.width);
  let row = &mut bitmap.pixels[start..start + bitmap.width as usize];
  let groups = line.chunks_exact(color_length);
  assert!(groups.len() >= row.len(), "scanline is too short for the bitmap width");
  row.iter_mut().zip(groups).for_each(|(px, group)| *px = compose_pixel(descriptor, group));
}
