use pngstream::{
  png::{decode_png, decode_png_with, parse_chunks, ChunkType, DecodeOptions, PNG_SIGNATURE},
  IoSource, PngError, ARGB8888,
};
use walkdir::WalkDir;

/// Bitwise CRC-32, since the crate's table version isn't public. Files built
/// with this pass `verify_crc`, so the two are checked against each other.
fn crc32(bytes: &[u8]) -> u32 {
  let mut crc = u32::MAX;
  for &b in bytes {
    crc ^= u32::from(b);
    for _ in 0..8 {
      crc = if crc & 1 != 0 { (crc >> 1) ^ 0xEDB8_8320 } else { crc >> 1 };
    }
  }
  !crc
}

fn chunk(tag: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(tag);
  v.extend_from_slice(data);
  let mut crc_input = tag.to_vec();
  crc_input.extend_from_slice(data);
  v.extend_from_slice(&crc32(&crc_input).to_be_bytes());
  v
}

/// Builds a PNG out of already filtered scanlines, with the compressed data
/// cut into `idat_count` chunks of about the same size.
fn build_png(
  width: u32, height: u32, bit_depth: u8, color_type: u8, scanlines: &[u8], idat_count: usize,
) -> Vec<u8> {
  let mut ihdr = Vec::new();
  ihdr.extend_from_slice(&width.to_be_bytes());
  ihdr.extend_from_slice(&height.to_be_bytes());
  ihdr.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
  let compressed = miniz_oxide::deflate::compress_to_vec_zlib(scanlines, 9);
  let per_chunk = (compressed.len() + idat_count - 1) / idat_count;
  let mut v = PNG_SIGNATURE.to_vec();
  v.extend(chunk(b"IHDR", &ihdr));
  v.extend(chunk(b"gAMA", &45455_u32.to_be_bytes()));
  for part in compressed.chunks(per_chunk.max(1)) {
    v.extend(chunk(b"IDAT", part));
  }
  v.extend(chunk(b"IEND", &[]));
  v
}

fn gray(y: u8) -> ARGB8888 {
  ARGB8888 { a: 0xFF, r: y, g: y, b: y }
}

#[test]
fn test_decode_gray_rows() {
  let scanlines = [0, 0x10, 0x20, 0x30, 0x40, 0, 0x50, 0x60, 0x70, 0x80];
  let png = build_png(4, 2, 8, 0, &scanlines, 1);
  let image = decode_png(png.as_slice()).unwrap();
  assert_eq!(image.bitmap.width, 4);
  assert_eq!(image.bitmap.height, 2);
  let expected: Vec<ARGB8888> =
    [0x10, 0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80].into_iter().map(gray).collect();
  assert_eq!(image.bitmap.pixels, expected);
}

#[test]
fn test_decode_is_deterministic_and_split_invariant() {
  // rgb, 16 bits per channel, every row using Sub
  let (w, h) = (9_u32, 6_u32);
  let mut scanlines = Vec::new();
  for y in 0..h {
    scanlines.push(1);
    scanlines.extend((0..w * 6).map(|i| (i ^ (y * 17)) as u8));
  }
  let one = build_png(w, h, 16, 2, &scanlines, 1);
  let first = decode_png(one.as_slice()).unwrap();
  assert_eq!(first, decode_png(one.as_slice()).unwrap());
  for idat_count in [2, 3, 7, 100] {
    let many = build_png(w, h, 16, 2, &scanlines, idat_count);
    assert_eq!(first, decode_png(many.as_slice()).unwrap(), "{idat_count} IDAT chunks");
  }
  assert!(first.bitmap.pixels.iter().all(|p| p.a == 0xFF));
}

#[test]
fn test_decode_from_io_source() {
  let scanlines = [0, 0x80, 0x40, 0, 0x20, 0x10];
  let png = build_png(1, 2, 8, 4, &scanlines, 2);
  let image = decode_png(IoSource(std::io::Cursor::new(png))).unwrap();
  assert_eq!(
    image.bitmap.pixels,
    [ARGB8888::from_u32(0x40_80_80_80), ARGB8888::from_u32(0x10_20_20_20)]
  );
}

#[test]
fn test_decode_rejections() {
  let scanlines = [0, 1, 2, 0, 3, 4];
  let good = build_png(2, 2, 8, 0, &scanlines, 1);
  for len in 0..8 {
    assert_eq!(decode_png(&good[..len]), Err(PngError::TruncatedInput));
  }
  for i in 0..8 {
    let mut bad = good.clone();
    bad[i] = bad[i].wrapping_add(1);
    assert_eq!(decode_png(bad.as_slice()), Err(PngError::BadSignature));
  }
  let bad_filter = build_png(2, 2, 8, 0, &[0, 1, 2, 5, 3, 4], 1);
  assert_eq!(
    decode_png(bad_filter.as_slice()),
    Err(PngError::UnsupportedFilter { row: 1, value: 5 })
  );

  // break the zlib header check bits: the first IDAT data byte comes after
  // the signature, IHDR, gAMA, and the IDAT length and type.
  let mut corrupt = good.clone();
  corrupt[8 + 25 + 16 + 8] ^= 0x40;
  assert_eq!(decode_png(corrupt.as_slice()), Err(PngError::DecompressionFailed));
  let strict = DecodeOptions { verify_crc: true, ..DecodeOptions::default() };
  match decode_png_with(corrupt.as_slice(), &strict) {
    Err(PngError::CrcMismatch { chunk_ty: ChunkType::IDAT, .. }) => (),
    other => panic!("{other:?}"),
  }
  assert!(decode_png_with(good.as_slice(), &strict).is_ok());

  let limited = DecodeOptions { max_height: 1, ..DecodeOptions::default() };
  assert_eq!(decode_png_with(good.as_slice(), &limited), Err(PngError::DimensionsTooLarge));
}

#[test]
fn test_decode_no_panics() {
  // iter ALL files in the test folder, even non-png files shouldn't panic it.
  for entry in WalkDir::new("tests/").into_iter().filter_map(|e| e.ok()) {
    if entry.file_type().is_dir() {
      continue;
    }
    println!("{}", entry.path().display());
    let v = match std::fs::read(entry.path()) {
      Ok(v) => v,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    let _ = parse_chunks(v.as_slice());
    let _ = decode_png(v.as_slice());
  }
  // even totally random data should never panic the decoder!
  for _ in 0..10 {
    let v = super::rand_bytes(1024);
    let _ = decode_png(v.as_slice());
    // and neither should random image data behind a valid header
    let mut png = PNG_SIGNATURE.to_vec();
    png.extend(chunk(b"IHDR", &[0, 0, 0, 3, 0, 0, 0, 3, 8, 6, 0, 0, 0]));
    png.extend(chunk(b"IDAT", &v));
    png.extend(chunk(b"IEND", &[]));
    let _ = decode_png(png.as_slice());
  }
}
