//! The CRC-32 used by PNG chunks (ISO 3309, reflected polynomial
//! `0xEDB88320`).

const CRC_TABLE: [u32; 256] = make_crc_table();

const fn make_crc_table() -> [u32; 256] {
  let mut out = [0; 256];
  let mut n = 0;
  while n < 256 {
    let mut c = n as u32;
    let mut k = 0;
    while k < 8 {
      c = if (c & 1) != 0 { 0xEDB8_8320_u32 ^ (c >> 1) } else { c >> 1 };
      k += 1;
    }
    out[n] = c;
    n += 1;
  }
  out
}

/// Computes a chunk's CRC from its type tag and data.
#[must_use]
pub(crate) fn chunk_crc(chunk_ty: [u8; 4], data: &[u8]) -> u32 {
  let crc = chunk_ty.iter().chain(data).fold(u32::MAX, |crc, &byte| {
    CRC_TABLE[((crc ^ u32::from(byte)) & 0xFF) as usize] ^ (crc >> 8)
  });
  crc ^ u32::MAX
}

#[test]
fn test_chunk_crc_of_iend() {
  // every PNG ends with the same IEND chunk, so its CRC is well known.
  assert_eq!(chunk_crc(*b"IEND", &[]), 0xAE42_6082);
}
