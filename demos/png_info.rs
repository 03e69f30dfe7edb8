use pngstream::{
  png::{decode_png_with, interpret_header, parse_chunks_with, DecodeOptions},
  IoSource,
};

fn main() {
  let args: Vec<String> = std::env::args().collect();
  println!("ARGS: {args:?}");
  let options = DecodeOptions { verify_crc: true, ..DecodeOptions::default() };
  for file_arg in args[1..].iter() {
    let path = std::path::Path::new(file_arg);
    print!("Reading `{}`... ", path.display());
    let file = match std::fs::File::open(path) {
      Ok(file) => file,
      Err(e) => {
        println!("{e:?}");
        continue;
      }
    };
    let chunks = match parse_chunks_with(IoSource(std::io::BufReader::new(file)), true) {
      Ok(chunks) => {
        println!("got {} chunks.", chunks.len());
        chunks
      }
      Err(e) => {
        println!("{e}");
        continue;
      }
    };
    for (n, chunk) in chunks.iter().enumerate() {
      println!("{n}: {chunk:?}");
    }
    match interpret_header(&chunks) {
      Ok(descriptor) => println!("{descriptor:?}"),
      Err(e) => {
        println!("{e}");
        continue;
      }
    }
    // decode it again start to finish, streaming from the file this time
    let res = std::fs::File::open(path)
      .map_err(|e| pngstream::PngError::Io(e.kind()))
      .and_then(|file| decode_png_with(IoSource(std::io::BufReader::new(file)), &options));
    match res {
      Ok(image) => {
        let opaque = image.bitmap.pixels.iter().filter(|p| p.a == 0xFF).count();
        println!(
          "decoded {}x{}, {opaque} of {} pixels opaque",
          image.bitmap.width,
          image.bitmap.height,
          image.bitmap.pixels.len()
        );
      }
      Err(e) => println!("decode failed: {e}"),
    }
  }
}
