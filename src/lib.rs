#![no_std]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! A crate for streaming PNG decoding.
//!
//! Non-interlaced, non-palette PNG images at 8 or 16 bits per channel are
//! decoded into a [`Bitmap`] of [`ARGB8888`] pixels. See the [`png`] module
//! for details.
//!
//! The crate is `no_std` but requires `alloc`. The default `std` feature adds
//! reading from any [`std::io::Read`] via [`IoSource`], and an
//! [`Error`](std::error::Error) impl for [`PngError`].

extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

mod byte_source;
pub use byte_source::*;

pub mod pixel_formats;
pub use crate::pixel_formats::ARGB8888;

pub mod bitmap;
pub use bitmap::Bitmap;

pub mod png;
