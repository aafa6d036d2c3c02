//! Image encoding and decoding

pub mod codec;

pub use codec::{DEFAULT_JPEG_QUALITY, ImageEncoding, decode, encode};
