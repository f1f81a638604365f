#![warn(clippy::pedantic)]

pub mod codec;
pub mod config;
pub mod decoder;
pub mod error;

mod content;
mod header;
mod links;
mod metadata;

pub use codec::{ImageCodec, ImageError, RawCodec};
#[cfg(feature = "raster")]
pub use codec::RasterCodec;
pub use config::DecoderConfig;
pub use decoder::{ObmlDecoder, PartialDecode, Stage};
pub use error::{DecodeError, Section};
