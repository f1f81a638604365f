//! The seam between the decoder and whatever turns embedded image records
//! into something drawable.

use obml_types::EmbeddedImage;
use obml_wire::WireError;

/// Why an image record was rejected.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// A zero-length record. The format never emits these for real images.
    #[error("empty image record")]
    Empty,

    /// The record's length prefix runs past the end of its `S` section
    /// or of the input.
    #[error("truncated image record")]
    Truncated(#[source] WireError),

    #[error("{0}")]
    Decode(String),

    #[cfg(feature = "raster")]
    #[error(transparent)]
    Raster(#[from] image::ImageError),
}

/// Decodes one embedded image record.
///
/// The content decoder calls this once per record in an `S` section,
/// passing the record's address (its image-table key) and the record body
/// without its `u16` length prefix. An `Err` aborts the decode with
/// [`DecodeError::BadImageData`](crate::DecodeError::BadImageData).
///
/// Any `Fn(u32, &[u8]) -> Result<T, ImageError>` is a codec, which keeps
/// ad-hoc codecs in tests and tools short.
pub trait ImageCodec {
    type Image;

    /// # Errors
    ///
    /// Any [`ImageError`]; the decode stops at the first one.
    fn decode(&self, address: u32, record: &[u8]) -> Result<Self::Image, ImageError>;
}

impl<F, T> ImageCodec for F
where
    F: Fn(u32, &[u8]) -> Result<T, ImageError>,
{
    type Image = T;

    fn decode(&self, address: u32, record: &[u8]) -> Result<T, ImageError> {
        self(address, record)
    }
}

/// Keeps records as opaque bytes. The default codec.
#[derive(Clone, Copy, Debug, Default)]
pub struct RawCodec;

impl ImageCodec for RawCodec {
    type Image = EmbeddedImage;

    fn decode(&self, _address: u32, record: &[u8]) -> Result<EmbeddedImage, ImageError> {
        Ok(EmbeddedImage::new(record.to_vec()))
    }
}

/// Decodes records into RGBA pixels (JPEG, PNG and GIF).
#[cfg(feature = "raster")]
#[derive(Clone, Copy, Debug, Default)]
pub struct RasterCodec;

#[cfg(feature = "raster")]
impl ImageCodec for RasterCodec {
    type Image = image::RgbaImage;

    fn decode(&self, _address: u32, record: &[u8]) -> Result<image::RgbaImage, ImageError> {
        Ok(image::load_from_memory(record)?.to_rgba8())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_codec_copies_bytes() {
        let img = RawCodec.decode(10, &[1, 2, 3]).unwrap();
        assert_eq!(img.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn closures_are_codecs() {
        let codec = |address: u32, record: &[u8]| -> Result<(u32, usize), ImageError> {
            Ok((address, record.len()))
        };
        assert_eq!(codec.decode(4, &[0; 9]).unwrap(), (4, 9));
    }

    #[cfg(feature = "raster")]
    #[test]
    fn raster_codec_rejects_garbage() {
        assert!(matches!(
            RasterCodec.decode(0, b"not an image"),
            Err(ImageError::Raster(_))
        ));
    }
}
