use std::fmt;
use std::path::Path;

use log::debug;
use obml_types::{Document, EmbeddedImage, SourceId, Status};
use obml_wire::ByteCursor;

use crate::codec::{ImageCodec, RawCodec};
use crate::config::DecoderConfig;
use crate::content::{self, ContentSink};
use crate::error::DecodeError;
use crate::{header, links, metadata};

/// Pipeline stage of a decode, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Reading the file.
    Source,
    Header,
    Metadata,
    Links,
    Content,
}

impl Stage {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Source => "source",
            Self::Header => "header",
            Self::Metadata => "metadata",
            Self::Links => "links",
            Self::Content => "content",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A decode that stopped early.
///
/// Carries the document as far as it was filled in (its `status` set to
/// the error's kind), the error itself and the stage that raised it. Only
/// the header may be populated, or the header and the links, or those plus
/// the tiles that preceded the bad record.
pub struct PartialDecode<I = EmbeddedImage> {
    pub document: Box<Document<I>>,
    pub error: DecodeError,
    pub stage: Stage,
}

impl<I> PartialDecode<I> {
    fn new(mut document: Document<I>, stage: Stage, error: DecodeError) -> Self {
        document.status = Status::Failed(error.kind());
        Self {
            document: Box::new(document),
            error,
            stage,
        }
    }

    #[must_use]
    pub fn into_parts(self) -> (Document<I>, DecodeError) {
        (*self.document, self.error)
    }
}

impl<I> fmt::Debug for PartialDecode<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialDecode")
            .field("source", &self.document.source)
            .field("tiles", &self.document.tiles.len())
            .field("links", &self.document.links.len())
            .field("stage", &self.stage)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

impl<I> fmt::Display for PartialDecode<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to decode {}", self.document.source)
    }
}

impl<I> std::error::Error for PartialDecode<I> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Synchronous OBML decoder: one pass over a complete in-memory document.
///
/// Decoding runs four stages over a single cursor, each filling in part of
/// a fresh [`Document`]:
///
///   1. **Header**: content length, version (must be 6), page size,
///      title and URLs.
///   2. **Metadata**: skip tagged records until the link-section tag,
///      which gives the link section's extent.
///   3. **Links**: link records up to the end of the link section, which
///      must be hit exactly.
///   4. **Content**: tiles and embedded images up to `content_length`.
///      Image records go through the decoder's [`ImageCodec`].
///
/// The first failing stage stops the decode and the partially filled
/// document is returned inside [`PartialDecode`].
///
/// # Example
///
/// ```rust,ignore
/// use obml_decoder::ObmlDecoder;
///
/// let bytes = std::fs::read("page.obml")?;
/// let doc = ObmlDecoder::decode(&bytes)?;
/// println!("{}: {} tiles", doc.header.title, doc.tiles.len());
/// ```
///
/// With a different codec:
///
/// ```rust,ignore
/// let decoder = ObmlDecoder::new(DecoderConfig::default()).with_codec(RasterCodec);
/// let doc = decoder.parse(&bytes)?; // Document<image::RgbaImage>
/// ```
#[derive(Clone, Debug, Default)]
pub struct ObmlDecoder<C = RawCodec> {
    config: DecoderConfig,
    codec: C,
}

impl ObmlDecoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            codec: RawCodec,
        }
    }

    /// Decode `bytes` with the default configuration, keeping images as
    /// raw bytes.
    ///
    /// # Errors
    ///
    /// [`PartialDecode`] holding the first [`DecodeError`] and the
    /// document decoded up to that point.
    pub fn decode(bytes: &[u8]) -> Result<Document, PartialDecode> {
        Self::default().parse(bytes)
    }

    /// Read and decode the file at `path` with the default configuration.
    ///
    /// # Errors
    ///
    /// As [`decode`](Self::decode); an unreadable file fails with
    /// [`DecodeError::BadSource`] and an empty document.
    pub fn decode_file(path: impl AsRef<Path>) -> Result<Document, PartialDecode> {
        Self::default().parse_file(path)
    }
}

impl<C: ImageCodec> ObmlDecoder<C> {
    /// Replace the image codec, keeping the configuration.
    #[must_use]
    pub fn with_codec<D: ImageCodec>(self, codec: D) -> ObmlDecoder<D> {
        ObmlDecoder {
            config: self.config,
            codec,
        }
    }

    #[must_use]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode an in-memory document.
    ///
    /// # Errors
    ///
    /// [`PartialDecode`] holding the first [`DecodeError`] and the
    /// document decoded up to that point.
    pub fn parse(&self, bytes: &[u8]) -> Result<Document<C::Image>, PartialDecode<C::Image>> {
        self.parse_with_source(bytes, SourceId::memory())
    }

    /// Decode an in-memory document, labelling it `source` in the result
    /// and in log output.
    ///
    /// # Errors
    ///
    /// As [`parse`](Self::parse).
    pub fn parse_with_source(
        &self,
        bytes: &[u8],
        source: SourceId,
    ) -> Result<Document<C::Image>, PartialDecode<C::Image>> {
        let mut doc = Document::new(source);

        match self.run(bytes, &mut doc) {
            Ok(()) => {
                debug!(
                    "{}: {} tiles, {} links, {} images",
                    doc.source,
                    doc.tiles.len(),
                    doc.links.len(),
                    doc.images.len()
                );
                Ok(doc)
            }
            Err((stage, error)) => {
                debug!("{}: {stage} failed: {error}", doc.source);
                Err(PartialDecode::new(doc, stage, error))
            }
        }
    }

    /// Read and decode the file at `path`.
    ///
    /// # Errors
    ///
    /// As [`parse`](Self::parse); an unreadable file fails with
    /// [`DecodeError::BadSource`] and an empty document.
    pub fn parse_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Document<C::Image>, PartialDecode<C::Image>> {
        let path = path.as_ref();
        let source = SourceId::from_path(path);
        match std::fs::read(path) {
            Ok(bytes) => self.parse_with_source(&bytes, source),
            Err(e) => Err(PartialDecode::new(
                Document::new(source),
                Stage::Source,
                DecodeError::BadSource(e),
            )),
        }
    }

    fn run(
        &self,
        bytes: &[u8],
        doc: &mut Document<C::Image>,
    ) -> Result<(), (Stage, DecodeError)> {
        let mut cur = ByteCursor::new(bytes);

        header::read_header(&mut cur, &mut doc.header).map_err(at(Stage::Header))?;
        let section = metadata::scan(&mut cur, self.config.max_metadata_records)
            .map_err(at(Stage::Metadata))?;
        links::read_links(&mut cur, section, &mut doc.links).map_err(at(Stage::Links))?;

        let codec = self.config.decode_images.then_some(&self.codec);
        content::read_content(
            &mut cur,
            doc.header.content_length as usize,
            codec,
            ContentSink {
                tiles: &mut doc.tiles,
                images: &mut doc.images,
            },
        )
        .map_err(at(Stage::Content))
    }
}

fn at(stage: Stage) -> impl FnOnce(DecodeError) -> (Stage, DecodeError) {
    move |e| (stage, e)
}
