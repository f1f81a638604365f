use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use crate::header::Header;
use crate::link::Link;
use crate::status::Status;
use crate::tile::{Tile, TileKind};

/// Where a document's bytes came from, for diagnostics.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SourceId(String);

impl SourceId {
    /// Label for bytes that were handed over directly.
    #[must_use]
    pub fn memory() -> Self {
        Self("<memory>".to_string())
    }

    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        Self(path.display().to_string())
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An embedded image record exactly as it appeared in the file.
///
/// This is what the pass-through codec stores. Turning the bytes into
/// pixels is left to whoever consumes the document.
#[derive(Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub bytes: Vec<u8>,
}

impl EmbeddedImage {
    #[must_use]
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension guessed from the leading magic bytes.
    ///
    /// Defaults to `"jpeg"`, the format the server uses for almost all
    /// embedded pictures.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self.bytes.as_slice() {
            [0x89, b'P', b'N', b'G', ..] => "png",
            [b'G', b'I', b'F', b'8', ..] => "gif",
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "webp",
            _ => "jpeg",
        }
    }
}

impl fmt::Debug for EmbeddedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddedImage")
            .field("len", &self.bytes.len())
            .field("format", &self.extension())
            .finish()
    }
}

// Serialized as a summary; raw image bytes have no place in JSON output.
#[cfg(feature = "serde")]
impl serde::Serialize for EmbeddedImage {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut st = serializer.serialize_struct("EmbeddedImage", 2)?;
        st.serialize_field("len", &self.bytes.len())?;
        st.serialize_field("format", self.extension())?;
        st.end()
    }
}

/// A decoded OBML page.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────┐
/// │ Document<I>                                                 │
/// │   source: SourceId           ← file path or "<memory>"      │
/// │   header: Header             ← version, size, title, urls   │
/// │   tiles:  Vec<Tile>          ← paint order                  │
/// │   links:  Vec<Link>          ← hit-test order               │
/// │   images: BTreeMap<u32, I>   ← keyed by record address      │
/// │   status: Status             ← Ok or the first failure      │
/// └─────────────────────────────────────────────────────────────┘
/// ```
///
/// `I` is whatever the decoder's image codec produces; the default
/// pass-through codec yields [`EmbeddedImage`].
///
/// A document is built once by a decode and then only read. A failed
/// decode still returns the document it was filling in, so the parts that
/// were read before the failure (typically the header and some tiles) can
/// be inspected.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Document<I = EmbeddedImage> {
    pub source: SourceId,
    pub header: Header,
    pub tiles: Vec<Tile>,
    pub links: Vec<Link>,
    pub images: BTreeMap<u32, I>,
    pub status: Status,
}

impl<I> Document<I> {
    /// An empty document for `source`, ready to be filled by a decode.
    #[must_use]
    pub fn new(source: SourceId) -> Self {
        Self {
            source,
            header: Header::default(),
            tiles: Vec::new(),
            links: Vec::new(),
            images: BTreeMap::new(),
            status: Status::Ok,
        }
    }

    #[must_use]
    pub fn image(&self, address: u32) -> Option<&I> {
        self.images.get(&address)
    }

    /// The image an image tile refers to. `None` for other tile kinds and
    /// for addresses missing from the table.
    #[must_use]
    pub fn image_for(&self, tile: &Tile) -> Option<&I> {
        tile.image_address().and_then(|a| self.image(a))
    }

    pub fn tiles_of(&self, kind: TileKind) -> impl Iterator<Item = &Tile> {
        self.tiles.iter().filter(move |t| t.kind() == kind)
    }

    /// Tile counts per kind, in [`TileKind`] order.
    #[must_use]
    pub fn tile_counts(&self) -> BTreeMap<TileKind, usize> {
        let mut counts = BTreeMap::new();
        for tile in &self.tiles {
            *counts.entry(tile.kind()).or_insert(0) += 1;
        }
        counts
    }

    /// Image tiles whose address has no entry in the image table.
    pub fn unresolved_images(&self) -> impl Iterator<Item = &Tile> {
        self.tiles
            .iter()
            .filter(|t| t.image_address().is_some_and(|a| !self.images.contains_key(&a)))
    }

    pub fn interactive_links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|l| l.is_interactive())
    }
}
