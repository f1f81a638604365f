use std::fmt;

use obml_types::ErrorKind;
use obml_wire::WireError;

use crate::codec::ImageError;

/// Section of an OBML file whose declared extent was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    Links,
    Content,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Links => "link",
            Self::Content => "content",
        })
    }
}

/// Errors that can occur while decoding an OBML document.
///
/// Every error stops the pipeline; nothing is retried. The stage that
/// raised it can be read off the variant:
///
/// ```text
///   DecodeError
///   ├── BadSource                ← file could not be read
///   ├── UnsupportedVersion       ← header: version byte ≠ 6
///   ├── UnknownMetadataTag       ← metadata: desynchronised
///   ├── MetadataLimit            ← metadata: no link section in sight
///   ├── BadLinkTag               ← links: unknown record tag
///   ├── UnexpectedSectionLength  ← links/content: extent mismatch
///   ├── BadContentTag            ← content: unknown record tag
///   ├── BadImageData             ← content: codec rejected a record
///   └── Wire(WireError)          ← any stage: read past end of input
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The source could not be opened or read.
    #[error("cannot read source")]
    BadSource(#[source] std::io::Error),

    #[error("unsupported OBML version {version} (only version 6 is supported)")]
    UnsupportedVersion { version: u8 },

    /// The metadata scanner met a tag (or `M` sub-tag) it does not know.
    ///
    /// Metadata records carry no length prefix, so there is no way to skip
    /// an unknown one and stay in sync.
    #[error("unknown metadata tag {tag:#04x} at offset {offset}")]
    UnknownMetadataTag { tag: u8, offset: usize },

    /// The metadata scanner read `limit` records without finding the
    /// link-section tag.
    #[error("no link section after {limit} metadata records")]
    MetadataLimit { limit: usize },

    #[error("unknown link record tag {tag:#04x} at offset {offset}")]
    BadLinkTag { tag: u8, offset: usize },

    /// A section's records did not end exactly where its length said.
    #[error("{section} section ended at offset {actual}, expected {expected}")]
    UnexpectedSectionLength {
        section: Section,
        expected: usize,
        actual: usize,
    },

    #[error("unknown content record tag {tag:#04x} at offset {offset}")]
    BadContentTag { tag: u8, offset: usize },

    /// The image codec rejected the record at `address`.
    #[error("bad image data at address {address:#x}")]
    BadImageData {
        address: u32,
        #[source]
        source: ImageError,
    },

    /// A primitive read ran past the end of the source.
    #[error(transparent)]
    Wire(#[from] WireError),
}

impl DecodeError {
    /// The coarse classification stored on a failed
    /// [`Document`](obml_types::Document).
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BadSource(_) => ErrorKind::BadSource,
            Self::UnsupportedVersion { .. } => ErrorKind::UnsupportedVersion,
            Self::UnknownMetadataTag { .. } | Self::MetadataLimit { .. } => ErrorKind::Unknown,
            Self::BadLinkTag { .. } => ErrorKind::BadLinkTag,
            Self::UnexpectedSectionLength { .. } => ErrorKind::UnexpectedSectionLength,
            Self::BadContentTag { .. } => ErrorKind::BadContentTag,
            Self::BadImageData { .. } => ErrorKind::BadImageData,
            Self::Wire(_) => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            DecodeError::UnsupportedVersion { version: 5 }.kind(),
            ErrorKind::UnsupportedVersion
        );
        assert_eq!(
            DecodeError::MetadataLimit { limit: 4 }.kind(),
            ErrorKind::Unknown
        );
        assert_eq!(
            DecodeError::from(WireError::UnexpectedEof { offset: 0, needed: 1 }).kind(),
            ErrorKind::Io
        );
    }

    #[test]
    fn messages_carry_offsets() {
        let e = DecodeError::BadContentTag { tag: b'Q', offset: 120 };
        assert_eq!(e.to_string(), "unknown content record tag 0x51 at offset 120");

        let e = DecodeError::UnexpectedSectionLength {
            section: Section::Links,
            expected: 40,
            actual: 41,
        };
        assert_eq!(e.to_string(), "link section ended at offset 41, expected 40");
    }
}
