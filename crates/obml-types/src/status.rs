use std::fmt;

/// Classification of a failed decode.
///
/// This is the `Copy` summary stored on a [`Document`](crate::Document);
/// the decoder's own error type carries offsets and tags on top of it.
///
/// ```text
/// ┌─────────────────────────┬──────────────────────────────────────────┐
/// │ Kind                    │ Raised when                              │
/// ├─────────────────────────┼──────────────────────────────────────────┤
/// │ BadSource               │ the source could not be opened or read   │
/// │ UnsupportedVersion      │ version byte is not 6                    │
/// │ Unknown                 │ metadata scanner lost synchronisation    │
/// │ BadLinkTag              │ unrecognised link record tag             │
/// │ UnexpectedSectionLength │ a section did not end where declared     │
/// │ BadContentTag           │ unrecognised content record tag          │
/// │ BadImageData            │ the image codec rejected a record        │
/// │ Io                      │ a read ran past the end of the source    │
/// └─────────────────────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ErrorKind {
    BadSource,
    UnsupportedVersion,
    Unknown,
    BadLinkTag,
    UnexpectedSectionLength,
    BadContentTag,
    BadImageData,
    Io,
}

impl ErrorKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BadSource => "bad_source",
            Self::UnsupportedVersion => "unsupported_version",
            Self::Unknown => "unknown",
            Self::BadLinkTag => "bad_link_tag",
            Self::UnexpectedSectionLength => "unexpected_section_length",
            Self::BadContentTag => "bad_content_tag",
            Self::BadImageData => "bad_image_data",
            Self::Io => "io",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal status of the decode that produced a document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Status {
    #[default]
    Ok,
    Failed(ErrorKind),
}

impl Status {
    #[must_use]
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }

    #[must_use]
    pub fn error(self) -> Option<ErrorKind> {
        match self {
            Self::Ok => None,
            Self::Failed(kind) => Some(kind),
        }
    }
}
