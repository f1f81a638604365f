/// The only OBML format version this crate understands.
pub const SUPPORTED_VERSION: u8 = 6;

/// OBML document header.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────┐
/// │ Field            │ Wire shape                                   │
/// ├──────────────────┼──────────────────────────────────────────────┤
/// │ content_length   │ medium, plus 3 for the length field itself   │
/// │ version          │ u8, must be 6                                │
/// │ page_size        │ coordinate, truncated to integer pixels      │
/// │ (sentinel)       │ 5 bytes, "S\0\0\xFF\xFF"                     │
/// │ title            │ string                                       │
/// │ (unknown)        │ blob                                         │
/// │ base_url         │ string                                       │
/// │ page_url         │ string                                       │
/// │ (unknown)        │ 1 byte                                       │
/// └──────────────────┴──────────────────────────────────────────────┘
/// ```
///
/// `content_length` is an absolute offset: the content section ends where
/// the cursor position reaches it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Header {
    pub content_length: u32,
    pub version: u8,
    /// Page width and height in pixels.
    pub page_size: (i32, i32),
    pub title: String,
    pub base_url: String,
    pub page_url: String,
}

impl Header {
    #[must_use]
    pub fn is_supported(&self) -> bool {
        self.version == SUPPORTED_VERSION
    }
}
