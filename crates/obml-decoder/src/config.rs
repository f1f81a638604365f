/// Configuration for [`ObmlDecoder`](crate::ObmlDecoder).
///
/// ```text
/// ┌──────────────────────┬─────────┬──────────────────────────────────────┐
/// │ Field                │ Default │ Effect                               │
/// ├──────────────────────┼─────────┼──────────────────────────────────────┤
/// │ max_metadata_records │ 64      │ metadata records read before giving  │
/// │                      │         │ up on finding the link section       │
/// │ decode_images        │ true    │ hand image records to the codec; if  │
/// │                      │         │ false they are skipped and the image │
/// │                      │         │ table stays empty                    │
/// └──────────────────────┴─────────┴──────────────────────────────────────┘
/// ```
///
/// Real files carry a handful of metadata records; the limit only exists
/// so a corrupt file cannot keep the scanner busy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub max_metadata_records: usize,
    pub decode_images: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_metadata_records: 64,
            decode_images: true,
        }
    }
}

impl DecoderConfig {
    /// Tiles and links only. Useful when the caller never draws images.
    #[must_use]
    pub fn without_images() -> Self {
        Self {
            decode_images: false,
            ..Self::default()
        }
    }
}
