/// Errors raised by the byte cursor and the primitive codec.
///
/// Every variant carries the absolute offset into the source so a failed
/// decode can be lined up against a hex dump of the file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Fewer bytes remained than a read requested.
    #[error("unexpected end of input at offset {offset} (needed {needed} bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A seek target lies outside the source.
    #[error("seek to {target} is outside the source ({len} bytes)")]
    SeekOutOfBounds { target: usize, len: usize },
}

impl WireError {
    /// Offset at which the failing access started.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            Self::UnexpectedEof { offset, .. } => *offset,
            Self::SeekOutOfBounds { target, .. } => *target,
        }
    }
}
