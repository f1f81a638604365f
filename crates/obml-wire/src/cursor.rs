use crate::error::WireError;

/// Forward-only reader over an in-memory OBML source.
///
/// The cursor tracks an absolute byte offset into the source. All OBML
/// section boundaries (link section end, content length, image-record
/// addresses) are expressed as absolute offsets, so `tell()` is the value
/// every decode stage compares against.
///
/// ```text
///   0                pos                          len
///   ├────────────────┼────────────────────────────┤
///   │   consumed     │        remaining           │
///   └────────────────┴────────────────────────────┘
/// ```
///
/// Reads never partially consume: if a request for `n` bytes cannot be
/// satisfied, the position is left untouched and
/// [`WireError::UnexpectedEof`] is returned.
#[derive(Clone, Copy, Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `buf`.
    #[must_use]
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current absolute offset.
    #[must_use]
    pub fn tell(&self) -> usize {
        self.pos
    }

    /// Total length of the underlying source.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Move to an absolute offset. `target == len()` is allowed (EOF).
    ///
    /// # Errors
    ///
    /// [`WireError::SeekOutOfBounds`] if `target` is past the end.
    pub fn seek(&mut self, target: usize) -> Result<(), WireError> {
        if target > self.buf.len() {
            return Err(WireError::SeekOutOfBounds {
                target,
                len: self.buf.len(),
            });
        }
        self.pos = target;
        Ok(())
    }

    /// A copy of this cursor that cannot read at or past `end`.
    ///
    /// Offsets stay absolute. The caller re-synchronises the parent with
    /// [`seek`](Self::seek) once the bounded region has been consumed.
    /// An `end` beyond the source is clamped to the source length.
    #[must_use]
    pub fn bounded(&self, end: usize) -> ByteCursor<'a> {
        let end = end.min(self.buf.len());
        Self {
            buf: &self.buf[..end],
            pos: self.pos.min(end),
        }
    }

    /// Read exactly `n` bytes as a slice borrowed from the source.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if n > self.remaining() {
            return Err(WireError::UnexpectedEof {
                offset: self.pos,
                needed: n,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn read_array<const N: usize>(&mut self) -> Result<[u8; N], WireError> {
        let bytes = self.read_bytes(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Look at the next byte without consuming it.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn peek_u8(&self) -> Result<u8, WireError> {
        self.buf
            .get(self.pos)
            .copied()
            .ok_or(WireError::UnexpectedEof {
                offset: self.pos,
                needed: 1,
            })
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn read_u8(&mut self) -> Result<u8, WireError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] at end of input.
    pub fn read_i8(&mut self) -> Result<i8, WireError> {
        Ok(i8::from_be_bytes(self.read_array::<1>()?))
    }

    /// Big-endian "short".
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_u16(&mut self) -> Result<u16, WireError> {
        Ok(u16::from_be_bytes(self.read_array::<2>()?))
    }

    /// Big-endian "short", two's complement.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 2 bytes remain.
    pub fn read_i16(&mut self) -> Result<i16, WireError> {
        Ok(i16::from_be_bytes(self.read_array::<2>()?))
    }

    /// Big-endian "medium": 3 bytes, zero-extended to 32 bits.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than 3 bytes remain.
    pub fn read_u24(&mut self) -> Result<u32, WireError> {
        let [hi, mid, lo] = self.read_array::<3>()?;
        Ok(u32::from_be_bytes([0, hi, mid, lo]))
    }

    /// Advance `n` bytes without materialising them.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if fewer than `n` bytes remain.
    pub fn skip(&mut self, n: usize) -> Result<(), WireError> {
        self.read_bytes(n).map(|_| ())
    }

    /// Skip a region prefixed by a `u16` length.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the prefix or the region is truncated.
    pub fn skip_blob(&mut self) -> Result<(), WireError> {
        let len = self.read_u16()?;
        self.skip(usize::from(len))
    }

    /// Skip a region prefixed by a `u24` length.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the prefix or the region is truncated.
    pub fn skip_blob_alt(&mut self) -> Result<(), WireError> {
        let len = self.read_u24()?;
        self.skip(len as usize)
    }

    /// Read a `u16`-length-prefixed region as a borrowed slice.
    ///
    /// # Errors
    ///
    /// [`WireError::UnexpectedEof`] if the prefix or the region is truncated.
    pub fn read_blob(&mut self) -> Result<&'a [u8], WireError> {
        let len = self.read_u16()?;
        self.read_bytes(usize::from(len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_widths() {
        let buf = [0x12, 0x34, 0xAB, 0xCD, 0xEF, 0xFF];
        let mut cur = ByteCursor::new(&buf);
        assert_eq!(cur.read_u16().unwrap(), 0x1234);
        assert_eq!(cur.read_u24().unwrap(), 0x00AB_CDEF);
        assert_eq!(cur.read_i8().unwrap(), -1);
        assert!(cur.is_eof());
    }

    #[test]
    fn medium_is_zero_extended() {
        let mut cur = ByteCursor::new(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(cur.read_u24().unwrap(), 0x00FF_FFFF);
    }

    #[test]
    fn signed_short() {
        let mut cur = ByteCursor::new(&[0xFF, 0xFE]);
        assert_eq!(cur.read_i16().unwrap(), -2);
    }

    #[test]
    fn short_read_does_not_consume() {
        let mut cur = ByteCursor::new(&[0x01, 0x02]);
        cur.read_u8().unwrap();
        let err = cur.read_u24().unwrap_err();
        assert_eq!(err, WireError::UnexpectedEof { offset: 1, needed: 3 });
        assert_eq!(cur.tell(), 1);
        assert_eq!(cur.read_u8().unwrap(), 0x02);
    }

    #[test]
    fn skip_blob_variants() {
        // u16 blob of 2 bytes, then u24 blob of 1 byte, then a marker.
        let buf = [0x00, 0x02, 0xAA, 0xBB, 0x00, 0x00, 0x01, 0xCC, 0x7F];
        let mut cur = ByteCursor::new(&buf);
        cur.skip_blob().unwrap();
        assert_eq!(cur.tell(), 4);
        cur.skip_blob_alt().unwrap();
        assert_eq!(cur.tell(), 8);
        assert_eq!(cur.read_u8().unwrap(), 0x7F);
    }

    #[test]
    fn truncated_blob_errors() {
        let mut cur = ByteCursor::new(&[0x00, 0x05, 0x01]);
        assert!(matches!(
            cur.skip_blob(),
            Err(WireError::UnexpectedEof { offset: 2, needed: 5 })
        ));
    }

    #[test]
    fn peek_does_not_advance() {
        let cur = ByteCursor::new(&[0x42]);
        assert_eq!(cur.peek_u8().unwrap(), 0x42);
        assert_eq!(cur.tell(), 0);
    }

    #[test]
    fn seek_is_bounded() {
        let mut cur = ByteCursor::new(&[0; 4]);
        cur.seek(4).unwrap();
        assert!(cur.is_eof());
        assert_eq!(
            cur.seek(5),
            Err(WireError::SeekOutOfBounds { target: 5, len: 4 })
        );
    }

    #[test]
    fn bounded_cursor_stops_at_limit() {
        let buf = [1, 2, 3, 4, 5];
        let mut cur = ByteCursor::new(&buf);
        cur.skip(1).unwrap();

        let mut sub = cur.bounded(3);
        assert_eq!(sub.tell(), 1);
        assert_eq!(sub.read_u16().unwrap(), 0x0203);
        assert!(sub.read_u8().is_err());

        cur.seek(sub.tell()).unwrap();
        assert_eq!(cur.read_u8().unwrap(), 4);
    }

    #[test]
    fn bounded_past_source_is_clamped() {
        let cur = ByteCursor::new(&[0; 2]);
        assert_eq!(cur.bounded(100).len(), 2);
    }
}
