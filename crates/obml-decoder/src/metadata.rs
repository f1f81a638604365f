use log::{debug, trace};
use obml_wire::ByteCursor;

use crate::error::DecodeError;

/// Absolute byte range of the link section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LinkSection {
    pub begin: usize,
    pub end: usize,
}

/// Skip metadata records until the link-section tag and return the
/// section's range.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────┐
/// │ Tag      │ Record                                       │
/// ├──────────┼──────────────────────────────────────────────┤
/// │ 'M' 'C'  │ u24-prefixed blob (unknown)                  │
/// │ 'M' 'u'  │ 7 bytes (unknown)                            │
/// │ 'M' 'S'  │ u24-prefixed blob (TLS information)          │
/// │ 'S'      │ u24 link-section length, ends the scan       │
/// └──────────┴──────────────────────────────────────────────┘
/// ```
///
/// Records have no common length prefix, so anything else means the
/// scanner is out of step with the file.
pub(crate) fn scan(cur: &mut ByteCursor<'_>, max_records: usize) -> Result<LinkSection, DecodeError> {
    for _ in 0..max_records {
        let offset = cur.tell();
        match cur.read_u8()? {
            b'M' => {
                let sub_offset = cur.tell();
                match cur.read_u8()? {
                    b'C' => {
                        trace!("metadata: unknown blob at {offset}");
                        cur.skip_blob_alt()?;
                    }
                    b'u' => {
                        trace!("metadata: 7-byte record at {offset}");
                        cur.skip(7)?;
                    }
                    b'S' => {
                        trace!("metadata: TLS info at {offset}");
                        cur.skip_blob_alt()?;
                    }
                    tag => {
                        return Err(DecodeError::UnknownMetadataTag {
                            tag,
                            offset: sub_offset,
                        });
                    }
                }
            }
            b'S' => {
                let len = cur.read_u24()? as usize;
                let begin = cur.tell();
                debug!("link section: {len} bytes at {begin}");
                return Ok(LinkSection {
                    begin,
                    end: begin + len,
                });
            }
            tag => return Err(DecodeError::UnknownMetadataTag { tag, offset }),
        }
    }

    Err(DecodeError::MetadataLimit { limit: max_records })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan_bytes(bytes: &[u8], limit: usize) -> Result<(LinkSection, usize), DecodeError> {
        let mut cur = ByteCursor::new(bytes);
        let section = scan(&mut cur, limit)?;
        Ok((section, cur.tell()))
    }

    #[test]
    fn link_tag_alone() {
        let (section, pos) = scan_bytes(&[b'S', 0x00, 0x00, 0x10], 8).unwrap();
        assert_eq!(section, LinkSection { begin: 4, end: 20 });
        assert_eq!(pos, 4);
    }

    #[test]
    fn skips_all_three_record_shapes() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&[b'M', b'C', 0x00, 0x00, 0x02, 0xAA, 0xBB]);
        bytes.extend_from_slice(&[b'M', b'u', 1, 2, 3, 4, 5, 6, 7]);
        bytes.extend_from_slice(&[b'M', b'S', 0x00, 0x00, 0x01, 0xCC]);
        bytes.extend_from_slice(&[b'S', 0x00, 0x00, 0x00]);

        let (section, _) = scan_bytes(&bytes, 8).unwrap();
        assert_eq!(section.begin, bytes.len());
        assert_eq!(section.end, bytes.len());
    }

    #[test]
    fn unknown_tag_fails_instead_of_looping() {
        let err = scan_bytes(&[b'X', 0, 0, 0], 8).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnknownMetadataTag { tag: b'X', offset: 0 }
        ));
    }

    #[test]
    fn unknown_sub_tag_fails() {
        let err = scan_bytes(&[b'M', b'q', 0, 0, 0], 8).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::UnknownMetadataTag { tag: b'q', offset: 1 }
        ));
    }

    #[test]
    fn record_limit_is_enforced() {
        let mut bytes = Vec::new();
        for _ in 0..3 {
            bytes.extend_from_slice(&[b'M', b'u', 0, 0, 0, 0, 0, 0, 0]);
        }
        bytes.extend_from_slice(&[b'S', 0, 0, 0]);

        assert!(scan_bytes(&bytes, 4).is_ok());
        assert!(matches!(
            scan_bytes(&bytes, 3),
            Err(DecodeError::MetadataLimit { limit: 3 })
        ));
    }
}
