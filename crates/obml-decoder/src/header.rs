use log::debug;
use obml_types::{Header, SUPPORTED_VERSION};
use obml_wire::ByteCursor;

use crate::error::DecodeError;

/// `S\0\0\xFF\xFF`, between the page size and the title.
const SENTINEL_LEN: usize = 5;

/// The content-length medium does not count its own 3 bytes.
const LENGTH_FIELD_LEN: u32 = 3;

/// Decode the fixed-shape header into `header`.
///
/// `content_length` and `version` are written before the version check,
/// so a rejected document still reports what it claimed to be.
pub(crate) fn read_header(cur: &mut ByteCursor<'_>, header: &mut Header) -> Result<(), DecodeError> {
    header.content_length = cur.read_u24()? + LENGTH_FIELD_LEN;
    header.version = cur.read_u8()?;

    if header.version != SUPPORTED_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            version: header.version,
        });
    }

    let size = cur.read_coord()?;
    #[allow(clippy::cast_possible_truncation)]
    let page_size = (size.x as i32, size.y as i32);
    header.page_size = page_size;

    cur.skip(SENTINEL_LEN)?;
    header.title = cur.read_string()?;
    cur.skip_blob()?;
    header.base_url = cur.read_string()?;
    header.page_url = cur.read_string()?;

    // Always 19 or 23 in the wild; meaning unknown.
    cur.skip(1)?;

    debug!(
        "header: v{} {}x{} content_length={} title={:?}",
        header.version, header.page_size.0, header.page_size.1, header.content_length, header.title
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use obml_tests::fixture::PageBuilder;

    #[test]
    fn reads_all_fields() {
        let bytes = PageBuilder::new()
            .page_size(240, 1800)
            .title("Front page")
            .base_url("http://example.com/")
            .page_url("http://example.com/news")
            .build();

        let mut cur = ByteCursor::new(&bytes);
        let mut header = Header::default();
        read_header(&mut cur, &mut header).unwrap();

        assert_eq!(header.version, 6);
        assert_eq!(header.content_length as usize, bytes.len());
        assert_eq!(header.page_size, (240, 1800));
        assert_eq!(header.title, "Front page");
        assert_eq!(header.base_url, "http://example.com/");
        assert_eq!(header.page_url, "http://example.com/news");
        // Positioned on the first metadata tag.
        assert_eq!(cur.read_u8().unwrap(), b'S');
    }

    #[test]
    fn rejects_other_versions_before_reading_further() {
        let bytes = PageBuilder::new().version(5).build();
        let mut cur = ByteCursor::new(&bytes);
        let mut header = Header::default();

        let err = read_header(&mut cur, &mut header).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedVersion { version: 5 }));
        assert_eq!(header.version, 5);
        assert_eq!(cur.tell(), 4);
        assert!(header.title.is_empty());
    }

    #[test]
    fn truncated_header_is_an_io_error() {
        let bytes = PageBuilder::new().title("cut short").build();
        let mut cur = ByteCursor::new(&bytes[..12]);
        let mut header = Header::default();
        assert!(matches!(
            read_header(&mut cur, &mut header),
            Err(DecodeError::Wire(_))
        ));
    }
}
