//! End-to-end decode behaviour on whole documents built with
//! [`PageBuilder`]: field values, record order, and which error each kind
//! of damage produces.

use obml_decoder::{DecodeError, DecoderConfig, ObmlDecoder, Section, Stage};
use obml_tests::fixture::{PageBuilder, dump};
use obml_tests::samples::{self, BLACK, GREY, JPEG};
use obml_types::{Color, ErrorKind, Rect, Status, TileContent, TileKind};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ── Valid documents ───────────────────────────────────────────────────────────

#[test]
fn front_page_fields() {
    init_logging();
    let bytes = samples::front_page().build();
    let doc = ObmlDecoder::decode(&bytes).unwrap_or_else(|e| panic!("{e}\n{}", dump(&bytes)));

    assert_eq!(doc.status, Status::Ok);
    assert_eq!(doc.header.version, 6);
    assert_eq!(doc.header.page_size, (240, 400));
    assert_eq!(doc.header.title, "Front page");
    assert_eq!(doc.header.base_url, "http://example.com/");
    assert_eq!(doc.header.content_length as usize, bytes.len());

    let kinds: Vec<_> = doc.tiles.iter().map(|t| t.kind()).collect();
    assert_eq!(
        kinds,
        [TileKind::Block, TileKind::Text, TileKind::Image, TileKind::Form]
    );
    assert_eq!(doc.tiles[1].color, BLACK);
    assert_eq!(doc.tiles[2].color, GREY);
    assert_eq!(
        doc.tiles[1].content,
        TileContent::Text {
            font_index: 5,
            text: "Headlines".into()
        }
    );

    assert_eq!(doc.links.len(), 2);
    assert_eq!(doc.links[0].target.kind, "http");
    assert_eq!(doc.links[0].target.href, "/news");
    assert_eq!(doc.links[0].regions, [Rect::new(0.0, 40.0, 240.0, 18.0)]);
    assert!(!doc.links[1].is_interactive());

    assert_eq!(doc.image_for(&doc.tiles[2]).map(|i| i.bytes.as_slice()), Some(JPEG));
    assert_eq!(doc.unresolved_images().count(), 0);
}

#[test]
fn tiles_keep_file_order_across_image_sections() {
    let (bytes, addresses) = PageBuilder::new()
        .images(&[JPEG])
        .block((0, 0, 10, 10), Color::WHITE)
        .image_tile((0, 10, 10, 10), GREY, 0)
        .images(&[b"\x89PNG....", b"GIF89a"])
        .image_tile((0, 20, 10, 10), GREY, 2)
        .build_with_addresses();
    let doc = ObmlDecoder::decode(&bytes).unwrap();

    assert_eq!(doc.images.keys().copied().collect::<Vec<_>>(), addresses);
    assert_eq!(doc.tiles.len(), 3);
    assert_eq!(doc.tiles[1].image_address(), Some(addresses[0]));
    assert_eq!(doc.tiles[2].image_address(), Some(addresses[2]));
    assert_eq!(doc.image(addresses[2]).map(|i| i.extension()), Some("gif"));
}

#[test]
fn many_links_and_tiles() {
    let doc = ObmlDecoder::decode(&samples::tall_page(300).build()).unwrap();

    assert_eq!(doc.links.len(), 300);
    assert_eq!(doc.tiles.len(), 301);
    assert_eq!(doc.header.page_size, (240, 30_000));
    let last = doc.tiles.last().unwrap();
    assert_eq!(last.bounds.y, 29_904.0);
}

#[test]
fn metadata_records_are_skipped() {
    let bytes = PageBuilder::new()
        .meta_blob(b"opaque")
        .meta_tls(&[7; 300])
        .meta_fixed([1, 2, 3, 4, 5, 6, 7])
        .link(b'W', "http", "/x", &[(0, 0, 1, 1)])
        .build();
    let doc = ObmlDecoder::decode(&bytes).unwrap();

    assert_eq!(doc.links.len(), 1);
}

#[test]
fn same_bytes_same_document() {
    let bytes = samples::front_page().build();
    assert_eq!(
        ObmlDecoder::decode(&bytes).unwrap(),
        ObmlDecoder::decode(&bytes).unwrap()
    );
}

// ── Damaged documents ─────────────────────────────────────────────────────────

#[test]
fn unsupported_version_stops_after_the_header() {
    let bytes = samples::front_page().version(5).build();
    let partial = ObmlDecoder::decode(&bytes).unwrap_err();

    assert!(matches!(
        partial.error,
        DecodeError::UnsupportedVersion { version: 5 }
    ));
    assert_eq!(partial.stage, Stage::Header);
    assert_eq!(partial.document.status, Status::Failed(ErrorKind::UnsupportedVersion));
    assert!(partial.document.links.is_empty());
    assert!(partial.document.tiles.is_empty());
}

#[test]
fn short_link_section_is_a_length_error() {
    let bytes = samples::front_page().link_len_delta(-1).build();
    let partial = ObmlDecoder::decode(&bytes).unwrap_err();

    assert!(matches!(
        partial.error,
        DecodeError::UnexpectedSectionLength {
            section: Section::Links,
            expected: 143,
            actual: 144
        }
    ), "{:?}", partial.error);
    assert_eq!(partial.stage, Stage::Links);
}

#[test]
fn bad_link_tag() {
    let bytes = PageBuilder::new()
        .link(b'L', "http", "/a", &[(0, 0, 5, 5)])
        .raw_links(b"?")
        .build();
    let partial = ObmlDecoder::decode(&bytes).unwrap_err();

    // 27-byte empty page, 22-byte link record before the bad tag.
    assert!(matches!(
        partial.error,
        DecodeError::BadLinkTag { tag: b'?', offset: 49 }
    ), "{:?}", partial.error);
    assert_eq!(partial.document.links.len(), 1);
}

#[test]
fn bad_content_tag_keeps_earlier_tiles() {
    let bytes = PageBuilder::new()
        .block((0, 0, 240, 320), Color::WHITE)
        .text((0, 0, 10, 10), BLACK, 2, "kept")
        .raw_content(b"#")
        .block((0, 0, 1, 1), Color::WHITE)
        .build();
    let partial = ObmlDecoder::decode(&bytes).unwrap_err();

    // 27 + 15-byte block + 22-byte text
    assert!(matches!(
        partial.error,
        DecodeError::BadContentTag { tag: b'#', offset: 64 }
    ), "{:?}", partial.error);
    assert_eq!(partial.stage, Stage::Content);
    assert_eq!(partial.document.tiles.len(), 2);
    assert_eq!(
        partial.document.status,
        Status::Failed(ErrorKind::BadContentTag)
    );
}

#[test]
fn unknown_metadata_tag_fails_fast() {
    let bytes = PageBuilder::new().raw_metadata(b"X").build();
    let partial = ObmlDecoder::decode(&bytes).unwrap_err();

    assert!(matches!(
        partial.error,
        DecodeError::UnknownMetadataTag { tag: b'X', offset: 23 }
    ), "{:?}", partial.error);
    assert_eq!(partial.stage, Stage::Metadata);
    assert_eq!(partial.document.status, Status::Failed(ErrorKind::Unknown));
}

#[test]
fn metadata_scan_is_bounded() {
    let bytes = PageBuilder::new()
        .meta_fixed([0; 7])
        .meta_fixed([0; 7])
        .meta_fixed([0; 7])
        .build();
    let decoder = ObmlDecoder::new(DecoderConfig {
        max_metadata_records: 3,
        ..DecoderConfig::default()
    });

    let partial = decoder.parse(&bytes).unwrap_err();
    assert!(matches!(partial.error, DecodeError::MetadataLimit { limit: 3 }));

    // One more record of headroom reaches the link section.
    let decoder = ObmlDecoder::new(DecoderConfig {
        max_metadata_records: 4,
        ..DecoderConfig::default()
    });
    assert!(decoder.parse(&bytes).is_ok());
}

#[test]
fn content_past_end_of_source_is_an_io_error() {
    let partial = ObmlDecoder::decode(&samples::truncated()).unwrap_err();

    assert!(matches!(partial.error, DecodeError::Wire(_)));
    assert_eq!(partial.document.status, Status::Failed(ErrorKind::Io));
    assert_eq!(partial.document.tiles.len(), 3);
}

#[test]
fn content_length_inside_a_record_is_a_length_error() {
    // The last image tile spans 63..84; cut the declared content at 80.
    let bytes = samples::missing_images().content_length(80).build();
    let partial = ObmlDecoder::decode(&bytes).unwrap_err();

    assert!(matches!(
        partial.error,
        DecodeError::UnexpectedSectionLength {
            section: Section::Content,
            expected: 80,
            ..
        }
    ), "{:?}", partial.error);
    assert_eq!(partial.document.tiles.len(), 2);
}
