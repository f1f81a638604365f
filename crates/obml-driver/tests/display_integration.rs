//! Integration test: build → decode → display list / hit test
//!
//! Pages come from `obml-tests`, go through the real decoder, and the
//! driver's output is checked the way a viewer would consume it: replayed
//! onto a canvas and queried with taps.

use obml_decoder::ObmlDecoder;
use obml_driver::{Canvas, DisplayList, DriverConfig, DriverError, link_at};
use obml_tests::fixture::PageBuilder;
use obml_tests::samples::{self, BLACK, GREY};
use obml_types::{Color, EmbeddedImage, FontStyle, FontTable, Rect, TileKind};

/// Records each call as a short string.
#[derive(Default)]
struct Recorder(Vec<String>);

impl Canvas<EmbeddedImage> for Recorder {
    fn fill(&mut self, bounds: Rect, color: Color) {
        self.0.push(format!("fill {} {color}", bounds.y));
    }

    fn image(&mut self, bounds: Rect, image: &EmbeddedImage) {
        self.0.push(format!("image {} {}", bounds.y, image.extension()));
    }

    fn text(&mut self, bounds: Rect, _color: Color, style: FontStyle, text: &str) {
        self.0.push(format!("text {} {} {text}", bounds.y, style.size));
    }

    fn form(&mut self, bounds: Rect, _color: Color, control_type: i16, id: &str, _value: &str) {
        self.0.push(format!("form {} {control_type} {id}", bounds.y));
    }
}

fn replay(list: &DisplayList<'_, EmbeddedImage>) -> Vec<String> {
    let mut canvas = Recorder::default();
    list.replay(&mut canvas);
    canvas.0
}

// ── Display list ──────────────────────────────────────────────────────────────

#[test]
fn front_page_paints_every_tile_in_order() {
    let doc = ObmlDecoder::decode(&samples::front_page().build()).unwrap();
    let list = DisplayList::build(&doc, &DriverConfig::default()).unwrap();

    assert_eq!((list.surface.width, list.surface.height), (240, 400));
    assert!(!list.surface.clamped);
    assert_eq!(list.fallbacks, 0);
    assert_eq!(
        replay(&list),
        [
            "fill 0 #ffffffff",
            "text 6 20 Headlines",
            "image 70 jpeg",
            "form 200 1 q",
        ]
    );
}

#[test]
fn missing_images_fall_back_to_tile_colour() {
    let doc = ObmlDecoder::decode(&samples::missing_images().build()).unwrap();
    let list = DisplayList::build(&doc, &DriverConfig::default()).unwrap();

    assert_eq!(list.fallbacks, 2);
    assert_eq!(
        replay(&list),
        ["fill 0 #ffffffff", "fill 10 #c0c0c0ff", "fill 70 #c0c0c0ff"]
    );
    assert_eq!(GREY.to_string(), "#c0c0c0ff");
}

#[test]
fn tall_pages_are_clamped_and_culled() {
    let doc = ObmlDecoder::decode(&samples::tall_page(200).build()).unwrap();
    let list = DisplayList::build(&doc, &DriverConfig::default()).unwrap();

    assert!(list.surface.clamped);
    assert_eq!(list.surface.height, 16384);
    // Rows start at y = 100·n + 4; rows 164 and up begin below 16384.
    assert_eq!(list.culled, 36);
    assert_eq!(list.ops.len(), 1 + 164);
}

#[test]
fn font_table_and_filter_apply() {
    let doc = ObmlDecoder::decode(&samples::front_page().build()).unwrap();
    let mut font_table = FontTable::default().scaled(0.5);
    font_table.set(5, FontStyle::regular(33));
    let config = DriverConfig {
        font_table,
        include: Some(vec![TileKind::Text, TileKind::Form]),
        ..DriverConfig::default()
    };
    let list = DisplayList::build(&doc, &config).unwrap();

    assert_eq!(replay(&list), ["text 6 33 Headlines", "form 200 1 q"]);
}

#[test]
fn zero_width_page_has_no_surface() {
    let doc = ObmlDecoder::decode(&PageBuilder::new().page_size(0, 320).build()).unwrap();
    let err = DisplayList::build(&doc, &DriverConfig::default()).unwrap_err();

    assert!(matches!(
        err,
        DriverError::InvalidSurface {
            width: 0,
            height: 320
        }
    ));
}

// ── Hit testing ───────────────────────────────────────────────────────────────

#[test]
fn taps_resolve_to_links() {
    let doc = ObmlDecoder::decode(&samples::front_page().build()).unwrap();

    let hit = link_at(&doc, 10.0, 45.0).unwrap();
    assert_eq!(hit.link.target.href, "/news");
    assert_eq!(hit.region, 0);

    // Inside the image link's region, which has no target.
    assert!(link_at(&doc, 10.0, 100.0).is_none());
    // Right and bottom edges are outside.
    assert!(link_at(&doc, 240.0, 45.0).is_none());
    assert!(link_at(&doc, 10.0, 58.0).is_none());
}

#[test]
fn first_link_in_file_order_wins() {
    let bytes = PageBuilder::new()
        .image_link(&[(0, 0, 100, 100)])
        .link(b'L', "http", "/first", &[(50, 50, 10, 10), (0, 0, 100, 100)])
        .link(b'L', "http", "/second", &[(0, 0, 100, 100)])
        .text((0, 0, 100, 100), BLACK, 2, "under the links")
        .build();
    let doc = ObmlDecoder::decode(&bytes).unwrap();

    let hit = link_at(&doc, 55.0, 55.0).unwrap();
    assert_eq!((hit.link.target.href.as_str(), hit.region), ("/first", 0));

    let hit = link_at(&doc, 5.0, 5.0).unwrap();
    assert_eq!((hit.link.target.href.as_str(), hit.region), ("/first", 1));
}
