//! Named sample pages shared by the conformance suite, the benches and
//! the `generate_samples` binary.
//!
//! | Name            | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | empty           | Header and an empty link section, nothing else        |
//! | front_page      | One of each tile kind, links, an embedded JPEG        |
//! | missing_images  | Image tiles whose records were never sent             |
//! | tall_page       | A page taller than the default surface limit          |
//! | bad_version     | `front_page` with version 5                           |
//! | truncated       | `front_page` cut off inside its form record           |

use obml_types::Color;

use crate::fixture::PageBuilder;

/// Leading bytes of a JPEG, enough for format sniffing.
pub const JPEG: &[u8] = b"\xFF\xD8\xFF\xE0fake";

pub const GREY: Color = Color::rgba(0xC0, 0xC0, 0xC0, 0xFF);
pub const BLACK: Color = Color::rgba(0, 0, 0, 0xFF);

/// Every sample, by file stem.
#[must_use]
pub fn all() -> Vec<(&'static str, Vec<u8>)> {
    vec![
        ("empty", PageBuilder::new().build()),
        ("front_page", front_page().build()),
        ("missing_images", missing_images().build()),
        ("tall_page", tall_page(200).build()),
        ("bad_version", front_page().version(5).build()),
        ("truncated", truncated()),
    ]
}

/// A small but complete page: header with a title and base URL, one
/// metadata record, four kinds of link record, one tile of each kind and
/// an image section holding the picture for the image tile.
///
/// Byte layout: links start at 65, content at 144, the image record's
/// address is `0xe9` and the document is 246 bytes long.
#[must_use]
pub fn front_page() -> PageBuilder {
    let mut page = PageBuilder::new();
    page.page_size(240, 400)
        .title("Front page")
        .base_url("http://example.com/")
        .meta_fixed([0; 7])
        .link(b'L', "http", "/news", &[(0, 40, 240, 18)])
        .image_link(&[(4, 70, 232, 120)])
        .filler_link()
        .dropdown(&[("Any", "")])
        .block((0, 0, 240, 400), Color::WHITE)
        .text((4, 6, 232, 20), BLACK, 5, "Headlines")
        .image_tile((4, 70, 232, 120), GREY, 0)
        .form((4, 200, 120, 24), Color::WHITE, 1, "q", "")
        .images(&[JPEG]);
    page
}

/// Two image tiles pointing at addresses with no image record.
#[must_use]
pub fn missing_images() -> PageBuilder {
    let mut page = PageBuilder::new();
    page.block((0, 0, 240, 320), Color::WHITE)
        .image_tile_at((0, 10, 100, 50), GREY, 0x40)
        .image_tile_at((0, 70, 100, 50), GREY, 0x80);
    page
}

/// A 240-wide page made of `rows` blocks of text, 100 pixels apart. With
/// 200 rows it is 20 000 pixels tall.
#[must_use]
pub fn tall_page(rows: u32) -> PageBuilder {
    let mut page = PageBuilder::new();
    page.page_size(240, rows * 100)
        .title("Tall")
        .block((0, 0, 240, rows * 100), Color::WHITE);
    for row in 0..rows {
        page.text((4, row * 100 + 4, 232, 16), BLACK, 2, "A line of body text.")
            .link(b'L', "http", "/next", &[(4, row * 100 + 4, 232, 16)]);
    }
    page
}

/// [`front_page`] with its last 20 bytes removed, cutting through the form
/// record while the header still claims the full length.
#[must_use]
pub fn truncated() -> Vec<u8> {
    let mut bytes = front_page().build();
    bytes.truncate(bytes.len() - 20);
    bytes
}
