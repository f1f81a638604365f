#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use obml_decoder::ObmlDecoder;
use obml_driver::{DisplayList, DriverConfig};
use obml_tests::fixture::{Area, PageBuilder};
use obml_types::{Color, TileKind};

#[derive(Arbitrary, Debug)]
enum Record {
    Block(Area, [u8; 4]),
    Text(Area, i8, String),
    Form(Area, i16, String, String),
    ImageTile(Area, u8),
    Link(Vec<Area>, String, String),
    Skipped,
}

#[derive(Arbitrary, Debug)]
struct Page {
    width: i16,
    height: u16,
    title: String,
    records: Vec<Record>,
    images: Vec<Vec<u8>>,
}

// Fuzz target: well-formed pages from the builder.
//
// Every page the builder produces is valid, so decoding must succeed
// and give back exactly the tiles and links that went in.
fuzz_target!(|page: Page| {
    let mut b = PageBuilder::new();
    b.page_size(page.width, u32::from(page.height));
    if page.title.len() < 1024 {
        b.title(&page.title);
    }

    let images: Vec<&[u8]> = page
        .images
        .iter()
        .filter(|i| !i.is_empty() && i.len() < 1024)
        .map(Vec::as_slice)
        .collect();

    let mut tiles = Vec::new();
    let mut links = 0;
    for record in &page.records {
        let area = clamp(record_area(record));
        match record {
            Record::Block(_, [r, g, bl, a]) => {
                b.block(area, Color::rgba(*r, *g, *bl, *a));
                tiles.push(TileKind::Block);
            }
            Record::Text(_, font, text) if text.len() < 1024 => {
                b.text(area, Color::WHITE, *font, text);
                tiles.push(TileKind::Text);
            }
            Record::Form(_, kind, id, value) if id.len() < 1024 && value.len() < 1024 => {
                b.form(area, Color::WHITE, *kind, id, value);
                tiles.push(TileKind::Form);
            }
            Record::ImageTile(_, n) if !images.is_empty() => {
                b.image_tile(area, Color::WHITE, usize::from(*n) % images.len());
                tiles.push(TileKind::Image);
            }
            Record::Link(regions, kind, href)
                if !regions.is_empty()
                    && regions.len() < 256
                    && kind.len() < 1024
                    && href.len() < 1024
                    && !href.starts_with('\0') =>
            {
                let regions: Vec<Area> = regions.iter().copied().map(clamp).collect();
                b.link(b'L', kind, href, &regions);
                links += 1;
            }
            Record::Skipped => {
                b.skipped_records();
            }
            _ => {}
        }
    }
    if !images.is_empty() {
        b.images(&images);
    }

    let bytes = b.build();
    if bytes.len() >= 1 << 24 {
        return;
    }
    let doc = ObmlDecoder::decode(&bytes).expect("builder output decodes");

    let kinds: Vec<_> = doc.tiles.iter().map(|t| t.kind()).collect();
    assert_eq!(kinds, tiles);
    assert_eq!(doc.links.len(), links);
    assert_eq!(doc.images.len(), images.len());
    assert_eq!(doc.unresolved_images().count(), 0);

    if let Ok(list) = DisplayList::build(&doc, &DriverConfig::default()) {
        assert_eq!(list.fallbacks, 0);
        assert_eq!(list.ops.len() + list.culled, doc.tiles.len());
    }
});

fn record_area(record: &Record) -> Area {
    match record {
        Record::Block(area, _)
        | Record::Text(area, ..)
        | Record::Form(area, ..)
        | Record::ImageTile(area, _) => *area,
        Record::Link(..) | Record::Skipped => (0, 0, 0, 0),
    }
}

/// Mediums are 24 bits wide.
fn clamp((x, y, w, h): Area) -> Area {
    (x, y & 0xFF_FFFF, w, h & 0xFF_FFFF)
}
