use std::fmt::Write;

use obml_types::{Document, EmbeddedImage, FontStyle, Link, Rect, Status, Tile, TileContent};

use crate::config::DriverConfig;

/// One-line description of a decoded image for the outline.
pub trait DescribeImage {
    fn describe(&self) -> String;
}

impl DescribeImage for EmbeddedImage {
    fn describe(&self) -> String {
        format!("{} bytes {}", self.len(), self.extension())
    }
}

/// Plain-text dump of a document.
///
/// Deterministic for a given document and configuration, which makes it
/// suitable for snapshot tests. Example output:
///
/// ```text
/// source   <memory>
/// status   ok
/// version  6
/// size     240x320
/// title    "Front page"
/// base     "http://example.com/"
/// page     ""
/// content  146 bytes
/// links: 1
///   0  http "/news" [0,0 100x20]
/// images: 1
///   0x67  4 bytes jpeg
/// tiles: 2
///   0  block 0,0 240x320 #ffffffff
///   1  image 10,10 50x50 #000000ff @0x67
/// ```
///
/// Tile indices are positions in the document, so they stay stable when
/// `config.include` hides some kinds.
#[must_use]
pub fn render_outline<I: DescribeImage>(doc: &Document<I>, config: &DriverConfig) -> String {
    let mut out = String::new();
    let h = &doc.header;

    let status = match doc.status {
        Status::Ok => "ok".to_string(),
        Status::Failed(kind) => format!("failed: {kind}"),
    };

    // Writing to a String cannot fail.
    let _ = writeln!(out, "source   {}", doc.source);
    let _ = writeln!(out, "status   {status}");
    let _ = writeln!(out, "version  {}", h.version);
    let _ = writeln!(out, "size     {}x{}", h.page_size.0, h.page_size.1);
    let _ = writeln!(out, "title    {:?}", h.title);
    let _ = writeln!(out, "base     {:?}", h.base_url);
    let _ = writeln!(out, "page     {:?}", h.page_url);
    let _ = writeln!(out, "content  {} bytes", h.content_length);

    let _ = writeln!(out, "links: {}", doc.links.len());
    for (i, link) in doc.links.iter().enumerate() {
        let _ = writeln!(out, "  {i}  {}", link_line(link));
    }

    let _ = writeln!(out, "images: {}", doc.images.len());
    for (address, image) in &doc.images {
        let _ = writeln!(out, "  {address:#x}  {}", image.describe());
    }

    let shown: Vec<_> = doc
        .tiles
        .iter()
        .enumerate()
        .filter(|(_, t)| config.includes(t.kind()))
        .collect();
    let _ = writeln!(out, "tiles: {}", shown.len());
    for (i, tile) in shown {
        let _ = writeln!(out, "  {i}  {}", tile_line(doc, tile, config));
    }

    out
}

fn link_line(link: &Link) -> String {
    let kind = if link.target.kind.is_empty() {
        "-"
    } else {
        link.target.kind.as_str()
    };
    let regions: Vec<_> = link.regions.iter().map(|r| format!("[{}]", rect(r))).collect();
    format!("{kind} {:?} {}", link.target.href, regions.join(" "))
}

fn tile_line<I>(doc: &Document<I>, tile: &Tile, config: &DriverConfig) -> String {
    let head = format!(
        "{:<5} {} {}",
        tile.kind().name(),
        rect(&tile.bounds),
        tile.color
    );
    match &tile.content {
        TileContent::Block => head,
        TileContent::Image { address } => {
            let missing = if doc.image(*address).is_some() {
                ""
            } else {
                " (missing)"
            };
            format!("{head} @{address:#x}{missing}")
        }
        TileContent::Text { font_index, text } => {
            let style = font(config.font_table.resolve(*font_index));
            format!("{head} font {font_index} ({style}) {text:?}")
        }
        TileContent::Form {
            control_type,
            id,
            value,
        } => format!("{head} type {control_type} id {id:?} value {value:?}"),
    }
}

fn rect(r: &Rect) -> String {
    format!("{},{} {}x{}", r.x, r.y, r.w, r.h)
}

fn font(style: FontStyle) -> String {
    if style.bold {
        format!("{} bold", style.size)
    } else {
        style.size.to_string()
    }
}
