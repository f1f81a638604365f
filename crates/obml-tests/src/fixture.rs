//! Synthetic OBML documents for tests, benches and fuzz seeds.
//!
//! [`PageBuilder`] writes the exact byte layout the decoder expects, with
//! knobs for breaking it on purpose (wrong version, link section length
//! off by some bytes, content length past the end of the file, raw bytes
//! spliced into any section).

use obml_types::Color;

/// Position and size of a tile or link region, as stored on the wire:
/// `(x, y, w, h)` with x/w as shorts and y/h as mediums.
pub type Area = (i16, u32, i16, u32);

/// Builder for a complete version-6 document.
///
/// ```text
/// ┌────────────────────────────────────────────────────────────────┐
/// │ header    medium len, version, size, S\0\0\xFF\xFF, title,     │
/// │           blob, base_url, page_url, 0x13                       │
/// │ metadata  whatever was added with meta_* / raw_metadata        │
/// │ links     'S', medium length, link records                     │
/// │ content   tiles and image sections, up to content_length       │
/// └────────────────────────────────────────────────────────────────┘
/// ```
///
/// Image tiles can point at an image record added later through
/// [`images`](Self::images); the address is patched in by
/// [`build`](Self::build) once the record offsets are known.
#[derive(Clone, Debug)]
pub struct PageBuilder {
    version: u8,
    page_size: (i16, u32),
    title: String,
    base_url: String,
    page_url: String,
    metadata: Vec<u8>,
    links: Vec<u8>,
    link_len_delta: i64,
    content: Vec<Chunk>,
    content_length: Option<u32>,
}

#[derive(Clone, Debug)]
enum Chunk {
    Raw(Vec<u8>),
    /// An `I` record whose address is the `record`-th image added.
    ImageTile {
        area: Area,
        color: Color,
        record: usize,
    },
    Images(Vec<Vec<u8>>),
}

impl Default for PageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PageBuilder {
    /// A 240×320 version-6 page with no title, URLs, links or content.
    #[must_use]
    pub fn new() -> Self {
        Self {
            version: 6,
            page_size: (240, 320),
            title: String::new(),
            base_url: String::new(),
            page_url: String::new(),
            metadata: Vec::new(),
            links: Vec::new(),
            link_len_delta: 0,
            content: Vec::new(),
            content_length: None,
        }
    }

    // ── Header ──────────────────────────────────────────────────────────

    pub fn version(&mut self, version: u8) -> &mut Self {
        self.version = version;
        self
    }

    pub fn page_size(&mut self, width: i16, height: u32) -> &mut Self {
        self.page_size = (width, height);
        self
    }

    pub fn title(&mut self, title: &str) -> &mut Self {
        self.title = title.to_string();
        self
    }

    pub fn base_url(&mut self, url: &str) -> &mut Self {
        self.base_url = url.to_string();
        self
    }

    pub fn page_url(&mut self, url: &str) -> &mut Self {
        self.page_url = url.to_string();
        self
    }

    /// Override the absolute content length the header declares.
    /// By default it is the length of the built document.
    pub fn content_length(&mut self, len: u32) -> &mut Self {
        self.content_length = Some(len);
        self
    }

    // ── Metadata ────────────────────────────────────────────────────────

    /// `M C` record with a medium-prefixed body.
    pub fn meta_blob(&mut self, body: &[u8]) -> &mut Self {
        self.metadata.extend_from_slice(b"MC");
        put_blob_alt(&mut self.metadata, body);
        self
    }

    /// `M u` record, 7 fixed bytes.
    pub fn meta_fixed(&mut self, body: [u8; 7]) -> &mut Self {
        self.metadata.extend_from_slice(b"Mu");
        self.metadata.extend_from_slice(&body);
        self
    }

    /// `M S` record (TLS information).
    pub fn meta_tls(&mut self, body: &[u8]) -> &mut Self {
        self.metadata.extend_from_slice(b"MS");
        put_blob_alt(&mut self.metadata, body);
        self
    }

    pub fn raw_metadata(&mut self, bytes: &[u8]) -> &mut Self {
        self.metadata.extend_from_slice(bytes);
        self
    }

    // ── Links ───────────────────────────────────────────────────────────

    /// A hyperlink record (`tag` one of `i w W L P`).
    pub fn link(&mut self, tag: u8, kind: &str, href: &str, regions: &[Area]) -> &mut Self {
        self.link_header(tag, regions);
        put_string(&mut self.links, kind.as_bytes());
        put_string(&mut self.links, href.as_bytes());
        self
    }

    /// Like [`link`](Self::link), with the href written in its NUL-led
    /// form: the length counts a leading NUL that is not part of the URL.
    pub fn link_nul_href(&mut self, tag: u8, kind: &str, href: &str, regions: &[Area]) -> &mut Self {
        self.link_header(tag, regions);
        put_string(&mut self.links, kind.as_bytes());
        let mut body = vec![0];
        body.extend_from_slice(href.as_bytes());
        put_string(&mut self.links, &body);
        self
    }

    /// A hyperlink record with no regions: tag, zero count, 8 bytes.
    pub fn empty_link(&mut self, tag: u8) -> &mut Self {
        self.links.extend_from_slice(&[tag, 0]);
        self.links.extend_from_slice(&[0xEE; 8]);
        self
    }

    /// `I` record: regions, a blob and 5 trailing bytes.
    pub fn image_link(&mut self, regions: &[Area]) -> &mut Self {
        self.link_header(b'I', regions);
        put_string(&mut self.links, b"img");
        self.links.extend_from_slice(&[1, 2, 3, 4, 5]);
        self
    }

    /// `N` or `S` record: regions and two blobs.
    pub fn named_link(&mut self, tag: u8, regions: &[Area]) -> &mut Self {
        self.link_header(tag, regions);
        put_string(&mut self.links, b"name");
        put_string(&mut self.links, b"");
        self
    }

    /// Drop-down option list (`\0` record).
    pub fn dropdown(&mut self, options: &[(&str, &str)]) -> &mut Self {
        let count = u8::try_from(options.len()).expect("at most 255 options");
        self.links.extend_from_slice(&[0, 0, count]);
        for (label, value) in options {
            put_string(&mut self.links, label.as_bytes());
            put_string(&mut self.links, value.as_bytes());
        }
        self
    }

    /// `C` record, 21 opaque bytes.
    pub fn filler_link(&mut self) -> &mut Self {
        self.links.push(b'C');
        self.links.extend_from_slice(&[0; 21]);
        self
    }

    pub fn raw_links(&mut self, bytes: &[u8]) -> &mut Self {
        self.links.extend_from_slice(bytes);
        self
    }

    /// Add `delta` to the declared link-section length without changing
    /// the records.
    pub fn link_len_delta(&mut self, delta: i64) -> &mut Self {
        self.link_len_delta = delta;
        self
    }

    fn link_header(&mut self, tag: u8, regions: &[Area]) {
        let count = u8::try_from(regions.len()).expect("at most 255 regions");
        self.links.extend_from_slice(&[tag, count]);
        for area in regions {
            put_area(&mut self.links, *area);
        }
    }

    // ── Content ─────────────────────────────────────────────────────────

    pub fn block(&mut self, area: Area, color: Color) -> &mut Self {
        let mut rec = vec![b'B'];
        put_area(&mut rec, area);
        put_color(&mut rec, color);
        self.raw_content(&rec)
    }

    /// Image tile pointing at the `record`-th image (0-based, counted over
    /// every [`images`](Self::images) call).
    pub fn image_tile(&mut self, area: Area, color: Color, record: usize) -> &mut Self {
        self.content.push(Chunk::ImageTile {
            area,
            color,
            record,
        });
        self
    }

    /// Image tile with an explicit address, which need not exist.
    pub fn image_tile_at(&mut self, area: Area, color: Color, address: u32) -> &mut Self {
        let rec = image_tile_record(area, color, address);
        self.raw_content(&rec)
    }

    pub fn text(&mut self, area: Area, color: Color, font: i8, text: &str) -> &mut Self {
        let mut rec = vec![b'T'];
        put_area(&mut rec, area);
        put_color(&mut rec, color);
        rec.extend_from_slice(&font.to_be_bytes());
        put_string(&mut rec, text.as_bytes());
        self.raw_content(&rec)
    }

    pub fn form(
        &mut self,
        area: Area,
        color: Color,
        control_type: i16,
        id: &str,
        value: &str,
    ) -> &mut Self {
        let mut rec = vec![b'F'];
        put_area(&mut rec, area);
        put_color(&mut rec, color);
        rec.extend_from_slice(&control_type.to_be_bytes());
        put_string(&mut rec, id.as_bytes());
        put_string(&mut rec, value.as_bytes());
        rec.extend_from_slice(&[0; 3]);
        self.raw_content(&rec)
    }

    /// One of each record the decoder skips: `L`, `z`, `o`, `M`.
    pub fn skipped_records(&mut self) -> &mut Self {
        let mut rec = vec![b'L'];
        rec.extend_from_slice(&[0x11; 9]);
        rec.push(b'z');
        rec.extend_from_slice(&[0x22; 6]);
        rec.push(b'o');
        put_string(&mut rec, b"opaque");
        rec.extend_from_slice(&[b'M', 0x33, 0x33]);
        put_string(&mut rec, b"more");
        self.raw_content(&rec)
    }

    /// An `S` section holding one record per entry of `records`.
    pub fn images(&mut self, records: &[&[u8]]) -> &mut Self {
        self.content
            .push(Chunk::Images(records.iter().map(|r| r.to_vec()).collect()));
        self
    }

    pub fn raw_content(&mut self, bytes: &[u8]) -> &mut Self {
        self.content.push(Chunk::Raw(bytes.to_vec()));
        self
    }

    // ── Output ──────────────────────────────────────────────────────────

    /// Serialize the document.
    ///
    /// # Panics
    ///
    /// If an image tile refers to an image record that was never added.
    #[must_use]
    pub fn build(&self) -> Vec<u8> {
        self.build_with_addresses().0
    }

    /// Serialize the document and return the address of every image
    /// record, in the order they were added.
    ///
    /// # Panics
    ///
    /// As [`build`](Self::build).
    #[must_use]
    pub fn build_with_addresses(&self) -> (Vec<u8>, Vec<u32>) {
        let mut out = vec![0, 0, 0, self.version];
        put_coord(&mut out, self.page_size.0, self.page_size.1);
        out.extend_from_slice(b"S\0\0\xFF\xFF");
        put_string(&mut out, self.title.as_bytes());
        put_string(&mut out, b"");
        put_string(&mut out, self.base_url.as_bytes());
        put_string(&mut out, self.page_url.as_bytes());
        out.push(0x13);

        out.extend_from_slice(&self.metadata);

        out.push(b'S');
        let link_len = i64::try_from(self.links.len()).expect("link section fits i64")
            + self.link_len_delta;
        put_u24(&mut out, u32::try_from(link_len).expect("non-negative link length"));
        out.extend_from_slice(&self.links);

        let mut addresses = Vec::new();
        let mut patches = Vec::new();
        for chunk in &self.content {
            match chunk {
                Chunk::Raw(bytes) => out.extend_from_slice(bytes),
                Chunk::ImageTile {
                    area,
                    color,
                    record,
                } => {
                    let rec = image_tile_record(*area, *color, 0);
                    patches.push((out.len() + rec.len() - 3, *record));
                    out.extend_from_slice(&rec);
                }
                Chunk::Images(records) => {
                    out.push(b'S');
                    let len: usize = records.iter().map(|r| r.len() + 2).sum();
                    put_u24(&mut out, u32::try_from(len).expect("image section fits u24"));
                    for rec in records {
                        addresses.push(u32::try_from(out.len() - 3).expect("offset fits u32"));
                        put_string(&mut out, rec);
                    }
                }
            }
        }

        for (at, record) in patches {
            let address = *addresses
                .get(record)
                .unwrap_or_else(|| panic!("image tile refers to missing record {record}"));
            out[at..at + 3].copy_from_slice(&address.to_be_bytes()[1..]);
        }

        let content_length = self
            .content_length
            .unwrap_or_else(|| u32::try_from(out.len()).expect("document fits u32"));
        out[..3].copy_from_slice(&(content_length - 3).to_be_bytes()[1..]);

        (out, addresses)
    }
}

/// Hex dump in 16-byte rows, for assertion messages.
#[must_use]
pub fn dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, row)| format!("{:06x}  {}\n", i * 16, hex::encode(row)))
        .collect()
}

fn image_tile_record(area: Area, color: Color, address: u32) -> Vec<u8> {
    let mut rec = vec![b'I'];
    put_area(&mut rec, area);
    put_color(&mut rec, color);
    rec.extend_from_slice(&[0; 3]);
    put_u24(&mut rec, address);
    rec
}

fn put_u24(out: &mut Vec<u8>, v: u32) {
    assert!(v < 1 << 24, "{v} does not fit a medium");
    out.extend_from_slice(&v.to_be_bytes()[1..]);
}

fn put_coord(out: &mut Vec<u8>, x: i16, y: u32) {
    out.extend_from_slice(&x.to_be_bytes());
    put_u24(out, y);
}

fn put_area(out: &mut Vec<u8>, (x, y, w, h): Area) {
    put_coord(out, x, y);
    put_coord(out, w, h);
}

fn put_color(out: &mut Vec<u8>, c: Color) {
    out.extend_from_slice(&[c.a, c.r, c.g, c.b]);
}

fn put_string(out: &mut Vec<u8>, bytes: &[u8]) {
    let len = u16::try_from(bytes.len()).expect("string fits u16");
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(bytes);
}

fn put_blob_alt(out: &mut Vec<u8>, bytes: &[u8]) {
    put_u24(out, u32::try_from(bytes.len()).expect("blob fits u24"));
    out.extend_from_slice(bytes);
}
