use std::collections::BTreeMap;

use log::{debug, trace};
use obml_types::{Tile, TileContent};
use obml_wire::{ByteCursor, WireError};

use crate::codec::{ImageCodec, ImageError};
use crate::error::{DecodeError, Section};

/// Output of the content section: tiles in paint order and the image
/// table.
pub(crate) struct ContentSink<'d, I> {
    pub tiles: &'d mut Vec<Tile>,
    pub images: &'d mut BTreeMap<u32, I>,
}

/// Decode content records until the cursor reaches `end`
/// (the header's `content_length`).
///
/// ```text
/// ┌─────┬───────────────────────────────────────────────────┬──────────────┐
/// │ Tag │ Shape                                             │ Produces     │
/// ├─────┼───────────────────────────────────────────────────┼──────────────┤
/// │ 'L' │ 9 bytes                                           │ nothing      │
/// │ 'z' │ 6 bytes                                           │ nothing      │
/// │ 'o' │ blob                                              │ nothing      │
/// │ 'M' │ 2 bytes, blob                                     │ nothing      │
/// │ 'B' │ rect, color                                       │ Block tile   │
/// │ 'I' │ rect, color, 3 bytes, medium address              │ Image tile   │
/// │ 'F' │ rect, color, short type, string id, string value, │ Form tile    │
/// │     │ 3 bytes                                           │              │
/// │ 'T' │ rect, color, byte font, string text               │ Text tile    │
/// │ 'S' │ medium length, then image records to its end      │ image table  │
/// └─────┴───────────────────────────────────────────────────┴──────────────┘
/// ```
///
/// When `end` lies inside the source, reads are fenced at `end`: a record
/// that would cross it fails with
/// [`DecodeError::UnexpectedSectionLength`] rather than reading bytes that
/// belong to nothing.
pub(crate) fn read_content<C: ImageCodec>(
    cur: &mut ByteCursor<'_>,
    end: usize,
    codec: Option<&C>,
    sink: ContentSink<'_, C::Image>,
) -> Result<(), DecodeError> {
    let fenced = end <= cur.len();
    let mut section = cur.bounded(end);

    let result = read_records(&mut section, end, codec, sink);
    cur.seek(section.tell().max(cur.tell()))?;

    result.map_err(|err| match err {
        DecodeError::Wire(WireError::UnexpectedEof { offset, needed }) if fenced => {
            DecodeError::UnexpectedSectionLength {
                section: Section::Content,
                expected: end,
                actual: offset + needed,
            }
        }
        other => other,
    })
}

fn read_records<C: ImageCodec>(
    cur: &mut ByteCursor<'_>,
    end: usize,
    codec: Option<&C>,
    sink: ContentSink<'_, C::Image>,
) -> Result<(), DecodeError> {
    while cur.tell() < end {
        let offset = cur.tell();
        let tag = cur.read_u8()?;

        match tag {
            b'L' => cur.skip(9)?,
            b'z' => cur.skip(6)?,
            b'o' => cur.skip_blob()?,
            b'M' => {
                cur.skip(2)?;
                cur.skip_blob()?;
            }

            b'B' => {
                let bounds = cur.read_rect()?;
                let color = cur.read_color()?;
                sink.tiles.push(Tile::block(bounds, color));
            }

            b'I' => {
                let bounds = cur.read_rect()?;
                let color = cur.read_color()?;
                cur.skip(3)?;
                let address = cur.read_u24()?;
                sink.tiles.push(Tile {
                    bounds,
                    color,
                    content: TileContent::Image { address },
                });
            }

            b'F' => {
                let bounds = cur.read_rect()?;
                let color = cur.read_color()?;
                let control_type = cur.read_i16()?;
                let id = cur.read_string()?;
                let value = cur.read_string()?;
                cur.skip(3)?;
                sink.tiles.push(Tile {
                    bounds,
                    color,
                    content: TileContent::Form {
                        control_type,
                        id,
                        value,
                    },
                });
            }

            b'T' => {
                let bounds = cur.read_rect()?;
                let color = cur.read_color()?;
                let font_index = cur.read_i8()?;
                let text = cur.read_string()?;
                sink.tiles.push(Tile {
                    bounds,
                    color,
                    content: TileContent::Text { font_index, text },
                });
            }

            b'S' => read_images(cur, codec, sink.images)?,

            _ => return Err(DecodeError::BadContentTag { tag, offset }),
        }
    }

    debug!(
        "content: {} tiles, {} images",
        sink.tiles.len(),
        sink.images.len()
    );
    Ok(())
}

/// An `S` record: a medium length followed by back-to-back image records.
///
/// Each record's key is the offset of its length prefix minus 3, which is
/// the value image tiles carry in their address field. Records are fenced
/// at the section's end; one that cannot be read whole is
/// [`ImageError::Truncated`].
fn read_images<C: ImageCodec>(
    cur: &mut ByteCursor<'_>,
    codec: Option<&C>,
    images: &mut BTreeMap<u32, C::Image>,
) -> Result<(), DecodeError> {
    let len = cur.read_u24()? as usize;
    let data_end = cur.tell() + len;
    let mut section = cur.bounded(data_end);

    let result = read_image_records(&mut section, data_end, codec, images);
    cur.seek(section.tell().max(cur.tell()))?;
    result
}

fn read_image_records<C: ImageCodec>(
    cur: &mut ByteCursor<'_>,
    data_end: usize,
    codec: Option<&C>,
    images: &mut BTreeMap<u32, C::Image>,
) -> Result<(), DecodeError> {
    while cur.tell() < data_end {
        // The cursor never passes content_length, a u32.
        #[allow(clippy::cast_possible_truncation)]
        let address = (cur.tell() - 3) as u32;
        let record = cur.read_blob().map_err(|e| DecodeError::BadImageData {
            address,
            source: ImageError::Truncated(e),
        })?;

        let Some(codec) = codec else {
            trace!("images: skipped {} bytes at {address:#x}", record.len());
            continue;
        };

        if record.is_empty() {
            return Err(DecodeError::BadImageData {
                address,
                source: ImageError::Empty,
            });
        }

        let image = codec
            .decode(address, record)
            .map_err(|source| DecodeError::BadImageData { address, source })?;
        trace!("images: {} bytes at {address:#x}", record.len());
        images.insert(address, image);
    }

    Ok(())
}
