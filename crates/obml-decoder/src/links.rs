use log::{debug, trace};
use obml_types::{Link, LinkTarget, Rect};
use obml_wire::ByteCursor;

use crate::error::{DecodeError, Section};
use crate::metadata::LinkSection;

/// Decode link records until the end of the link section.
///
/// ```text
/// ┌────────────────┬─────────────────────────────────────────────┬──────────┐
/// │ Tag            │ Shape                                       │ Produces │
/// ├────────────────┼─────────────────────────────────────────────┼──────────┤
/// │ '\0'           │ 1 byte, n, n × (blob, blob)                 │ nothing  │
/// │ i w W L P      │ n, n × rect, string type, url href          │ Link     │
/// │                │ (n = 0: 8 bytes instead)                    │ nothing  │
/// │ 'C'            │ 21 bytes                                    │ nothing  │
/// │ 'I'            │ n, n × rect, blob, 5 bytes                  │ Link (*) │
/// │ 'N' 'S'        │ n, n × rect, blob, blob                     │ Link (*) │
/// └────────────────┴─────────────────────────────────────────────┴──────────┘
///   (*) regions only, empty target
/// ```
///
/// The records must end exactly at `section.end`.
pub(crate) fn read_links(
    cur: &mut ByteCursor<'_>,
    section: LinkSection,
    links: &mut Vec<Link>,
) -> Result<(), DecodeError> {
    while cur.tell() < section.end {
        let offset = cur.tell();
        let tag = cur.read_u8()?;

        match tag {
            // Option lists for drop-down form controls.
            b'\0' => {
                cur.skip(1)?;
                let options = cur.read_u8()?;
                for _ in 0..options {
                    cur.skip_blob()?;
                    cur.skip_blob()?;
                }
                trace!("links: {options} drop-down options at {offset}");
            }

            b'i' | b'w' | b'W' | b'L' | b'P' => {
                let count = cur.read_u8()?;
                if count == 0 {
                    cur.skip(8)?;
                    continue;
                }
                let regions = read_regions(cur, count)?;
                let kind = cur.read_string()?;
                let href = cur.read_url()?;
                trace!("links: {} -> {href:?} at {offset}", char::from(tag));
                links.push(Link {
                    regions,
                    target: LinkTarget { kind, href },
                });
            }

            b'C' => cur.skip(21)?,

            b'I' => {
                let count = cur.read_u8()?;
                let regions = read_regions(cur, count)?;
                cur.skip_blob()?;
                cur.skip(5)?;
                links.push(Link {
                    regions,
                    target: LinkTarget::default(),
                });
            }

            b'N' | b'S' => {
                let count = cur.read_u8()?;
                let regions = read_regions(cur, count)?;
                cur.skip_blob()?;
                cur.skip_blob()?;
                links.push(Link {
                    regions,
                    target: LinkTarget::default(),
                });
            }

            _ => return Err(DecodeError::BadLinkTag { tag, offset }),
        }
    }

    if cur.tell() != section.end {
        return Err(DecodeError::UnexpectedSectionLength {
            section: Section::Links,
            expected: section.end,
            actual: cur.tell(),
        });
    }

    debug!("links: {} decoded", links.len());
    Ok(())
}

fn read_regions(cur: &mut ByteCursor<'_>, count: u8) -> Result<Vec<Rect>, DecodeError> {
    (0..count)
        .map(|_| cur.read_rect().map_err(DecodeError::from))
        .collect()
}
